pub mod import;
pub mod sql;
pub mod workspace;

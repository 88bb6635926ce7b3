pub mod run;
pub mod table;

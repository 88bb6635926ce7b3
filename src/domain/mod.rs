pub mod column_kind;
pub mod entities;
pub mod naming;

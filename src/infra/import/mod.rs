pub mod discover;
pub mod xlsx;

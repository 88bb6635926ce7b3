#[cfg(feature = "desktop")]
pub mod dialogs;
pub mod open;

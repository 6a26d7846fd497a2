pub mod property;
pub mod saved;
pub mod user;
pub mod views;

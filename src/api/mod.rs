pub mod listing;
pub mod registration;

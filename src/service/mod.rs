pub mod badge;
pub mod policy;

pub mod error;
pub mod quote;
pub mod types;

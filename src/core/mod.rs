pub mod debt;
pub mod error;
pub mod interest;
pub mod profile;
pub mod strategy;

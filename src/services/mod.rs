pub mod health;
pub mod panel;
pub mod pending;
pub mod registration;
pub mod token_validator;

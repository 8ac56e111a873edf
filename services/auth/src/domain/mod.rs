pub mod password;
pub mod repository;
pub mod token;
pub mod types;
pub mod validation;

pub mod employee;
pub mod settings;
pub mod trip;
pub mod user;

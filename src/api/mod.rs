pub mod dashboard;
pub mod employee;
pub mod settings;
pub mod trip;

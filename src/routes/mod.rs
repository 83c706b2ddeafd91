pub mod admin;
pub mod appointment;

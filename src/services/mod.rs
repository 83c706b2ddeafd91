pub mod appointment_service;
pub mod auth_service;
pub mod otp_service;

#[cfg(test)]
mod otp_service_test;

//! Appointment booking and its authorization rules

pub mod service;

pub use service::BookingService;

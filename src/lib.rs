//! Wellness Intake — onboarding wizard core and submission service.

pub mod admin;
pub mod config;
pub mod error;
pub mod gateway;
pub mod notify;
pub mod profile;
pub mod server;
pub mod store;
pub mod wizard;

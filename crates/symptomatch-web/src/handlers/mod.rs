//! HTTP handlers for all API routes.

pub mod ai;
pub mod analyze;
pub mod diseases;
pub mod health;
pub mod symptoms;

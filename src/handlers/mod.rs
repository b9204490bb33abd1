//! HTTP handlers for ai-service.

pub mod analyze;
pub mod generate;
pub mod health;

pub use analyze::analyze;
pub use generate::generate;
pub use health::health_check;

//! Service-layer components.

pub mod providers;

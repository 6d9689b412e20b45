//! API handlers module

pub mod citations;
pub mod health;
pub mod metrics;

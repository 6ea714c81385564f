//! Outbound adapters for the measurement provider and persistence.

pub mod openaq;
pub mod persistence;

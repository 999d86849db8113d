//! Core types shared across HRDB facilities
//!
//! Holds the canonical field keys and event names used by the logging
//! facility and the store's structured events.

pub mod schema;

//! API exposure modules
//!
//! Each exposure consumes the shared application state and produces a Router
//! for its protocol.

pub mod rest;

pub use rest::RestExposure;

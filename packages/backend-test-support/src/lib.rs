//! Backend test support utilities
//!
//! This crate provides utilities shared by the backend integration tests:
//! idempotent logging initialization and assertions for the Problem Details
//! error contract.

pub mod logging;
pub mod problem_details;

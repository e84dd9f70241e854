//! Storage boundary for user records.

pub mod users;

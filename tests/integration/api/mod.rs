//! API integration tests

pub mod auth_test;

//! Realtime integration tests

pub mod presence_flow_test;

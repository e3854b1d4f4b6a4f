//! Test suite for PulseChat
//!
//! This module organizes all tests

pub mod common;
pub mod integration;

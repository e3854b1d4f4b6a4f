//! Integration tests
//!
//! - `api` - HTTP endpoints through an in-process server
//! - `realtime` - presence and message delivery over a real socket
//! - `client` - the session client against a mock backend
//! - `storage_test` - users and messages below the HTTP layer

pub mod api;
pub mod client;
pub mod realtime;
pub mod storage_test;

//! Client session integration tests

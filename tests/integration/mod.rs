//! Integration tests for fixzit-scope
//!
//! These tests verify the interaction between multiple components
//! and run against a real in-memory store without mocking.

pub mod config_tests;
pub mod http_tests;
pub mod scope_tests;
pub mod search_tests;
pub mod sla_tests;

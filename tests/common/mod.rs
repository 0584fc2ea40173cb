//! Common test utilities for fixzit-scope
//!
//! - Actor factories for every role the scope rules distinguish
//! - A seeded in-memory store covering two organisations
//! - Assertion macros

pub mod fixtures;

pub use fixtures::{ActorFactory, TestContext, seeded_store};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err and return the error
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}

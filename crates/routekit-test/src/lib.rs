//! # routekit-test
//!
//! Testing utilities for routekit. Provides controller configuration, a
//! controller test harness that resolves and runs handlers without a
//! transport, a request factory, and assertion helpers for handler output.

pub mod assertions;
pub mod controller;
pub mod harness;
pub mod request_factory;

pub use assertions::{
    assert_collection_type, assert_entity_eq, assert_header, assert_status, assert_type,
    AssertionError,
};
pub use controller::{Controller, ControllerConfiguration};
pub use harness::ControllerTest;
pub use request_factory::RequestFactory;

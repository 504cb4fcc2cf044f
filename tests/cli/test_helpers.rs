//! CLI test helpers
//!
//! Provides Arc<Services> wrappers matching CLI execute() signatures.

use kindex::core::services::Services;
use std::sync::Arc;

use crate::common::{create_test_services, TestSite};

/// Create services over a standard site (keep the site alive during the test)
pub fn create_cli_test_services() -> (Arc<Services>, TestSite) {
    let site = TestSite::standard();
    let (services, _watch) = create_test_services(&site);
    (services, site)
}

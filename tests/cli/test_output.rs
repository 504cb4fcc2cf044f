//! Tests for CLI output formatting helpers
//!
//! Tests the output formatting utilities:
//! - Duration formatting (ms, s, m)
//! - Relative time formatting (just now, minutes ago, hours ago, days ago)

use chrono::{Duration, Utc};
use kindex::cli::output::{format_duration, format_relative_time};

// =============================================================================
// format_duration tests
// =============================================================================

#[test]
fn test_format_duration_ranges() {
    assert_eq!(format_duration(0.0), "0ms");
    assert_eq!(format_duration(0.042), "42ms");
    assert_eq!(format_duration(1.0), "1.00s");
    assert_eq!(format_duration(59.99), "59.99s");
    assert_eq!(format_duration(60.0), "1m 0.0s");
    assert_eq!(format_duration(125.5), "2m 5.5s");
}

// =============================================================================
// format_relative_time tests
// =============================================================================

#[test]
fn test_format_relative_time_ranges() {
    let now = Utc::now();
    assert_eq!(format_relative_time(&now), "just now");
    assert_eq!(format_relative_time(&(now - Duration::minutes(5))), "5m ago");
    assert_eq!(format_relative_time(&(now - Duration::hours(3))), "3h ago");
    assert_eq!(format_relative_time(&(now - Duration::days(2))), "2d ago");
}

#[test]
fn test_format_relative_time_future() {
    let later = Utc::now() + Duration::hours(1);
    assert_eq!(format_relative_time(&later), "in the future");
}

//! Tests for the deduplicated warning channel.

use brindle_common::warning::{clear_warnings, warn_once};

#[test]
fn test_warn_once_deduplicates_until_cleared() {
    let message = "unsupported pseudo-class ':warning-test-only'";
    assert!(warn_once("Test", message));
    assert!(!warn_once("Test", message));

    // Same message from another component is a different warning
    assert!(warn_once("Other", message));

    clear_warnings();
    assert!(warn_once("Test", message));
}

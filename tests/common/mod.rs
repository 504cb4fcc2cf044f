// Common test utilities and fixtures

pub mod fixtures;

// Re-export commonly used items
// Note: These may appear unused in some test crates but are used in others
#[allow(unused_imports)]
pub use fixtures::{words, TestSite, ABOUT_PAGE, FAQ_DATA, PROCESS_PAGE};
#[allow(unused_imports)]
pub use helpers::{
    create_test_services, test_config, vectors_for, wait_until, ManualWatchBackend,
};

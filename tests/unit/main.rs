//! Library-level tests that exercise several modules together.

mod config_tests;
mod library_tests;
mod loader_tests;
mod matcher_tests;
mod search_mode_tests;

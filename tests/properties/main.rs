//! Property-based tests for parsing and search.

mod determinism_tests;

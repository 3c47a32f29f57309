//! Integration test crate for the Prosperity governance ledger.
//!
//! This crate has no library code — it only contains integration tests
//! that exercise end-to-end governance flows across multiple workspace
//! crates.
//!
//! Run all integration tests:
//! ```sh
//! cargo test -p prosperity-integration-tests
//! ```

//! Test support shared by the errcat crates' test suites.

pub mod log;

pub use log::{TestLogEntry, TestLogger, TestPhase, init_global_test_logging};

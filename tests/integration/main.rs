//! Integration test harness
//!
//! Each submodule exercises the collector against mock HTTP servers.

mod config_tests;
mod pipeline_tests;

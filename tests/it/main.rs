//! Single test binary entry point.
//!
//! All tests link into one binary to keep link time down.
//!
//! Structure:
//! - helpers: Fixtures and the event recorder
//! - integration: Full drag workflows through a pointer source
//! - unit: Single-component tests against the public API

mod helpers;
mod integration;

//! Integration tests for draggable.
//!
//! These drive complete drags through an in-memory window and check the
//! dispatched events and state snapshots end-to-end.

mod dispatch_order_tests;

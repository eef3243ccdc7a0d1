//! Unit tests for perf module.

use draggable::perf::{ScopedTimer, is_profiling_enabled, set_profiling_enabled};

#[test]
fn test_scoped_timer_creation() {
    // High threshold: dropping must not report
    let timer = ScopedTimer::new("test_op", 1000.0);
    assert_eq!(timer.name(), "test_op");
    assert!(timer.elapsed_ms() >= 0.0);
}

#[test]
fn test_runtime_toggle() {
    let initial = is_profiling_enabled();
    set_profiling_enabled(!initial);
    assert_eq!(is_profiling_enabled(), !initial);
    set_profiling_enabled(initial);
}

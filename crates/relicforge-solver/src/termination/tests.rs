//! Tests for termination conditions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::sleep;
use std::time::Duration;

use super::*;

#[test]
fn test_node_count_termination() {
    let term = NodeCountTermination::new(3);
    let mut stats = SearchStats::default();

    assert!(!term.is_terminated(&stats));
    stats.record_node();
    stats.record_node();
    assert!(!term.is_terminated(&stats));
    stats.record_node();
    assert!(term.is_terminated(&stats));
}

#[test]
fn test_time_termination() {
    let mut stats = SearchStats::default();
    stats.start();

    assert!(!TimeTermination::seconds(60).is_terminated(&stats));
    sleep(Duration::from_millis(5));
    assert!(TimeTermination::millis(1).is_terminated(&stats));
}

#[test]
fn test_time_termination_zero_limit() {
    assert!(TimeTermination::new(Duration::ZERO).is_terminated(&SearchStats::default()));
}

#[test]
fn test_external_termination() {
    let flag = AtomicBool::new(false);
    let term = ExternalTermination::new(&flag);
    let stats = SearchStats::default();

    assert!(!term.is_terminated(&stats));
    flag.store(true, Ordering::SeqCst);
    assert!(term.is_terminated(&stats));
}

#[test]
fn test_or_termination() {
    let flag = AtomicBool::new(false);
    let term = OrTermination((
        NodeCountTermination::new(2),
        ExternalTermination::new(&flag),
    ));
    let mut stats = SearchStats::default();

    assert!(!term.is_terminated(&stats));
    flag.store(true, Ordering::SeqCst);
    assert!(term.is_terminated(&stats));

    flag.store(false, Ordering::SeqCst);
    stats.record_node();
    stats.record_node();
    assert!(term.is_terminated(&stats));
}

#[test]
fn test_optional_termination() {
    let mut stats = SearchStats::default();
    stats.record_node();

    let absent: Option<NodeCountTermination> = None;
    assert!(!absent.is_terminated(&stats));
    assert!(Some(NodeCountTermination::new(1)).is_terminated(&stats));
    assert!(!NeverTermination.is_terminated(&stats));
}

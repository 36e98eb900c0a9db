use costmap_core::loader::{parse_boundaries, parse_rows};
use costmap_core::prelude::*;

const GEOJSON: &str = r#"{"type":"FeatureCollection","features":[
  {"type":"Feature","properties":{"ADMIN":"Canada"},"geometry":null}]}"#;
const TABLE: &str = "Country,costIndex,incomeIndex,PPI\nCanada,85,90,105.9\n";

#[test]
fn joins_when_rows_arrive_last() {
    let barrier = JoinBarrier::new();
    assert!(matches!(
        barrier.offer_boundaries(parse_boundaries(GEOJSON)),
        BarrierEvent::Waiting
    ));
    assert_eq!(
        barrier.state(),
        BarrierState::Waiting {
            boundaries: true,
            rows: false
        }
    );

    let ds = barrier.offer_rows(parse_rows(TABLE)).into_dataset().unwrap();
    assert_eq!(ds.stats().matched, 1);
    assert_eq!(barrier.state(), BarrierState::Joined);
}

#[test]
fn joins_when_boundaries_arrive_last() {
    let barrier = JoinBarrier::new();
    assert!(matches!(barrier.offer_rows(parse_rows(TABLE)), BarrierEvent::Waiting));
    assert!(matches!(
        barrier.offer_boundaries(parse_boundaries(GEOJSON)),
        BarrierEvent::Joined(_)
    ));
}

#[test]
fn join_runs_only_once() {
    let barrier = JoinBarrier::new();
    barrier.offer_rows(parse_rows(TABLE));
    barrier.offer_boundaries(parse_boundaries(GEOJSON));
    assert!(matches!(
        barrier.offer_rows(parse_rows(TABLE)),
        BarrierEvent::AlreadyJoined
    ));
}

#[test]
fn a_failed_load_latches_unavailable() {
    let barrier = JoinBarrier::new();
    let event = barrier.offer_boundaries(parse_boundaries("{ not json"));
    assert!(matches!(event, BarrierEvent::Unavailable(_)));

    let late = barrier.offer_rows(parse_rows(TABLE));
    match late {
        BarrierEvent::Unavailable(reason) => assert!(reason.contains("boundaries")),
        other => panic!("expected Unavailable, got {other:?}"),
    }
    assert!(matches!(barrier.state(), BarrierState::Unavailable(_)));
}

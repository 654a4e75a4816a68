use super::common::{scored_technician, scored_vendor};
use crate::workflows::dispatch::engine::{
    AssignmentDecision, DispatchEngine, EngineConfig, RankedCandidates,
};

fn engine() -> DispatchEngine {
    DispatchEngine::new(EngineConfig::default())
}

fn ranked(
    technicians: Vec<crate::workflows::dispatch::engine::ScoredTechnician>,
    vendors: Vec<crate::workflows::dispatch::engine::ScoredVendor>,
) -> RankedCandidates {
    RankedCandidates {
        technicians,
        vendors,
    }
}

#[test]
fn strong_technician_wins_before_a_stronger_vendor_is_considered() {
    let pools = ranked(
        vec![scored_technician(1, 0.75)],
        vec![scored_vendor(9, 0.95)],
    );

    match engine().select(&pools) {
        Some(AssignmentDecision::Technician { id, .. }) => assert_eq!(id.0, 1),
        other => panic!("expected technician recommendation, got {other:?}"),
    }
}

#[test]
fn strong_vendor_wins_when_no_technician_clears_the_threshold() {
    let pools = ranked(
        vec![scored_technician(1, 0.6)],
        vec![scored_vendor(9, 0.85)],
    );

    match engine().select(&pools) {
        Some(AssignmentDecision::Vendor { id, .. }) => assert_eq!(id.0, 9),
        other => panic!("expected vendor recommendation, got {other:?}"),
    }
}

#[test]
fn weak_pools_fall_back_to_raw_score_with_technician_preference() {
    let pools = ranked(
        vec![scored_technician(1, 0.4)],
        vec![scored_vendor(9, 0.3)],
    );
    match engine().select(&pools) {
        Some(AssignmentDecision::Technician { id, .. }) => assert_eq!(id.0, 1),
        other => panic!("expected technician recommendation, got {other:?}"),
    }

    // Equal scores also go to the technician.
    let pools = ranked(
        vec![scored_technician(2, 0.4)],
        vec![scored_vendor(9, 0.4)],
    );
    match engine().select(&pools) {
        Some(AssignmentDecision::Technician { id, .. }) => assert_eq!(id.0, 2),
        other => panic!("expected technician recommendation, got {other:?}"),
    }
}

#[test]
fn weak_vendor_wins_only_with_the_higher_score() {
    let pools = ranked(
        vec![scored_technician(1, 0.3)],
        vec![scored_vendor(9, 0.5)],
    );

    match engine().select(&pools) {
        Some(AssignmentDecision::Vendor { id, .. }) => assert_eq!(id.0, 9),
        other => panic!("expected vendor recommendation, got {other:?}"),
    }
}

#[test]
fn single_sided_pools_still_produce_a_decision() {
    let pools = ranked(vec![scored_technician(1, 0.2)], Vec::new());
    assert!(matches!(
        engine().select(&pools),
        Some(AssignmentDecision::Technician { .. })
    ));

    let pools = ranked(Vec::new(), vec![scored_vendor(9, 0.2)]);
    assert!(matches!(
        engine().select(&pools),
        Some(AssignmentDecision::Vendor { .. })
    ));
}

#[test]
fn empty_pools_yield_no_decision() {
    let pools = ranked(Vec::new(), Vec::new());
    assert!(engine().select(&pools).is_none());
}

#[test]
fn decision_carries_score_and_reasoning_from_the_winner() {
    let mut technician = scored_technician(4, 0.82);
    technician.reasoning = "Strong skills match".to_string();
    let pools = ranked(vec![technician], Vec::new());

    let decision = engine().select(&pools).expect("decision");
    assert_eq!(decision.confidence_score(), 0.82);
    assert_eq!(decision.reasoning(), "Strong skills match");
    assert!(decision.summary().starts_with("technician 4"));
}

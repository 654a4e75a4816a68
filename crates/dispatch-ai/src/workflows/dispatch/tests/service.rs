use super::common::*;
use crate::workflows::dispatch::domain::SkillsField;
use crate::workflows::dispatch::engine::AssignmentDecision;
use crate::workflows::dispatch::service::DispatchServiceError;
use crate::workflows::dispatch::WorkOrderId;

#[tokio::test]
async fn scores_the_hvac_scenario_end_to_end() {
    let mut provider = hvac_fixture();
    provider.technicians = vec![
        technician(
            1,
            Some(SkillsField::Parsed(vec![
                "HVAC".to_string(),
                "electrical".to_string(),
            ])),
            Some("Building A - Floor 2"),
            1,
        ),
        technician(2, Some(SkillsField::Parsed(Vec::new())), None, 0),
    ];
    provider.feedback.insert(provider.technicians[0].technician_id, 0.9);

    let recommendation = service_with(provider)
        .recommend(WORK_ORDER, ORG)
        .await
        .expect("recommendation");

    let technicians = &recommendation.recommendations.technicians;
    assert_eq!(technicians.len(), 2);

    // One of two required skills matches for technician 1.
    let first = &technicians[0];
    assert_eq!(first.technician_id.0, 1);
    assert_eq!(first.factors.skills_match, 0.5);
    assert_eq!(first.factors.location_proximity, 1.0);
    assert_eq!(first.factors.workload, 0.8);
    assert_eq!(first.factors.availability, 1.0);
    assert_eq!(first.factors.past_performance, 0.9);
    let expected = 0.5 * 0.3 + 1.0 * 0.2 + 0.8 * 0.2 + 1.0 * 0.1 + 0.9 * 0.2;
    assert!((first.confidence_score - expected).abs() < 1e-12);
    assert_eq!(
        first.reasoning,
        "Close to work site, Low current workload, Good past performance"
    );

    // An empty specialization list cannot substring-match anything: 0/2,
    // not the neutral default.
    let second = &technicians[1];
    assert_eq!(second.technician_id.0, 2);
    assert_eq!(second.factors.skills_match, 0.0);
    assert_eq!(second.factors.location_proximity, 0.5);
    assert_eq!(second.factors.past_performance, 0.5);

    match &recommendation.recommended_assignment {
        AssignmentDecision::Technician {
            id,
            confidence_score,
            ..
        } => {
            assert_eq!(id.0, 1);
            assert!(*confidence_score > 0.7);
        }
        other => panic!("expected technician assignment, got {other:?}"),
    }
}

#[tokio::test]
async fn pools_truncate_to_the_configured_limit_after_selection() {
    let mut provider = hvac_fixture();
    for id in 1..=8 {
        provider.technicians.push(technician(
            id,
            Some(SkillsField::Parsed(vec!["HVAC".to_string()])),
            Some("Building A - Floor 2"),
            id as u32,
        ));
    }

    let recommendation = service_with(provider)
        .recommend(WORK_ORDER, ORG)
        .await
        .expect("recommendation");

    let technicians = &recommendation.recommendations.technicians;
    assert_eq!(technicians.len(), 5);
    for pair in technicians.windows(2) {
        assert!(pair[0].confidence_score >= pair[1].confidence_score);
    }
    // Lowest workload sorts first; the head of the full pool drove the
    // decision before truncation.
    assert_eq!(technicians[0].technician_id.0, 1);
}

#[tokio::test]
async fn ties_keep_snapshot_order() {
    let mut provider = hvac_fixture();
    // Identical candidates except for their ids score identically.
    for id in [31, 17, 54] {
        provider.technicians.push(technician(
            id,
            Some(SkillsField::Parsed(vec!["HVAC".to_string()])),
            None,
            0,
        ));
    }

    let recommendation = service_with(provider)
        .recommend(WORK_ORDER, ORG)
        .await
        .expect("recommendation");

    let order: Vec<i64> = recommendation
        .recommendations
        .technicians
        .iter()
        .map(|technician| technician.technician_id.0)
        .collect();
    assert_eq!(order, vec![31, 17, 54]);
}

#[tokio::test]
async fn missing_work_order_is_reported_as_not_found() {
    let mut provider = hvac_fixture();
    provider.technicians = vec![technician(1, None, None, 0)];

    let error = service_with(provider)
        .recommend(WorkOrderId(999), ORG)
        .await
        .expect_err("unknown work order");

    match error {
        DispatchServiceError::WorkOrderNotFound(id) => assert_eq!(id, WorkOrderId(999)),
        other => panic!("expected not-found, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_pools_raise_no_candidates_available() {
    let provider = hvac_fixture();

    let error = service_with(provider)
        .recommend(WORK_ORDER, ORG)
        .await
        .expect_err("no candidates");

    assert!(matches!(error, DispatchServiceError::NoCandidatesAvailable));
    assert_eq!(
        error.to_string(),
        "No suitable technicians or vendors available for assignment"
    );
}

#[tokio::test]
async fn unavailable_auxiliary_lookups_degrade_to_neutral_factors() {
    let mut provider = hvac_fixture();
    provider.fail_auxiliary_lookups = true;
    provider.technicians = vec![technician(
        1,
        Some(SkillsField::Parsed(vec!["HVAC".to_string()])),
        Some("Building A - Floor 2"),
        0,
    )];

    let recommendation = service_with(provider)
        .recommend(WORK_ORDER, ORG)
        .await
        .expect("degraded lookups still produce a recommendation");

    let first = &recommendation.recommendations.technicians[0];
    assert_eq!(first.factors.skills_match, 0.5);
    assert_eq!(first.factors.past_performance, 0.5);
    // The rest of the factor set is unaffected.
    assert_eq!(first.factors.location_proximity, 1.0);
    assert_eq!(first.factors.workload, 1.0);
}

#[tokio::test]
async fn vendors_carry_estimates_and_rank_by_confidence() {
    let mut provider = hvac_fixture();
    provider.vendors = vec![
        vendor(20, Some("General handyman"), 3.0, None),
        vendor(
            21,
            Some("Commercial HVAC service"),
            4.5,
            Some("2 hour response"),
        ),
    ];

    let recommendation = service_with(provider)
        .recommend(WORK_ORDER, ORG)
        .await
        .expect("recommendation");

    let vendors = &recommendation.recommendations.vendors;
    assert_eq!(vendors[0].vendor_id.0, 21);
    assert_eq!(vendors[0].factors.specialty_match, 1.0);
    assert_eq!(vendors[0].factors.response_time, 0.8);
    assert_eq!(vendors[0].estimated_response_time_hours, 2);
    assert!((vendors[0].estimated_cost - 157.5).abs() < 1e-9);
    assert_eq!(
        vendors[0].reasoning,
        "Specialty matches, High reliability, Fast response time, Good value"
    );

    match &recommendation.recommended_assignment {
        AssignmentDecision::Vendor { id, .. } => assert_eq!(id.0, 21),
        other => panic!("expected vendor assignment, got {other:?}"),
    }
}

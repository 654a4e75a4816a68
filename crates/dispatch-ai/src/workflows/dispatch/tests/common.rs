use std::collections::HashMap;
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::dispatch::domain::{
    AssetCategoryId, OrganizationId, SkillsField, TechnicianCandidate, TechnicianId,
    VendorCandidate, VendorId, WorkOrderContext, WorkOrderId,
};
use crate::workflows::dispatch::engine::{EngineConfig, ScoredTechnician, ScoredVendor, TechnicianFactors, VendorFactors};
use crate::workflows::dispatch::service::DispatchService;
use crate::workflows::dispatch::snapshot::{DispatchSnapshotProvider, SnapshotError};

pub(super) const ORG: OrganizationId = OrganizationId(1);
pub(super) const WORK_ORDER: WorkOrderId = WorkOrderId(101);
pub(super) const HVAC_CATEGORY: AssetCategoryId = AssetCategoryId(7);

pub(super) fn work_order() -> WorkOrderContext {
    WorkOrderContext {
        work_order_id: WORK_ORDER,
        organization_id: ORG,
        asset_category_id: Some(HVAC_CATEGORY),
        category_name: Some("HVAC".to_string()),
        asset_location: Some("Building A - Floor 2".to_string()),
        site_name: Some("Building A".to_string()),
    }
}

pub(super) fn technician(
    id: i64,
    specializations: Option<SkillsField>,
    current_location: Option<&str>,
    open_assignments: u32,
) -> TechnicianCandidate {
    TechnicianCandidate {
        technician_id: TechnicianId(id),
        display_name: format!("Technician {id}"),
        specializations,
        current_location: current_location.map(str::to_string),
        open_assignments,
        is_available: true,
    }
}

pub(super) fn vendor(
    id: i64,
    specialty: Option<&str>,
    average_rating: f64,
    sla: Option<&str>,
) -> VendorCandidate {
    VendorCandidate {
        vendor_id: VendorId(id),
        display_name: format!("Vendor {id}"),
        specialty: specialty.map(str::to_string),
        average_rating,
        service_level_agreement: sla.map(str::to_string),
        is_active: true,
    }
}

pub(super) fn scored_technician(id: i64, confidence_score: f64) -> ScoredTechnician {
    ScoredTechnician {
        technician_id: TechnicianId(id),
        confidence_score,
        factors: TechnicianFactors {
            skills_match: 0.5,
            location_proximity: 0.5,
            workload: 0.5,
            availability: 1.0,
            past_performance: 0.5,
        },
        reasoning: "Available technician".to_string(),
    }
}

pub(super) fn scored_vendor(id: i64, confidence_score: f64) -> ScoredVendor {
    ScoredVendor {
        vendor_id: VendorId(id),
        confidence_score,
        factors: VendorFactors {
            specialty_match: 0.5,
            cost_rating: 0.5,
            response_time: 0.5,
            reliability: 0.5,
        },
        estimated_cost: 180.0,
        estimated_response_time_hours: 4,
        reasoning: "Available vendor".to_string(),
    }
}

/// In-memory snapshot used across the unit suites. `fail_auxiliary_lookups`
/// makes the per-factor lookups error so degraded-path behavior can be
/// asserted.
#[derive(Default)]
pub(super) struct FixtureProvider {
    pub(super) work_orders: Vec<WorkOrderContext>,
    pub(super) technicians: Vec<TechnicianCandidate>,
    pub(super) vendors: Vec<VendorCandidate>,
    pub(super) required_skills: HashMap<AssetCategoryId, SkillsField>,
    pub(super) feedback: HashMap<TechnicianId, f64>,
    pub(super) fail_auxiliary_lookups: bool,
}

impl DispatchSnapshotProvider for FixtureProvider {
    async fn work_order_context(
        &self,
        work_order_id: WorkOrderId,
        organization_id: OrganizationId,
    ) -> Result<Option<WorkOrderContext>, SnapshotError> {
        Ok(self
            .work_orders
            .iter()
            .find(|candidate| {
                candidate.work_order_id == work_order_id
                    && candidate.organization_id == organization_id
            })
            .cloned())
    }

    async fn eligible_technicians(
        &self,
        _organization_id: OrganizationId,
    ) -> Result<Vec<TechnicianCandidate>, SnapshotError> {
        Ok(self
            .technicians
            .iter()
            .filter(|technician| technician.is_available)
            .cloned()
            .collect())
    }

    async fn eligible_vendors(
        &self,
        _organization_id: OrganizationId,
    ) -> Result<Vec<VendorCandidate>, SnapshotError> {
        Ok(self
            .vendors
            .iter()
            .filter(|vendor| vendor.is_active)
            .cloned()
            .collect())
    }

    async fn required_skills_for_category(
        &self,
        category_id: AssetCategoryId,
    ) -> Result<Option<SkillsField>, SnapshotError> {
        if self.fail_auxiliary_lookups {
            return Err(SnapshotError::Query("skills lookup offline".to_string()));
        }
        Ok(self.required_skills.get(&category_id).cloned())
    }

    async fn past_feedback_score(
        &self,
        technician_id: TechnicianId,
        _window_days: u32,
    ) -> Result<Option<f64>, SnapshotError> {
        if self.fail_auxiliary_lookups {
            return Err(SnapshotError::Query("feedback lookup offline".to_string()));
        }
        Ok(self.feedback.get(&technician_id).copied())
    }
}

pub(super) fn hvac_fixture() -> FixtureProvider {
    let mut required_skills = HashMap::new();
    required_skills.insert(
        HVAC_CATEGORY,
        SkillsField::Parsed(vec!["HVAC".to_string(), "refrigerant".to_string()]),
    );

    FixtureProvider {
        work_orders: vec![work_order()],
        required_skills,
        ..FixtureProvider::default()
    }
}

pub(super) fn service_with(provider: FixtureProvider) -> DispatchService<FixtureProvider> {
    DispatchService::new(Arc::new(provider), EngineConfig::default())
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

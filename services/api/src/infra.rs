use chrono::{Duration, Local, NaiveDate};
use dispatch_ai::workflows::dispatch::{
    windowed_feedback_average, AssetCategoryId, DispatchSnapshotProvider, FeedbackRecord,
    FeedbackSignal, OrganizationId, SkillsField, SnapshotError, TechnicianCandidate, TechnicianId,
    VendorCandidate, VendorId, WorkOrderContext, WorkOrderId,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Snapshot provider over in-process fixture data. Pools are immutable after
/// construction, so reads need no locking and tie order is stable.
pub(crate) struct InMemorySnapshotProvider {
    organization: OrganizationId,
    work_orders: Vec<WorkOrderContext>,
    technicians: Vec<TechnicianCandidate>,
    vendors: Vec<VendorCandidate>,
    required_skills: HashMap<AssetCategoryId, SkillsField>,
    feedback: Vec<FeedbackRecord>,
}

impl InMemorySnapshotProvider {
    /// A small but realistic organization: two work orders, three
    /// technicians, three vendors, and ninety days of feedback history.
    pub(crate) fn with_demo_data() -> Self {
        let organization = OrganizationId(1);
        let today = Local::now().date_naive();

        let work_orders = vec![
            WorkOrderContext {
                work_order_id: WorkOrderId(101),
                organization_id: organization,
                asset_category_id: Some(AssetCategoryId(7)),
                category_name: Some("HVAC".to_string()),
                asset_location: Some("Building A - Roof".to_string()),
                site_name: Some("Building A".to_string()),
            },
            WorkOrderContext {
                work_order_id: WorkOrderId(102),
                organization_id: organization,
                asset_category_id: Some(AssetCategoryId(12)),
                category_name: Some("Electrical".to_string()),
                asset_location: Some("Building B - Basement".to_string()),
                site_name: Some("Building B".to_string()),
            },
        ];

        let technicians = vec![
            TechnicianCandidate {
                technician_id: TechnicianId(1),
                display_name: "Dana Reyes".to_string(),
                specializations: Some(SkillsField::Raw(
                    r#"["HVAC","refrigerant certified"]"#.to_string(),
                )),
                current_location: Some("Building A - Roof".to_string()),
                open_assignments: 1,
                is_available: true,
            },
            TechnicianCandidate {
                technician_id: TechnicianId(2),
                display_name: "Lee Park".to_string(),
                specializations: Some(SkillsField::Parsed(vec![
                    "electrical".to_string(),
                    "low voltage".to_string(),
                ])),
                current_location: Some("Building B - Basement".to_string()),
                open_assignments: 0,
                is_available: true,
            },
            TechnicianCandidate {
                technician_id: TechnicianId(3),
                display_name: "Sam Okafor".to_string(),
                specializations: Some(SkillsField::Parsed(vec![
                    "general maintenance".to_string(),
                ])),
                current_location: Some("Building C".to_string()),
                open_assignments: 4,
                is_available: true,
            },
        ];

        let vendors = vec![
            VendorCandidate {
                vendor_id: VendorId(20),
                display_name: "Apex Mechanical".to_string(),
                specialty: Some("Commercial HVAC service".to_string()),
                average_rating: 4.6,
                service_level_agreement: Some("2 hour response".to_string()),
                is_active: true,
            },
            VendorCandidate {
                vendor_id: VendorId(21),
                display_name: "Volt Partners".to_string(),
                specialty: Some("electrical contractor".to_string()),
                average_rating: 4.2,
                service_level_agreement: Some("4 hour window".to_string()),
                is_active: true,
            },
            VendorCandidate {
                vendor_id: VendorId(22),
                display_name: "Budget Repairs".to_string(),
                specialty: Some("general repairs".to_string()),
                average_rating: 3.1,
                service_level_agreement: Some("same day".to_string()),
                is_active: true,
            },
        ];

        let mut required_skills = HashMap::new();
        required_skills.insert(
            AssetCategoryId(7),
            SkillsField::Raw(r#"["HVAC","refrigerant"]"#.to_string()),
        );
        required_skills.insert(
            AssetCategoryId(12),
            SkillsField::Parsed(vec!["electrical".to_string()]),
        );

        let feedback = vec![
            demo_feedback(1, 12, FeedbackSignal::Positive, today),
            demo_feedback(1, 30, FeedbackSignal::Positive, today),
            demo_feedback(1, 45, FeedbackSignal::Neutral, today),
            demo_feedback(2, 10, FeedbackSignal::Negative, today),
            demo_feedback(2, 20, FeedbackSignal::Positive, today),
            demo_feedback(3, 15, FeedbackSignal::Negative, today),
            // Old enough to fall outside the default window.
            demo_feedback(3, 200, FeedbackSignal::Positive, today),
        ];

        Self {
            organization,
            work_orders,
            technicians,
            vendors,
            required_skills,
            feedback,
        }
    }

    pub(crate) fn replace_technicians(&mut self, technicians: Vec<TechnicianCandidate>) {
        self.technicians = technicians;
    }

    pub(crate) fn replace_vendors(&mut self, vendors: Vec<VendorCandidate>) {
        self.vendors = vendors;
    }
}

fn demo_feedback(
    technician_id: i64,
    days_ago: i64,
    signal: FeedbackSignal,
    today: NaiveDate,
) -> FeedbackRecord {
    FeedbackRecord {
        technician_id: TechnicianId(technician_id),
        completed_on: today - Duration::days(days_ago),
        signal,
    }
}

impl DispatchSnapshotProvider for InMemorySnapshotProvider {
    async fn work_order_context(
        &self,
        work_order_id: WorkOrderId,
        organization_id: OrganizationId,
    ) -> Result<Option<WorkOrderContext>, SnapshotError> {
        if organization_id != self.organization {
            return Ok(None);
        }
        Ok(self
            .work_orders
            .iter()
            .find(|work_order| work_order.work_order_id == work_order_id)
            .cloned())
    }

    async fn eligible_technicians(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<TechnicianCandidate>, SnapshotError> {
        if organization_id != self.organization {
            return Ok(Vec::new());
        }
        Ok(self
            .technicians
            .iter()
            .filter(|technician| technician.is_available)
            .cloned()
            .collect())
    }

    async fn eligible_vendors(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<VendorCandidate>, SnapshotError> {
        if organization_id != self.organization {
            return Ok(Vec::new());
        }
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
        Ok(self.required_skills.get(&category_id).cloned())
    }

    async fn past_feedback_score(
        &self,
        technician_id: TechnicianId,
        window_days: u32,
    ) -> Result<Option<f64>, SnapshotError> {
        let cutoff = Local::now().date_naive() - Duration::days(i64::from(window_days));
        let records: Vec<&FeedbackRecord> = self
            .feedback
            .iter()
            .filter(|record| record.technician_id == technician_id)
            .collect();
        Ok(windowed_feedback_average(records, cutoff))
    }
}

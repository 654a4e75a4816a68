use std::future::Future;

use super::domain::{
    AssetCategoryId, OrganizationId, SkillsField, TechnicianCandidate, TechnicianId,
    VendorCandidate, WorkOrderContext, WorkOrderId,
};

/// Read-only data access contract the engine scores from. Implementations
/// own storage and filtering; the engine never writes through this trait.
///
/// Candidate pools must arrive pre-filtered (`is_available` technicians,
/// `is_active` vendors) and in deterministic order, since tied confidence
/// scores keep the order the provider returned.
pub trait DispatchSnapshotProvider: Send + Sync {
    fn work_order_context(
        &self,
        work_order_id: WorkOrderId,
        organization_id: OrganizationId,
    ) -> impl Future<Output = Result<Option<WorkOrderContext>, SnapshotError>> + Send;

    fn eligible_technicians(
        &self,
        organization_id: OrganizationId,
    ) -> impl Future<Output = Result<Vec<TechnicianCandidate>, SnapshotError>> + Send;

    fn eligible_vendors(
        &self,
        organization_id: OrganizationId,
    ) -> impl Future<Output = Result<Vec<VendorCandidate>, SnapshotError>> + Send;

    fn required_skills_for_category(
        &self,
        category_id: AssetCategoryId,
    ) -> impl Future<Output = Result<Option<SkillsField>, SnapshotError>> + Send;

    /// Trailing feedback average for a technician, or `None` when no
    /// completed work order falls inside the window.
    fn past_feedback_score(
        &self,
        technician_id: TechnicianId,
        window_days: u32,
    ) -> impl Future<Output = Result<Option<f64>, SnapshotError>> + Send;
}

/// Error enumeration for snapshot lookups.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot source unavailable: {0}")]
    Unavailable(String),
    #[error("snapshot query failed: {0}")]
    Query(String),
}

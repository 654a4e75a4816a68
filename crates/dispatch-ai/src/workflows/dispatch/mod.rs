//! Work-order dispatch recommendations.
//!
//! Given a work order, score every eligible technician and vendor on
//! normalized [0, 1] factors, combine them into weighted confidence scores,
//! rank both pools, and pick a single recommended assignee via an ordered
//! decision policy. Scoring is a pure transformation over a read-only
//! snapshot; only snapshot retrieval performs I/O.

pub mod domain;
pub mod engine;
pub mod roster;
pub mod router;
pub mod service;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use domain::{
    windowed_feedback_average, AssetCategoryId, FeedbackRecord, FeedbackSignal, OrganizationId,
    SkillsField, TechnicianCandidate, TechnicianId, VendorCandidate, VendorId, WorkOrderContext,
    WorkOrderId,
};
pub use engine::{
    AssignmentDecision, DispatchEngine, EngineConfig, RankedCandidates, ScoredTechnician,
    ScoredVendor, TechnicianFactors, VendorFactors,
};
pub use roster::RosterError;
pub use router::{dispatch_router, DispatchRecommendationRequest};
pub use service::{DispatchRecommendation, DispatchService, DispatchServiceError};
pub use snapshot::{DispatchSnapshotProvider, SnapshotError};

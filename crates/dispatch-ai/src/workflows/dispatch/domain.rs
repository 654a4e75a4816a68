use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for work orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkOrderId(pub i64);

impl fmt::Display for WorkOrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier wrapper for organizations (tenancy boundary for every lookup).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganizationId(pub i64);

/// Identifier wrapper for internal technicians.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TechnicianId(pub i64);

impl fmt::Display for TechnicianId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier wrapper for external vendors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorId(pub i64);

impl fmt::Display for VendorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier wrapper for asset categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetCategoryId(pub i64);

/// Work-order attributes the engine scores against, fetched once per
/// recommendation request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrderContext {
    pub work_order_id: WorkOrderId,
    pub organization_id: OrganizationId,
    pub asset_category_id: Option<AssetCategoryId>,
    pub category_name: Option<String>,
    pub asset_location: Option<String>,
    pub site_name: Option<String>,
}

/// Skill lists arrive either pre-parsed or as a raw JSON payload, depending
/// on how the snapshot source stored them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillsField {
    Parsed(Vec<String>),
    Raw(String),
}

impl SkillsField {
    /// Normalize to a plain list. Raw payloads that fail to parse as a JSON
    /// string array yield an empty list.
    pub fn normalize(&self) -> Vec<String> {
        match self {
            SkillsField::Parsed(skills) => skills.clone(),
            SkillsField::Raw(raw) => serde_json::from_str(raw).unwrap_or_default(),
        }
    }
}

/// An internal technician eligible for assignment. Pools returned by the
/// snapshot provider are already filtered to `is_available = true`; the flag
/// is still carried so the availability factor can re-check it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicianCandidate {
    pub technician_id: TechnicianId,
    pub display_name: String,
    pub specializations: Option<SkillsField>,
    pub current_location: Option<String>,
    pub open_assignments: u32,
    pub is_available: bool,
}

/// An external vendor eligible for assignment (`is_active = true` upstream).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorCandidate {
    pub vendor_id: VendorId,
    pub display_name: String,
    pub specialty: Option<String>,
    pub average_rating: f64,
    pub service_level_agreement: Option<String>,
    pub is_active: bool,
}

/// Outcome recorded against a completed work order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackSignal {
    Positive,
    Negative,
    Neutral,
}

impl FeedbackSignal {
    pub const fn score(self) -> f64 {
        match self {
            FeedbackSignal::Positive => 1.0,
            FeedbackSignal::Negative => 0.0,
            FeedbackSignal::Neutral => 0.5,
        }
    }
}

/// One completed work order's feedback, used to derive a technician's
/// trailing performance average.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub technician_id: TechnicianId,
    pub completed_on: NaiveDate,
    pub signal: FeedbackSignal,
}

/// Average feedback score over records completed on or after `cutoff`.
/// Returns `None` when no record qualifies.
pub fn windowed_feedback_average<'a>(
    records: impl IntoIterator<Item = &'a FeedbackRecord>,
    cutoff: NaiveDate,
) -> Option<f64> {
    let mut total = 0.0;
    let mut count = 0u32;
    for record in records {
        if record.completed_on >= cutoff {
            total += record.signal.score();
            count += 1;
        }
    }
    (count > 0).then(|| total / f64::from(count))
}

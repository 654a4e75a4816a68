mod config;
pub(crate) mod factors;
mod policy;

pub use config::EngineConfig;
pub use policy::AssignmentDecision;

use serde::{Deserialize, Serialize};

use super::domain::{
    SkillsField, TechnicianCandidate, TechnicianId, VendorCandidate, VendorId, WorkOrderContext,
};

/// Stateless scorer applying the weighted dispatch model to candidate pools.
pub struct DispatchEngine {
    config: EngineConfig,
}

impl DispatchEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Score one technician against the work order. `required_skills` is the
    /// resolved category requirement (already looked up once per request);
    /// `feedback_average` is the trailing performance average, if any.
    pub fn score_technician(
        &self,
        technician: &TechnicianCandidate,
        work_order: &WorkOrderContext,
        required_skills: Option<&[String]>,
        feedback_average: Option<f64>,
    ) -> ScoredTechnician {
        let specializations = technician.specializations.as_ref().map(SkillsField::normalize);
        let factor_set = TechnicianFactors {
            skills_match: factors::skills_match(specializations.as_deref(), required_skills),
            location_proximity: factors::location_proximity(
                technician.current_location.as_deref(),
                work_order,
            ),
            workload: factors::workload(technician.open_assignments),
            availability: factors::availability(technician.is_available),
            past_performance: factors::past_performance(feedback_average),
        };

        ScoredTechnician {
            technician_id: technician.technician_id,
            confidence_score: factors::technician_confidence(&factor_set),
            reasoning: factors::technician_reasoning(
                &factor_set,
                self.config.notable_factor_threshold,
            ),
            factors: factor_set,
        }
    }

    pub fn score_vendor(&self, vendor: &VendorCandidate, work_order: &WorkOrderContext) -> ScoredVendor {
        let factor_set = VendorFactors {
            specialty_match: factors::specialty_match(
                vendor.specialty.as_deref(),
                work_order.category_name.as_deref(),
            ),
            cost_rating: factors::cost_rating(vendor.average_rating),
            response_time: factors::response_time(vendor.service_level_agreement.as_deref()),
            reliability: factors::reliability(vendor.average_rating),
        };

        ScoredVendor {
            vendor_id: vendor.vendor_id,
            confidence_score: factors::vendor_confidence(&factor_set),
            estimated_cost: factors::estimated_cost(vendor.average_rating),
            estimated_response_time_hours: factors::estimated_response_hours(
                vendor.service_level_agreement.as_deref(),
            ),
            reasoning: factors::vendor_reasoning(&factor_set, self.config.notable_factor_threshold),
            factors: factor_set,
        }
    }

    /// Sort both pools by descending confidence. The sort is stable, so tied
    /// scores keep snapshot order.
    pub fn rank(
        &self,
        mut technicians: Vec<ScoredTechnician>,
        mut vendors: Vec<ScoredVendor>,
    ) -> RankedCandidates {
        technicians.sort_by(|a, b| b.confidence_score.total_cmp(&a.confidence_score));
        vendors.sort_by(|a, b| b.confidence_score.total_cmp(&a.confidence_score));
        RankedCandidates {
            technicians,
            vendors,
        }
    }

    /// Apply the assignment policy to the heads of the full ranked pools.
    /// Call before truncating for display.
    pub fn select(&self, ranked: &RankedCandidates) -> Option<AssignmentDecision> {
        policy::decide_assignment(
            ranked.technicians.first(),
            ranked.vendors.first(),
            self.config.strong_match_threshold,
        )
    }
}

/// Normalized [0, 1] sub-scores for an internal technician.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TechnicianFactors {
    pub skills_match: f64,
    pub location_proximity: f64,
    pub workload: f64,
    pub availability: f64,
    pub past_performance: f64,
}

/// Normalized [0, 1] sub-scores for an external vendor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VendorFactors {
    pub specialty_match: f64,
    pub cost_rating: f64,
    pub response_time: f64,
    pub reliability: f64,
}

/// A technician with its factor breakdown and weighted confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTechnician {
    pub technician_id: TechnicianId,
    pub confidence_score: f64,
    pub factors: TechnicianFactors,
    pub reasoning: String,
}

/// A vendor with its factor breakdown, confidence, and engagement estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredVendor {
    pub vendor_id: VendorId,
    pub confidence_score: f64,
    pub factors: VendorFactors,
    pub estimated_cost: f64,
    pub estimated_response_time_hours: u8,
    pub reasoning: String,
}

/// Candidate pools sorted by descending confidence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RankedCandidates {
    pub technicians: Vec<ScoredTechnician>,
    pub vendors: Vec<ScoredVendor>,
}

impl RankedCandidates {
    /// Keep only the top `limit` entries of each pool.
    pub fn truncate_to(&mut self, limit: usize) {
        self.technicians.truncate(limit);
        self.vendors.truncate(limit);
    }
}

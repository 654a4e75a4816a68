use serde::{Deserialize, Serialize};

use super::super::domain::{TechnicianId, VendorId};
use super::{ScoredTechnician, ScoredVendor};

/// The single assignee chosen for a work order. There is no empty variant:
/// an exhausted candidate pool is an error upstream, not a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssignmentDecision {
    Technician {
        id: TechnicianId,
        confidence_score: f64,
        reasoning: String,
    },
    Vendor {
        id: VendorId,
        confidence_score: f64,
        reasoning: String,
    },
}

impl AssignmentDecision {
    pub fn confidence_score(&self) -> f64 {
        match self {
            AssignmentDecision::Technician {
                confidence_score, ..
            }
            | AssignmentDecision::Vendor {
                confidence_score, ..
            } => *confidence_score,
        }
    }

    pub fn reasoning(&self) -> &str {
        match self {
            AssignmentDecision::Technician { reasoning, .. }
            | AssignmentDecision::Vendor { reasoning, .. } => reasoning,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            AssignmentDecision::Technician {
                id,
                confidence_score,
                reasoning,
            } => format!("technician {id} (confidence {confidence_score:.2}): {reasoning}"),
            AssignmentDecision::Vendor {
                id,
                confidence_score,
                reasoning,
            } => format!("vendor {id} (confidence {confidence_score:.2}): {reasoning}"),
        }
    }
}

/// Ordered rule chain, not a global argmax. A strong technician wins before
/// a strong vendor is even considered; below the threshold the higher raw
/// score wins with technicians taking ties. `None` only when both pools are
/// empty.
pub(crate) fn decide_assignment(
    best_technician: Option<&ScoredTechnician>,
    best_vendor: Option<&ScoredVendor>,
    strong_match_threshold: f64,
) -> Option<AssignmentDecision> {
    if let Some(technician) = best_technician {
        if technician.confidence_score > strong_match_threshold {
            return Some(technician_decision(technician));
        }
    }

    if let Some(vendor) = best_vendor {
        if vendor.confidence_score > strong_match_threshold {
            return Some(vendor_decision(vendor));
        }
    }

    if let Some(technician) = best_technician {
        let outranks_vendor = best_vendor
            .map(|vendor| technician.confidence_score >= vendor.confidence_score)
            .unwrap_or(true);
        if outranks_vendor {
            return Some(technician_decision(technician));
        }
    }

    best_vendor.map(vendor_decision)
}

fn technician_decision(technician: &ScoredTechnician) -> AssignmentDecision {
    AssignmentDecision::Technician {
        id: technician.technician_id,
        confidence_score: technician.confidence_score,
        reasoning: technician.reasoning.clone(),
    }
}

fn vendor_decision(vendor: &ScoredVendor) -> AssignmentDecision {
    AssignmentDecision::Vendor {
        id: vendor.vendor_id,
        confidence_score: vendor.confidence_score,
        reasoning: vendor.reasoning.clone(),
    }
}

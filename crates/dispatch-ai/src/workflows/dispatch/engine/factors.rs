use super::super::domain::WorkOrderContext;
use super::{TechnicianFactors, VendorFactors};

/// Fallback for any factor whose supporting data is missing or unreadable.
pub(crate) const NEUTRAL_SCORE: f64 = 0.5;

const SKILLS_MATCH_WEIGHT: f64 = 0.3;
const LOCATION_PROXIMITY_WEIGHT: f64 = 0.2;
const WORKLOAD_WEIGHT: f64 = 0.2;
const AVAILABILITY_WEIGHT: f64 = 0.1;
const PAST_PERFORMANCE_WEIGHT: f64 = 0.2;

const SPECIALTY_MATCH_WEIGHT: f64 = 0.3;
const COST_RATING_WEIGHT: f64 = 0.2;
const RESPONSE_TIME_WEIGHT: f64 = 0.2;
const RELIABILITY_WEIGHT: f64 = 0.3;

const MAX_VENDOR_RATING: f64 = 5.0;
const UNRATED_VENDOR_FALLBACK: f64 = 3.0;
const BASE_VENDOR_HOURLY_RATE: f64 = 150.0;
const DEFAULT_RESPONSE_HOURS: u8 = 4;

const HVAC_TERMS: [&str; 4] = ["hvac", "heating", "ventilation", "air conditioning"];
const ELECTRICAL_TERMS: [&str; 3] = ["electrical", "electric", "power"];
const PLUMBING_TERMS: [&str; 3] = ["plumbing", "pipe", "water"];

/// Fraction of required skills with a case-insensitive substring match
/// (either direction) against the technician's specializations. Neutral when
/// the requirement list is unavailable or empty, or when the technician has
/// no recorded specializations at all. An empty specialization list is a
/// recorded fact and scores 0.0 against a non-empty requirement.
pub(crate) fn skills_match(
    specializations: Option<&[String]>,
    required_skills: Option<&[String]>,
) -> f64 {
    let Some(required) = required_skills.filter(|skills| !skills.is_empty()) else {
        return NEUTRAL_SCORE;
    };
    let Some(own) = specializations else {
        return NEUTRAL_SCORE;
    };

    let matched = required
        .iter()
        .filter(|skill| {
            let skill = skill.to_lowercase();
            own.iter().any(|candidate| {
                let candidate = candidate.to_lowercase();
                candidate.contains(&skill) || skill.contains(&candidate)
            })
        })
        .count();

    matched as f64 / required.len() as f64
}

/// Crude text proximity over free-form location strings; this is keyword
/// matching, not geocoding.
pub(crate) fn location_proximity(current_location: Option<&str>, work_order: &WorkOrderContext) -> f64 {
    let (Some(technician_location), Some(asset_location)) =
        (current_location, work_order.asset_location.as_deref())
    else {
        return NEUTRAL_SCORE;
    };

    let technician_location = technician_location.to_lowercase();
    let asset_location = asset_location.to_lowercase();

    if technician_location == asset_location {
        return 1.0;
    }

    if let Some(site_name) = work_order.site_name.as_deref() {
        if technician_location.contains(&site_name.to_lowercase()) {
            return 0.8;
        }
    }

    let asset_tokens: Vec<&str> = asset_location.split_whitespace().collect();
    let shares_token = technician_location.split_whitespace().any(|token| {
        asset_tokens
            .iter()
            .any(|other| other.contains(token) || token.contains(other))
    });

    if shares_token {
        0.6
    } else {
        0.3
    }
}

/// Step function rewarding open-assignment headroom.
pub(crate) fn workload(open_assignments: u32) -> f64 {
    match open_assignments {
        0 => 1.0,
        1..=2 => 0.8,
        3..=4 => 0.6,
        5..=6 => 0.4,
        _ => 0.2,
    }
}

/// Pools arrive pre-filtered to available technicians; recomputed anyway so
/// the factor holds if that filter is ever relaxed.
pub(crate) fn availability(is_available: bool) -> f64 {
    if is_available {
        1.0
    } else {
        0.0
    }
}

/// Trailing feedback average, clamped into [0, 1]. `None` means no
/// qualifying history and scores neutral.
pub(crate) fn past_performance(feedback_average: Option<f64>) -> f64 {
    feedback_average
        .map(|score| score.clamp(0.0, 1.0))
        .unwrap_or(NEUTRAL_SCORE)
}

// Weights sum to 1.0; the clamp stays so a future reweighting cannot push
// confidence past 1.0.
pub(crate) fn technician_confidence(factors: &TechnicianFactors) -> f64 {
    let weighted = factors.skills_match * SKILLS_MATCH_WEIGHT
        + factors.location_proximity * LOCATION_PROXIMITY_WEIGHT
        + factors.workload * WORKLOAD_WEIGHT
        + factors.availability * AVAILABILITY_WEIGHT
        + factors.past_performance * PAST_PERFORMANCE_WEIGHT;
    weighted.min(1.0)
}

pub(crate) fn vendor_confidence(factors: &VendorFactors) -> f64 {
    let weighted = factors.specialty_match * SPECIALTY_MATCH_WEIGHT
        + factors.cost_rating * COST_RATING_WEIGHT
        + factors.response_time * RESPONSE_TIME_WEIGHT
        + factors.reliability * RELIABILITY_WEIGHT;
    weighted.min(1.0)
}

/// Full score when the category name appears inside the vendor specialty;
/// 0.8 when both sides land in the same trade term group; 0.3 otherwise.
pub(crate) fn specialty_match(specialty: Option<&str>, category_name: Option<&str>) -> f64 {
    let (Some(specialty), Some(category)) = (specialty, category_name) else {
        return NEUTRAL_SCORE;
    };

    let specialty = specialty.to_lowercase();
    let category = category.to_lowercase();

    if specialty.contains(&category) {
        return 1.0;
    }

    let specialty_tokens: Vec<&str> = specialty.split_whitespace().collect();
    for group in [&HVAC_TERMS[..], &ELECTRICAL_TERMS[..], &PLUMBING_TERMS[..]] {
        let category_in_group = group.iter().any(|term| category.contains(term));
        let specialty_in_group = specialty_tokens.iter().any(|token| group.contains(token));
        if category_in_group && specialty_in_group {
            return 0.8;
        }
    }

    0.3
}

/// Rating doubles as a cost-value proxy; an unrated vendor (0.0) counts as a
/// middling 3.0 rather than the cheapest option.
pub(crate) fn cost_rating(average_rating: f64) -> f64 {
    let rating = if average_rating > 0.0 {
        average_rating
    } else {
        UNRATED_VENDOR_FALLBACK
    };
    rating / MAX_VENDOR_RATING
}

pub(crate) fn reliability(average_rating: f64) -> f64 {
    average_rating / MAX_VENDOR_RATING
}

/// Keyword ladder over the free-text SLA. Checked in this order, so a
/// "24 hour" SLA lands on the "4 hour" rung via substring match.
pub(crate) fn response_time(service_level_agreement: Option<&str>) -> f64 {
    let Some(sla) = service_level_agreement else {
        return NEUTRAL_SCORE;
    };

    let sla = sla.to_lowercase();
    if sla.contains("immediate") || sla.contains("1 hour") {
        1.0
    } else if sla.contains("2 hour") || sla.contains("2hr") {
        0.8
    } else if sla.contains("4 hour") || sla.contains("4hr") {
        0.6
    } else if sla.contains("24 hour") || sla.contains("same day") {
        0.4
    } else {
        0.2
    }
}

/// Synthetic hourly-rate proxy: better-rated vendors estimate cheaper.
pub(crate) fn estimated_cost(average_rating: f64) -> f64 {
    BASE_VENDOR_HOURLY_RATE * (1.0 + (MAX_VENDOR_RATING - average_rating) * 0.1)
}

/// Hour-count mirror of the SLA keyword ladder.
pub(crate) fn estimated_response_hours(service_level_agreement: Option<&str>) -> u8 {
    let Some(sla) = service_level_agreement else {
        return DEFAULT_RESPONSE_HOURS;
    };

    let sla = sla.to_lowercase();
    if sla.contains("immediate") || sla.contains("1 hour") {
        1
    } else if sla.contains("2 hour") || sla.contains("2hr") {
        2
    } else if sla.contains("4 hour") || sla.contains("4hr") {
        4
    } else if sla.contains("24 hour") || sla.contains("same day") {
        8
    } else {
        DEFAULT_RESPONSE_HOURS
    }
}

/// Comma-joined clauses for every technician factor above the threshold;
/// availability never earns a clause.
pub(crate) fn technician_reasoning(factors: &TechnicianFactors, threshold: f64) -> String {
    let mut clauses = Vec::new();
    if factors.skills_match > threshold {
        clauses.push("Strong skills match");
    }
    if factors.location_proximity > threshold {
        clauses.push("Close to work site");
    }
    if factors.workload > threshold {
        clauses.push("Low current workload");
    }
    if factors.past_performance > threshold {
        clauses.push("Good past performance");
    }

    if clauses.is_empty() {
        "Available technician".to_string()
    } else {
        clauses.join(", ")
    }
}

pub(crate) fn vendor_reasoning(factors: &VendorFactors, threshold: f64) -> String {
    let mut clauses = Vec::new();
    if factors.specialty_match > threshold {
        clauses.push("Specialty matches");
    }
    if factors.reliability > threshold {
        clauses.push("High reliability");
    }
    if factors.response_time > threshold {
        clauses.push("Fast response time");
    }
    if factors.cost_rating > threshold {
        clauses.push("Good value");
    }

    if clauses.is_empty() {
        "Available vendor".to_string()
    } else {
        clauses.join(", ")
    }
}

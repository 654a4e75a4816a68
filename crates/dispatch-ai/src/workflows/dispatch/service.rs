use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::warn;

use super::domain::{OrganizationId, TechnicianCandidate, WorkOrderContext, WorkOrderId};
use super::engine::{AssignmentDecision, DispatchEngine, EngineConfig, RankedCandidates};
use super::snapshot::{DispatchSnapshotProvider, SnapshotError};

/// Full recommendation payload for one work order: both ranked pools plus
/// the single assignee the policy settled on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchRecommendation {
    pub work_order_id: WorkOrderId,
    pub recommendations: RankedCandidates,
    pub recommended_assignment: AssignmentDecision,
}

/// Service composing the snapshot provider and the scoring engine. Each call
/// reads a fresh snapshot and computes from it; nothing is cached or mutated
/// between calls.
pub struct DispatchService<P> {
    provider: Arc<P>,
    engine: DispatchEngine,
}

impl<P> DispatchService<P>
where
    P: DispatchSnapshotProvider + 'static,
{
    pub fn new(provider: Arc<P>, config: EngineConfig) -> Self {
        Self {
            provider,
            engine: DispatchEngine::new(config),
        }
    }

    /// Score both candidate pools for a work order and pick one assignee.
    pub async fn recommend(
        &self,
        work_order_id: WorkOrderId,
        organization_id: OrganizationId,
    ) -> Result<DispatchRecommendation, DispatchServiceError> {
        let work_order = self
            .provider
            .work_order_context(work_order_id, organization_id)
            .await?
            .ok_or(DispatchServiceError::WorkOrderNotFound(work_order_id))?;

        let technicians = self.provider.eligible_technicians(organization_id).await?;
        let vendors = self.provider.eligible_vendors(organization_id).await?;

        let required_skills = self.required_skills(&work_order).await;
        let feedback_averages = self.feedback_averages(&technicians).await;

        let scored_technicians = technicians
            .iter()
            .zip(feedback_averages)
            .map(|(technician, feedback)| {
                self.engine
                    .score_technician(technician, &work_order, required_skills.as_deref(), feedback)
            })
            .collect();
        let scored_vendors = vendors
            .iter()
            .map(|vendor| self.engine.score_vendor(vendor, &work_order))
            .collect();

        let mut ranked = self.engine.rank(scored_technicians, scored_vendors);
        let recommended_assignment = self
            .engine
            .select(&ranked)
            .ok_or(DispatchServiceError::NoCandidatesAvailable)?;
        ranked.truncate_to(self.engine.config().max_recommendations);

        Ok(DispatchRecommendation {
            work_order_id,
            recommendations: ranked,
            recommended_assignment,
        })
    }

    /// Resolve the category's skill requirements once per request. A missing
    /// category, a missing row, or a failed lookup all degrade to `None`,
    /// which the skills factor scores as neutral.
    async fn required_skills(&self, work_order: &WorkOrderContext) -> Option<Vec<String>> {
        let category_id = work_order.asset_category_id?;
        lookup_or_default(
            self.provider.required_skills_for_category(category_id),
            None,
            "required_skills_for_category",
        )
        .await
        .map(|skills| skills.normalize())
    }

    /// Fetch every technician's trailing feedback average concurrently.
    /// Results come back keyed by input position, so tie order is unaffected
    /// by lookup completion order.
    async fn feedback_averages(&self, technicians: &[TechnicianCandidate]) -> Vec<Option<f64>> {
        let window_days = self.engine.config().feedback_window_days;
        let mut lookups = JoinSet::new();
        for (index, technician) in technicians.iter().enumerate() {
            let provider = Arc::clone(&self.provider);
            let technician_id = technician.technician_id;
            lookups.spawn(async move {
                let average = lookup_or_default(
                    provider.past_feedback_score(technician_id, window_days),
                    None,
                    "past_feedback_score",
                )
                .await;
                (index, average)
            });
        }

        let mut averages = vec![None; technicians.len()];
        while let Some(joined) = lookups.join_next().await {
            match joined {
                Ok((index, average)) => averages[index] = average,
                Err(error) => warn!(%error, "feedback lookup task failed, scoring neutral"),
            }
        }
        averages
    }
}

/// Absorb a failed auxiliary lookup into its neutral fallback so one bad
/// record cannot block recommendations for the rest of the pool.
async fn lookup_or_default<T, F>(lookup: F, fallback: T, lookup_name: &'static str) -> T
where
    F: Future<Output = Result<T, SnapshotError>>,
{
    match lookup.await {
        Ok(value) => value,
        Err(error) => {
            warn!(%error, lookup = lookup_name, "snapshot lookup failed, using neutral default");
            fallback
        }
    }
}

/// Error raised by the dispatch service. Only these cross the engine
/// boundary; degraded factor lookups never do.
#[derive(Debug, thiserror::Error)]
pub enum DispatchServiceError {
    #[error("work order {0} not found")]
    WorkOrderNotFound(WorkOrderId),
    #[error("No suitable technicians or vendors available for assignment")]
    NoCandidatesAvailable,
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

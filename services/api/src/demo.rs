use crate::infra::InMemorySnapshotProvider;
use clap::Args;
use dispatch_ai::config::AppConfig;
use dispatch_ai::error::AppError;
use dispatch_ai::workflows::dispatch::{
    roster, DispatchRecommendation, DispatchService, OrganizationId, WorkOrderId,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Work order to score candidates for
    #[arg(long)]
    pub(crate) work_order: i64,
    /// Organization owning the work order
    #[arg(long, default_value_t = 1)]
    pub(crate) organization: i64,
    /// Replace the seeded technician pool with a CSV roster export
    #[arg(long)]
    pub(crate) technicians_csv: Option<PathBuf>,
    /// Replace the seeded vendor pool with a CSV roster export
    #[arg(long)]
    pub(crate) vendors_csv: Option<PathBuf>,
    /// Print the raw JSON payload instead of the readable breakdown
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Limit the demo to one of the seeded work orders
    #[arg(long)]
    pub(crate) work_order: Option<i64>,
    /// Also print the JSON payload an API client would receive
    #[arg(long)]
    pub(crate) include_payload: bool,
}

pub(crate) async fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs {
        work_order,
        organization,
        technicians_csv,
        vendors_csv,
        json,
    } = args;

    let mut provider = InMemorySnapshotProvider::with_demo_data();
    if let Some(path) = technicians_csv {
        provider.replace_technicians(roster::technicians_from_path(path)?);
    }
    if let Some(path) = vendors_csv {
        provider.replace_vendors(roster::vendors_from_path(path)?);
    }

    let service = demo_service(provider)?;
    let recommendation = service
        .recommend(WorkOrderId(work_order), OrganizationId(organization))
        .await?;

    if json {
        print_payload(&recommendation);
    } else {
        render_recommendation(&recommendation);
    }

    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        work_order,
        include_payload,
    } = args;

    let seeded_work_orders = [101, 102];
    let targets: Vec<i64> = match work_order {
        Some(id) => vec![id],
        None => seeded_work_orders.to_vec(),
    };

    println!("Dispatch recommendation demo (seeded organization 1)");
    let service = demo_service(InMemorySnapshotProvider::with_demo_data())?;

    for target in targets {
        let recommendation = match service
            .recommend(WorkOrderId(target), OrganizationId(1))
            .await
        {
            Ok(recommendation) => recommendation,
            Err(err) => {
                println!("\nWork order {target}: {err}");
                continue;
            }
        };

        render_recommendation(&recommendation);
        if include_payload {
            print_payload(&recommendation);
        }
    }

    Ok(())
}

fn demo_service(
    provider: InMemorySnapshotProvider,
) -> Result<DispatchService<InMemorySnapshotProvider>, AppError> {
    let config = AppConfig::load()?;
    Ok(DispatchService::new(
        Arc::new(provider),
        config.dispatch.engine_config(),
    ))
}

fn render_recommendation(recommendation: &DispatchRecommendation) {
    println!("\nWork order {}", recommendation.work_order_id);

    println!("Technicians:");
    if recommendation.recommendations.technicians.is_empty() {
        println!("  (none eligible)");
    }
    for technician in &recommendation.recommendations.technicians {
        let factors = &technician.factors;
        println!(
            "  - technician {} | confidence {:.2} | skills {:.2} location {:.2} workload {:.2} availability {:.2} past {:.2}",
            technician.technician_id,
            technician.confidence_score,
            factors.skills_match,
            factors.location_proximity,
            factors.workload,
            factors.availability,
            factors.past_performance,
        );
        println!("      {}", technician.reasoning);
    }

    println!("Vendors:");
    if recommendation.recommendations.vendors.is_empty() {
        println!("  (none eligible)");
    }
    for vendor in &recommendation.recommendations.vendors {
        let factors = &vendor.factors;
        println!(
            "  - vendor {} | confidence {:.2} | specialty {:.2} cost {:.2} response {:.2} reliability {:.2} | est ${:.2}/hr, ~{}h response",
            vendor.vendor_id,
            vendor.confidence_score,
            factors.specialty_match,
            factors.cost_rating,
            factors.response_time,
            factors.reliability,
            vendor.estimated_cost,
            vendor.estimated_response_time_hours,
        );
        println!("      {}", vendor.reasoning);
    }

    println!(
        "Recommended assignment: {}",
        recommendation.recommended_assignment.summary()
    );
}

fn print_payload(recommendation: &DispatchRecommendation) {
    match serde_json::to_string_pretty(recommendation) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("  Payload unavailable: {err}"),
    }
}

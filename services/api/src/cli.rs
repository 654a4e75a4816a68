use crate::demo::{run_demo, run_recommend, DemoArgs, RecommendArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use dispatch_ai::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Dispatch Recommendation Service",
    about = "Score technicians and vendors for work-order assignment from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Work with dispatch recommendations directly
    Dispatch {
        #[command(subcommand)]
        command: DispatchCommand,
    },
    /// Run an end-to-end CLI demo over the seeded organization
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum DispatchCommand {
    /// Produce a recommendation for one work order
    Recommend(RecommendArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Replace the seeded technician pool with a CSV roster export
    #[arg(long)]
    pub(crate) technicians_csv: Option<PathBuf>,
    /// Replace the seeded vendor pool with a CSV roster export
    #[arg(long)]
    pub(crate) vendors_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Dispatch {
            command: DispatchCommand::Recommend(args),
        } => run_recommend(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}

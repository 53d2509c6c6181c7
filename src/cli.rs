//! Command-line interface.

use std::path::PathBuf;

use agent_core::{AgentController, AutoPrompt, CoordinateMapper, FlatPlanner, LoopConfig, TaskStatus};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use perceiver_access::UiScanner;
use perceiver_visual::{FrameSource, OverlayRenderer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::runtime::{
    demo_access_tree, demo_hub, DemoOracle, HubObserver, LoggingActuator, SyntheticFrames,
};

#[derive(Parser, Debug)]
#[command(name = "deskpilot", version, about = "Desktop automation agent driven by hybrid UI perception")]
pub struct Cli {
    /// Verbose (debug-level) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a task against the synthetic demo desktop (dry-run actuator)
    Run(RunArgs),
    /// Scan the synthetic demo desktop and print the element catalogue
    Scan(ScanArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Task description handed to the oracle
    #[arg(default_value = "click the save button and finish")]
    pub task: String,

    /// Iteration ceiling override
    #[arg(long)]
    pub max_iterations: Option<u32>,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Print the catalogue as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Write a Set-of-Marks overlay PNG of the scan to this path
    #[arg(long)]
    pub overlay: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    info!("DeskPilot v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Run(args) => run_task(args),
        Command::Scan(args) => scan(args),
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
    Ok(())
}

fn run_task(args: RunArgs) -> Result<()> {
    let mut config = LoopConfig::default();
    if let Some(max) = args.max_iterations {
        config.max_iterations = max;
    }

    let observer = HubObserver::new(SyntheticFrames::new(600, 500), demo_hub());
    let mut controller = AgentController::new(
        config,
        observer,
        DemoOracle::default(),
        LoggingActuator::new(CoordinateMapper::identity(600, 500)),
        FlatPlanner,
        AutoPrompt(true),
    );

    let report = controller.run(&args.task);
    info!(
        status = ?report.status,
        iterations = report.iterations,
        "task finished: {}",
        report.message
    );
    for entry in &report.history {
        info!("  [{}] {} -> {}", entry.iteration, entry.action, entry.result);
    }

    match report.status {
        TaskStatus::Completed => Ok(()),
        TaskStatus::Exhausted => bail!("task exhausted its iteration budget"),
        TaskStatus::Aborted => bail!("task aborted: {}", report.message),
    }
}

fn scan(args: ScanArgs) -> Result<()> {
    let mut frames = SyntheticFrames::new(600, 500);
    let frame = frames.capture().context("frame capture failed")?;

    let catalogue = demo_hub()
        .perceive(&frame)
        .context("perception failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&catalogue)?);
    } else {
        print!("{}", catalogue.render_table());
    }

    if let Some(path) = args.overlay {
        let annotated = OverlayRenderer::new().render(&frame, catalogue.elements());
        annotated
            .image
            .save(&path)
            .with_context(|| format!("writing overlay to {}", path.display()))?;
        info!(path = %path.display(), "overlay written");
    }

    // The raw structural view is also useful when debugging the demo tree.
    let api_only = UiScanner::new(demo_access_tree())
        .scan()
        .context("structural scan failed")?;
    info!(api_elements = api_only.len(), merged = catalogue.len(), "scan summary");

    Ok(())
}

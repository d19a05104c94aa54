//! Wheel Weaver CLI
//!
//! Validates build parameters and prints the Schraner lacing table.

mod config;
mod error;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weaver_lacing::{
    common_crosses, compute_pattern, is_supported_hole_count, max_crosses, valid_crosses,
    validate_hole_count, BuildParameters, PatternRequest, Side, SpokeAssignment, Step,
};

use crate::config::{load_request, OutputFormat, WeaverConfig};
use crate::error::Result;
use crate::render::CrossesReport;

#[derive(Parser)]
#[command(name = "weaver")]
#[command(about = "Spoke-by-spoke lacing tables for bicycle wheels")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate parameters and print the lacing table
    Compute(ComputeArgs),

    /// List valid and commonly used cross counts for a hole count
    Crosses {
        /// Total rim holes
        #[arg(long, allow_negative_numbers = true)]
        holes: i64,

        /// Output format (defaults to WEAVER_FORMAT, then table)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

#[derive(clap::Args)]
struct ComputeArgs {
    /// JSON parameter file (defaults to WEAVER_PARAMS)
    #[arg(long)]
    params: Option<PathBuf>,

    /// Total rim holes, even, 20 to 400
    #[arg(long, allow_negative_numbers = true)]
    holes: Option<i64>,

    /// rear | front
    #[arg(long)]
    wheel_type: Option<String>,

    /// Crosses per spoke
    #[arg(long, allow_negative_numbers = true)]
    crosses: Option<i64>,

    /// symmetrical | asymmetrical
    #[arg(long)]
    symmetry: Option<String>,

    /// Seat every head on the opposite face of the flange
    #[arg(long)]
    invert_heads: bool,

    /// Rim hole for the first reference spoke
    #[arg(long, allow_negative_numbers = true)]
    start_rim_hole: Option<i64>,

    /// right_of_valve | left_of_valve
    #[arg(long)]
    valve_reference: Option<String>,

    /// Drive-side start hub hole
    #[arg(long = "start-hub-ds", allow_negative_numbers = true)]
    start_hub_hole_ds: Option<i64>,

    /// Non-drive-side start hub hole
    #[arg(long = "start-hub-nds", allow_negative_numbers = true)]
    start_hub_hole_nds: Option<i64>,

    /// Only print one phase (R1, R2, R3, L1, L3, L4)
    #[arg(long)]
    step: Option<Step>,

    /// Only print one flange (DS, NDS)
    #[arg(long)]
    side: Option<Side>,

    /// Output format (defaults to WEAVER_FORMAT, then table)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

impl ComputeArgs {
    /// Parameter file (or defaults) with any flags laid over it.
    fn request(&self, config: &WeaverConfig) -> Result<PatternRequest> {
        let mut request = match self.params.as_ref().or(config.params_file.as_ref()) {
            Some(path) => {
                debug!(path = %path.display(), "loading parameter file");
                load_request(path)?
            }
            None => PatternRequest::default(),
        };

        if let Some(holes) = self.holes {
            request.holes = holes;
        }
        if let Some(wheel_type) = &self.wheel_type {
            request.wheel_type = wheel_type.clone();
        }
        if let Some(crosses) = self.crosses {
            request.crosses = crosses;
        }
        if let Some(symmetry) = &self.symmetry {
            request.symmetry = symmetry.clone();
        }
        if self.invert_heads {
            request.invert_heads = true;
        }
        if let Some(start) = self.start_rim_hole {
            request.start_rim_hole = start;
        }
        if let Some(valve) = &self.valve_reference {
            request.valve_reference = valve.clone();
        }
        if let Some(start) = self.start_hub_hole_ds {
            request.start_hub_hole_ds = start;
        }
        if let Some(start) = self.start_hub_hole_nds {
            request.start_hub_hole_nds = start;
        }
        Ok(request)
    }

    fn keeps(&self, row: &SpokeAssignment) -> bool {
        self.step.map_or(true, |step| row.step == step)
            && self.side.map_or(true, |side| row.side == side)
    }
}

fn run_compute(args: &ComputeArgs, config: &WeaverConfig) -> Result<String> {
    let request = args.request(config)?;
    let params = BuildParameters::new(&request)?;
    let pattern = compute_pattern(&params).map_err(weaver_lacing::Error::from)?;

    info!(
        params = %params.summary(),
        valve = %pattern.derived.valve_clearance,
        "pattern computed"
    );

    let rows: Vec<&SpokeAssignment> = pattern.rows.iter().filter(|row| args.keeps(row)).collect();
    match args.format.unwrap_or(config.format) {
        OutputFormat::Table => Ok(render::table(&pattern, rows)),
        OutputFormat::Json => {
            let value = serde_json::json!({
                "params": pattern.params,
                "derived": pattern.derived,
                "rows": rows,
            });
            Ok(serde_json::to_string_pretty(&value)? + "\n")
        }
    }
}

fn run_crosses(holes: i64, format: OutputFormat) -> Result<String> {
    let rim_holes = validate_hole_count(holes)?;
    let flange_holes = rim_holes / 2;
    let report = CrossesReport {
        holes: rim_holes,
        flange_holes,
        max_crosses: max_crosses(flange_holes),
        valid: valid_crosses(holes)?.collect(),
        common: common_crosses(holes).to_vec(),
        supported: is_supported_hole_count(holes),
    };

    match format {
        OutputFormat::Table => Ok(report.to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)? + "\n"),
    }
}

fn run(cli: Cli) -> Result<String> {
    let config = WeaverConfig::from_env()?;
    match cli.command {
        Commands::Compute(args) => run_compute(&args, &config),
        Commands::Crosses { holes, format } => run_crosses(holes, format.unwrap_or(config.format)),
    }
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weaver=info,weaver_lacing=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Cli::parse()) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            if err.exit_status() == error::EXIT_SOFTWARE {
                error!(%err, "lacing generator fault");
            }
            eprintln!("error: {}", err);
            ExitCode::from(err.exit_status())
        }
    }
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;

use binary_point_sim::reporting::{display_json, display_report, display_side_detail};
use binary_point_sim::{simulate_side, ScenarioConfig, Side, SimulationReport, StartMonth};

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "binary-point-sim",
    version,
    about = "Project binary-network points, mobilization and commission month by month",
    long_about = None
)]
struct Cli {
    /// JSON scenario file; flags below override its values
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// First simulated month (YYYY-MM)
    #[arg(long)]
    start_month: Option<StartMonth>,

    /// Starting points on the left side
    #[arg(long, allow_negative_numbers = true)]
    start_left_pt: Option<f64>,

    /// Starting points on the right side
    #[arg(long, allow_negative_numbers = true)]
    start_right_pt: Option<f64>,

    /// Direct referrals on the left side
    #[arg(long)]
    direct_left: Option<u32>,

    /// Direct referrals on the right side
    #[arg(long)]
    direct_right: Option<u32>,

    /// Number of months to simulate
    #[arg(long, allow_negative_numbers = true)]
    months: Option<i32>,

    /// Name shown in the report title
    #[arg(long)]
    name: Option<String>,

    /// Referral rate (%)
    #[arg(long, allow_negative_numbers = true)]
    referral_rate: Option<f64>,

    /// Referrals per successful introducer
    #[arg(long, allow_negative_numbers = true)]
    referrals_per_person: Option<f64>,

    /// Points per new member
    #[arg(long, allow_negative_numbers = true)]
    point_multiplier: Option<f64>,

    /// Mobilization rate (%)
    #[arg(long, allow_negative_numbers = true)]
    mobilization_rate: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Also print each side's month-by-month working
    #[arg(long)]
    detail: bool,
}

impl Cli {
    fn scenario(&self) -> Result<ScenarioConfig> {
        let mut config = match &self.scenario {
            Some(path) => ScenarioConfig::load(path)
                .with_context(|| format!("Failed to load scenario {}", path.display()))?,
            None => ScenarioConfig::default(),
        };

        let initial = &mut config.initial;
        if let Some(start_month) = self.start_month {
            initial.start_month = start_month;
        }
        if let Some(points) = self.start_left_pt {
            initial.start_left_pt = points;
        }
        if let Some(points) = self.start_right_pt {
            initial.start_right_pt = points;
        }
        if let Some(count) = self.direct_left {
            initial.direct_left = count;
        }
        if let Some(count) = self.direct_right {
            initial.direct_right = count;
        }
        if let Some(months) = self.months {
            initial.simulation_months = months;
        }
        if let Some(name) = &self.name {
            initial.name = Some(name.clone());
        }

        let settings = &mut config.settings;
        if let Some(rate) = self.referral_rate {
            settings.referral_rate = rate;
        }
        if let Some(count) = self.referrals_per_person {
            settings.referrals_per_person = count;
        }
        if let Some(multiplier) = self.point_multiplier {
            settings.point_multiplier = multiplier;
        }
        if let Some(rate) = self.mobilization_rate {
            settings.mobilization_rate = rate;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.scenario()?;
    config.validate().context("Invalid scenario")?;

    let report = SimulationReport::generate(&config.initial, &config.settings, &config.commission)
        .context("Simulation failed")?;
    info!("Simulated {} month(s)", report.results.len());

    match cli.format {
        OutputFormat::Table => {
            display_report(&report);
            if cli.detail {
                for side in Side::BOTH {
                    display_side_detail(side, &simulate_side(&config.initial, &config.settings, side));
                }
            }
        }
        OutputFormat::Json => display_json(&report)?,
    }

    Ok(())
}

/// Scenario configuration
/// Loads a run's inputs from JSON and checks them before they reach the engine

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::calendar::StartMonth;
use crate::commission::CommissionTable;
use crate::errors::{Result, SimulationError};
use crate::models::{InitialValues, SimulationSettings};

pub const DEFAULT_SIMULATION_MONTHS: i32 = 12;

/// Everything needed for one run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub initial: InitialValues,
    pub settings: SimulationSettings,
    #[serde(default)]
    pub commission: CommissionTable,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            initial: InitialValues {
                start_month: StartMonth::current(),
                start_left_pt: 0.0,
                start_right_pt: 0.0,
                direct_left: 2,
                direct_right: 2,
                simulation_months: DEFAULT_SIMULATION_MONTHS,
                name: None,
            },
            settings: SimulationSettings {
                referral_rate: 50.0,
                referrals_per_person: 3.0,
                point_multiplier: 1.5,
                mobilization_rate: 15.0,
            },
            commission: CommissionTable::default(),
        }
    }
}

impl ScenarioConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading scenario from {}", path.display());
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Reject values the engine cannot work with
    ///
    /// Non-finite numbers are errors. Negative values are passed through
    /// unchanged with a warning.
    pub fn validate(&self) -> Result<()> {
        let initial = &self.initial;
        let settings = &self.settings;

        let numbers: [(&'static str, f64); 6] = [
            ("startLeftPt", initial.start_left_pt),
            ("startRightPt", initial.start_right_pt),
            ("referralRate", settings.referral_rate),
            ("referralsPerPerson", settings.referrals_per_person),
            ("pointMultiplier", settings.point_multiplier),
            ("mobilizationRate", settings.mobilization_rate),
        ];

        for (field, value) in numbers {
            if !value.is_finite() {
                return Err(SimulationError::InvalidInput {
                    field,
                    reason: format!("{} is not a finite number", value),
                });
            }
            if value < 0.0 {
                warn!("{} is negative ({}); using it unchanged", field, value);
            }
        }

        for (field, rate) in [
            ("referralRate", settings.referral_rate),
            ("mobilizationRate", settings.mobilization_rate),
        ] {
            if rate > 100.0 {
                warn!("{} is above 100% ({})", field, rate);
            }
        }

        self.validate_commission()?;

        if initial.simulation_months <= 0 {
            warn!(
                "simulationMonths is {}; the run will be empty",
                initial.simulation_months
            );
        }

        Ok(())
    }

    fn validate_commission(&self) -> Result<()> {
        let table = &self.commission;
        if !table.cycle_points.is_finite() || table.cycle_points <= 0.0 {
            return Err(SimulationError::InvalidInput {
                field: "cyclePoints",
                reason: format!("{} must be a positive number", table.cycle_points),
            });
        }
        if !table.cycle_commission.is_finite() {
            return Err(SimulationError::InvalidInput {
                field: "cycleCommission",
                reason: format!("{} is not a finite number", table.cycle_commission),
            });
        }
        if let Some(tier) = table
            .tiers
            .iter()
            .find(|tier| !tier.threshold.is_finite() || !tier.payout.is_finite())
        {
            return Err(SimulationError::InvalidInput {
                field: "tiers",
                reason: format!("tier {}/{} is not finite", tier.threshold, tier.payout),
            });
        }
        Ok(())
    }
}

use serde::{Deserialize, Serialize};

use crate::calendar::StartMonth;

/// One of the two referral sub-trees
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn name(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Growth-rate settings, fixed for a whole run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSettings {
    /// Percent of last month's new members who bring in referrals (0-100)
    pub referral_rate: f64,
    /// Referrals each successful introducer brings in, may be fractional
    pub referrals_per_person: f64,
    /// Points credited per new member
    pub point_multiplier: f64,
    /// Percent of accumulated points turned into a headcount (0-100)
    pub mobilization_rate: f64,
}

/// Starting position of a run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialValues {
    pub start_month: StartMonth,
    pub start_left_pt: f64,
    pub start_right_pt: f64,
    /// Direct referrals credited in month 0
    pub direct_left: u32,
    pub direct_right: u32,
    /// Months to project; zero or negative projects nothing
    pub simulation_months: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl InitialValues {
    pub fn starting_points(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.start_left_pt,
            Side::Right => self.start_right_pt,
        }
    }

    pub fn direct_referrals(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.direct_left,
            Side::Right => self.direct_right,
        }
    }

    /// Number of months a run will produce
    pub fn month_count(&self) -> u32 {
        self.simulation_months.max(0) as u32
    }
}

/// One side's figures for one month
///
/// Only `current_increase_num` and `end_of_month_pt` feed the following
/// month; the rest is kept so a run can be audited row by row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyState {
    pub month: u32,
    pub start_of_month_pt: f64,
    pub prev_month_increase_num: f64,
    pub introducers: f64,
    pub current_increase_num: f64,
    pub increase_pt: f64,
    pub end_of_month_pt: f64,
}

/// Both sides combined for one month, ready for a table row
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyResult {
    pub month: String,
    pub left_pt: f64,
    pub right_pt: f64,
    pub total_pt: f64,
    pub mobilization_left: i64,
    pub mobilization_right: i64,
    pub total_mobilization: i64,
    pub total_commission: f64,
}

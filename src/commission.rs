/// Commission calculation module
/// Converts an accumulated point total into a payout using a cyclic tier table

use serde::{Deserialize, Serialize};

use crate::rounding::floor_to_multiple;

/// A remainder threshold and the flat amount it pays
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub threshold: f64,
    pub payout: f64,
}

/// Cyclic payout table
///
/// Every completed cycle of `cycle_points` pays `cycle_commission`. Points left
/// over after the last full cycle pay the amount of the highest tier whose
/// threshold they reach, or nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionTable {
    pub cycle_points: f64,
    pub cycle_commission: f64,
    pub tiers: Vec<Tier>,
}

pub const REFERENCE_CYCLE_POINTS: f64 = 50.0;
pub const REFERENCE_CYCLE_COMMISSION: f64 = 10_000.0;
pub const REFERENCE_TIERS: [Tier; 5] = [
    Tier { threshold: 40.0, payout: 7_500.0 },
    Tier { threshold: 30.0, payout: 6_000.0 },
    Tier { threshold: 20.0, payout: 4_500.0 },
    Tier { threshold: 10.0, payout: 3_000.0 },
    Tier { threshold: 5.0, payout: 1_500.0 },
];

impl Default for CommissionTable {
    fn default() -> Self {
        Self {
            cycle_points: REFERENCE_CYCLE_POINTS,
            cycle_commission: REFERENCE_CYCLE_COMMISSION,
            tiers: REFERENCE_TIERS.to_vec(),
        }
    }
}

impl CommissionTable {
    /// Payout for `points`. Negative totals are not clamped.
    pub fn commission(&self, points: f64) -> f64 {
        cyclic_payout(points, self.cycle_points, self.cycle_commission, &self.tiers)
    }
}

fn cyclic_payout(points: f64, cycle_points: f64, cycle_commission: f64, tiers: &[Tier]) -> f64 {
    let full_cycles = floor_to_multiple(points / cycle_points, 1.0);
    let from_cycles = full_cycles * cycle_commission;

    let remainder = points % cycle_points;
    from_cycles + remainder_payout(tiers, remainder)
}

fn remainder_payout(tiers: &[Tier], remainder: f64) -> f64 {
    // Highest reachable threshold wins, whatever order the tiers came in
    tiers
        .iter()
        .filter(|tier| remainder >= tier.threshold)
        .max_by(|a, b| a.threshold.total_cmp(&b.threshold))
        .map(|tier| tier.payout)
        .unwrap_or(0.0)
}

/// Payout for `points` under the reference table, without building one
pub fn commission(points: f64) -> f64 {
    cyclic_payout(
        points,
        REFERENCE_CYCLE_POINTS,
        REFERENCE_CYCLE_COMMISSION,
        &REFERENCE_TIERS,
    )
}

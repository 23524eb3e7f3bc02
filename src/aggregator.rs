/// Result aggregation
/// Runs both sides in lockstep and folds each month into a `MonthlyResult`

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::commission::CommissionTable;
use crate::errors::Result;
use crate::models::{InitialValues, MonthlyResult, Side, SimulationSettings};
use crate::rounding::floor_to_multiple;
use crate::simulation::project_side;

/// Headcount drawn from `points` at `rate` percent
pub fn mobilization(points: f64, rate: f64) -> i64 {
    floor_to_multiple(points * (rate / 100.0), 1.0) as i64
}

/// Project both sides for every month of the run
pub fn run_simulation(
    initial: &InitialValues,
    settings: &SimulationSettings,
    table: &CommissionTable,
) -> Result<Vec<MonthlyResult>> {
    info!(
        "Simulating {} month(s) from {} (left {} pt / {} direct, right {} pt / {} direct)",
        initial.month_count(),
        initial.start_month,
        initial.start_left_pt,
        initial.direct_left,
        initial.start_right_pt,
        initial.direct_right,
    );

    let left = project_side(initial, settings, Side::Left);
    let right = project_side(initial, settings, Side::Right);

    let mut results = Vec::new();
    for (left_month, right_month) in left.zip(right) {
        let left_pt = left_month.end_of_month_pt;
        let right_pt = right_month.end_of_month_pt;

        let mobilization_left = mobilization(left_pt, settings.mobilization_rate);
        let mobilization_right = mobilization(right_pt, settings.mobilization_rate);

        let commission_left = table.commission(left_pt);
        let commission_right = table.commission(right_pt);

        let month = initial.start_month.label(left_month.month)?;
        debug!(
            "{}: left {} pt, right {} pt, commission {} + {}",
            month, left_pt, right_pt, commission_left, commission_right
        );

        results.push(MonthlyResult {
            month,
            left_pt,
            right_pt,
            total_pt: left_pt + right_pt,
            mobilization_left,
            mobilization_right,
            total_mobilization: mobilization_left + mobilization_right,
            total_commission: commission_left + commission_right,
        });
    }

    Ok(results)
}

/// A finished run with the name it was made for
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub results: Vec<MonthlyResult>,
}

impl SimulationReport {
    pub fn generate(
        initial: &InitialValues,
        settings: &SimulationSettings,
        table: &CommissionTable,
    ) -> Result<Self> {
        let name = initial
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        Ok(Self {
            name,
            results: run_simulation(initial, settings, table)?,
        })
    }

    pub fn title(&self) -> String {
        match &self.name {
            Some(name) => format!("Simulation results for {}", name),
            None => "Simulation results".to_string(),
        }
    }

    /// The last simulated month, if any
    pub fn final_month(&self) -> Option<&MonthlyResult> {
        self.results.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::StartMonth;
    use crate::errors::SimulationError;
    use chrono::Datelike;

    fn settings() -> SimulationSettings {
        SimulationSettings {
            referral_rate: 50.0,
            referrals_per_person: 3.0,
            point_multiplier: 1.5,
            mobilization_rate: 15.0,
        }
    }

    fn initial(direct_left: u32, months: i32) -> InitialValues {
        InitialValues {
            start_month: StartMonth::new(2024, 4).unwrap(),
            start_left_pt: 0.0,
            start_right_pt: 0.0,
            direct_left,
            direct_right: 0,
            simulation_months: months,
            name: None,
        }
    }

    #[test]
    fn test_mobilization_floors() {
        assert_eq!(mobilization(37.5, 15.0), 5);
        assert_eq!(mobilization(3.0, 15.0), 0);
        assert_eq!(mobilization(100.0, 15.0), 15);
    }

    #[test]
    fn test_seed_month_scenario() {
        let results = run_simulation(&initial(2, 1), &settings(), &CommissionTable::default()).unwrap();
        assert_eq!(results.len(), 1);

        let row = &results[0];
        assert_eq!(row.month, "2024/04/20");
        assert_eq!(row.left_pt, 3.0);
        assert_eq!(row.right_pt, 0.0);
        assert_eq!(row.total_pt, 3.0);
        assert_eq!(row.total_mobilization, 0);
        assert_eq!(row.total_commission, 0.0);
    }

    #[test]
    fn test_two_month_scenario() {
        let results = run_simulation(&initial(10, 2), &settings(), &CommissionTable::default()).unwrap();
        assert_eq!(results.len(), 2);

        assert_eq!(results[0].left_pt, 15.0);
        assert_eq!(results[0].mobilization_left, 2);
        assert_eq!(results[0].total_commission, 3_000.0);

        assert_eq!(results[1].month, "2024/05/20");
        assert_eq!(results[1].left_pt, 37.5);
        assert_eq!(results[1].mobilization_left, 5);
        assert_eq!(results[1].total_commission, 6_000.0);
        assert_eq!(results[1].right_pt, 0.0);
    }

    #[test]
    fn test_zero_and_negative_months_are_empty() {
        let table = CommissionTable::default();
        assert!(run_simulation(&initial(10, 0), &settings(), &table).unwrap().is_empty());
        assert!(run_simulation(&initial(10, -3), &settings(), &table).unwrap().is_empty());
    }

    #[test]
    fn test_label_overflow_fails_whole_run() {
        let last = chrono::NaiveDate::MAX;
        let mut values = initial(10, i32::MAX);
        values.start_month = StartMonth::new(last.year(), last.month()).unwrap();

        let result = run_simulation(&values, &settings(), &CommissionTable::default());
        assert!(matches!(
            result,
            Err(SimulationError::MonthOutOfRange { offset: 1, .. })
        ));
    }

    #[test]
    fn test_report_title() {
        let mut values = initial(2, 1);
        let report = SimulationReport::generate(&values, &settings(), &CommissionTable::default()).unwrap();
        assert_eq!(report.title(), "Simulation results");

        values.name = Some("  ".to_string());
        let report = SimulationReport::generate(&values, &settings(), &CommissionTable::default()).unwrap();
        assert_eq!(report.name, None);

        values.name = Some("Tanaka".to_string());
        let report = SimulationReport::generate(&values, &settings(), &CommissionTable::default()).unwrap();
        assert_eq!(report.title(), "Simulation results for Tanaka");
        assert_eq!(report.final_month().map(|m| m.left_pt), Some(3.0));
    }
}

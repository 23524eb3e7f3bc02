/// Reporting and output formatting module
/// Handles all console output and result presentation

use prettytable::{row, Table};

use crate::aggregator::SimulationReport;
use crate::errors::Result;
use crate::models::{MonthlyState, Side};

/// Build the monthly results table
pub fn results_table(report: &SimulationReport) -> Table {
    let mut table = Table::new();
    table.set_titles(row![
        "Month",
        "Left Pt",
        "Right Pt",
        "Total Pt",
        "Mobilization L",
        "Mobilization R",
        "Mobilization Total",
        "Commission"
    ]);

    for result in &report.results {
        table.add_row(row![
            result.month,
            r->format!("{} pt", result.left_pt),
            r->format!("{} pt", result.right_pt),
            r->format!("{} pt", result.total_pt),
            r->result.mobilization_left,
            r->result.mobilization_right,
            r->result.total_mobilization,
            r->format!("¥{}", result.total_commission)
        ]);
    }

    table
}

/// Build the month-by-month working table for one side
pub fn detail_table(states: &[MonthlyState]) -> Table {
    let mut table = Table::new();
    table.set_titles(row![
        "#",
        "Start Pt",
        "Prev Increase",
        "Introducers",
        "Increase",
        "Increase Pt",
        "End Pt"
    ]);

    for state in states {
        table.add_row(row![
            r->state.month,
            r->state.start_of_month_pt,
            r->state.prev_month_increase_num,
            r->state.introducers,
            r->state.current_increase_num,
            r->state.increase_pt,
            r->state.end_of_month_pt
        ]);
    }

    table
}

/// Display the monthly results with a title banner
pub fn display_report(report: &SimulationReport) {
    println!("\n=== {} ===\n", report.title());

    if report.results.is_empty() {
        println!("  No months simulated.");
        return;
    }

    results_table(report).printstd();

    if let Some(last) = report.final_month() {
        println!(
            "\n  {}: {} pt total, {} mobilized, ¥{} commission",
            last.month, last.total_pt, last.total_mobilization, last.total_commission
        );
    }
}

/// Display the per-side working for every month
pub fn display_side_detail(side: Side, states: &[MonthlyState]) {
    println!("\n--- {} side detail ---", side.name());
    detail_table(states).printstd();
}

/// Print the report as pretty JSON
pub fn display_json(report: &SimulationReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MonthlyResult;

    fn report() -> SimulationReport {
        SimulationReport {
            name: Some("Suzuki".to_string()),
            results: vec![MonthlyResult {
                month: "2024/01/20".to_string(),
                left_pt: 15.0,
                right_pt: 3.0,
                total_pt: 18.0,
                mobilization_left: 2,
                mobilization_right: 0,
                total_mobilization: 2,
                total_commission: 3_000.0,
            }],
        }
    }

    #[test]
    fn test_results_table_has_one_row_per_month() {
        let table = results_table(&report());
        assert_eq!(table.len(), 1);
        let rendered = table.to_string();
        assert!(rendered.contains("2024/01/20"));
        assert!(rendered.contains("15 pt"));
        assert!(rendered.contains("¥3000"));
    }

    #[test]
    fn test_detail_table() {
        let states = vec![MonthlyState {
            month: 0,
            start_of_month_pt: 0.0,
            prev_month_increase_num: 0.0,
            introducers: 0.0,
            current_increase_num: 2.0,
            increase_pt: 3.0,
            end_of_month_pt: 3.0,
        }];
        assert_eq!(detail_table(&states).len(), 1);
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = serde_json::to_string(&report()).unwrap();
        assert!(json.contains("\"totalCommission\":3000.0"));
        assert!(json.contains("\"mobilizationLeft\":2"));
        assert!(json.contains("\"name\":\"Suzuki\""));
    }
}

//! Month-by-month projection of points, mobilization and commission on the
//! two sides of a binary referral network.

pub mod aggregator;
pub mod calendar;
pub mod commission;
pub mod config;
pub mod errors;
pub mod models;
pub mod reporting;
pub mod rounding;
pub mod simulation;

pub use aggregator::{mobilization, run_simulation, SimulationReport};
pub use calendar::StartMonth;
pub use commission::{commission, CommissionTable, Tier};
pub use config::ScenarioConfig;
pub use errors::{Result, SimulationError};
pub use models::{InitialValues, MonthlyResult, MonthlyState, Side, SimulationSettings};
pub use simulation::{project_side, simulate_side, SideProjection};

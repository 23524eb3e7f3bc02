/// Per-side monthly recurrence
/// Each month is a new `MonthlyState` derived from the previous one and the settings

use crate::models::{InitialValues, MonthlyState, Side, SimulationSettings};
use crate::rounding::{floor_to_multiple, round_to_nearest};

/// Points are tracked in half-point steps
pub const POINT_STEP: f64 = 0.5;

impl MonthlyState {
    /// Month 0: starting points rounded once, direct referrals credited as given
    pub fn seed(starting_pt: f64, direct_referrals: u32, settings: &SimulationSettings) -> Self {
        let start_of_month_pt = round_to_nearest(starting_pt, POINT_STEP);
        Self::settle(0, start_of_month_pt, 0.0, 0.0, direct_referrals as f64, settings)
    }

    /// The month after `self`
    pub fn advance(&self, settings: &SimulationSettings) -> Self {
        let prev_month_increase_num = self.current_increase_num;
        // Only whole people refer
        let introducers =
            floor_to_multiple(prev_month_increase_num * (settings.referral_rate / 100.0), 1.0);
        let current_increase_num = introducers * settings.referrals_per_person;

        Self::settle(
            self.month + 1,
            self.end_of_month_pt,
            prev_month_increase_num,
            introducers,
            current_increase_num,
            settings,
        )
    }

    fn settle(
        month: u32,
        start_of_month_pt: f64,
        prev_month_increase_num: f64,
        introducers: f64,
        current_increase_num: f64,
        settings: &SimulationSettings,
    ) -> Self {
        let increase_pt = round_to_nearest(current_increase_num * settings.point_multiplier, POINT_STEP);
        let end_of_month_pt = round_to_nearest(start_of_month_pt + increase_pt, POINT_STEP);

        MonthlyState {
            month,
            start_of_month_pt,
            prev_month_increase_num,
            introducers,
            current_increase_num,
            increase_pt,
            end_of_month_pt,
        }
    }
}

/// Lazy month-by-month projection of one side
///
/// A clone continues from the same month as the original. Call
/// `project_side` again to start from month 0.
#[derive(Clone, Debug)]
pub struct SideProjection<'a> {
    settings: &'a SimulationSettings,
    starting_pt: f64,
    direct_referrals: u32,
    months: u32,
    last: Option<MonthlyState>,
}

impl<'a> SideProjection<'a> {
    pub fn new(
        starting_pt: f64,
        direct_referrals: u32,
        settings: &'a SimulationSettings,
        months: u32,
    ) -> Self {
        Self {
            settings,
            starting_pt,
            direct_referrals,
            months,
            last: None,
        }
    }

    fn produced(&self) -> u32 {
        self.last.as_ref().map(|state| state.month + 1).unwrap_or(0)
    }
}

impl Iterator for SideProjection<'_> {
    type Item = MonthlyState;

    fn next(&mut self) -> Option<MonthlyState> {
        if self.produced() >= self.months {
            return None;
        }
        let state = match &self.last {
            None => MonthlyState::seed(self.starting_pt, self.direct_referrals, self.settings),
            Some(prev) => prev.advance(self.settings),
        };
        self.last = Some(state.clone());
        Some(state)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.months - self.produced()) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SideProjection<'_> {}

/// Projection of `side` for the run described by `initial`
pub fn project_side<'a>(
    initial: &InitialValues,
    settings: &'a SimulationSettings,
    side: Side,
) -> SideProjection<'a> {
    SideProjection::new(
        initial.starting_points(side),
        initial.direct_referrals(side),
        settings,
        initial.month_count(),
    )
}

/// Every month of `side`, collected
pub fn simulate_side(
    initial: &InitialValues,
    settings: &SimulationSettings,
    side: Side,
) -> Vec<MonthlyState> {
    project_side(initial, settings, side).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SimulationSettings {
        SimulationSettings {
            referral_rate: 50.0,
            referrals_per_person: 3.0,
            point_multiplier: 1.5,
            mobilization_rate: 15.0,
        }
    }

    #[test]
    fn test_seed_month() {
        let state = MonthlyState::seed(0.0, 2, &settings());
        assert_eq!(state.month, 0);
        assert_eq!(state.current_increase_num, 2.0);
        assert_eq!(state.introducers, 0.0);
        assert_eq!(state.increase_pt, 3.0);
        assert_eq!(state.end_of_month_pt, 3.0);
    }

    #[test]
    fn test_seed_rounds_starting_points() {
        let state = MonthlyState::seed(10.3, 0, &settings());
        assert_eq!(state.start_of_month_pt, 10.5);
        assert_eq!(state.end_of_month_pt, 10.5);
    }

    #[test]
    fn test_second_month_propagation() {
        let s = settings();
        let first = MonthlyState::seed(0.0, 10, &s);
        assert_eq!(first.end_of_month_pt, 15.0);

        let second = first.advance(&s);
        assert_eq!(second.month, 1);
        assert_eq!(second.start_of_month_pt, 15.0);
        assert_eq!(second.prev_month_increase_num, 10.0);
        assert_eq!(second.introducers, 5.0);
        assert_eq!(second.current_increase_num, 15.0);
        assert_eq!(second.increase_pt, 22.5);
        assert_eq!(second.end_of_month_pt, 37.5);
    }

    #[test]
    fn test_introducers_are_floored() {
        let s = settings();
        // 15 * 0.5 = 7.5 -> 7 introducers -> 21 new members
        let third = MonthlyState::seed(0.0, 10, &s).advance(&s).advance(&s);
        assert_eq!(third.introducers, 7.0);
        assert_eq!(third.current_increase_num, 21.0);
        assert_eq!(third.increase_pt, 31.5);
        assert_eq!(third.end_of_month_pt, 69.0);
    }

    #[test]
    fn test_fractional_referrals_per_person() {
        let s = SimulationSettings {
            referrals_per_person: 1.3,
            point_multiplier: 1.0,
            ..settings()
        };
        let second = MonthlyState::seed(0.0, 4, &s).advance(&s);
        assert_eq!(second.introducers, 2.0);
        assert!((second.current_increase_num - 2.6).abs() < 1e-12);
        assert_eq!(second.increase_pt, 2.5);
    }

    #[test]
    fn test_growth_dies_out_below_one_introducer() {
        let s = settings();
        let second = MonthlyState::seed(5.0, 1, &s).advance(&s);
        assert_eq!(second.introducers, 0.0);
        assert_eq!(second.increase_pt, 0.0);
        assert_eq!(second.end_of_month_pt, second.start_of_month_pt);
    }

    #[test]
    fn test_projection_length_and_restart() {
        let s = settings();
        let projection = SideProjection::new(0.0, 10, &s, 6);
        assert_eq!(projection.len(), 6);

        let first_run: Vec<_> = projection.clone().collect();
        let second_run: Vec<_> = projection.collect();
        assert_eq!(first_run.len(), 6);
        assert_eq!(first_run, second_run);
        assert_eq!(first_run.last().map(|m| m.month), Some(5));
    }

    #[test]
    fn test_empty_projection() {
        let s = settings();
        assert_eq!(SideProjection::new(0.0, 10, &s, 0).count(), 0);
    }
}

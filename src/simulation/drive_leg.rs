use ordered_float::OrderedFloat;
use tracing::{debug, info};

use crate::{
    geo::GeoService,
    model::{DutyStatus, Location},
};

use super::{
    rest::MANDATORY_BREAK_REASON, state::SimulationState, BINDING_TOLERANCE, MIN_DRIVE_SEGMENT,
};

const HIGHWAY: &str = "Highway";

/// The limits that can end a drive segment, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Arrival,
    ContinuousBreak,
    DailyDrive,
    DutyWindow,
    Fuel,
}

/// Hours of driving each limit still allows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Allowances {
    pub arrival: f64,
    pub continuous: f64,
    pub daily: f64,
    pub window: f64,
    pub fuel: f64,
}

impl Allowances {
    pub fn compute(state: &SimulationState, remaining_miles: f64, miles_since_fuel: f64) -> Self {
        let speed = state.limits.avg_speed_mph;
        Self {
            arrival: remaining_miles / speed,
            continuous: state.continuous_remaining(),
            daily: state.daily_remaining(),
            window: state.window_remaining(),
            fuel: (state.limits.fuel_interval_miles - miles_since_fuel) / speed,
        }
    }

    fn ranked(&self) -> [(Constraint, f64); 5] {
        [
            (Constraint::Arrival, self.arrival),
            (Constraint::ContinuousBreak, self.continuous),
            (Constraint::DailyDrive, self.daily),
            (Constraint::DutyWindow, self.window),
            (Constraint::Fuel, self.fuel),
        ]
    }

    /// Whether a regulatory or fuel limit, rather than the remaining distance, leaves no
    /// room to drive.
    pub fn blocked(&self) -> bool {
        [self.continuous, self.daily, self.window, self.fuel]
            .iter()
            .any(|hours| *hours <= MIN_DRIVE_SEGMENT)
    }

    /// Length of the next segment and the constraint that ends it.
    ///
    /// The segment is the smallest allowance. When several allowances lie within
    /// [`BINDING_TOLERANCE`] of it, the first in [`Constraint`] order wins.
    pub fn next_segment(&self) -> (f64, Constraint) {
        let ranked = self.ranked();
        let (shortest, segment) = ranked.into_iter().fold(ranked[0], |best, candidate| {
            if OrderedFloat(candidate.1) < OrderedFloat(best.1) {
                candidate
            } else {
                best
            }
        });
        let binding = ranked
            .into_iter()
            .find(|(_, hours)| (hours - segment).abs() < BINDING_TOLERANCE)
            .map_or(shortest, |(constraint, _)| constraint);
        (segment, binding)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LegOutcome {
    pub miles: f64,
    pub driving_hours: f64,
    pub segments: usize,
    pub forced_stops: usize,
}

/// Drives from the current position to `destination`, inserting breaks, resets and fuel
/// stops as the limits bind.
///
/// Travel is a straight line at constant speed. Fuel distance is counted per leg. Whenever
/// a limit leaves no more than [`MIN_DRIVE_SEGMENT`] hours of driving, the truck takes a full
/// reset (refuelling too if the tank is the exhausted limit) and tries again. A remaining
/// distance shorter than that is simply driven.
pub fn simulate_drive_leg<G>(
    state: &mut SimulationState,
    geo: &G,
    destination: &Location,
) -> LegOutcome
where
    G: GeoService + ?Sized,
{
    let origin = state.position;
    let total = geo.distance(origin, destination.coords);
    let speed = state.limits.avg_speed_mph;
    let mut remaining = total;
    let mut miles_since_fuel = 0.0;
    let mut outcome = LegOutcome::default();
    info!(
        from = %state.position_name,
        to = %destination.name,
        miles = total,
        "starting drive leg"
    );

    while remaining > 0.0 {
        let allowances = Allowances::compute(state, remaining, miles_since_fuel);
        let (segment, binding) = allowances.next_segment();
        if segment <= MIN_DRIVE_SEGMENT && allowances.blocked() {
            state.forced_stop();
            // the reset alone would leave the tank empty
            if allowances.fuel <= MIN_DRIVE_SEGMENT {
                state.take_fuel_stop();
                miles_since_fuel = 0.0;
            }
            outcome.forced_stops += 1;
            continue;
        }

        let miles = segment * speed;
        state.record(DutyStatus::Driving, segment, HIGHWAY, "Driving", Some(miles));
        state.drive_continuous += segment;
        state.drive_daily += segment;
        remaining -= miles;
        miles_since_fuel += miles;
        outcome.miles += miles;
        outcome.driving_hours += segment;
        outcome.segments += 1;

        state.position = match binding {
            Constraint::Arrival => destination.coords,
            _ => geo.interpolate(origin, destination.coords, (total - remaining) / total),
        };
        state.route_path.push(state.position);
        debug!(?binding, segment, remaining, "drive segment ended");

        match binding {
            Constraint::Arrival => break,
            Constraint::ContinuousBreak => {
                state.take_short_break(state.limits.break_duration, MANDATORY_BREAK_REASON)
            }
            Constraint::DailyDrive | Constraint::DutyWindow => state.take_daily_reset(),
            Constraint::Fuel => {
                state.take_fuel_stop();
                miles_since_fuel = 0.0;
            }
        }
    }

    state.position = destination.coords;
    state.position_name = destination.name.clone();
    info!(
        at = %destination.name,
        miles = outcome.miles,
        driving_hours = outcome.driving_hours,
        "arrived"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{
        config::HosLimits,
        geo::Resolved,
        model::{Coordinates, StopKind},
        simulation::state::tests::start,
    };

    /// Flat plane where one degree is one hour of driving at 60 mph.
    struct FlatGeo;

    impl GeoService for FlatGeo {
        fn resolve(&self, _name: &str) -> Resolved {
            Resolved::Fallback(Coordinates::new(0.0, 0.0))
        }

        fn distance(&self, a: Coordinates, b: Coordinates) -> f64 {
            ((b.lat - a.lat).powi(2) + (b.lng - a.lng).powi(2)).sqrt() * 60.0
        }
    }

    fn state_with(limits: HosLimits) -> SimulationState {
        SimulationState::new(
            start(),
            &Location::new("Origin", Coordinates::new(0.0, 0.0)),
            0.0,
            limits,
        )
    }

    fn hours_east(hours: f64) -> Location {
        Location::new("Destination", Coordinates::new(0.0, hours))
    }

    fn statuses(state: &SimulationState) -> Vec<DutyStatus> {
        state.events.iter().map(|e| e.status).collect()
    }

    #[rstest]
    #[case::arrival_beats_break(
        Allowances { arrival: 2.0, continuous: 2.0005, daily: 5.0, window: 9.0, fuel: 7.0 },
        Constraint::Arrival
    )]
    #[case::break_beats_daily(
        Allowances { arrival: 9.0, continuous: 3.0, daily: 3.0, window: 9.0, fuel: 7.0 },
        Constraint::ContinuousBreak
    )]
    #[case::daily_beats_window(
        Allowances { arrival: 9.0, continuous: 5.0, daily: 3.0, window: 3.0, fuel: 3.0 },
        Constraint::DailyDrive
    )]
    #[case::window_beats_fuel(
        Allowances { arrival: 9.0, continuous: 5.0, daily: 4.0, window: 2.5, fuel: 2.5 },
        Constraint::DutyWindow
    )]
    #[case::fuel_alone(
        Allowances { arrival: 20.0, continuous: 5.0, daily: 6.0, window: 8.0, fuel: 1.5 },
        Constraint::Fuel
    )]
    fn test_binding_constraint_precedence(
        #[case] allowances: Allowances,
        #[case] expected: Constraint,
    ) {
        let (_, binding) = allowances.next_segment();
        assert_eq!(binding, expected);
    }

    #[test]
    fn test_segment_is_the_smallest_allowance() {
        let allowances = Allowances {
            arrival: 20.0,
            continuous: 5.0,
            daily: 0.75,
            window: 8.0,
            fuel: 1.5,
        };
        assert_eq!(allowances.next_segment(), (0.75, Constraint::DailyDrive));
    }

    #[test]
    fn test_short_leg_is_a_single_drive() {
        let mut state = state_with(HosLimits::default());
        let outcome = simulate_drive_leg(&mut state, &FlatGeo, &hours_east(50.0 / 60.0));

        assert_eq!(statuses(&state), vec![DutyStatus::Driving]);
        assert!((outcome.miles - 50.0).abs() < 1e-9);
        assert_eq!(outcome.forced_stops, 0);
        assert!(state.stops.is_empty());
        assert_eq!(state.position, Coordinates::new(0.0, 50.0 / 60.0));
        assert_eq!(state.position_name, "Destination");
        assert_eq!(state.route_path.len(), 2);
    }

    #[test]
    fn test_long_leg_takes_a_break_after_continuous_limit() {
        let mut state = state_with(HosLimits::default());
        simulate_drive_leg(&mut state, &FlatGeo, &hours_east(10.0));

        assert_eq!(
            statuses(&state),
            vec![DutyStatus::Driving, DutyStatus::OffDuty, DutyStatus::Driving]
        );
        assert!((state.events[0].duration - 8.0).abs() < 1e-9);
        assert_eq!(state.events[1].duration, 0.5);
        assert!((state.events[2].duration - 2.0).abs() < 1e-9);
        assert_eq!(state.tally.short_breaks, 1);
        assert!((state.drive_daily - 10.0).abs() < 1e-9);
        assert!((state.drive_continuous - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_break_waypoint_sits_on_the_path() {
        let mut state = state_with(HosLimits::default());
        simulate_drive_leg(&mut state, &FlatGeo, &hours_east(10.0));

        let rest = &state.stops[0];
        assert_eq!(rest.kind, StopKind::Rest);
        assert!((rest.location.coords.lng - 8.0).abs() < 1e-9);
        assert_eq!(
            state.route_path.last().copied(),
            Some(Coordinates::new(0.0, 10.0))
        );
    }

    #[test]
    fn test_daily_limit_forces_a_reset() {
        let mut state = state_with(HosLimits::default());
        simulate_drive_leg(&mut state, &FlatGeo, &hours_east(13.0));

        // 8h, break, 3h (daily cap), reset, 2h
        assert_eq!(
            statuses(&state),
            vec![
                DutyStatus::Driving,
                DutyStatus::OffDuty,
                DutyStatus::Driving,
                DutyStatus::SleeperBerth,
                DutyStatus::Driving,
            ]
        );
        assert!((state.events[2].duration - 3.0).abs() < 1e-9);
        assert_eq!(state.tally.daily_resets, 1);
        assert!((state.drive_daily - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_duty_window_forces_a_reset() {
        let mut state = state_with(HosLimits::default());
        state.record(DutyStatus::OnDuty, 6.0, "Yard", "Paperwork", None);
        state.record(DutyStatus::OffDuty, 4.0, "Yard", "Waiting", None);

        simulate_drive_leg(&mut state, &FlatGeo, &hours_east(6.0));

        // only 4h of window left
        assert!((state.events[2].duration - 4.0).abs() < 1e-9);
        assert_eq!(state.events[3].status, DutyStatus::SleeperBerth);
        assert!((state.events[4].duration - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_exhausted_limit_resets_before_driving() {
        let mut state = state_with(HosLimits::default());
        state.drive_daily = 11.0;

        let outcome = simulate_drive_leg(&mut state, &FlatGeo, &hours_east(1.0));

        assert_eq!(outcome.forced_stops, 1);
        assert_eq!(
            statuses(&state),
            vec![DutyStatus::SleeperBerth, DutyStatus::Driving]
        );
    }

    #[test]
    fn test_fuel_stops_every_interval() {
        let limits = HosLimits {
            fuel_interval_miles: 100.0,
            ..HosLimits::default()
        };
        let mut state = state_with(limits);
        simulate_drive_leg(&mut state, &FlatGeo, &hours_east(250.0 / 60.0));

        assert_eq!(
            statuses(&state),
            vec![
                DutyStatus::Driving,
                DutyStatus::OnDuty,
                DutyStatus::Driving,
                DutyStatus::OnDuty,
                DutyStatus::Driving,
            ]
        );
        assert_eq!(state.tally.fuel_stops, 2);
        let fuel_stops: Vec<_> = state
            .stops
            .iter()
            .filter(|s| s.kind == StopKind::Fuel)
            .collect();
        assert_eq!(fuel_stops.len(), 2);
        assert!((state.events[4].distance.unwrap() - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_fuel_exhausted_alongside_a_break_refuels_after_the_reset() {
        // 480 mi of fuel at 60 mph runs out exactly when the break is due
        let limits = HosLimits {
            fuel_interval_miles: 480.0,
            ..HosLimits::default()
        };
        let mut state = state_with(limits);
        let outcome = simulate_drive_leg(&mut state, &FlatGeo, &hours_east(10.0));

        assert_eq!(
            statuses(&state),
            vec![
                DutyStatus::Driving,
                DutyStatus::OffDuty,
                DutyStatus::SleeperBerth,
                DutyStatus::OnDuty,
                DutyStatus::Driving,
            ]
        );
        assert_eq!(outcome.forced_stops, 1);
        assert_eq!(state.tally.fuel_stops, 1);
        assert!((state.events[4].duration - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_tiny_remainder_is_driven_not_slept_on() {
        // 0.3 mi left over after the mandatory break
        let mut state = state_with(HosLimits::default());
        simulate_drive_leg(&mut state, &FlatGeo, &hours_east(8.005));

        assert_eq!(
            statuses(&state),
            vec![DutyStatus::Driving, DutyStatus::OffDuty, DutyStatus::Driving]
        );
        assert!((state.events[2].duration - 0.005).abs() < 1e-9);
        assert_eq!(state.tally.daily_resets, 0);
    }

    #[test]
    fn test_blocked_ignores_remaining_distance() {
        let near = Allowances {
            arrival: 0.001,
            continuous: 5.0,
            daily: 6.0,
            window: 8.0,
            fuel: 3.0,
        };
        assert!(!near.blocked());
        assert!(Allowances { window: 0.0, ..near }.blocked());
        assert!(Allowances { fuel: 0.005, ..near }.blocked());
    }

    #[test]
    fn test_zero_length_leg_records_nothing() {
        let mut state = state_with(HosLimits::default());
        let outcome = simulate_drive_leg(&mut state, &FlatGeo, &hours_east(0.0));
        assert!(state.events.is_empty());
        assert_eq!(outcome, LegOutcome::default());
        assert_eq!(state.position_name, "Destination");
    }
}

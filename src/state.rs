use std::time::{Duration, Instant};

use crate::constants::{CREEP_STEP, CREEP_THRESHOLD, TICK_INTERVAL};

/// Whether an animation has more steps to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    Running,
    Finished,
}

/// State of an in-flight [`Dial`](crate::Dial) animation.
///
/// Each step moves `current` towards `target` by an amount that shrinks as the
/// ratio between them grows, then creeps with a flat step once the ratio
/// reaches 0.95. The ratio is rounded to two decimals before use, so the
/// deceleration happens in visible steps.
///
/// The state consists of:
/// - [`current`]: the value shown after the last step
/// - [`target`]: the value the animation ends on
/// - [`interval`]: the time between two steps
/// - [`last_tick`]: the time the last step was taken
#[derive(Debug, Clone)]
pub struct AnimationState {
    pub current: f64,
    pub target: f64,
    pub interval: Duration,
    pub last_tick: Instant,
}

impl AnimationState {
    pub fn new(start: f64, target: f64) -> Self {
        Self {
            current: start,
            target,
            interval: TICK_INTERVAL,
            last_tick: Instant::now(),
        }
    }

    /// Increment applied to `current` on the next step.
    ///
    /// A zero target gives a NaN ratio, which takes the flat branch; the step
    /// then overshoots and the animation snaps to the target.
    pub fn increment(current: f64, target: f64) -> f64 {
        let p = round_to_hundredths(current / target);
        if p < CREEP_THRESHOLD {
            2.0 - 2.0 * p
        } else {
            CREEP_STEP
        }
    }

    /// Take one step. Snaps to `target` once it is reached.
    pub fn step(&mut self) -> AnimationStatus {
        self.current += Self::increment(self.current, self.target);
        if self.current >= self.target {
            self.current = self.target;
            AnimationStatus::Finished
        } else {
            AnimationStatus::Running
        }
    }

    /// Number of whole intervals elapsed between the last step and `now`.
    pub fn due_steps(&self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.last_tick);
        u32::try_from(elapsed.as_nanos() / self.interval.as_nanos().max(1)).unwrap_or(u32::MAX)
    }
}

/// Round the exact binary value of `x` to two decimals, ties away from zero.
///
/// Scaling by 100 before rounding would round twice: `0.30499..` would become
/// `30.5` and then `0.31`.
fn round_to_hundredths(x: f64) -> f64 {
    if !x.is_finite() || x.abs() >= 1e21 {
        return x;
    }
    let magnitude = x.abs();
    // Only multiples of 1/8 with an odd numerator sit exactly halfway between
    // two hundredths; `{:.2}` would send those to the even neighbour.
    let eighths = magnitude * 8.0;
    let rounded = if eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        (magnitude * 100.0).ceil() / 100.0
    } else {
        format!("{:.2}", magnitude).parse().unwrap_or(magnitude)
    };
    rounded.copysign(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn run(state: &mut AnimationState) -> usize {
        let mut steps = 1;
        while state.step() == AnimationStatus::Running {
            steps += 1;
        }
        steps
    }

    #[test]
    fn test_increment_fast_start() {
        assert!((AnimationState::increment(0.0, 80.0) - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_increment_decelerates() {
        // 40 / 80 = 0.5
        assert!((AnimationState::increment(40.0, 80.0) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_increment_is_quantized() {
        // 0.5012 and 0.4951 both round to 0.50
        let a = AnimationState::increment(50.12, 100.0);
        let b = AnimationState::increment(49.51, 100.0);
        assert!((a - b).abs() < EPSILON);
        assert!((a - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_increment_rounds_the_stored_ratio() {
        // 3.66 / 12 is stored just below 0.305
        assert!((AnimationState::increment(3.66, 12.0) - 1.4).abs() < EPSILON);
        // 0.125 is an exact tie and rounds up to 0.13
        assert!((AnimationState::increment(12.5, 100.0) - 1.74).abs() < EPSILON);
        // 0.375 rounds up to 0.38
        assert!((AnimationState::increment(37.5, 100.0) - 1.24).abs() < EPSILON);
    }

    #[test]
    fn test_round_to_hundredths() {
        assert_eq!(round_to_hundredths(0.125), 0.13);
        assert_eq!(round_to_hundredths(0.875), 0.88);
        assert_eq!(round_to_hundredths(-0.125), -0.13);
        assert_eq!(round_to_hundredths(3.66 / 12.0), 0.3);
        assert_eq!(round_to_hundredths(0.4951), 0.5);
        assert!(round_to_hundredths(f64::NAN).is_nan());
        assert_eq!(round_to_hundredths(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_trajectory_after_halfway_ratio() {
        let mut state = AnimationState::new(0.0, 12.0);
        state.step();
        state.step();
        assert!((state.current - 3.66).abs() < EPSILON);
        state.step();
        assert!((state.current - 5.06).abs() < EPSILON);
        assert_eq!(run(&mut state) + 3, 29);
        assert_eq!(state.current, 12.0);
    }

    #[test]
    fn test_step_counts_match_reference_rule() {
        for (target, expected) in [(12.0, 29), (28.0, 69), (8.8, 20)] {
            let mut state = AnimationState::new(0.0, target);
            assert_eq!(run(&mut state), expected, "target: {}", target);
        }
    }

    #[test]
    fn test_increment_creeps_near_target() {
        assert!((AnimationState::increment(95.0, 100.0) - CREEP_STEP).abs() < EPSILON);
        // 0.946 rounds to 0.95
        assert!((AnimationState::increment(94.6, 100.0) - CREEP_STEP).abs() < EPSILON);
        assert!((AnimationState::increment(94.0, 100.0) - 0.12).abs() < EPSILON);
    }

    #[test]
    fn test_step_snaps_to_target() {
        let mut state = AnimationState::new(99.98, 100.0);
        assert_eq!(state.step(), AnimationStatus::Finished);
        assert_eq!(state.current, 100.0);
    }

    #[test]
    fn test_animation_terminates_on_target() {
        for target in [0.5, 1.0, 12.0, 33.3, 50.0, 87.25, 100.0] {
            let mut state = AnimationState::new(0.0, target);
            let steps = run(&mut state);
            assert_eq!(state.current, target);
            assert!(steps < 1000, "target: {}, steps: {}", target, steps);
        }
    }

    #[test]
    fn test_zero_target_finishes_on_first_step() {
        let mut state = AnimationState::new(0.0, 0.0);
        assert_eq!(state.step(), AnimationStatus::Finished);
        assert_eq!(state.current, 0.0);
    }

    #[test]
    fn test_start_above_target_snaps_down() {
        let mut state = AnimationState::new(80.0, 20.0);
        assert_eq!(state.step(), AnimationStatus::Finished);
        assert_eq!(state.current, 20.0);
    }

    #[test]
    fn test_due_steps() {
        let state = AnimationState::new(0.0, 10.0);
        assert_eq!(state.due_steps(state.last_tick), 0);
        assert_eq!(state.due_steps(state.last_tick + Duration::from_millis(9)), 0);
        assert_eq!(state.due_steps(state.last_tick + Duration::from_millis(35)), 3);
    }

    #[test]
    fn test_due_steps_saturates() {
        let mut state = AnimationState::new(0.0, 10.0);
        state.interval = Duration::from_nanos(1);
        let now = state.last_tick + Duration::from_secs(10);
        assert_eq!(state.due_steps(now), u32::MAX);
    }
}

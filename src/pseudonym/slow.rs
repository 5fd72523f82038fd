//! SLOW pseudonym-change strategy.
//!
//! Change the pseudonym only while the vehicle is slow, and at most once per
//! configured lifetime. While slow the vehicle additionally stays silent:
//! an observer cannot link the old and new identifiers through a continuous
//! position trace.

use std::time::Duration;

use crate::cam::vehicle::VehicleState;
use crate::time::SimTime;

/// SLOW strategy parameters.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlowConfig {
    /// Minimum time between two changes
    pub pseudonym_lifetime: Duration,
    /// Speed at or below which the vehicle counts as slow, km/h
    pub slow_threshold_kmh: f64,
}

impl Default for SlowConfig {
    fn default() -> Self {
        Self {
            pseudonym_lifetime: Duration::from_secs(10),
            slow_threshold_kmh: 18.0,
        }
    }
}

/// Per-vehicle SLOW accumulator.
#[derive(Debug)]
pub struct SlowStrategy {
    lifetime: Duration,
    threshold_mps: f64,
    last_change: SimTime,
}

impl SlowStrategy {
    /// Create the strategy for a vehicle inserted at `now`.
    #[must_use]
    pub fn new(config: SlowConfig, now: SimTime) -> Self {
        Self {
            lifetime: config.pseudonym_lifetime,
            threshold_mps: config.slow_threshold_kmh / 3.6,
            last_change: now,
        }
    }

    /// Whether the vehicle currently counts as slow.
    #[must_use]
    pub fn is_slow(&self, state: &VehicleState) -> bool {
        state.speed <= self.threshold_mps
    }

    /// Grant a change when slow and the lifetime has expired; the change
    /// timestamp is reset in the same step.
    pub fn evaluate(&mut self, now: SimTime, state: &VehicleState) -> bool {
        if self.is_slow(state) && now - self.last_change >= self.lifetime {
            self.last_change = now;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cam::message::StationType;

    fn state(speed: f64) -> VehicleState {
        VehicleState {
            station_id: 1,
            vehicle_id: "veh0".into(),
            station_type: StationType::PassengerCar,
            latitude: 48.74,
            longitude: 9.32,
            speed,
            heading: 0.0,
            acceleration: 0.0,
            yaw_rate: 0.0,
            curvature: 0.0,
            length: 4.5,
            width: 1.8,
            tx_range: 300,
        }
    }

    #[test]
    fn one_change_per_lifetime_while_slow() {
        // threshold 18 km/h = 5 m/s, lifetime 10 s
        let mut strategy = SlowStrategy::new(SlowConfig::default(), SimTime::ZERO);
        let slow = state(2.0);

        // tick once per second for 11 simulated seconds
        let mut changes = 0;
        for second in 1..=11u64 {
            if strategy.evaluate(SimTime::from_millis(second * 1000), &slow) {
                changes += 1;
            }
        }
        assert_eq!(changes, 1);
    }

    #[test]
    fn fast_vehicle_never_changes() {
        let mut strategy = SlowStrategy::new(SlowConfig::default(), SimTime::ZERO);
        let fast = state(6.0);
        assert!(!strategy.evaluate(SimTime::from_millis(60_000), &fast));
    }

    #[test]
    fn suppression_follows_threshold() {
        let strategy = SlowStrategy::new(SlowConfig::default(), SimTime::ZERO);
        assert!(strategy.is_slow(&state(2.0)));
        assert!(strategy.is_slow(&state(5.0)));
        assert!(!strategy.is_slow(&state(5.1)));
    }
}

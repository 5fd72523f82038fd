//! ETSI CAM triggering state machine.
//!
//! Mirrors the generation rules of EN 302 637-2 section 6.1.3: a CAM is due
//! when the minimum interval has elapsed and either the vehicle dynamics
//! changed noticeably or the adaptive generation interval ran out. A vehicle
//! whose dynamics stay flat for several consecutive interval-driven sends is
//! allowed to back off to the maximum interval.

use std::time::Duration;

use super::vehicle::{RateControl, VehicleState};
use crate::time::SimTime;

/// Static triggering parameters.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggerConfig {
    /// Lower bound of the generation interval
    pub min_interval: Duration,
    /// Upper bound of the generation interval
    pub max_interval: Duration,
    /// Heading change that forces a transmission, degrees
    pub heading_delta: f64,
    /// Position change that forces a transmission, meters
    pub position_delta: f64,
    /// Speed change that forces a transmission, m/s
    pub speed_delta: f64,
    /// Interval-driven sends with flat dynamics before backing off
    pub low_dynamics_limit: u32,
    /// Transmit on every eligible tick regardless of dynamics
    pub fixed_rate: bool,
    /// Minimum spacing between low-frequency container attachments
    pub low_frequency_interval: Duration,
    /// Requested path history length (capped at 40 during generation)
    pub path_history_length: usize,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_millis(100),
            max_interval: Duration::from_millis(1000),
            heading_delta: 4.0,
            position_delta: 4.0,
            speed_delta: 0.5,
            low_dynamics_limit: 3,
            fixed_rate: false,
            low_frequency_interval: Duration::from_millis(500),
            path_history_length: 0,
        }
    }
}

/// Why a transmission fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerReason {
    /// Fixed-rate mode
    FixedRate,
    /// Heading, position, or speed moved past its threshold
    Dynamics,
    /// The adaptive generation interval elapsed
    Interval,
}

/// Outcome of a triggering evaluation that decided to transmit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendPlan {
    /// What fired the transmission
    pub reason: TriggerReason,
    /// Whether this CAM must carry the low-frequency container
    pub include_low_frequency: bool,
}

#[derive(Debug, Clone, Copy)]
struct Dynamics {
    heading: f64,
    position: (f64, f64),
    speed: f64,
}

/// Per-vehicle triggering state. Never shared across vehicles.
#[derive(Debug)]
pub struct CamTrigger {
    config: TriggerConfig,
    gen_interval: Duration,
    low_dynamics_counter: u32,
    last_sent: SimTime,
    last_low_frequency: Option<SimTime>,
    last_dynamics: Option<Dynamics>,
}

impl CamTrigger {
    /// Create the state machine for a vehicle inserted at `now`.
    ///
    /// The adaptive interval starts at the maximum; the first generated CAM
    /// always carries the low-frequency container.
    #[must_use]
    pub fn new(config: TriggerConfig, now: SimTime) -> Self {
        Self {
            gen_interval: config.max_interval,
            config,
            low_dynamics_counter: 0,
            last_sent: now,
            last_low_frequency: None,
            last_dynamics: None,
        }
    }

    /// Evaluate the triggering conditions at `now`.
    ///
    /// Returns a [`SendPlan`] when a CAM must be generated, updating the
    /// last-sent bookkeeping in the same step. `rate` is the optional
    /// congestion-control collaborator; its recommendation is clamped into
    /// the configured interval bounds.
    pub fn check(
        &mut self,
        now: SimTime,
        state: &VehicleState,
        rate: Option<&dyn RateControl>,
    ) -> Option<SendPlan> {
        let min_interval = match rate {
            Some(rc) => rc
                .recommended_interval()
                .clamp(self.config.min_interval, self.config.max_interval),
            None => self.config.min_interval,
        };

        let elapsed = now - self.last_sent;
        if elapsed < min_interval {
            return None;
        }

        let reason = if self.config.fixed_rate {
            TriggerReason::FixedRate
        } else if self.dynamics_changed(state) {
            self.gen_interval = elapsed.min(self.config.max_interval);
            self.low_dynamics_counter = 0;
            TriggerReason::Dynamics
        } else if elapsed >= self.gen_interval {
            self.low_dynamics_counter += 1;
            if self.low_dynamics_counter >= self.config.low_dynamics_limit {
                self.gen_interval = self.config.max_interval;
            }
            TriggerReason::Interval
        } else {
            return None;
        };

        self.last_sent = now;
        self.last_dynamics = Some(Dynamics {
            heading: state.heading,
            position: (state.latitude, state.longitude),
            speed: state.speed,
        });

        let include_low_frequency = match self.last_low_frequency {
            None => true,
            Some(t) => now - t >= self.config.low_frequency_interval,
        };
        if include_low_frequency {
            self.last_low_frequency = Some(now);
        }

        Some(SendPlan {
            reason,
            include_low_frequency,
        })
    }

    /// Consecutive interval-driven sends with flat dynamics.
    #[must_use]
    pub fn low_dynamics_counter(&self) -> u32 {
        self.low_dynamics_counter
    }

    /// Current adaptive generation interval.
    #[must_use]
    pub fn generation_interval(&self) -> Duration {
        self.gen_interval
    }

    /// Triggering configuration.
    #[must_use]
    pub fn config(&self) -> &TriggerConfig {
        &self.config
    }

    fn dynamics_changed(&self, state: &VehicleState) -> bool {
        let Some(last) = self.last_dynamics else {
            // no baseline yet, the interval path handles the first CAM
            return false;
        };

        let heading_diff = angular_difference(last.heading, state.heading);
        if heading_diff > self.config.heading_delta {
            return true;
        }

        let moved = crate::geo::distance_m(
            last.position.0,
            last.position.1,
            state.latitude,
            state.longitude,
        );
        if moved > self.config.position_delta {
            return true;
        }

        (state.speed - last.speed).abs() > self.config.speed_delta
    }
}

/// Smallest absolute angle between two headings in degrees.
fn angular_difference(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(360.0);
    diff.min(360.0 - diff)
}

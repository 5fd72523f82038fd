//! Whisper pseudonym-change strategy.
//!
//! Adapts the advertised transmission range to the traffic speed around the
//! vehicle: slow, dense traffic gets a short range (fewer listeners per
//! message) and fast traffic a long one. A pending counter drains faster
//! in the low-speed bands; the pseudonym changes when it runs out, or
//! already at half its default while a close neighbor is present.

use tracing::trace;

use super::RxContext;
use crate::cam::message::AwarenessMessage;
use crate::cam::vehicle::VehicleState;

/// Speed band boundaries in km/h.
const LOW_SPEED_KMH: f64 = 18.0;
const MID_SPEED_KMH: f64 = 36.0;
const HIGH_SPEED_KMH: f64 = 54.0;

/// Transmission range per band, meters.
const LOW_SPEED_TX_RANGE: u16 = 50;
const MID_SPEED_TX_RANGE: u16 = 100;
const HIGH_SPEED_TX_RANGE: u16 = 200;
const MAX_TX_RANGE: u16 = 300;

/// Counter decrement per band.
const LOW_SPEED_DECREMENT: i16 = 5;
const MID_SPEED_DECREMENT: i16 = 10;
const HIGH_SPEED_DECREMENT: i16 = 1;

/// Whisper strategy parameters.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WhisperConfig {
    /// Neighbor radius for vehicles on the same road, meters
    pub road_neighbor_radius: f64,
    /// Neighbor radius regardless of road, meters
    pub general_neighbor_radius: f64,
    /// Radius below which a neighbor counts as close, meters
    pub close_neighbor_radius: f64,
    /// Counter start/reset value
    pub counter_default: i16,
    /// Keep decrementing in the top speed band instead of resetting the
    /// counter. The reference model resets above the highest band, which
    /// means a consistently fast vehicle never changes its pseudonym; this
    /// switch enables the alternative behavior without changing the default.
    pub top_band_decrement: bool,
}

impl Default for WhisperConfig {
    fn default() -> Self {
        Self {
            road_neighbor_radius: 200.0,
            general_neighbor_radius: 100.0,
            close_neighbor_radius: 30.0,
            counter_default: 100,
            top_band_decrement: false,
        }
    }
}

/// Per-vehicle Whisper accumulator.
#[derive(Debug)]
pub struct WhisperStrategy {
    config: WhisperConfig,
    counter: i16,
    is_close: bool,
    max_speed_mps: f64,
    tx_range: u16,
}

impl WhisperStrategy {
    /// Create the strategy.
    #[must_use]
    pub fn new(config: WhisperConfig) -> Self {
        Self {
            counter: config.counter_default,
            config,
            is_close: false,
            max_speed_mps: 0.0,
            tx_range: MAX_TX_RANGE,
        }
    }

    /// Observe a received CAM.
    ///
    /// Messages from beyond the sender's advertised transmission range are
    /// dropped: the reduced range is the whole point of the scheme and the
    /// simulation radio does not enforce it.
    pub fn on_message_received(&mut self, message: &AwarenessMessage, ctx: &RxContext) {
        if f64::from(message.extension.tx_range) < ctx.distance_m {
            trace!(
                tx_range = message.extension.tx_range,
                distance = ctx.distance_m,
                "cam outside advertised range, dropped"
            );
            return;
        }

        let neighbor = ctx.distance_m <= self.config.general_neighbor_radius
            || (ctx.distance_m <= self.config.road_neighbor_radius && ctx.same_road);
        if !neighbor {
            return;
        }

        let visitor_speed = message
            .high_frequency
            .speed
            .meters_per_second()
            .unwrap_or(0.0);
        self.max_speed_mps = self.max_speed_mps.max(visitor_speed);

        if ctx.distance_m <= self.config.close_neighbor_radius {
            self.is_close = true;
        }
    }

    /// Cycle boundary: classify the cycle's maximum speed into its band
    /// (adjusting transmission range and draining the counter), then decide
    /// whether the change fires. A granted change resets the counter and the
    /// close-neighbor flag.
    pub fn evaluate(&mut self, state: &VehicleState) -> bool {
        let max_kmh = self.max_speed_mps.max(state.speed) * 3.6;

        if max_kmh < LOW_SPEED_KMH {
            self.tx_range = LOW_SPEED_TX_RANGE;
            self.counter -= LOW_SPEED_DECREMENT;
        } else if max_kmh < MID_SPEED_KMH {
            self.tx_range = MID_SPEED_TX_RANGE;
            self.counter -= MID_SPEED_DECREMENT;
        } else if max_kmh < HIGH_SPEED_KMH {
            self.tx_range = HIGH_SPEED_TX_RANGE;
            self.counter -= HIGH_SPEED_DECREMENT;
        } else {
            self.tx_range = MAX_TX_RANGE;
            if self.config.top_band_decrement {
                self.counter -= HIGH_SPEED_DECREMENT;
            } else {
                self.counter = self.config.counter_default;
            }
        }

        self.max_speed_mps = 0.0;

        if self.counter <= self.config.counter_default / 2 && self.is_close {
            self.counter = self.config.counter_default;
            self.is_close = false;
            true
        } else if self.counter <= 0 {
            self.counter = self.config.counter_default;
            true
        } else {
            false
        }
    }

    /// Transmission range the next CAM should advertise.
    #[must_use]
    pub fn tx_range(&self) -> u16 {
        self.tx_range
    }

    /// Current pending counter.
    #[must_use]
    pub fn counter(&self) -> i16 {
        self.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cam::generate::build_cam;
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

    fn peer_cam(speed: f64, tx_range: u16) -> AwarenessMessage {
        let mut peer = state(speed);
        peer.vehicle_id = "peer".into();
        peer.tx_range = tx_range;
        build_cam(&peer, 0).unwrap()
    }

    #[test]
    fn low_speed_cycles_drain_by_five() {
        let mut strategy = WhisperStrategy::new(WhisperConfig::default());
        let slow = state(2.0); // 7.2 km/h
        for _ in 0..3 {
            assert!(!strategy.evaluate(&slow));
        }
        assert_eq!(strategy.counter(), 85);
        assert_eq!(strategy.tx_range(), LOW_SPEED_TX_RANGE);
    }

    #[test]
    fn exhausted_counter_changes_and_resets() {
        let mut strategy = WhisperStrategy::new(WhisperConfig {
            counter_default: 10,
            ..WhisperConfig::default()
        });
        let slow = state(2.0);
        assert!(!strategy.evaluate(&slow)); // 5 left
        assert!(strategy.evaluate(&slow)); // 0: change
        assert_eq!(strategy.counter(), 10);
    }

    #[test]
    fn close_neighbor_halves_the_wait() {
        let mut strategy = WhisperStrategy::new(WhisperConfig {
            counter_default: 20,
            ..WhisperConfig::default()
        });
        let slow = state(2.0);
        assert!(!strategy.evaluate(&slow)); // 15
        strategy.on_message_received(
            &peer_cam(1.0, 300),
            &RxContext {
                distance_m: 10.0,
                same_road: true,
            },
        );
        assert!(strategy.evaluate(&slow)); // 10 <= 20/2 with close neighbor
        assert_eq!(strategy.counter(), 20);
    }

    #[test]
    fn bands_set_tx_range() {
        let mut strategy = WhisperStrategy::new(WhisperConfig::default());
        strategy.evaluate(&state(7.0)); // 25.2 km/h
        assert_eq!(strategy.tx_range(), MID_SPEED_TX_RANGE);
        strategy.evaluate(&state(13.0)); // 46.8 km/h
        assert_eq!(strategy.tx_range(), HIGH_SPEED_TX_RANGE);
        strategy.evaluate(&state(20.0)); // 72 km/h
        assert_eq!(strategy.tx_range(), MAX_TX_RANGE);
    }

    #[test]
    fn top_band_resets_counter_by_default() {
        let mut strategy = WhisperStrategy::new(WhisperConfig::default());
        let slow = state(2.0);
        strategy.evaluate(&slow);
        strategy.evaluate(&slow);
        assert_eq!(strategy.counter(), 90);
        strategy.evaluate(&state(20.0));
        assert_eq!(strategy.counter(), 100);
    }

    #[test]
    fn top_band_decrement_is_configurable() {
        let mut strategy = WhisperStrategy::new(WhisperConfig {
            top_band_decrement: true,
            ..WhisperConfig::default()
        });
        strategy.evaluate(&state(20.0));
        assert_eq!(strategy.counter(), 99);
    }

    #[test]
    fn neighbor_speed_raises_band() {
        let mut strategy = WhisperStrategy::new(WhisperConfig::default());
        strategy.on_message_received(
            &peer_cam(16.0, 300), // 57.6 km/h neighbor
            &RxContext {
                distance_m: 80.0,
                same_road: false,
            },
        );
        strategy.evaluate(&state(2.0));
        assert_eq!(strategy.tx_range(), MAX_TX_RANGE);
        // and the max resets per cycle
        strategy.evaluate(&state(2.0));
        assert_eq!(strategy.tx_range(), LOW_SPEED_TX_RANGE);
    }

    #[test]
    fn out_of_advertised_range_cam_is_dropped() {
        let mut strategy = WhisperStrategy::new(WhisperConfig::default());
        strategy.on_message_received(
            &peer_cam(16.0, 50), // advertised 50m, heard at 80m
            &RxContext {
                distance_m: 80.0,
                same_road: true,
            },
        );
        strategy.evaluate(&state(2.0));
        assert_eq!(strategy.tx_range(), LOW_SPEED_TX_RANGE);
    }

    #[test]
    fn far_same_road_neighbor_counts() {
        let mut strategy = WhisperStrategy::new(WhisperConfig::default());
        strategy.on_message_received(
            &peer_cam(16.0, 300),
            &RxContext {
                distance_m: 150.0, // beyond general radius, within road radius
                same_road: true,
            },
        );
        strategy.evaluate(&state(2.0));
        assert_eq!(strategy.tx_range(), MAX_TX_RANGE);
    }
}

//! Vehicle state snapshot and collaborator traits.

use std::time::Duration;

use super::message::StationType;

/// Snapshot of a vehicle's state as supplied by the host mobility layer for
/// one evaluation tick. All quantities are in SI units; encoding into ETSI
/// codes happens in [`crate::cam::generate`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleState {
    /// Current pseudonymous station identifier
    pub station_id: u32,
    /// Stable mobility-layer vehicle identity
    pub vehicle_id: String,
    /// Station classification
    pub station_type: StationType,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Speed over ground in m/s
    pub speed: f64,
    /// Heading in degrees clockwise from north
    pub heading: f64,
    /// Longitudinal acceleration in m/s²
    pub acceleration: f64,
    /// Yaw rate in degrees per second, left positive
    pub yaw_rate: f64,
    /// Path curvature in 1/m
    pub curvature: f64,
    /// Vehicle length in meters
    pub length: f64,
    /// Vehicle width in meters
    pub width: f64,
    /// Current transmission range in meters
    pub tx_range: u16,
}

impl VehicleState {
    /// Straight-line distance in meters to another position given in
    /// degrees.
    #[must_use]
    pub fn distance_to(&self, latitude: f64, longitude: f64) -> f64 {
        crate::geo::distance_m(self.latitude, self.longitude, latitude, longitude)
    }
}

/// Channel-congestion collaborator: recommends the minimum spacing between
/// consecutive transmissions for the awareness traffic class.
///
/// The triggering state machine clamps the recommendation into its
/// configured interval bounds.
pub trait RateControl {
    /// Currently recommended minimum inter-message interval.
    fn recommended_interval(&self) -> Duration;
}

impl<F> RateControl for F
where
    F: Fn() -> Duration,
{
    fn recommended_interval(&self) -> Duration {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_implements_rate_control() {
        let rc = || Duration::from_millis(250);
        assert_eq!(rc.recommended_interval(), Duration::from_millis(250));
    }

    #[test]
    fn distance_between_states() {
        let state = VehicleState {
            station_id: 1,
            vehicle_id: "veh0".into(),
            station_type: StationType::PassengerCar,
            latitude: 48.74,
            longitude: 9.32,
            speed: 0.0,
            heading: 0.0,
            acceleration: 0.0,
            yaw_rate: 0.0,
            curvature: 0.0,
            length: 4.5,
            width: 1.8,
            tx_range: 300,
        };
        assert_eq!(state.distance_to(48.74, 9.32), 0.0);
        assert!(state.distance_to(48.741, 9.32) > 100.0);
    }
}

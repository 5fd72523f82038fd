//! The cooperative awareness message data model.

use super::CamError;
use super::values::{
    AltitudeValue, CurvatureValue, HeadingValue, Latitude, Longitude,
    LongitudinalAccelerationValue, SpeedValue, VehicleLengthValue, VehicleWidthValue, YawRateValue,
};

/// Hard upper bound on path history points, per EN 302 637-2.
pub const MAX_PATH_POINTS: usize = 40;

/// ITS station classification carried in the basic container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StationType {
    /// Unclassified station
    #[default]
    Unknown,
    /// Pedestrian with a handheld station
    Pedestrian,
    /// Bicycle
    Cyclist,
    /// Moped
    Moped,
    /// Motorcycle
    Motorcycle,
    /// Passenger car
    PassengerCar,
    /// Bus
    Bus,
    /// Light truck
    LightTruck,
    /// Heavy truck
    HeavyTruck,
    /// Trailer
    Trailer,
    /// Special vehicle
    SpecialVehicle,
    /// Tram
    Tram,
    /// Fixed road-side unit
    RoadSideUnit,
}

impl StationType {
    /// ETSI `StationType` integer code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Pedestrian => 1,
            Self::Cyclist => 2,
            Self::Moped => 3,
            Self::Motorcycle => 4,
            Self::PassengerCar => 5,
            Self::Bus => 6,
            Self::LightTruck => 7,
            Self::HeavyTruck => 8,
            Self::Trailer => 9,
            Self::SpecialVehicle => 10,
            Self::Tram => 11,
            Self::RoadSideUnit => 15,
        }
    }
}

/// Direction of travel relative to the vehicle's orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DriveDirection {
    /// Moving forward
    #[default]
    Forward,
    /// Reversing
    Backward,
}

/// Vehicle role carried in the low-frequency container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleRole {
    /// Ordinary vehicle
    #[default]
    Default,
    /// Public transport
    PublicTransport,
    /// Special transport
    SpecialTransport,
    /// Dangerous goods transport
    DangerousGoods,
    /// Road work vehicle
    RoadWork,
    /// Rescue vehicle
    Rescue,
    /// Emergency vehicle
    Emergency,
}

/// Exterior light state bitmask, MSB-first per the ETSI `ExteriorLights`
/// bit string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExteriorLights(u8);

impl ExteriorLights {
    /// Low beam headlights on
    pub const LOW_BEAM: u8 = 1 << 7;
    /// High beam headlights on
    pub const HIGH_BEAM: u8 = 1 << 6;
    /// Left turn signal on
    pub const LEFT_TURN_SIGNAL: u8 = 1 << 5;
    /// Right turn signal on
    pub const RIGHT_TURN_SIGNAL: u8 = 1 << 4;
    /// Daytime running lights on
    pub const DAYTIME_RUNNING: u8 = 1 << 3;
    /// Reverse light on
    pub const REVERSE: u8 = 1 << 2;
    /// Fog light on
    pub const FOG: u8 = 1 << 1;
    /// Parking lights on
    pub const PARKING: u8 = 1 << 0;

    /// No lights set.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Set a light bit.
    #[must_use]
    pub const fn with(mut self, light: u8) -> Self {
        self.0 |= light;
        self
    }

    /// Check whether a light bit is set.
    #[must_use]
    pub const fn has(self, light: u8) -> bool {
        (self.0 & light) != 0
    }

    /// Raw bitmask byte.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

/// One path history entry relative to the reference position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathPoint {
    /// Time offset to the previous point in 10 ms units
    pub path_delta_time: u16,
    /// Latitude offset in 0.1 microdegrees
    pub delta_latitude: i32,
    /// Longitude offset in 0.1 microdegrees
    pub delta_longitude: i32,
    /// Altitude offset in centimeters
    pub delta_altitude: i32,
}

impl PathPoint {
    /// `DeltaLatitude` / `DeltaLongitude` unavailable sentinel.
    pub const DELTA_POSITION_UNAVAILABLE: i32 = 131_072;
    /// `DeltaAltitude` unavailable sentinel.
    pub const DELTA_ALTITUDE_UNAVAILABLE: i32 = 12_800;

    /// A placeholder point with every delta unavailable.
    #[must_use]
    pub const fn unavailable() -> Self {
        Self {
            path_delta_time: 0,
            delta_latitude: Self::DELTA_POSITION_UNAVAILABLE,
            delta_longitude: Self::DELTA_POSITION_UNAVAILABLE,
            delta_altitude: Self::DELTA_ALTITUDE_UNAVAILABLE,
        }
    }
}

/// Geographic reference position of the sending station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferencePosition {
    /// Latitude in microdegrees
    pub latitude: Latitude,
    /// Longitude in microdegrees
    pub longitude: Longitude,
    /// Altitude in centimeters
    pub altitude: AltitudeValue,
}

/// Basic container: station classification and position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasicContainer {
    /// Station classification
    pub station_type: StationType,
    /// Reference position
    pub reference_position: ReferencePosition,
}

/// High-frequency container: the fast-changing kinematic state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HighFrequencyContainer {
    /// Heading over ground
    pub heading: HeadingValue,
    /// Speed over ground
    pub speed: SpeedValue,
    /// Travel direction
    pub drive_direction: DriveDirection,
    /// Vehicle length
    pub vehicle_length: VehicleLengthValue,
    /// Vehicle width
    pub vehicle_width: VehicleWidthValue,
    /// Longitudinal acceleration
    pub longitudinal_acceleration: LongitudinalAccelerationValue,
    /// Path curvature
    pub curvature: CurvatureValue,
    /// Yaw rate
    pub yaw_rate: YawRateValue,
}

/// Low-frequency container: slowly changing state, attached at most every
/// 500 ms.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LowFrequencyContainer {
    /// Vehicle role
    pub vehicle_role: VehicleRole,
    /// Exterior light state
    pub exterior_lights: ExteriorLights,
    /// Recent path, newest first, at most [`MAX_PATH_POINTS`] entries
    pub path_history: Vec<PathPoint>,
}

/// Simulation-side extension fields that ride along with each CAM but are
/// not part of the ETSI message (the hardware bridge strips them).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationExtension {
    /// Identifier of the emitting service instance
    pub service_id: u32,
    /// Stable mobility-layer vehicle identity
    pub vehicle_id: String,
    /// Advertised transmission range in meters
    pub tx_range: u16,
    /// Cooperative "ready for pseudonym change" advertisement
    pub ready_flag: bool,
}

/// A complete cooperative awareness message.
///
/// Constructed fresh for every generation cycle and treated as an immutable
/// snapshot once emitted or received.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AwarenessMessage {
    /// Current pseudonymous station identifier
    pub station_id: u32,
    /// Wrapping millisecond generation counter
    pub generation_delta_time: u16,
    /// Basic container
    pub basic: BasicContainer,
    /// High-frequency container
    pub high_frequency: HighFrequencyContainer,
    /// Optional low-frequency container
    pub low_frequency: Option<LowFrequencyContainer>,
    /// Simulation extension fields
    pub extension: SimulationExtension,
}

impl AwarenessMessage {
    /// Structural validation of every encoded field range.
    ///
    /// The value constructors already make out-of-range codes
    /// unrepresentable, so a failure here indicates a code-level encoding
    /// bug and must abort the run rather than be retried.
    pub fn validate(&self) -> Result<(), CamError> {
        fn check(ok: bool, what: &str) -> Result<(), CamError> {
            if ok {
                Ok(())
            } else {
                Err(CamError::Invalid(what.to_string()))
            }
        }

        let pos = &self.basic.reference_position;
        check(
            (-900_000_000..=900_000_000).contains(&pos.latitude.raw())
                || pos.latitude == Latitude::UNAVAILABLE,
            "latitude out of range",
        )?;
        check(
            (-1_800_000_000..=1_800_000_000).contains(&pos.longitude.raw())
                || pos.longitude == Longitude::UNAVAILABLE,
            "longitude out of range",
        )?;
        check(
            (-100_000..=800_000).contains(&pos.altitude.raw())
                || pos.altitude == AltitudeValue::UNAVAILABLE,
            "altitude out of range",
        )?;

        let hf = &self.high_frequency;
        check(hf.heading.raw() <= 3601, "heading out of range")?;
        check(hf.speed.raw() <= 16383, "speed out of range")?;
        check(
            (-160..=161).contains(&hf.longitudinal_acceleration.raw()),
            "longitudinal acceleration out of range",
        )?;
        check(hf.curvature.raw() <= 1023, "curvature out of range")?;
        check(
            (1..=1023).contains(&hf.vehicle_length.raw()),
            "vehicle length out of range",
        )?;
        check(
            (1..=62).contains(&hf.vehicle_width.raw()),
            "vehicle width out of range",
        )?;

        if let Some(lf) = &self.low_frequency {
            check(
                lf.path_history.len() <= MAX_PATH_POINTS,
                "path history exceeds 40 points",
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cam::values::*;

    fn sample_message() -> AwarenessMessage {
        AwarenessMessage {
            station_id: 0x1234_5678,
            generation_delta_time: 100,
            basic: BasicContainer {
                station_type: StationType::PassengerCar,
                reference_position: ReferencePosition {
                    latitude: Latitude::from_degrees(48.74),
                    longitude: Longitude::from_degrees(9.32),
                    altitude: AltitudeValue::UNAVAILABLE,
                },
            },
            high_frequency: HighFrequencyContainer {
                heading: HeadingValue::from_degrees(45.0),
                speed: SpeedValue::from_mps(13.0),
                drive_direction: DriveDirection::Forward,
                vehicle_length: VehicleLengthValue::from_meters(4.5),
                vehicle_width: VehicleWidthValue::from_meters(1.8),
                longitudinal_acceleration: LongitudinalAccelerationValue::from_mps2(0.3),
                curvature: CurvatureValue::from_inverse_meters(0.002),
                yaw_rate: YawRateValue::from_degrees_per_second(1.0),
            },
            low_frequency: None,
            extension: SimulationExtension::default(),
        }
    }

    #[test]
    fn valid_message_passes() {
        sample_message().validate().unwrap();
    }

    #[test]
    fn oversized_path_history_fails() {
        let mut msg = sample_message();
        msg.low_frequency = Some(LowFrequencyContainer {
            vehicle_role: VehicleRole::Default,
            exterior_lights: ExteriorLights::new(),
            path_history: vec![PathPoint::unavailable(); MAX_PATH_POINTS + 1],
        });
        assert!(msg.validate().is_err());
    }

    #[test]
    fn exterior_lights_bits() {
        let lights = ExteriorLights::new()
            .with(ExteriorLights::DAYTIME_RUNNING)
            .with(ExteriorLights::LEFT_TURN_SIGNAL);
        assert!(lights.has(ExteriorLights::DAYTIME_RUNNING));
        assert!(!lights.has(ExteriorLights::FOG));
        assert_eq!(lights.as_u8(), 0b0010_1000);
    }

    #[test]
    fn station_type_codes() {
        assert_eq!(StationType::Unknown.code(), 0);
        assert_eq!(StationType::PassengerCar.code(), 5);
        assert_eq!(StationType::RoadSideUnit.code(), 15);
    }
}

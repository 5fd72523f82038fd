//! ETSI value codes for CAM fields.
//!
//! Every quantity in a CAM travels as a fixed-point integer code with a
//! reserved sentinel for "unavailable". The newtypes here keep that sentinel
//! out of ordinary arithmetic: constructors clamp or saturate physical
//! quantities into the representable range, accessors hand back an `Option`,
//! and the raw code only surfaces at the encoding boundary. A constructed
//! value is always either the sentinel or in range.

/// Speed in centimeters per second (0..=16382), per CDD A.74.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedValue(u16);

impl SpeedValue {
    /// Sentinel for an unknown speed.
    pub const UNAVAILABLE: Self = Self(16383);
    /// Saturation code for speeds at or above 163.82 m/s.
    pub const MAX: Self = Self(16382);

    /// Encode a speed in meters per second.
    ///
    /// Negative or non-finite input maps to [`Self::UNAVAILABLE`]; speeds at
    /// or above 163.82 m/s saturate to [`Self::MAX`]; everything else is
    /// rounded to the nearest 0.01 m/s.
    #[must_use]
    pub fn from_mps(mps: f64) -> Self {
        if !mps.is_finite() || mps < 0.0 {
            Self::UNAVAILABLE
        } else if mps >= 163.82 {
            Self::MAX
        } else {
            Self((mps * 100.0).round() as u16)
        }
    }

    /// Raw wire code.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Speed in cm/s, or `None` when unavailable.
    #[must_use]
    pub const fn centimeters_per_second(self) -> Option<u16> {
        if self.0 == Self::UNAVAILABLE.0 {
            None
        } else {
            Some(self.0)
        }
    }

    /// Speed in m/s, or `None` when unavailable.
    #[must_use]
    pub fn meters_per_second(self) -> Option<f64> {
        self.centimeters_per_second()
            .map(|cm| f64::from(cm) / 100.0)
    }
}

/// Heading in 0.1 degree units clockwise from north (0..=3599).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeadingValue(u16);

impl HeadingValue {
    /// Sentinel for an unknown heading.
    pub const UNAVAILABLE: Self = Self(3601);

    /// Encode a heading in degrees; the value is normalized into [0°, 360°).
    #[must_use]
    pub fn from_degrees(deg: f64) -> Self {
        if !deg.is_finite() {
            return Self::UNAVAILABLE;
        }
        let code = (deg.rem_euclid(360.0) * 10.0).round() as u16;
        // rounding 359.96..=359.99 lands on the wrap point
        Self(if code >= 3600 { 0 } else { code })
    }

    /// Raw wire code.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Heading in 0.1° units, or `None` when unavailable.
    #[must_use]
    pub const fn decidegrees(self) -> Option<u16> {
        if self.0 == Self::UNAVAILABLE.0 {
            None
        } else {
            Some(self.0)
        }
    }
}

/// Longitudinal acceleration in 0.1 m/s² units (-160..=160).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LongitudinalAccelerationValue(i16);

impl LongitudinalAccelerationValue {
    /// Sentinel for an unknown acceleration.
    pub const UNAVAILABLE: Self = Self(161);

    /// Encode an acceleration in m/s².
    ///
    /// Out-of-range values map to the sentinel rather than saturating:
    /// mobility backends can swap vehicles between lanes and produce
    /// teleportation-grade velocity discontinuities that must not be
    /// advertised as real dynamics.
    #[must_use]
    pub fn from_mps2(mps2: f64) -> Self {
        if !mps2.is_finite() {
            return Self::UNAVAILABLE;
        }
        let code = (mps2 * 10.0).round();
        if (-160.0..=160.0).contains(&code) {
            Self(code as i16)
        } else {
            Self::UNAVAILABLE
        }
    }

    /// Raw wire code.
    #[must_use]
    pub const fn raw(self) -> i16 {
        self.0
    }

    /// Acceleration in 0.1 m/s² units, or `None` when unavailable.
    #[must_use]
    pub const fn deci_mps2(self) -> Option<i16> {
        if self.0 == Self::UNAVAILABLE.0 {
            None
        } else {
            Some(self.0)
        }
    }
}

/// Yaw rate in 0.01 degrees per second, positive to the left (±32766).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct YawRateValue(i16);

impl YawRateValue {
    /// Sentinel for an unknown yaw rate.
    pub const UNAVAILABLE: Self = Self(32767);

    /// Encode a yaw rate in degrees per second (left positive).
    #[must_use]
    pub fn from_degrees_per_second(dps: f64) -> Self {
        if !dps.is_finite() {
            return Self::UNAVAILABLE;
        }
        let code = (dps * 100.0).round();
        if (-32766.0..=32766.0).contains(&code) {
            Self(code as i16)
        } else {
            Self::UNAVAILABLE
        }
    }

    /// Raw wire code.
    #[must_use]
    pub const fn raw(self) -> i16 {
        self.0
    }

    /// Yaw rate in 0.01°/s units, or `None` when unavailable.
    #[must_use]
    pub const fn centi_dps(self) -> Option<i16> {
        if self.0 == Self::UNAVAILABLE.0 {
            None
        } else {
            Some(self.0)
        }
    }
}

/// Absolute curvature scaled by 10000, saturated at 1023 (which doubles as
/// the unavailable sentinel).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvatureValue(u16);

impl CurvatureValue {
    /// Saturation / unavailable code.
    pub const UNAVAILABLE: Self = Self(1023);

    /// Encode a curvature in 1/m; the sign is dropped and the magnitude
    /// saturates at the maximum code.
    #[must_use]
    pub fn from_inverse_meters(curvature: f64) -> Self {
        if !curvature.is_finite() {
            return Self::UNAVAILABLE;
        }
        let code = (curvature.abs() * 10000.0).round();
        Self(if code >= 1023.0 { 1023 } else { code as u16 })
    }

    /// Raw wire code.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

/// Latitude in microdegrees north (±900000000).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Latitude(i32);

impl Latitude {
    /// Sentinel for an unknown latitude.
    pub const UNAVAILABLE: Self = Self(900_000_001);

    /// Encode a latitude in degrees.
    #[must_use]
    pub fn from_degrees(deg: f64) -> Self {
        if !deg.is_finite() {
            return Self::UNAVAILABLE;
        }
        let code = (deg * 1_000_000.0).round();
        if (-900_000_000.0..=900_000_000.0).contains(&code) {
            Self(code as i32)
        } else {
            Self::UNAVAILABLE
        }
    }

    /// Raw wire code.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Latitude in degrees, or `None` when unavailable.
    #[must_use]
    pub fn degrees(self) -> Option<f64> {
        if self == Self::UNAVAILABLE {
            None
        } else {
            Some(f64::from(self.0) / 1_000_000.0)
        }
    }
}

/// Longitude in microdegrees east (±1800000000).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Longitude(i32);

impl Longitude {
    /// Sentinel for an unknown longitude.
    pub const UNAVAILABLE: Self = Self(1_800_000_001);

    /// Encode a longitude in degrees.
    #[must_use]
    pub fn from_degrees(deg: f64) -> Self {
        if !deg.is_finite() {
            return Self::UNAVAILABLE;
        }
        let code = (deg * 1_000_000.0).round();
        if (-1_800_000_000.0..=1_800_000_000.0).contains(&code) {
            Self(code as i32)
        } else {
            Self::UNAVAILABLE
        }
    }

    /// Raw wire code.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Longitude in degrees, or `None` when unavailable.
    #[must_use]
    pub fn degrees(self) -> Option<f64> {
        if self == Self::UNAVAILABLE {
            None
        } else {
            Some(f64::from(self.0) / 1_000_000.0)
        }
    }
}

/// Altitude in centimeters above the WGS-84 ellipsoid (-100000..=800000).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AltitudeValue(i32);

impl AltitudeValue {
    /// Sentinel for an unknown altitude.
    pub const UNAVAILABLE: Self = Self(800_001);

    /// Encode an altitude in meters.
    #[must_use]
    pub fn from_meters(m: f64) -> Self {
        if !m.is_finite() {
            return Self::UNAVAILABLE;
        }
        let code = (m * 100.0).round();
        if (-100_000.0..=800_000.0).contains(&code) {
            Self(code as i32)
        } else {
            Self::UNAVAILABLE
        }
    }

    /// Raw wire code.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }
}

/// Vehicle length in 0.1 m units (1..=1021).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleLengthValue(u16);

impl VehicleLengthValue {
    /// Sentinel for an unknown length.
    pub const UNAVAILABLE: Self = Self(1023);
    /// Sentinel for a length the standard cannot represent.
    pub const OUT_OF_RANGE: Self = Self(1022);

    /// Encode a vehicle length in meters, truncating to whole decimeters.
    #[must_use]
    pub fn from_meters(m: f64) -> Self {
        if !m.is_finite() {
            return Self::UNAVAILABLE;
        }
        let dm = ((m * 100.0) as i64) / 10;
        if dm >= i64::from(Self::OUT_OF_RANGE.0) {
            Self::OUT_OF_RANGE
        } else if dm <= 0 {
            Self::UNAVAILABLE
        } else {
            Self(dm as u16)
        }
    }

    /// Raw wire code.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

/// Vehicle width in 0.1 m units (1..=60).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleWidthValue(u16);

impl VehicleWidthValue {
    /// Sentinel for an unknown width.
    pub const UNAVAILABLE: Self = Self(62);
    /// Sentinel for a width the standard cannot represent.
    pub const OUT_OF_RANGE: Self = Self(61);

    /// Encode a vehicle width in meters, truncating to whole decimeters.
    #[must_use]
    pub fn from_meters(m: f64) -> Self {
        if !m.is_finite() {
            return Self::UNAVAILABLE;
        }
        let dm = ((m * 100.0) as i64) / 10;
        if dm >= i64::from(Self::OUT_OF_RANGE.0) {
            Self::OUT_OF_RANGE
        } else if dm <= 0 {
            Self::UNAVAILABLE
        } else {
            Self(dm as u16)
        }
    }

    /// Raw wire code.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

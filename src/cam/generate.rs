//! CAM assembly from live vehicle state.

use tracing::warn;

use super::CamError;
use super::message::{
    AwarenessMessage, BasicContainer, DriveDirection, ExteriorLights, HighFrequencyContainer,
    LowFrequencyContainer, MAX_PATH_POINTS, PathPoint, ReferencePosition, SimulationExtension,
    VehicleRole,
};
use super::values::{
    AltitudeValue, CurvatureValue, HeadingValue, Latitude, Longitude,
    LongitudinalAccelerationValue, SpeedValue, VehicleLengthValue, VehicleWidthValue, YawRateValue,
};
use super::vehicle::VehicleState;

/// Build a complete high-frequency CAM from the current vehicle state.
///
/// Every physical quantity is converted through the range-checked value
/// codes; anything the standard cannot represent becomes the field's
/// unavailable sentinel rather than an error. The finished message is
/// validated before it is returned: a validation failure here is an
/// encoding bug, not transient data, and the caller must treat it as fatal.
pub fn build_cam(
    state: &VehicleState,
    generation_delta_time: u16,
) -> Result<AwarenessMessage, CamError> {
    let message = AwarenessMessage {
        station_id: state.station_id,
        generation_delta_time,
        basic: BasicContainer {
            station_type: state.station_type,
            reference_position: ReferencePosition {
                latitude: Latitude::from_degrees(state.latitude),
                longitude: Longitude::from_degrees(state.longitude),
                altitude: AltitudeValue::UNAVAILABLE,
            },
        },
        high_frequency: HighFrequencyContainer {
            heading: HeadingValue::from_degrees(state.heading),
            speed: SpeedValue::from_mps(state.speed),
            drive_direction: if state.speed >= 0.0 {
                DriveDirection::Forward
            } else {
                DriveDirection::Backward
            },
            vehicle_length: VehicleLengthValue::from_meters(state.length),
            vehicle_width: VehicleWidthValue::from_meters(state.width),
            longitudinal_acceleration: LongitudinalAccelerationValue::from_mps2(
                state.acceleration,
            ),
            curvature: CurvatureValue::from_inverse_meters(state.curvature),
            yaw_rate: YawRateValue::from_degrees_per_second(state.yaw_rate),
        },
        low_frequency: None,
        extension: SimulationExtension {
            service_id: 0,
            vehicle_id: state.vehicle_id.clone(),
            tx_range: state.tx_range,
            ready_flag: false,
        },
    };

    message.validate()?;
    Ok(message)
}

/// Attach the low-frequency container to a freshly built CAM.
///
/// `path_history_length` is capped at [`MAX_PATH_POINTS`]; the points are
/// delta-unavailable placeholders since the simulation does not reconstruct
/// real traces. The message is re-validated afterwards.
pub fn attach_low_frequency(
    message: &mut AwarenessMessage,
    path_history_length: usize,
) -> Result<(), CamError> {
    let len = if path_history_length > MAX_PATH_POINTS {
        warn!(
            requested = path_history_length,
            max = MAX_PATH_POINTS,
            "path history capped"
        );
        MAX_PATH_POINTS
    } else {
        path_history_length
    };

    message.low_frequency = Some(LowFrequencyContainer {
        vehicle_role: VehicleRole::Default,
        exterior_lights: ExteriorLights::new().with(ExteriorLights::DAYTIME_RUNNING),
        path_history: vec![PathPoint::unavailable(); len],
    });

    message.validate()
}

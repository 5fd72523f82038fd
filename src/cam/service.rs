//! The cooperative awareness service.
//!
//! One [`CaService`] per vehicle. The host advances it on every simulation
//! update step via [`CaService::tick`] and feeds every reception through
//! [`CaService::handle_received`]; the service runs the triggering rules,
//! the pseudonym-change strategy and the emission log, and hands finished
//! messages back to the host for actual radio transmission.

use tracing::{debug, trace, warn};
use uuid::Uuid;

use super::generate::{attach_low_frequency, build_cam};
use super::logger::CamLog;
use super::message::AwarenessMessage;
use super::trigger::{CamTrigger, TriggerConfig};
use super::vehicle::{RateControl, VehicleState};
use super::CamError;
use crate::geo;
use crate::pseudonym::{RxContext, Strategy};
use crate::time::SimTime;

/// Observer of the service's message flow.
///
/// Both hooks default to no-ops so a listener can subscribe to one side
/// only.
pub trait CamListener {
    /// A CAM was generated and handed to the host for transmission.
    fn on_cam_sent(&mut self, message: &AwarenessMessage, at: SimTime) {
        let _ = (message, at);
    }

    /// A CAM from another station was accepted.
    fn on_cam_received(&mut self, message: &AwarenessMessage, at: SimTime) {
        let _ = (message, at);
    }
}

/// Service construction parameters.
#[derive(Debug, Default)]
pub struct CaServiceConfig {
    /// Identifier stamped into every emitted message's extension
    pub service_id: u32,
    /// Generation triggering parameters
    pub trigger: TriggerConfig,
}

/// Per-vehicle CAM generation and consumption.
pub struct CaService {
    service_id: u32,
    trigger: CamTrigger,
    strategy: Option<Strategy>,
    log: Option<CamLog>,
    listeners: Vec<Box<dyn CamListener>>,
    pseudonym_changes: u64,
}

impl CaService {
    /// Create the service at simulation time `now`.
    #[must_use]
    pub fn new(config: CaServiceConfig, now: SimTime) -> Self {
        Self {
            service_id: config.service_id,
            trigger: CamTrigger::new(config.trigger, now),
            strategy: None,
            log: None,
            listeners: Vec::new(),
            pseudonym_changes: 0,
        }
    }

    /// Install a pseudonym-change strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Attach an emission log.
    #[must_use]
    pub fn with_log(mut self, log: CamLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Subscribe a listener to sent and received messages.
    pub fn add_listener(&mut self, listener: Box<dyn CamListener>) {
        self.listeners.push(listener);
    }

    /// Advance the service by one host update step.
    ///
    /// Runs the pseudonym strategy's cycle (possibly rotating the station
    /// identifier in `state`), then the triggering rules. Returns the CAM
    /// to transmit, or `None` when nothing is due or transmission is
    /// suppressed. `rate` is the optional congestion-control collaborator.
    pub fn tick(
        &mut self,
        now: SimTime,
        state: &mut VehicleState,
        rate: Option<&dyn RateControl>,
    ) -> Result<Option<AwarenessMessage>, CamError> {
        if let Some(strategy) = &mut self.strategy {
            if strategy.evaluate(now, state) {
                let old = state.station_id;
                state.station_id = fresh_pseudonym();
                self.pseudonym_changes += 1;
                debug!(
                    vehicle = %state.vehicle_id,
                    old_pseudonym = old,
                    new_pseudonym = state.station_id,
                    "pseudonym changed"
                );
            }
            if let Some(range) = strategy.tx_range() {
                state.tx_range = range;
            }
            if strategy.suppresses_transmission(state) {
                trace!(vehicle = %state.vehicle_id, "transmission suppressed");
                return Ok(None);
            }
        }

        let Some(plan) = self.trigger.check(now, state, rate) else {
            return Ok(None);
        };

        let mut message = build_cam(state, now.generation_delta_time())?;
        if plan.include_low_frequency {
            attach_low_frequency(&mut message, self.trigger.config().path_history_length)?;
        }
        message.extension.service_id = self.service_id;
        if let Some(strategy) = &mut self.strategy {
            message.extension.ready_flag = strategy.take_ready_flag();
        }

        if let Some(log) = &mut self.log {
            log.log(&message, now)?;
        }
        for listener in &mut self.listeners {
            listener.on_cam_sent(&message, now);
        }
        trace!(
            vehicle = %state.vehicle_id,
            reason = ?plan.reason,
            low_frequency = plan.include_low_frequency,
            "cam generated"
        );
        Ok(Some(message))
    }

    /// Process a CAM received from another station.
    ///
    /// `same_road` comes from the host's road topology; the reception
    /// distance is recomputed here from the message's own reference
    /// position so strategies see the geometry the sender encoded.
    pub fn handle_received(
        &mut self,
        message: &AwarenessMessage,
        now: SimTime,
        state: &VehicleState,
        same_road: bool,
    ) {
        let pos = &message.basic.reference_position;
        let (Some(lat), Some(lon)) = (pos.latitude.degrees(), pos.longitude.degrees()) else {
            warn!(station = message.station_id, "cam without position, ignored");
            return;
        };
        let ctx = RxContext {
            distance_m: geo::distance_m(state.latitude, state.longitude, lat, lon),
            same_road,
        };
        if let Some(strategy) = &mut self.strategy {
            strategy.on_message_received(message, &ctx);
        }
        for listener in &mut self.listeners {
            listener.on_cam_received(message, now);
        }
    }

    /// Flush the emission log, if one is attached.
    pub fn flush_log(&mut self) -> Result<(), CamError> {
        if let Some(log) = &mut self.log {
            log.flush()?;
        }
        Ok(())
    }

    /// Pseudonym changes performed so far.
    #[must_use]
    pub fn pseudonym_changes(&self) -> u64 {
        self.pseudonym_changes
    }

    /// The triggering state machine.
    #[must_use]
    pub fn trigger(&self) -> &CamTrigger {
        &self.trigger
    }
}

impl std::fmt::Debug for CaService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaService")
            .field("service_id", &self.service_id)
            .field("trigger", &self.trigger)
            .field("strategy", &self.strategy)
            .field("listeners", &self.listeners.len())
            .field("pseudonym_changes", &self.pseudonym_changes)
            .finish_non_exhaustive()
    }
}

/// Draw a fresh random station identifier.
///
/// The low 32 bits of a v4 UUID give an identifier that is unlinkable to
/// the previous one without any coordination between vehicles.
fn fresh_pseudonym() -> u32 {
    let (_, low) = Uuid::new_v4().as_u64_pair();
    #[allow(clippy::cast_possible_truncation)]
    let id = low as u32;
    id
}

//! Pseudonym-change strategies.
//!
//! A pseudonym is the rotating station identifier a vehicle broadcasts in
//! its CAMs; changing it at the right moment is what provides privacy. The
//! strategies here decide *when* to change. They share one contract:
//! [`Strategy::evaluate`] is polled once per generation-triggering cycle,
//! [`Strategy::on_message_received`] observes every accepted CAM, and a
//! granted change resets the strategy's own cooldown state before it can
//! fire again.
//!
//! Dispatch is a closed enum over the known strategy set rather than an open
//! trait-object hierarchy; each variant owns its private accumulator.

mod cooperative;
mod slow;
mod whisper;

pub use cooperative::{CooperativeConfig, CooperativeStrategy};
pub use slow::{SlowConfig, SlowStrategy};
pub use whisper::{WhisperConfig, WhisperStrategy};

use crate::cam::message::AwarenessMessage;
use crate::cam::vehicle::VehicleState;
use crate::time::SimTime;

/// Reception context supplied by the host alongside each received CAM.
///
/// Distance and road topology live with the mobility layer, not with the
/// strategies, so the host computes them once per reception.
#[derive(Debug, Clone, Copy)]
pub struct RxContext {
    /// Distance between receiver and sender in meters
    pub distance_m: f64,
    /// Whether both vehicles travel on the same road
    pub same_road: bool,
}

/// The pseudonym-change strategy family.
#[derive(Debug)]
pub enum Strategy {
    /// Time- and speed-gated change (SLOW)
    Slow(SlowStrategy),
    /// Neighbor-count cooperative change (CPN)
    Cooperative(CooperativeStrategy),
    /// Speed-adaptive transmission-range change (Whisper)
    Whisper(WhisperStrategy),
    /// Any-of combination of other strategies
    Composite(Vec<Strategy>),
}

impl Strategy {
    /// Decide whether the pseudonym should change now.
    ///
    /// Must be called exactly once per triggering cycle: several variants
    /// use the call as their cycle boundary (counter decrements, neighbor
    /// count resets). A `true` return has already reset the strategy's
    /// internal cooldown.
    pub fn evaluate(&mut self, now: SimTime, state: &VehicleState) -> bool {
        match self {
            Self::Slow(s) => s.evaluate(now, state),
            Self::Cooperative(s) => s.evaluate(),
            Self::Whisper(s) => s.evaluate(state),
            Self::Composite(children) => {
                let mut due = false;
                for child in children {
                    // every child must see its cycle tick
                    due |= child.evaluate(now, state);
                }
                due
            }
        }
    }

    /// Feed a received CAM into the strategy's accumulator.
    pub fn on_message_received(&mut self, message: &AwarenessMessage, ctx: &RxContext) {
        match self {
            Self::Slow(_) => {}
            Self::Cooperative(s) => s.on_message_received(message, ctx),
            Self::Whisper(s) => s.on_message_received(message, ctx),
            Self::Composite(children) => {
                for child in children {
                    child.on_message_received(message, ctx);
                }
            }
        }
    }

    /// Consume the cooperative "ready" advertisement for the next outgoing
    /// CAM, if one is pending.
    pub fn take_ready_flag(&mut self) -> bool {
        match self {
            Self::Slow(_) | Self::Whisper(_) => false,
            Self::Cooperative(s) => s.take_ready_flag(),
            Self::Composite(children) => {
                let mut ready = false;
                for child in children {
                    ready |= child.take_ready_flag();
                }
                ready
            }
        }
    }

    /// Whether outgoing transmission must currently be suppressed.
    #[must_use]
    pub fn suppresses_transmission(&self, state: &VehicleState) -> bool {
        match self {
            Self::Slow(s) => s.is_slow(state),
            Self::Cooperative(_) | Self::Whisper(_) => false,
            Self::Composite(children) => children
                .iter()
                .any(|child| child.suppresses_transmission(state)),
        }
    }

    /// Transmission range the next CAM should advertise, if this strategy
    /// manages one.
    #[must_use]
    pub fn tx_range(&self) -> Option<u16> {
        match self {
            Self::Slow(_) | Self::Cooperative(_) => None,
            Self::Whisper(s) => Some(s.tx_range()),
            Self::Composite(children) => children.iter().find_map(Strategy::tx_range),
        }
    }
}

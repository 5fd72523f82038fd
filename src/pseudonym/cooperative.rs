//! Cooperative pseudonym-change strategy (CPN).
//!
//! Vehicles count neighbors per generation cycle. Once enough neighbors are
//! around, a vehicle advertises a "ready" flag in its next CAM and marks its
//! own change as due; peers that see an advertised flag join in, so whole
//! clusters rotate their pseudonyms together and an observer cannot pair old
//! and new identifiers one-to-one.

use crate::cam::message::AwarenessMessage;
use super::RxContext;

/// CPN strategy parameters.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CooperativeConfig {
    /// Distance within which a sender counts as a neighbor, meters
    pub neighbor_radius: f64,
    /// Neighbor count per cycle that triggers a cooperative change
    pub neighbor_threshold: u16,
}

impl Default for CooperativeConfig {
    fn default() -> Self {
        Self {
            neighbor_radius: 100.0,
            neighbor_threshold: 3,
        }
    }
}

/// Per-vehicle CPN accumulator.
#[derive(Debug)]
pub struct CooperativeStrategy {
    config: CooperativeConfig,
    neighbor_count: u16,
    change_due: bool,
    advertise_ready: bool,
}

impl CooperativeStrategy {
    /// Create the strategy.
    #[must_use]
    pub fn new(config: CooperativeConfig) -> Self {
        Self {
            config,
            neighbor_count: 0,
            change_due: false,
            advertise_ready: false,
        }
    }

    /// Count the sender as a neighbor when in radius and react to an
    /// advertised ready flag.
    pub fn on_message_received(&mut self, message: &AwarenessMessage, ctx: &RxContext) {
        if ctx.distance_m > self.config.neighbor_radius {
            return;
        }

        self.neighbor_count += 1;

        if message.extension.ready_flag {
            // a peer initiated a cooperative change
            self.change_due = true;
        }

        if self.neighbor_count >= self.config.neighbor_threshold {
            self.advertise_ready = true;
            self.change_due = true;
        }
    }

    /// Cycle boundary: resets the neighbor counter and grants the change if
    /// one became due since the last cycle.
    pub fn evaluate(&mut self) -> bool {
        self.neighbor_count = 0;
        std::mem::take(&mut self.change_due)
    }

    /// Consume the pending ready advertisement for the next outgoing CAM.
    pub fn take_ready_flag(&mut self) -> bool {
        std::mem::take(&mut self.advertise_ready)
    }

    /// Neighbors seen in the current cycle.
    #[must_use]
    pub fn neighbor_count(&self) -> u16 {
        self.neighbor_count
    }
}

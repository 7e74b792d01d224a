// src/config.rs

//! Bridge configuration.
//!
//! Deserializable so the embedding process can carry these knobs in its own
//! config file; every field has a sensible default and the whole struct can
//! be omitted.

use serde::{Deserialize, Serialize};

use crate::device::DisplaySlot;

/// Tunables for a `CompositionBridge`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BridgeConfig {
    /// When set, every prepare/set for this slot logs a per-layer dump at
    /// trace level. Intended for bringing up an external or virtual
    /// display, where the submitted lists are otherwise invisible.
    pub dump_slot: Option<DisplaySlot>,
}

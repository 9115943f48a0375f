use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::state_machine::ProductState;

/// The product kinds the simulation can trade.
///
/// A kind bundles everything that was fixed per product: the display name,
/// the price, the canonical lifecycle sequence, and the parameter tables the
/// intermediate parties record when they take custody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductKind {
    Apple,
    Milk,
    Pork,
}

const APPLE_STATES: [ProductState; 7] = [
    ProductState::Growing,
    ProductState::Collected,
    ProductState::Stored,
    ProductState::Processed,
    ProductState::Delivered,
    ProductState::Packed,
    ProductState::Sold,
];

const MILK_STATES: [ProductState; 6] = [
    ProductState::Collected,
    ProductState::Stored,
    ProductState::Processed,
    ProductState::Delivered,
    ProductState::Packed,
    ProductState::Sold,
];

const PORK_STATES: [ProductState; 7] = [
    ProductState::Alive,
    ProductState::Raw,
    ProductState::Stored,
    ProductState::Processed,
    ProductState::Delivered,
    ProductState::Packed,
    ProductState::Sold,
];

impl ProductKind {
    /// Every kind in the catalog.
    pub const ALL: [ProductKind; 3] = [ProductKind::Apple, ProductKind::Milk, ProductKind::Pork];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Apple => "Apple",
            Self::Milk => "Milk",
            Self::Pork => "Pork",
        }
    }

    /// Fixed price per unit.
    pub fn price(&self) -> u32 {
        match self {
            Self::Apple => 20,
            Self::Milk => 45,
            Self::Pork => 80,
        }
    }

    /// Case-insensitive catalog lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// The canonical ordered lifecycle sequence for this kind.
    pub fn states(&self) -> &'static [ProductState] {
        match self {
            Self::Apple => &APPLE_STATES,
            Self::Milk => &MILK_STATES,
            Self::Pork => &PORK_STATES,
        }
    }

    /// The state a freshly manufactured unit starts in.
    pub fn initial_state(&self) -> ProductState {
        self.states()[0]
    }

    /// The state in which a unit leaves the producer, immediately before
    /// storage takes over.
    pub fn farm_gate_state(&self) -> ProductState {
        match self {
            Self::Apple | Self::Milk => ProductState::Collected,
            Self::Pork => ProductState::Raw,
        }
    }

    /// Conditions the storage party records when it takes custody:
    /// humidity (%), temperature (°C), and storage time (days).
    pub fn storage_parameters(&self) -> BTreeMap<String, i64> {
        match self {
            Self::Apple => parameters(&[("humidity", 90), ("temperature", 2), ("time", 120)]),
            Self::Milk => parameters(&[("humidity", 50), ("temperature", 4), ("time", 10)]),
            Self::Pork => parameters(&[("humidity", 80), ("temperature", -2), ("time", 30)]),
        }
    }

    /// Parameters the processor records: processing temperature (°C) and
    /// duration (hours).
    pub fn processing_parameters(&self) -> BTreeMap<String, i64> {
        match self {
            Self::Apple => parameters(&[("temperature", 18), ("duration_hours", 2)]),
            Self::Milk => parameters(&[("temperature", 72), ("duration_hours", 1)]),
            Self::Pork => parameters(&[("temperature", 110), ("duration_hours", 6)]),
        }
    }

    /// Parameters the seller records when packing the unit.
    pub fn selling_parameters(&self) -> BTreeMap<String, i64> {
        match self {
            Self::Apple => parameters(&[("shelf_life_days", 30), ("units_per_pack", 6)]),
            Self::Milk => parameters(&[("shelf_life_days", 7), ("units_per_pack", 1)]),
            Self::Pork => parameters(&[("shelf_life_days", 5), ("units_per_pack", 1)]),
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn parameters(entries: &[(&str, i64)]) -> BTreeMap<String, i64> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), *value))
        .collect()
}

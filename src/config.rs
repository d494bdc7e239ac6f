use serde::{Deserialize, Serialize};

/// Whether the grid may reallocate when live content reaches its edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Growth {
    /// Fixed physical size for the whole lifetime of the automaton.
    Bounded,
    /// Grow (roughly doubling in area) whenever the boundary check trips.
    Unbounded,
}

/// Tunable engine parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub growth: Growth,
    /// Target area multiplier for one growth event; each axis scales by
    /// its square root, rounded down.
    pub growth_factor: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            growth: Growth::Bounded,
            growth_factor: 2.0,
        }
    }
}

impl Settings {
    pub fn unbounded() -> Self {
        Self {
            growth: Growth::Unbounded,
            ..Self::default()
        }
    }
}

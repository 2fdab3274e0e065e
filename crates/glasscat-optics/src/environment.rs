//! Ambient conditions an index query is evaluated under.

use serde::{Deserialize, Serialize};

use crate::air::STANDARD_PRESSURE;

/// Temperature and pressure of the air surrounding the glass.
///
/// Passed explicitly to every index query. A catalog holds one default
/// environment so that changing it affects all of its glasses at once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Ambient temperature (°C).
    pub temperature: f64,
    /// Ambient air pressure (Pa).
    pub pressure: f64,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            temperature: 25.0,
            pressure: STANDARD_PRESSURE,
        }
    }
}

impl Environment {
    /// Standard pressure at the given temperature.
    pub fn at_temperature(temperature: f64) -> Self {
        Self {
            temperature,
            ..Default::default()
        }
    }

    /// Replace the temperature, keeping the pressure.
    pub fn with_temperature(self, temperature: f64) -> Self {
        Self { temperature, ..self }
    }
}

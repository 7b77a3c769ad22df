//! Epidemic parameters.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ModelError, ModelResult};

/// The four SIR attributes.
///
/// Missing fields take their defaults, so `{}` is a valid attribute block.
/// Field names follow the scenario files' camelCase spelling; the snake_case
/// spelling is accepted too.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SirParams {
    /// Minimum number of pedestrians infected on arrival, regardless of the
    /// random draw.  Default: 10.
    #[serde(alias = "infections_at_start")]
    pub infections_at_start: u32,

    /// Probability in `[0, 1]` used both for the start-up draw and for every
    /// infection trial.  Default: 0.5.
    #[serde(alias = "infection_rate")]
    pub infection_rate: f64,

    /// Contact radius in metres (inclusive).  Default: 1.0.
    #[serde(alias = "infection_max_distance")]
    pub infection_max_distance: f64,

    /// Per-interval recovery probability in `[0, 1]`.  Default: 0.0.
    #[serde(alias = "recovery_rate")]
    pub recovery_rate: f64,
}

impl Default for SirParams {
    fn default() -> Self {
        Self {
            infections_at_start:    10,
            infection_rate:         0.5,
            infection_max_distance: 1.0,
            recovery_rate:          0.0,
        }
    }
}

impl SirParams {
    /// Reject probabilities outside `[0, 1]` and non-positive radii.
    pub fn validate(&self) -> ModelResult<()> {
        check_probability("infectionRate", self.infection_rate)?;
        check_probability("recoveryRate", self.recovery_rate)?;
        let d = self.infection_max_distance;
        if !d.is_finite() || d <= 0.0 {
            return Err(ModelError::Config(format!(
                "infectionMaxDistance must be positive and finite, got {d}"
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON attribute block.
    pub fn from_json_str(json: &str) -> ModelResult<Self> {
        let params: SirParams = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Read, parse and validate a JSON attribute file.
    pub fn from_json_path(path: impl AsRef<Path>) -> ModelResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

fn check_probability(name: &str, p: f64) -> ModelResult<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(ModelError::Config(format!("{name} must lie in [0, 1], got {p}")))
    }
}

use serde::{Deserialize, Serialize};

use crate::error::{FarmError, Result};
use crate::material::FilamentProfile;

/// A unit of fabrication work. Immutable once created; ownership moves from
/// the farm pool into a printer queue and finally into execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintJob {
    pub id: u32,
    pub model_name: String,
    pub est_minutes: u32,
    pub filament: FilamentProfile,
    pub gcode_lines: Vec<String>,
}

impl PrintJob {
    pub fn new(
        id: u32,
        model_name: impl Into<String>,
        est_minutes: u32,
        filament: FilamentProfile,
        gcode_lines: Vec<String>,
    ) -> Self {
        Self {
            id,
            model_name: model_name.into(),
            est_minutes,
            filament,
            gcode_lines,
        }
    }

    /// One-line description used in queue and history entries.
    pub fn summary(&self) -> String {
        format!(
            "Job#{}: {}, {} min, filament={}",
            self.id, self.model_name, self.est_minutes, self.filament.material
        )
    }

    /// Structural validation used by batch admission.
    pub fn validate(&self) -> Result<()> {
        if self.est_minutes == 0 {
            return Err(FarmError::InvalidJob {
                id: self.id,
                reason: "estimated duration must be at least one minute".to_string(),
            });
        }
        Ok(())
    }
}

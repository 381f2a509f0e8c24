use serde::{Deserialize, Serialize};

/// A filament or resin profile attached to a job.
///
/// The scheduling core treats this as an opaque payload; only the demo and
/// the service-job defaults ever construct one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilamentProfile {
    pub name: String,
    pub material: String,
    pub nozzle_temp_c: i32,
    pub bed_temp_c: i32,
    pub density_g_cm3: f64,
}

impl FilamentProfile {
    pub fn new(
        name: impl Into<String>,
        material: impl Into<String>,
        nozzle_temp_c: i32,
        bed_temp_c: i32,
        density_g_cm3: f64,
    ) -> Self {
        Self {
            name: name.into(),
            material: material.into(),
            nozzle_temp_c,
            bed_temp_c,
            density_g_cm3,
        }
    }
}

impl std::fmt::Display for FilamentProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}): nozzle {}°C, bed {}°C, density {} g/cm³",
            self.name, self.material, self.nozzle_temp_c, self.bed_temp_c, self.density_g_cm3
        )
    }
}

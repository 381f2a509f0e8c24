use rand::Rng;

use crate::material::FilamentProfile;
use crate::printer::job::PrintJob;

pub const DEFAULT_ADMIN_PIN: &str = "0420";

/// Service jobs synthesized from raw g-code carry ids from this range so
/// they are easy to tell apart from operator-submitted work.
pub const SERVICE_JOB_ID_MIN: u32 = 9000;
pub const SERVICE_JOB_ID_MAX: u32 = 9999;

/// Defaults for jobs synthesized by `admit_raw`.
///
/// A raw admission carries only instruction lines; everything else about the
/// job comes from here.
#[derive(Debug, Clone)]
pub struct ServiceJobConfig {
    /// Display name given to synthesized jobs
    pub model_name: String,
    /// Fixed small duration, in minutes
    pub est_minutes: u32,
    /// Material profile attached to synthesized jobs
    pub filament: FilamentProfile,
    /// Instruction lines used when the raw input is blank
    pub default_gcode: Vec<String>,
}

impl Default for ServiceJobConfig {
    fn default() -> Self {
        Self {
            model_name: "ServiceMacro".to_string(),
            est_minutes: 2,
            filament: FilamentProfile::new("ServicePLA", "PLA", 200, 60, 1.24),
            default_gcode: vec!["G28".to_string(), "M84".to_string()],
        }
    }
}

impl ServiceJobConfig {
    /// Build a service job from raw instruction text. Blank input falls back
    /// to the default instruction sequence.
    pub fn synthesize(&self, gcode: &str) -> PrintJob {
        let gcode_lines = if gcode.trim().is_empty() {
            self.default_gcode.clone()
        } else {
            gcode.lines().map(str::to_string).collect()
        };
        let id = rand::thread_rng().gen_range(SERVICE_JOB_ID_MIN..=SERVICE_JOB_ID_MAX);
        PrintJob::new(
            id,
            self.model_name.clone(),
            self.est_minutes,
            self.filament.clone(),
            gcode_lines,
        )
    }
}

#[derive(Debug, Clone)]
pub struct FarmConfig {
    pub name: String,
    pub admin_pin: String,
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            name: "farm".to_string(),
            admin_pin: DEFAULT_ADMIN_PIN.to_string(),
        }
    }
}

impl FarmConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_admin_pin(mut self, pin: impl Into<String>) -> Self {
        self.admin_pin = pin.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_job_config_default() {
        let cfg = ServiceJobConfig::default();
        assert_eq!(cfg.model_name, "ServiceMacro");
        assert_eq!(cfg.est_minutes, 2);
        assert_eq!(cfg.filament.material, "PLA");
        assert_eq!(cfg.default_gcode, vec!["G28", "M84"]);
    }

    #[test]
    fn synthesize_splits_raw_gcode_into_lines() {
        let cfg = ServiceJobConfig::default();
        let job = cfg.synthesize("G28\nM84");
        assert_eq!(job.gcode_lines, vec!["G28", "M84"]);
        assert_eq!(job.model_name, "ServiceMacro");
        assert_eq!(job.est_minutes, 2);
    }

    #[test]
    fn synthesize_uses_defaults_for_blank_input() {
        let cfg = ServiceJobConfig::default();
        let job = cfg.synthesize("   \n  ");
        assert_eq!(job.gcode_lines, cfg.default_gcode);
    }

    #[test]
    fn synthesize_assigns_service_id_range() {
        let cfg = ServiceJobConfig::default();
        for _ in 0..32 {
            let job = cfg.synthesize("G28");
            assert!((SERVICE_JOB_ID_MIN..=SERVICE_JOB_ID_MAX).contains(&job.id));
        }
    }

    #[test]
    fn farm_config_default_pin() {
        let cfg = FarmConfig::default();
        assert_eq!(cfg.admin_pin, DEFAULT_ADMIN_PIN);
    }

    #[test]
    fn farm_config_with_admin_pin() {
        let cfg = FarmConfig::new("test-farm").with_admin_pin("1234");
        assert_eq!(cfg.name, "test-farm");
        assert_eq!(cfg.admin_pin, "1234");
    }
}

use serde::Deserialize;

use crate::error::WorkshopError;

/// Tunable gameplay and engine parameters.
///
/// Every field has a default, so a host may override any subset from JSON:
///
/// ```ignore
/// let config = WorkshopConfig::from_json(r#"{ "ink_increment": 0.3 }"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorkshopConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Logical size of every stage surface in surface units.
    pub surface_width: f32,
    pub surface_height: f32,
    /// Seed for the decorative RNG (ink bleed).
    pub seed: u64,
    /// Maximum number of vector vertices per frame.
    pub max_vertices: usize,

    /// Initial writing brush width (clamped to 4-20).
    pub brush_width: f32,
    /// Probability of an ink bleed blob per brush move.
    pub bleed_chance: f32,

    /// Press duration at which carving force saturates, in milliseconds.
    pub force_ramp_ms: f32,
    /// Force sampling interval while a chisel is held, in milliseconds.
    pub force_sample_ms: f32,
    /// Carving progress required to finish the stage.
    pub carve_guard: f32,

    /// Half-size of the mounting acceptance zone, in surface units.
    pub mount_tolerance: f32,
    /// Paper home offset relative to the block centre.
    pub paper_home: [f32; 2],
    /// Half-extent of the draggable paper, in surface units.
    pub paper_half_size: f32,

    /// Ink level added per brush move while pressed.
    pub ink_increment: f32,
    /// Ink level required to finish inking.
    pub ink_guard: f32,

    /// Rub count added per rubbing move.
    pub rub_increment: f32,
    /// Rub count at which transfer saturates.
    pub rub_full_count: f32,
    /// Print quality required before the print may be revealed.
    pub reveal_guard: f32,
}

impl Default for WorkshopConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            surface_width: 300.0,
            surface_height: 300.0,
            seed: 42,
            max_vertices: 65536,
            brush_width: 8.0,
            bleed_chance: 0.3,
            force_ramp_ms: 2000.0,
            force_sample_ms: 50.0,
            carve_guard: 20.0,
            mount_tolerance: 50.0,
            paper_home: [0.0, -150.0],
            paper_half_size: 96.0,
            ink_increment: 0.5,
            ink_guard: 30.0,
            rub_increment: 1.0,
            rub_full_count: 80.0,
            reveal_guard: 30.0,
        }
    }
}

impl WorkshopConfig {
    /// Parse a (possibly partial) config from JSON.
    pub fn from_json(json: &str) -> Result<Self, WorkshopError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_default() {
        let config = WorkshopConfig::from_json("{}").unwrap();
        assert_eq!(config, WorkshopConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config =
            WorkshopConfig::from_json(r#"{ "ink_increment": 0.3, "rub_increment": 0.5 }"#).unwrap();
        assert_eq!(config.ink_increment, 0.3);
        assert_eq!(config.rub_increment, 0.5);
        assert_eq!(config.force_ramp_ms, 2000.0);
        assert_eq!(config.paper_home, [0.0, -150.0]);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = WorkshopConfig::from_json(r#"{ "seed": "many" }"#).unwrap_err();
        assert!(matches!(err, WorkshopError::Config(_)));
    }
}

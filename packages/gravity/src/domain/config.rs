//! Gravity configuration
//!
//! Every field has a default matching the shipped site, so the shell can
//! pass `{}` (or nothing) and only override what it needs:
//!
//! ```json
//! { "impulse": { "radius": 400 }, "timing": { "restoreMs": 800 } }
//! ```

use serde::{Deserialize, Serialize};

/// Structural selectors deciding which elements take part
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectorConfig {
    /// Large media that fades out instead of falling
    pub dissipate: String,
    /// Leaf-ish text/icon/interactive elements that become bodies
    pub explode: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            dissipate: r"main img, .aspect-\[4\/3\]".to_string(),
            explode: [
                "nav h1, nav button, nav span",
                "footer p",
                r".rounded-\[2rem\]:not(.aspect-\[4\/3\])",
                "main h1, main h2, main h3, main h4, main p, main span",
                "main svg, main button, main a",
                "main li",
                r#"div[class*="border-b-2"]"#,
                r#"div[class*="h-[1px]"]"#,
                r#"div[class*="h-[2px]"]"#,
            ]
            .join(", "),
        }
    }
}

/// Longest browser timer delay accepted (fits a JS `setTimeout` i32)
pub const MAX_DELAY_MS: u32 = i32::MAX as u32;

/// Physical material for exploded elements
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MaterialConfig {
    pub restitution: f64,
    pub friction: f64,
    pub friction_air: f64,
    pub density: f64,
    /// Corner radius as a fraction of the smaller side
    pub chamfer_ratio: f64,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            restitution: 0.2,
            friction: 0.5,
            friction_air: 0.05,
            density: 0.002,
            chamfer_ratio: 0.1,
        }
    }
}

/// Solver iteration counts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverIterations {
    pub position: u32,
    pub velocity: u32,
    /// Joint passes; the debris world has no joints, the value is carried
    /// with the world for shells that add them.
    pub constraint: u32,
}

impl SolverIterations {
    /// Baseline counts of a stock 2D engine
    pub const ENGINE_DEFAULT: SolverIterations = SolverIterations {
        position: 6,
        velocity: 4,
        constraint: 2,
    };
}

impl Default for SolverIterations {
    fn default() -> Self {
        Self {
            position: 12,
            velocity: 8,
            constraint: 4,
        }
    }
}

/// Static floor and side walls
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoundaryConfig {
    /// Distance from the page bottom to the floor's center
    pub floor_offset: f64,
    /// Floor height and wall width
    pub thickness: f64,
    /// Wall height as a multiple of the page height
    pub wall_height_factor: f64,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            floor_offset: 500.0,
            thickness: 1000.0,
            wall_height_factor: 2.0,
        }
    }
}

/// Pointer-down repulsion
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpulseConfig {
    /// Bodies at or beyond this distance (px) are untouched
    pub radius: f64,
    /// Force at distance zero
    pub strength: f64,
}

impl Default for ImpulseConfig {
    fn default() -> Self {
        Self {
            radius: 500.0,
            strength: 0.8,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimingConfig {
    /// Fixed physics step
    pub step_ms: f64,
    /// Delay before pointer-down is listened to (skips the triggering click)
    pub listener_delay_ms: u32,
    /// Return animation length; the hard reset runs when it ends
    pub restore_ms: u32,
    /// Fade-out length for dissipated media
    pub dissipate_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            step_ms: 1000.0 / 60.0,
            listener_delay_ms: 50,
            restore_ms: 1000,
            dissipate_ms: 500,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GravityConfig {
    pub selectors: SelectorConfig,
    /// Elements narrower or shorter than this (px) are skipped
    pub min_visible_size: f64,
    pub material: MaterialConfig,
    /// Initial tilt is uniform in ±max_tilt radians
    pub max_tilt: f64,
    pub iterations: SolverIterations,
    pub gravity_x: f64,
    pub gravity_y: f64,
    pub boundary: BoundaryConfig,
    pub impulse: ImpulseConfig,
    pub timing: TimingConfig,
    /// Fixed tilt seed; `None` seeds from the browser
    pub seed: Option<u32>,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            selectors: SelectorConfig::default(),
            min_visible_size: 5.0,
            material: MaterialConfig::default(),
            max_tilt: 0.025,
            iterations: SolverIterations::default(),
            gravity_x: 0.0,
            gravity_y: 1.0,
            boundary: BoundaryConfig::default(),
            impulse: ImpulseConfig::default(),
            timing: TimingConfig::default(),
            seed: None,
        }
    }
}

impl GravityConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: GravityConfig = serde_json::from_str(json).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.selectors.explode.trim().is_empty() {
            return Err("selectors.explode must not be empty".to_string());
        }
        if !(self.impulse.radius > 0.0) {
            return Err(format!("impulse.radius must be positive: {}", self.impulse.radius));
        }
        if !(self.impulse.strength >= 0.0) {
            return Err(format!("impulse.strength must be non-negative: {}", self.impulse.strength));
        }
        if !(self.timing.step_ms > 0.0) {
            return Err(format!("timing.stepMs must be positive: {}", self.timing.step_ms));
        }
        if self.iterations.position == 0 || self.iterations.velocity == 0 {
            return Err("solver iterations must be at least 1".to_string());
        }
        if !(0.0..=0.5).contains(&self.material.chamfer_ratio) {
            return Err(format!(
                "material.chamferRatio out of range [0, 0.5]: {}",
                self.material.chamfer_ratio
            ));
        }
        if !(self.material.friction >= 0.0) {
            return Err(format!("material.friction must be non-negative: {}", self.material.friction));
        }
        if !(0.0..=1.0).contains(&self.material.restitution) {
            return Err(format!("material.restitution out of range [0, 1]: {}", self.material.restitution));
        }
        if !(0.0..=1.0).contains(&self.material.friction_air) {
            return Err(format!("material.frictionAir out of range [0, 1]: {}", self.material.friction_air));
        }
        if self.timing.listener_delay_ms > MAX_DELAY_MS || self.timing.restore_ms > MAX_DELAY_MS {
            return Err(format!("timing delays must not exceed {} ms", MAX_DELAY_MS));
        }
        if !(self.material.density > 0.0) {
            return Err(format!("material.density must be positive: {}", self.material.density));
        }
        if self.boundary.thickness <= 0.0 {
            return Err(format!("boundary.thickness must be positive: {}", self.boundary.thickness));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let config = GravityConfig::from_json("{}").unwrap();
        assert_eq!(config, GravityConfig::default());
        assert_eq!(config.impulse.radius, 500.0);
        assert_eq!(config.timing.restore_ms, 1000);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config =
            GravityConfig::from_json(r#"{"impulse":{"radius":250},"timing":{"restoreMs":600}}"#).unwrap();
        assert_eq!(config.impulse.radius, 250.0);
        assert_eq!(config.impulse.strength, 0.8);
        assert_eq!(config.timing.restore_ms, 600);
        assert_eq!(config.timing.listener_delay_ms, 50);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(GravityConfig::from_json(r#"{"impulse":{"radius":0}}"#).is_err());
        assert!(GravityConfig::from_json(r#"{"iterations":{"velocity":0}}"#).is_err());
        assert!(GravityConfig::from_json(r#"{"material":{"chamferRatio":0.9}}"#).is_err());
        assert!(GravityConfig::from_json(r#"{"material":{"friction":-0.5}}"#).is_err());
        assert!(GravityConfig::from_json(r#"{"material":{"restitution":1.5}}"#).is_err());
        assert!(GravityConfig::from_json(r#"{"material":{"frictionAir":-0.1}}"#).is_err());
        assert!(GravityConfig::from_json(r#"{"timing":{"restoreMs":3000000000}}"#).is_err());
        assert!(GravityConfig::from_json("not json").is_err());
    }

    #[test]
    fn default_iterations_are_raised_above_engine_baseline() {
        let raised = SolverIterations::default();
        let base = SolverIterations::ENGINE_DEFAULT;
        assert!(raised.position > base.position);
        assert!(raised.velocity > base.velocity);
        assert!(raised.constraint > base.constraint);
    }

    #[test]
    fn json_round_trips() {
        let config = GravityConfig {
            seed: Some(7),
            ..GravityConfig::default()
        };
        let back = GravityConfig::from_json(&config.to_json()).unwrap();
        assert_eq!(back, config);
    }
}

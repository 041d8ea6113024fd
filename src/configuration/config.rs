//! Configuration types for loading a scenario from YAML.
//!
//! A scenario file has two sections, both optional:
//!
//! - [`ParametersConfig`] – physical constants and the fixed step
//! - [`RenderConfig`]     – camera margin and disc appearance
//!
//! Bodies are not part of the file; the figure-eight fixture is always used.
//!
//! # YAML format
//!
//! ```yaml
//! parameters:
//!   G: 1.0              # gravitational constant
//!   dt: 0.002           # fixed step per frame
//!   softening: 1.0e-6   # added to pair distance
//!
//! render:
//!   margin: 0.6         # fraction added to the initial bounding box
//!   disc_radius: 14.0   # pixels
//!   glow_blur: 16.0     # pixels
//!   background: "#000000"
//! ```
//!
//! Missing fields fall back to the defaults shown above.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::simulation::states::BodyColor;
use crate::simulation::params::{DEFAULT_DT, DEFAULT_G, DEFAULT_SOFTENING};
use crate::visualization::projector::{DEFAULT_DISC_RADIUS, DEFAULT_GLOW_BLUR, DEFAULT_MARGIN};

/// Global numerical and physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ParametersConfig {
    pub G: f64, // gravitational constant
    pub dt: f64, // time step size, one per frame
    pub softening: f64, // prevents a zero direction divisor at tiny separations
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            G: DEFAULT_G,
            dt: DEFAULT_DT,
            softening: DEFAULT_SOFTENING,
        }
    }
}

/// How bodies are projected and drawn
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub margin: f64, // extra fraction of the initial span kept in view
    pub disc_radius: f64, // disc radius in pixels
    pub glow_blur: f64, // halo blur radius in pixels
    pub background: String, // clear color as #RRGGBB
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            disc_radius: DEFAULT_DISC_RADIUS,
            glow_blur: DEFAULT_GLOW_BLUR,
            background: "#000000".to_string(),
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig,
    pub render: RenderConfig,
}

impl ScenarioConfig {
    pub fn from_yaml_str(src: &str) -> Result<Self, ConfigError> {
        // an empty document deserializes to unit, not to an empty map
        let blank = src.lines().map(str::trim).all(|l| l.is_empty() || l.starts_with('#'));
        if blank {
            return Ok(Self::default());
        }
        let cfg: ScenarioConfig = serde_yaml::from_str(src)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut src = String::new();
        BufReader::new(File::open(path.as_ref())?).read_to_string(&mut src)?;
        Self::from_yaml_str(&src)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.parameters;
        let r = &self.render;

        let finite = [p.G, p.dt, p.softening, r.margin, r.disc_radius, r.glow_blur];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::Validation("all numeric fields must be finite".to_string()));
        }
        if p.G <= 0.0 {
            return Err(ConfigError::Validation("G must be > 0".to_string()));
        }
        if p.dt <= 0.0 {
            return Err(ConfigError::Validation("dt must be > 0".to_string()));
        }
        if p.softening <= 0.0 {
            return Err(ConfigError::Validation("softening must be > 0".to_string()));
        }
        if r.margin < 0.0 {
            return Err(ConfigError::Validation("margin must be >= 0".to_string()));
        }
        if r.disc_radius <= 0.0 {
            return Err(ConfigError::Validation("disc_radius must be > 0".to_string()));
        }
        if r.glow_blur < 0.0 {
            return Err(ConfigError::Validation("glow_blur must be >= 0".to_string()));
        }
        if BodyColor::from_hex(&r.background).is_none() {
            return Err(ConfigError::Validation(format!(
                "background `{}` is not a #RRGGBB color",
                r.background
            )));
        }
        Ok(())
    }
}

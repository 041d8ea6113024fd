//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds the runtime settings used by the stepper:
//! - gravitational constant `G`
//! - fixed step size `dt` (one step per frame)
//! - distance softening `softening` added to `|r|` in the force law

use crate::configuration::config::ParametersConfig;

pub const DEFAULT_G: f64 = 1.0;
pub const DEFAULT_DT: f64 = 0.002;
pub const DEFAULT_SOFTENING: f64 = 1e-6;

#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub dt: f64, // step size
    pub softening: f64, // epsilon added to the pair distance
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            G: DEFAULT_G,
            dt: DEFAULT_DT,
            softening: DEFAULT_SOFTENING,
        }
    }
}

impl From<&ParametersConfig> for Parameters {
    fn from(cfg: &ParametersConfig) -> Self {
        Self {
            G: cfg.G,
            dt: cfg.dt,
            softening: cfg.softening,
        }
    }
}

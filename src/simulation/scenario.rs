//! The figure-eight scenario and the simulation that owns it
//!
//! `Simulation` is the runtime bundle: parameters, the live system, the
//! canonical initial bodies it resets to, and the active force set.

use crate::configuration::config::ScenarioConfig;
use crate::simulation::forces::{AccelSet, NewtonianGravity};
use crate::simulation::integrator::symplectic_euler;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, BodyColor, System};

pub const GOLD: BodyColor = BodyColor::rgb(0xFF, 0xD7, 0x00);
pub const DARK_ORANGE: BodyColor = BodyColor::rgb(0xFF, 0x8C, 0x00);
pub const ORANGE_RED: BodyColor = BodyColor::rgb(0xFF, 0x45, 0x00);

/// Chenciner & Montgomery (2000) figure-eight initial conditions, G = 1, m = 1
pub fn figure_eight() -> Vec<Body> {
    vec![
        Body::new([0.97000436, -0.24308753], [0.4662036850, 0.4323657300], 1.0, GOLD),
        Body::new([-0.97000436, 0.24308753], [0.4662036850, 0.4323657300], 1.0, DARK_ORANGE),
        Body::new([0.0, 0.0], [-0.93240737, -0.86473146], 1.0, ORANGE_RED),
    ]
}

pub struct Simulation {
    pub parameters: Parameters,
    pub system: System,
    pub forces: AccelSet,
    initial: Vec<Body>,
}

impl Simulation {
    /// Build a simulation over `initial`. Every mass must be positive;
    /// a non-positive mass is a caller bug and is not checked in release builds.
    pub fn new(initial: Vec<Body>, parameters: Parameters) -> Self {
        debug_assert!(initial.iter().all(|b| b.m > 0.0), "body masses must be positive");

        let forces = AccelSet::new().with(NewtonianGravity {
            G: parameters.G,
            softening: parameters.softening,
        });

        Self {
            parameters,
            system: System::new(initial.clone()),
            forces,
            initial,
        }
    }

    pub fn figure_eight(parameters: Parameters) -> Self {
        Self::new(figure_eight(), parameters)
    }

    pub fn build_scenario(cfg: &ScenarioConfig) -> Self {
        Self::figure_eight(Parameters::from(&cfg.parameters))
    }

    /// Advance one fixed step
    pub fn step(&mut self) {
        symplectic_euler(&mut self.system, &self.forces, &self.parameters);
    }

    /// Replace the live bodies with a fresh copy of the initial conditions
    pub fn reset(&mut self) {
        self.system = System::new(self.initial.clone());
    }

    pub fn bodies(&self) -> &[Body] {
        &self.system.bodies
    }

    pub fn initial_bodies(&self) -> &[Body] {
        &self.initial
    }
}

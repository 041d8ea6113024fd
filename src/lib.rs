pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod error;

pub use simulation::states::{Body, BodyColor, System, NVec2};
pub use simulation::params::Parameters;
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity};
pub use simulation::integrator::symplectic_euler;
pub use simulation::scenario::{figure_eight, Simulation};

pub use configuration::config::{ParametersConfig, RenderConfig, ScenarioConfig};
pub use error::ConfigError;

pub use visualization::canvas::{Canvas, DrawCommand, Disc, RecordingCanvas, Viewport};
pub use visualization::projector::{Camera, RenderStyle, Renderer};
pub use visualization::driver::{Animation, CancelToken};
pub use visualization::{headless::run_headless, vis2d::run_2d};

//! Run the animation without a window
//!
//! Frames are drawn into a [`RecordingCanvas`] so the full draw path is
//! exercised, and a short report on conservation and timing is logged.

use std::time::{Duration, Instant};

use crate::simulation::scenario::Simulation;
use crate::simulation::states::System;
use crate::visualization::canvas::{RecordingCanvas, Viewport};
use crate::visualization::driver::Animation;
use crate::visualization::projector::RenderStyle;

#[derive(Debug, Clone)]
pub struct HeadlessReport {
    pub frames: u64,
    pub elapsed: Duration,
    pub centroid_drift: f64, // |centroid_end - centroid_start|
    pub momentum_drift: f64, // |p_end - p_start|
    pub energy_drift: f64, // |(E_end - E_start) / E_start|
    pub final_state: System,
}

pub fn run_headless(simulation: Simulation, viewport: Viewport, style: RenderStyle, frames: u64) -> HeadlessReport {
    let g = simulation.parameters.G;
    let start = simulation.system.clone();

    let mut animation = Animation::start(simulation, viewport, style);
    let mut canvas = RecordingCanvas::new(viewport);

    let t0 = Instant::now();
    let ran = animation.run(&mut canvas, Some(frames));
    let elapsed = t0.elapsed();

    let end = animation.simulation().system.clone();
    let centroid_drift = (end.centroid() - start.centroid()).norm();
    let momentum_drift = (end.momentum() - start.momentum()).norm();
    let e0 = start.total_energy(g);
    let energy_drift = ((end.total_energy(g) - e0) / e0).abs();

    log::info!(
        "{} frames in {:.3} ms ({:.2} us/frame), t = {:.4}",
        ran,
        elapsed.as_secs_f64() * 1e3,
        elapsed.as_secs_f64() * 1e6 / ran.max(1) as f64,
        end.t
    );
    log::info!(
        "centroid drift {:.3e}, momentum drift {:.3e}, relative energy drift {:.3e}",
        centroid_drift,
        momentum_drift,
        energy_drift
    );
    for (i, b) in end.bodies.iter().enumerate() {
        log::debug!("body {} {}: x = ({:.6}, {:.6}), v = ({:.6}, {:.6})", i, b.color, b.x.x, b.x.y, b.v.x, b.v.y);
    }
    for disc in canvas.discs() {
        log::trace!("last frame disc at ({:.1}, {:.1}) px", disc.center.x, disc.center.y);
    }

    HeadlessReport {
        frames: ran,
        elapsed,
        centroid_drift,
        momentum_drift,
        energy_drift,
        final_state: end,
    }
}

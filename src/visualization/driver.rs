//! Frame driver: draw the current state, then step, until cancelled
//!
//! Each call to [`Animation::frame`] is one indivisible read → draw → mutate
//! unit. The host decides when frames happen; cancellation is a flag checked
//! before a frame starts, so it never cuts one short.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bevy::prelude::Resource;

use crate::simulation::scenario::Simulation;
use crate::visualization::canvas::{Canvas, Viewport};
use crate::visualization::projector::{Camera, RenderStyle, Renderer};

/// Shared stop flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop. Returns `true` only for the call that flipped the flag.
    pub fn cancel(&self) -> bool {
        !self.0.swap(true, Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A running simulation plus the renderer fitted to it.
///
/// Inserted into bevy as a `Resource` by the windowed host.
#[derive(Resource)]
pub struct Animation {
    simulation: Simulation,
    renderer: Renderer,
    cancel: CancelToken,
    frames: u64,
}

impl Animation {
    /// Fit the camera to the simulation's initial bodies in `viewport`.
    /// This is the only place the camera is ever computed.
    pub fn start(simulation: Simulation, viewport: Viewport, style: RenderStyle) -> Self {
        let camera = Camera::fit(simulation.initial_bodies(), viewport, style.margin);
        log::info!(
            "camera fitted to {}x{}: center ({:.6}, {:.6}), scale {:.3} px/unit",
            viewport.width,
            viewport.height,
            camera.center.x,
            camera.center.y,
            camera.scale
        );

        Self {
            simulation,
            renderer: Renderer::new(camera, style),
            cancel: CancelToken::new(),
            frames: 0,
        }
    }

    /// Run one frame. `None` means the host has no surface right now: the
    /// whole frame is skipped, nothing is drawn and nothing is stepped, but
    /// the scheduler keeps going.
    ///
    /// Returns `false` without touching anything once cancelled.
    pub fn frame(&mut self, canvas: Option<&mut dyn Canvas>) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }

        let Some(canvas) = canvas else {
            log::trace!("no drawing surface, skipping frame {}", self.frames);
            return true;
        };

        self.renderer.draw(canvas, self.simulation.bodies());
        self.simulation.step();
        self.frames += 1;
        true
    }

    /// Drive frames back to back until cancelled or `limit` frames have run.
    /// Returns the number of frames executed by this call.
    pub fn run<C: Canvas>(&mut self, canvas: &mut C, limit: Option<u64>) -> u64 {
        let mut ran = 0;
        while limit.map_or(true, |max| ran < max) {
            if !self.frame(Some(&mut *canvas)) {
                break;
            }
            ran += 1;
        }
        ran
    }

    /// Restore the initial bodies. Camera, frame counter and cancel state
    /// are left alone.
    pub fn reset(&mut self) {
        self.simulation.reset();
        log::info!("simulation reset after {} frames", self.frames);
    }

    pub fn cancel(&self) {
        if self.cancel.cancel() {
            log::info!("animation cancelled after {} frames", self.frames);
        }
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn camera(&self) -> &Camera {
        self.renderer.camera()
    }
}

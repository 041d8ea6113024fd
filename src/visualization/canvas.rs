//! Drawing surface seen by the renderer
//!
//! Coordinates are pixels with the origin at the top-left corner and `y`
//! growing downward. A host implements [`Canvas`]; [`RecordingCanvas`] keeps
//! the calls in memory and backs both the headless runner and the bevy host.

use crate::simulation::states::{BodyColor, NVec2};

/// Current drawing surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> NVec2 {
        NVec2::new(self.width / 2.0, self.height / 2.0)
    }
}

pub trait Canvas {
    fn viewport(&self) -> Viewport;

    /// Wipe the whole surface
    fn clear(&mut self);

    /// Subsequent fills get a blurred halo of `blur` pixels in `color`
    fn set_glow(&mut self, color: BodyColor, blur: f64);

    fn clear_glow(&mut self);

    fn fill_circle(&mut self, center: NVec2, radius: f64, color: BodyColor);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    SetGlow { color: BodyColor, blur: f64 },
    ClearGlow,
    FillCircle { center: NVec2, radius: f64, color: BodyColor },
}

/// A filled circle as it should appear, with whatever glow was active
#[derive(Debug, Clone, PartialEq)]
pub struct Disc {
    pub center: NVec2,
    pub radius: f64,
    pub color: BodyColor,
    pub glow: Option<(BodyColor, f64)>,
}

/// In-memory canvas. Commands accumulate until the next `clear`.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    viewport: Viewport,
    commands: Vec<DrawCommand>,
    clears: u64,
}

impl RecordingCanvas {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
            clears: 0,
        }
    }

    /// Host window changed size
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Commands issued since the last clear, starting with that clear
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// How many times the surface was cleared, i.e. frames drawn
    pub fn clears(&self) -> u64 {
        self.clears
    }

    /// Replay the current command list into the discs it produces
    pub fn discs(&self) -> Vec<Disc> {
        let mut glow = None;
        let mut discs = Vec::new();
        for cmd in &self.commands {
            match cmd {
                DrawCommand::Clear => {
                    discs.clear();
                    glow = None;
                }
                DrawCommand::SetGlow { color, blur } => glow = Some((*color, *blur)),
                DrawCommand::ClearGlow => glow = None,
                DrawCommand::FillCircle { center, radius, color } => discs.push(Disc {
                    center: *center,
                    radius: *radius,
                    color: *color,
                    glow,
                }),
            }
        }
        discs
    }
}

impl Canvas for RecordingCanvas {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.clears += 1;
    }

    fn set_glow(&mut self, color: BodyColor, blur: f64) {
        self.commands.push(DrawCommand::SetGlow { color, blur });
    }

    fn clear_glow(&mut self) {
        self.commands.push(DrawCommand::ClearGlow);
    }

    fn fill_circle(&mut self, center: NVec2, radius: f64, color: BodyColor) {
        self.commands.push(DrawCommand::FillCircle { center, radius, color });
    }
}

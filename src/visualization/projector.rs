//! Fixed camera and the per-frame disc renderer
//!
//! The camera is fitted once to the *initial* body positions and the viewport
//! at start-up. It is not refitted on reset, on motion or on resize; every
//! frame only re-centers on the current viewport.

use crate::configuration::config::RenderConfig;
use crate::simulation::states::{Body, BodyColor, NVec2};
use crate::visualization::canvas::{Canvas, Viewport};

pub const DEFAULT_MARGIN: f64 = 0.6;
pub const DEFAULT_DISC_RADIUS: f64 = 14.0;
pub const DEFAULT_GLOW_BLUR: f64 = 16.0;

/// Simulation-space center and pixels-per-unit scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub center: NVec2,
    pub scale: f64,
}

impl Camera {
    /// Fit the bounding box of `bodies`, grown by `margin`, into `viewport`.
    ///
    /// A zero extent on either axis counts as a span of 1. The tighter axis
    /// decides the uniform scale.
    pub fn fit(bodies: &[Body], viewport: Viewport, margin: f64) -> Self {
        if bodies.is_empty() {
            return Self { center: NVec2::zeros(), scale: fallback_scale(viewport) };
        }

        let (mut min, mut max) = (bodies[0].x, bodies[0].x);
        for b in &bodies[1..] {
            min = min.inf(&b.x);
            max = max.sup(&b.x);
        }

        let center = (min + max) / 2.0;
        let span = |extent: f64| {
            let s = extent * (1.0 + margin);
            if s == 0.0 { 1.0 } else { s }
        };
        let span_x = span(max.x - min.x);
        let span_y = span(max.y - min.y);

        let scale = (viewport.width / span_x).min(viewport.height / span_y);
        let scale = if scale > 0.0 && scale.is_finite() {
            scale
        } else {
            log::warn!("viewport {}x{} gives no usable scale, using 1", viewport.width, viewport.height);
            1.0
        };

        Self { center, scale }
    }

    /// Simulation position to pixel position for the given viewport
    pub fn project(&self, p: &NVec2, viewport: Viewport) -> NVec2 {
        viewport.center() + (p - self.center) * self.scale
    }
}

fn fallback_scale(viewport: Viewport) -> f64 {
    let s = viewport.width.min(viewport.height);
    if s > 0.0 && s.is_finite() { s } else { 1.0 }
}

/// Disc look, fixed for the lifetime of a renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub margin: f64,
    pub disc_radius: f64,
    pub glow_blur: f64,
    pub background: BodyColor,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            disc_radius: DEFAULT_DISC_RADIUS,
            glow_blur: DEFAULT_GLOW_BLUR,
            background: BodyColor::rgb(0, 0, 0),
        }
    }
}

impl From<&RenderConfig> for RenderStyle {
    fn from(cfg: &RenderConfig) -> Self {
        Self {
            margin: cfg.margin,
            disc_radius: cfg.disc_radius,
            glow_blur: cfg.glow_blur,
            // validated on load
            background: BodyColor::from_hex(&cfg.background).unwrap_or(BodyColor::rgb(0, 0, 0)),
        }
    }
}

/// Reads bodies, writes pixels. Holds no simulation state.
#[derive(Debug, Clone)]
pub struct Renderer {
    camera: Camera,
    style: RenderStyle,
}

impl Renderer {
    pub fn new(camera: Camera, style: RenderStyle) -> Self {
        Self { camera, style }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, bodies: &[Body]) {
        let viewport = canvas.viewport();
        canvas.clear();

        for body in bodies {
            let at = self.camera.project(&body.x, viewport);
            canvas.set_glow(body.color, self.style.glow_blur);
            canvas.fill_circle(at, self.style.disc_radius, body.color);
            canvas.clear_glow();
        }
    }
}

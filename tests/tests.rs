use figure8::simulation::states::{Body, BodyColor, System, NVec2};
use figure8::simulation::params::Parameters;
use figure8::simulation::scenario::{figure_eight, Simulation};
use figure8::visualization::canvas::{Canvas, DrawCommand, RecordingCanvas, Viewport};
use figure8::visualization::driver::Animation;
use figure8::visualization::headless::run_headless;
use figure8::visualization::projector::{Camera, RenderStyle};
use figure8::ScenarioConfig;

const GREY: BodyColor = BodyColor::rgb(128, 128, 128);

/// Canonical run: G = 1, dt = 0.002, softening = 1e-6
pub fn canonical() -> Simulation {
    Simulation::figure_eight(Parameters::default())
}

/// Run `n` steps and hand back the simulation
pub fn stepped(n: usize) -> Simulation {
    let mut sim = canonical();
    for _ in 0..n {
        sim.step();
    }
    sim
}

pub fn start_animation(width: f64, height: f64) -> Animation {
    Animation::start(canonical(), Viewport::new(width, height), RenderStyle::default())
}

fn all_finite(sys: &System) -> bool {
    sys.bodies
        .iter()
        .all(|b| b.x.iter().chain(b.v.iter()).all(|c| c.is_finite()))
}

// ==================================================================================
// Stepper tests
// ==================================================================================

#[test]
fn stepping_is_deterministic() {
    let a = stepped(750);
    let b = stepped(750);
    assert_eq!(a.system, b.system);
}

#[test]
fn single_step_matches_hand_computation() {
    let (g, dt, eps) = (1.0_f64, 0.002_f64, 1e-6_f64);
    let init = figure_eight();

    // kick from the initial positions
    let mut expected: Vec<(f64, f64, f64, f64)> = Vec::new();
    for (i, bi) in init.iter().enumerate() {
        let (mut ax, mut ay) = (0.0, 0.0);
        for (j, bj) in init.iter().enumerate() {
            if i == j {
                continue;
            }
            let dx = bj.x.x - bi.x.x;
            let dy = bj.x.y - bi.x.y;
            let dist_sq = dx * dx + dy * dy;
            let dist = dist_sq.sqrt() + eps;
            let force = g * bj.m / dist_sq;
            ax += force * dx / dist;
            ay += force * dy / dist;
        }
        let vx = bi.v.x + ax * dt;
        let vy = bi.v.y + ay * dt;
        expected.push((bi.x.x, bi.x.y, vx, vy));
    }
    // then drift with the new velocities
    for e in expected.iter_mut() {
        e.0 += e.2 * dt;
        e.1 += e.3 * dt;
    }

    let sim = stepped(1);
    for (b, e) in sim.bodies().iter().zip(expected.iter()) {
        assert_eq!((b.x.x, b.x.y, b.v.x, b.v.y), *e);
    }
    assert_eq!(sim.system.t, dt);
}

#[test]
fn drift_uses_updated_velocity() {
    let init = figure_eight();
    let sim = stepped(1);
    let dt = 0.002;

    // C's pulls from A and B cancel at the origin; A gets a real kick
    let a0 = &init[0];
    let a1 = &sim.bodies()[0];
    assert_ne!(a1.v, a0.v);

    let with_new_v = a0.x + a1.v * dt;
    let with_old_v = a0.x + a0.v * dt;
    assert!((a1.x - with_new_v).norm() < 1e-15);
    assert!((a1.x - with_old_v).norm() > 1e-9, "position advanced with the stale velocity");
}

#[test]
fn coincident_bodies_stay_finite() {
    let bodies = vec![
        Body::new([0.25, -0.5], [0.0, 0.0], 1.0, GREY),
        Body::new([0.25, -0.5], [0.1, 0.0], 1.0, GREY),
        Body::new([1.0, 1.0], [0.0, 0.0], 2.0, GREY),
    ];
    let mut sim = Simulation::new(bodies, Parameters::default());
    sim.step();
    assert!(all_finite(&sim.system), "NaN/inf after stepping coincident bodies: {:?}", sim.system);
}

#[test]
fn near_coincident_bodies_stay_finite() {
    // separation small enough that |r|^2 is subnormal
    let bodies = vec![
        Body::new([0.0, 0.0], [0.0, 0.0], 1.0, GREY),
        Body::new([1e-160, 0.0], [0.0, 0.0], 1.0, GREY),
        Body::new([1.0, 1.0], [0.0, 0.0], 1.0, GREY),
    ];
    let mut sim = Simulation::new(bodies, Parameters::default());
    for _ in 0..3 {
        sim.step();
    }
    assert!(all_finite(&sim.system), "NaN/inf after stepping near-coincident bodies: {:?}", sim.system);
}

#[test]
fn centroid_stays_put_over_a_thousand_steps() {
    let start = System::new(figure_eight()).centroid();
    let sim = stepped(1000);
    let drift = (sim.system.centroid() - start).norm();
    assert!(drift < 1e-6, "centroid drifted by {}", drift);
}

#[test]
fn energy_stays_bounded_over_a_thousand_steps() {
    let g = Parameters::default().G;
    let e0 = System::new(figure_eight()).total_energy(g);
    let sim = stepped(1000);
    let rel = ((sim.system.total_energy(g) - e0) / e0).abs();
    assert!(rel < 1e-2, "relative energy drift {}", rel);
    assert!(all_finite(&sim.system));
}

#[test]
fn masses_never_change() {
    let sim = stepped(300);
    assert!(sim.bodies().iter().all(|b| b.m == 1.0));
}

// ==================================================================================
// Reset tests
// ==================================================================================

#[test]
fn reset_restores_fixture_exactly() {
    let mut sim = stepped(250);
    assert_ne!(sim.bodies(), figure_eight().as_slice());

    sim.reset();
    assert_eq!(sim.bodies(), figure_eight().as_slice());
    assert_eq!(sim.system.t, 0.0);
}

#[test]
fn reset_twice_equals_reset_once() {
    let mut once = stepped(40);
    once.reset();

    let mut twice = stepped(40);
    twice.reset();
    twice.reset();

    assert_eq!(once.system, twice.system);
}

#[test]
fn stepping_after_reset_replays_the_same_orbit() {
    let mut sim = stepped(100);
    sim.reset();
    for _ in 0..100 {
        sim.step();
    }
    assert_eq!(sim.system, stepped(100).system);
}

// ==================================================================================
// Camera and renderer tests
// ==================================================================================

#[test]
fn camera_fits_figure_eight() {
    let anim = start_animation(800.0, 600.0);
    let cam = anim.camera();

    let span_x = (0.97000436 - -0.97000436) * 1.6;
    assert_eq!(cam.center, NVec2::new(0.0, 0.0));
    assert_eq!(cam.scale, 800.0 / span_x);
}

#[test]
fn camera_ignores_resize_and_reset() {
    let mut anim = start_animation(800.0, 600.0);
    let fitted = *anim.camera();

    let mut canvas = RecordingCanvas::new(Viewport::new(800.0, 600.0));
    anim.run(&mut canvas, Some(10));

    canvas.resize(Viewport::new(1920.0, 1080.0));
    anim.run(&mut canvas, Some(10));
    anim.reset();
    anim.run(&mut canvas, Some(1));

    assert_eq!(*anim.camera(), fitted);

    // the fixed camera re-centers on the new surface
    let body_c = &anim.simulation().initial_bodies()[2];
    let discs = canvas.discs();
    assert_eq!(discs[2].center, fitted.project(&body_c.x, Viewport::new(1920.0, 1080.0)));
    assert_eq!(discs[2].center, NVec2::new(960.0, 540.0));
}

#[test]
fn degenerate_axis_uses_unit_span() {
    let flat = vec![
        Body::new([-2.0, 0.5], [0.0, 0.0], 1.0, GREY),
        Body::new([2.0, 0.5], [0.0, 0.0], 1.0, GREY),
        Body::new([0.0, 0.5], [0.0, 0.0], 1.0, GREY),
    ];
    // span_x = 4 * 1.6 = 6.4, span_y = 1
    let cam = Camera::fit(&flat, Viewport::new(640.0, 50.0), 0.6);
    assert!(cam.scale.is_finite() && cam.scale > 0.0);
    assert_eq!(cam.scale, 50.0);

    let point = vec![Body::new([3.0, 3.0], [0.0, 0.0], 1.0, GREY); 3];
    let cam = Camera::fit(&point, Viewport::new(640.0, 480.0), 0.6);
    assert_eq!(cam.scale, 480.0);
}

#[test]
fn frame_clears_then_draws_each_body_with_glow() {
    let mut anim = start_animation(800.0, 600.0);
    let mut canvas = RecordingCanvas::new(Viewport::new(800.0, 600.0));
    let before: Vec<Body> = anim.simulation().bodies().to_vec();

    assert!(anim.frame(Some(&mut canvas)));

    let cmds = canvas.commands();
    assert_eq!(cmds.len(), 1 + 3 * before.len());
    assert_eq!(cmds[0], DrawCommand::Clear);

    for (k, body) in before.iter().enumerate() {
        let at = anim.camera().project(&body.x, canvas.viewport());
        assert_eq!(cmds[1 + 3 * k], DrawCommand::SetGlow { color: body.color, blur: 16.0 });
        assert_eq!(cmds[2 + 3 * k], DrawCommand::FillCircle { center: at, radius: 14.0, color: body.color });
        assert_eq!(cmds[3 + 3 * k], DrawCommand::ClearGlow);
    }
}

#[test]
fn frame_draws_state_before_stepping() {
    let mut anim = start_animation(800.0, 600.0);
    let mut canvas = RecordingCanvas::new(Viewport::new(800.0, 600.0));
    anim.run(&mut canvas, Some(3));

    // the third frame drew the state after two steps
    let two = stepped(2);
    let discs = canvas.discs();
    for (disc, body) in discs.iter().zip(two.bodies()) {
        assert_eq!(disc.center, anim.camera().project(&body.x, canvas.viewport()));
    }
    assert_eq!(anim.simulation().system, stepped(3).system);
}

#[test]
fn surfaceless_frame_leaves_state_untouched() {
    let mut anim = start_animation(800.0, 600.0);
    let before = anim.simulation().system.clone();

    assert!(anim.frame(None), "scheduler should keep running without a surface");
    assert_eq!(anim.simulation().system, before);
    assert_eq!(anim.frames(), 0);
}

#[test]
fn cancel_stops_future_frames_only() {
    let mut anim = start_animation(800.0, 600.0);
    let token = anim.cancel_token();
    let mut canvas = RecordingCanvas::new(Viewport::new(800.0, 600.0));

    anim.run(&mut canvas, Some(7));
    token.cancel();
    token.cancel();

    let frozen = anim.simulation().system.clone();
    assert_eq!(anim.run(&mut canvas, None), 0);
    assert_eq!(anim.simulation().system, frozen);
    assert_eq!(canvas.clears(), 7);
}

// ==================================================================================
// Headless + config tests
// ==================================================================================

#[test]
fn headless_run_reports_frames() {
    let report = run_headless(canonical(), Viewport::new(640.0, 480.0), RenderStyle::default(), 200);
    assert_eq!(report.frames, 200);
    assert_eq!(report.final_state, stepped(200).system);
    assert!(report.centroid_drift < 1e-6);
    assert!(report.momentum_drift < 1e-9);
}

#[test]
fn bundled_scenario_matches_defaults() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios").join("figure_eight.yaml");
    let cfg = ScenarioConfig::load(path).unwrap();
    assert_eq!(cfg, ScenarioConfig::default());

    let sim = Simulation::build_scenario(&cfg);
    assert_eq!(sim.parameters, Parameters::default());
    assert_eq!(RenderStyle::from(&cfg.render), RenderStyle::default());
}

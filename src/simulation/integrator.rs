//! Fixed-step time integrator for the simulation
//!
//! Semi-implicit (symplectic) Euler driven by `AccelSet` and `Parameters`.
//! One call is one frame's worth of physics.

use super::states::{System, NVec2};
use super::forces::AccelSet;
use super::params::Parameters;

/// Advance the system by one step using symplectic Euler.
///
/// Kick then drift:
/// 1. `a_n` from the positions `x_n` (velocities are never read here)
/// 2. `v_n+1 = v_n + dt * a_n`
/// 3. `x_n+1 = x_n + dt * v_n+1`
///
/// Drifting with `v_n` instead would be plain explicit Euler, which spirals
/// the figure-eight apart.
pub fn symplectic_euler(sys: &mut System, forces: &AccelSet, params: &Parameters) {
    let n = sys.bodies.len();
    if n == 0 { // no bodies, return
        return;
    }

    let dt = params.dt;

    // accelerations for every body from the pre-update snapshot
    let mut accels = vec![NVec2::zeros(); n];
    forces.accumulate_accels(&*sys, &mut accels);

    // Kick: v_n+1 = v_n + dt * a_n
    for (b, a) in sys.bodies.iter_mut().zip(accels.iter()) {
        b.v.x += a.x * dt;
        b.v.y += a.y * dt;
    }

    // Drift: x_n+1 = x_n + dt * v_n+1, separate pass
    for b in sys.bodies.iter_mut() {
        b.x.x += b.v.x * dt;
        b.x.y += b.v.y * dt;
    }

    sys.t += dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::forces::NewtonianGravity;
    use crate::simulation::states::{Body, BodyColor};

    #[test]
    fn free_body_drifts_linearly() {
        let mut sys = System::new(vec![Body::new(
            [0.0, 0.0],
            [1.0, -2.0],
            1.0,
            BodyColor::rgb(255, 255, 255),
        )]);
        let params = Parameters { dt: 0.5, ..Parameters::default() };
        let forces = AccelSet::new().with(NewtonianGravity { G: params.G, softening: params.softening });

        symplectic_euler(&mut sys, &forces, &params);
        symplectic_euler(&mut sys, &forces, &params);

        assert_eq!(sys.bodies[0].x, NVec2::new(1.0, -2.0));
        assert_eq!(sys.bodies[0].v, NVec2::new(1.0, -2.0));
        assert_eq!(sys.t, 1.0);
    }

    #[test]
    fn empty_system_is_untouched() {
        let mut sys = System::new(Vec::new());
        symplectic_euler(&mut sys, &AccelSet::new(), &Parameters::default());
        assert_eq!(sys.t, 0.0);
    }
}

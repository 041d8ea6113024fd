//! Acceleration contributors for the stepper
//!
//! Defines the acceleration trait, the set that sums terms into one buffer,
//! and direct pairwise Newtonian gravity

use crate::simulation::states::{System, NVec2};

/// Collection of acceleration terms.
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    /// - only positions and masses are read, never velocities
    pub fn accumulate_accels(&self, sys: &System, out: &mut [NVec2]) {
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }
        for term in &self.terms {
            term.acceleration(sys, out);
        }
    }
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for acceleration sources operating on [`System`].
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, sys: &System, out: &mut [NVec2]);
}

/// Newtonian gravity, direct sum over ordered pairs
///
/// For body `i` and every other body `j`:
///
/// ```text
/// r     = x_j - x_i
/// dist  = |r| + softening
/// force = G * m_j / |r|^2
/// a_i  += force * r / dist
/// ```
///
/// `softening` only enters the unit-direction divisor. A pair so close that
/// `G * m_j / |r|^2` is no longer finite (exact coincidence included)
/// contributes nothing.
#[allow(non_snake_case)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
    pub softening: f64, // added to |r|
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, sys: &System, out: &mut [NVec2]) {
        let bodies = &sys.bodies;

        for (i, bi) in bodies.iter().enumerate() {
            let mut acc = NVec2::zeros();

            for (j, bj) in bodies.iter().enumerate() {
                if i == j {
                    continue;
                }

                let r = bj.x - bi.x;
                let dist_sq = r.x * r.x + r.y * r.y;
                let dist = dist_sq.sqrt() + self.softening;
                let force = self.G * bj.m / dist_sq;

                let ax = force * r.x / dist;
                let ay = force * r.y / dist;
                if !(ax.is_finite() && ay.is_finite()) {
                    continue;
                }

                acc.x += ax;
                acc.y += ay;
            }

            out[i] += acc;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::{Body, BodyColor};

    const GREY: BodyColor = BodyColor::rgb(128, 128, 128);

    fn gravity() -> AccelSet {
        AccelSet::new().with(NewtonianGravity { G: 1.0, softening: 1e-6 })
    }

    #[test]
    fn single_body_feels_nothing() {
        let sys = System::new(vec![Body::new([1.0, 2.0], [0.0, 0.0], 1.0, GREY)]);
        let mut out = vec![NVec2::new(9.0, 9.0)];
        gravity().accumulate_accels(&sys, &mut out);
        assert_eq!(out[0], NVec2::zeros());
    }

    #[test]
    fn empty_set_zeroes_buffer() {
        let sys = System::new(vec![Body::new([0.0, 0.0], [0.0, 0.0], 1.0, GREY)]);
        let mut out = vec![NVec2::new(1.0, -1.0)];
        AccelSet::new().accumulate_accels(&sys, &mut out);
        assert_eq!(out[0], NVec2::zeros());
    }

    #[test]
    fn terms_are_summed() {
        let sys = System::new(vec![
            Body::new([-1.0, 0.0], [0.0, 0.0], 1.0, GREY),
            Body::new([1.0, 0.0], [0.0, 0.0], 1.0, GREY),
        ]);
        let twice = AccelSet::new()
            .with(NewtonianGravity { G: 1.0, softening: 1e-6 })
            .with(NewtonianGravity { G: 1.0, softening: 1e-6 });

        let mut single = vec![NVec2::zeros(); 2];
        let mut double = vec![NVec2::zeros(); 2];
        gravity().accumulate_accels(&sys, &mut single);
        twice.accumulate_accels(&sys, &mut double);

        assert_eq!(double[0], single[0] * 2.0);
    }

    #[test]
    fn coincident_pair_contributes_nothing() {
        let sys = System::new(vec![
            Body::new([0.5, 0.5], [0.0, 0.0], 1.0, GREY),
            Body::new([0.5, 0.5], [0.0, 0.0], 1.0, GREY),
        ]);
        let mut out = vec![NVec2::zeros(); 2];
        gravity().accumulate_accels(&sys, &mut out);
        assert!(out.iter().all(|a| a.x.is_finite() && a.y.is_finite()));
        assert_eq!(out[0], NVec2::zeros());
    }

    #[test]
    fn near_coincident_pair_stays_finite() {
        // |r|^2 underflows to a subnormal, so G * m / |r|^2 overflows
        let sys = System::new(vec![
            Body::new([0.0, 0.0], [0.0, 0.0], 1.0, GREY),
            Body::new([1e-160, 0.0], [0.0, 0.0], 1.0, GREY),
        ]);
        let mut out = vec![NVec2::zeros(); 2];
        gravity().accumulate_accels(&sys, &mut out);
        assert!(out.iter().all(|a| a.x.is_finite() && a.y.is_finite()), "{:?}", out);
    }
}

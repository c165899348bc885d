//! Initial conditions for the Plummer model.
//!
//! Positions come from the analytic inverse of the cumulative mass profile.
//! Speeds come from rejection sampling of the distribution function of
//! Aarseth, Henon & Wielen (1974), bounded by the local escape velocity.
//! Directions of position and velocity are isotropic and independent.

use rand::Rng;
use rand_distr::{Distribution, Uniform};
use tracing::{debug, trace};

use crate::error::InvalidParameterError;
use crate::sim::body::Body;
use crate::sim::units::{Float, Vector, PI, SQRT_2, TOTAL_MASS};

// Bounds the peak of x^2 (1 - x^2)^3.5 on [0, 1], which is about 0.092.
const ENVELOPE: Float = 0.1;

fn velocity_ratio_density(x: Float) -> Float {
    x * x * (1. - x * x).powf(3.5)
}

/// Radius in units of the scale length, enclosing a uniformly drawn mass fraction.
pub(crate) fn sample_radius<R: Rng + ?Sized>(rng: &mut R) -> Float {
    let mass_fraction: Float = rng.gen();
    1. / (mass_fraction.powf(-2. / 3.) - 1.).sqrt()
}

/// A vector of the given length pointing in a uniformly random direction.
pub(crate) fn randomize_on_sphere<R: Rng + ?Sized>(length: Float, rng: &mut R) -> Vector {
    let cos_theta: Float = Uniform::new(-1., 1.).sample(rng);
    let phi: Float = Uniform::new(0., 2. * PI).sample(rng);
    let sin_theta = (1. - cos_theta * cos_theta).sqrt();
    [
        length * sin_theta * phi.cos(),
        length * sin_theta * phi.sin(),
        length * cos_theta,
    ]
}

/// Draws q = v / v_esc by rejection. Returns the ratio and the number of trials.
///
/// There is no cap on the number of trials. The accept region has positive
/// measure, so only a degenerate random source can keep this looping.
pub(crate) fn sample_velocity_ratio<R: Rng + ?Sized>(rng: &mut R) -> (Float, u64) {
    let candidate: Uniform<Float> = Uniform::new(0., 1.);
    let height: Uniform<Float> = Uniform::new(0., ENVELOPE);
    let mut trials = 0;
    loop {
        trials += 1;
        let x = candidate.sample(rng);
        let y = height.sample(rng);
        if y <= velocity_ratio_density(x) {
            return (x, trials);
        }
    }
}

/// Escape velocity at physical radius `radius` for a model of scale length `scale`.
pub(crate) fn escape_velocity(radius: Float, scale: Float) -> Float {
    SQRT_2 * (scale * scale + radius * radius).powf(-0.25)
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct PlummerSampler;

impl PlummerSampler {
    /// Draws `number_bodies` independent bodies of mass `1 / number_bodies`.
    ///
    /// `radius_scale` is the Plummer scale length. Velocities are scaled with
    /// it so the model stays in virial equilibrium.
    pub(crate) fn generate<R: Rng + ?Sized>(
        &self,
        number_bodies: usize,
        radius_scale: Float,
        rng: &mut R,
    ) -> Result<Vec<Body>, InvalidParameterError> {
        if number_bodies == 0 {
            return Err(InvalidParameterError::BodyCount(number_bodies));
        }
        if !radius_scale.is_finite() || radius_scale <= 0. {
            return Err(InvalidParameterError::Radius(radius_scale));
        }

        let mass = TOTAL_MASS / number_bodies as Float;
        let mut total_trials = 0;
        let mut bodies = Vec::with_capacity(number_bodies);
        for _ in 0..number_bodies {
            let (body, trials) = Self::create_body(mass, radius_scale, rng);
            total_trials += trials;
            bodies.push(body);
        }
        debug!(
            "Sampled {} Plummer bodies, {:.3} velocity trials per body",
            number_bodies,
            total_trials as Float / number_bodies as Float
        );
        Ok(bodies)
    }

    fn create_body<R: Rng + ?Sized>(mass: Float, scale: Float, rng: &mut R) -> (Body, u64) {
        let radius = scale * sample_radius(rng);
        let position = randomize_on_sphere(radius, rng);
        let (ratio, trials) = sample_velocity_ratio(rng);
        trace!("radius {:.4}, velocity ratio {:.4} after {} trials", radius, ratio, trials);
        let velocity = randomize_on_sphere(ratio * escape_velocity(radius, scale), rng);
        (Body::new(position, velocity, mass), trials)
    }
}

use rand::Rng;

use crate::{
    error::InvalidParameterError,
    sim::body::Body,
    sim::initial_parameters::InitialParameters,
    sim::units::{Float, Vector, DIMENSIONALITY},
};

#[derive(Clone, Debug)]
pub(crate) struct StellarSystem {
    pub(crate) bodies: Vec<Body>,
}

impl StellarSystem {
    pub(crate) fn new<R: Rng + ?Sized>(
        params: &InitialParameters,
        rng: &mut R,
    ) -> Result<StellarSystem, InvalidParameterError> {
        let bodies = params
            .model
            .generate(params.body_count, params.radius, rng)?;
        Ok(StellarSystem { bodies })
    }

    pub(crate) fn kinetic_energy(&self) -> Float {
        self.bodies.iter().map(|body| body.kinetic_energy()).sum()
    }

    pub(crate) fn potential_energy(&self, g: Float) -> Float {
        let mut potential = 0.;
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                potential += self.bodies[i].potential_energy_with(&self.bodies[j]);
            }
        }
        g * potential
    }

    /// -V/T, close to 2 for a system in equilibrium.
    pub(crate) fn virial_ratio(&self, g: Float) -> Float {
        -self.potential_energy(g) / self.kinetic_energy()
    }

    pub(crate) fn total_mass(&self) -> Float {
        self.bodies.iter().map(|body| body.mass).sum()
    }

    pub(crate) fn centre_of_mass(&self) -> Vector {
        let total_mass = self.total_mass();
        let mut centre = [0.; DIMENSIONALITY];
        for body in self.bodies.iter() {
            for i in 0..DIMENSIONALITY {
                centre[i] += body.mass * body.position[i] / total_mass;
            }
        }
        centre
    }

    pub(crate) fn mean_velocity(&self) -> Vector {
        let total_mass = self.total_mass();
        let mut mean = [0.; DIMENSIONALITY];
        for body in self.bodies.iter() {
            for i in 0..DIMENSIONALITY {
                mean[i] += body.mass * body.velocity[i] / total_mass;
            }
        }
        mean
    }

    /// Empirical quartiles of the distance from the origin.
    pub(crate) fn radial_quartiles(&self) -> Option<[Float; 3]> {
        let n = self.bodies.len();
        if n == 0 {
            return None;
        }
        let mut distances = self
            .bodies
            .iter()
            .map(|body| body.distance_from_origin())
            .collect::<Vec<Float>>();
        distances.sort_by(|a, b| a.total_cmp(b));
        Some([distances[n / 4], distances[n / 2], distances[3 * n / 4]])
    }

    /// Quartiles of the Plummer radial mass distribution for unit scale length.
    pub(crate) fn analytic_quartiles() -> [Float; 3] {
        [
            (Float::powf(2., 4. / 3.) - 1.).powf(-0.5),
            (Float::powf(2., 2. / 3.) - 1.).powf(-0.5),
            (Float::powf(2., 4. / 3.) * Float::powf(3., -2. / 3.) - 1.).powf(-0.5),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::model::Model;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn two_body_system() -> StellarSystem {
        let body1 = Body::new([1., 0., 0.], [0., 1., 0.], 1.);
        let body2 = Body::new([-1., 0., 0.], [0., -1., 0.], 1.);
        StellarSystem {
            bodies: vec![body1, body2],
        }
    }

    #[test]
    fn energies_of_symmetric_pair() {
        let system = two_body_system();
        assert_relative_eq!(system.kinetic_energy(), 1.);
        assert_relative_eq!(system.potential_energy(1.), -0.5);
        assert_relative_eq!(system.potential_energy(2.), -1.);
        assert_relative_eq!(system.virial_ratio(1.), 0.5);
    }

    #[test]
    fn symmetric_pair_rests_at_origin() {
        let system = two_body_system();
        let centre = system.centre_of_mass();
        let velocity = system.mean_velocity();
        for i in 0..DIMENSIONALITY {
            assert!(centre[i].abs() < 1e-12);
            assert!(velocity[i].abs() < 1e-12);
        }
    }

    #[test]
    fn empty_system_has_no_quartiles() {
        let system = StellarSystem { bodies: vec![] };
        assert!(system.radial_quartiles().is_none());
    }

    #[test]
    fn quartiles_pick_sorted_distances() {
        let bodies = (0..8)
            .rev()
            .map(|i| Body::new([0., i as Float, 0.], [0.; 3], 0.125))
            .collect::<Vec<Body>>();
        let system = StellarSystem { bodies };
        assert_eq!(system.radial_quartiles(), Some([2., 4., 6.]));
    }

    #[test]
    fn analytic_quartiles_of_unit_plummer_model() {
        let quartiles = StellarSystem::analytic_quartiles();
        assert_relative_eq!(quartiles[0], 0.8111492385359816, max_relative = 1e-12);
        assert_relative_eq!(quartiles[1], 1.3047660265041068, max_relative = 1e-12);
        assert_relative_eq!(quartiles[2], 2.174870523324199, max_relative = 1e-12);
    }

    #[test]
    fn system_from_parameters() {
        let params = InitialParameters {
            model: Model::Plummer,
            body_count: 1000,
            radius: 1.,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(2018);
        let system = StellarSystem::new(&params, &mut rng).unwrap();
        println!("Virial ratio: {}", system.virial_ratio(1.));

        assert_eq!(system.bodies.len(), 1000);
        assert_relative_eq!(system.total_mass(), 1., epsilon = 1e-12);
        assert!((system.virial_ratio(1.) - 2.).abs() < 0.5);
    }

    #[test]
    fn zero_bodies_is_rejected() {
        let params = InitialParameters {
            body_count: 0,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            StellarSystem::new(&params, &mut rng),
            Err(InvalidParameterError::BodyCount(0))
        ));
    }
}

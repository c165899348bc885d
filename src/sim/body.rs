use crate::sim::units::{norm, Float, Vector, DIMENSIONALITY};

/// One point mass at t = 0.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Body {
    pub(crate) position: Vector,
    pub(crate) velocity: Vector,
    pub(crate) mass: Float,
}

impl Body {
    pub(crate) fn new(position: Vector, velocity: Vector, mass: Float) -> Body {
        Body {
            position,
            velocity,
            mass,
        }
    }

    /// Re-homes the body, e.g. into one galaxy of a composite system.
    pub(crate) fn with_offset(&self, position_offset: &Vector, velocity_offset: &Vector) -> Body {
        let mut position = self.position;
        let mut velocity = self.velocity;
        for i in 0..DIMENSIONALITY {
            position[i] += position_offset[i];
            velocity[i] += velocity_offset[i];
        }
        Body::new(position, velocity, self.mass)
    }

    pub(crate) fn distance_from_origin(&self) -> Float {
        norm(&self.position)
    }

    pub(crate) fn speed(&self) -> Float {
        norm(&self.velocity)
    }

    pub(crate) fn distance_to(&self, other: &Self) -> Float {
        let mut relative_position = [0.; DIMENSIONALITY];
        for i in 0..DIMENSIONALITY {
            relative_position[i] = self.position[i] - other.position[i];
        }
        norm(&relative_position)
    }

    pub(crate) fn kinetic_energy(&self) -> Float {
        let speed = self.speed();
        0.5 * self.mass * speed * speed
    }

    // G is left to the caller.
    pub(crate) fn potential_energy_with(&self, other: &Self) -> Float {
        -self.mass * other.mass / self.distance_to(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn offset_creates_shifted_copy() {
        let body = Body::new([1., 2., 3.], [0.1, 0.2, 0.3], 0.5);

        let shifted = body.with_offset(&[-100., 0.5, 0.], &[0.5, 0., -0.05]);
        println!("{:?}", shifted);

        assert_eq!(body.position, [1., 2., 3.]);
        assert_eq!(body.velocity, [0.1, 0.2, 0.3]);
        assert_relative_eq!(shifted.position[0], -99.);
        assert_relative_eq!(shifted.position[1], 2.5);
        assert_relative_eq!(shifted.position[2], 3.);
        assert_relative_eq!(shifted.velocity[0], 0.6);
        assert_relative_eq!(shifted.velocity[1], 0.2);
        assert_relative_eq!(shifted.velocity[2], 0.25);
        assert_eq!(shifted.mass, 0.5);
    }

    #[test]
    fn zero_offset_leaves_body_unchanged() {
        let body = Body::new([1., -2., 3.], [-0.1, 0.2, 0.3], 1e-3);
        assert_eq!(body.with_offset(&[0.; 3], &[0.; 3]), body);
    }

    #[test]
    fn kinetic_energy_of_unit_body() {
        let body = Body::new([0.; 3], [3., 4., 0.], 2.);
        assert_relative_eq!(body.speed(), 5.);
        assert_relative_eq!(body.kinetic_energy(), 25.);
    }

    #[test]
    fn potential_energy_is_symmetric_and_negative() {
        let body1 = Body::new([0., 0., 0.], [0.; 3], 2.);
        let body2 = Body::new([0., 3., 4.], [0.; 3], 0.5);

        assert_relative_eq!(body1.distance_to(&body2), 5.);
        assert_relative_eq!(body2.distance_from_origin(), 5.);
        assert_relative_eq!(body1.potential_energy_with(&body2), -0.2);
        assert_relative_eq!(
            body1.potential_energy_with(&body2),
            body2.potential_energy_with(&body1)
        );
    }
}

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::InvalidParameterError;
use crate::sim::body::Body;
use crate::sim::plummer::PlummerSampler;
use crate::sim::units::Float;

/// Stellar distributions that can seed a configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Model {
    Plummer,
}

impl Model {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Model::Plummer => "plummer",
        }
    }

    pub(crate) fn generate<R: Rng + ?Sized>(
        &self,
        number_bodies: usize,
        radius: Float,
        rng: &mut R,
    ) -> Result<Vec<Body>, InvalidParameterError> {
        match self {
            Model::Plummer => PlummerSampler.generate(number_bodies, radius, rng),
        }
    }
}

impl FromStr for Model {
    type Err = InvalidParameterError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "plummer" => Ok(Model::Plummer),
            _ => Err(InvalidParameterError::Model(name.to_string())),
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn parses_model_names_ignoring_case() {
        for name in ["plummer", "Plummer", " PLUMMER "] {
            assert_eq!(name.parse::<Model>(), Ok(Model::Plummer));
        }
        assert_eq!(Model::Plummer.to_string(), "plummer");
    }

    #[test]
    fn unknown_model_is_named_in_error() {
        let error = "king".parse::<Model>().unwrap_err();
        assert_eq!(error, InvalidParameterError::Model("king".to_string()));
        assert!(error.to_string().contains("king"));
    }

    #[test]
    fn model_dispatches_to_sampler() {
        let mut rng1 = ChaCha8Rng::seed_from_u64(8);
        let mut rng2 = ChaCha8Rng::seed_from_u64(8);
        let from_model = Model::Plummer.generate(25, 1., &mut rng1).unwrap();
        let from_sampler = PlummerSampler.generate(25, 1., &mut rng2).unwrap();
        assert_eq!(from_model, from_sampler);
    }
}

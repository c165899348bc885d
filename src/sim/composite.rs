//! Composite systems built from several offset copies of a model.
//!
//! A description names one model and any number of subsystems, e.g. two
//! galaxies on a collision course:
//!
//! ```yaml
//! name: Collision
//! model: plummer
//! systems:
//!   - name: 1st Galaxy
//!     pos: [-100.0, 0.2, 0.3]
//!     vel: [0.5, 0.0, 0.0]
//!     numbodies: 5000
//!   - name: 2nd Galaxy
//!     pos: [100.0, 0.0, 0.0]
//!     vel: [-0.5, 0.05, 0.05]
//!     numbodies: 1000
//! ```

use std::fs;
use std::path::Path;

use rand::Rng;
use serde::Deserialize;
use tracing::info;

use crate::error::{CompositeError, InvalidParameterError};
use crate::sim::body::Body;
use crate::sim::model::Model;
use crate::sim::units::{Float, Vector};

/// One galaxy inside a composite system.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct Subsystem {
    pub(crate) name: String,
    pub(crate) pos: Vector, // centre of the subsystem
    pub(crate) vel: Vector, // bulk velocity of the subsystem
    pub(crate) numbodies: usize,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub(crate) struct CompositeSystem {
    pub(crate) name: String,
    pub(crate) model: String,
    #[serde(default)]
    pub(crate) systems: Vec<Subsystem>,
}

impl CompositeSystem {
    pub(crate) fn from_yaml_str(text: &str) -> Result<CompositeSystem, CompositeError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub(crate) fn load(path: &Path) -> Result<CompositeSystem, CompositeError> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub(crate) fn body_count(&self) -> usize {
        self.systems.iter().map(|system| system.numbodies).sum()
    }

    /// Generates every subsystem and shifts it to its centre and bulk velocity.
    pub(crate) fn expand<R: Rng + ?Sized>(
        &self,
        radius: Float,
        rng: &mut R,
    ) -> Result<Vec<Body>, InvalidParameterError> {
        let model: Model = self.model.parse()?;
        info!("Creating {} using {} model", self.name, model);

        let mut product = Vec::with_capacity(self.body_count());
        for system in self.systems.iter() {
            info!(
                "subsystem: {}, centre={:?}, velocity={:?}, N={}",
                system.name, system.pos, system.vel, system.numbodies
            );
            let bodies = model.generate(system.numbodies, radius, rng)?;
            product.extend(
                bodies
                    .iter()
                    .map(|body| body.with_offset(&system.pos, &system.vel)),
            );
        }
        Ok(product)
    }
}

use super::model::Model;
use super::units::Float;

pub(crate) struct InitialParameters {
    pub(crate) model: Model,
    pub(crate) body_count: usize,
    pub(crate) radius: Float,
}

impl Default for InitialParameters {
    fn default() -> Self {
        Self {
            model: Model::Plummer,
            body_count: 100,
            radius: 1.,
        }
    }
}

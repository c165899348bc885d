pub(crate) mod body;
pub(crate) mod composite;
pub(crate) mod initial_parameters;
pub(crate) mod model;
pub(crate) mod plummer;
pub(crate) mod system;
pub(crate) mod units;

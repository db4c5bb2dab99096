// Domain layer: recipe models, search criteria and ports (interfaces).

pub mod filter;
pub mod model;
pub mod ports;

// Domain layer: the value model and the ports the CLI adapters implement.

pub mod model;
pub mod ports;

// Domain layer: table/record models and the ports the engine runs against.

pub mod model;
pub mod ports;

// Domain layer: board snapshot, derived summary and ports (interfaces).

pub mod model;
pub mod ports;

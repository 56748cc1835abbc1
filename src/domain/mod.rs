// Domain layer: request/response and test case models plus the ports the core depends on.

pub mod model;
pub mod ports;

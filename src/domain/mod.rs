// Domain layer: core models, ports and the thickness algorithms. No I/O here.

pub mod model;
pub mod ports;

pub mod services;

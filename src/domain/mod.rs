// Domain layer: record types and ports. No I/O here.

pub mod model;
pub mod ports;

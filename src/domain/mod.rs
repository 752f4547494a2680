// Domain layer: models, ports and the city service. Nothing here talks to the network or disk.

pub mod model;
pub mod ports;
pub mod services;

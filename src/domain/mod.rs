// Domain layer: the car model, the service port and the preconditions backends share.

pub mod model;
pub mod ports;
pub mod rules;

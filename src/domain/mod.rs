// Domain layer: chart models and ports. No rendering or file-system code here.

pub mod model;
pub mod ports;

// Domain layer: record and entity models, the remote wire contract, and the ports
// the services depend on.

pub mod model;
pub mod numeric;
pub mod ports;
pub mod query;

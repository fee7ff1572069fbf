pub mod generator;
pub mod scenario;
pub mod simulator;
pub mod what_if;

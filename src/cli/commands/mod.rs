pub mod dataset;
pub mod predictions;
pub mod probe;
pub mod setup;

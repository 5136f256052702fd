pub mod audit;
pub mod envelope;

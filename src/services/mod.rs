pub mod data_logger;
pub mod experiment;
pub mod random;
pub mod recommenders;

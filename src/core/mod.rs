// Core modules: error modeling, the dispatch envelope, mode config, and raw flag parsing.
pub mod envelope;
pub mod error;
pub mod mode;
pub mod passthrough;

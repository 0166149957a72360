pub mod benchmark;
pub mod config;
pub mod encoder;
pub mod normalizer;
pub mod pipeline;
pub mod scoring;

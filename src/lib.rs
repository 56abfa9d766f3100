pub mod analyzer;
pub mod commands;
pub mod config;
pub mod model;
pub mod normalizer;
pub mod report;
pub mod seed;
pub mod storage;
pub mod utils;

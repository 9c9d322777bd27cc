pub mod app;
pub mod config;
pub mod discovery;
pub mod domain;
pub mod error;
pub mod metadata;
pub mod output;
pub mod patterns;
pub mod resolver;

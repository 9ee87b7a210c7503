//! Wetterau Core - Domain models, municipality registry, and configuration
//!
//! This crate contains the shared domain logic for the Wetterau statistics
//! toolkit: the canonical Gemeinde registry, name normalization, and the
//! layered configuration used by the geocoding pipeline.

pub mod config;
pub mod error;
pub mod gemeinden;
pub mod models;
pub mod normalize;
pub mod textnorm;

pub use error::{Result, WetterauError};

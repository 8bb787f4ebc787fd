#![deny(unsafe_code)]
//! Core types for the gravlines generative image.
//!
//! Provides the immutable [`RenderConfig`], the seedable [`Xorshift64`]
//! PRNG, [`PointMass`] generation, the mass-induced direction [`Field`], the
//! trajectory [`Palette`], and trajectory tracing.

pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod mass;
pub mod palette;
pub mod prng;
pub mod trajectory;

pub use color::Rgba;
pub use config::RenderConfig;
pub use error::EngineError;
pub use field::Field;
pub use mass::{generate_masses, PointMass};
pub use palette::Palette;
pub use prng::Xorshift64;
pub use trajectory::{trace, Trajectory};

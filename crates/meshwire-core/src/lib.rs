//! # meshwire-core
//!
//! Core types and primitives shared by every Meshwire crate:
//! scene paths, homogeneous transform helpers, configuration and error types.

pub mod config;
pub mod error;
pub mod math;
pub mod path;

pub use config::*;

pub use error::{MeshwireError, MeshwireResult};
pub use math::{DMat4, DQuat, DVec3};
pub use path::Path;

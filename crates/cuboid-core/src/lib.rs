//! Cuboid Core - Foundational math for the Cuboid world editor
//!
//! This crate provides the types every other Cuboid crate depends on:
//! - `Vector3` - 3-component vector algebra
//! - `Matrix4` - 4x4 homogeneous matrices and their composition contract
//! - `ObjectId` - Stable scene object identifiers
//! - `Color` - RGBA color
//! - Error types and Result alias

mod error;
mod id;
mod matrix;
mod types;
mod vector;

pub use error::{CuboidError, Result};
pub use id::ObjectId;
pub use matrix::Matrix4;
pub use types::Color;
pub use vector::Vector3;

//! Spatex Core Types and Definitions
//!
//! This crate provides the foundational types for the Spatex 3D diagram
//! language. It includes:
//!
//! - **Values**: The attribute value union produced by the parser ([`value::Value`])
//! - **Vectors**: Fixed-length vector normalization ([`vector::normalize_vec`])
//! - **Catalog**: The known shape types and their defaults ([`catalog`] module)
//! - **Scene**: The normalized scene tree handed to renderers ([`scene`] module)

pub mod catalog;
pub mod scene;
pub mod value;
pub mod vector;

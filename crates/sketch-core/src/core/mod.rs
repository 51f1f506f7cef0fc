//! # Core Module
//!
//! The stateless foundation of the engine: the attributed molecular graph,
//! the algorithms that derive structure from it (ring perception, traversal,
//! formula calculation), and the pure geometry used to draw it.
//!
//! ## Key Components
//!
//! - [`models`] - Atoms, bonds, rings, molecules, and the root model container
//! - [`geometry`] - Rectangles, convex hulls, and bond-line construction
//! - [`config`] - The drawing configuration threaded through geometry calls

pub mod config;
pub mod geometry;
pub mod models;

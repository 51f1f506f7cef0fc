//! # Core Models Module
//!
//! The fundamental data structures representing a sketched chemical
//! structure. Ownership runs strictly downward: a [`model::Model`] owns
//! top-level [`molecule::Molecule`]s, each of which owns its atoms, bonds,
//! and perceived rings in arena storage. Cross-references between entities
//! are arena keys, never pointers, so the graph can be cyclic without
//! ownership cycles.
//!
//! ## Key Components
//!
//! - [`element`] - Static periodic-table reference data
//! - [`atom`] - Graph nodes: position, element, charge, isotope
//! - [`bond`] - Graph edges: order, stereo descriptor, placement hint
//! - [`ring`] - Perceived cycles with derived centroid and priority
//! - [`molecule`] - The owning graph plus ring perception and traversal
//! - [`model`] - Root container: relabeling and aggregate queries
//! - [`ids`] - Arena key types for atoms and bonds

pub mod atom;
pub mod bond;
pub mod element;
pub mod ids;
pub mod model;
pub mod molecule;
pub mod ring;

//! # chemsketch Core Library
//!
//! The molecular graph engine behind a 2D chemistry sketching editor: it keeps
//! a chemical structure (atoms, bonds, molecules) as an attributed graph,
//! perceives its rings, derives the geometry needed to draw bonds, and keeps a
//! transactional undo/redo journal over every edit.
//!
//! ## Architectural Philosophy
//!
//! The library is split into two layers with a strict dependency direction,
//! so the graph model stays testable without any editor attached.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Molecule`, `Model`,
//!   the periodic table), ring perception and traversal algorithms, and pure
//!   geometry (bounding boxes, convex hulls, bond-line construction).
//!
//! - **[`edit`]: The Editing Layer.** Reversible edit operations expressed as
//!   an inspectable command type (`EditOp`) and the transactional undo/redo
//!   journal (`UndoHistory`) that brackets them.
//!
//! Rendering, file conversion (CML), and host-application glue are external
//! collaborators: they consume the derived geometry and the graph fields this
//! crate keeps consistent, but live outside it.

pub mod core;
pub mod edit;

//! The stateful editing layer: reversible edit operations and the
//! transactional undo/redo journal that replays them against a model.

pub mod error;
pub mod history;
pub mod ops;

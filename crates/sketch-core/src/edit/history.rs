//! Transactional undo/redo journal.
//!
//! Edits are grouped into transactions delimited by buffer records, so a
//! gesture spanning several [`EditOp`]s undoes and redoes as one unit.
//! The journal records operations that have already been applied; undo
//! replays the stored inverses newest first, redo replays the originals
//! oldest first.

use super::error::EditError;
use super::ops::EditOp;
use crate::core::models::model::Model;
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("No open transaction to commit")]
    UnbalancedTransaction,

    #[error("Edits can only be recorded inside a transaction")]
    RecordOutsideTransaction,

    #[error("Journal is out of step; expected a buffer record")]
    MissingBufferRecord,

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    #[error("Journal replay failed: {0}")]
    Edit(#[from] EditError),
}

/// Journal entry: either a transaction boundary or a recorded edit.
#[derive(Debug, Clone)]
enum UndoRecord {
    /// Marks the start/end of an undoable unit.
    Buffer,
    Action {
        /// Transaction nesting depth the edit was recorded at.
        level: usize,
        description: String,
        undo: EditOp,
        redo: EditOp,
    },
}

impl UndoRecord {
    fn is_buffer(&self) -> bool {
        matches!(self, UndoRecord::Buffer)
    }
}

/// Notification that the journal changed the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryEvent {
    Committed,
    Undone,
    Redone,
}

pub type HistoryCallback = Box<dyn Fn(HistoryEvent) + Send + Sync>;

/// The undo/redo journal for one model.
#[derive(Default)]
pub struct UndoHistory {
    undo_stack: Vec<UndoRecord>,
    redo_stack: Vec<UndoRecord>,
    transaction_level: usize,
    callback: Option<HistoryCallback>,
}

impl fmt::Debug for UndoHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UndoHistory")
            .field("undo_stack", &self.undo_stack)
            .field("redo_stack", &self.redo_stack)
            .field("transaction_level", &self.transaction_level)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

impl UndoHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer notified after every commit, undo, and redo.
    pub fn set_callback(&mut self, callback: HistoryCallback) {
        self.callback = Some(callback);
    }

    fn notify(&self, event: HistoryEvent) {
        if let Some(callback) = &self.callback {
            callback(event);
        }
    }

    pub fn transaction_level(&self) -> usize {
        self.transaction_level
    }

    /// True while any recorded edit remains below the buffer markers.
    pub fn can_undo(&self) -> bool {
        self.undo_stack.iter().any(|record| !record.is_buffer())
    }

    pub fn can_redo(&self) -> bool {
        self.redo_stack.iter().any(|record| !record.is_buffer())
    }

    /// Opens a transaction. Only the outermost call writes a buffer
    /// record, so nested gestures fold into one undoable unit.
    pub fn begin_transaction(&mut self) {
        if self.transaction_level == 0 {
            self.undo_stack.push(UndoRecord::Buffer);
        }
        self.transaction_level += 1;
        trace!(level = self.transaction_level, "transaction opened");
    }

    /// Closes a transaction; the outermost close seals the unit with a
    /// buffer record and notifies the observer.
    pub fn commit_transaction(&mut self) -> Result<(), HistoryError> {
        if self.transaction_level == 0 {
            return Err(HistoryError::UnbalancedTransaction);
        }
        self.transaction_level -= 1;
        if self.transaction_level == 0 {
            self.undo_stack.push(UndoRecord::Buffer);
            debug!("transaction committed");
            self.notify(HistoryEvent::Committed);
        }
        Ok(())
    }

    /// Records an already-applied edit. Anything previously undone can no
    /// longer be redone once a new edit is recorded.
    pub fn record_action(
        &mut self,
        description: impl Into<String>,
        op: EditOp,
    ) -> Result<(), HistoryError> {
        if self.transaction_level == 0 {
            return Err(HistoryError::RecordOutsideTransaction);
        }
        self.redo_stack.clear();
        self.undo_stack.push(UndoRecord::Action {
            level: self.transaction_level,
            description: description.into(),
            undo: op.inverted(),
            redo: op,
        });
        Ok(())
    }

    /// Applies an edit to the model and records it in one step. The model
    /// is left untouched when no transaction is open.
    pub fn apply_and_record(
        &mut self,
        description: impl Into<String>,
        op: EditOp,
        model: &mut Model,
    ) -> Result<(), HistoryError> {
        if self.transaction_level == 0 {
            return Err(HistoryError::RecordOutsideTransaction);
        }
        op.apply(model)?;
        self.record_action(description, op)
    }

    /// Reverts the most recent transaction, replaying the stored inverse
    /// ops newest first. The whole unit, buffers included, moves onto the
    /// redo stack.
    pub fn undo(&mut self, model: &mut Model) -> Result<(), HistoryError> {
        if !self.can_undo() {
            return Err(HistoryError::NothingToUndo);
        }
        match self.undo_stack.pop() {
            Some(closing @ UndoRecord::Buffer) => self.redo_stack.push(closing),
            Some(other) => {
                self.undo_stack.push(other);
                return Err(HistoryError::MissingBufferRecord);
            }
            None => return Err(HistoryError::NothingToUndo),
        }

        while let Some(record) = self.undo_stack.pop() {
            let done = record.is_buffer();
            if let UndoRecord::Action {
                undo,
                description,
                level,
                ..
            } = &record
            {
                trace!(action = %description, level = *level, "undoing");
                undo.apply(model)?;
            }
            self.redo_stack.push(record);
            if done {
                break;
            }
        }
        debug!("transaction undone");
        self.notify(HistoryEvent::Undone);
        Ok(())
    }

    /// Re-applies the most recently undone transaction, replaying the
    /// original ops oldest first.
    pub fn redo(&mut self, model: &mut Model) -> Result<(), HistoryError> {
        if !self.can_redo() {
            return Err(HistoryError::NothingToRedo);
        }
        match self.redo_stack.pop() {
            Some(opening @ UndoRecord::Buffer) => self.undo_stack.push(opening),
            Some(other) => {
                self.redo_stack.push(other);
                return Err(HistoryError::MissingBufferRecord);
            }
            None => return Err(HistoryError::NothingToRedo),
        }

        while let Some(record) = self.redo_stack.pop() {
            let done = record.is_buffer();
            if let UndoRecord::Action {
                redo,
                description,
                level,
                ..
            } = &record
            {
                trace!(action = %description, level = *level, "redoing");
                redo.apply(model)?;
            }
            self.undo_stack.push(record);
            if done {
                break;
            }
        }
        debug!("transaction redone");
        self.notify(HistoryEvent::Redone);
        Ok(())
    }

    /// Drops both stacks, e.g. after loading a fresh document.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.transaction_level = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::bond::{BondOrder, BondStereo};
    use crate::core::models::element;
    use crate::core::models::molecule::Molecule;
    use crate::edit::ops::{AtomSpec, BondSpec};
    use nalgebra::Point2;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn create_model() -> Model {
        let mut molecule = Molecule::new();
        let a = molecule.add_atom(Atom::new(element::element("C"), Point2::new(0.0, 0.0)));
        let b = molecule.add_atom(Atom::new(element::element("C"), Point2::new(20.0, 0.0)));
        molecule.add_bond_between(a, b, BondOrder::Single).unwrap();
        let mut model = Model::new();
        model.molecules.push(molecule);
        model.relabel();
        model
    }

    fn add_atom_op(label: &str, x: f64) -> EditOp {
        EditOp::AddAtom {
            molecule: "m1".to_string(),
            atom: AtomSpec {
                label: label.to_string(),
                element: element::element("C"),
                position: Point2::new(x, 0.0),
                formal_charge: None,
                isotope_number: None,
            },
        }
    }

    fn add_bond_op(label: &str, start: &str, end: &str) -> EditOp {
        EditOp::AddBond {
            molecule: "m1".to_string(),
            bond: BondSpec {
                label: label.to_string(),
                start_atom: start.to_string(),
                end_atom: end.to_string(),
                order: BondOrder::Single,
                stereo: BondStereo::None,
                placement: None,
            },
        }
    }

    fn atom_count(model: &Model) -> usize {
        model.molecule_by_id("m1").unwrap().atom_count()
    }

    #[test]
    fn a_transaction_undoes_and_redoes_as_one_unit() {
        let mut model = create_model();
        let mut history = UndoHistory::new();

        history.begin_transaction();
        history
            .apply_and_record("add atom", add_atom_op("a3", 40.0), &mut model)
            .unwrap();
        history
            .apply_and_record("add bond", add_bond_op("b2", "a2", "a3"), &mut model)
            .unwrap();
        history.commit_transaction().unwrap();
        assert_eq!(atom_count(&model), 3);
        assert!(history.can_undo());
        assert!(!history.can_redo());

        history.undo(&mut model).unwrap();
        assert_eq!(atom_count(&model), 2);
        assert!(model.molecule_by_id("m1").unwrap().bond_by_label("b2").is_none());
        assert!(!history.can_undo());
        assert!(history.can_redo());

        history.redo(&mut model).unwrap();
        assert_eq!(atom_count(&model), 3);
        assert!(model.molecule_by_id("m1").unwrap().bond_by_label("b2").is_some());
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_replays_inverses_newest_first() {
        // the bond references the atom added in the same transaction, so
        // ordering mistakes surface as replay errors
        let mut model = create_model();
        let mut history = UndoHistory::new();

        history.begin_transaction();
        history
            .apply_and_record("add atom", add_atom_op("a3", 40.0), &mut model)
            .unwrap();
        history
            .apply_and_record("add bond", add_bond_op("b2", "a2", "a3"), &mut model)
            .unwrap();
        history.commit_transaction().unwrap();

        history.undo(&mut model).unwrap();
        history.redo(&mut model).unwrap();
        history.undo(&mut model).unwrap();
        assert_eq!(atom_count(&model), 2);
    }

    #[test]
    fn several_transactions_undo_one_at_a_time() {
        let mut model = create_model();
        let mut history = UndoHistory::new();

        for (i, label) in ["a3", "a4"].iter().enumerate() {
            history.begin_transaction();
            history
                .apply_and_record("add atom", add_atom_op(label, 40.0 + i as f64), &mut model)
                .unwrap();
            history.commit_transaction().unwrap();
        }
        assert_eq!(atom_count(&model), 4);

        history.undo(&mut model).unwrap();
        assert_eq!(atom_count(&model), 3);
        history.undo(&mut model).unwrap();
        assert_eq!(atom_count(&model), 2);
        assert!(matches!(
            history.undo(&mut model),
            Err(HistoryError::NothingToUndo)
        ));
    }

    #[test]
    fn nested_transactions_fold_into_the_outermost() {
        let mut model = create_model();
        let mut history = UndoHistory::new();

        history.begin_transaction();
        history
            .apply_and_record("add atom", add_atom_op("a3", 40.0), &mut model)
            .unwrap();
        history.begin_transaction();
        history
            .apply_and_record("add atom", add_atom_op("a4", 60.0), &mut model)
            .unwrap();
        history.commit_transaction().unwrap();
        assert_eq!(history.transaction_level(), 1);
        history.commit_transaction().unwrap();
        assert_eq!(history.transaction_level(), 0);

        history.undo(&mut model).unwrap();
        assert_eq!(atom_count(&model), 2);
    }

    #[test]
    fn commit_without_begin_is_unbalanced() {
        let mut history = UndoHistory::new();
        assert!(matches!(
            history.commit_transaction(),
            Err(HistoryError::UnbalancedTransaction)
        ));
    }

    #[test]
    fn recording_outside_a_transaction_is_rejected() {
        let mut history = UndoHistory::new();
        assert!(matches!(
            history.record_action("stray", add_atom_op("a3", 0.0)),
            Err(HistoryError::RecordOutsideTransaction)
        ));
    }

    #[test]
    fn applying_outside_a_transaction_leaves_the_model_untouched() {
        let mut model = create_model();
        let mut history = UndoHistory::new();
        let before = model.total_atoms_count();

        assert!(matches!(
            history.apply_and_record("stray", add_atom_op("a3", 40.0), &mut model),
            Err(HistoryError::RecordOutsideTransaction)
        ));
        assert_eq!(model.total_atoms_count(), before);
        assert!(!history.can_undo());
    }

    #[test]
    fn undo_and_redo_on_empty_stacks_are_errors() {
        let mut model = create_model();
        let mut history = UndoHistory::new();
        assert!(matches!(
            history.undo(&mut model),
            Err(HistoryError::NothingToUndo)
        ));
        assert!(matches!(
            history.redo(&mut model),
            Err(HistoryError::NothingToRedo)
        ));
    }

    #[test]
    fn a_new_edit_clears_the_redo_stack() {
        let mut model = create_model();
        let mut history = UndoHistory::new();

        history.begin_transaction();
        history
            .apply_and_record("add atom", add_atom_op("a3", 40.0), &mut model)
            .unwrap();
        history.commit_transaction().unwrap();
        history.undo(&mut model).unwrap();
        assert!(history.can_redo());

        history.begin_transaction();
        history
            .apply_and_record("add atom", add_atom_op("a5", 80.0), &mut model)
            .unwrap();
        history.commit_transaction().unwrap();
        assert!(!history.can_redo());
    }

    #[test]
    fn labels_survive_a_remove_undo_round_trip() {
        let mut model = create_model();
        let mut history = UndoHistory::new();

        let molecule = model.molecule_by_id("m1").unwrap();
        let atom_id = molecule.atom_by_label("a2").unwrap();
        let op = EditOp::remove_atom(molecule, atom_id).unwrap();

        history.begin_transaction();
        history.apply_and_record("delete atom", op, &mut model).unwrap();
        history.commit_transaction().unwrap();
        assert_eq!(atom_count(&model), 1);

        history.undo(&mut model).unwrap();
        let molecule = model.molecule_by_id("m1").unwrap();
        assert!(molecule.atom_by_label("a2").is_some());
        assert!(molecule.bond_by_label("b1").is_some());
        assert_eq!(molecule.bond_count(), 1);
    }

    #[test]
    fn callback_fires_for_commit_undo_and_redo() {
        let mut model = create_model();
        let mut history = UndoHistory::new();
        let commits = Arc::new(AtomicUsize::new(0));
        let undos = Arc::new(AtomicUsize::new(0));
        let redos = Arc::new(AtomicUsize::new(0));
        let (c, u, r) = (commits.clone(), undos.clone(), redos.clone());
        history.set_callback(Box::new(move |event| {
            match event {
                HistoryEvent::Committed => c.fetch_add(1, Ordering::SeqCst),
                HistoryEvent::Undone => u.fetch_add(1, Ordering::SeqCst),
                HistoryEvent::Redone => r.fetch_add(1, Ordering::SeqCst),
            };
        }));

        history.begin_transaction();
        history.begin_transaction();
        history
            .apply_and_record("add atom", add_atom_op("a3", 40.0), &mut model)
            .unwrap();
        history.commit_transaction().unwrap();
        // inner commit does not notify
        assert_eq!(commits.load(Ordering::SeqCst), 0);
        history.commit_transaction().unwrap();
        assert_eq!(commits.load(Ordering::SeqCst), 1);

        history.undo(&mut model).unwrap();
        history.redo(&mut model).unwrap();
        assert_eq!(undos.load(Ordering::SeqCst), 1);
        assert_eq!(redos.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn clear_forgets_both_stacks() {
        let mut model = create_model();
        let mut history = UndoHistory::new();

        history.begin_transaction();
        history
            .apply_and_record("add atom", add_atom_op("a3", 40.0), &mut model)
            .unwrap();
        history.commit_transaction().unwrap();
        history.undo(&mut model).unwrap();

        history.clear();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.transaction_level(), 0);
    }
}

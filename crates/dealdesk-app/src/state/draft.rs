//! # Draft State
//!
//! Manages the line items of the offer/contract currently being edited.
//!
//! ## Thread Safety
//! The draft is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple commands may access/modify the draft
//! 2. Only one command should modify the draft at a time
//! 3. Commands can run concurrently
//!
//! ## Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft State Operations                               │
//! │                                                                         │
//! │  Frontend Action          Command                 Draft State Change    │
//! │  ───────────────          ───────                 ──────────────────    │
//! │                                                                         │
//! │  Add line ───────────────► add_item() ──────────► items.push(item)     │
//! │                                                                         │
//! │  Change quantity ────────► update_quantity() ───► items[i].qty = n     │
//! │                                                                         │
//! │  Remove line ────────────► remove_item() ───────► items.remove(i)      │
//! │                                                                         │
//! │  Save to backend ────────► save_offer() ────────► dirty = false        │
//! │                                                                         │
//! │  Totals preview ─────────► totals() ────────────► (recomputed, never   │
//! │                                                     stored)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dealdesk_core::totals::{DocumentTotals, LineTotals};
use dealdesk_core::types::LineItem;
use dealdesk_core::validation;
use dealdesk_core::{CoreError, CoreResult, MAX_DOCUMENT_ITEMS};

/// A line item in the draft being edited.
///
/// ## Design Notes
/// - `line_id`: local identity for edits; the backend never sees it.
///   Lines inside a document have no server-side ids of their own, so the
///   editor mints UUIDs to address rows in the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftItem {
    /// Local line identity (UUID v4), minted when the row is added.
    pub line_id: String,

    /// Short name shown in the document table.
    pub name: String,

    /// Optional longer description.
    pub description: Option<String>,

    /// Quantity in whole units.
    pub quantity: i64,

    /// Free-form unit label ("pcs", "hour", "day").
    pub unit: String,

    /// Price per unit in cents.
    pub unit_price_cents: i64,

    /// VAT rate in basis points.
    pub vat_rate_bps: u32,

    /// Discount in basis points. 0 means no discount.
    pub discount_bps: u32,
}

impl DraftItem {
    /// Creates a new draft line with a fresh local id.
    pub fn new(
        name: impl Into<String>,
        quantity: i64,
        unit: impl Into<String>,
        unit_price_cents: i64,
        vat_rate_bps: u32,
        discount_bps: u32,
    ) -> Self {
        DraftItem {
            line_id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: None,
            quantity,
            unit: unit.into(),
            unit_price_cents,
            vat_rate_bps,
            discount_bps,
        }
    }

    /// Converts to the wire shape sent to the backend.
    pub fn to_line_item(&self) -> LineItem {
        LineItem {
            name: self.name.clone(),
            description: self.description.clone(),
            quantity: self.quantity,
            unit: self.unit.clone(),
            unit_price_cents: self.unit_price_cents,
            vat_rate_bps: self.vat_rate_bps,
            discount_bps: self.discount_bps,
        }
    }

    /// Net/VAT/gross preview for this line.
    pub fn totals(&self) -> LineTotals {
        self.to_line_item().totals()
    }
}

/// The document draft under edit.
///
/// ## Invariants
/// - Every line passed validation when it was added or edited
/// - Maximum lines: 100 (configured in dealdesk-core)
/// - Totals are derived on demand and never stored
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentDraft {
    /// Lines in document order.
    pub items: Vec<DraftItem>,

    /// True when the draft has edits the backend has not seen.
    pub dirty: bool,
}

impl DocumentDraft {
    /// Creates a new empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a line to the draft.
    ///
    /// ## Behavior
    /// - Validates the line's fields and the document size first
    /// - Lines are not merged: two rows for the same product are legal
    ///   in an offer (different discounts, different descriptions)
    pub fn add_item(&mut self, item: DraftItem) -> CoreResult<()> {
        validation::validate_document_size(self.items.len())?;
        validation::validate_title("name", &item.name)?;
        validation::validate_quantity(item.quantity)?;
        validation::validate_unit_price_cents(item.unit_price_cents)?;
        validation::validate_rate_bps("vat_rate", item.vat_rate_bps)?;
        validation::validate_rate_bps("discount", item.discount_bps)?;

        self.items.push(item);
        self.dirty = true;
        Ok(())
    }

    /// Updates the quantity of a line.
    ///
    /// ## Behavior
    /// - If quantity is 0: removes the line
    /// - If the line is not found: returns an error
    pub fn update_quantity(&mut self, line_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_item(line_id);
        }

        validation::validate_quantity(quantity)?;

        if let Some(item) = self.items.iter_mut().find(|i| i.line_id == line_id) {
            item.quantity = quantity;
            self.dirty = true;
            Ok(())
        } else {
            Err(CoreError::LineItemNotFound(line_id.to_string()))
        }
    }

    /// Removes a line from the draft by its local id.
    pub fn remove_item(&mut self, line_id: &str) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.line_id != line_id);

        if self.items.len() == initial_len {
            Err(CoreError::LineItemNotFound(line_id.to_string()))
        } else {
            self.dirty = true;
            Ok(())
        }
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.items.clear();
        self.dirty = false;
    }

    /// Marks the draft as saved (edits acknowledged by the backend).
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Returns the number of lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Checks if the draft is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the lines in wire shape for a create/update request.
    pub fn line_items(&self) -> Vec<LineItem> {
        self.items.iter().map(DraftItem::to_line_item).collect()
    }

    /// Rollup totals preview, recomputed from the current lines.
    pub fn totals(&self) -> DocumentTotals {
        DocumentTotals::of(&self.line_items())
    }
}

/// Shared draft state.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<DocumentDraft>>` because:
/// - `Arc`: Allows shared ownership across tasks
/// - `Mutex`: Ensures only one task modifies the draft at a time
#[derive(Debug, Default)]
pub struct DraftState {
    draft: Arc<Mutex<DocumentDraft>>,
}

impl DraftState {
    /// Creates a new empty draft state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the draft.
    pub fn with_draft<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&DocumentDraft) -> R,
    {
        let draft = self.draft.lock().expect("Draft mutex poisoned");
        f(&draft)
    }

    /// Executes a function with write access to the draft.
    pub fn with_draft_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut DocumentDraft) -> R,
    {
        let mut draft = self.draft.lock().expect("Draft mutex poisoned");
        f(&mut draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn consulting_line(quantity: i64) -> DraftItem {
        DraftItem::new("Consulting", quantity, "day", 10000, 2300, 1000)
    }

    #[test]
    fn test_add_item() {
        let mut draft = DocumentDraft::new();
        draft.add_item(consulting_line(2)).unwrap();

        assert_eq!(draft.item_count(), 1);
        assert!(draft.dirty);
    }

    #[test]
    fn test_add_item_validates() {
        let mut draft = DocumentDraft::new();

        let mut bad = consulting_line(2);
        bad.name = "".to_string();
        assert!(draft.add_item(bad).is_err());

        assert!(draft.add_item(consulting_line(0)).is_err());
        assert!(draft.is_empty());
    }

    #[test]
    fn test_document_size_limit() {
        let mut draft = DocumentDraft::new();
        for _ in 0..MAX_DOCUMENT_ITEMS {
            draft.add_item(consulting_line(1)).unwrap();
        }
        assert!(draft.add_item(consulting_line(1)).is_err());
        assert_eq!(draft.item_count(), MAX_DOCUMENT_ITEMS);
    }

    #[test]
    fn test_update_quantity() {
        let mut draft = DocumentDraft::new();
        let line = consulting_line(2);
        let line_id = line.line_id.clone();
        draft.add_item(line).unwrap();

        draft.update_quantity(&line_id, 5).unwrap();
        assert_eq!(draft.items[0].quantity, 5);

        // Zero removes the line
        draft.update_quantity(&line_id, 0).unwrap();
        assert!(draft.is_empty());

        // Gone now
        assert!(draft.update_quantity(&line_id, 1).is_err());
    }

    #[test]
    fn test_totals_preview() {
        let mut draft = DocumentDraft::new();
        draft.add_item(consulting_line(2)).unwrap();

        // 2 × 100.00, 10% discount, 23% VAT
        let totals = draft.totals();
        assert_eq!(totals.net_cents, 18000);
        assert_eq!(totals.vat_cents, 4140);
        assert_eq!(totals.gross_cents, 22140);
        assert_eq!(totals.gross_cents, totals.net_cents + totals.vat_cents);
    }

    #[test]
    fn test_mark_saved_clears_dirty() {
        let mut draft = DocumentDraft::new();
        draft.add_item(consulting_line(1)).unwrap();
        assert!(draft.dirty);

        draft.mark_saved();
        assert!(!draft.dirty);
    }

    #[test]
    fn test_duplicate_lines_allowed() {
        let mut draft = DocumentDraft::new();
        draft.add_item(consulting_line(1)).unwrap();
        draft.add_item(consulting_line(1)).unwrap();
        assert_eq!(draft.item_count(), 2);
    }

    #[test]
    fn test_draft_state_wrapper() {
        let state = DraftState::new();
        state
            .with_draft_mut(|d| d.add_item(consulting_line(3)))
            .unwrap();
        let count = state.with_draft(|d| d.item_count());
        assert_eq!(count, 1);
    }
}

//! The cart state machine.
//!
//! A [`CartStore`] is an ordered sequence of line items, one per product id.
//! All mutation goes through the operations here; handlers never touch the
//! underlying `Vec` directly. The store itself is synchronous - the service
//! wraps it in a mutex so each operation is atomic with respect to the
//! others (see [`crate::state::AppState`]).

use kubemart_core::LineItem;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors produced by cart operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The add request is missing (or has a falsy) id, name, or price.
    #[error("Missing item fields")]
    MissingFields,

    /// No line item matches the requested id.
    #[error("Item not found: {0}")]
    ItemNotFound(i64),

    /// The adjust action is neither `increase` nor `decrease`.
    #[error("Invalid action: {0:?}")]
    InvalidAction(String),
}

/// Quantity adjustment directions accepted by [`CartStore::adjust_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityAction {
    Increase,
    Decrease,
}

impl QuantityAction {
    /// Parse the wire-level action string.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidAction` for anything other than the two
    /// recognized values.
    pub fn parse(action: &str) -> Result<Self, CartError> {
        match action {
            "increase" => Ok(Self::Increase),
            "decrease" => Ok(Self::Decrease),
            other => Err(CartError::InvalidAction(other.to_string())),
        }
    }
}

/// Payload for [`CartStore::add`].
///
/// All fields are optional at the wire level; validation happens inside the
/// store so a failure never leaves partial state behind.
#[derive(Debug, Clone, Deserialize)]
pub struct AddItemInput {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<u32>,
}

/// The single authoritative in-memory cart.
///
/// Initialized empty at process start; state is lost on restart by design.
#[derive(Debug, Default)]
pub struct CartStore {
    items: Vec<LineItem>,
}

impl CartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current sequence, verbatim.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Owned copy of the current sequence, for responses.
    #[must_use]
    pub fn snapshot(&self) -> Vec<LineItem> {
        self.items.clone()
    }

    /// Add an item, merging quantities when the id already exists.
    ///
    /// New items are appended at the end; an existing item keeps its
    /// position and gains the requested quantity. A missing quantity (or an
    /// explicit 0, which the original treated as absent) counts as 1.
    /// Merged quantities saturate at `u32::MAX` so a zero- or wrapped-
    /// quantity row can never appear.
    ///
    /// # Errors
    ///
    /// Returns `CartError::MissingFields` when id, name, or price is absent
    /// or falsy. Note that this rejects a legitimate zero price as well -
    /// deliberately kept from the original contract (zero id and empty name
    /// fall out the same way). Validation happens before any mutation.
    pub fn add(&mut self, input: AddItemInput) -> Result<&[LineItem], CartError> {
        let (Some(id), Some(name), Some(price)) = (input.id, input.name, input.price) else {
            return Err(CartError::MissingFields);
        };
        if id == 0 || name.is_empty() || price <= Decimal::ZERO {
            return Err(CartError::MissingFields);
        }

        let quantity = input.quantity.filter(|q| *q > 0).unwrap_or(1);

        if let Some(existing) = self.items.iter_mut().find(|item| item.id == id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
        } else {
            self.items.push(LineItem {
                id,
                name,
                price,
                quantity,
            });
        }

        Ok(&self.items)
    }

    /// Increase or decrease a line item's quantity by one.
    ///
    /// Decreasing a quantity-1 item removes the row entirely; a
    /// zero-quantity row never exists. Relative order of the remaining
    /// items is preserved.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ItemNotFound` when no line item matches `id`;
    /// the store is left unchanged.
    pub fn adjust_quantity(
        &mut self,
        id: i64,
        action: QuantityAction,
    ) -> Result<&[LineItem], CartError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(CartError::ItemNotFound(id))?;

        match action {
            QuantityAction::Increase => {
                if let Some(item) = self.items.get_mut(index) {
                    item.quantity = item.quantity.saturating_add(1);
                }
            }
            QuantityAction::Decrease => match self.items.get_mut(index) {
                Some(item) if item.quantity > 1 => item.quantity -= 1,
                _ => {
                    self.items.remove(index);
                }
            },
        }

        Ok(&self.items)
    }

    /// Remove the line item with matching `id`, if present.
    ///
    /// Absence is not an error; the unchanged sequence comes back.
    pub fn remove(&mut self, id: i64) -> &[LineItem] {
        self.items.retain(|item| item.id != id);
        &self.items
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

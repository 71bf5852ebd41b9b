//! Saved-card wallet.
//!
//! The form hands finished `SavedCard` records to a `CardStore`. The store
//! owns ids and the single default-card flag; it never sees a full number.
//!
//! # Example
//!
//! ```
//! use card_form::store::{CardStore, MemoryCardStore};
//! use card_form::{CardBrand, SavedCard};
//!
//! let mut wallet = MemoryCardStore::new();
//! let card = SavedCard {
//!     id: 0,
//!     masked_number: "•••• •••• •••• 0366".into(),
//!     last_four: "0366".into(),
//!     brand: CardBrand::Visa,
//!     holder_name: "JANE DOE".into(),
//!     expiry_month: "09".into(),
//!     expiry_year: "28".into(),
//!     is_default: false,
//! };
//!
//! let id = wallet.add(card);
//! assert_eq!(wallet.default_card().map(|c| c.id), Some(id));
//! ```

use crate::error::StoreError;
use crate::SavedCard;
use tracing::debug;

/// Storage for saved cards.
///
/// Implementations keep at most one card flagged as default.
pub trait CardStore: Send + Sync {
    /// Stores a new card and returns its assigned id.
    ///
    /// The first card stored becomes the default. A card submitted with
    /// `is_default` set takes the flag from every other card.
    fn add(&mut self, card: SavedCard) -> u64;

    /// Replaces the card with the same id.
    ///
    /// A replacement submitted with `is_default` takes the flag from every
    /// other card. Replacing the default card keeps it the default; use
    /// `set_default` to move the flag.
    fn replace(&mut self, card: SavedCard) -> Result<(), StoreError>;

    /// Removes a card and returns it.
    fn remove(&mut self, id: u64) -> Result<SavedCard, StoreError>;

    /// Looks up a card by id.
    fn get(&self, id: u64) -> Option<&SavedCard>;

    /// All cards in insertion order.
    fn list(&self) -> &[SavedCard];

    /// Makes the given card the only default card.
    fn set_default(&mut self, id: u64) -> Result<(), StoreError>;

    /// The default card, if any.
    fn default_card(&self) -> Option<&SavedCard> {
        self.list().iter().find(|card| card.is_default)
    }

    /// Number of stored cards.
    fn len(&self) -> usize {
        self.list().len()
    }

    /// Returns true if no cards are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory `CardStore`.
#[derive(Debug, Clone, Default)]
pub struct MemoryCardStore {
    cards: Vec<SavedCard>,
    next_id: u64,
}

impl MemoryCardStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: u64) -> Result<usize, StoreError> {
        self.cards
            .iter()
            .position(|card| card.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn clear_default_except(&mut self, id: u64) {
        for card in self.cards.iter_mut().filter(|card| card.id != id) {
            card.is_default = false;
        }
    }
}

impl CardStore for MemoryCardStore {
    fn add(&mut self, mut card: SavedCard) -> u64 {
        self.next_id += 1;
        card.id = self.next_id;
        card.is_default |= self.cards.is_empty();

        let id = card.id;
        if card.is_default {
            self.clear_default_except(id);
        }
        debug!(id, card = %card, default = card.is_default, "saved card added");
        self.cards.push(card);
        id
    }

    fn replace(&mut self, mut card: SavedCard) -> Result<(), StoreError> {
        let index = self.position(card.id)?;
        let id = card.id;
        card.is_default |= self.cards[index].is_default;
        let is_default = card.is_default;
        self.cards[index] = card;
        if is_default {
            self.clear_default_except(id);
        }
        debug!(id, "saved card replaced");
        Ok(())
    }

    fn remove(&mut self, id: u64) -> Result<SavedCard, StoreError> {
        let index = self.position(id)?;
        let removed = self.cards.remove(index);

        // Keep a default while any card remains
        if removed.is_default {
            if let Some(first) = self.cards.first_mut() {
                first.is_default = true;
            }
        }
        debug!(id, "saved card removed");
        Ok(removed)
    }

    fn get(&self, id: u64) -> Option<&SavedCard> {
        self.cards.iter().find(|card| card.id == id)
    }

    fn list(&self) -> &[SavedCard] {
        &self.cards
    }

    fn set_default(&mut self, id: u64) -> Result<(), StoreError> {
        let index = self.position(id)?;
        self.cards[index].is_default = true;
        self.clear_default_except(id);
        debug!(id, "default card changed");
        Ok(())
    }
}

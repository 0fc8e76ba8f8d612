//! Tracking of fields the user has edited directly.
//!
//! A flagged field belongs to the user: the solver never writes it. Flags are
//! only ever set, never cleared, not even when a house switches between back
//! and lay or the anchor moves.

use serde::Serialize;

/// A house field that can be pinned by a direct edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Odd,
    Stake,
    Liability,
    Commission,
}

/// Per-house record of directly edited fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverrideFlags {
    pub odd: bool,
    pub stake: bool,
    pub liability: bool,
    pub commission: bool,
}

impl OverrideFlags {
    /// Mark a field as directly edited.
    pub fn set(&mut self, field: Field) {
        match field {
            Field::Odd => self.odd = true,
            Field::Stake => self.stake = true,
            Field::Liability => self.liability = true,
            Field::Commission => self.commission = true,
        }
    }

    /// Whether the solver must leave this house's stake alone.
    ///
    /// A lay house with a user-owned liability has its stake fixed by the
    /// lay relation, so it is pinned as well.
    #[must_use]
    pub const fn pins_stake(&self, is_lay: bool) -> bool {
        self.stake || (is_lay && self.liability)
    }
}

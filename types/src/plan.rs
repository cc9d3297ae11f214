use serde::{Deserialize, Serialize};

use crate::HISTORY_SLOTS;

/// One position in the dot row.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Filled,

    #[default]
    Empty,
}

impl Slot {
    pub const fn is_filled(self) -> bool {
        matches!(self, Self::Filled)
    }
}

impl From<bool> for Slot {
    fn from(completed: bool) -> Self {
        if completed {
            Self::Filled
        } else {
            Self::Empty
        }
    }
}

/// Everything needed to paint a single widget instance.
///
/// The dot row is a fixed-size array, so a plan can never carry more or
/// fewer than [`HISTORY_SLOTS`] slots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenderPlan {
    /// Streak counter exactly as it should be displayed
    pub streak_text: String,

    /// Dot row, index 0 is the first dot rendered
    pub dots: [Slot; HISTORY_SLOTS],
}

impl RenderPlan {
    pub fn filled_count(&self) -> usize {
        self.dots.iter().filter(|slot| slot.is_filled()).count()
    }
}

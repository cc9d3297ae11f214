use super::WidgetRenderer;
use tracing::debug;
use types::{
    RenderPlan, Slot, WidgetSnapshot, COMPLETED_FLAG, DEFAULT_HISTORY,
    DEFAULT_STREAK, HISTORY_KEY, HISTORY_SEPARATOR, HISTORY_SLOTS, STREAK_KEY,
};

/// Renderer for the habit streak widget
///
/// Reads two keys from the snapshot:
/// - `streak`: string - shown as-is, no numeric validation
/// - `history_7`: string - comma-separated day flags, `"1"` means completed
///
/// Behavior:
/// - Missing keys fall back to `"0"` and an all-empty history
/// - Any token other than exactly `"1"` renders as an empty dot
/// - Short histories are padded with empty dots, long ones are truncated
pub struct StreakRenderer;

impl WidgetRenderer for StreakRenderer {
    fn plan(&self, snapshot: &WidgetSnapshot) -> RenderPlan {
        RenderPlan {
            streak_text: resolve_streak(snapshot).to_string(),
            dots: resolve_history(snapshot),
        }
    }
}

pub fn resolve_streak(snapshot: &WidgetSnapshot) -> &str {
    snapshot.get(STREAK_KEY).unwrap_or(DEFAULT_STREAK)
}

pub fn resolve_history(snapshot: &WidgetSnapshot) -> [Slot; HISTORY_SLOTS] {
    parse_history(snapshot.get(HISTORY_KEY).unwrap_or(DEFAULT_HISTORY))
}

/// Map a comma-separated history onto the fixed dot row.
pub fn parse_history(history: &str) -> [Slot; HISTORY_SLOTS] {
    let mut dots = [Slot::Empty; HISTORY_SLOTS];
    let mut token_count = 0;
    let mut unrecognized = 0;

    for (i, token) in history.split(HISTORY_SEPARATOR).enumerate() {
        token_count += 1;

        if token != COMPLETED_FLAG && token != "0" {
            unrecognized += 1;
        }

        if let Some(slot) = dots.get_mut(i) {
            *slot = Slot::from(token == COMPLETED_FLAG);
        }
    }

    if token_count != HISTORY_SLOTS || unrecognized > 0 {
        debug!(
            token_count,
            unrecognized, "History does not hold exactly seven 0/1 flags"
        );
    }

    dots
}

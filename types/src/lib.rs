mod plan;
mod snapshot;

pub use plan::{RenderPlan, Slot};
pub use snapshot::WidgetSnapshot;

/// Number of day slots rendered in the dot row.
pub const HISTORY_SLOTS: usize = 7;

/// Snapshot key holding the pre-formatted streak count.
pub const STREAK_KEY: &str = "streak";

/// Snapshot key holding the comma-separated completion history.
pub const HISTORY_KEY: &str = "history_7";

pub const DEFAULT_STREAK: &str = "0";
pub const DEFAULT_HISTORY: &str = "0,0,0,0,0,0,0";

/// The only history token that counts as a completed day.
pub const COMPLETED_FLAG: &str = "1";
pub const HISTORY_SEPARATOR: char = ',';

pub mod streak;

use std::collections::HashMap;
use std::hash::Hash;

pub use streak::{parse_history, resolve_history, resolve_streak, StreakRenderer};
pub use types::{RenderPlan, Slot, WidgetSnapshot};

/// Trait for turning a snapshot of widget data into render plans
pub trait WidgetRenderer: Send + Sync {
    /// Compute the plan for a single widget from the snapshot
    fn plan(&self, snapshot: &WidgetSnapshot) -> RenderPlan;

    /// Compute plans for a batch of widget instances
    ///
    /// Instances are never inspected, only used as keys. Every instance gets
    /// the same plan, and a repeated instance yields a single entry.
    fn render_batch<I>(
        &self,
        instances: &[I],
        snapshot: &WidgetSnapshot,
    ) -> HashMap<I, RenderPlan>
    where
        I: Eq + Hash + Clone,
        Self: Sized,
    {
        if instances.is_empty() {
            return HashMap::new();
        }

        let plan = self.plan(snapshot);

        instances
            .iter()
            .map(|instance| (instance.clone(), plan.clone()))
            .collect()
    }
}

/// Render every instance from the same snapshot with [`StreakRenderer`].
///
/// Never fails. Missing or malformed data falls back to the defaults.
pub fn render<I>(
    instances: &[I],
    snapshot: &WidgetSnapshot,
) -> HashMap<I, RenderPlan>
where
    I: Eq + Hash + Clone,
{
    StreakRenderer.render_batch(instances, snapshot)
}

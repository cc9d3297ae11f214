use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use types::{HISTORY_SLOTS, RenderPlan, Slot};

/// Resource names used when the environment does not override them
pub const DEFAULT_LAYOUT: &str = "widget_layout";
pub const DEFAULT_STREAK_VIEW: &str = "streak_value";
pub const DEFAULT_FILLED_DRAWABLE: &str = "dot_filled";
pub const DEFAULT_EMPTY_DRAWABLE: &str = "dot_empty";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("resource name for {field} must not be empty")]
    EmptyResourceName { field: &'static str },
    #[error("dot view {view_id} is assigned to more than one slot")]
    DuplicateDotView { view_id: String },
    #[error("expected {expected} dot views, found {found}")]
    WrongDotViewCount { expected: usize, found: usize },
}

/// Environment overrides for the platform resource names.
///
/// Resource handles may be numeric, and the environment provider parses
/// those into numbers, so every field accepts any scalar as text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default, deserialize_with = "scalar_text")]
    pub widget_layout: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub streak_view: Option<String>,
    /// Comma-separated, one id per dot slot
    #[serde(default, deserialize_with = "scalar_text")]
    pub dot_views: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub filled_drawable: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub empty_drawable: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Unsigned(n) => n.to_string(),
            Self::Signed(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_text))
}

/// A single view-binding instruction for the widget host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ViewAction {
    SetText { view_id: String, text: String },
    SetImage { view_id: String, drawable: String },
}

/// Maps the abstract render plan onto concrete platform resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMap {
    pub layout: String,
    pub streak_view: String,
    pub dot_views: [String; HISTORY_SLOTS],
    pub filled_drawable: String,
    pub empty_drawable: String,
}

impl Default for ResourceMap {
    fn default() -> Self {
        Self {
            layout: DEFAULT_LAYOUT.to_string(),
            streak_view: DEFAULT_STREAK_VIEW.to_string(),
            dot_views: std::array::from_fn(|i| format!("dot{}", i + 1)),
            filled_drawable: DEFAULT_FILLED_DRAWABLE.to_string(),
            empty_drawable: DEFAULT_EMPTY_DRAWABLE.to_string(),
        }
    }
}

impl ResourceMap {
    /// Apply environment overrides on top of the defaults and validate.
    ///
    /// # Errors
    /// If a name is blank, the dot view list has the wrong length, or a dot
    /// view id is used twice.
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let dot_views = match config.dot_views {
            Some(list) => parse_dot_views(&list)?,
            None => defaults.dot_views,
        };

        let resources = Self {
            layout: config.widget_layout.unwrap_or(defaults.layout),
            streak_view: config.streak_view.unwrap_or(defaults.streak_view),
            dot_views,
            filled_drawable: config
                .filled_drawable
                .unwrap_or(defaults.filled_drawable),
            empty_drawable: config
                .empty_drawable
                .unwrap_or(defaults.empty_drawable),
        };

        resources.validate()?;
        Ok(resources)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("widget_layout", &self.layout),
            ("streak_view", &self.streak_view),
            ("filled_drawable", &self.filled_drawable),
            ("empty_drawable", &self.empty_drawable),
        ];

        for (field, value) in named {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyResourceName { field });
            }
        }

        let mut seen = HashSet::new();
        for view_id in &self.dot_views {
            if view_id.trim().is_empty() {
                return Err(ConfigError::EmptyResourceName {
                    field: "dot_views",
                });
            }
            if !seen.insert(view_id.as_str()) {
                return Err(ConfigError::DuplicateDotView {
                    view_id: view_id.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn drawable(&self, slot: Slot) -> &str {
        match slot {
            Slot::Filled => &self.filled_drawable,
            Slot::Empty => &self.empty_drawable,
        }
    }

    /// Streak text first, then one image per dot in slot order.
    pub fn view_actions(&self, plan: &RenderPlan) -> Vec<ViewAction> {
        let mut actions = Vec::with_capacity(HISTORY_SLOTS + 1);

        actions.push(ViewAction::SetText {
            view_id: self.streak_view.clone(),
            text: plan.streak_text.clone(),
        });

        actions.extend(self.dot_views.iter().zip(plan.dots).map(
            |(view_id, slot)| ViewAction::SetImage {
                view_id: view_id.clone(),
                drawable: self.drawable(slot).to_string(),
            },
        ));

        actions
    }
}

fn parse_dot_views(list: &str) -> Result<[String; HISTORY_SLOTS], ConfigError> {
    let views: Vec<String> =
        list.split(',').map(|id| id.trim().to_string()).collect();

    let found = views.len();
    views
        .try_into()
        .map_err(|_| ConfigError::WrongDotViewCount {
            expected: HISTORY_SLOTS,
            found,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn plan(streak: &str, dots: [Slot; HISTORY_SLOTS]) -> RenderPlan {
        RenderPlan {
            streak_text: streak.to_string(),
            dots,
        }
    }

    #[test]
    fn test_numeric_overrides_are_kept_as_text() {
        let config: Config = serde_json::from_value(json!({
            "streak_view": 2_131_230_800_u64,
            "dot_views": "1,2,3,4,5,6,7",
            "filled_drawable": -5
        }))
        .unwrap();

        let resources = ResourceMap::from_config(config).unwrap();

        assert_eq!(resources.streak_view, "2131230800");
        assert_eq!(resources.dot_views[0], "1");
        assert_eq!(resources.filled_drawable, "-5");
        assert_eq!(resources.empty_drawable, "dot_empty");
    }

    #[test]
    fn test_default_resources() {
        let resources = ResourceMap::from_config(Config::default()).unwrap();

        assert_eq!(resources.layout, "widget_layout");
        assert_eq!(resources.streak_view, "streak_value");
        assert_eq!(
            resources.dot_views,
            ["dot1", "dot2", "dot3", "dot4", "dot5", "dot6", "dot7"]
                .map(String::from)
        );
        assert_eq!(resources.drawable(Slot::Filled), "dot_filled");
        assert_eq!(resources.drawable(Slot::Empty), "dot_empty");
    }

    #[test]
    fn test_overrides_are_applied() {
        let resources = ResourceMap::from_config(Config {
            widget_layout: Some("streak_layout".to_string()),
            dot_views: Some("a, b,c,d,e,f,g".to_string()),
            filled_drawable: Some("ic_done".to_string()),
            ..Config::default()
        })
        .unwrap();

        assert_eq!(resources.layout, "streak_layout");
        assert_eq!(resources.dot_views[1], "b");
        assert_eq!(resources.drawable(Slot::Filled), "ic_done");
        assert_eq!(resources.drawable(Slot::Empty), "dot_empty");
    }

    #[test]
    fn test_wrong_dot_view_count() {
        let result = ResourceMap::from_config(Config {
            dot_views: Some("dot1,dot2,dot3".to_string()),
            ..Config::default()
        });

        assert_eq!(
            result,
            Err(ConfigError::WrongDotViewCount {
                expected: 7,
                found: 3
            })
        );
    }

    #[test]
    fn test_duplicate_dot_view() {
        let result = ResourceMap::from_config(Config {
            dot_views: Some("d1,d2,d3,d4,d5,d6,d1".to_string()),
            ..Config::default()
        });

        assert_eq!(
            result,
            Err(ConfigError::DuplicateDotView {
                view_id: "d1".to_string()
            })
        );
    }

    #[test]
    fn test_blank_resource_name() {
        let result = ResourceMap::from_config(Config {
            empty_drawable: Some("  ".to_string()),
            ..Config::default()
        });

        assert_eq!(
            result,
            Err(ConfigError::EmptyResourceName {
                field: "empty_drawable"
            })
        );

        let result = ResourceMap::from_config(Config {
            dot_views: Some("d1,d2,,d4,d5,d6,d7".to_string()),
            ..Config::default()
        });

        assert_eq!(
            result,
            Err(ConfigError::EmptyResourceName { field: "dot_views" })
        );
    }

    #[test]
    fn test_view_actions_shape() {
        let resources = ResourceMap::default();
        let actions = resources.view_actions(&plan(
            "5",
            [
                Slot::Filled,
                Slot::Empty,
                Slot::Filled,
                Slot::Empty,
                Slot::Empty,
                Slot::Empty,
                Slot::Filled,
            ],
        ));

        assert_eq!(actions.len(), 8);
        assert_eq!(
            serde_json::to_value(&actions[..2]).unwrap(),
            json!([
                { "action": "set_text", "view_id": "streak_value", "text": "5" },
                { "action": "set_image", "view_id": "dot1", "drawable": "dot_filled" }
            ])
        );
        assert_eq!(
            actions[7],
            ViewAction::SetImage {
                view_id: "dot7".to_string(),
                drawable: "dot_filled".to_string(),
            }
        );
    }
}

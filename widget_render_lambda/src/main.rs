use chrono::Utc;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use tracing::{debug, info, warn};
use types::WidgetSnapshot;

mod resources;
use resources::{Config, ConfigError, ResourceMap, ViewAction};

/// Update broadcast from the widget host
#[derive(Debug, Deserialize)]
struct WidgetUpdateEvent {
    widget_ids: Vec<i32>,
    #[serde(default)]
    widget_data: Map<String, JsonValue>,
}

#[derive(Debug, Serialize)]
struct WidgetViewUpdate {
    widget_id: i32,
    layout: String,
    views: Vec<ViewAction>,
}

#[derive(Debug, Serialize)]
struct WidgetUpdateResponse {
    widgets_rendered: usize,
    rendered_at: String,
    updates: Vec<WidgetViewUpdate>,
}

#[derive(Debug, Clone)]
struct AppContext {
    resources: ResourceMap,
}

impl hw_app::ContextProvider<Config> for AppContext {
    type Error = ConfigError;

    fn new(config: Config) -> Result<Self, Self::Error> {
        Ok(Self {
            resources: ResourceMap::from_config(config)?,
        })
    }
}

async fn function_handler(
    context: &AppContext,
    event: LambdaEvent<WidgetUpdateEvent>,
) -> Result<WidgetUpdateResponse, Error> {
    let WidgetUpdateEvent {
        widget_ids,
        widget_data,
    } = event.payload;

    if widget_ids.is_empty() {
        warn!("Update event carried no widget ids");
    } else {
        info!("Rendering {} widgets", widget_ids.len());
    }

    let snapshot = WidgetSnapshot::from_json_map(widget_data);

    Ok(render_updates(context, &widget_ids, &snapshot))
}

fn render_updates(
    context: &AppContext,
    widget_ids: &[i32],
    snapshot: &WidgetSnapshot,
) -> WidgetUpdateResponse {
    let plans = widget_renderer::render(widget_ids, snapshot);

    let mut updates: Vec<WidgetViewUpdate> = plans
        .into_iter()
        .map(|(widget_id, plan)| {
            debug!(
                widget_id,
                filled = plan.filled_count(),
                "Rendered widget plan"
            );
            WidgetViewUpdate {
                widget_id,
                layout: context.resources.layout.clone(),
                views: context.resources.view_actions(&plan),
            }
        })
        .collect();
    updates.sort_by_key(|update| update.widget_id);

    WidgetUpdateResponse {
        widgets_rendered: updates.len(),
        rendered_at: Utc::now().to_rfc3339(),
        updates,
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let context = hw_app::create_app_context::<AppContext, Config>()?;

    run(service_fn(|event| async {
        function_handler(&context, event).await
    }))
    .await
}

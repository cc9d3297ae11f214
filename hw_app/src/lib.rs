use figment::{Figment, providers::Env};
use serde::de::DeserializeOwned;
use thiserror::Error;

pub trait ContextProvider<Config>: Sized {
    type Error: std::error::Error + Send + Sync + 'static;

    fn new(config: Config) -> Result<Self, Self::Error>;
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] figment::Error),
    #[error("invalid configuration: {0}")]
    Context(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Initialize the application context with configuration from environment variables.
/// The configuration is extracted using figment.
///
/// # Arguments
/// None
///
/// # Returns
/// The application context built from the configuration as specified by
/// the trait.
///
/// # Errors
/// If the configuration cannot be extracted from the environment variables
/// or if the context rejects the extracted configuration.
///
pub fn create_app_context<A, Config>() -> Result<A, AppError>
where
    A: ContextProvider<Config>,
    Config: DeserializeOwned,
{
    init_tracing();

    let config: Config = extract_config(&Figment::new().merge(Env::raw()))?;

    A::new(config).map_err(|e| AppError::Context(Box::new(e)))
}

/// Structured JSON logs on stdout, filtered by `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .json()
        // allow log level to be overridden by RUST_LOG env var
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        // this needs to be set to remove duplicated information in the log.
        .with_current_span(false)
        // ANSI color codes are noise once the logs are collected.
        .with_ansi(false)
        // the log collector adds the ingestion time.
        .without_time()
        // remove the name of the function from every log entry
        .with_target(false)
        .init();
}

/// Extract a typed configuration from an already assembled figment.
///
/// # Errors
/// If a required key is missing or a value has the wrong type.
pub fn extract_config<Config: DeserializeOwned>(
    figment: &Figment,
) -> Result<Config, figment::Error> {
    let config = figment.extract()?;
    tracing::debug!("Configuration loaded");
    Ok(config)
}

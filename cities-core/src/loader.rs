use tracing::{debug, warn};

use crate::{
    client::{CityApi, HttpCityApi},
    config::{Config, RenderMode},
    error::LoadError,
    model::{City, Credentials},
    notify::Notifier,
    sink::RowSink,
};

/// Shown to the user when the list could not be loaded.
pub const UNAVAILABLE_MESSAGE: &str = "Ops! Servidor indisponível.";

/// The single row rendered in place of the list on failure.
pub const EMPTY_PLACEHOLDER: &str = "Não há cidades a serem listadas.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoaderOptions {
    pub require_token: bool,
    pub render_mode: RenderMode,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Both calls succeeded; this many rows were appended.
    Rendered(usize),
    /// The placeholder row was rendered and the user notified.
    Failed,
}

/// Logs in, fetches the city list and renders it into a [`RowSink`].
#[derive(Debug)]
pub struct CityListLoader<A> {
    api: A,
    credentials: Credentials,
    options: LoaderOptions,
}

impl CityListLoader<HttpCityApi> {
    pub fn from_config(config: &Config) -> Self {
        let options = LoaderOptions {
            require_token: config.require_token,
            render_mode: config.render_mode,
        };
        Self::new(HttpCityApi::new(config.base_url.clone()), config.credentials(), options)
    }
}

impl<A: CityApi> CityListLoader<A> {
    pub fn new(api: A, credentials: Credentials, options: LoaderOptions) -> Self {
        Self { api, credentials, options }
    }

    pub fn options(&self) -> LoaderOptions {
        self.options
    }

    /// Log in and fetch the cities. The cities request is only issued once
    /// the login response has been fully read.
    pub async fn load(&self) -> Result<Vec<City>, LoadError> {
        let token = self.api.login(&self.credentials).await?;

        if self.options.require_token && !token.is_present() {
            return Err(LoadError::MissingToken);
        }

        self.api.fetch_cities(&token).await
    }

    /// Run the whole workflow. Never fails: any error is turned into a
    /// notification plus a placeholder row.
    pub async fn run(&self, sink: &mut dyn RowSink, notifier: &mut dyn Notifier) -> LoadOutcome {
        let result = self.load().await;

        if self.options.render_mode == RenderMode::Replace {
            sink.clear();
        }

        match result {
            Ok(cities) => {
                for city in &cities {
                    sink.append_row(&city.name);
                }
                debug!(rows = cities.len(), "rendered city list");
                LoadOutcome::Rendered(cities.len())
            }
            Err(err) => {
                warn!(error = %err, "failed to load city list");
                notifier.notify(UNAVAILABLE_MESSAGE);
                sink.append_row(EMPTY_PLACEHOLDER);
                LoadOutcome::Failed
            }
        }
    }
}

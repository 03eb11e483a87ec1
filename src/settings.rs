//! Layered service settings.
//!
//! Lowest to highest precedence: built-in defaults, an optional settings file
//! (`recipes.toml` unless another name is given), then `RECIPES_*`
//! environment variables.

use serde::Deserialize;

use crate::error::Error;

/// Runtime settings for the recipe service.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Interface to listen on.
    pub host: String,
    pub port: u16,
    /// Start with the two built-in recipes instead of an empty store.
    pub seed: bool,
}

impl Settings {
    /// Loads `recipes.{toml,json,yaml,…}` from the working directory, if present.
    pub fn load() -> Result<Self, Error> {
        Self::load_from("recipes")
    }

    /// Loads settings from `path` (extension optional; the file may be absent).
    pub fn load_from(path: &str) -> Result<Self, Error> {
        let settings = config::Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 5000)?
            .set_default("seed", true)?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("RECIPES").try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// `host:port`, ready for [`Server::bind`](crate::Server::bind).
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

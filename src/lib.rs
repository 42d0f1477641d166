//! XmlDocLSP: completion for extended XML documentation comment elements.
//!
//! Inside C# `///` comments the server offers the Sandcastle-style
//! elements (`<code>`, `<note>`, `<revisionHistory>`, …), their attributes
//! and their attribute values.  The crate is split into:
//!
//! - [`registry`]: the immutable element catalog and its candidate queries
//! - [`syntax`]: the lossless tree of a documentation comment
//! - [`completion`]: caret context resolution, candidates, insertion and
//!   triggering
//! - [`config`]: layered configuration
//! - `server`: the `LanguageServer` implementation on [`Backend`]
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use tower_lsp::Client;
use tower_lsp::lsp_types::Url;

pub mod completion;
pub mod config;
pub mod registry;
mod server;
pub mod syntax;
pub mod types;
pub mod util;

pub use config::Config;
pub use types::*;

pub struct Backend {
    name: String,
    version: String,
    /// Full text of every open document.
    documents: Arc<RwLock<HashMap<Url, String>>>,
    /// Configuration before files and client options are applied.
    base_config: Config,
    /// The effective configuration.
    config: Arc<RwLock<Config>>,
    /// Overrides received in `initializationOptions`.
    client_overrides: Arc<RwLock<config::ConfigOverrides>>,
    workspace_root: Arc<RwLock<Option<PathBuf>>>,
    client: Option<Client>,
}

impl Backend {
    fn with_client(client: Option<Client>) -> Self {
        Self {
            name: "XmlDocLSP".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            documents: Arc::new(RwLock::new(HashMap::new())),
            base_config: Config::default(),
            config: Arc::new(RwLock::new(Config::default())),
            client_overrides: Arc::new(RwLock::new(config::ConfigOverrides::default())),
            workspace_root: Arc::new(RwLock::new(None)),
            client,
        }
    }

    pub fn new(client: Client) -> Self {
        Self::with_client(Some(client))
    }

    /// A backend with no client attached, for tests.
    pub fn new_test() -> Self {
        Self::with_client(None)
    }

    /// Use `config` as the lowest configuration layer.
    pub fn with_base_config(mut self, config: Config) -> Self {
        self.base_config = config;
        *self.config.write() = config;
        self
    }

    /// The effective configuration.
    pub fn config(&self) -> Config {
        *self.config.read()
    }

    pub fn workspace_root(&self) -> Option<PathBuf> {
        self.workspace_root.read().clone()
    }

    /// The stored text of an open document.
    pub fn document(&self, uri: &Url) -> Option<String> {
        self.documents.read().get(uri).cloned()
    }

    /// Recompute the effective configuration from all layers.
    ///
    /// Configuration files are only read when `include_files` is set.
    pub(crate) fn reload_config(&self, include_files: bool) {
        let mut config = self.base_config;
        if include_files {
            config.load_files(self.workspace_root().as_deref());
        }
        config.apply(*self.client_overrides.read());
        *self.config.write() = config;
    }
}

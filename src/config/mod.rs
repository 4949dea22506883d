use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use log::{info, warn};

use crate::auth::FixedCredentials;
use crate::components::TemplateSet;
use crate::errors::WikiError;
use crate::services::render_service::{EDIT_TEMPLATE, VIEW_TEMPLATE};
use crate::services::{LinkMode, LinkTransformer, PageRenderer, PageStore};
use crate::types::{is_valid_title, AppState};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_WELCOME_TITLE: &str = "Welcome";

/// Application configuration and constants
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub template_dir: PathBuf,
    pub port: u16,
    pub host: String,
    pub welcome_title: String,
    pub admin_username: String,
    pub admin_password: String,
    pub link_mode: LinkMode,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            template_dir: PathBuf::from("templates"),
            port: DEFAULT_PORT,
            host: "0.0.0.0".to_string(),
            welcome_title: DEFAULT_WELCOME_TITLE.to_string(),
            admin_username: "admin".to_string(),
            admin_password: "123456".to_string(),
            link_mode: LinkMode::Literal,
        }
    }

    /// Create configuration with custom storage and listen values
    pub fn with_custom(
        data_dir: PathBuf,
        template_dir: PathBuf,
        port: Option<u16>,
        host: Option<String>,
    ) -> Self {
        Self {
            data_dir,
            template_dir,
            port: port.unwrap_or(DEFAULT_PORT),
            host: host.unwrap_or_else(|| "0.0.0.0".to_string()),
            ..Self::new()
        }
    }

    /// Get the socket address for binding
    pub fn socket_addr(&self) -> Result<SocketAddr, WikiError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| WikiError::Config(format!("invalid listen address {}:{}: {e}", self.host, self.port)))
    }

    /// Build the shared handler state: creates the data directory when
    /// missing and loads the template set once.
    pub fn into_state(self) -> Result<AppState, WikiError> {
        if !is_valid_title(&self.welcome_title) {
            return Err(WikiError::Config(format!(
                "welcome title {:?} must match [a-zA-Z0-9]+",
                self.welcome_title
            )));
        }

        if !self.data_dir.is_dir() {
            info!("Creating data directory {:?}", self.data_dir);
            std::fs::create_dir_all(&self.data_dir)?;
        }

        let templates = TemplateSet::load(&self.template_dir)?;
        for name in [VIEW_TEMPLATE, EDIT_TEMPLATE] {
            if !templates.contains(name) {
                warn!(
                    "Template {:?} missing from {:?}, pages using it will fail to render",
                    name, self.template_dir
                );
            }
        }
        info!("Wiki links rendered in {:?} mode", self.link_mode);
        let renderer = PageRenderer::new(templates, LinkTransformer::new(self.link_mode));
        let verifier = FixedCredentials::new(self.admin_username, self.admin_password);

        Ok(AppState {
            store: Arc::new(PageStore::new(self.data_dir)),
            renderer: Arc::new(renderer),
            verifier: Arc::new(verifier),
            welcome_title: Arc::from(self.welcome_title),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

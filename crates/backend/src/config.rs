use std::path::{Path, PathBuf};

use floorplan_shared::config::{ConfigError, ViewerConfig};

/// Process-level settings, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub assets_dir: PathBuf,
    pub dist_dir: PathBuf,
    pub viewer: ViewerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: 3000,
            assets_dir: PathBuf::from("assets"),
            dist_dir: PathBuf::from("dist"),
            viewer: ViewerConfig::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerConfigError {
    #[error("PORT must be a valid port number, got {0:?}")]
    InvalidPort(String),
    #[error(transparent)]
    Viewer(#[from] ConfigError),
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ServerConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ServerConfigError> {
        let mut config = ServerConfig::default();
        if let Some(raw) = lookup("PORT") {
            config.port = raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ServerConfigError::InvalidPort(raw))?;
        }
        if let Some(dir) = lookup("ASSETS_DIR") {
            config.assets_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("DIST_DIR") {
            config.dist_dir = PathBuf::from(dir);
        }
        config.viewer = ViewerConfig::from_lookup(&lookup)?;
        Ok(config)
    }

    /// On-disk location of the floor-plan image, if its URL points into `/static`.
    pub fn image_path(&self) -> Option<PathBuf> {
        static_file_path(&self.assets_dir, &self.viewer.image_url)
    }
}

/// Map a `/static/...` URL onto the assets directory.
fn static_file_path(assets_dir: &Path, url: &str) -> Option<PathBuf> {
    let rest = url.strip_prefix("/static/")?;
    if rest.is_empty() || rest.split('/').any(|seg| seg == "..") {
        return None;
    }
    Some(assets_dir.join(rest))
}

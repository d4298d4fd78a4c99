use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// Document store connection settings.
///
/// `connection_string` selects the backend: `mongodb://` / `mongodb+srv://`
/// for MongoDB, `memory://` for the in-process store.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub connection_string: String,
    #[serde(default = "default_database_name")]
    pub database_name: String,
    #[serde(default = "default_collection")]
    pub collection: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            connection_string: String::new(),
            database_name: default_database_name(),
            collection: default_collection(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

fn default_database_name() -> String { "animal".into() }
fn default_collection() -> String { "animals".into() }
fn default_connect_timeout() -> u64 { 10 }

const SUPPORTED_SCHEMES: [&str; 3] = ["mongodb://", "mongodb+srv://", "memory://"];

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

/// Parse the file at `path`; `None` when it does not exist.
pub fn load_from_file(path: &str) -> Result<Option<AppConfig>> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse(&content).map(Some),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), fall back to defaults when the
    /// file is missing, then apply env overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_from_file(&config_path())?.unwrap_or_default();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env();
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            self.worker_threads = Some(w);
        }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        let url = std::env::var("DATABASE_URL").ok();
        let name = std::env::var("DATABASE_NAME").ok();
        self.apply_overrides(url.as_deref(), name.as_deref());
    }

    /// `DATABASE_URL` / `DATABASE_NAME` win over the file when set and non-blank.
    fn apply_overrides(&mut self, url: Option<&str>, name: Option<&str>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.connection_string = url.to_string();
        }
        if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
            self.database_name = name.to_string();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.connection_string.trim().is_empty() {
            return Err(anyhow!(
                "database.connection_string is empty; set it in config.toml or DATABASE_URL"
            ));
        }
        let lower = self.connection_string.to_lowercase();
        if !SUPPORTED_SCHEMES.iter().any(|s| lower.starts_with(s)) {
            return Err(anyhow!(
                "database.connection_string must start with one of {:?}",
                SUPPORTED_SCHEMES
            ));
        }
        if self.database_name.trim().is_empty() {
            return Err(anyhow!("database.database_name must not be empty"));
        }
        if self.collection.trim().is_empty() {
            return Err(anyhow!("database.collection must not be empty"));
        }
        if self.connect_timeout_secs == 0 {
            return Err(anyhow!("database.connect_timeout_secs must be a positive number of seconds"));
        }
        Ok(())
    }

    pub fn is_in_memory(&self) -> bool {
        self.connection_string.to_lowercase().starts_with("memory://")
    }
}

use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub organization: OrganizationConfig,
}

/// Application-wide presentation settings shared by every module.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSection {
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_lang_dir")]
    pub lang_dir: String,
    /// chrono `strftime` pattern used when rendering timestamps for exports.
    #[serde(default = "default_datetime_format")]
    pub datetime_format: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self { locale: default_locale(), lang_dir: default_lang_dir(), datetime_format: default_datetime_format() }
    }
}

fn default_locale() -> String { "en".into() }
fn default_lang_dir() -> String { "lang".into() }
fn default_datetime_format() -> String { "%d %b %Y %I:%M %p".into() }

#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationConfig {
    #[serde(default = "default_items_per_page")]
    pub items_per_page: u64,
}

impl Default for OrganizationConfig {
    fn default() -> Self { Self { items_per_page: default_items_per_page() } }
}

fn default_items_per_page() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Config file is optional: fall back to defaults plus `DATABASE_URL`.
    pub fn load_or_env() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        // 归一化 app
        self.app.normalize();
        // 归一化 database（支持从环境变量填充 URL）
        self.database.normalize_from_env();
        self.database.validate()?;
        self.organization.validate()?;
        Ok(())
    }
}

impl AppSection {
    fn normalize(&mut self) {
        if self.locale.trim().is_empty() { self.locale = default_locale(); }
        if self.lang_dir.trim().is_empty() { self.lang_dir = default_lang_dir(); }
        if self.datetime_format.trim().is_empty() { self.datetime_format = default_datetime_format(); }
    }
}

impl OrganizationConfig {
    fn validate(&self) -> Result<()> {
        if self.items_per_page == 0 || self.items_per_page > 100 {
            return Err(anyhow!("organization.items_per_page must be within 1..=100"));
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.normalize_from_env();
        cfg
    }

    pub fn normalize_from_env(&mut self) {
        // 若 TOML 中未提供 URL，则尝试从环境变量填充
        if self.url.trim().is_empty() {
            let _ = dotenvy::dotenv();
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn is_sqlite(&self) -> bool {
        self.url.to_lowercase().starts_with("sqlite:")
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || self.is_sqlite()) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

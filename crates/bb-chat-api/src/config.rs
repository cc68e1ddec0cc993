//! Chat API server configuration, loadable from TOML or environment.

use serde::Deserialize;

/// Top-level API server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Listen address (e.g., "0.0.0.0").
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// PostgreSQL connection URL. None runs against sample data.
    #[serde(default)]
    pub database_url: Option<String>,
    /// Allowed CORS origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Upper bound on rows fetched per question.
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
    /// Serve `/api/v1/translate`, which reveals generated SQL.
    #[serde(default)]
    pub expose_sql: bool,
    /// How result rows are turned into prose.
    #[serde(default)]
    pub renderer: RendererConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_rows() -> usize {
    200
}

/// Which prose renderer answers questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    /// Deterministic bullet list, no LLM.
    #[default]
    Table,
    /// Local Ollama endpoint.
    Ollama,
    /// AWS Bedrock Converse API.
    Bedrock,
}

impl RendererKind {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "table" => Some(Self::Table),
            "ollama" => Some(Self::Ollama),
            "bedrock" => Some(Self::Bedrock),
            _ => None,
        }
    }
}

/// Prose renderer settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RendererConfig {
    #[serde(default)]
    pub kind: RendererKind,
    #[serde(default)]
    pub ollama: OllamaConfig,
    /// Bedrock model ID (e.g., "us.amazon.nova-lite-v1:0").
    #[serde(default = "default_bedrock_model")]
    pub bedrock_model_id: String,
    /// Per-request timeout for LLM calls.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_bedrock_model() -> String {
    "us.amazon.nova-lite-v1:0".into()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            kind: RendererKind::default(),
            ollama: OllamaConfig::default(),
            bedrock_model_id: default_bedrock_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Local Ollama endpoint settings.
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaConfig {
    /// Ollama HTTP API base URL.
    #[serde(default = "default_ollama_host")]
    pub host: String,
    /// Model used for summaries.
    #[serde(default = "default_ollama_model")]
    pub model: String,
}

fn default_ollama_host() -> String {
    "http://localhost:11434".into()
}

fn default_ollama_model() -> String {
    "llama3.2:3b".into()
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: default_ollama_host(),
            model: default_ollama_model(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: None,
            cors_origins: vec![],
            max_rows: default_max_rows(),
            expose_sql: false,
            renderer: RendererConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config from environment variables on top of defaults.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup (environment in production).
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database_url = Some(url);
        }
        if let Some(host) = lookup("BB_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("BB_PORT").and_then(|p| p.parse().ok()) {
            self.port = port;
        }
        if let Some(flag) = lookup("BB_EXPOSE_SQL") {
            self.expose_sql = flag.eq_ignore_ascii_case("true") || flag == "1";
        }
        if let Some(kind) = lookup("BB_RENDERER").as_deref().and_then(RendererKind::parse) {
            self.renderer.kind = kind;
        }
        if let Some(host) = lookup("OLLAMA_HOST") {
            self.renderer.ollama.host = host;
        }
        if let Some(model) = lookup("OLLAMA_MODEL") {
            self.renderer.ollama.model = model;
        }
        if let Some(model_id) = lookup("BEDROCK_MODEL_ID") {
            self.renderer.bedrock_model_id = model_id;
        }
        self
    }
}

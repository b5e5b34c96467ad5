use serde::{Deserialize, Serialize};

/// Main configuration structure for Savor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// HTTP API configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Conversation store configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Vector service connection
    #[serde(default)]
    pub qdrant: QdrantConfig,

    /// Language-model provider
    #[serde(default)]
    pub llm: LlmConfig,

    /// Embedding model applied at both index and query time
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Tabular sources and indexing batch behavior
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Collection and search parameters
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Retry policy for LLM calls
    #[serde(default)]
    pub retry: RetryConfig,
}

/// HTTP API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    5001
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Conversation/feedback store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to the `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".savor/savor.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Vector service connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct QdrantConfig {
    /// Qdrant server URL (gRPC endpoint)
    #[serde(default = "default_qdrant_url")]
    pub url: String,

    /// API key (can also be set via QDRANT_API_KEY env var)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in milliseconds
    #[serde(default = "default_qdrant_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_qdrant_url() -> String {
    "http://localhost:6334".to_string()
}

const fn default_qdrant_timeout_ms() -> u64 {
    30_000
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            url: default_qdrant_url(),
            api_key: None,
            timeout_ms: default_qdrant_timeout_ms(),
        }
    }
}

/// Language-model provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LlmConfig {
    /// API key (can also be set via OPENAI_API_KEY env var)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL for the chat-completions API
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// Model used for generation and evaluation
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_llm_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_llm_model() -> String {
    "gpt-5-nano".to_string()
}

const fn default_llm_timeout() -> u64 {
    120
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

/// Embedding model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EmbeddingConfig {
    /// Model identifier passed to the vector service for inference
    #[serde(default = "default_embedding_model")]
    pub model: String,
}

fn default_embedding_model() -> String {
    "jinaai/jina-embeddings-v2-small-en".to_string()
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: default_embedding_model(),
        }
    }
}

/// Tabular sources and indexing batch behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct IngestConfig {
    /// Restaurant attributes CSV
    #[serde(default = "default_restaurants_path")]
    pub restaurants_path: String,

    /// Menu items CSV
    #[serde(default = "default_menus_path")]
    pub menus_path: String,

    /// Cap on menu rows read from the (large) menu source
    #[serde(default = "default_max_menu_rows")]
    pub max_menu_rows: usize,

    /// Points per upsert call
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Pause between upsert batches in milliseconds
    #[serde(default = "default_batch_pause_ms")]
    pub batch_pause_ms: u64,
}

fn default_restaurants_path() -> String {
    "data/restaurants.csv".to_string()
}

fn default_menus_path() -> String {
    "data/restaurant-menus.csv".to_string()
}

const fn default_max_menu_rows() -> usize {
    100_000
}

const fn default_batch_size() -> usize {
    500
}

const fn default_batch_pause_ms() -> u64 {
    50
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            restaurants_path: default_restaurants_path(),
            menus_path: default_menus_path(),
            max_menu_rows: default_max_menu_rows(),
            batch_size: default_batch_size(),
            batch_pause_ms: default_batch_pause_ms(),
        }
    }
}

/// Collection and search parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetrievalConfig {
    /// Collection name in the vector service
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Vector dimensionality of the collection
    #[serde(default = "default_vector_size")]
    pub vector_size: u64,

    /// Results retrieved per question
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_collection() -> String {
    "restaurants".to_string()
}

const fn default_vector_size() -> u64 {
    512
}

const fn default_top_k() -> usize {
    5
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            vector_size: default_vector_size(),
            top_k: default_top_k(),
        }
    }
}

/// Retry policy configuration for LLM calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_initial_backoff_ms() -> u64 {
    1_000
}

const fn default_max_backoff_ms() -> u64 {
    60_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

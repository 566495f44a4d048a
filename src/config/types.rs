use serde::Deserialize;

/// Catalog root used when no configuration overrides it
pub const DEFAULT_SITE_ROOT: &str = "https://www.aozora.gr.jp";

/// Index page collected when no index URL is given
pub const DEFAULT_INDEX_URL: &str = "https://www.aozora.gr.jp/index_pages/person879.html";

/// Main configuration structure for Aozora Collector
///
/// Every section is optional; missing sections fall back to the catalog's
/// defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
}

/// Catalog discovery configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Index page listing the works to collect
    #[serde(rename = "index-url", default = "default_index_url")]
    pub index_url: String,

    /// Root used to build canonical detail-page URLs
    #[serde(rename = "site-root", default = "default_site_root")]
    pub site_root: String,

    /// CSS selector for the catalog listing anchors
    #[serde(rename = "link-selector", default = "default_link_selector")]
    pub link_selector: String,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User agent sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Total request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout (seconds)
    #[serde(
        rename = "connect-timeout-secs",
        default = "default_connect_timeout_secs"
    )]
    pub connect_timeout_secs: u64,
}

/// Archive extraction configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveConfig {
    /// Member extensions treated as plain text, matched case-sensitively
    #[serde(rename = "text-extensions", default = "default_text_extensions")]
    pub text_extensions: Vec<String>,

    /// Encoding label used when a member is not valid UTF-8
    #[serde(rename = "fallback-encoding", default = "default_fallback_encoding")]
    pub fallback_encoding: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            index_url: default_index_url(),
            site_root: default_site_root(),
            link_selector: default_link_selector(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            text_extensions: default_text_extensions(),
            fallback_encoding: default_fallback_encoding(),
        }
    }
}

fn default_index_url() -> String {
    DEFAULT_INDEX_URL.to_string()
}

fn default_site_root() -> String {
    DEFAULT_SITE_ROOT.to_string()
}

fn default_link_selector() -> String {
    "ol li a".to_string()
}

fn default_user_agent() -> String {
    format!("aozora-collector/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_text_extensions() -> Vec<String> {
    vec![".txt".to_string()]
}

fn default_fallback_encoding() -> String {
    "Shift_JIS".to_string()
}

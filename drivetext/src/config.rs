use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn env_or(var: &str, default: &str) -> String {
    env::var(var).unwrap_or_else(|_| default.to_string())
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub graph: GraphConfig,
    pub extraction: ExtractionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    pub base_url: String,
    pub token_url: String,
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub request_timeout_secs: u64,
}

/// Tunable thresholds of the extraction core. The raw-scan numbers were
/// tuned empirically against real legacy .doc corpora and are deliberately
/// overridable rather than hard invariants.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// Bytes sampled from the start of a buffer for the plain-text sniff.
    pub sniff_sample_len: usize,
    /// Minimum printable-character ratio for the sniff to accept.
    pub sniff_min_printable_ratio: f64,
    /// Minimum length of a printable run kept by the legacy .doc raw scan.
    pub scan_min_run_len: usize,
    /// Minimum distinct-character ratio for a run to survive the scan.
    pub scan_min_unique_ratio: f64,
    /// A run is dropped when one character repeats this many times in a row.
    pub scan_max_repeat: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            sniff_sample_len: 4096,
            sniff_min_printable_ratio: 0.8,
            scan_min_run_len: 5,
            scan_min_unique_ratio: 0.3,
            scan_max_repeat: 5,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = ExtractionConfig::default();

        Self {
            server: ServerConfig {
                host: env_or("DRIVETEXT_HOST", "0.0.0.0"),
                port: parse_env_or("DRIVETEXT_PORT", 3000),
            },
            graph: GraphConfig {
                base_url: env_or("GRAPH_BASE_URL", "https://graph.microsoft.com/v1.0"),
                token_url: env_or(
                    "GRAPH_TOKEN_URL",
                    "https://login.microsoftonline.com/{tenant}/oauth2/v2.0/token",
                ),
                tenant_id: env_or("GRAPH_TENANT_ID", "common"),
                client_id: env_or("GRAPH_CLIENT_ID", ""),
                client_secret: env_or("GRAPH_CLIENT_SECRET", ""),
                request_timeout_secs: parse_env_or("GRAPH_REQUEST_TIMEOUT_SECS", 30),
            },
            extraction: ExtractionConfig {
                sniff_sample_len: parse_env_or("EXTRACT_SNIFF_SAMPLE_LEN", defaults.sniff_sample_len),
                sniff_min_printable_ratio: parse_env_or(
                    "EXTRACT_SNIFF_MIN_PRINTABLE_RATIO",
                    defaults.sniff_min_printable_ratio,
                ),
                scan_min_run_len: parse_env_or("EXTRACT_SCAN_MIN_RUN_LEN", defaults.scan_min_run_len),
                scan_min_unique_ratio: parse_env_or(
                    "EXTRACT_SCAN_MIN_UNIQUE_RATIO",
                    defaults.scan_min_unique_ratio,
                ),
                scan_max_repeat: parse_env_or("EXTRACT_SCAN_MAX_REPEAT", defaults.scan_max_repeat),
            },
        }
    }
}

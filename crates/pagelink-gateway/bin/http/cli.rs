use clap::{ArgAction, Parser, ValueEnum};
use pagelink_core::Capability;
use pagelink_telemetry::LogFormat;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const LISTEN_ADDR_ENV: &str = "PAGELINK_GATEWAY_LISTEN_ADDR";
pub const PUBLIC_BASE_URL_ENV: &str = "PAGELINK_GATEWAY_PUBLIC_BASE_URL";
pub const MAIN_TENANT_ENV: &str = "PAGELINK_GATEWAY_MAIN_TENANT";
pub const LOG_FORMAT_ENV: &str = "PAGELINK_GATEWAY_LOG_FORMAT";
pub const MAX_ATTEMPTS_ENV: &str = "PAGELINK_GATEWAY_MAX_ATTEMPTS";
pub const CHECK_INDEX_ENV: &str = "PAGELINK_GATEWAY_CHECK_INDEX";
pub const SCAN_LIMIT_ENV: &str = "PAGELINK_GATEWAY_SCAN_LIMIT";
pub const DEFAULT_ACCESS_ENV: &str = "PAGELINK_GATEWAY_DEFAULT_ACCESS";
pub const SEED_FILE_ENV: &str = "PAGELINK_GATEWAY_SEED_FILE";
pub const REINDEX_INTERVAL_ENV: &str = "PAGELINK_GATEWAY_REINDEX_INTERVAL_SECS";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_MAIN_TENANT: &str = "wiki";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
    #[value(name = "auto")]
    Auto,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
            LogFormatArg::Auto => LogFormat::Auto,
        }
    }
}

/// Capability granted to every requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AccessArg {
    #[value(name = "none")]
    None,
    #[value(name = "view")]
    View,
    #[value(name = "edit")]
    Edit,
}

impl AccessArg {
    pub fn capability(self) -> Option<Capability> {
        match self {
            AccessArg::None => None,
            AccessArg::View => Some(Capability::View),
            AccessArg::Edit => Some(Capability::Edit),
        }
    }
}

impl Display for AccessArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessArg::None => write!(f, "none"),
            AccessArg::View => write!(f, "view"),
            AccessArg::Edit => write!(f, "edit"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "pagelink-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Base URL documents are viewed under.
    #[arg(long, env = PUBLIC_BASE_URL_ENV, default_value = DEFAULT_PUBLIC_BASE_URL)]
    pub public_base_url: String,

    #[arg(long, env = MAIN_TENANT_ENV, default_value = DEFAULT_MAIN_TENANT)]
    pub main_tenant: String,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormatArg::Auto)]
    pub log_format: LogFormatArg,

    /// Candidates drawn before page id creation gives up. Unbounded when
    /// unset.
    #[arg(long, env = MAX_ATTEMPTS_ENV)]
    pub max_attempts: Option<u64>,

    #[arg(long, env = CHECK_INDEX_ENV, default_value_t = true, action = ArgAction::Set)]
    pub check_index: bool,

    /// Index rows read per conflict report. Unbounded when unset.
    #[arg(long, env = SCAN_LIMIT_ENV)]
    pub scan_limit: Option<usize>,

    #[arg(long, env = DEFAULT_ACCESS_ENV, value_enum, default_value_t = AccessArg::Edit)]
    pub default_access: AccessArg,

    /// JSON file of documents to preload.
    #[arg(long, env = SEED_FILE_ENV)]
    pub seed_file: Option<PathBuf>,

    /// Seconds between search index refreshes.
    #[arg(long, env = REINDEX_INTERVAL_ENV, default_value_t = 5)]
    pub reindex_interval_secs: u64,
}

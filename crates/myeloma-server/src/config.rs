use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Structured JSON, one event per line.
    Json,
    /// Human-readable, for local development.
    Pretty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Snapshot file for the store. `None` keeps everything in memory.
    pub data_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Read `MYELOMA_BIND_ADDR`, `MYELOMA_DATA_PATH` and `MYELOMA_LOG_FORMAT`.
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let bind_addr = lookup("MYELOMA_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .map_err(|e| eyre::eyre!("invalid MYELOMA_BIND_ADDR {bind_addr:?}: {e}"))?;

        let data_path = lookup("MYELOMA_DATA_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let log_format = match lookup("MYELOMA_LOG_FORMAT").as_deref() {
            None | Some("json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            Some(other) => {
                return Err(eyre::eyre!(
                    "invalid MYELOMA_LOG_FORMAT {other:?}: expected \"json\" or \"pretty\""
                ));
            }
        };

        Ok(Self {
            bind_addr,
            data_path,
            log_format,
        })
    }
}

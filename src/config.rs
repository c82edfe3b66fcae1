use crate::error::{AlunosError, AlunosResult, BadEnvVarSnafu, ParseNumberSnafu};
use dotenvy::var;
use secrecy::{ExposeSecret, SecretString};
use snafu::ResultExt;
use std::{path::PathBuf, str::FromStr, sync::Arc};

const DEFAULT_SERVER_IP: &str = "127.0.0.1:8080";
const DEFAULT_ASSETS_DIR: &str = "assets";
const DEFAULT_MAX_CONNECTIONS: u32 = 15;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StorageKind {
    Postgres,
    Memory,
}

impl FromStr for StorageKind {
    type Err = AlunosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "mem" => Ok(Self::Memory),
            _ => Err(AlunosError::UnknownStorageKind {
                found: s.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub enum StorageConfig {
    Postgres(Arc<DbConfig>),
    Memory,
}

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    server_ip: String,
    assets_dir: PathBuf,
    storage: StorageConfig,
}

impl RuntimeConfiguration {
    ///reads everything from the environment, only asking for database details if we'll be using postgres
    pub fn new() -> AlunosResult<Self> {
        let storage = match var("ALUNOS_STORAGE") {
            Ok(kind) => kind.parse()?,
            Err(_) => StorageKind::Postgres,
        };
        let storage = match storage {
            StorageKind::Postgres => StorageConfig::Postgres(Arc::new(DbConfig::new()?)),
            StorageKind::Memory => StorageConfig::Memory,
        };

        Ok(Self {
            server_ip: var("ALUNOS_SERVER_IP").unwrap_or_else(|_| DEFAULT_SERVER_IP.to_string()),
            assets_dir: var("ALUNOS_ASSETS_DIR")
                .unwrap_or_else(|_| DEFAULT_ASSETS_DIR.to_string())
                .into(),
            storage,
        })
    }

    /// Configuration for an in-memory store, with default address and assets.
    pub fn in_memory() -> Self {
        Self {
            server_ip: DEFAULT_SERVER_IP.to_string(),
            assets_dir: DEFAULT_ASSETS_DIR.into(),
            storage: StorageConfig::Memory,
        }
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }

    pub fn assets_dir(&self) -> &PathBuf {
        &self.assets_dir
    }

    pub const fn storage(&self) -> &StorageConfig {
        &self.storage
    }
}

#[derive(Debug)]
pub struct DbConfig {
    user: String,
    password: SecretString,
    path: String,
    port: u16,
    database: String,
    max_connections: u32,
}

impl DbConfig {
    pub fn new() -> AlunosResult<Self> {
        let get_env_var = |name| var(name).context(BadEnvVarSnafu { name });

        let max_connections = match var("DB_MAX_CONNECTIONS") {
            Ok(max) => max.parse().context(ParseNumberSnafu {
                name: "DB_MAX_CONNECTIONS",
            })?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            user: get_env_var("DB_USER")?,
            password: SecretString::from(get_env_var("DB_PASSWORD")?),
            path: get_env_var("DB_PATH")?,
            port: get_env_var("DB_PORT")?
                .parse()
                .context(ParseNumberSnafu { name: "DB_PORT" })?,
            database: get_env_var("DB_NAME")?,
            max_connections,
        })
    }

    pub fn get_db_path(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user,
            self.password.expose_secret(),
            self.path,
            self.port,
            self.database
        )
    }

    pub const fn max_connections(&self) -> u32 {
        self.max_connections
    }
}

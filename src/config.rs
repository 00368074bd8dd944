use std::fmt;
use std::net::SocketAddr;

mod vars {
    pub const DATABASE_URL: &str = "DATABASE_URL";
    pub const PORT: &str = "PORT";
}

mod defaults {
    pub const DATABASE_URL: &str = "sqlite:data/guestbook.db";
    pub const PORT: u16 = 3000;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ConfigError {
    var: &'static str,
    value: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value for {}: {:?}", self.var, self.value)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = get(vars::DATABASE_URL)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| defaults::DATABASE_URL.to_string());

        let port = match get(vars::PORT).filter(|p| !p.is_empty()) {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError {
                var: vars::PORT,
                value,
            })?,
            None => defaults::PORT,
        };

        Ok(Self { database_url, port })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    /// Something safe to log about the database: the path for SQLite, only
    /// the scheme for anything that could carry credentials.
    pub fn database_label(&self) -> &str {
        if self.database_url.starts_with("sqlite:") {
            return &self.database_url;
        }
        self.database_url
            .split_once(':')
            .map_or("database", |(scheme, _)| scheme)
    }
}

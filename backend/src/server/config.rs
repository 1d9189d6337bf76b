//! Startup settings and the HTTP server configuration object.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use roster::outbound::persistence::{DEFAULT_MAX_SIZE, DbPool};

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

const DEFAULT_HOST: &str = "0.0.0.0";

/// Error returned when a switch value is not a recognised boolean word.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected one of true/false, yes/no, on/off or 1/0, got {0:?}")]
pub struct SwitchParseError(String);

/// On/off setting that takes an explicit value, such as
/// `--run-migrations false` or `ROSTER_RUN_MIGRATIONS=no`.
///
/// As an optional field it stays `None` until some layer sets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Switch(bool);

impl Switch {
    /// Whether the switch is on.
    pub fn is_on(self) -> bool {
        self.0
    }
}

impl fmt::Display for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Switch {
    type Err = SwitchParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(Self(true)),
            "false" | "no" | "off" | "0" => Ok(Self(false)),
            _ => Err(SwitchParseError(s.to_owned())),
        }
    }
}

impl Serialize for Switch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.0)
    }
}

struct SwitchVisitor;

impl Visitor<'_> for SwitchVisitor {
    type Value = Switch;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean, 0/1 or a boolean word")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Switch, E> {
        Ok(Switch(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Switch, E> {
        match value {
            0 => Ok(Switch(false)),
            1 => Ok(Switch(true)),
            other => Err(E::invalid_value(de::Unexpected::Unsigned(other), &self)),
        }
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Switch, E> {
        match u64::try_from(value) {
            Ok(unsigned) => self.visit_u64(unsigned),
            Err(_) => Err(E::invalid_value(de::Unexpected::Signed(value), &self)),
        }
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Switch, E> {
        value.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Switch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SwitchVisitor)
    }
}

/// Process settings loaded from CLI flags, `ROSTER_*` variables and an
/// optional configuration file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ROSTER")]
pub struct ServerSettings {
    /// Interface to bind; defaults to all interfaces.
    pub host: Option<String>,
    /// TCP port to listen on.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// PostgreSQL connection string. Without one, users live in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Seed the sample users into an empty store on startup; off unless set.
    pub seed_sample_users: Option<Switch>,
    /// Apply embedded migrations before serving; on unless set.
    pub run_migrations: Option<Switch>,
}

impl ServerSettings {
    /// Configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Configured pool size, falling back to the adapter default.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_MAX_SIZE)
    }

    /// Whether to seed the sample users into an empty store.
    pub fn seed_sample_users(&self) -> bool {
        self.seed_sample_users.is_some_and(Switch::is_on)
    }

    /// Whether to apply pending migrations before serving.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.is_none_or(Switch::is_on)
    }

    /// Socket address built from `host` and `port`.
    ///
    /// # Errors
    /// Returns [`std::io::ErrorKind::InvalidInput`] when the host is not an
    /// IP address.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let ip: IpAddr = self.host().parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid host {:?}: {err}", self.host()),
            )
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) seed_sample_users: bool,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a configuration serving the in-memory store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            seed_sample_users: false,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Attach a database connection pool; users are then stored in
    /// PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Seed the sample users when the store starts empty.
    #[must_use]
    pub fn with_sample_users(mut self, enabled: bool) -> Self {
        self.seed_sample_users = enabled;
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}

//! Server configuration from environment variables.
//!
//! | Variable                     | Default               |
//! |------------------------------|-----------------------|
//! | `METRO_BIND_ADDR`            | `127.0.0.1:8080`      |
//! | `METRO_NETWORK_FILE`         | built-in demo network |
//! | `METRO_ROUTE_POLICY`         | `time-then-transfers` |
//! | `METRO_TICKET_VALIDITY_MINS` | `60`                  |

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::planner::{PlannerConfig, RoutePolicy, UnknownPolicy};
use crate::ticket::{DEFAULT_VALIDITY_MINS, IssuerConfig, MAX_VALIDITY_MINS};

pub const BIND_ADDR_VAR: &str = "METRO_BIND_ADDR";
pub const NETWORK_FILE_VAR: &str = "METRO_NETWORK_FILE";
pub const ROUTE_POLICY_VAR: &str = "METRO_ROUTE_POLICY";
pub const TICKET_VALIDITY_VAR: &str = "METRO_TICKET_VALIDITY_MINS";

/// Errors from reading server configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServerConfigError {
    #[error("METRO_BIND_ADDR: invalid socket address {0:?}")]
    BindAddr(String),

    #[error("METRO_ROUTE_POLICY: {0}")]
    Policy(#[from] UnknownPolicy),

    #[error("METRO_TICKET_VALIDITY_MINS: expected 1 to 527040 minutes, got {0:?}")]
    TicketValidity(String),
}

/// Everything `main` needs to start the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// JSON network definition; `None` serves the demo network.
    pub network_file: Option<PathBuf>,
    pub policy: RoutePolicy,
    pub ticket_validity_mins: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            network_file: None,
            policy: RoutePolicy::default(),
            ticket_validity_mins: DEFAULT_VALIDITY_MINS,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ServerConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset or blank variables.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ServerConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(addr) = get(BIND_ADDR_VAR) {
            config.bind_addr = addr
                .trim()
                .parse()
                .map_err(|_| ServerConfigError::BindAddr(addr))?;
        }

        config.network_file = get(NETWORK_FILE_VAR).map(PathBuf::from);

        if let Some(policy) = get(ROUTE_POLICY_VAR) {
            config.policy = policy.parse()?;
        }

        if let Some(mins) = get(TICKET_VALIDITY_VAR) {
            config.ticket_validity_mins = mins
                .trim()
                .parse()
                .ok()
                .filter(|m: &i64| (1..=MAX_VALIDITY_MINS).contains(m))
                .ok_or(ServerConfigError::TicketValidity(mins))?;
        }

        Ok(config)
    }

    pub fn planner(&self) -> PlannerConfig {
        PlannerConfig::new(self.policy)
    }

    pub fn issuer(&self) -> IssuerConfig {
        IssuerConfig::new(self.ticket_validity_mins)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.ticket_validity_mins, 60);
    }

    #[test]
    fn reads_all_variables() {
        let config = ServerConfig::from_lookup(lookup(&[
            (BIND_ADDR_VAR, "0.0.0.0:9000"),
            (NETWORK_FILE_VAR, "/etc/metro/network.json"),
            (ROUTE_POLICY_VAR, "transfers-then-time"),
            (TICKET_VALIDITY_VAR, "90"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(
            config.network_file,
            Some(PathBuf::from("/etc/metro/network.json"))
        );
        assert_eq!(config.planner().policy, RoutePolicy::TransfersThenTime);
        assert_eq!(config.issuer().validity_mins, 90);
    }

    #[test]
    fn blank_values_fall_back() {
        let config =
            ServerConfig::from_lookup(lookup(&[(NETWORK_FILE_VAR, "  "), (ROUTE_POLICY_VAR, "")]))
                .unwrap();
        assert_eq!(config.network_file, None);
        assert_eq!(config.policy, RoutePolicy::TimeThenTransfers);
    }

    #[test]
    fn invalid_values_rejected() {
        assert_eq!(
            ServerConfig::from_lookup(lookup(&[(BIND_ADDR_VAR, "localhost")])),
            Err(ServerConfigError::BindAddr("localhost".into()))
        );
        assert!(matches!(
            ServerConfig::from_lookup(lookup(&[(ROUTE_POLICY_VAR, "scenic")])),
            Err(ServerConfigError::Policy(_))
        ));
        assert_eq!(
            ServerConfig::from_lookup(lookup(&[(TICKET_VALIDITY_VAR, "0")])),
            Err(ServerConfigError::TicketValidity("0".into()))
        );
        assert!(ServerConfig::from_lookup(lookup(&[(TICKET_VALIDITY_VAR, "an hour")])).is_err());
    }

    #[test]
    fn ticket_validity_is_capped() {
        let max = MAX_VALIDITY_MINS.to_string();
        let config =
            ServerConfig::from_lookup(lookup(&[(TICKET_VALIDITY_VAR, max.as_str())])).unwrap();
        assert_eq!(config.ticket_validity_mins, MAX_VALIDITY_MINS);

        for value in [(MAX_VALIDITY_MINS + 1).to_string(), i64::MAX.to_string()] {
            assert_eq!(
                ServerConfig::from_lookup(lookup(&[(TICKET_VALIDITY_VAR, value.as_str())])),
                Err(ServerConfigError::TicketValidity(value.clone()))
            );
        }
    }
}

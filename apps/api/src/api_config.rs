use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use beautycom_core::{AppError, SalonId};
use tracing_subscriber::EnvFilter;

const MIN_GATEWAY_SECRET_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackendConfig {
    InMemory,
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub frontend_url: String,
    pub gateway_shared_secret: String,
    pub api_host: String,
    pub api_port: u16,
    pub storage: StorageBackendConfig,
    pub salon_owners: Vec<(SalonId, String)>,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        let gateway_shared_secret = required_non_empty_env("GATEWAY_SHARED_SECRET")?;
        if gateway_shared_secret.len() < MIN_GATEWAY_SECRET_LENGTH {
            return Err(AppError::Validation(format!(
                "GATEWAY_SHARED_SECRET must be at least {MIN_GATEWAY_SECRET_LENGTH} characters"
            )));
        }

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let storage = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "postgres".to_owned())
            .as_str()
        {
            "postgres" => StorageBackendConfig::Postgres {
                database_url: required_non_empty_env("DATABASE_URL")?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .map(|value| {
                        value.parse::<u32>().map_err(|error| {
                            AppError::Validation(format!(
                                "invalid DATABASE_MAX_CONNECTIONS: {error}"
                            ))
                        })
                    })
                    .transpose()?
                    .unwrap_or(10),
            },
            "memory" => StorageBackendConfig::InMemory,
            other => {
                return Err(AppError::Validation(format!(
                    "STORAGE_BACKEND must be either 'postgres' or 'memory', got '{other}'"
                )));
            }
        };

        let salon_owners =
            parse_salon_owners(env::var("SALON_OWNERS").unwrap_or_default().as_str())?;

        if migrate_only && !matches!(storage, StorageBackendConfig::Postgres { .. }) {
            return Err(AppError::Validation(
                "the migrate command requires STORAGE_BACKEND=postgres".to_owned(),
            ));
        }

        Ok(Self {
            migrate_only,
            frontend_url,
            gateway_shared_secret,
            api_host,
            api_port,
            storage,
            salon_owners,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

/// Parses `salon_uuid=owner_subject` pairs separated by commas.
fn parse_salon_owners(value: &str) -> Result<Vec<(SalonId, String)>, AppError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (salon_id, owner) = entry.split_once('=').ok_or_else(|| {
                AppError::Validation(format!(
                    "invalid SALON_OWNERS entry '{entry}', expected '<salon id>=<owner subject>'"
                ))
            })?;
            let owner = owner.trim();
            if owner.is_empty() {
                return Err(AppError::Validation(format!(
                    "SALON_OWNERS entry '{entry}' has an empty owner subject"
                )));
            }

            Ok((SalonId::from_str(salon_id.trim())?, owner.to_owned()))
        })
        .collect()
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use beautycom_core::AppError;

    use super::parse_salon_owners;

    #[test]
    fn salon_owners_parse_comma_separated_pairs() {
        let parsed = parse_salon_owners(concat!(
            "7f1f5d0e-8d8b-4a57-9a7c-1a1d2f3e4b5c=owner-a, ",
            "0b9f7a44-1c1e-4a0e-8f63-4c2d1e0f9a8b = owner-b ,",
        ));

        let owners: Vec<String> = parsed
            .unwrap_or_default()
            .into_iter()
            .map(|(_, owner)| owner)
            .collect();
        assert_eq!(owners, vec!["owner-a".to_owned(), "owner-b".to_owned()]);
    }

    #[test]
    fn empty_salon_owner_list_is_allowed() {
        assert!(matches!(parse_salon_owners(""), Ok(owners) if owners.is_empty()));
    }

    #[test]
    fn malformed_salon_owner_entries_are_rejected() {
        assert!(matches!(
            parse_salon_owners("not-a-pair"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            parse_salon_owners("not-a-uuid=owner"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            parse_salon_owners("7f1f5d0e-8d8b-4a57-9a7c-1a1d2f3e4b5c= "),
            Err(AppError::Validation(_))
        ));
    }
}

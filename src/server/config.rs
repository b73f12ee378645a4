//! Environment configuration.
//!
//! [`Config`] is read once at startup. The game rules the core depends on are grouped in
//! [`GameConfig`], which is handed explicitly to each service rather than looked up globally.

use std::{fmt::Display, path::PathBuf, str::FromStr};

use crate::server::{
    error::config::ConfigError, service::geocache::policy::GeocachePolicy,
    util::time::CalendarZone,
};

pub const DEFAULT_CHECKIN_MAX_DISTANCE_M: f64 = 20.0;
pub const DEFAULT_TARGET_MIN_DISTANCE_M: u32 = 100;
pub const DEFAULT_TARGET_MAX_DISTANCE_M: u32 = 500;
pub const DEFAULT_POSTS_PER_PAGE: u64 = 10;
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

pub struct Config {
    pub database_url: String,
    pub valkey_url: String,
    pub upload_directory: PathBuf,
    pub bind_address: String,
    pub game: GameConfig,
}

/// Rules consumed by the geocache, check-in and stats services.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub checkin: CheckinConfig,
    pub geocache: GeocacheConfig,
    /// Zone whose calendar decides "today"
    pub calendar_zone: CalendarZone,
    /// Page size for paginated check-in listings
    pub posts_per_page: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckinConfig {
    /// Upper bound on the admissible distance between a check-in and its geocache
    pub max_distance_m: f64,
    /// Reject a second check-in by the same user against the same geocache
    pub reject_repeat: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeocacheConfig {
    pub target_min_distance_m: u32,
    pub target_max_distance_m: u32,
    pub policy: GeocachePolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            checkin: CheckinConfig {
                max_distance_m: DEFAULT_CHECKIN_MAX_DISTANCE_M,
                reject_repeat: false,
            },
            geocache: GeocacheConfig {
                target_min_distance_m: DEFAULT_TARGET_MIN_DISTANCE_M,
                target_max_distance_m: DEFAULT_TARGET_MAX_DISTANCE_M,
                policy: GeocachePolicy::DateScoped,
            },
            calendar_zone: CalendarZone::Utc,
            posts_per_page: DEFAULT_POSTS_PER_PAGE,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            valkey_url: required("VALKEY_URL")?,
            upload_directory: PathBuf::from(required("UPLOAD_DIRECTORY")?),
            bind_address: optional("BIND_ADDRESS", DEFAULT_BIND_ADDRESS.to_string())?,
            game: GameConfig::from_env()?,
        })
    }
}

impl GameConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let target_min_distance_m =
            optional("TARGET_MIN_DISTANCE_M", DEFAULT_TARGET_MIN_DISTANCE_M)?;
        let target_max_distance_m =
            optional("TARGET_MAX_DISTANCE_M", DEFAULT_TARGET_MAX_DISTANCE_M)?;

        if target_min_distance_m > target_max_distance_m {
            return Err(ConfigError::InvalidEnvValue {
                var: "TARGET_MIN_DISTANCE_M".to_string(),
                reason: format!(
                    "must not exceed TARGET_MAX_DISTANCE_M ({})",
                    target_max_distance_m
                ),
            });
        }

        let max_distance_m: f64 =
            optional("CHECKIN_MAX_DISTANCE_M", DEFAULT_CHECKIN_MAX_DISTANCE_M)?;

        if !max_distance_m.is_finite() || max_distance_m < 0.0 {
            return Err(ConfigError::InvalidEnvValue {
                var: "CHECKIN_MAX_DISTANCE_M".to_string(),
                reason: "must be a finite, non-negative number of metres".to_string(),
            });
        }

        let policy = match optional("GEOCACHE_POLICY", "date_scoped".to_string())?.as_str() {
            "date_scoped" => GeocachePolicy::DateScoped,
            "distance_reuse" => {
                let min_distance_m: f64 = optional("GEOCACHE_REUSE_MIN_DISTANCE_M", 0.0)?;
                let max_distance_m: f64 = optional(
                    "GEOCACHE_REUSE_MAX_DISTANCE_M",
                    f64::from(target_max_distance_m),
                )?;

                if min_distance_m > max_distance_m {
                    return Err(ConfigError::InvalidEnvValue {
                        var: "GEOCACHE_REUSE_MIN_DISTANCE_M".to_string(),
                        reason: "must not exceed GEOCACHE_REUSE_MAX_DISTANCE_M".to_string(),
                    });
                }

                GeocachePolicy::DistanceScopedReuse {
                    min_distance_m,
                    max_distance_m,
                }
            }
            other => {
                return Err(ConfigError::InvalidEnvValue {
                    var: "GEOCACHE_POLICY".to_string(),
                    reason: format!("expected `date_scoped` or `distance_reuse`, got `{}`", other),
                })
            }
        };

        Ok(Self {
            checkin: CheckinConfig {
                max_distance_m,
                reject_repeat: optional("CHECKIN_REJECT_REPEAT", false)?,
            },
            geocache: GeocacheConfig {
                target_min_distance_m,
                target_max_distance_m,
                policy,
            },
            calendar_zone: optional("CALENDAR_TIMEZONE", CalendarZone::Utc)?,
            posts_per_page: optional("POSTS_PER_PAGE", DEFAULT_POSTS_PER_PAGE)?,
        })
    }
}

fn required(var: &str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
}

fn optional<T>(var: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvValue {
                var: var.to_string(),
                reason: e.to_string(),
            }),
        Err(_) => Ok(default),
    }
}

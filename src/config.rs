use std::{env, str::FromStr};

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
}

/// Token signing settings. `access_ttl_minutes = None` issues access tokens
/// without an `exp` claim; they stay valid until revoked.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_ttl_minutes: Option<i64>,
    pub refresh_ttl_days: i64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_var("APP_PORT", env::var("APP_PORT").ok())?.unwrap_or(3000);
        Ok(Self {
            port,
            database_url,
            host,
            jwt: JwtConfig::from_env()?,
        })
    }
}

impl JwtConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET is not set"))?;
        let access_ttl_minutes = parse_var::<i64>(
            "JWT_ACCESS_TOKEN_EXPIRES_MINUTES",
            env::var("JWT_ACCESS_TOKEN_EXPIRES_MINUTES").ok(),
        )?
        .filter(|m| *m > 0);
        let refresh_ttl_days = parse_var(
            "JWT_REFRESH_TOKEN_EXPIRES_DAYS",
            env::var("JWT_REFRESH_TOKEN_EXPIRES_DAYS").ok(),
        )?
        .unwrap_or(30);
        Ok(Self {
            secret,
            access_ttl_minutes,
            refresh_ttl_days,
        })
    }
}

/// Unset or empty is `None`; anything else must parse.
fn parse_var<T>(name: &str, raw: Option<String>) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .with_context(|| format!("{name} is not a valid value: {value:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variables_fall_back() {
        assert_eq!(parse_var::<i64>("X", None).unwrap(), None);
        assert_eq!(parse_var::<i64>("X", Some("  ".into())).unwrap(), None);
        assert_eq!(parse_var::<i64>("X", Some("15".into())).unwrap(), Some(15));
    }

    #[test]
    fn malformed_ttl_is_an_error() {
        let err = parse_var::<i64>("JWT_ACCESS_TOKEN_EXPIRES_MINUTES", Some("15m".into()))
            .unwrap_err();
        assert!(err.to_string().contains("JWT_ACCESS_TOKEN_EXPIRES_MINUTES"));
    }
}

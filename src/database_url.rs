//! Connection URLs in the `dialect[+driver]://user:password@host:port/database?options`
//! form.
//!
//! File-based engines keep the database path in the URL path:
//! `sqlite://` is the in-memory default, `sqlite:///relative.db` is relative to
//! the working directory and `sqlite:////abs/path.db` is absolute.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use url::Url;

use crate::dialect::Dialect;
use crate::error::{DbAdminError, Result};

/// Environment variable consulted by [`DatabaseUrl::from_env`].
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// A parsed, cloneable connection URL.
///
/// The database and driver name are mutable so strategies can repoint a copy
/// at an administrative database without touching the caller's URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseUrl {
    drivername: String,
    username: Option<String>,
    password: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    database: Option<String>,
    query: Vec<(String, String)>,
}

impl DatabaseUrl {
    /// Parses a connection URL.
    pub fn parse(input: &str) -> Result<Self> {
        let parsed = Url::parse(input)
            .map_err(|e| DbAdminError::InvalidUrl(format!("{}: {}", redact(input), e)))?;

        let username = match parsed.username() {
            "" => None,
            user => Some(decode(user)?),
        };
        let password = parsed.password().map(decode).transpose()?;
        let host = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .map(|h| h.trim_start_matches('[').trim_end_matches(']').to_string());

        // One leading slash separates the authority from the database.
        let path = parsed.path();
        let path = path.strip_prefix('/').unwrap_or(path);
        let database = if path.is_empty() {
            None
        } else {
            Some(decode(path)?)
        };

        let query = parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        Ok(Self {
            drivername: parsed.scheme().to_string(),
            username,
            password,
            host,
            port: parsed.port(),
            database,
            query,
        })
    }

    /// Reads and parses the URL from the `DATABASE_URL` environment variable.
    pub fn from_env() -> Result<Self> {
        let value = std::env::var(DATABASE_URL_ENV).map_err(|_| {
            DbAdminError::InvalidUrl(format!("{} is not set", DATABASE_URL_ENV))
        })?;
        Self::parse(&value)
    }

    /// Full driver name, e.g. `postgresql+psycopg2`.
    pub fn drivername(&self) -> &str {
        &self.drivername
    }

    pub fn set_drivername(&mut self, drivername: impl Into<String>) {
        self.drivername = drivername.into();
    }

    /// Backend part of the driver name, e.g. `postgresql` for `postgresql+psycopg2`.
    pub fn backend(&self) -> &str {
        self.drivername
            .split_once('+')
            .map(|(backend, _)| backend)
            .unwrap_or(&self.drivername)
    }

    pub fn dialect(&self) -> Dialect {
        Dialect::from_backend(self.backend())
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    pub fn set_database(&mut self, database: Option<&str>) {
        self.database = database.map(str::to_string);
    }

    /// Copy of this URL pointing at another database.
    pub fn with_database(&self, database: Option<&str>) -> Self {
        let mut url = self.clone();
        url.set_database(database);
        url
    }

    /// Value of a query option, e.g. `sslmode` in `?sslmode=disable`.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The `connect_timeout` option in seconds, handed to drivers as-is.
    pub fn connect_timeout(&self) -> Result<Option<Duration>> {
        self.query_param("connect_timeout")
            .map(|raw| {
                raw.parse::<u64>().map(Duration::from_secs).map_err(|_| {
                    DbAdminError::InvalidUrl(format!("connect_timeout must be seconds, got '{}'", raw))
                })
            })
            .transpose()
    }

    /// Renders the URL back to text including the password.
    /// Use `Display` for anything that ends up in logs.
    pub fn to_connection_string(&self) -> String {
        self.render(false)
    }

    fn render(&self, hide_password: bool) -> String {
        let mut out = format!("{}://", self.drivername);
        if let Some(user) = &self.username {
            out.push_str(&encode(user));
            if let Some(password) = &self.password {
                out.push(':');
                if hide_password {
                    out.push_str("***");
                } else {
                    out.push_str(&encode(password));
                }
            }
            out.push('@');
        }
        if let Some(host) = &self.host {
            if host.contains(':') {
                out.push_str(&format!("[{}]", host));
            } else {
                out.push_str(host);
            }
        }
        if let Some(port) = self.port {
            out.push_str(&format!(":{}", port));
        }
        if let Some(database) = &self.database {
            out.push('/');
            out.push_str(database);
        }
        if !self.query.is_empty() {
            let pairs: Vec<String> = self
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
                .collect();
            out.push('?');
            out.push_str(&pairs.join("&"));
        }
        out
    }
}

impl FromStr for DatabaseUrl {
    type Err = DbAdminError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(true))
    }
}

fn decode(raw: &str) -> Result<String> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|e| DbAdminError::InvalidUrl(format!("invalid percent-encoding: {}", e)))
}

fn encode(raw: &str) -> String {
    utf8_percent_encode(raw, NON_ALPHANUMERIC).to_string()
}

/// Drops anything between `://` and `@` so a bad URL never leaks credentials
/// into an error message.
fn redact(input: &str) -> String {
    match (input.find("://"), input.rfind('@')) {
        (Some(start), Some(at)) if at > start => {
            format!("{}://***{}", &input[..start], &input[at..])
        }
        _ => input.to_string(),
    }
}

//! Application settings loaded via OrthoConfig.
//!
//! Values come from command-line flags, `FITNESS_*` environment variables and
//! an optional configuration file, in that order of precedence.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use actix_web::cookie::Key;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_DATABASE_PATH: &str = "fitness.db";

/// Shortest key file accepted for deriving the cookie signing key.
pub const SESSION_KEY_MIN_LEN: usize = 32;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {message}")]
    BindAddr { value: String, message: String },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
}

/// Runtime configuration for the fitness server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FITNESS")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Path of the SQLite database file.
    pub database_path: Option<PathBuf>,
    /// File holding the session signing secret.
    pub session_key_file: Option<PathBuf>,
    /// Mark session cookies `Secure`.
    #[ortho_config(default = false)]
    pub cookie_secure: bool,
}

impl AppSettings {
    /// Return the configured bind address, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Return the configured database path, falling back to the default.
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH))
    }

    /// Derive the session signing key.
    ///
    /// Without a configured key file an ephemeral key is generated, so
    /// sessions do not survive a restart.
    ///
    /// # Errors
    ///
    /// Fails when the configured file cannot be read or is too short.
    pub fn session_key(&self) -> Result<Key, SettingsError> {
        match &self.session_key_file {
            Some(path) => key_from_file(path),
            None => {
                warn!("no session key file configured; using an ephemeral key");
                Ok(Key::generate())
            }
        }
    }
}

fn key_from_file(path: &Path) -> Result<Key, SettingsError> {
    let bytes = std::fs::read(path).map_err(|source| SettingsError::KeyRead {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.len() < SESSION_KEY_MIN_LEN {
        return Err(SettingsError::KeyTooShort {
            path: path.to_path_buf(),
            length: bytes.len(),
            min_len: SESSION_KEY_MIN_LEN,
        });
    }
    Ok(Key::derive_from(&bytes))
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and session key loading.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("fitness-server")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("FITNESS_BIND_ADDR", None::<String>),
            ("FITNESS_DATABASE_PATH", None::<String>),
            ("FITNESS_SESSION_KEY_FILE", None::<String>),
            ("FITNESS_COOKIE_SECURE", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default parses"),
            "127.0.0.1:5000".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(settings.database_path(), PathBuf::from("fitness.db"));
        assert!(settings.session_key_file.is_none());
        assert!(!settings.cookie_secure);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("FITNESS_BIND_ADDR", Some("0.0.0.0:8080".to_owned())),
            ("FITNESS_DATABASE_PATH", Some("/tmp/fitness-test.db".to_owned())),
            ("FITNESS_SESSION_KEY_FILE", None::<String>),
            ("FITNESS_COOKIE_SECURE", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("override parses").port(),
            8080
        );
        assert_eq!(
            settings.database_path(),
            PathBuf::from("/tmp/fitness-test.db")
        );
        assert!(settings.cookie_secure);
    }

    fn settings_with_key_file(path: Option<PathBuf>) -> AppSettings {
        AppSettings {
            bind_addr: Some("not-an-address".to_owned()),
            database_path: None,
            session_key_file: path,
            cookie_secure: false,
        }
    }

    #[rstest]
    fn malformed_bind_address_is_rejected() {
        let err = settings_with_key_file(None)
            .bind_addr()
            .expect_err("address should not parse");
        assert!(matches!(err, SettingsError::BindAddr { ref value, .. } if value == "not-an-address"));
    }

    #[rstest]
    fn missing_key_file_generates_ephemeral_key() {
        assert!(settings_with_key_file(None).session_key().is_ok());
    }

    #[rstest]
    #[case(SESSION_KEY_MIN_LEN, true)]
    #[case(SESSION_KEY_MIN_LEN - 1, false)]
    fn key_file_length_is_enforced(#[case] length: usize, #[case] accepted: bool) {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("session_key");
        std::fs::write(&path, vec![b'k'; length]).expect("write key");

        let result = settings_with_key_file(Some(path)).session_key();
        match (result, accepted) {
            (Ok(_), true) => {}
            (Err(SettingsError::KeyTooShort { length: got, .. }), false) => {
                assert_eq!(got, length);
            }
            (other, _) => panic!("unexpected outcome: {:?}", other.map(|_| "key")),
        }
    }

    #[rstest]
    fn unreadable_key_file_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent");
        let err = settings_with_key_file(Some(path.clone()))
            .session_key()
            .err()
            .expect("missing file should fail");
        assert!(matches!(err, SettingsError::KeyRead { path: ref p, .. } if *p == path));
    }
}

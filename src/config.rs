//! Connection settings
//!
//! They are read from a dotenv-style file (`.env` by default), and can be overridden by environment variables:
//!
//! ```text
//! MYSQL_HOST=localhost
//! MYSQL_PORT=3306        # optional
//! MYSQL_USER=scheduler
//! MYSQL_PASS=secret
//! MYSQL_DB=scheduler
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;

use crate::error::SchedulerError;

/// The file [`Settings::load`] reads.
/// Feel free to override it when initing this library.
pub static ENV_FILE: Lazy<Arc<Mutex<PathBuf>>> = Lazy::new(|| Arc::new(Mutex::new(PathBuf::from(".env"))));

pub const HOST_KEY: &str = "MYSQL_HOST";
pub const PORT_KEY: &str = "MYSQL_PORT";
pub const USER_KEY: &str = "MYSQL_USER";
pub const PASSWORD_KEY: &str = "MYSQL_PASS";
pub const DATABASE_KEY: &str = "MYSQL_DB";

pub const DEFAULT_PORT: u16 = 3306;

/// Where and how to reach the MySQL server
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<hidden>")
            .field("database", &self.database)
            .finish()
    }
}

impl Settings {
    /// Read the settings from [`ENV_FILE`] and the process environment
    pub fn load() -> Result<Self, SchedulerError> {
        let path = match ENV_FILE.lock() {
            Ok(path) => path.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        Self::from_env_file(&path)
    }

    /// Read the settings from `path`, then let environment variables override them.
    ///
    /// A missing file is not an error, as long as the environment provides every key
    pub fn from_env_file(path: &Path) -> Result<Self, SchedulerError> {
        let mut values = HashMap::new();

        match dotenvy::from_path_iter(path) {
            Err(err) if err.not_found() => {
                log::debug!("No {:?} file, only using the environment", path);
            },
            Err(err) => {
                return Err(SchedulerError::config(format!("unable to read {:?}: {}", path, err)));
            },
            Ok(iter) => {
                for item in iter {
                    let (key, value) = item
                        .map_err(|err| SchedulerError::config(format!("invalid line in {:?}: {}", path, err)))?;
                    values.insert(key, value);
                }
            },
        }

        for key in [HOST_KEY, PORT_KEY, USER_KEY, PASSWORD_KEY, DATABASE_KEY].iter() {
            if let Ok(value) = std::env::var(key) {
                values.insert(key.to_string(), value);
            }
        }

        Self::from_map(&values)
    }

    /// Build settings from already-parsed key/value pairs
    pub fn from_map(values: &HashMap<String, String>) -> Result<Self, SchedulerError> {
        let get = |key: &str| -> Result<String, SchedulerError> {
            values.get(key)
                .cloned()
                .ok_or_else(|| SchedulerError::config(format!("{} is not set", key)))
        };

        let port = match values.get(PORT_KEY) {
            None => DEFAULT_PORT,
            Some(port) => port.trim().parse()
                .map_err(|_| SchedulerError::config(format!("{} must be a port number, not {:?}", PORT_KEY, port)))?,
        };

        Ok(Self {
            host: get(HOST_KEY)?,
            port,
            user: get(USER_KEY)?,
            password: get(PASSWORD_KEY)?,
            database: get(DATABASE_KEY)?,
        })
    }

    /// `user@host:port/database`
    pub fn target(&self) -> String {
        format!("{}@{}:{}/{}", self.user, self.host, self.port, self.database)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> HashMap<String, String> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn complete_settings() {
        let settings = Settings::from_map(&pairs(&[
            ("MYSQL_HOST", "db.local"),
            ("MYSQL_USER", "me"),
            ("MYSQL_PASS", "secret"),
            ("MYSQL_DB", "calendar"),
        ])).unwrap();
        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.target(), "me@db.local:3306/calendar");
        assert!(format!("{:?}", settings).contains("secret") == false);
    }

    #[test]
    fn invalid_settings() {
        let err = Settings::from_map(&pairs(&[("MYSQL_HOST", "db.local")])).unwrap_err();
        assert!(matches!(err, SchedulerError::Config(_)));

        let err = Settings::from_map(&pairs(&[
            ("MYSQL_HOST", "db.local"),
            ("MYSQL_PORT", "mysql"),
            ("MYSQL_USER", "me"),
            ("MYSQL_PASS", "secret"),
            ("MYSQL_DB", "calendar"),
        ])).unwrap_err();
        assert!(err.to_string().contains("MYSQL_PORT"));
    }

    #[test]
    fn env_file() {
        let path = std::env::temp_dir().join(format!("scheduler-settings-{}.env", std::process::id()));
        std::fs::write(&path, "MYSQL_HOST=db.local\nMYSQL_PORT=3307\nMYSQL_USER=me\nMYSQL_PASS='with space'\nMYSQL_DB=calendar\n").unwrap();

        let settings = Settings::from_env_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        if std::env::var(HOST_KEY).is_err() {
            assert_eq!(settings.host, "db.local");
        }
        if std::env::var(PASSWORD_KEY).is_err() {
            assert_eq!(settings.password, "with space");
        }
        if std::env::var(PORT_KEY).is_err() {
            assert_eq!(settings.port, 3307);
        }
    }
}

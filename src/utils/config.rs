use dotenv::dotenv;
use std::env;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_name: String,
    pub port: u16,
    pub session_secret: String,
}

impl AppConfig {
    pub fn global() -> &'static AppConfig {
        CONFIG.get_or_init(|| {
            dotenv().ok();
            Self::from_env()
        })
    }

    fn from_env() -> AppConfig {
        AppConfig {
            database_url: env::var("MONGO_URI")
                .expect("MONGO_URI environment variable must be set"),
            database_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "hungry-paws".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(3000),
            session_secret: env::var("SESSION_SECRET")
                .unwrap_or_else(|_| "hungry-paws-secret".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_reads_values() {
        temp_env::with_vars(
            vec![
                ("MONGO_URI", Some("mongodb://localhost:27017")),
                ("MONGO_DB_NAME", Some("hungry-paws-test")),
                ("PORT", Some("8081")),
                ("SESSION_SECRET", Some("test-secret")),
            ],
            || {
                let config = AppConfig::from_env();

                assert_eq!(config.database_url, "mongodb://localhost:27017");
                assert_eq!(config.database_name, "hungry-paws-test");
                assert_eq!(config.port, 8081);
                assert_eq!(config.session_secret, "test-secret");
            },
        );
    }

    #[test]
    fn test_defaults_apply_when_optional_vars_missing() {
        temp_env::with_vars(
            vec![
                ("MONGO_URI", Some("mongodb://localhost:27017")),
                ("MONGO_DB_NAME", None::<&str>),
                ("PORT", None),
                ("SESSION_SECRET", None),
            ],
            || {
                let config = AppConfig::from_env();

                assert_eq!(config.database_name, "hungry-paws");
                assert_eq!(config.port, 3000);
                assert_eq!(config.session_secret, "hungry-paws-secret");
            },
        );
    }

    #[test]
    fn test_unparseable_port_falls_back_to_default() {
        temp_env::with_vars(
            vec![
                ("MONGO_URI", Some("mongodb://localhost:27017")),
                ("PORT", Some("not-a-port")),
            ],
            || {
                let config = AppConfig::from_env();
                assert_eq!(config.port, 3000);
            },
        );
    }
}

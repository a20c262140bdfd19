use core_config::{AppInfo, FromEnv, app_info, env_flag, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Apply pending migrations before serving (RUN_MIGRATIONS, default true)
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - DATABASE_URL
        let server = ServerConfig::from_env()?;
        let run_migrations = env_flag("RUN_MIGRATIONS", true)?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            run_migrations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_requires_database_url() {
        temp_env::with_var_unset("DATABASE_URL", || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn test_config_defaults() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/catalog")),
                ("APP_ENV", None),
                ("PORT", None),
                ("RUN_MIGRATIONS", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "catalog_api");
                assert_eq!(config.server.port, 8080);
                assert!(config.run_migrations);
                assert!(config.environment.is_development());
            },
        );
    }

    #[test]
    fn test_migrations_can_be_disabled() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/catalog")),
                ("RUN_MIGRATIONS", Some("false")),
            ],
            || {
                assert!(!Config::from_env().unwrap().run_migrations);
            },
        );
    }
}

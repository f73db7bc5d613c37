// Configuration module entry point
// Loads the read-only service configuration and holds the shared app state

mod state;
mod types;

use std::net::SocketAddr;

use lettre::Address;

use crate::error::ConfigError;

// Re-export public types
pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, MailConfig, PerformanceConfig, ServerConfig};

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "contact-relay";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// Sources, lowest priority first: built-in defaults, the optional config
    /// file, then `CONTACT_*` environment variables (`__` separates sections,
    /// e.g. `CONTACT_MAIL__HOST`).
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        Self::load_with_env(config_path, None)
    }

    /// `env` replaces the process environment when given.
    ///
    /// Values stay strings until deserialization so that secrets such as
    /// `0123456` are not coerced into numbers; numeric and boolean fields
    /// are parsed by their target type.
    fn load_with_env(
        config_path: &str,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.header_read_timeout", 30)?
            .set_default("performance.shutdown_timeout", 10)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("mail.host", "")?
            .set_default("mail.port", 465)?
            .set_default("mail.secure", true)?
            .set_default("mail.user", "")?
            .set_default("mail.password", "")?
            .set_default("mail.site_name", "PuntoCero")?
            .set_default("mail.escape_html", false)?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("CONTACT")
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the service cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mail.host.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "mail.host must be set (CONTACT_MAIL__HOST)".to_string(),
            ));
        }
        if let Err(e) = self.mail.user.parse::<Address>() {
            return Err(ConfigError::Invalid(format!(
                "mail.user '{}' is not a valid address: {e}",
                self.mail.user
            )));
        }
        if self.http.max_body_size == 0 {
            return Err(ConfigError::Invalid(
                "http.max_body_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            workers: None,
        },
        logging: LoggingConfig {
            level: "info".to_string(),
            access_log: false,
            access_log_format: "combined".to_string(),
        },
        performance: PerformanceConfig {
            keep_alive: true,
            header_read_timeout: 30,
            max_connections: None,
            shutdown_timeout: 10,
        },
        http: HttpConfig {
            max_body_size: 1024,
        },
        mail: MailConfig {
            host: "smtp.example.com".to_string(),
            port: 465,
            secure: true,
            user: "contacto@puntocero.dev".to_string(),
            password: "secret".to_string(),
            site_name: "PuntoCero".to_string(),
            escape_html: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSING_FILE: &str = "/nonexistent/contact-relay";

    fn env(vars: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    fn mail_env() -> Vec<(&'static str, &'static str)> {
        vec![
            ("CONTACT_MAIL__HOST", "smtp.example.com"),
            ("CONTACT_MAIL__USER", "contacto@puntocero.dev"),
        ]
    }

    #[test]
    fn test_load_defaults() {
        let cfg = Config::load_with_env(MISSING_FILE, env(&mail_env())).unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.server.workers, None);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.performance.header_read_timeout, 30);
        assert_eq!(cfg.performance.shutdown_timeout, 10);
        assert_eq!(cfg.http.max_body_size, 1_048_576);
        assert_eq!(cfg.mail.port, 465);
        assert!(cfg.mail.secure);
        assert_eq!(cfg.mail.site_name, "PuntoCero");
        assert!(!cfg.mail.escape_html);
    }

    #[test]
    fn test_env_overrides_nested_keys() {
        let mut vars = mail_env();
        vars.extend([
            ("CONTACT_SERVER__PORT", "8080"),
            ("CONTACT_MAIL__SECURE", "false"),
            ("CONTACT_MAIL__PORT", "587"),
            ("CONTACT_SERVER__WORKERS", "2"),
        ]);
        let cfg = Config::load_with_env(MISSING_FILE, env(&vars)).unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.workers, Some(2));
        assert_eq!(cfg.mail.port, 587);
        assert!(!cfg.mail.secure);
    }

    #[test]
    fn test_env_strings_are_not_coerced() {
        for password in ["0123456", "1.50", "true", "00"] {
            let mut vars = mail_env();
            vars.push(("CONTACT_MAIL__PASSWORD", password));
            vars.push(("CONTACT_MAIL__SITE_NAME", "007"));
            let cfg = Config::load_with_env(MISSING_FILE, env(&vars)).unwrap();
            assert_eq!(cfg.mail.password, password);
            assert_eq!(cfg.mail.site_name, "007");
        }
    }

    #[test]
    fn test_file_layer_below_env() {
        let path = std::env::temp_dir().join(format!("contact-relay-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[server]\nport = 4000\nhost = \"127.0.0.1\"\n\n[mail]\nhost = \"smtp.file.example\"\n",
        )
        .unwrap();

        let mut vars = mail_env();
        vars.push(("CONTACT_SERVER__PORT", "5000"));
        let loaded = Config::load_with_env(path.to_str().unwrap(), env(&vars));
        std::fs::remove_file(&path).unwrap();

        let cfg = loaded.unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.mail.host, "smtp.example.com");
    }

    #[test]
    fn test_load_fails_without_mail_host() {
        let vars = [("CONTACT_MAIL__USER", "contacto@puntocero.dev")];
        let err = Config::load_with_env(MISSING_FILE, env(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("mail.host"));
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_validate_requires_mail_host() {
        let mut cfg = test_config();
        cfg.mail.host = "  ".to_string();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("mail.host"));
    }

    #[test]
    fn test_validate_requires_account_address() {
        let mut cfg = test_config();
        cfg.mail.user = "not-an-address".to_string();
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_zero_body_limit() {
        let mut cfg = test_config();
        cfg.http.max_body_size = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_socket_addr() {
        let cfg = test_config();
        assert_eq!(
            cfg.get_socket_addr().unwrap(),
            "127.0.0.1:3000".parse::<SocketAddr>().unwrap()
        );

        let mut bad = test_config();
        bad.server.host = "not a host".to_string();
        assert!(bad.get_socket_addr().is_err());
    }

    #[test]
    fn test_password_not_in_debug_output() {
        let rendered = format!("{:?}", test_config().mail);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }
}

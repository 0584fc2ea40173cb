//! Configuration loading and validation

#[cfg(test)]
mod tests {
    use crate::{assert_err, assert_ok};
    use fixzit_scope::{Config, FixzitError};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SECRET: &str = "Integration-Secret-With-More-Than-32-Chars";

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = assert_ok!(NamedTempFile::new());
        assert_ok!(file.write_all(content.as_bytes()));
        file
    }

    #[tokio::test]
    async fn test_full_config_file() {
        let seed = write_config(r#"{ "work_orders": [] }"#);
        let seed_path = seed.path().display().to_string();
        let file = write_config(&format!(
            r#"
server:
  host: "127.0.0.1"
  port: 8181
  cors:
    enabled: true
    allowed_origins: ["https://app.fixzit.co"]
auth:
  jwt_secret: "{SECRET}"
  issuer: "fixzit"
  audience: "fixzit-api"
search:
  default_limit: 25
  max_limit: 50
  max_query_length: 120
security:
  pii_key: "{SECRET}"
  mask_search_results: true
rate_limit:
  enabled: false
storage:
  seed_path: "{seed_path}"
logging:
  level: "fixzit_scope=debug"
  json: true
"#
        ));

        let config = assert_ok!(Config::from_file(file.path()).await);

        assert_eq!(config.server().address(), "127.0.0.1:8181");
        assert!(!config.server().cors.allows_all_origins());
        assert_eq!(config.search().default_limit, 25);
        assert_eq!(config.search().max_query_length, 120);
        assert!(!config.rate_limit().enabled);
        assert_eq!(config.storage().seed_path.as_deref(), Some(seed_path.as_str()));
        assert!(config.logging().json);
    }

    #[tokio::test]
    async fn test_missing_seed_file_rejected() {
        let file = write_config(
            &format!(
                r#"
security:
  pii_key: "{SECRET}"
storage:
  seed_path: "/no/such/seed.json"
"#
            ),
        );

        let err = assert_err!(Config::from_file(file.path()).await);
        assert!(matches!(err, FixzitError::Config(msg) if msg.contains("Storage")));
    }

    #[tokio::test]
    async fn test_missing_pii_key_rejected() {
        let file = write_config(&format!(
            r#"
auth:
  jwt_secret: "{SECRET}"
"#
        ));

        let err = assert_err!(Config::from_file(file.path()).await);
        assert!(matches!(err, FixzitError::Config(msg) if msg.contains("PII key")));
    }

    #[tokio::test]
    async fn test_invalid_search_limits_rejected() {
        let file = write_config(
            r#"
search:
  default_limit: 100
  max_limit: 10
"#,
        );

        let err = assert_err!(Config::from_file(file.path()).await);
        assert!(matches!(err, FixzitError::Config(msg) if msg.contains("Search")));
    }

    #[tokio::test]
    async fn test_malformed_yaml_rejected() {
        let file = write_config("server: [not, a, map");
        let err = assert_err!(Config::from_file(file.path()).await);
        assert!(matches!(err, FixzitError::Config(_)));
    }

    #[test]
    fn test_unknown_weekday_rejected() {
        let err = assert_err!(Config::from_yaml_str(
            r#"
sla:
  work_week:
    start_day: someday
"#
        ));
        assert!(matches!(err, FixzitError::Config(_)));
    }

    #[test]
    fn test_yaml_round_trip_keeps_sla_settings() {
        let mut config = Config::default();
        config.service.security.pii_key = SECRET.to_string();
        config.service.sla.holidays = vec![chrono::NaiveDate::from_ymd_opt(2025, 9, 23).unwrap()];

        let yaml = assert_ok!(config.to_yaml());
        let parsed = assert_ok!(Config::from_yaml_str(&yaml));

        assert_eq!(parsed.sla().holidays, config.sla().holidays);
        assert_eq!(parsed.auth().jwt_secret, config.auth().jwt_secret);
        assert_ok!(parsed.validate());
    }
}

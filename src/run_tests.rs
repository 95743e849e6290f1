//! Tests for the run module.

use super::*;

mod run_error {
    use super::*;

    #[test]
    fn api_bind_displays_the_address() {
        let error = RunError::ApiBind {
            addr: "0.0.0.0:8888".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::AddrInUse),
        };

        let text = error.to_string();
        assert!(text.contains("Failed to bind API listener"));
        assert!(text.contains("0.0.0.0:8888"));
    }

    #[test]
    fn debug_format_works() {
        let error = RunError::ApiBind {
            addr: "0.0.0.0:8888".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::AddrInUse),
        };
        let debug_str = format!("{error:?}");
        assert!(debug_str.contains("ApiBind"));
    }
}

mod worker_settings {
    use super::*;
    use dzsa_sync::config::{Cli, TomlConfig, ValidatedConfig};
    use std::time::Duration;

    fn make_config(content: &str) -> ValidatedConfig {
        let cli = Cli::parse_from_iter(["dzsa-sync", "--config", "x.toml"]);
        let toml = TomlConfig::parse(content).unwrap();
        ValidatedConfig::from_raw(&cli, &toml).unwrap()
    }

    #[test]
    fn settings_carry_the_configured_cadence() {
        let config = make_config(
            r#"
external_ip = "203.0.113.7"
log_path = "sync.log"

[[servers]]
name = "main"
port = 2302

[sync]
interval = 1800
jitter_max = 5
"#,
        );

        let settings = super::super::worker_settings(&config);
        assert_eq!(settings.interval, Duration::from_secs(1800));
        assert_eq!(settings.jitter_max, Duration::from_secs(5));
        assert_eq!(settings.fallback_address.as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn fallback_address_is_absent_in_pure_detect_mode() {
        let config = make_config(
            r#"
detect_ip = true
log_path = "sync.log"

[[servers]]
name = "main"
port = 2302
"#,
        );

        let settings = super::super::worker_settings(&config);
        assert!(settings.fallback_address.is_none());
    }

    #[test]
    fn detect_mode_keeps_the_static_address_as_fallback() {
        let config = make_config(
            r#"
detect_ip = true
external_ip = "203.0.113.7"
log_path = "sync.log"

[[servers]]
name = "main"
port = 2302
"#,
        );

        let settings = super::super::worker_settings(&config);
        assert_eq!(settings.fallback_address.as_deref(), Some("203.0.113.7"));
    }
}

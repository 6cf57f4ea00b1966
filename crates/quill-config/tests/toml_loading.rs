//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use quill_config::QuillConfig;

fn figment_with(file: &str) -> Figment {
    Figment::from(Serialized::defaults(QuillConfig::default())).merge(Toml::file(file))
}

#[test]
fn loads_api_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "https://api.example.com"
namespace = "/v1"
timeout_secs = 5
"#,
        )?;

        let config: QuillConfig = figment_with("config.toml").extract()?;
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.api.endpoint().unwrap(), "https://api.example.com/v1");
        Ok(())
    });
}

#[test]
fn loads_client_and_wordpress_sections() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[client]
mock_mode = true
dev_login = true
stale_secs = 5

[wordpress]
url = "https://blog.example.com"
username = "editor"
app_password = "abcd efgh"
"#,
        )?;

        let config: QuillConfig = figment_with("config.toml").extract()?;
        assert!(config.client.mock_mode);
        assert!(config.client.dev_login);
        assert_eq!(config.client.stale_secs, 5);
        assert_eq!(config.client.mock_latency_ms, 300);
        assert!(config.wordpress.can_publish());
        Ok(())
    });
}

#[test]
fn missing_sections_keep_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[ai]\napi_key = \"sk-test\"\n")?;

        let config: QuillConfig = figment_with("config.toml").extract()?;
        assert!(config.ai.is_configured());
        assert_eq!(config.ai.model, "gpt-4o-mini");
        assert_eq!(config.api.base_url, "http://localhost:8000");
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            "[api]\nbase_url = \"https://from-toml.example.com\"\n",
        )?;
        jail.set_env("QUILL_API__BASE_URL", "https://from-env.example.com");

        let config: QuillConfig = figment_with("config.toml")
            .merge(Env::prefixed("QUILL_").split("__"))
            .extract()?;
        assert_eq!(config.api.base_url, "https://from-env.example.com");
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".quill")?;
        jail.create_file(".quill/config.toml", "[client]\nmock_latency_ms = 0\n")?;

        let config = QuillConfig::load().expect("config loads");
        assert_eq!(config.client.mock_latency_ms, 0);
        Ok(())
    });
}

#[test]
fn invalid_toml_type_is_an_error() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[client]\nstale_secs = \"soon\"\n")?;

        let result: Result<QuillConfig, _> = figment_with("config.toml").extract();
        assert!(result.is_err());
        Ok(())
    });
}

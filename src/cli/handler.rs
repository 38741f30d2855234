use super::error;
use super::output;
use super::{Commands, ConfigAction};
use crate::app::config::Config;
use crate::source::{ImageSource, WaifuClient};
use anyhow::Result;
use std::num::NonZeroUsize;

/// Handle a CLI command and return exit code
pub async fn handle_command(command: Commands, config: &Config) -> i32 {
    let result = match command {
        Commands::Fetch { count, json } => handle_fetch(count, json, config).await,
        Commands::Config { action } => handle_config(action, config),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            error::ERROR
        }
    }
}

/// Whether `command` needs the settings file loaded first.
///
/// `config path` must work even when the file it points at is broken.
pub fn needs_config(command: &Commands) -> bool {
    !matches!(command, Commands::Config { action: ConfigAction::Path })
}

/// Fetch one batch and print it
async fn handle_fetch(count: usize, json: bool, config: &Config) -> Result<i32> {
    let Some(count) = NonZeroUsize::new(count) else {
        eprintln!("Error: --count must be at least 1");
        return Ok(error::INVALID_INPUT);
    };

    let client = WaifuClient::with_user_agent(&config.api.endpoint, &config.api.user_agent)?;
    tracing::info!("Fetching {} images from {}", count, client.endpoint());

    match client.fetch_batch(count).await {
        Ok(urls) => {
            println!("{}", output::format_urls(&urls, json));
            Ok(error::SUCCESS)
        }
        Err(e) => {
            tracing::warn!("Error fetching images: {}", e);
            eprintln!("Error fetching images: {}", e);
            Ok(error::ERROR)
        }
    }
}

fn handle_config(action: ConfigAction, config: &Config) -> Result<i32> {
    match action {
        ConfigAction::Show => {
            println!("{}", toml::to_string_pretty(config)?);
        }
        ConfigAction::Path => {
            println!("{}", crate::util::paths::get_app_config_path()?.display());
        }
        ConfigAction::Init => {
            let path = crate::util::paths::get_app_config_path()?;
            config.save_to(&path)?;
            println!("Wrote {}", path.display());
        }
    }
    Ok(error::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(endpoint: String) -> Config {
        let mut config = Config::default();
        config.api.endpoint = endpoint;
        config
    }

    #[tokio::test]
    async fn test_fetch_success_exit_code() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "url": "https://i.waifu.pics/a.png" })))
            .expect(3)
            .mount(&mock_server)
            .await;

        let code = handle_command(
            Commands::Fetch { count: 3, json: false },
            &config_for(mock_server.uri()),
        )
        .await;

        assert_eq!(code, error::SUCCESS);
    }

    #[tokio::test]
    async fn test_fetch_network_error_exit_code() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let code = handle_command(
            Commands::Fetch { count: 2, json: true },
            &config_for(mock_server.uri()),
        )
        .await;

        assert_eq!(code, error::ERROR);
    }

    #[tokio::test]
    async fn test_fetch_zero_count_is_invalid() {
        let code = handle_command(
            Commands::Fetch { count: 0, json: false },
            &Config::default(),
        )
        .await;

        assert_eq!(code, error::INVALID_INPUT);
    }

    #[test]
    fn test_only_config_path_skips_loading() {
        assert!(!needs_config(&Commands::Config { action: ConfigAction::Path }));
        assert!(needs_config(&Commands::Config { action: ConfigAction::Show }));
        assert!(needs_config(&Commands::Config { action: ConfigAction::Init }));
        assert!(needs_config(&Commands::Fetch { count: 1, json: false }));
    }

    #[tokio::test]
    #[serial]
    async fn test_config_path_works_with_broken_settings() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("settings.toml"), "this is not [valid toml").unwrap();
        crate::util::paths::set_config_dir_override(Some(temp_dir.path().to_path_buf()));

        assert!(Config::load().is_err());
        let command = Commands::Config { action: ConfigAction::Path };
        assert!(!needs_config(&command));
        let code = handle_command(command, &Config::default()).await;

        assert_eq!(code, error::SUCCESS);
        crate::util::paths::set_config_dir_override(None);
    }

    #[tokio::test]
    #[serial]
    async fn test_config_init_writes_settings() {
        let temp_dir = tempfile::tempdir().unwrap();
        crate::util::paths::set_config_dir_override(Some(temp_dir.path().to_path_buf()));

        let code = handle_command(
            Commands::Config { action: ConfigAction::Init },
            &Config::default(),
        )
        .await;

        assert_eq!(code, error::SUCCESS);
        let loaded = Config::load_from(&temp_dir.path().join("settings.toml")).unwrap();
        assert_eq!(loaded, Config::default());

        crate::util::paths::set_config_dir_override(None);
    }
}

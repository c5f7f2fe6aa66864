//! CLI runner - executes commands

use crate::canvas::CanvasClient;
use crate::cli::commands::{Cli, Commands};
use crate::config::Settings;
use crate::dispatch::Dispatcher;
use crate::error::{Error, Result};
use crate::server::McpServer;
use crate::types::JsonValue;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let command = self.cli.command.clone().unwrap_or(Commands::Serve);

        // The catalogue is static; no credentials needed
        if command == Commands::Tools {
            return self.tools();
        }

        let dispatcher = self.dispatcher()?;
        match command {
            Commands::Serve => McpServer::new(dispatcher).serve_stdio().await,
            Commands::Tools => self.tools(),
            Commands::Call { name, args } => Self::call(&dispatcher, &name, &args).await,
            Commands::Resources => {
                let resources = dispatcher.list_resources().await?;
                println!("{}", serde_json::to_string_pretty(&resources)?);
                Ok(())
            }
            Commands::Read { uri } => {
                let contents = dispatcher.read_resource(&uri).await?;
                println!("{}", contents.text);
                Ok(())
            }
        }
    }

    /// Resolve settings: file, then environment, then flags
    pub fn settings(&self) -> Result<Settings> {
        self.settings_with_env(|key| std::env::var(key).ok())
    }

    fn settings_with_env(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<Settings> {
        let mut settings = match &self.cli.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        settings.apply_env_from(lookup);

        if let Some(token) = &self.cli.token {
            settings.api_token = Some(token.clone());
        }
        if let Some(domain) = &self.cli.domain {
            settings.domain = Some(domain.clone());
        }
        if let Some(base_url) = &self.cli.base_url {
            settings.base_url = Some(base_url.clone());
        }
        if let Some(max_pages) = self.cli.max_pages {
            settings.pagination.max_pages = max_pages;
        }
        Ok(settings)
    }

    fn dispatcher(&self) -> Result<Dispatcher> {
        let config = self.settings()?.client_config()?;
        info!(
            "Using Canvas API at {}",
            config.http.base_url.as_deref().unwrap_or_default()
        );
        Ok(Dispatcher::new(CanvasClient::from_config(config)?))
    }

    fn tools(&self) -> Result<()> {
        let tools: Vec<JsonValue> = crate::catalogue::CATALOGUE
            .iter()
            .map(|op| op.tool_definition())
            .collect();
        println!("{}", serde_json::to_string_pretty(&tools)?);
        Ok(())
    }

    async fn call(dispatcher: &Dispatcher, name: &str, args: &str) -> Result<()> {
        let args: JsonValue = serde_json::from_str(args)
            .map_err(|e| Error::validation(format!("--args is not valid JSON: {e}")))?;

        let result = dispatcher.call_operation(name, Some(&args)).await;
        if result.is_error {
            let message = result.text();
            return Err(Error::Other(
                message.strip_prefix("Error: ").unwrap_or(message).to_string(),
            ));
        }
        println!("{}", result.text());
        Ok(())
    }
}

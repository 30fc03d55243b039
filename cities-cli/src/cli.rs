use anyhow::Context;
use cities_core::{CityListLoader, Config, HtmlTable, LoadOutcome, RenderMode, StderrNotifier};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use std::{fs, path::PathBuf};
use tracing::info;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cities", version, about = "Log in to the city service and list its cities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the city list and print it as an HTML table.
    List {
        /// Clear the table before rendering instead of appending.
        #[arg(long)]
        replace: bool,

        /// Write the table to this file instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Interactively store the service URL and credentials.
    Configure,

    /// Print the location of the config file.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::List { replace, output } => {
                let mut config = Config::load()?;
                if replace {
                    config.render_mode = RenderMode::Replace;
                }
                list(&config, output).await
            }
            Command::Configure => configure(),
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

async fn list(config: &Config, output: Option<PathBuf>) -> anyhow::Result<()> {
    let loader = CityListLoader::from_config(config);
    let mut table = HtmlTable::new();

    match loader.run(&mut table, &mut StderrNotifier).await {
        LoadOutcome::Rendered(rows) => info!(rows, "city list loaded"),
        LoadOutcome::Failed => info!("city list unavailable, rendered placeholder"),
    }

    let html = table.render();
    match output {
        Some(path) => fs::write(&path, html)
            .with_context(|| format!("Failed to write table to {}", path.display()))?,
        None => print!("{html}"),
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    config.base_url = Text::new("Service URL:")
        .with_default(&config.base_url)
        .prompt()
        .context("Failed to read service URL")?;

    let email = Text::new("Email:")
        .with_default(config.email.as_deref().unwrap_or_default())
        .prompt()
        .context("Failed to read email")?;
    config.email = Some(email);

    let password = Password::new("Password:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read password")?;
    config.password = Some(password);

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_list_with_flags() {
        let cli = Cli::try_parse_from(["cities", "list", "--replace", "-o", "out.html"]).unwrap();

        match cli.command {
            Command::List { replace, output } => {
                assert!(replace);
                assert_eq!(output, Some(PathBuf::from("out.html")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn list_defaults_to_stdout_and_configured_mode() {
        let cli = Cli::try_parse_from(["cities", "list"]).unwrap();

        assert!(matches!(cli.command, Command::List { replace: false, output: None }));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["cities"]).is_err());
    }
}

//! Command line options for the release-checker tool
use crate::{
    config::ReleaseCheckerConfig,
    errors::ReleaseCheckerError,
    release::{ReleaseCheck, ReleaseChecker},
};
use clap::Parser;
use std::path::PathBuf;

/// release-checker - Check the latest published release through the GitHub GraphQL API
#[derive(Parser, Default, Clone, Debug)]
#[command(version)]
pub struct ReleaseCheckerCli {
    /// Custom configuration file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// GraphQL endpoint
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Owner of the repository
    #[arg(short, long)]
    pub owner: Option<String>,

    /// Name of the repository
    #[arg(short, long)]
    pub repository: Option<String>,

    /// Environment variable holding the access token
    #[arg(short, long = "token-env")]
    pub token_env: Option<String>,

    /// Show the current config path
    #[arg(long)]
    pub show_config_path: bool,

    /// Write the configuration to the config file and exit
    #[arg(long)]
    pub init_config: bool,

    /// Verbose mode (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ReleaseCheckerCli {
    /// Log level matching the verbosity
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

/// Run the release-checker tool with the provided command line options
/// # Errors
/// Error if the configuration is invalid or the release check failed
pub async fn release_checker_main(args: ReleaseCheckerCli) -> Result<(), ReleaseCheckerError> {
    if args.show_config_path {
        let config_path = ReleaseCheckerConfig::get_config_path()?;
        println!("{}", config_path.display());
        return Ok(());
    }
    if args.init_config {
        let config_path = match &args.config {
            Some(p) => PathBuf::from(p),
            None => ReleaseCheckerConfig::get_config_path()?,
        };
        let mut config = ReleaseCheckerConfig::default();
        config.apply_overrides(&args);
        config.validate()?;
        config.save(&config_path)?;
        println!("Config written to {}", config_path.display());
        return Ok(());
    }
    let config = ReleaseCheckerConfig::load(&args)?;
    let checker = ReleaseChecker::new(config)?;
    match checker.check_latest_release().await {
        ReleaseCheck::Found(tag) if tag.is_empty() => {
            println!("No release found");
            Ok(())
        }
        ReleaseCheck::Found(tag) => {
            println!("Latest release: {tag}");
            Ok(())
        }
        ReleaseCheck::Disabled => {
            println!("Release check skipped: {}", ReleaseCheck::DISABLED_SENTINEL);
            Ok(())
        }
        ReleaseCheck::Failed(e) => Err(e),
    }
}

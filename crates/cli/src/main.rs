// FILE: crates/cli/src/main.rs

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use hailcast_config::{Config, ConfigManager};
use hailcast_library::{audio_root, PathResolver};
use std::path::PathBuf;

mod commands;
mod desktop;

fn build_cli() -> Command {
    Command::new("hailcast")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Hailcast Team")
        .about("Import, validate and look up multilingual voice command audio")
        .arg(
            Arg::new("root")
                .short('r')
                .long("root")
                .value_name("DIR")
                .help("Import root (defaults to the platform Audio directory)")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log at debug level")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .value_name("DIR")
                .help("Directory holding config.toml")
                .global(true),
        )
        .subcommand(
            Command::new("setup")
                .about("Check the import root and import audio if English is incomplete")
                .arg(
                    Arg::new("source")
                        .short('s')
                        .long("source")
                        .value_name("DIR")
                        .help("Source directory; prompts when omitted"),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Validate the import root")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the full report as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Copy language directories from a source directory")
                .arg(
                    Arg::new("source")
                        .required(true)
                        .value_name("DIR")
                        .help("Directory containing one subdirectory per language"),
                ),
        )
        .subcommand(
            Command::new("resolve")
                .about("Show which file plays for a track")
                .arg(Arg::new("language").required(true).value_name("LANGUAGE"))
                .arg(
                    Arg::new("track")
                        .required(true)
                        .value_name("TRACK")
                        .help("Track number or {language}-{category}-{n} id"),
                ),
        )
        .subcommand(Command::new("languages").about("List languages and their status"))
        .subcommand(
            Command::new("commands")
                .about("List command titles")
                .arg(
                    Arg::new("category")
                        .short('c')
                        .long("category")
                        .value_name("CATEGORY")
                        .help("introduction, caution or warning"),
                ),
        )
        .subcommand(Command::new("status").about("Show per-language file counts and disk usage"))
        .subcommand(
            Command::new("config")
                .about("Show or manage the configuration file")
                .arg(
                    Arg::new("action")
                        .value_name("ACTION")
                        .value_parser(["show", "path", "init", "reset"])
                        .default_value("show"),
                ),
        )
}

fn config_manager(matches: &clap::ArgMatches) -> Result<ConfigManager> {
    match matches.get_one::<String>("config-dir") {
        Some(dir) => ConfigManager::with_directory(PathBuf::from(dir))
            .with_context(|| format!("Failed to use config directory {}", dir)),
        None => ConfigManager::new().context("Failed to locate the config directory"),
    }
}

fn load_config(manager: &ConfigManager) -> Config {
    match manager.load_with_env_overrides() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {}; using default configuration", e);
            Config::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let manager = config_manager(&matches)?;
    let config = load_config(&manager);

    let level = if matches.get_flag("verbose") {
        "debug".to_string()
    } else {
        config.app.log_level.to_string()
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let root = match matches.get_one::<String>("root") {
        Some(dir) => PathBuf::from(dir),
        None => audio_root(
            PathResolver::for_desktop().context("Failed to locate the data directory")?,
            &config,
        ),
    };
    let ctx = commands::Context {
        config,
        root,
        manager,
    };

    match matches.subcommand() {
        Some(("setup", sub_matches)) => commands::setup(&ctx, sub_matches).await,
        Some(("validate", sub_matches)) => commands::validate(&ctx, sub_matches).await,
        Some(("import", sub_matches)) => commands::import(&ctx, sub_matches).await,
        Some(("resolve", sub_matches)) => commands::resolve(&ctx, sub_matches).await,
        Some(("languages", _)) => commands::languages(&ctx).await,
        Some(("commands", sub_matches)) => commands::list_commands(sub_matches),
        Some(("status", _)) => commands::status(&ctx).await,
        Some(("config", sub_matches)) => commands::config(&ctx, sub_matches),
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_global_root_after_subcommand() {
        let matches = build_cli()
            .try_get_matches_from(["hailcast", "validate", "--root", "/tmp/Audio", "--json"])
            .unwrap();
        assert_eq!(
            matches.get_one::<String>("root").map(String::as_str),
            Some("/tmp/Audio")
        );
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "validate");
        assert!(sub.get_flag("json"));
    }

    #[test]
    fn test_config_action_is_restricted() {
        assert!(build_cli()
            .try_get_matches_from(["hailcast", "config", "delete"])
            .is_err());
    }
}

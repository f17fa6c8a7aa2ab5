// FILE: crates/cli/src/commands.rs

use crate::desktop::{DesktopPermissions, TerminalChooser};
use anyhow::{anyhow, bail, Context as _, Result};
use clap::ArgMatches;
use console::{style, Term};
use hailcast_config::{Config, ConfigManager};
use hailcast_core::{
    commands_for, Category, ImportProgress, Language, LanguageCatalog, LanguageStatus, Platform,
    TrackId, ValidationReport, REQUIRED_FILES_COUNT,
};
use hailcast_library::{
    directory_size, verify_file_integrity, DirectoryPicker, DirectoryValidator, FileImporter,
    PermissionGate, PlaybackResolver, SetupFlow, SetupState,
};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

/// Everything a command needs, resolved once in `main`
pub struct Context {
    pub config: Config,
    pub root: PathBuf,
    pub manager: ConfigManager,
}

impl Context {
    fn max_missing(&self) -> usize {
        self.config.app.max_missing_listed
    }
}

/// Run permission check, validation and, if needed, an import
pub async fn setup(ctx: &Context, matches: &ArgMatches) -> Result<()> {
    let platform = Platform::current();
    let chooser = TerminalChooser::new(matches.get_one::<String>("source").cloned());
    let flow = SetupFlow::new(
        PermissionGate::new(platform, DesktopPermissions),
        DirectoryPicker::new(platform, chooser),
        FileImporter::new(&ctx.root),
    )
    .create_root(ctx.config.library.create_root_on_startup);

    println!("Audio directory: {}", style(ctx.root.display()).bold());
    let mut state = flow.run().await;

    if matches!(state, SetupState::NeedsSource(_)) {
        print_state(&state, ctx.max_missing());
        let term = Term::stderr();
        state = flow
            .import_from_picker(cancel_on_ctrl_c(), |p| print_progress(&term, p))
            .await;
        let _ = term.clear_line();
    }

    print_state(&state, ctx.max_missing());
    match state {
        SetupState::Ready(_) => {
            println!("{} Voice commands are ready", style("✓").green().bold());
            Ok(())
        }
        SetupState::Cancelled => {
            println!("Setup cancelled");
            Ok(())
        }
        SetupState::Failed(message) => Err(anyhow!(message)),
        SetupState::PermissionRequired => bail!("Storage permission is required"),
        SetupState::NeedsSource(_) | SetupState::IncompleteAfterImport(_) => {
            bail!("English audio files are still incomplete")
        }
    }
}

/// Validate the import root
pub async fn validate(ctx: &Context, matches: &ArgMatches) -> Result<()> {
    let report = DirectoryValidator::validate(&ctx.root).await;

    if matches.get_flag("json") || ctx.config.app.debug_mode {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        print!("{}", format_report(&report, ctx.max_missing()));
    }

    if !report.is_valid {
        bail!("{}", report.errors.join("; "));
    }
    Ok(())
}

/// Copy audio from a source directory into the import root
pub async fn import(ctx: &Context, matches: &ArgMatches) -> Result<()> {
    let source = matches
        .get_one::<String>("source")
        .ok_or_else(|| anyhow!("Source directory is required"))?;

    let importer = FileImporter::new(&ctx.root);
    let term = Term::stderr();
    let outcome = importer
        .import_with_progress(source, cancel_on_ctrl_c(), |p| print_progress(&term, p))
        .await;
    let _ = term.clear_line();

    match outcome.into_result() {
        Ok(copied) => {
            println!(
                "{} Copied {} file(s) into {}",
                style("✓").green().bold(),
                copied,
                ctx.root.display()
            );
        }
        Err(e) if e.is_silent() => {
            println!("Import cancelled; files already copied were kept");
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to copy files"),
    }

    let report = DirectoryValidator::validate(&ctx.root).await;
    print!("{}", format_report(&report, ctx.max_missing()));
    if !report.is_valid {
        println!(
            "{} Some files may not have been copied correctly. Please check the audio directory.",
            style("!").yellow().bold()
        );
    }
    Ok(())
}

/// Print the file that would play for a track
pub async fn resolve(ctx: &Context, matches: &ArgMatches) -> Result<()> {
    let language_arg = matches
        .get_one::<String>("language")
        .ok_or_else(|| anyhow!("Language is required"))?;
    let track_arg = matches
        .get_one::<String>("track")
        .ok_or_else(|| anyhow!("Track is required"))?;

    let language = parse_language(language_arg)?;
    let track = TrackId::parse_track(track_arg)?;

    let path = PlaybackResolver::new(&ctx.root)
        .resolve_path(language, track)
        .await
        .with_context(|| format!("No audio for {} track {}", language, track))?;

    println!("{}", path.display());
    println!(
        "  {} ({})",
        hailcast_core::command_title(track),
        Category::for_track(track)
    );
    Ok(())
}

/// List every language with its status under the import root
pub async fn languages(ctx: &Context) -> Result<()> {
    let report = DirectoryValidator::validate(&ctx.root).await;
    let default = LanguageCatalog::resolve(&ctx.config.playback.default_language);

    println!("\n{} Supported Languages", style(LanguageCatalog::len()).bold().cyan());
    println!("{}", "=".repeat(40));
    for language in LanguageCatalog::all() {
        let marker = if Some(language) == default { "*" } else { " " };
        println!(
            "{} {:<12} {}",
            marker,
            language.name(),
            format_status(report.status(language))
        );
    }
    Ok(())
}

/// List command titles, optionally for one category
pub fn list_commands(matches: &ArgMatches) -> Result<()> {
    let categories = match matches.get_one::<String>("category") {
        Some(name) => vec![name.parse::<Category>()?],
        None => Category::ALL.to_vec(),
    };

    for category in categories {
        println!("\n{}", style(category.name().to_uppercase()).bold());
        for command in commands_for(category) {
            println!("  {:>2}. {}", command.track.get(), command.text);
        }
    }
    Ok(())
}

/// Show per-language file counts and disk usage
pub async fn status(ctx: &Context) -> Result<()> {
    let counts = verify_file_integrity(&ctx.root)
        .await
        .with_context(|| format!("Failed to inspect {}", ctx.root.display()))?;
    let size = directory_size(&ctx.root).await;

    println!("\n{}", style("Audio Directory").bold().cyan());
    println!("{}", "=".repeat(40));
    println!("Path: {}", ctx.root.display());
    println!("Size: {}", format_size(size));

    if counts.is_empty() {
        println!("No language directories found.");
        return Ok(());
    }
    for (language, count) in &counts {
        let line = format!("{:<12} {:>3}/{}", language.name(), count, REQUIRED_FILES_COUNT);
        if *count == REQUIRED_FILES_COUNT {
            println!("  {}", style(line).green());
        } else {
            println!("  {}", style(line).yellow());
        }
    }
    Ok(())
}

/// Show or manage the config file
pub fn config(ctx: &Context, matches: &ArgMatches) -> Result<()> {
    let action = matches
        .get_one::<String>("action")
        .map(String::as_str)
        .unwrap_or("show");

    match action {
        "path" => println!("{}", ctx.manager.config_path().display()),
        "init" => {
            if ctx.manager.initialize().context("Failed to write config")? {
                println!("Created {}", ctx.manager.config_path().display());
            } else {
                println!("Config already exists at {}", ctx.manager.config_path().display());
            }
        }
        "reset" => {
            ctx.manager.reset().context("Failed to reset config")?;
            println!("{} Configuration reset to defaults", style("✓").green().bold());
        }
        _ => {
            let text = toml::to_string_pretty(&ctx.config).context("Failed to render config")?;
            print!("{}", text);
        }
    }
    Ok(())
}

fn parse_language(name: &str) -> Result<Language> {
    LanguageCatalog::resolve(name).ok_or_else(|| anyhow!("Unsupported language: {}", name))
}

/// Token cancelled on the first Ctrl-C
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            child.cancel();
        }
    });
    token
}

fn print_progress(term: &Term, progress: &ImportProgress) {
    let _ = term.clear_line();
    let _ = term.write_str(&format_progress(progress));
}

fn print_state(state: &SetupState, max_missing: usize) {
    if let Some(report) = state.report() {
        print!("{}", format_report(report, max_missing));
    }
    if let Some(alert) = state.alert() {
        println!("{} {}", style(alert.title).yellow().bold(), alert.message);
    }
}

fn format_progress(progress: &ImportProgress) -> String {
    match (&progress.language, &progress.current_file) {
        (Some(language), Some(file)) => {
            format!("[{:>3}%] {} {}", progress.percent(), language, file)
        }
        _ => format!("[{:>3}%]", progress.percent()),
    }
}

fn format_status(status: Option<LanguageStatus>) -> String {
    match status {
        Some(LanguageStatus::Complete) => style("complete").green().to_string(),
        Some(LanguageStatus::Incomplete) => style("incomplete").yellow().to_string(),
        Some(LanguageStatus::Fallback) => style("fallback (English)").dim().to_string(),
        None => style("unknown").dim().to_string(),
    }
}

/// Human-readable validation summary
///
/// Lists at most `max_missing` missing names per language.
fn format_report(report: &ValidationReport, max_missing: usize) -> String {
    let mut out = String::new();

    for error in &report.errors {
        out.push_str(&format!("{} {}\n", style("✗").red().bold(), error));
    }

    let complete = report.complete_languages();
    if !complete.is_empty() {
        let names: Vec<&str> = complete.iter().map(|l| l.name()).collect();
        out.push_str(&format!("Complete: {}\n", names.join(", ")));
    }

    for language in report.incomplete_languages() {
        let missing = report.missing_for(language);
        let shown: Vec<&str> = missing.iter().take(max_missing).map(String::as_str).collect();
        out.push_str(&format!(
            "Incomplete: {} ({} missing: {}",
            language,
            missing.len(),
            shown.join(", ")
        ));
        if missing.len() > shown.len() {
            out.push_str(&format!(", +{} more", missing.len() - shown.len()));
        }
        out.push_str(")\n");
    }

    for name in &report.unrecognized_directories {
        out.push_str(&format!("Ignored directory: {}\n", name));
    }

    out
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

use super::logging::{init_logging, LogConfig};
use super::print::{print_blocks, print_messages, print_settings, print_value};
use super::setup::{Cli, Commands};
use clap::Parser;
use mindmap_settings::api::{self, parse_value, CmdResult, ConfigAction, SettingsApi};
use mindmap_settings::config::GlobalSettings;
use mindmap_settings::document::fs::FileDocument;
use mindmap_settings::error::Result;
use std::path::Path;
use tracing::debug;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_verbosity(cli.verbose));

    let config_dir = match cli.config_dir {
        Some(dir) => dir,
        None => GlobalSettings::config_dir()?,
    };
    debug!(config_dir = %config_dir.display(), "resolved config dir");

    match cli.command {
        Commands::Blocks { file } => handle_blocks(&config_dir, &file),
        Commands::Show { file, block } => handle_show(&config_dir, &file, block),
        Commands::Get { file, key, block } => handle_get(&config_dir, &file, block, &key),
        Commands::Set {
            file,
            key,
            value,
            block,
        } => handle_set(&config_dir, &file, block, &key, &value),
        Commands::Unset { file, key, block } => handle_unset(&config_dir, &file, block, &key),
        Commands::Resize {
            file,
            block,
            deltas,
        } => handle_resize(&config_dir, &file, block, &deltas),
        Commands::Config { key, value, unset } => handle_config(&config_dir, key, value, unset),
    }
}

fn open_api(config_dir: &Path, file: &Path) -> Result<SettingsApi<FileDocument>> {
    let global = GlobalSettings::load(config_dir)?.into_map();
    let document = FileDocument::open(file)?;
    Ok(SettingsApi::new(document, global))
}

/// Write the document back if the operation changed it.
fn save(api: SettingsApi<FileDocument>) -> Result<()> {
    let mut document = api.into_document();
    if document.save()? {
        debug!(path = %document.path().display(), "document updated");
    }
    Ok(())
}

fn handle_blocks(config_dir: &Path, file: &Path) -> Result<()> {
    let api = open_api(config_dir, file)?;
    let result = api.list_blocks()?;
    print_blocks(&result.blocks);
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(config_dir: &Path, file: &Path, block: Option<usize>) -> Result<()> {
    let api = open_api(config_dir, file)?;
    let result = api.show(block)?;
    print_result_settings(&result)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_get(config_dir: &Path, file: &Path, block: Option<usize>, key: &str) -> Result<()> {
    let api = open_api(config_dir, file)?;
    let result = api.get(block, key)?;
    if let Some(value) = &result.value {
        print_value(value);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_set(
    config_dir: &Path,
    file: &Path,
    block: Option<usize>,
    key: &str,
    value: &str,
) -> Result<()> {
    let mut api = open_api(config_dir, file)?;
    let result = api.set(block, key, value)?;
    save(api)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_unset(config_dir: &Path, file: &Path, block: Option<usize>, key: &str) -> Result<()> {
    let mut api = open_api(config_dir, file)?;
    let result = api.unset(block, key)?;
    save(api)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_resize(config_dir: &Path, file: &Path, block: usize, deltas: &[f64]) -> Result<()> {
    let mut api = open_api(config_dir, file)?;
    let result = api.resize(block, deltas)?;
    save(api)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(
    config_dir: &Path,
    key: Option<String>,
    value: Option<String>,
    unset: bool,
) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), _) if unset => ConfigAction::Unset(key),
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, parse_value(&value)),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = api::config(config_dir, action)?;
    if show_all {
        print_result_settings(&result)?;
    }
    if let Some(value) = &result.value {
        print_value(value);
    }
    print_messages(&result.messages);
    Ok(())
}

fn print_result_settings(result: &CmdResult) -> Result<()> {
    match &result.settings {
        Some(settings) => print_settings(settings),
        None => Ok(()),
    }
}

//! Command handlers

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{FamilyTreeService, MrcaOutcome};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, RenderStyle, Settings};
use crate::domain::TreeArena;
use crate::infrastructure::source_for_path;
use crate::tree_traits::render_tree;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let local_dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let settings = Settings::load(Some(local_dir.as_path()))?;
    debug!("settings: {:?}", settings);
    let service = FamilyTreeService::new(settings.extension.clone());

    match &cli.command {
        Some(Commands::Show { file, style }) => {
            _show(&service, file, style.unwrap_or(settings.style))
        }
        Some(Commands::Mrca {
            file,
            first,
            second,
        }) => _mrca(&service, file, first, second),
        Some(Commands::Ancestors { file, name }) => _ancestors(&service, file, name),
        Some(Commands::Run { file }) => _run(&service, &settings, file.as_deref()),
        Some(Commands::Files { dir }) => _files(&service, &settings, dir.as_deref()),
        Some(Commands::Config { command }) => _config(&settings, command, &local_dir),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see --help".to_string(),
        )),
    }
}

fn load(service: &FamilyTreeService, file: &Path) -> CliResult<TreeArena> {
    let source = source_for_path(file);
    Ok(service.load(&*source)?)
}

#[instrument(skip(service))]
fn _show(service: &FamilyTreeService, file: &Path, style: RenderStyle) -> CliResult<()> {
    let tree = load(service, file)?;
    output::info(&render_tree(&tree, style));
    Ok(())
}

fn print_outcome(outcome: &MrcaOutcome) {
    if outcome.ancestor.is_some() {
        output::success(outcome);
    } else {
        output::warning(outcome);
    }
}

#[instrument(skip(service))]
fn _mrca(service: &FamilyTreeService, file: &Path, first: &str, second: &str) -> CliResult<()> {
    let tree = load(service, file)?;
    let outcome = service.mrca(&tree, first, second)?;
    print_outcome(&outcome);
    Ok(())
}

#[instrument(skip(service))]
fn _ancestors(service: &FamilyTreeService, file: &Path, name: &str) -> CliResult<()> {
    let tree = load(service, file)?;
    let ancestors = service.ancestors(&tree, name)?;
    output::header(&format!("Ancestors of {}:", name));
    if ancestors.is_empty() {
        output::detail(&"(none, root of the tree)");
    }
    for ancestor in &ancestors {
        output::detail(ancestor);
    }
    Ok(())
}

#[instrument(skip(service, settings))]
fn _run(service: &FamilyTreeService, settings: &Settings, file: Option<&Path>) -> CliResult<()> {
    let file = match file {
        Some(f) => f.to_path_buf(),
        None => service.default_tree_file(&settings.resolve_data_dir())?,
    };
    debug!("tree file: {}", file.display());
    let tree = load(service, &file)?;

    output::info(&format!(
        "Tree:\n{}\n**************\n",
        render_tree(&tree, settings.style)
    ));
    let outcome = service.mrca(&tree, &settings.query.first, &settings.query.second)?;
    print_outcome(&outcome);
    Ok(())
}

#[instrument(skip(service, settings))]
fn _files(service: &FamilyTreeService, settings: &Settings, dir: Option<&Path>) -> CliResult<()> {
    let dir = dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| settings.resolve_data_dir());
    let files = service.find_tree_files(&dir)?;
    if files.is_empty() {
        output::warning(&format!(
            "no *.{} files in {}",
            settings.extension,
            dir.display()
        ));
    }
    for f in files {
        output::info(&f.display());
    }
    Ok(())
}

fn _config(settings: &Settings, command: &ConfigCommands, local_dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(p) => output::detail(&format!("global: {}", p.display())),
                None => output::detail(&"global: (no config directory)"),
            }
            output::detail(&format!(
                "local:  {}",
                local_config_path(local_dir).display()
            ));
        }
    }
    Ok(())
}

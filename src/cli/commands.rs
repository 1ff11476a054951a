//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{Hierarchy, TreeConvert};
use crate::infrastructure::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    if !settings.color {
        colored::control::set_override(false);
    }
    let container = ServiceContainer::new(settings);

    match &cli.command {
        Some(Commands::Tree { file }) => cmd_tree(&container, file),
        Some(Commands::Roots { file }) => cmd_roots(&container, file),
        Some(Commands::Children { file, element }) => {
            cmd_children(&container, file, element.as_deref())
        }
        Some(Commands::Parent { file, element }) => cmd_parent(&container, file, element),
        Some(Commands::Ancestors { file, element }) => cmd_ancestors(&container, file, element),
        Some(Commands::Leaves { file }) => cmd_leaves(&container, file),
        Some(Commands::Branches { file }) => cmd_branches(&container, file),
        Some(Commands::Check { file }) => cmd_check(&container, file),
        Some(Commands::Config { command }) => cmd_config(&container, command),
        Some(Commands::Completion { shell }) => {
            cmd_completion(*shell);
            Ok(())
        }
        None => Ok(()),
    }
}

fn load(container: &ServiceContainer, file: &Path) -> CliResult<Hierarchy<String>> {
    let hierarchy = container.hierarchy_service.load(file)?;
    debug!("loaded {} elements from {}", hierarchy.len(), file.display());
    Ok(hierarchy)
}

fn require_element(element: &str) -> CliResult<String> {
    if element.trim().is_empty() {
        return Err(CliError::InvalidArgs("element must not be empty".into()));
    }
    Ok(element.to_string())
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let hierarchy = load(container, file)?;
    output::info(&hierarchy.to_tree(&container.settings.root_label));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_roots(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let hierarchy = load(container, file)?;
    for root in hierarchy.first_level() {
        output::info(root);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_children(container: &ServiceContainer, file: &Path, element: Option<&str>) -> CliResult<()> {
    let hierarchy = load(container, file)?;
    let element = element.map(require_element).transpose()?;
    for child in hierarchy.children(element.as_ref())? {
        output::info(child);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_parent(container: &ServiceContainer, file: &Path, element: &str) -> CliResult<()> {
    let hierarchy = load(container, file)?;
    let element = require_element(element)?;
    if let Some(parent) = hierarchy.parent(&element)? {
        output::info(parent);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_ancestors(container: &ServiceContainer, file: &Path, element: &str) -> CliResult<()> {
    let hierarchy = load(container, file)?;
    let element = require_element(element)?;
    let ancestors = hierarchy.ancestors(&element)?;
    let chain = std::iter::once(&element)
        .chain(ancestors)
        .join(&container.settings.branch_separator);
    output::info(&chain);
    Ok(())
}

#[instrument(skip(container))]
fn cmd_leaves(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let hierarchy = load(container, file)?;
    for leaf in hierarchy.leaves() {
        output::info(leaf);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_branches(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let hierarchy = load(container, file)?;
    for branch in hierarchy.branches() {
        let line = branch
            .iter()
            .rev()
            .join(&container.settings.branch_separator);
        output::info(&line);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_check(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let hierarchy = load(container, file)?;
    let summary = container.hierarchy_service.summarize(&hierarchy);
    output::success(&format!("{} is a valid hierarchy", file.display()));
    output::detail(&format!("elements:    {}", summary.elements));
    output::detail(&format!("first level: {}", summary.first_level));
    output::detail(&format!("depth:       {}", summary.depth));
    output::detail(&format!("leaves:      {}", summary.leaves));
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::header("Effective configuration");
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}

fn cmd_completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    eprintln!("Generating completion file for {shell:?}...");
    generate(shell, &mut cmd, name, &mut io::stdout());
}

//! Command dispatch: translates parsed arguments into service calls
//!
//! This is the input adapter boundary. Confirmation prompts for the
//! destructive commands live here, never in the tree store itself, and
//! input-side niceties (like warning on an empty label) stay here too.

use std::io::{self, BufRead};
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::MindMapService;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::view::TermRenderer;
use crate::config::Settings;
use crate::domain::NodeId;
use crate::infrastructure::traits::{JsonFileStore, Renderer};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };

    match command {
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            return Ok(());
        }
        Commands::Config { command } => return execute_config(command),
        _ => {}
    }

    let settings = Settings::load()?;
    let store = Arc::new(JsonFileStore::new(settings.snapshot_file()));
    let renderer: Arc<dyn Renderer> = Arc::new(TermRenderer);
    let mut service = MindMapService::new(store.clone(), renderer)?;

    match command {
        Commands::Add { parent } => _add(&mut service, *parent),
        Commands::Delete { id, yes } => _delete(&mut service, *id, *yes),
        Commands::Edit { id, text } => _edit(&mut service, *id, text),
        Commands::Collapse { id } => _collapse(&mut service, *id),
        Commands::Move { id, x, y } => _move(&mut service, *id, *x, *y),
        Commands::Show => {
            service.render();
            Ok(())
        }
        Commands::Info => _info(&service, &store),
        Commands::Reset { yes } => _reset(&mut service, *yes),
        Commands::Completion { .. } | Commands::Config { .. } => Ok(()),
    }
}

#[instrument(skip(service))]
fn _add(service: &mut MindMapService, parent: NodeId) -> CliResult<()> {
    let id = service.add_node(parent)?;
    output::success(&format!("added node {} under {}", id, parent));
    Ok(())
}

#[instrument(skip(service))]
fn _delete(service: &mut MindMapService, id: NodeId, yes: bool) -> CliResult<()> {
    let subtree = service
        .tree()
        .get(id)
        .map(|n| n.children.len())
        .unwrap_or(0);
    if !yes {
        let question = if subtree > 0 {
            format!("Delete node {} and its subtree?", id)
        } else {
            format!("Delete node {}?", id)
        };
        if !confirm(&question)? {
            output::info("aborted");
            return Ok(());
        }
    }
    let removed = service.delete_node(id)?;
    output::success(&format!("deleted {} node(s)", removed));
    Ok(())
}

#[instrument(skip(service, text))]
fn _edit(service: &mut MindMapService, id: NodeId, text: &str) -> CliResult<()> {
    if text.is_empty() {
        output::warning("setting an empty label");
    }
    service.edit_node(id, text)?;
    output::success(&format!("relabeled node {}", id));
    Ok(())
}

#[instrument(skip(service))]
fn _collapse(service: &mut MindMapService, id: NodeId) -> CliResult<()> {
    let collapsed = service.toggle_collapse(id)?;
    let state = if collapsed { "collapsed" } else { "expanded" };
    output::success(&format!("node {} {}", id, state));
    Ok(())
}

#[instrument(skip(service))]
fn _move(service: &mut MindMapService, id: NodeId, x: f64, y: f64) -> CliResult<()> {
    service.move_node(id, x, y)?;
    output::success(&format!("moved node {} to ({}, {})", id, x, y));
    Ok(())
}

fn _info(service: &MindMapService, store: &JsonFileStore) -> CliResult<()> {
    let tree = service.tree();
    let visible = tree.visible();
    output::header("mind map");
    output::detail(&format!("nodes:    {}", tree.len()));
    output::detail(&format!("visible:  {}", visible.nodes.len()));
    output::detail(&format!("depth:    {}", tree.depth()));
    output::detail(&format!("snapshot: {}", store.path().display()));
    Ok(())
}

#[instrument(skip(service))]
fn _reset(service: &mut MindMapService, yes: bool) -> CliResult<()> {
    if !yes && !confirm("Discard the whole map and start over?")? {
        output::info("aborted");
        return Ok(());
    }
    service.reset()?;
    output::success("map reset");
    Ok(())
}

fn execute_config(command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load()?;
            output::info(&settings.to_template()?);
            Ok(())
        }
        ConfigCommands::Init => {
            let Some(path) = Settings::config_file() else {
                return Err(CliError::InvalidArgs(
                    "cannot determine config directory".into(),
                ));
            };
            if path.exists() {
                return Err(CliError::InvalidArgs(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| CliError::io("create config directory", e))?;
            }
            let template = Settings::default().to_template()?;
            std::fs::write(&path, template).map_err(|e| CliError::io("write config", e))?;
            output::success(&format!("created {}", path.display()));
            Ok(())
        }
        ConfigCommands::Path => {
            let settings = Settings::load()?;
            if let Some(path) = Settings::config_file() {
                output::detail(&format!("config:   {}", path.display()));
            }
            output::detail(&format!("snapshot: {}", settings.snapshot_file().display()));
            Ok(())
        }
    }
}

/// Ask a yes/no question on the terminal. Anything but an explicit yes
/// counts as no.
fn confirm(question: &str) -> CliResult<bool> {
    output::prompt(&format!("{} [y/N]", question));
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| CliError::io("read confirmation", e))?;
    let answer = matches!(line.trim(), "y" | "Y" | "yes");
    debug!("confirmation answer: {}", answer);
    Ok(answer)
}

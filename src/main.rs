mod config;
mod files;
mod script;

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use scene::{DocumentError, DrawableObject, SceneConfig, SceneError, SceneStore, Tool};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{ConfigError, SceneArgs};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("cannot read {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("cannot write {}: {source}", .path.display())]
    Write { path: PathBuf, source: std::io::Error },
    #[error("{} already exists; pass --force to overwrite", .0.display())]
    AlreadyExists(PathBuf),
    #[error("{}: {source}", .path.display())]
    Document { path: PathBuf, source: DocumentError },
    #[error("{}: {source}", .path.display())]
    Scene { path: PathBuf, source: SceneError },
    #[error("script line {line}: {source}")]
    ScriptParse { line: usize, source: serde_json::Error },
    #[error("script line {line} ({op}): {source}")]
    ScriptApply { line: usize, op: &'static str, source: SceneError },
}

#[derive(Parser, Debug)]
#[command(name = "vecdraw", about = "Create, inspect and script-edit vector drawings")]
struct Cli {
    #[command(flatten)]
    scene: SceneArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write an empty drawing.
    New {
        path: PathBuf,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Print a summary of a drawing.
    Info {
        path: PathBuf,
        /// Only count objects drawn with this tool (rectangle, circle, line, pen, text).
        #[arg(long)]
        tool: Option<Tool>,
    },
    /// Replay a JSON-lines command script against a drawing and save it.
    Edit {
        path: PathBuf,
        /// Script file, one command per line.
        #[arg(long)]
        script: PathBuf,
        /// Where to save the result; defaults to overwriting PATH.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.scene.to_config()?;

    match cli.command {
        Command::New { path, force } => run_new(path, force, config),
        Command::Info { path, tool } => run_info(path, tool, config),
        Command::Edit { path, script, out } => run_edit(path, script, out, config),
    }
}

fn run_new(path: PathBuf, force: bool, config: SceneConfig) -> Result<(), CliError> {
    let path = files::with_default_extension(&path);
    if path.exists() && !force {
        return Err(CliError::AlreadyExists(path));
    }
    files::save_store(&path, &SceneStore::new(config))?;
    println!("created {}", path.display());
    Ok(())
}

fn run_info(path: PathBuf, tool: Option<Tool>, config: SceneConfig) -> Result<(), CliError> {
    let path = files::with_default_extension(&path);
    let doc = files::read_document(&path)?;
    let version = doc.version.clone();
    let store =
        SceneStore::with_objects(doc.objects, config).map_err(|source| CliError::Scene { path: path.clone(), source })?;

    println!("{}", path.display());
    println!("  version: {version}");
    println!("  objects: {}", store.objects().len());
    if let Some(tool) = tool {
        println!("  tool: {tool}");
    }
    for (kind, count) in kind_counts(store.objects(), tool) {
        println!("    {kind}: {count}");
    }
    Ok(())
}

fn run_edit(path: PathBuf, script: PathBuf, out: Option<PathBuf>, config: SceneConfig) -> Result<(), CliError> {
    let path = files::with_default_extension(&path);
    let script_text = fs::read_to_string(&script).map_err(|source| CliError::Read { path: script.clone(), source })?;
    let lines = script::parse_script(&script_text)?;

    let mut store = files::open_store(&path, config)?;
    let summary = script::replay(&mut store, lines)?;
    info!(applied = summary.applied, changed = summary.changed, revision = store.revision(), "script replayed");

    let target = out.map_or(path, |out| files::with_default_extension(&out));
    files::save_store(&target, &store)?;
    println!(
        "applied {} commands ({} changed the drawing); {} objects saved to {}",
        summary.applied,
        summary.changed,
        store.objects().len(),
        target.display()
    );
    Ok(())
}

/// Objects per kind, in kind-name order. With a tool, only the kind that tool
/// draws is counted; tools that draw nothing count nothing.
fn kind_counts(objects: &[DrawableObject], tool: Option<Tool>) -> BTreeMap<&'static str, usize> {
    let mut by_kind = BTreeMap::new();
    for object in objects {
        if tool.is_some_and(|tool| tool.shape_kind() != Some(object.kind())) {
            continue;
        }
        *by_kind.entry(object.kind().as_str()).or_default() += 1;
    }
    by_kind
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;

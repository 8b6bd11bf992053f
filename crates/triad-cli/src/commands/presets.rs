//! Preset listing, inspection and saving.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Subcommand};
use triad_chain::ParamId;
use triad_config::{Preset, factory_presets, resolve_preset};

use super::common::{ChainArgs, build_store};

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List the factory presets
    List,

    /// Show a preset as TOML
    Show {
        /// Preset name or path
        name: String,
    },

    /// Save a parameter set as a preset file
    Save {
        /// Output TOML file
        path: PathBuf,

        /// Name stored in the preset
        #[arg(short, long)]
        name: String,

        /// Description of the preset
        #[arg(short, long)]
        description: Option<String>,

        #[command(flatten)]
        chain: ChainArgs,

        /// Overwrite if the file already exists
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List => list(),
        PresetsCommand::Show { name } => show(&name),
        PresetsCommand::Save {
            path,
            name,
            description,
            chain,
            force,
        } => save(&path, name, description, &chain, force),
    }
}

fn list() -> anyhow::Result<()> {
    println!("Factory presets:");
    for preset in factory_presets() {
        let values: Vec<String> = ParamId::ALL
            .iter()
            .map(|&id| format!("{}={}", id, preset.parameters.get(id)))
            .collect();
        println!("  {:12} {}", preset.name, values.join(" "));
        if let Some(desc) = &preset.description {
            println!("  {:12} {}", "", desc);
        }
    }
    Ok(())
}

fn show(name: &str) -> anyhow::Result<()> {
    let preset = resolve_preset(name)?;
    print!("{}", preset.to_toml_string()?);
    Ok(())
}

fn save(
    path: &Path,
    name: String,
    description: Option<String>,
    chain: &ChainArgs,
    force: bool,
) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists. Use --force to overwrite.", path.display());
    }

    let store = build_store(chain)?;
    let mut preset = Preset::from_store(name, &store);
    if let Some(desc) = description {
        preset = preset.with_description(desc);
    }

    preset
        .save(path)
        .with_context(|| format!("Failed to save preset to {}", path.display()))?;
    println!("Saved preset '{}' to {}", preset.name, path.display());
    Ok(())
}

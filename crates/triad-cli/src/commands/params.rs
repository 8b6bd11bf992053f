//! Parameter listing command.

#![allow(clippy::print_literal)]

use clap::Args;
use triad_chain::ParamId;

#[derive(Args)]
pub struct ParamsArgs {
    /// Show only this parameter (by id, e.g., "roomSize")
    name: Option<String>,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let ids: Vec<ParamId> = match &args.name {
        Some(name) => vec![name.parse()?],
        None => ParamId::ALL.to_vec(),
    };

    println!(
        "{:12} {:12} {:>8} {:>8} {:>8}  {}",
        "ID", "NAME", "MIN", "MAX", "DEFAULT", "UNIT"
    );
    for id in ids {
        let desc = id.descriptor();
        let unit = match desc.unit.suffix().trim() {
            "" => "-",
            suffix => suffix,
        };
        println!(
            "{:12} {:12} {:>8.2} {:>8.2} {:>8.2}  {}",
            desc.string_id, desc.name, desc.min, desc.max, desc.default, unit
        );
    }

    Ok(())
}

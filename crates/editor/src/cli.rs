// src/cli.rs
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use forms::EntityKind;

#[derive(Parser, Debug)]
#[command(name = "editor", version, about = "Lost Engine configuration editor")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,

    /// config.yml to edit
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Texture root of the resource pack (assets/<namespace>/textures)
    #[arg(long, global = true)]
    pub textures: Option<PathBuf>,

    /// sounds.json used for the equip sound list
    #[arg(long, global = true)]
    pub sounds: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Create a new entry with the interactive wizard
    New {
        #[arg(value_enum)]
        kind: KindArg,
    },
    /// Print the entries of one or all sections
    List { section: Option<String> },
    /// Delete one entry
    Remove { section: String, key: String },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Item,
    Block,
    Material,
    Glyph,
}

impl From<KindArg> for EntityKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Item => EntityKind::Item,
            KindArg::Block => EntityKind::Block,
            KindArg::Material => EntityKind::Material,
            KindArg::Glyph => EntityKind::Glyph,
        }
    }
}

//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Inspect immutable hierarchies described in TOML files
#[derive(Parser, Debug)]
#[command(name = "hierarchy")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show hierarchy as tree
    Tree {
        /// Hierarchy file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// List first-level elements
    Roots {
        /// Hierarchy file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// List direct children (first level when no element is given)
    Children {
        /// Hierarchy file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Element
        element: Option<String>,
    },

    /// Show parent (nothing for first-level elements)
    Parent {
        /// Hierarchy file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Element
        element: String,
    },

    /// Show chain of parents up to the first level
    Ancestors {
        /// Hierarchy file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Element
        element: String,
    },

    /// List elements without children
    Leaves {
        /// Hierarchy file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Show all branches linearly, leaf first
    Branches {
        /// Hierarchy file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Validate a hierarchy file
    Check {
        /// Hierarchy file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
}

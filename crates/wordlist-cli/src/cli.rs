use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use wordlist_store::ListCategory;

#[derive(Parser)]
#[command(
    name = "wordlist",
    about = "Manage vocabulary settings, custom word lists and list selections",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// JSON file backing the store (overrides the config file)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Read or change settings
    Settings(SettingsArgs),
    /// Manage custom word lists
    List(ListArgs),
    /// Mark a list as active
    Select(SelectArgs),
    /// Mark a list as inactive
    Deselect(SelectArgs),
    /// Show active lists, dropping any that no longer exist
    Selected(SelectedArgs),
}

#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub action: Option<SettingsAction>,
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show every setting
    List,
    /// Show one setting
    Get { name: String },
    /// Store a setting value as given
    Set { name: String, value: String },
    /// Strictly validate all settings
    Check,
}

#[derive(Args)]
pub struct ListArgs {
    #[command(subcommand)]
    pub action: ListAction,
}

#[derive(Subcommand)]
pub enum ListAction {
    /// List custom list names
    Names,
    /// Show the words of a list
    Show {
        name: String,
        /// Only words that pass word validation
        #[arg(long)]
        valid: bool,
    },
    /// Create an empty list
    Create { name: String },
    /// Rename a list
    Rename { old: String, new: String },
    /// Delete a list
    Delete { name: String },
    /// Add words to a list
    Add {
        list: String,
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Replace the word at an index
    Edit {
        list: String,
        index: usize,
        value: String,
    },
    /// Remove the word at an index
    Remove { list: String, index: usize },
    /// Export a list as JSON
    Export {
        list: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import a list from a JSON file (`-` reads stdin)
    Import { file: PathBuf },
}

#[derive(Args)]
pub struct SelectArgs {
    /// `builtin` or `custom`
    pub category: ListCategory,
    pub name: String,
}

#[derive(Args)]
pub struct SelectedArgs {
    /// `builtin` or `custom`
    pub category: ListCategory,
}

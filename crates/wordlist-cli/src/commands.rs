use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use serde_json::json;
use wordlist_kv::JsonFileKvStore;
use wordlist_store::{ListCategory, ListStore, Setting, StaticCatalog, WordlistStore};

use crate::cli::*;
use crate::config::CliConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    let store_path = cli.store.clone().unwrap_or_else(|| config.store_path.clone());
    let store = open_store(&store_path, &config)?;
    let json = matches!(cli.format, OutputFormat::Json);

    match cli.command {
        Command::Settings(args) => cmd_settings(&store, args, json),
        Command::List(args) => cmd_list(&store, args, json),
        Command::Select(args) => cmd_select(&store, args, true),
        Command::Deselect(args) => cmd_select(&store, args, false),
        Command::Selected(args) => cmd_selected(&store, args, json),
    }
}

fn open_store(path: &Path, config: &CliConfig) -> anyhow::Result<WordlistStore> {
    let kv = JsonFileKvStore::open(path)
        .with_context(|| format!("opening store {}", path.display()))?;
    let charset = config.word_charset;
    Ok(WordlistStore::new(
        Arc::new(kv),
        Arc::new(move |w: &str| charset.accepts(w)),
        Arc::new(StaticCatalog::new(config.builtin_lists.iter().cloned())),
    ))
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_settings(store: &WordlistStore, args: SettingsArgs, json: bool) -> anyhow::Result<()> {
    let settings = store.settings();
    match args.action.unwrap_or(SettingsAction::List) {
        SettingsAction::List => {
            if json {
                return print_json(&settings.snapshot()?);
            }
            for setting in Setting::ALL {
                match settings.get(setting)? {
                    Some(value) => println!("{} = {}", setting.name().bold(), value),
                    None => println!("{} = {}", setting.name().bold(), "(unparsable)".red()),
                }
            }
        }
        SettingsAction::Get { name } => {
            let value = settings.get_setting(&name)?;
            if json {
                return print_json(&json!({ "name": name, "value": value }));
            }
            match value {
                Some(value) => println!("{value}"),
                None => println!("{}", "(unparsable)".red()),
            }
        }
        SettingsAction::Set { name, value } => {
            settings.set_setting(&name, value.as_str())?;
            println!("{} Set {} = {}", "✓".green(), name.bold(), value);
        }
        SettingsAction::Check => {
            let validated = settings.snapshot()?.validate()?;
            if json {
                return print_json(&validated);
            }
            println!("{} All settings valid", "✓".green().bold());
        }
    }
    Ok(())
}

fn cmd_list(store: &WordlistStore, args: ListArgs, json: bool) -> anyhow::Result<()> {
    let lists = store.lists();
    match args.action {
        ListAction::Names => {
            let names = lists.get_custom_list_names()?;
            if json {
                return print_json(&names);
            }
            if names.is_empty() {
                println!("No custom lists.");
            }
            for name in names {
                println!("{}", name.yellow());
            }
        }
        ListAction::Show { name, valid } => {
            let words = if valid {
                lists.get_custom_list_valid_words(&name)?
            } else {
                lists.get_custom_list(&name)?
            };
            if json {
                return print_json(&json!({ "name": name, "words": words }));
            }
            println!("{} ({} words)", name.yellow().bold(), words.len());
            for (i, word) in words.iter().enumerate() {
                println!("  {} {}", format!("{i:>3}").dimmed(), word);
            }
        }
        ListAction::Create { name } => {
            lists.create_custom_list(&name)?;
            println!("{} Created list {}", "✓".green(), name.yellow());
        }
        ListAction::Rename { old, new } => {
            lists.rename_custom_list(&old, &new)?;
            println!("{} Renamed {} → {}", "✓".green(), old.yellow(), new.yellow());
        }
        ListAction::Delete { name } => {
            lists.delete_custom_list(&name)?;
            println!("Deleted list {}", name.yellow());
        }
        ListAction::Add { list, words } => {
            for word in &words {
                lists.add_custom_word(&list, word)?;
            }
            println!("{} {} now has {} words", "✓".green(), list.yellow(), lists.get_custom_list(&list)?.len());
        }
        ListAction::Edit { list, index, value } => {
            lists.edit_custom_word(&list, index, &value)?;
            let stored = stored_word(lists, &list, index)?;
            println!("{} {}[{}] = {}", "✓".green(), list.yellow(), index, stored);
        }
        ListAction::Remove { list, index } => {
            lists.delete_custom_word(&list, index)?;
            println!("Removed word {} from {}", index, list.yellow());
        }
        ListAction::Export { list, output } => {
            let data = lists.export_list_to_json(&list)?;
            match output {
                Some(path) => {
                    fs::write(&path, data.as_bytes())
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("{} Exported {} to {}", "✓".green(), list.yellow(), path.display());
                }
                None => println!("{data}"),
            }
        }
        ListAction::Import { file } => {
            let data = if file.as_os_str() == "-" {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?
            };
            let name = lists.import_list_from_json(&data)?;
            println!("{} Imported list {}", "✓".green(), name.yellow());
        }
    }
    Ok(())
}

/// The word as persisted at `index`, after normalization.
fn stored_word(lists: &ListStore, list: &str, index: usize) -> anyhow::Result<String> {
    lists
        .get_custom_list(list)?
        .get(index)
        .cloned()
        .with_context(|| format!("{list} has no word at index {index}"))
}

fn cmd_select(store: &WordlistStore, args: SelectArgs, selected: bool) -> anyhow::Result<()> {
    store
        .selection()
        .set_list_selected(args.category, &args.name, selected)?;
    let verb = if selected { "Selected" } else { "Deselected" };
    println!("{} {} {} list {}", "✓".green(), verb, args.category, args.name.yellow());
    Ok(())
}

fn cmd_selected(store: &WordlistStore, args: SelectedArgs, json: bool) -> anyhow::Result<()> {
    let selection = store.selection();
    let names = match args.category {
        ListCategory::BuiltIn => selection.get_selected_built_in_list_names()?,
        ListCategory::Custom => selection.get_selected_custom_list_names()?,
    };
    if json {
        return print_json(&names);
    }
    if names.is_empty() {
        println!("No {} lists selected.", args.category);
    }
    for name in names {
        println!("* {}", name.green());
    }
    Ok(())
}

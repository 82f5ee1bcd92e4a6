//! Command dispatch: load the tree, run the query, print the result.

use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::FamilyTree;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::menu::run_menu;
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        Some(Commands::Config { command }) => cmd_config(cli, command),
        Some(Commands::Members) => cmd_members(&load_tree(cli)?),
        Some(Commands::Grandparents { name }) => cmd_grandparents(&load_tree(cli)?, name),
        Some(Commands::Parents { name }) => {
            let parents = load_tree(cli)?.parent_name_list(name)?;
            print_relatives(parents, name, "parents")
        }
        Some(Commands::Children { name }) => {
            let children = load_tree(cli)?.children_name_list(name)?;
            print_relatives(children, name, "children")
        }
        Some(Commands::Siblings { name, count }) => cmd_siblings(&load_tree(cli)?, name, *count),
        Some(Commands::WithChildren { count }) => {
            let names = load_tree(cli)?.members_with_child_count(*count)?;
            print_with_count(names, *count, "children")
        }
        Some(Commands::WithSiblings { count }) => {
            let names = load_tree(cli)?.members_with_sibling_count(*count)?;
            print_with_count(names, *count, "siblings")
        }
        Some(Commands::MostGrandchildren) => cmd_most_grandchildren(&load_tree(cli)?),
        Some(Commands::Tree { name }) => cmd_tree(&load_tree(cli)?, name.as_deref()),
        Some(Commands::Menu) | None => cmd_menu(&load_tree(cli)?),
    }
}

fn input_file(cli: &Cli, settings: &Settings) -> CliResult<PathBuf> {
    cli.file
        .clone()
        .or_else(|| settings.input_file.clone())
        .ok_or_else(|| {
            CliError::Usage(
                "no input file: pass --file <path> or set input_file in the config".to_string(),
            )
        })
}

#[instrument(level = "debug", skip(cli))]
fn load_tree(cli: &Cli) -> CliResult<FamilyTree> {
    let settings = Settings::load(cli.config.as_deref())?;
    let path = input_file(cli, &settings)?;
    debug!("input file: {}", path.display());

    let mut tree = FamilyTree::new(settings.load_options());
    tree.initialize(&path)?;
    Ok(tree)
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config.as_deref())?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => match cli.config.clone().or_else(global_config_path) {
            Some(path) => output::info(&path.display()),
            None => output::warning("cannot determine config directory"),
        },
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}

fn cmd_members(tree: &FamilyTree) -> CliResult<()> {
    let names = tree.family_members_name_list()?;
    output::header("The list of family members are:");
    for (i, name) in names.iter().enumerate() {
        output::numbered(i + 1, name);
    }
    Ok(())
}

fn cmd_grandparents(tree: &FamilyTree, name: &str) -> CliResult<()> {
    let grandparents = tree.grandparent_name_list(name)?;
    if grandparents.is_empty() {
        output::warning(&format!(
            "Family member {name} does not have any grandparents in the family tree"
        ));
        return Ok(());
    }
    output::header(&format!("The grandparent(s) for {name} is/are:"));
    for grandparent in &grandparents {
        output::info(grandparent);
    }
    Ok(())
}

fn cmd_siblings(tree: &FamilyTree, name: &str, count_only: bool) -> CliResult<()> {
    if count_only {
        output::info(&tree.count_siblings(name)?);
        return Ok(());
    }
    print_relatives(tree.sibling_name_list(name)?, name, "siblings")
}

fn print_relatives(names: Vec<String>, name: &str, relation: &str) -> CliResult<()> {
    if names.is_empty() {
        output::warning(&format!("{name} has no {relation} in the family tree"));
    } else {
        output::info(&names.iter().join("\n"));
    }
    Ok(())
}

fn print_with_count(names: Vec<String>, count: usize, noun: &str) -> CliResult<()> {
    if names.is_empty() {
        output::warning(&format!(
            "There are no family members that have {count} {noun}"
        ));
        return Ok(());
    }
    output::header(&format!("The family member(s) with {count} {noun} is/are:"));
    for name in &names {
        output::info(name);
    }
    Ok(())
}

fn cmd_most_grandchildren(tree: &FamilyTree) -> CliResult<()> {
    let names = tree.members_with_most_grandchildren()?;
    if names.is_empty() {
        output::warning("No family member has any grandchildren");
        return Ok(());
    }
    output::header("The family member(s) with the most grandchildren is/are:");
    for name in &names {
        output::info(name);
    }
    Ok(())
}

fn cmd_tree(tree: &FamilyTree, name: Option<&str>) -> CliResult<()> {
    match name {
        Some(root) => output::info(&tree.descendant_tree(root)?),
        None => {
            for root in tree.forest() {
                output::info(&root);
            }
        }
    }
    Ok(())
}

fn cmd_menu(tree: &FamilyTree) -> CliResult<()> {
    if let Some(source) = tree.source() {
        output::header(&format!("Family tree loaded from {}", source.display()));
    }
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    run_menu(tree, &mut input, &mut out)
        .map_err(|e| CliError::io("interactive menu", e))
}

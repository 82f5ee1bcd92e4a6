//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Family tree relationship queries: siblings, children, grandparents and more
#[derive(Parser, Debug)]
#[command(name = "famtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Family tree input file (default: input_file from config)
    #[arg(short, long, global = true, env = "FAMTREE_FILE", value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Config file (default: ~/.config/famtree/famtree.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all family members
    Members,

    /// List the grandparents of a member
    Grandparents {
        /// Family member name (case-sensitive)
        name: String,
    },

    /// List the parents of a member
    Parents {
        /// Family member name (case-sensitive)
        name: String,
    },

    /// List the children of a member
    Children {
        /// Family member name (case-sensitive)
        name: String,
    },

    /// List the siblings of a member
    Siblings {
        /// Family member name (case-sensitive)
        name: String,
        /// Print only the number of siblings
        #[arg(short, long)]
        count: bool,
    },

    /// Members with exactly N children
    WithChildren {
        /// Number of children
        count: usize,
    },

    /// Members with exactly N siblings
    WithSiblings {
        /// Number of siblings
        count: usize,
    },

    /// Member(s) with the most grandchildren
    MostGrandchildren,

    /// Show descendants as a tree
    Tree {
        /// Root member (default: every member without parents)
        name: Option<String>,
    },

    /// Interactive menu (default when no command is given)
    Menu,

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

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Show config file location
    Path,
    /// Print a commented config template
    Template,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_repeated_debug_flag_when_parsing_then_counted() {
        let cli = Cli::try_parse_from(["famtree", "-ddd", "members"]).unwrap();
        assert_eq!(cli.debug, 3);
        assert!(matches!(cli.command, Some(Commands::Members)));
    }

    #[test]
    fn given_with_children_when_parsing_then_count_parsed() {
        let cli = Cli::try_parse_from(["famtree", "-f", "tree.txt", "with-children", "3"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("tree.txt")));
        assert!(matches!(cli.command, Some(Commands::WithChildren { count: 3 })));
    }

    #[test]
    fn given_negative_count_when_parsing_then_error() {
        assert!(Cli::try_parse_from(["famtree", "with-siblings", "-1"]).is_err());
    }
}

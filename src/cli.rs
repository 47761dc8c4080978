// File: ./src/cli.rs
//! Command-line parsing and help text.

use crate::model::CategoryFilter;
use anyhow::{Result, bail};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive TUI.
    Browse,
    List {
        search: String,
        category: CategoryFilter,
        json: bool,
    },
    Tally {
        json: bool,
    },
    Help,
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub root: Option<PathBuf>,
    pub data: Option<PathBuf>,
    pub command: Command,
}

/// Parses everything after the binary name.
pub fn parse_args<I, S>(args: I) -> Result<CliArgs>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();

    let mut root = None;
    let mut data = None;
    let mut subcommand: Option<String> = None;
    let mut search = String::new();
    let mut category = CategoryFilter::All;
    let mut json = false;
    let mut help = false;
    let mut version = false;

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "--help" | "-h" | "help" => help = true,
            "--version" | "-V" => version = true,
            "--root" | "-r" => root = Some(PathBuf::from(value_for(&args, i, arg)?)),
            "--data" | "-d" => data = Some(PathBuf::from(value_for(&args, i, arg)?)),
            "--search" | "-s" => search = value_for(&args, i, arg)?.to_string(),
            "--category" | "-c" => category = value_for(&args, i, arg)?.parse()?,
            "--json" => json = true,
            "list" | "tally" if subcommand.is_none() => subcommand = Some(arg.to_string()),
            _ => bail!("Unexpected argument '{}'. Try --help.", arg),
        }
        // Flags with a value consumed the next slot too.
        if matches!(
            arg,
            "--root" | "-r" | "--data" | "-d" | "--search" | "-s" | "--category" | "-c"
        ) {
            i += 1;
        }
        i += 1;
    }

    let command = if help {
        Command::Help
    } else if version {
        Command::Version
    } else {
        match subcommand.as_deref() {
            Some("list") => Command::List {
                search,
                category,
                json,
            },
            Some("tally") => {
                if !search.is_empty() || category != CategoryFilter::All {
                    bail!("'tally' always covers the whole catalog; --search/--category do not apply");
                }
                Command::Tally { json }
            }
            _ => {
                if !search.is_empty() || category != CategoryFilter::All || json {
                    bail!("--search, --category and --json need the 'list' command");
                }
                Command::Browse
            }
        }
    };

    Ok(CliArgs {
        root,
        data,
        command,
    })
}

fn value_for<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    match args.get(i + 1) {
        Some(v) => Ok(v.as_str()),
        None => bail!("Missing value for {}", flag),
    }
}

pub fn print_help(binary_name: &str) {
    println!(
        "Malasong v{} - 2026 marathon calendar browser",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS]                         Start interactive TUI", binary_name);
    println!("    {} list [-s <text>] [-c <tier>] [--json]", binary_name);
    println!("    {} tally [--json]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and logs.");
    println!("    -d, --data <file>     Load events from a JSON file instead of the built-in catalog.");
    println!("    -s, --search <text>   Match event names (any case) or province names (exact).");
    println!("    -c, --category <t>    All, A, B or C.");
    println!("        --json            Print JSON instead of text.");
    println!("    -V, --version         Print version.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("LIST COMMAND:");
    println!("    {} list                        All events grouped by date", binary_name);
    println!("    {} list -s 北京                 Events in or named after Beijing", binary_name);
    println!("    {} list -c A --json            A-tier events as JSON", binary_name);
    println!();
    println!("TUI KEYS:");
    println!("    /          Search (live), Enter to keep, Esc to clear");
    println!("    c / C      Next / previous category     0-3  All, A, B, C");
    println!("    r          Reset filters                m    Toggle heatmap");
    println!("    j/k PgUp/PgDn  Move                     Tab  Focus heatmap");
    println!("    q          Quit");
    println!();
    println!("ENVIRONMENT:");
    println!("    MALASONG_LOG   Log level override (error, warn, info, debug, trace)");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    #[test]
    fn test_no_args_browses() {
        let args = parse_args(Vec::<String>::new()).unwrap();
        assert_eq!(args.command, Command::Browse);
        assert_eq!(args.root, None);
    }

    #[test]
    fn test_list_with_filters() {
        let args = parse_args(["list", "-s", "beijing", "--category", "A", "--json"]).unwrap();
        assert_eq!(
            args.command,
            Command::List {
                search: "beijing".to_string(),
                category: CategoryFilter::Only(Category::A),
                json: true,
            }
        );
    }

    #[test]
    fn test_global_flags_anywhere() {
        let args = parse_args(["-r", "/tmp/x", "tally", "--data", "ev.json"]).unwrap();
        assert_eq!(args.root, Some(PathBuf::from("/tmp/x")));
        assert_eq!(args.data, Some(PathBuf::from("ev.json")));
        assert_eq!(args.command, Command::Tally { json: false });
    }

    #[test]
    fn test_usage_errors() {
        assert!(parse_args(["list", "--search"]).is_err());
        assert!(parse_args(["list", "-c", "D"]).is_err());
        assert!(parse_args(["--bogus"]).is_err());
        assert!(parse_args(["-s", "x"]).is_err());
        assert!(parse_args(["tally", "-c", "A"]).is_err());
        assert!(parse_args(["list", "list"]).is_err());
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(parse_args(["list", "-h"]).unwrap().command, Command::Help);
    }

    #[test]
    fn test_search_value_may_look_like_subcommand() {
        let args = parse_args(["list", "-s", "tally"]).unwrap();
        assert!(matches!(args.command, Command::List { ref search, .. } if search == "tally"));
    }
}

use anyhow::Result;
use malasong::cli::{self, CliArgs, Command};
use malasong::config::Config;
use malasong::context::StandardContext;
use malasong::model::display::{render_groups, render_tally};
use malasong::{dataset, logging};
use std::env;
use std::process;

fn main() -> Result<()> {
    let args = match cli::parse_args(env::args().skip(1)) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    match args.command {
        Command::Help => {
            cli::print_help("malasong");
            return Ok(());
        }
        Command::Version => {
            println!("malasong {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    let ctx = StandardContext::new(args.root.clone());
    let config = match Config::load_or_default(&ctx) {
        Ok(c) => c,
        Err(e) => {
            // A malformed config is reported, not silently replaced by defaults.
            eprintln!("Error loading configuration:\n{}", e);
            process::exit(1);
        }
    };

    run(args, &ctx, &config)
}

fn run(args: CliArgs, ctx: &StandardContext, config: &Config) -> Result<()> {
    let data_path = args.data.or_else(|| config.data_file.clone());

    match args.command {
        Command::Browse => {
            logging::init_file(ctx, config.log_level_filter())?;
            let store = dataset::load(data_path.as_deref())?;
            malasong::tui::run(&store, config)
        }
        Command::List {
            search,
            category,
            json,
        } => {
            logging::init_stderr(config.log_level_filter());
            let store = dataset::load(data_path.as_deref())?;
            let groups = malasong::pipeline::compute_groups(store.events(), &search, category);
            if json {
                println!("{}", serde_json::to_string_pretty(&groups)?);
            } else {
                print!("{}", render_groups(&groups));
            }
            Ok(())
        }
        Command::Tally { json } => {
            logging::init_stderr(config.log_level_filter());
            let store = dataset::load(data_path.as_deref())?;
            let counts = store.province_counts();
            if json {
                let rows: Vec<_> = counts
                    .iter()
                    .map(|(province, count)| serde_json::json!({ "province": province, "count": count }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print!("{}", render_tally(&counts));
            }
            Ok(())
        }
        Command::Help | Command::Version => Ok(()),
    }
}

mod app;
mod config;
mod render;
mod scanner;
mod table;
mod terminal;
mod types;

use app::{App, OpenOutcome};
use chrono::Local;
use clap::Parser;
use colored::Colorize;
use config::ViewConfig;
use std::io;
use std::path::PathBuf;
use terminal::TerminalMessages;
use types::Column;

#[derive(Parser, Debug)]
#[command(version, about = "List dated build folders as a sortable table", long_about = None)]
struct Args {
    /// Folder whose subdirectories are listed (prompted for when omitted)
    root: Option<PathBuf>,

    /// Click a column header after loading ROOT (date, type, ver); repeatable
    #[arg(long, short = 's', value_name = "COLUMN", requires = "root")]
    sort: Vec<Column>,

    /// Column to sort by right after every scan
    #[arg(long, value_name = "COLUMN")]
    initial_sort: Option<Column>,

    /// Leave dot-prefixed subdirectories out of scans
    #[arg(long)]
    skip_hidden: bool,

    /// Keep reading commands after the first listing
    #[arg(long, short = 'i')]
    interactive: bool,

    /// Settings file (defaults to ./.findfolder_config when present)
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Plain output without colors
    #[arg(long)]
    no_color: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut config = match ViewConfig::load(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };
    if args.initial_sort.is_some() {
        config.initial_sort = args.initial_sort;
    }
    if args.skip_hidden {
        config.skip_hidden = true;
    }

    if args.no_color {
        colored::control::set_override(false);
    }
    let styled = !args.no_color;

    let mut app = App::new(config);
    let mut messages = TerminalMessages;

    let loaded = match &args.root {
        Some(root) => {
            let outcome = app.load(root.clone(), &mut messages);
            if let OpenOutcome::Loaded { .. } = outcome {
                for column in &args.sort {
                    app.click_header(*column);
                }
            }
            Some(outcome)
        }
        None => None,
    };

    // One-shot listing
    if let Some(outcome) = &loaded
        && !args.interactive
    {
        if *outcome == OpenOutcome::Failed {
            std::process::exit(1);
        }
        let banner = format!("=== FindFolder: {} ===", Local::now().format("%Y-%m-%d %H:%M"));
        println!("{}", banner.cyan());
        write_view(&app, styled);
        return;
    }

    if loaded.is_some() {
        write_view(&app, styled);
    }

    let stdin = io::stdin();
    let result = terminal::run_session(
        &mut app,
        &mut stdin.lock(),
        &mut io::stdout().lock(),
        &mut messages,
        styled,
    );
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn write_view(app: &App, styled: bool) {
    if let Err(e) = terminal::print_view(app, &mut io::stdout().lock(), styled) {
        eprintln!("Error writing output: {e}");
        std::process::exit(1);
    }
}

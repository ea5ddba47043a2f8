mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{edit, init, style, tree, EditArgs, InitArgs, StyleArgs, TreeArgs};

/// Tag builder CLI - edit page tag trees from the terminal
#[derive(Parser, Debug)]
#[command(name = "tagbuilder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new page with an empty root
    Init(InitArgs),

    /// Print the page's tag outline
    Tree(TreeArgs),

    /// Apply edit operations to a page and save it
    Edit(EditArgs),

    /// Show a tag's effective style per breakpoint
    Style(StyleArgs),
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Tree(args) => tree(args, &cwd),
        Command::Edit(args) => edit(args, &cwd),
        Command::Style(args) => style(args, &cwd),
    }
}

fn main() {
    // Initialize logging (RUST_LOG overrides)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

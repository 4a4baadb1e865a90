//! pgbox CLI
//!
//! Launch disposable PostgreSQL containers with extensions, and export
//! equivalent standalone Docker Compose projects.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use pgbox_catalog::Catalog;
use pgbox_runtime::DockerCli;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use commands::{UpOptions, UpOutcome};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} disposable PostgreSQL with extensions", "pgbox".green().bold());
            println!();
            println!("Run {} for available commands.", "pgbox --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    let catalog = Catalog::builtin();
    let runtime = DockerCli::new();

    match cmd {
        Commands::Up {
            server,
            port,
            user,
            password,
            database,
        } => {
            let opts = UpOptions {
                version: server.pg_version,
                extensions: server.extensions,
                port,
                user,
                password,
                database,
            };
            let outcome = commands::run_up(&runtime, &catalog, &opts)?;
            report_up(&outcome, opts.port);
            Ok(())
        }
        Commands::Stop { server, rm } => {
            let container =
                commands::run_stop(&runtime, &catalog, &server.pg_version, &server.extensions, rm)?;
            if rm {
                println!("{} removed {}", "pgbox".green().bold(), container.cyan());
            } else {
                println!("{} stopped {}", "pgbox".green().bold(), container.cyan());
            }
            Ok(())
        }
        Commands::Export { dir, server, port } => {
            let written =
                commands::run_export(&catalog, &dir, &server.pg_version, &server.extensions, port)?;
            println!("{} exported:", "pgbox".green().bold());
            for path in written {
                println!("  {}", path.display());
            }
            Ok(())
        }
        Commands::List { json } => commands::run_list(&catalog, json),
        Commands::Psql {
            server,
            user,
            database,
        } => commands::run_psql(
            &runtime,
            &catalog,
            &server.pg_version,
            &server.extensions,
            &user,
            &database,
        ),
        Commands::Logs { server, follow } => commands::run_logs(
            &runtime,
            &catalog,
            &server.pg_version,
            &server.extensions,
            follow,
        ),
    }
}

fn report_up(outcome: &UpOutcome, port: u16) {
    if let UpOutcome::Launched {
        image,
        built_image: true,
        ..
    } = outcome
    {
        println!("{} built image {}", "pgbox".green().bold(), image.cyan());
    }
    println!("{} {}", "pgbox".green().bold(), outcome.summary(port));
}

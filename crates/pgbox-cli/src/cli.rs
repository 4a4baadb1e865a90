//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand};

/// pgbox - disposable PostgreSQL servers with extensions
#[derive(Parser, Debug)]
#[command(name = "pgbox")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Server selection shared by commands that target a container.
///
/// The container name is derived from these, so the same flags always
/// address the same server.
#[derive(Args, Debug, Clone)]
pub struct ServerArgs {
    /// PostgreSQL major version
    #[arg(short = 'V', long, default_value = "17")]
    pub pg_version: String,

    /// Extensions to enable (repeatable)
    #[arg(short, long = "ext")]
    pub extensions: Vec<String>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Launch a PostgreSQL server container
    ///
    /// Builds a custom image when extensions are requested; reuses an
    /// existing container with the same configuration.
    ///
    /// Examples:
    ///   pgbox up                          # plain postgres:17
    ///   pgbox up -e pgvector -e pg_cron   # with extensions
    ///   pgbox up -V 16 -p 5433            # older version, other port
    Up {
        #[command(flatten)]
        server: ServerArgs,

        /// Host port mapped to 5432
        #[arg(short, long, default_value_t = 5432)]
        port: u16,

        /// Superuser name
        #[arg(long, default_value = "postgres")]
        user: String,

        /// Superuser password
        #[arg(long, default_value = "postgres")]
        password: String,

        /// Default database name
        #[arg(long, default_value = "postgres")]
        database: String,
    },

    /// Stop the server container for a configuration
    Stop {
        #[command(flatten)]
        server: ServerArgs,

        /// Also remove the container after stopping it
        #[arg(long)]
        rm: bool,
    },

    /// Export a standalone Docker Compose project
    ///
    /// Writes docker-compose.yml plus, as needed, Dockerfile,
    /// postgresql.conf.pgbox and init.sql into the target directory.
    /// Re-export replaces only the marked regions; edits outside them
    /// are preserved.
    Export {
        /// Target directory
        dir: std::path::PathBuf,

        #[command(flatten)]
        server: ServerArgs,

        /// Host port mapped to 5432
        #[arg(short, long, default_value_t = 5432)]
        port: u16,
    },

    /// List known extensions
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Open an interactive psql session in the running container
    Psql {
        #[command(flatten)]
        server: ServerArgs,

        /// User to connect as
        #[arg(long, default_value = "postgres")]
        user: String,

        /// Database to connect to
        #[arg(long, default_value = "postgres")]
        database: String,
    },

    /// Stream server logs
    Logs {
        #[command(flatten)]
        server: ServerArgs,

        /// Follow log output
        #[arg(short, long)]
        follow: bool,
    },
}

//! CLI argument definitions for the Bazaar binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Bazaar commerce backend server
#[derive(Parser, Debug)]
#[command(name = "bazaar")]
#[command(about = "Bazaar: document-store commerce backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the Bazaar server
    Serve(ServeArgs),
    /// Check health of a running Bazaar server
    Health(HealthArgs),
}

/// Arguments for the serve command
#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = 3000, env = "BAZAAR_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(long, default_value = "0.0.0.0", env = "BAZAAR_HOST")]
    pub host: String,

    /// Store snapshot file (created on shutdown, loaded on start)
    #[arg(short = 'D', long, default_value = "bazaar.json", env = "BAZAAR_DATA_FILE")]
    pub data_file: PathBuf,

    /// Server secret: derives the token signing and sealing keys.
    /// Rotating it invalidates all outstanding tokens.
    #[arg(long, env = "BAZAAR_SECRET")]
    pub secret: String,
}

/// Arguments for the health command
#[derive(clap::Args, Debug)]
pub struct HealthArgs {
    /// Port of the server to check
    #[arg(short, long, default_value_t = 3000, env = "BAZAAR_PORT")]
    pub port: u16,

    /// Host of the server to check
    #[arg(long, default_value = "127.0.0.1", env = "BAZAAR_HOST")]
    pub host: String,

    /// Timeout in seconds
    #[arg(short, long, default_value_t = 5)]
    pub timeout: u64,
}

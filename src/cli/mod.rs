use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod error;
pub mod handler;
pub mod output;

/// files - inspect and operate on files through the file service
#[derive(Parser, Debug)]
#[command(name = "files")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Override config directory path
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (TRACE level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show stat information for a path (symlinks are not followed)
    Stat {
        path: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a regular file (or directory) exists
    ///
    /// Prints true/false; exits with 2 when it does not exist.
    Exists {
        path: PathBuf,

        /// Check for a directory instead of a regular file
        #[arg(long)]
        dir: bool,
    },

    /// Print the contents of a file
    Read {
        path: PathBuf,

        /// Text encoding (utf8, ascii, latin1, utf16le, base64, hex)
        #[arg(long, short, default_value = "utf8")]
        encoding: String,

        /// Copy raw bytes to stdout without decoding
        #[arg(long, conflicts_with = "encoding")]
        raw: bool,
    },

    /// Write data to a file
    Write {
        path: PathBuf,

        /// Data to write; read from stdin when omitted
        data: Option<String>,

        /// Append instead of truncating
        #[arg(long)]
        append: bool,

        /// Fail if the file already exists
        #[arg(long)]
        create_new: bool,
    },

    /// Delete a file (directories are refused)
    Rm { path: PathBuf },

    /// Print an export of a module file as JSON
    Export {
        path: PathBuf,

        /// Export name
        #[arg(default_value = "default")]
        name: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the settings.toml path in use
    Path,
    /// Write the effective configuration to settings.toml
    Init,
}

//! CLI for cfgdl.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::process::ExitCode;

use commands::{run_completions, run_download, run_file_name, run_man, DownloadArgs};

/// Top-level CLI for cfgdl.
#[derive(Debug, Parser)]
#[command(name = "cfgdl")]
#[command(about = "Download generated project files for a configured cluster", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download the project archive of a cluster.
    Download {
        /// Cluster identifier.
        cluster_id: String,
        /// Cluster display name (used for the archive name and messages).
        #[arg(long)]
        name: String,
        /// Request demo configurations.
        #[arg(long)]
        demo: bool,
        /// Version the generated project targets.
        #[arg(long, value_name = "VERSION")]
        target_version: Option<String>,
        /// Directory to save into (default: config `download_dir` or current directory).
        #[arg(long, value_name = "DIR")]
        download_dir: Option<PathBuf>,
        /// Console backend URL (default: config `server_url`).
        #[arg(long, value_name = "URL")]
        server: Option<String>,
    },

    /// Print the archive file name for a cluster name.
    FileName {
        /// Cluster display name.
        name: String,
    },

    /// Generate shell completions on stdout.
    Completions {
        /// Target shell.
        shell: Shell,
    },

    /// Generate the man page (roff) on stdout.
    Man,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<ExitCode> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Download {
                cluster_id,
                name,
                demo,
                target_version,
                download_dir,
                server,
            } => {
                run_download(DownloadArgs {
                    cluster_id,
                    name,
                    demo,
                    target_version,
                    download_dir,
                    server,
                })
                .await
            }
            CliCommand::FileName { name } => {
                run_file_name(&name);
                Ok(ExitCode::SUCCESS)
            }
            CliCommand::Completions { shell } => {
                run_completions(shell);
                Ok(ExitCode::SUCCESS)
            }
            CliCommand::Man => {
                run_man()?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

#[cfg(test)]
mod tests;

//! CLI definitions for imgwarm
//!
//! This module contains the clap CLI structure definitions, separated from main.rs
//! so they can be accessed by xtask for documentation generation (man pages, markdown).

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use clap_complete::Shell as CompletionShell;
use std::path::PathBuf;

/// Build clap styles for help output.
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "imgwarm")]
#[command(about = "Warm image caches ahead of display with a bounded, throttled preloader")]
#[command(
    long_about = "imgwarm - Preload images ahead of display.

URLs are fetched (http://, https://, file:// or plain paths), decoded and
discarded. Bulk requests are drained by a single background worker in small
batches with a pause between batches, so a long list never floods the
network or the decoder.

QUICK START:
    imgwarm warm https://cdn.example.com/a.jpg https://cdn.example.com/b.jpg
    imgwarm warm --file thumbnails.txt
    imgwarm fetch ./photo.png
    imgwarm config show"
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Use this config file instead of ~/.config/imgwarm/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log preload activity to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Preload a list of URLs in throttled batches
    #[command(long_about = "Queue URLs for background preloading and wait until the queue drains.

URLs are taken from the command line and/or a file with one URL per line
(blank lines and lines starting with # are skipped). Individual failures do
not stop the run; the summary reports how many URLs ended up warm.

EXAMPLES:
    imgwarm warm a.jpg b.jpg c.jpg
    imgwarm warm --file urls.txt --batch-size 5
    imgwarm warm --file urls.txt --timeout 30")]
    Warm {
        /// URLs to preload
        #[arg(help = "URLs or paths to preload")]
        urls: Vec<String>,
        /// Read additional URLs from a file, one per line
        #[arg(long, short, value_name = "PATH", help = "Read URLs from a file (one per line)")]
        file: Option<PathBuf>,
        /// Override cache.batch_size
        #[arg(long, help = "URLs preloaded together per batch")]
        batch_size: Option<usize>,
        /// Override cache.batch_delay_ms
        #[arg(long, value_name = "MS", help = "Pause between batches in milliseconds")]
        delay_ms: Option<u64>,
        /// Give up waiting after this many seconds
        #[arg(long, value_name = "SECS", default_value_t = 300, help = "Maximum seconds to wait for the queue to drain")]
        timeout: u64,
    },

    /// Preload a single URL and report the result
    #[command(long_about = "Preload one URL on the current thread.

Exits with a non-zero status if the URL cannot be fetched or decoded.

EXAMPLES:
    imgwarm fetch https://cdn.example.com/a.jpg
    imgwarm fetch file:///tmp/photo.png")]
    Fetch {
        /// URL to preload
        #[arg(help = "URL or path to preload")]
        url: String,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    #[command(long_about = "Print a shell completion script to stdout.

EXAMPLES:
    imgwarm completions bash > ~/.local/share/bash-completion/completions/imgwarm
    imgwarm completions zsh > ~/.zfunc/_imgwarm")]
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
    /// Write a default config file if none exists
    Init,
}

//! Command-line argument definitions for the IoRing CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. A subcommand selects between laying out a ring and only
//! validating its intent graph; global flags control configuration file
//! selection and logging verbosity.

use clap::{Parser, Subcommand};

/// Command-line arguments for the IoRing layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

/// Operations the CLI can perform on an intent graph.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lay out the ring and write the placed instances as JSON
    Layout {
        /// Path to the input intent graph (JSON)
        #[arg(help = "Path to the input file")]
        input: String,

        /// Path to the output layout file; the extension is always `.json`
        #[arg(short, long, default_value = "out.json")]
        output: String,
    },

    /// Check the intent graph and print its statistics
    Validate {
        /// Path to the input intent graph (JSON)
        #[arg(help = "Path to the input file")]
        input: String,
    },
}

impl Command {
    /// Returns the input path shared by every subcommand.
    pub fn input(&self) -> &str {
        match self {
            Command::Layout { input, .. } | Command::Validate { input } => input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layout_command() {
        let args = Args::parse_from(["ioring", "layout", "ring.json", "-o", "placed.json"]);
        match &args.command {
            Command::Layout { input, output } => {
                assert_eq!(input, "ring.json");
                assert_eq!(output, "placed.json");
            }
            Command::Validate { .. } => panic!("Expected layout command"),
        }
        assert_eq!(args.log_level, "info");
        assert!(args.config.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::parse_from([
            "ioring",
            "validate",
            "ring.json",
            "--config",
            "cfg.toml",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.command.input(), "ring.json");
        assert_eq!(args.config.as_deref(), Some("cfg.toml"));
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn test_default_output() {
        let args = Args::parse_from(["ioring", "layout", "ring.json"]);
        assert!(matches!(
            args.command,
            Command::Layout { ref output, .. } if output == "out.json"
        ));
    }
}

//! Command-line argument definitions for the gouml CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the source directory, output
//! destination, configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the gouml class-diagram generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory containing the Go sources
    #[arg(help = "Path to the Go source directory")]
    pub input: String,

    /// Path to the output PlantUML file; printed to stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Walk subdirectories, overriding the configuration file
    #[arg(short, long)]
    pub recursive: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["gouml", "./src"]).expect("valid args");

        assert_eq!(args.input, "./src");
        assert!(args.output.is_none());
        assert!(args.config.is_none());
        assert!(!args.recursive);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "gouml",
            "pkg",
            "-o",
            "out.puml",
            "--config",
            "gouml.toml",
            "-r",
            "--log-level",
            "debug",
        ])
        .expect("valid args");

        assert_eq!(args.output.as_deref(), Some("out.puml"));
        assert_eq!(args.config.as_deref(), Some("gouml.toml"));
        assert!(args.recursive);
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn test_input_is_required() {
        assert!(Args::try_parse_from(["gouml"]).is_err());
    }
}

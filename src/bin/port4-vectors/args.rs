use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::LevelFilter;

/// Read measurement records as text and print their port 0x04 encoding.
#[derive(Debug, Parser)]
#[command(version)]
pub struct Args {
    /// Read records from this file instead of stdin.
    #[arg(long, env = "PORT4_INPUT")]
    pub input: Option<PathBuf>,

    /// Do not echo each record before its encoding.
    #[arg(long)]
    pub no_echo: bool,

    /// Do not print the input prompt.
    #[arg(long)]
    pub no_prompt: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["port4-vectors"]).unwrap();
        assert!(!args.no_echo);
        assert!(!args.no_prompt);
        assert_eq!(args.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn test_verbosity() {
        let args = Args::try_parse_from(["port4-vectors", "-vv"]).unwrap();
        assert_eq!(args.log_level(), LevelFilter::Debug);

        let args = Args::try_parse_from(["port4-vectors", "-q"]).unwrap();
        assert_eq!(args.log_level(), LevelFilter::Error);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["port4-vectors", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_input_file() {
        let args =
            Args::try_parse_from(["port4-vectors", "--input", "vectors.txt", "--no-echo"]).unwrap();
        assert_eq!(args.input, Some(PathBuf::from("vectors.txt")));
        assert!(args.no_echo);
    }
}

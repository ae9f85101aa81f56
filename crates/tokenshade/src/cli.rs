use clap::{Parser, Subcommand};

use crate::check::{CheckArgs, run_check};
use crate::cleanup::{CleanupArgs, run_cleanup};
use crate::error::Result;

#[derive(Debug, Parser)]
#[command(
    name = "tokenshade",
    about = "Give every light-mode color token an accessible dark-mode counterpart",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate missing dark-mode tokens and write the file back.
    Cleanup(CleanupArgs),

    /// List light tokens without a dark counterpart.
    Check(CheckArgs),
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Cleanup(args) => run_cleanup(args),
        Commands::Check(args) => run_check(args),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;
    use tempfile::tempdir;
    use tokenshade_style::{AdjustMethod, WcagLevel};

    use crate::check::CheckArgs;
    use crate::cleanup::CleanupArgs;
    use crate::error::TokenError;

    use super::{Cli, Commands, run};

    fn cleanup_args(filename: PathBuf) -> CleanupArgs {
        CleanupArgs {
            filename,
            output: None,
            dry_run: true,
            level: WcagLevel::NormalAa,
            method: AdjustMethod::Lightness,
            background: "Background.Secondary".to_string(),
            include_functional: false,
            report: None,
        }
    }

    #[test]
    fn every_subcommand_flag_has_help_text() {
        use clap::CommandFactory;

        let command = Cli::command();
        for sub in command.get_subcommands() {
            for arg in sub.get_arguments() {
                if matches!(arg.get_id().as_str(), "help" | "version") {
                    continue;
                }
                assert!(
                    arg.get_help().is_some(),
                    "{} --{} has no help text",
                    sub.get_name(),
                    arg.get_id()
                );
            }
        }
    }

    #[test]
    fn cleanup_defaults_match_script() {
        let cli = Cli::try_parse_from(["tokenshade", "cleanup"]).expect("parse");
        let Commands::Cleanup(args) = cli.command else {
            panic!("expected cleanup");
        };
        assert_eq!(args.filename, PathBuf::from("./tokens.json"));
        assert_eq!(args.level, WcagLevel::NormalAa);
        assert_eq!(args.method, AdjustMethod::Lightness);
        assert_eq!(args.background, "Background.Secondary");
        assert!(!args.dry_run);
        assert!(!args.include_functional);
    }

    #[test]
    fn cleanup_parses_level_and_method() {
        let cli = Cli::try_parse_from([
            "tokenshade",
            "cleanup",
            "--filename",
            "colors.json",
            "--level",
            "large_aaa",
            "--method",
            "saturation",
            "--include-functional",
        ])
        .expect("parse");
        let Commands::Cleanup(args) = cli.command else {
            panic!("expected cleanup");
        };
        assert_eq!(args.level, WcagLevel::LargeAaa);
        assert_eq!(args.method, AdjustMethod::Saturation);
        assert!(args.include_functional);
    }

    #[test]
    fn unknown_level_is_rejected_by_parser() {
        assert!(Cli::try_parse_from(["tokenshade", "cleanup", "--level", "gold"]).is_err());
    }

    #[test]
    fn cleanup_rejects_non_json_input() {
        let error = run(Cli {
            command: Commands::Cleanup(cleanup_args(PathBuf::from("tokens.yaml"))),
        })
        .expect_err("extension");
        assert!(matches!(
            error,
            TokenError::InvalidArgument { message } if message == "Input file must be a .json file"
        ));
    }

    #[test]
    fn cleanup_dispatches_missing_path_error() {
        let temp = tempdir().expect("tempdir");
        let missing = temp.path().join("absent.json");
        let error = run(Cli {
            command: Commands::Cleanup(cleanup_args(missing.clone())),
        })
        .expect_err("missing file");
        assert!(matches!(error, TokenError::MissingPath { path } if path == missing));
    }

    #[test]
    fn check_dispatches_missing_path_error() {
        let temp = tempdir().expect("tempdir");
        let missing = temp.path().join("absent.json");
        let error = run(Cli {
            command: Commands::Check(CheckArgs {
                filename: missing,
                include_functional: false,
            }),
        })
        .expect_err("missing file");
        assert!(matches!(error, TokenError::MissingPath { .. }));
    }
}

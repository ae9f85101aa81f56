use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use serde_json::json;

use crate::cleanup::{CleanupOptions, ScanState, scan_tables};
use crate::document::TokenDocument;
use crate::error::{Result, TokenError};
use crate::report::TokenGroup;
use crate::util::{OutputIntegration, ensure_json_extension, output_for};

#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Token file to inspect.
    #[arg(long, default_value = "./tokens.json")]
    pub filename: PathBuf,

    /// Also check functional (Light/Dark) tokens.
    #[arg(long = "include-functional")]
    pub include_functional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingToken {
    pub group: TokenGroup,
    pub key: String,
}

/// Light color tokens with no dark counterpart.
pub fn find_missing(document: &TokenDocument, options: &CleanupOptions) -> Result<Vec<MissingToken>> {
    let mut missing = Vec::new();
    for (group, light, dark) in options.table_pairs() {
        for item in scan_tables(document, &light, &dark)? {
            if matches!(item.state, ScanState::Missing(_)) {
                missing.push(MissingToken {
                    group,
                    key: item.key,
                });
            }
        }
    }
    Ok(missing)
}

pub fn run_check(args: CheckArgs) -> Result<()> {
    let integration = OutputIntegration::detect();
    let ui = output_for(&integration);

    ensure_json_extension(&args.filename)?;
    let document = TokenDocument::load(&args.filename)?;
    let options = CleanupOptions {
        include_functional: args.include_functional,
        ..CleanupOptions::default()
    };
    let missing = find_missing(&document, &options)?;

    if integration.should_emit_json() {
        println!(
            "{}",
            json!({
                "file": args.filename.display().to_string(),
                "missing": missing,
            })
        );
    } else {
        ui.rule(Some("dark mode completeness"));
        for token in &missing {
            ui.warning(&format!(
                "{} {} has no dark mode counterpart",
                token.group.as_str(),
                token.key
            ));
        }
    }

    if missing.is_empty() {
        ui.success("every light token has a dark counterpart");
        Ok(())
    } else {
        Err(TokenError::Incomplete {
            count: missing.len(),
        })
    }
}

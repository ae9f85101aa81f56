// SPDX-License-Identifier: Apache-2.0
//! Fill in missing dark-mode tokens.
//!
//! For every light token without a dark counterpart:
//!
//! 1. resolve the light value to a concrete color,
//! 2. ask [`AccessibilityProcessor`] for the nearest variant that reaches the
//!    requested WCAG level against the dark background,
//! 3. if the variant differs from the light color and came from the global
//!    palette, register it as the next palette entry (`Green3` → `Green4`),
//! 4. write the dark token pointing at the result.
//!
//! All mutation happens on the in-memory [`TokenDocument`]; the caller
//! decides whether to save it.

use std::collections::HashMap;
use std::path::PathBuf;

use clap::Args;
use serde_json::{Map, Value, json};
use tokenshade_style::{
    AccessibilityProcessor, AdjustMethod, AdjustTarget, Rgb, WcagLevel, contrast_ratio,
};
use tracing::{info, warn};

use crate::document::{
    DocumentLayout, GroupPath, TokenDocument, insert_leaf, leaf_at, leaf_type, token_leaves,
};
use crate::error::{Result, TokenError};
use crate::palette::{next_palette_name, register_generated};
use crate::reference::{ColorValue, TokenRef};
use crate::report::{CleanupReport, EntryStatus, ReportEntry, TokenGroup};
use crate::resolve::Resolver;
use crate::util::{OutputIntegration, ensure_json_extension, output_for};

#[derive(Debug, Clone, Args)]
pub struct CleanupArgs {
    /// Token file to read (and rewrite unless --output or --dry-run is given).
    #[arg(long, default_value = "./tokens.json")]
    pub filename: PathBuf,

    /// Write the updated tokens here instead of overwriting the input.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Report what would change without writing the token file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// WCAG level generated colors must reach.
    #[arg(long, default_value = "normal_aa")]
    pub level: WcagLevel,

    /// HSL channel adjusted to reach the level.
    #[arg(long, default_value = "lightness")]
    pub method: AdjustMethod,

    /// Dark functional token used as the background.
    #[arg(long, default_value = "Background.Secondary")]
    pub background: String,

    /// Also fill in functional (Light/Dark) tokens.
    #[arg(long = "include-functional")]
    pub include_functional: bool,

    /// Write a JSON report of every token visited.
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanupOptions {
    pub level: WcagLevel,
    pub method: AdjustMethod,
    /// Background token, relative to the functional dark table.
    pub background: GroupPath,
    pub include_functional: bool,
    pub layout: DocumentLayout,
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self {
            level: WcagLevel::NormalAa,
            method: AdjustMethod::Lightness,
            background: GroupPath::new(&["Background", "Secondary"]),
            include_functional: false,
            layout: DocumentLayout::default(),
        }
    }
}

impl From<&CleanupArgs> for CleanupOptions {
    fn from(args: &CleanupArgs) -> Self {
        Self {
            level: args.level,
            method: args.method,
            background: GroupPath::parse(&args.background),
            include_functional: args.include_functional,
            ..Self::default()
        }
    }
}

impl CleanupOptions {
    /// (group, light table, dark table) pairs to process, in order.
    #[must_use]
    pub fn table_pairs(&self) -> Vec<(TokenGroup, GroupPath, GroupPath)> {
        let mut pairs = vec![(
            TokenGroup::System,
            self.layout.system_light.clone(),
            self.layout.system_dark.clone(),
        )];
        if self.include_functional {
            pairs.push((
                TokenGroup::Functional,
                self.layout.functional_light.clone(),
                self.layout.functional_dark.clone(),
            ));
        }
        pairs
    }
}

/// State of one light token relative to its dark table.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanState {
    Present,
    /// Not a color token.
    Skipped,
    Missing(Map<String, Value>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanItem {
    pub key: String,
    pub state: ScanState,
}

/// Compare a light table against its dark table, in light document order.
pub fn scan_tables(
    document: &TokenDocument,
    light: &GroupPath,
    dark: &GroupPath,
) -> Result<Vec<ScanItem>> {
    let light_table = document.group(light)?;
    let dark_table = document.group(dark)?;

    let items = token_leaves(light_table)
        .into_iter()
        .map(|(key, leaf)| {
            let state = if leaf_at(dark_table, &GroupPath::parse(&key)).is_some() {
                ScanState::Present
            } else if leaf_type(leaf).is_some_and(|kind| kind != "color") {
                ScanState::Skipped
            } else {
                ScanState::Missing(leaf.clone())
            };
            ScanItem { key, state }
        })
        .collect();
    Ok(items)
}

/// Resolve the dark background color.
pub fn dark_background(document: &TokenDocument, options: &CleanupOptions) -> Result<Rgb> {
    let dark = document.group(&options.layout.functional_dark)?;
    let leaf = leaf_at(dark, &options.background).ok_or_else(|| TokenError::MissingGroup {
        path: options.layout.functional_dark.join(&options.background).to_string(),
    })?;
    let resolved = Resolver::new(document).resolve_leaf(&options.background.to_string(), leaf)?;
    Ok(resolved.rgb)
}

/// What to write for one missing dark token.
#[derive(Debug, Clone, PartialEq)]
struct DarkPlan {
    dark_value: String,
    original: Rgb,
    adjusted: Rgb,
    /// Palette entry to register before the dark token is written.
    new_global: Option<NewGlobal>,
}

#[derive(Debug, Clone, PartialEq)]
struct NewGlobal {
    /// Palette path of the entry this one was derived from.
    origin: String,
    /// Group holding the origin entry; the new entry goes next to it.
    group: GroupPath,
    name: String,
    hex: String,
}

/// Palette names generated during this run, keyed by (origin path, hex).
type GeneratedNames = HashMap<(String, String), String>;

/// Group that holds the palette entry `origin` points at. It must sit inside
/// the global table.
fn palette_group(
    document: &TokenDocument,
    layout: &DocumentLayout,
    key: &str,
    origin: &TokenRef,
) -> Result<GroupPath> {
    let group = document
        .locate_path(origin.path())
        .and_then(|path| path.parent())
        .ok_or_else(|| TokenError::UnknownReference {
            token: key.to_string(),
            reference: origin.path().to_string(),
        })?;
    if !group.starts_with(&layout.global) {
        return Err(TokenError::InvalidToken {
            token: key.to_string(),
            message: format!("{} is outside the global palette {}", origin.path(), layout.global),
        });
    }
    Ok(group)
}

fn format_alpha(alpha: f64) -> String {
    format!("{alpha}")
}

fn literal_value(rgb: Rgb, alpha: f64) -> String {
    if alpha >= 1.0 {
        rgb.to_hex()
    } else {
        format!("rgba({}, {}, {}, {})", rgb.r, rgb.g, rgb.b, format_alpha(alpha))
    }
}

fn plan_dark_entry(
    document: &TokenDocument,
    options: &CleanupOptions,
    key: &str,
    leaf: &Map<String, Value>,
    background: Rgb,
    generated: &GeneratedNames,
) -> Result<DarkPlan> {
    let light_value = Resolver::parse_leaf(key, leaf)?;
    let resolved = Resolver::new(document).resolve_value(key, &light_value)?;

    let adjusted = AccessibilityProcessor::new(resolved.rgb, background)
        .compliant_colors(options.method, AdjustTarget::Foreground, options.level)
        .first()
        .copied()
        .ok_or_else(|| TokenError::NoCompliantColor {
            token: key.to_string(),
            color: resolved.rgb.to_hex(),
            background: background.to_hex(),
            level: options.level.to_string(),
        })?;

    let original_hex = resolved.rgb.to_hex();
    let adjusted_hex = adjusted.to_hex();

    let (dark_value, new_global) = if adjusted_hex == original_hex {
        (light_value.render(), None)
    } else if let Some(origin) = &resolved.origin {
        let reuse_key = (origin.path().to_string(), adjusted_hex.clone());
        let (name, new_global) = match generated.get(&reuse_key) {
            Some(name) => (name.clone(), None),
            None => {
                let group = palette_group(document, &options.layout, key, origin)?;
                let name = next_palette_name(document.group(&group)?, origin.name());
                let new_global = NewGlobal {
                    origin: origin.path().to_string(),
                    group,
                    name: name.clone(),
                    hex: adjusted_hex,
                };
                (name, Some(new_global))
            }
        };
        let target = origin.sibling(&name);
        // Alpha that came from deeper in the chain must be spelled out now
        // that the value points straight at the palette.
        let value = match &light_value {
            ColorValue::Reference(_) if resolved.alpha < 1.0 => ColorValue::ReferenceWithAlpha {
                reference: target,
                alpha: format_alpha(resolved.alpha),
            },
            _ => light_value.retarget(target),
        };
        (value.render(), new_global)
    } else {
        (literal_value(adjusted, resolved.alpha), None)
    };

    Ok(DarkPlan {
        dark_value,
        original: resolved.rgb,
        adjusted,
        new_global,
    })
}

fn dark_entry(key: &str, value: &str) -> Map<String, Value> {
    let mut entry = Map::new();
    entry.insert("value".to_string(), json!(value));
    entry.insert("type".to_string(), json!("color"));
    entry.insert(
        "description".to_string(),
        json!(format!("A generated dark mode color for {key}.")),
    );
    entry
}

/// Fill every missing dark token in place and report what happened.
pub fn cleanup_darkmode(
    document: &mut TokenDocument,
    options: &CleanupOptions,
) -> Result<CleanupReport> {
    let background = dark_background(document, options)?;
    info!(background = %background, "resolved dark background");

    let mut report = CleanupReport::new(background.to_hex(), options.level, options.method);
    let mut generated = GeneratedNames::new();

    for (group, light, dark) in options.table_pairs() {
        for item in scan_tables(document, &light, &dark)? {
            let leaf = match item.state {
                ScanState::Present => {
                    report.push(ReportEntry::present(group, &item.key));
                    continue;
                }
                ScanState::Skipped => {
                    warn!(group = group.as_str(), key = %item.key, "skipping non-color token");
                    report.push(ReportEntry::skipped(group, &item.key));
                    continue;
                }
                ScanState::Missing(leaf) => leaf,
            };

            let plan =
                plan_dark_entry(document, options, &item.key, &leaf, background, &generated)?;

            if let Some(global) = &plan.new_global {
                register_generated(document.group_mut(&global.group)?, &global.name, &global.hex);
                generated.insert(
                    (global.origin.clone(), global.hex.clone()),
                    global.name.clone(),
                );
            }
            insert_leaf(
                document.group_mut(&dark)?,
                &GroupPath::parse(&item.key),
                dark_entry(&item.key, &plan.dark_value),
            )?;

            info!(
                group = group.as_str(),
                key = %item.key,
                original = %plan.original,
                adjusted = %plan.adjusted,
                dark_value = %plan.dark_value,
                "generated dark token"
            );

            report.push(ReportEntry {
                group,
                key: item.key,
                status: EntryStatus::Generated,
                light_value: leaf.get("value").and_then(Value::as_str).map(str::to_string),
                dark_value: Some(plan.dark_value),
                original_hex: Some(plan.original.to_hex()),
                adjusted_hex: Some(plan.adjusted.to_hex()),
                contrast_ratio: Some(contrast_ratio(plan.adjusted, background)),
                new_global: plan.new_global.map(|global| global.name),
            });
        }
    }

    Ok(report)
}

pub fn run_cleanup(args: CleanupArgs) -> Result<()> {
    let integration = OutputIntegration::detect();
    let ui = output_for(&integration);

    ensure_json_extension(&args.filename)?;
    if let Some(output) = &args.output {
        ensure_json_extension(output)?;
    }

    let mut document = TokenDocument::load(&args.filename)?;
    let options = CleanupOptions::from(&args);
    let mut report = cleanup_darkmode(&mut document, &options)?;
    report.source = Some(args.filename.clone());

    if args.dry_run {
        ui.warning("dry run: token file left unchanged");
    } else {
        let target = args.output.as_ref().unwrap_or(&args.filename);
        document.save(target)?;
        ui.success(&format!("wrote {}", target.display()));
    }

    if let Some(path) = &args.report {
        report.write_json(path)?;
        ui.info(&format!("report: {}", path.display()));
    }

    if integration.should_emit_json() {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        report.print_summary(&ui);
    }
    Ok(())
}

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokenshade_style::{AdjustMethod, WcagLevel};

use crate::error::Result;
use crate::util::{CliOutput, now_utc_iso, write_string};

/// Which pair of tables a token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenGroup {
    System,
    Functional,
}

impl TokenGroup {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Functional => "functional",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// A dark counterpart already existed.
    Present,
    /// A dark counterpart was written.
    Generated,
    /// The light token is not a color.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub group: TokenGroup,
    pub key: String,
    pub status: EntryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_hex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_hex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_global: Option<String>,
}

impl ReportEntry {
    #[must_use]
    pub fn present(group: TokenGroup, key: &str) -> Self {
        Self::bare(group, key, EntryStatus::Present)
    }

    #[must_use]
    pub fn skipped(group: TokenGroup, key: &str) -> Self {
        Self::bare(group, key, EntryStatus::Skipped)
    }

    fn bare(group: TokenGroup, key: &str, status: EntryStatus) -> Self {
        Self {
            group,
            key: key.to_string(),
            status,
            light_value: None,
            dark_value: None,
            original_hex: None,
            adjusted_hex: None,
            contrast_ratio: None,
            new_global: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupStats {
    pub present: usize,
    pub generated: usize,
    pub skipped: usize,
    pub new_globals: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanupReport {
    pub generated_at: String,
    pub source: Option<PathBuf>,
    pub background: String,
    pub level: WcagLevel,
    pub method: AdjustMethod,
    pub entries: Vec<ReportEntry>,
    pub stats: CleanupStats,
}

impl CleanupReport {
    #[must_use]
    pub fn new(background: String, level: WcagLevel, method: AdjustMethod) -> Self {
        Self {
            generated_at: now_utc_iso(),
            source: None,
            background,
            level,
            method,
            entries: Vec::new(),
            stats: CleanupStats::default(),
        }
    }

    pub fn push(&mut self, entry: ReportEntry) {
        match entry.status {
            EntryStatus::Present => self.stats.present += 1,
            EntryStatus::Generated => self.stats.generated += 1,
            EntryStatus::Skipped => self.stats.skipped += 1,
        }
        if entry.new_global.is_some() {
            self.stats.new_globals += 1;
        }
        self.entries.push(entry);
    }

    pub fn generated(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.status == EntryStatus::Generated)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        write_string(path, &serde_json::to_string_pretty(self)?)
    }

    /// Human summary, one line per generated token.
    pub fn print_summary(&self, ui: &CliOutput) {
        ui.rule(Some("dark mode cleanup"));
        for entry in self.generated() {
            let dark = entry.dark_value.as_deref().unwrap_or("?");
            match &entry.new_global {
                Some(name) => ui.info(&format!(
                    "{} {} -> {dark} (new global {name}, {})",
                    entry.group.as_str(),
                    entry.key,
                    entry.adjusted_hex.as_deref().unwrap_or("?")
                )),
                None => ui.info(&format!("{} {} -> {dark}", entry.group.as_str(), entry.key)),
            }
        }
        let stats = &self.stats;
        ui.success(&format!(
            "present={} generated={} skipped={} new_globals={}",
            stats.present, stats.generated, stats.skipped, stats.new_globals
        ));
    }
}

// SPDX-License-Identifier: Apache-2.0
//! Search for WCAG-compliant variants of a color pair.
//!
//! [`AccessibilityProcessor`] holds a foreground/background pair and, for a
//! chosen [`AdjustMethod`] and [`AdjustTarget`], walks one HSL channel of the
//! target color until the pair reaches a [`WcagLevel`]. The hue is never
//! touched, so generated variants stay recognizably the same color.
//!
//! Candidates are ordered nearest-first: the first entry is the smallest
//! change that passes. When the pair already passes, the first entry is the
//! unchanged target color.
//!
//! # Example
//!
//! ```
//! use tokenshade_style::{AccessibilityProcessor, AdjustMethod, AdjustTarget, Rgb, WcagLevel};
//!
//! let processor = AccessibilityProcessor::new(Rgb::new(0x1a, 0x4d, 0x2e), Rgb::new(0x12, 0x12, 0x12));
//! let matrix = processor.all_wcag_compliant_colors();
//! let lighter = matrix
//!     .first(AdjustMethod::Lightness, AdjustTarget::Foreground, WcagLevel::NormalAa)
//!     .unwrap();
//! assert!(WcagLevel::NormalAa.meets(lighter, Rgb::new(0x12, 0x12, 0x12)));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::color::{Hsl, Rgb};
use crate::contrast::{WcagLevel, contrast_ratio};

/// Default HSL step between candidates (1%).
pub const DEFAULT_STEP: f64 = 0.01;

/// HSL channel that is varied while searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AdjustMethod {
    Lightness,
    Saturation,
}

impl AdjustMethod {
    pub const ALL: [AdjustMethod; 2] = [AdjustMethod::Lightness, AdjustMethod::Saturation];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lightness => "lightness",
            Self::Saturation => "saturation",
        }
    }
}

impl fmt::Display for AdjustMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdjustMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown adjust method '{s}' (expected lightness or saturation)"))
    }
}

/// Which color of the pair is adjusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AdjustTarget {
    Foreground,
    Background,
}

impl AdjustTarget {
    pub const ALL: [AdjustTarget; 2] = [AdjustTarget::Foreground, AdjustTarget::Background];
}

type MatrixKey = (AdjustMethod, AdjustTarget, WcagLevel);

/// Compliant candidates for every method, target, and level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplianceMatrix {
    entries: BTreeMap<MatrixKey, Vec<Rgb>>,
}

impl ComplianceMatrix {
    /// Candidates for one combination, nearest-first. Empty when no variant
    /// along that channel reaches the level.
    #[must_use]
    pub fn get(&self, method: AdjustMethod, target: AdjustTarget, level: WcagLevel) -> &[Rgb] {
        self.entries
            .get(&(method, target, level))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn first(
        &self,
        method: AdjustMethod,
        target: AdjustTarget,
        level: WcagLevel,
    ) -> Option<Rgb> {
        self.get(method, target, level).first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MatrixKey, &Vec<Rgb>)> {
        self.entries.iter()
    }
}

/// A foreground/background pair to make accessible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccessibilityProcessor {
    foreground: Rgb,
    background: Rgb,
    step: f64,
}

impl AccessibilityProcessor {
    #[must_use]
    pub fn new(foreground: Rgb, background: Rgb) -> Self {
        Self {
            foreground,
            background,
            step: DEFAULT_STEP,
        }
    }

    /// Override the channel step. Values outside `(0, 0.5]` fall back to
    /// [`DEFAULT_STEP`].
    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = if step > 0.0 && step <= 0.5 {
            step
        } else {
            DEFAULT_STEP
        };
        self
    }

    #[must_use]
    pub fn foreground(&self) -> Rgb {
        self.foreground
    }

    #[must_use]
    pub fn background(&self) -> Rgb {
        self.background
    }

    #[must_use]
    pub fn contrast_ratio(&self) -> f64 {
        contrast_ratio(self.foreground, self.background)
    }

    /// Run every method, target, and level.
    #[must_use]
    pub fn all_wcag_compliant_colors(&self) -> ComplianceMatrix {
        let mut entries = BTreeMap::new();
        for method in AdjustMethod::ALL {
            for target in AdjustTarget::ALL {
                for level in WcagLevel::ALL {
                    entries.insert(
                        (method, target, level),
                        self.compliant_colors(method, target, level),
                    );
                }
            }
        }
        ComplianceMatrix { entries }
    }

    /// Candidates for a single combination, nearest-first.
    #[must_use]
    pub fn compliant_colors(
        &self,
        method: AdjustMethod,
        target: AdjustTarget,
        level: WcagLevel,
    ) -> Vec<Rgb> {
        let (adjusted, fixed) = match target {
            AdjustTarget::Foreground => (self.foreground, self.background),
            AdjustTarget::Background => (self.background, self.foreground),
        };

        if level.meets(adjusted, fixed) {
            return vec![adjusted];
        }

        let candidates = match method {
            AdjustMethod::Lightness => self.lightness_search(adjusted, fixed, level),
            AdjustMethod::Saturation => self.saturation_search(adjusted, fixed, level),
        };

        debug!(
            method = method.as_str(),
            level = level.as_str(),
            adjusted = %adjusted,
            fixed = %fixed,
            found = candidates.len(),
            "{} search",
            method.as_str()
        );

        candidates
    }

    fn lightness_search(&self, adjusted: Rgb, fixed: Rgb, level: WcagLevel) -> Vec<Rgb> {
        let hsl = adjusted.to_hsl();
        // Move away from the fixed color: lighter against dark, darker against light.
        let lighten = contrast_ratio(fixed, Rgb::WHITE) >= contrast_ratio(fixed, Rgb::BLACK);

        let preferred = self.walk_lightness(hsl, fixed, level, lighten);
        if !preferred.is_empty() {
            return preferred;
        }
        self.walk_lightness(hsl, fixed, level, !lighten)
    }

    fn walk_lightness(&self, hsl: Hsl, fixed: Rgb, level: WcagLevel, upward: bool) -> Vec<Rgb> {
        let mut candidates = Vec::new();
        let mut k = 1u32;
        loop {
            let offset = f64::from(k) * self.step;
            let l = if upward { hsl.l + offset } else { hsl.l - offset };
            let clamped = l.clamp(0.0, 1.0);
            let candidate = hsl.with_lightness(clamped).to_rgb();
            if level.meets(candidate, fixed) && !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
            if clamped <= 0.0 || clamped >= 1.0 {
                break;
            }
            k += 1;
        }
        candidates
    }

    fn saturation_search(&self, adjusted: Rgb, fixed: Rgb, level: WcagLevel) -> Vec<Rgb> {
        let hsl = adjusted.to_hsl();
        let mut candidates = Vec::new();
        let mut k = 1u32;
        loop {
            let offset = f64::from(k) * self.step;
            let up = hsl.s + offset;
            let down = hsl.s - offset;
            if up > 1.0 + self.step && down < -self.step {
                break;
            }
            for s in [up, down] {
                if !(-self.step..=1.0 + self.step).contains(&s) {
                    continue;
                }
                let candidate = hsl.with_saturation(s).to_rgb();
                if level.meets(candidate, fixed) && !candidates.contains(&candidate) {
                    candidates.push(candidate);
                }
            }
            k += 1;
        }
        candidates
    }
}

// SPDX-License-Identifier: Apache-2.0
//! WCAG 2.1 relative luminance and contrast ratio.

use std::fmt;
use std::str::FromStr;

use crate::color::Rgb;

/// Minimum contrast ratio for normal text at level AA.
pub const WCAG_AA_NORMAL_TEXT: f64 = 4.5;
/// Minimum contrast ratio for large text at level AA.
pub const WCAG_AA_LARGE_TEXT: f64 = 3.0;
/// Minimum contrast ratio for normal text at level AAA.
pub const WCAG_AAA_NORMAL_TEXT: f64 = 7.0;
/// Minimum contrast ratio for large text at level AAA.
pub const WCAG_AAA_LARGE_TEXT: f64 = 4.5;

fn srgb_to_linear(channel: u8) -> f64 {
    let s = f64::from(channel) / 255.0;
    if s <= 0.04045 {
        s / 12.92
    } else {
        ((s + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance in `[0, 1]`; black is 0 and white is 1.
#[must_use]
pub fn relative_luminance(color: Rgb) -> f64 {
    0.2126f64.mul_add(
        srgb_to_linear(color.r),
        0.7152f64.mul_add(srgb_to_linear(color.g), 0.0722 * srgb_to_linear(color.b)),
    )
}

/// Contrast ratio in `[1, 21]`, independent of argument order.
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// A WCAG conformance target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WcagLevel {
    NormalAa,
    NormalAaa,
    LargeAa,
    LargeAaa,
}

impl WcagLevel {
    pub const ALL: [WcagLevel; 4] = [
        WcagLevel::NormalAa,
        WcagLevel::NormalAaa,
        WcagLevel::LargeAa,
        WcagLevel::LargeAaa,
    ];

    #[must_use]
    pub const fn threshold(self) -> f64 {
        match self {
            Self::NormalAa => WCAG_AA_NORMAL_TEXT,
            Self::NormalAaa => WCAG_AAA_NORMAL_TEXT,
            Self::LargeAa => WCAG_AA_LARGE_TEXT,
            Self::LargeAaa => WCAG_AAA_LARGE_TEXT,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NormalAa => "normal_aa",
            Self::NormalAaa => "normal_aaa",
            Self::LargeAa => "large_aa",
            Self::LargeAaa => "large_aaa",
        }
    }

    #[must_use]
    pub fn meets(self, fg: Rgb, bg: Rgb) -> bool {
        contrast_ratio(fg, bg) >= self.threshold()
    }
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WcagLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown WCAG level '{s}' (expected normal_aa, normal_aaa, large_aa, or large_aaa)")
            })
    }
}

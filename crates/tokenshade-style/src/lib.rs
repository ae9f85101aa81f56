#![forbid(unsafe_code)]

//! Color primitives and WCAG accessibility search for tokenshade.
//!
//! # Role in tokenshade
//! `tokenshade-style` owns everything that involves color math: parsing
//! literal colors, converting to HSL, computing WCAG contrast, and searching
//! for accessible variants. The `tokenshade` CLI only walks token files and
//! asks this crate for answers.
//!
//! # This crate provides
//! - [`Rgb`], [`Rgba`], and [`Hsl`] with hex and CSS `rgb()`/`rgba()` parsing.
//! - [`relative_luminance`], [`contrast_ratio`], and [`WcagLevel`] thresholds.
//! - [`AccessibilityProcessor`] which returns a [`ComplianceMatrix`] of
//!   compliant candidates per adjust method, target, and level.

/// Accessible variant search.
pub mod accessibility;
/// Color types and literal parsing.
pub mod color;
/// WCAG luminance and contrast.
pub mod contrast;

pub use accessibility::{
    AccessibilityProcessor, AdjustMethod, AdjustTarget, ComplianceMatrix, DEFAULT_STEP,
};
pub use color::{ColorParseError, Hsl, Rgb, Rgba, parse_alpha};
pub use contrast::{
    WCAG_AA_LARGE_TEXT, WCAG_AA_NORMAL_TEXT, WCAG_AAA_LARGE_TEXT, WCAG_AAA_NORMAL_TEXT, WcagLevel,
    contrast_ratio, relative_luminance,
};

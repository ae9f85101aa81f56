// SPDX-License-Identifier: Apache-2.0
//! Token value syntax: literal colors and `{Path.To.Token}` references.
//!
//! Accepted forms:
//!
//! | form | example |
//! |---|---|
//! | hex literal | `#7A8585`, `#FFF`, `#FF000080` |
//! | CSS literal | `rgb(1, 2, 3)`, `rgba(255,255,255,0)` |
//! | reference | `{Olympus.Color.Global.Green3}` |
//! | reference with alpha | `rgba( {Olympus.Color.Global.Red1} , 0.15)` |

use std::fmt;
use std::sync::LazyLock;

use regex_lite::Regex;
use tokenshade_style::{ColorParseError, Rgba, parse_alpha};

static REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{\s*([^{}\s]+)\s*\}$").expect("reference regex"));

static REFERENCE_WITH_ALPHA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgba?\(\s*\{\s*([^{}\s]+)\s*\}\s*,\s*([^,()\s]+)\s*\)$")
        .expect("reference alpha regex")
});

/// Marker for references into the global palette.
const GLOBAL_MARKER: &str = "Color.Global";

/// A `{Path.To.Token}` pointer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenRef {
    path: String,
}

impl TokenRef {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last path segment (`Green3` for `Olympus.Color.Global.Green3`).
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }

    #[must_use]
    pub fn is_global(&self) -> bool {
        self.path.contains(GLOBAL_MARKER)
    }

    /// Same parent path, different final segment.
    #[must_use]
    pub fn sibling(&self, name: &str) -> Self {
        match self.path.rsplit_once('.') {
            Some((parent, _)) => Self::new(format!("{parent}.{name}")),
            None => Self::new(name),
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        format!("{{{}}}", self.path)
    }
}

impl fmt::Display for TokenRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// A parsed token `value`.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorValue {
    /// A literal color; `raw` is the original text.
    Literal { raw: String, color: Rgba },
    Reference(TokenRef),
    /// A reference whose alpha is overridden. `alpha` keeps the source text.
    ReferenceWithAlpha { reference: TokenRef, alpha: String },
}

impl ColorValue {
    pub fn parse(raw: &str) -> Result<Self, ColorParseError> {
        let trimmed = raw.trim();

        if let Some(caps) = REFERENCE.captures(trimmed) {
            return Ok(Self::Reference(TokenRef::new(&caps[1])));
        }

        if let Some(caps) = REFERENCE_WITH_ALPHA.captures(trimmed) {
            let alpha = caps[2].to_string();
            if parse_alpha(&alpha).is_none() {
                return Err(ColorParseError::InvalidAlpha {
                    input: raw.to_string(),
                    alpha,
                });
            }
            return Ok(Self::ReferenceWithAlpha {
                reference: TokenRef::new(&caps[1]),
                alpha,
            });
        }

        if trimmed.contains('{') {
            return Err(ColorParseError::InvalidFormat {
                input: raw.to_string(),
            });
        }

        let color = trimmed.parse::<Rgba>()?;
        Ok(Self::Literal {
            raw: raw.to_string(),
            color,
        })
    }

    #[must_use]
    pub fn reference(&self) -> Option<&TokenRef> {
        match self {
            Self::Literal { .. } => None,
            Self::Reference(reference) | Self::ReferenceWithAlpha { reference, .. } => {
                Some(reference)
            }
        }
    }

    /// Alpha override carried by the value itself.
    #[must_use]
    pub fn alpha_override(&self) -> Option<f64> {
        match self {
            Self::ReferenceWithAlpha { alpha, .. } => parse_alpha(alpha),
            _ => None,
        }
    }

    /// Point the value at another token, keeping any alpha override.
    /// Literals become plain references.
    #[must_use]
    pub fn retarget(&self, reference: TokenRef) -> Self {
        match self {
            Self::ReferenceWithAlpha { alpha, .. } => Self::ReferenceWithAlpha {
                reference,
                alpha: alpha.clone(),
            },
            _ => Self::Reference(reference),
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Literal { raw, .. } => raw.clone(),
            Self::Reference(reference) => reference.render(),
            Self::ReferenceWithAlpha { reference, alpha } => {
                format!("rgba( {} , {alpha})", reference.render())
            }
        }
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

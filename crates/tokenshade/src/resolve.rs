// SPDX-License-Identifier: Apache-2.0
//! Follow token references down to a concrete color.

use serde_json::{Map, Value};
use tokenshade_style::Rgb;
use tracing::debug;

use crate::document::{TokenDocument, leaf_type, leaf_value};
use crate::error::{Result, TokenError};
use crate::reference::{ColorValue, TokenRef};

/// Maximum number of references followed before giving up.
pub const MAX_REFERENCE_DEPTH: usize = 16;

/// A token value reduced to a concrete color.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColor {
    pub rgb: Rgb,
    pub alpha: f64,
    /// Innermost global-palette token on the chain, if any.
    pub origin: Option<TokenRef>,
}

pub struct Resolver<'a> {
    document: &'a TokenDocument,
}

impl<'a> Resolver<'a> {
    #[must_use]
    pub fn new(document: &'a TokenDocument) -> Self {
        Self { document }
    }

    /// Parse a leaf's `value` without resolving it.
    pub fn parse_leaf(token: &str, leaf: &Map<String, Value>) -> Result<ColorValue> {
        match leaf_type(leaf) {
            Some(kind) if kind != "color" => {
                return Err(TokenError::NotAColor {
                    token: token.to_string(),
                    kind: kind.to_string(),
                });
            }
            _ => {}
        }
        let raw = leaf_value(leaf).ok_or_else(|| TokenError::InvalidToken {
            token: token.to_string(),
            message: "value is not a string".to_string(),
        })?;
        ColorValue::parse(raw).map_err(|source| TokenError::InvalidColor {
            token: token.to_string(),
            source,
        })
    }

    pub fn resolve_leaf(&self, token: &str, leaf: &Map<String, Value>) -> Result<ResolvedColor> {
        let value = Self::parse_leaf(token, leaf)?;
        self.resolve_value(token, &value)
    }

    pub fn resolve_value(&self, token: &str, value: &ColorValue) -> Result<ResolvedColor> {
        let mut chain = vec![token.to_string()];
        self.resolve_inner(token, value, &mut chain)
    }

    fn resolve_inner(
        &self,
        token: &str,
        value: &ColorValue,
        chain: &mut Vec<String>,
    ) -> Result<ResolvedColor> {
        let reference = match value {
            ColorValue::Literal { color, .. } => {
                return Ok(ResolvedColor {
                    rgb: color.rgb,
                    alpha: color.alpha,
                    origin: None,
                });
            }
            ColorValue::Reference(reference) | ColorValue::ReferenceWithAlpha { reference, .. } => {
                reference
            }
        };

        if chain.iter().any(|seen| seen == reference.path()) || chain.len() > MAX_REFERENCE_DEPTH {
            chain.push(reference.path().to_string());
            return Err(TokenError::ReferenceCycle {
                chain: chain.join(" -> "),
            });
        }
        chain.push(reference.path().to_string());

        let leaf = self
            .document
            .lookup_path(reference.path())
            .ok_or_else(|| TokenError::UnknownReference {
                token: token.to_string(),
                reference: reference.path().to_string(),
            })?;
        let inner_value = Self::parse_leaf(reference.path(), leaf)?;
        let mut resolved = self.resolve_inner(reference.path(), &inner_value, chain)?;

        debug!(
            token,
            reference = reference.path(),
            color = %resolved.rgb,
            "resolved reference"
        );

        if resolved.origin.is_none() && reference.is_global() {
            resolved.origin = Some(reference.clone());
        }
        if let Some(alpha) = value.alpha_override() {
            resolved.alpha = alpha;
        }
        Ok(resolved)
    }
}

// SPDX-License-Identifier: Apache-2.0
//! Token document model.
//!
//! A token file is a JSON object of *token sets* (`_Global`, `System-Light`,
//! `Dark`, ...). Each set nests groups down to *leaves*: objects that carry a
//! `value` (and usually `type` and `description`). The document is kept as a
//! raw [`serde_json::Value`] so unknown fields and key order survive a
//! load/save cycle untouched.

use std::fmt;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Result, TokenError};
use crate::util::{ensure_exists, write_string};

/// Dotted location of a group inside the document, starting at a token set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupPath(Vec<String>);

impl GroupPath {
    #[must_use]
    pub fn new(segments: &[&str]) -> Self {
        Self(segments.iter().map(|s| (*s).to_string()).collect())
    }

    /// Parse `A.B.C`. Empty segments are dropped.
    #[must_use]
    pub fn parse(dotted: &str) -> Self {
        Self(
            dotted
                .split('.')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Everything but the last segment.
    #[must_use]
    pub fn parent(&self) -> Option<GroupPath> {
        self.0
            .split_last()
            .map(|(_, parents)| GroupPath(parents.to_vec()))
    }

    #[must_use]
    pub fn starts_with(&self, prefix: &GroupPath) -> bool {
        self.0.starts_with(&prefix.0)
    }

    #[must_use]
    pub fn join(&self, child: &GroupPath) -> GroupPath {
        let mut segments = self.0.clone();
        segments.extend(child.0.iter().cloned());
        GroupPath(segments)
    }
}

impl fmt::Display for GroupPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Where each color table lives in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLayout {
    pub global: GroupPath,
    pub system_light: GroupPath,
    pub system_dark: GroupPath,
    pub functional_light: GroupPath,
    pub functional_dark: GroupPath,
}

impl Default for DocumentLayout {
    fn default() -> Self {
        Self {
            global: GroupPath::new(&["_Global", "Olympus", "Color", "Global"]),
            system_light: GroupPath::new(&["System-Light", "Olympus", "Color", "System", "Light"]),
            system_dark: GroupPath::new(&["System-Dark", "Olympus", "Color", "System", "Dark"]),
            functional_light: GroupPath::new(&["Light", "Olympus", "Light"]),
            functional_dark: GroupPath::new(&["Dark", "Olympus", "Dark"]),
        }
    }
}

/// A leaf is any object carrying a `value` field.
#[must_use]
pub fn is_leaf(map: &Map<String, Value>) -> bool {
    map.contains_key("value")
}

/// The `value` field of a leaf when it is a string.
#[must_use]
pub fn leaf_value(leaf: &Map<String, Value>) -> Option<&str> {
    leaf.get("value").and_then(Value::as_str)
}

/// The `type` field of a leaf, if any.
#[must_use]
pub fn leaf_type(leaf: &Map<String, Value>) -> Option<&str> {
    leaf.get("type").and_then(Value::as_str)
}

/// All leaves under `group` in document order, keyed by dotted path
/// relative to `group`.
#[must_use]
pub fn token_leaves(group: &Map<String, Value>) -> Vec<(String, &Map<String, Value>)> {
    let mut leaves = Vec::new();
    collect_leaves(group, None, &mut leaves);
    leaves
}

fn collect_leaves<'a>(
    group: &'a Map<String, Value>,
    prefix: Option<&str>,
    out: &mut Vec<(String, &'a Map<String, Value>)>,
) {
    for (key, value) in group {
        let Value::Object(child) = value else {
            continue;
        };
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.clone(),
        };
        if is_leaf(child) {
            out.push((path, child));
        } else {
            collect_leaves(child, Some(&path), out);
        }
    }
}

/// Leaf at a dotted path relative to `group`.
#[must_use]
pub fn leaf_at<'a>(group: &'a Map<String, Value>, path: &GroupPath) -> Option<&'a Map<String, Value>> {
    let mut current = group;
    for segment in path.segments() {
        current = current.get(segment)?.as_object()?;
    }
    is_leaf(current).then_some(current)
}

/// Insert (or replace) a leaf at a dotted path, creating intermediate groups.
pub fn insert_leaf(
    group: &mut Map<String, Value>,
    path: &GroupPath,
    entry: Map<String, Value>,
) -> Result<()> {
    let Some((last, parents)) = path.segments().split_last() else {
        return Err(TokenError::invalid("cannot insert a token at an empty path"));
    };

    let mut current = group;
    for segment in parents {
        let child = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        current = child.as_object_mut().ok_or_else(|| TokenError::InvalidToken {
            token: path.to_string(),
            message: format!("'{segment}' is not a group"),
        })?;
    }
    current.insert(last.clone(), Value::Object(entry));
    Ok(())
}

/// A loaded token file.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenDocument {
    root: Value,
}

impl TokenDocument {
    pub fn load(path: &Path) -> Result<Self> {
        ensure_exists(path)?;
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(raw)?;
        Self::from_value(root)
    }

    pub fn from_value(root: Value) -> Result<Self> {
        if root.is_object() {
            Ok(Self { root })
        } else {
            Err(TokenError::invalid("token document must be a JSON object"))
        }
    }

    /// Two-space indented JSON, key order preserved, no trailing newline.
    pub fn to_pretty_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_string(path, &self.to_pretty_string()?)
    }

    pub fn group(&self, path: &GroupPath) -> Result<&Map<String, Value>> {
        let mut current = &self.root;
        for segment in path.segments() {
            current = current.get(segment).ok_or_else(|| missing_group(path))?;
        }
        current.as_object().ok_or_else(|| missing_group(path))
    }

    pub fn group_mut(&mut self, path: &GroupPath) -> Result<&mut Map<String, Value>> {
        let mut current = &mut self.root;
        for segment in path.segments() {
            current = current
                .get_mut(segment)
                .ok_or_else(|| missing_group(path))?;
        }
        current.as_object_mut().ok_or_else(|| missing_group(path))
    }

    /// Find the leaf a reference path points at.
    ///
    /// Reference paths omit the token set (`Olympus.Color.Global.Red1`
    /// lives under `_Global`), so each top-level set is searched in order and
    /// the first hit wins.
    #[must_use]
    pub fn lookup_path(&self, dotted: &str) -> Option<&Map<String, Value>> {
        let path = GroupPath::parse(dotted);
        if path.segments().is_empty() {
            return None;
        }
        let sets = self.root.as_object()?;
        sets.values()
            .filter_map(Value::as_object)
            .find_map(|set| leaf_at(set, &path))
    }

    /// Absolute location (token set included) of the leaf a reference path
    /// points at, using the same search order as [`Self::lookup_path`].
    #[must_use]
    pub fn locate_path(&self, dotted: &str) -> Option<GroupPath> {
        let path = GroupPath::parse(dotted);
        if path.segments().is_empty() {
            return None;
        }
        let sets = self.root.as_object()?;
        sets.iter().find_map(|(name, set)| {
            let set = set.as_object()?;
            leaf_at(set, &path).map(|_| GroupPath(vec![name.clone()]).join(&path))
        })
    }
}

fn missing_group(path: &GroupPath) -> TokenError {
    TokenError::MissingGroup {
        path: path.to_string(),
    }
}

//! Naming and registering generated global palette entries.

use serde_json::{Map, Value, json};

/// Split a palette name into its base and trailing number.
///
/// `Green3` → `("Green", Some(3))`, `Red` → `("Red", None)`.
#[must_use]
pub fn split_numbered_name(name: &str) -> (&str, Option<u32>) {
    let base = name.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = &name[base.len()..];
    match digits.parse::<u32>() {
        Ok(number) => (base, Some(number)),
        Err(_) => (name, None),
    }
}

/// Next unused palette name after `name`.
///
/// The trailing number is incremented (`Green3` → `Green4`); names without
/// one start at 2. Names already taken in `globals` are skipped.
#[must_use]
pub fn next_palette_name(globals: &Map<String, Value>, name: &str) -> String {
    let (base, number) = split_numbered_name(name);
    let mut next = number.map_or(2, |n| n.saturating_add(1));
    loop {
        let candidate = format!("{base}{next}");
        if !globals.contains_key(&candidate) {
            return candidate;
        }
        next = next.saturating_add(1);
    }
}

#[must_use]
pub fn generated_description(base: &str) -> String {
    format!("A generated dark mode {base} color.")
}

/// Insert a generated color leaf under `name`.
pub fn register_generated(globals: &mut Map<String, Value>, name: &str, hex: &str) {
    let (base, _) = split_numbered_name(name);
    globals.insert(
        name.to_string(),
        json!({
            "value": hex,
            "type": "color",
            "description": generated_description(base),
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn globals(names: &[&str]) -> Map<String, Value> {
        names
            .iter()
            .map(|name| ((*name).to_string(), json!({"value": "#000000", "type": "color"})))
            .collect()
    }

    #[test]
    fn split_handles_numbered_and_plain_names() {
        assert_eq!(split_numbered_name("Green3"), ("Green", Some(3)));
        assert_eq!(split_numbered_name("Slate12"), ("Slate", Some(12)));
        assert_eq!(split_numbered_name("Red"), ("Red", None));
        assert_eq!(split_numbered_name("SlateF"), ("SlateF", None));
    }

    #[test]
    fn next_name_increments() {
        assert_eq!(next_palette_name(&globals(&["Green3"]), "Green3"), "Green4");
    }

    #[test]
    fn next_name_skips_taken_names() {
        let taken = globals(&["Green3", "Green4", "Green5"]);
        assert_eq!(next_palette_name(&taken, "Green3"), "Green6");
    }

    #[test]
    fn plain_name_starts_at_two() {
        assert_eq!(next_palette_name(&globals(&["Red"]), "Red"), "Red2");
    }

    #[test]
    fn register_writes_generated_leaf() {
        let mut palette = Map::new();
        register_generated(&mut palette, "Green4", "#4AC26B");
        assert_eq!(
            palette.get("Green4"),
            Some(&json!({
                "value": "#4AC26B",
                "type": "color",
                "description": "A generated dark mode Green color."
            }))
        );
    }

    proptest! {
        #[test]
        fn next_name_is_never_taken(base in "[A-Z][a-z]{1,6}", start in 0u32..20, taken in proptest::collection::vec(0u32..25, 0..10)) {
            let mut names: Vec<String> = taken.iter().map(|n| format!("{base}{n}")).collect();
            names.push(format!("{base}{start}"));
            let palette: Map<String, Value> = names
                .into_iter()
                .map(|name| (name, json!({"value": "#000000"})))
                .collect();
            let next = next_palette_name(&palette, &format!("{base}{start}"));
            prop_assert!(!palette.contains_key(&next));
            prop_assert!(next.starts_with(&base));
            let (_, number) = split_numbered_name(&next);
            prop_assert!(number.unwrap() > start);
        }
    }
}

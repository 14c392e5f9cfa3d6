use crate::planner::{validate_ratings, Ratings};
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Load a ratings file: a YAML or JSON map of bar name to rating (1-10).
///
/// ```yaml
/// "Zeno's": 8
/// The Phyrst: 6
/// ```
///
/// Bar names are trimmed; names that collide after trimming are an error. Every rating is validated and all problems are
/// reported together.
pub fn load_ratings(path: &Path) -> Result<Ratings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read ratings file at {}", path.display()))?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let raw: Ratings = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse ratings: invalid JSON in {}", path.display()))?
    } else {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse ratings: invalid YAML in {}", path.display()))?
    };

    let mut ratings = Ratings::new();
    let mut duplicates = BTreeSet::new();
    for (bar, rating) in raw {
        let bar = bar.trim().to_string();
        if ratings.insert(bar.clone(), rating).is_some() {
            duplicates.insert(bar);
        }
    }

    let mut errors: Vec<String> = duplicates
        .into_iter()
        .map(|bar| format!("ratings.{}: listed more than once", bar))
        .collect();
    if let Err(invalid) = validate_ratings(&ratings) {
        errors.extend(invalid);
    }

    if !errors.is_empty() {
        anyhow::bail!(
            "Invalid ratings in {}:\n  - {}",
            path.display(),
            errors.join("\n  - ")
        );
    }

    Ok(ratings)
}

use super::table::SpecialsTable;
use super::types::{Day, Special};
use crate::buffered_eprintln;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File names tried, in order, when no data file is given explicitly
pub const DATA_FILE_CANDIDATES: [&str; 5] = [
    "specials.yaml",
    "specials.yml",
    "specials.json",
    "bar_specials.yaml",
    "bar_specials.json",
];

const DATA_FILE_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// One record as it appears on disk. Every field is optional so that a bad
/// row can be skipped with a warning instead of failing the whole file.
#[derive(Debug, Deserialize)]
struct RawSpecial {
    #[serde(default, alias = "Bar")]
    bar: Option<String>,
    #[serde(default, alias = "Day")]
    day: Option<String>,
    #[serde(default, alias = "Deal")]
    deal: Option<String>,
}

/// Find a specials data file in `dir`.
///
/// Tries each name in [`DATA_FILE_CANDIDATES`]. If none exists, the error
/// lists the directory and any other data-like files found in it.
pub fn discover_data_file(dir: &Path) -> Result<PathBuf> {
    for name in DATA_FILE_CANDIDATES {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    let found = list_data_files(dir);
    let found_text = if found.is_empty() {
        "none found".to_string()
    } else {
        found
            .iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(", ")
    };

    anyhow::bail!(
        "No specials file found in {}. Expected one of: {}. Data files in directory: {}. \
         Pass --data <FILE> or set data_file in the config.",
        dir.display(),
        DATA_FILE_CANDIDATES.join(", "),
        found_text
    )
}

/// List YAML and JSON files directly inside `dir`, sorted by path
pub fn list_data_files(dir: &Path) -> Vec<PathBuf> {
    let escaped_dir = glob::Pattern::escape(&dir.to_string_lossy());
    let mut files: Vec<PathBuf> = DATA_FILE_EXTENSIONS
        .iter()
        .filter_map(|ext| glob::glob(&format!("{}/*.{}", escaped_dir, ext)).ok())
        .flat_map(|paths| paths.filter_map(|p| p.ok()))
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    files
}

/// Load specials from a YAML or JSON file.
///
/// The file holds a list of records with `bar`, `day` and `deal` fields
/// (capitalised headers are accepted too). Values are trimmed. Records with
/// a blank bar or an unrecognised day are skipped with a warning; a missing
/// deal loads as empty text.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a list of records.
pub fn load_specials(path: &Path) -> Result<SpecialsTable> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read specials file at {}", path.display()))?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let raw: Vec<RawSpecial> = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse specials: invalid JSON in {}", path.display()))?
    } else {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse specials: invalid YAML in {}", path.display()))?
    };

    Ok(SpecialsTable::new(convert_records(raw)))
}

fn convert_records(raw: Vec<RawSpecial>) -> Vec<Special> {
    let mut specials = Vec::with_capacity(raw.len());

    for (i, record) in raw.into_iter().enumerate() {
        let bar = record.bar.as_deref().map(str::trim).unwrap_or_default();
        if bar.is_empty() {
            buffered_eprintln!("Skipping record {}: missing bar name", i + 1);
            continue;
        }

        let day_text = record.day.as_deref().map(str::trim).unwrap_or_default();
        let day: Day = match day_text.parse() {
            Ok(day) => day,
            Err(e) => {
                buffered_eprintln!("Skipping record {} ({}): {}", i + 1, bar, e);
                continue;
            }
        };

        let deal = record.deal.as_deref().map(str::trim).unwrap_or_default();
        specials.push(Special::new(bar, day, deal));
    }

    specials
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("bar_hop_test_{}", name));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_yaml_specials() {
        let dir = temp_dir("load_yaml");
        let path = dir.join("specials.yaml");
        fs::write(
            &path,
            r#"
- bar: "The Rathskeller"
  day: Friday
  deal: "$1 drafts, happy hour 4-7"
- bar: Zeno's
  day: monday
  deal: Half off pitchers
"#,
        )
        .unwrap();

        let table = load_specials(&path).unwrap();
        assert_eq!(table.len(), 2);
        // Sorted by day then bar
        assert_eq!(table.specials()[0].bar, "Zeno's");
        assert_eq!(table.specials()[0].day, Day::Monday);
        assert_eq!(table.specials()[1].deal, "$1 drafts, happy hour 4-7");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_json_with_capitalised_headers() {
        let dir = temp_dir("load_json");
        let path = dir.join("specials.json");
        fs::write(
            &path,
            r#"[{"Bar": " Chumley's ", "Day": "Tuesday", "Deal": " $3 wells "}]"#,
        )
        .unwrap();

        let table = load_specials(&path).unwrap();
        assert_eq!(table.len(), 1);
        let special = &table.specials()[0];
        assert_eq!(special.bar, "Chumley's");
        assert_eq!(special.day, Day::Tuesday);
        assert_eq!(special.deal, "$3 wells");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_bad_records_are_skipped() {
        let dir = temp_dir("bad_records");
        let path = dir.join("specials.yaml");
        fs::write(
            &path,
            r#"
- bar: Good Bar
  day: Saturday
- bar: ""
  day: Saturday
  deal: no name
- bar: Lost Bar
  day: Caturday
  deal: "$2 shots"
"#,
        )
        .unwrap();

        let table = load_specials(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.specials()[0].bar, "Good Bar");
        assert_eq!(table.specials()[0].deal, "");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let path = env::temp_dir().join("bar_hop_test_missing_specials.yaml");
        let _ = fs::remove_file(&path);
        let err = load_specials(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to read specials file"));
    }

    #[test]
    fn test_discover_prefers_candidate_order() {
        let dir = temp_dir("discover_order");
        fs::write(dir.join("bar_specials.json"), "[]").unwrap();
        fs::write(dir.join("specials.yml"), "[]").unwrap();

        let found = discover_data_file(&dir).unwrap();
        assert_eq!(found, dir.join("specials.yml"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_discover_lists_other_data_files() {
        let dir = temp_dir("discover_other");
        fs::write(dir.join("deals_2024.yaml"), "[]").unwrap();

        let err = discover_data_file(&dir).unwrap_err().to_string();
        assert!(err.contains("No specials file found"));
        assert!(err.contains("deals_2024.yaml"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_discover_empty_dir() {
        let dir = temp_dir("discover_empty");
        let err = discover_data_file(&dir).unwrap_err().to_string();
        assert!(err.contains("none found"));
        let _ = fs::remove_dir_all(&dir);
    }
}

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, save_config, Config, RouteDefaults, ThemeMode};
use crate::planner::{Style, MAX_RATING, MIN_RATING};
use crate::specials::discover_data_file;

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Print text with a typewriter effect, one character at a time.
fn typewriter(text: &str) {
    use std::thread;
    use std::time::Duration;
    for c in text.chars() {
        print!("{}", c);
        std::io::stdout().flush().ok();
        thread::sleep(Duration::from_millis(18));
    }
    println!();
}

fn parse_style(input: &str) -> Option<Style> {
    match input.trim().to_lowercase().as_str() {
        "optimized" | "o" => Some(Style::Optimized),
        "high-rated-only" | "high" | "h" => Some(Style::HighRatedOnly),
        "adventure-mix" | "adventure" | "a" => Some(Style::AdventureMix),
        _ => None,
    }
}

fn parse_theme(input: &str) -> Option<ThemeMode> {
    match input.trim().to_lowercase().as_str() {
        "auto" => Some(ThemeMode::Auto),
        "dark" => Some(ThemeMode::Dark),
        "light" => Some(ThemeMode::Light),
        _ => None,
    }
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    typewriter("Bar Hop Configuration Wizard");
    println!("============================");
    println!();

    // 1. Data file
    typewriter("Bar Hop reads weekly specials from a YAML or JSON file with bar, day and deal fields.");
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let suggested = discover_data_file(&cwd)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "specials.yaml".to_string());
    let data_file = loop {
        let input = prompt_with_default("Specials file", &suggested)?;
        let path = PathBuf::from(&input);
        let path = if path.is_relative() { cwd.join(path) } else { path };
        if path.is_file() {
            break path;
        }
        let keep = prompt_yes_no(
            &format!("  {} does not exist yet. Use it anyway?", path.display()),
            false,
        )?;
        if keep {
            break path;
        }
    };

    // 2. Route defaults
    println!();
    typewriter("Next, pick the route settings used when you don't pass them on the command line.");
    let stops: usize = loop {
        let input = prompt_with_default("Number of stops", "3")?;
        match input.parse::<usize>() {
            Ok(n) if n >= 1 => break n,
            _ => println!("  Invalid: must be a whole number of at least 1. Try again."),
        }
    };

    println!();
    typewriter("Route styles:");
    typewriter("  optimized        -- your ratings plus the best deals");
    typewriter("  high-rated-only  -- only your ratings count");
    typewriter("  adventure-mix    -- ratings, some deal value and a dash of randomness");
    let style = loop {
        let input = prompt_with_default("Route style", "optimized")?;
        match parse_style(&input) {
            Some(style) => break style,
            None => println!("  Invalid: choose optimized, high-rated-only or adventure-mix."),
        }
    };

    println!();
    typewriter("Budget focus scores each deal's text (cheap drinks, happy hours, pitchers) into the route.");
    let budget_focus = prompt_yes_no("Focus on budget?", false)?;

    // 3. Default rating
    println!();
    typewriter("Every bar on the night you pick needs a rating from 1 to 10.");
    typewriter("A default rating fills in bars you don't rate. Use 'none' to always rate every bar yourself.");
    let default_rating = loop {
        let input = prompt_with_default("Default rating", "none")?;
        if input == "none" {
            break None;
        }
        match input.parse::<u8>() {
            Ok(r) if (MIN_RATING..=MAX_RATING).contains(&r) => break Some(r),
            _ => println!(
                "  Invalid: must be 'none' or a number {}-{}. Try again.",
                MIN_RATING, MAX_RATING
            ),
        }
    };

    // 4. Theme
    println!();
    let theme = loop {
        let input = prompt_with_default("Dashboard theme (auto/dark/light)", "auto")?;
        match parse_theme(&input) {
            Some(theme) => break theme,
            None => println!("  Invalid: choose auto, dark or light."),
        }
    };

    // 5. Config path
    let default_config_path = default_path.unwrap_or_else(get_config_path);
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 6. Write config
    let config = Config {
        data_file: Some(data_file),
        route: RouteDefaults {
            stops,
            style,
            budget_focus,
        },
        default_rating,
        theme,
    };
    save_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `bar-hop` to get started.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_style_accepts_names_and_shortcuts() {
        assert_eq!(parse_style("optimized"), Some(Style::Optimized));
        assert_eq!(parse_style("High-Rated-Only"), Some(Style::HighRatedOnly));
        assert_eq!(parse_style("a"), Some(Style::AdventureMix));
        assert_eq!(parse_style("random"), None);
    }

    #[test]
    fn test_parse_theme() {
        assert_eq!(parse_theme("AUTO"), Some(ThemeMode::Auto));
        assert_eq!(parse_theme(" light "), Some(ThemeMode::Light));
        assert_eq!(parse_theme("solarized"), None);
    }
}

use crate::planner::{RouteRequest, Style};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration.
///
/// Example YAML:
/// ```yaml
/// data_file: ~/bars/specials.yaml   # leading ~ is expanded to the home directory
/// default_rating: 5
/// theme: auto
/// route:
///   stops: 4
///   style: adventure-mix
///   budget_focus: true
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Specials file. When unset, the working directory is searched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,

    #[serde(default)]
    pub route: RouteDefaults,

    /// Rating used for bars the user has not rated.
    /// When unset, every bar on the chosen day must be rated explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_rating: Option<u8>,

    #[serde(default)]
    pub theme: ThemeMode,
}

/// Route parameters used when the command line does not give them
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RouteDefaults {
    #[serde(default = "default_stops")]
    pub stops: usize,

    #[serde(default)]
    pub style: Style,

    #[serde(default)]
    pub budget_focus: bool,
}

fn default_stops() -> usize {
    3
}

impl Default for RouteDefaults {
    fn default() -> Self {
        Self {
            stops: default_stops(),
            style: Style::default(),
            budget_focus: false,
        }
    }
}

impl RouteDefaults {
    /// Route request with command-line values taking precedence over these defaults
    pub fn request(
        &self,
        stops: Option<usize>,
        style: Option<Style>,
        budget_focus: Option<bool>,
    ) -> RouteRequest {
        RouteRequest {
            num_stops: stops.unwrap_or(self.stops),
            style: style.unwrap_or(self.style),
            budget_focus: budget_focus.unwrap_or(self.budget_focus),
        }
    }
}

/// Dashboard colour scheme
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Detect from the terminal background
    #[default]
    Auto,
    Dark,
    Light,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.data_file.is_none());
        assert_eq!(config.route.stops, 3);
        assert_eq!(config.route.style, Style::Optimized);
        assert!(!config.route.budget_focus);
        assert!(config.default_rating.is_none());
        assert_eq!(config.theme, ThemeMode::Auto);
    }

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
data_file: /tmp/specials.yaml
default_rating: 6
theme: light
route:
  stops: 4
  style: adventure-mix
  budget_focus: true
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.data_file, Some(PathBuf::from("/tmp/specials.yaml")));
        assert_eq!(config.default_rating, Some(6));
        assert_eq!(config.theme, ThemeMode::Light);
        assert_eq!(config.route.stops, 4);
        assert_eq!(config.route.style, Style::AdventureMix);
        assert!(config.route.budget_focus);
    }

    #[test]
    fn test_partial_route_parse() {
        let yaml = r#"
route:
  style: high-rated-only
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.route.stops, 3);
        assert_eq!(config.route.style, Style::HighRatedOnly);
    }

    #[test]
    fn test_request_overrides_defaults() {
        let defaults = RouteDefaults {
            stops: 4,
            style: Style::AdventureMix,
            budget_focus: true,
        };

        let request = defaults.request(None, None, None);
        assert_eq!(request.num_stops, 4);
        assert_eq!(request.style, Style::AdventureMix);
        assert!(request.budget_focus);

        // Budget focus from the config can be switched off
        let request = defaults.request(Some(2), Some(Style::Optimized), Some(false));
        assert_eq!(request.num_stops, 2);
        assert_eq!(request.style, Style::Optimized);
        assert!(!request.budget_focus);

        let request = RouteDefaults::default().request(None, None, Some(true));
        assert!(request.budget_focus);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("queries: []");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            data_file: Some(PathBuf::from("specials.json")),
            route: RouteDefaults {
                stops: 5,
                style: Style::HighRatedOnly,
                budget_focus: true,
            },
            default_rating: Some(5),
            theme: ThemeMode::Dark,
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}

// Static context store
//
// Instructions, founders, titles, sites and secondary team rosters that are
// always sent to the model. Loaded once at startup; a missing or malformed
// document stops the process.

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::errors::ConfigError;

/// Bundled context shipped with the binary
const BUILTIN_CONTEXT: &str = include_str!("../../data/context.toml");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaticContext {
    /// Behavioural rules, rendered one bullet each
    pub instructions: Vec<String>,

    #[serde(default)]
    pub founders: Vec<String>,

    #[serde(default)]
    pub titles: Vec<String>,

    /// Links the model may share, in document order
    #[serde(default)]
    pub sites: Vec<Site>,

    /// Other rosters, in document order
    #[serde(default)]
    pub teams: Vec<Team>,

    /// Model reply to the priming turn
    pub acknowledgement: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Site {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Team {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub players: Vec<String>,
    #[serde(default)]
    pub coach: Vec<String>,
}

impl StaticContext {
    /// Load the bundled context, or the file at `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_file(path),
            None => Self::parse(BUILTIN_CONTEXT),
        }
    }

    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Parse and validate a TOML document.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let context: StaticContext = toml::from_str(contents)?;
        context.validate()?;
        Ok(context)
    }

    pub fn team(&self, key: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.key == key)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.instructions.iter().all(|i| i.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "at least one instruction is required".into(),
            ));
        }
        if self.acknowledgement.trim().is_empty() {
            return Err(ConfigError::Validation(
                "acknowledgement must not be empty".into(),
            ));
        }

        let mut names = HashSet::new();
        for site in &self.sites {
            if site.name.trim().is_empty() {
                return Err(ConfigError::Validation("site name must not be empty".into()));
            }
            if !names.insert(site.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate site name '{}'",
                    site.name
                )));
            }
            if !(site.url.starts_with("https://") || site.url.starts_with("http://")) {
                return Err(ConfigError::Validation(format!(
                    "site '{}' has a non-http url '{}'",
                    site.name, site.url
                )));
            }
        }

        let mut keys = HashSet::new();
        for team in &self.teams {
            if !keys.insert(team.key.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate team key '{}'",
                    team.key
                )));
            }
            if team.label.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "team '{}' has an empty label",
                    team.key
                )));
            }
        }

        Ok(())
    }
}

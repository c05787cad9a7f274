use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use regex::RegexSet;
use serde::{Deserialize, Serialize};

use crate::core::Options;

pub const CONFIG_FILE_NAME: &str = ".csscrubrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub remove_all: bool,
    #[serde(default)]
    pub remove_all_but_first: bool,
    /// Regexes matched against comment text; a match removes the comment.
    #[serde(default)]
    pub remove_patterns: Vec<String>,
}

fn default_includes() -> Vec<String> {
    vec![".".to_string()]
}

fn default_ignores() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            includes: default_includes(),
            ignores: default_ignores(),
            remove_all: false,
            remove_all_but_first: false,
            remove_patterns: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern or removal regex is invalid.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Includes without wildcards are literal paths.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        for pattern in &self.remove_patterns {
            regex::Regex::new(pattern).with_context(|| {
                format!("Invalid regex in 'removePatterns': \"{}\"", pattern)
            })?;
        }

        Ok(())
    }

    /// Build filter options. `removePatterns` become the custom predicate.
    pub fn options(&self) -> Result<Options> {
        let mut options = Options {
            remove_all: self.remove_all,
            remove_all_but_first: self.remove_all_but_first,
            ..Options::default()
        };
        if !self.remove_patterns.is_empty() {
            let set = RegexSet::new(&self.remove_patterns)
                .context("Invalid regex in 'removePatterns'")?;
            options = options.with_remove(move |text| set.is_match(text));
        }
        Ok(options)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

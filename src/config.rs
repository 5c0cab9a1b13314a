//! Resolver configuration
//!
//! Bounds for the neighborhood (K primary items, M secondary items each),
//! suggestion sizes, the neutral score for unscored keyword edges, and the
//! schema naming conventions the query ladders probe.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Naming conventions of the academic graph
///
/// Each list is probed in order; the first entry is the preferred spelling.
/// The `*_label_fragment` values drive the label-agnostic fallback variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaProfile {
    pub entity_labels: Vec<String>,
    pub entity_label_fragment: String,
    pub entity_name_property: String,

    pub item_labels: Vec<String>,
    pub item_label_fragment: String,
    pub item_relations: Vec<String>,
    pub item_name_property: String,
    pub item_weight_properties: Vec<String>,

    pub keyword_labels: Vec<String>,
    pub keyword_label_fragment: String,
    pub keyword_relations: Vec<String>,
    pub keyword_name_property: String,
    pub keyword_score_properties: Vec<String>,
}

impl Default for SchemaProfile {
    fn default() -> Self {
        Self {
            entity_labels: vec!["FACULTY".to_string(), "Faculty".to_string()],
            entity_label_fragment: "faculty".to_string(),
            entity_name_property: "name".to_string(),

            item_labels: vec!["PUBLICATION".to_string(), "Publication".to_string()],
            item_label_fragment: "publication".to_string(),
            item_relations: vec!["PUBLISH".to_string(), "AUTHORED".to_string()],
            item_name_property: "title".to_string(),
            item_weight_properties: vec!["numCitations".to_string()],

            keyword_labels: vec!["KEYWORD".to_string(), "Keyword".to_string()],
            keyword_label_fragment: "keyword".to_string(),
            keyword_relations: vec![
                "LABEL_BY".to_string(),
                "TAGGED_BY".to_string(),
                "HAS_KEYWORD".to_string(),
            ],
            keyword_name_property: "name".to_string(),
            keyword_score_properties: vec!["score".to_string(), "weight".to_string()],
        }
    }
}

impl SchemaProfile {
    fn validate(&self) -> ConfigResult<()> {
        let required: [(&str, bool); 9] = [
            ("entity_labels", !self.entity_labels.is_empty()),
            ("entity_name_property", !self.entity_name_property.is_empty()),
            ("item_labels", !self.item_labels.is_empty()),
            ("item_relations", !self.item_relations.is_empty()),
            ("item_name_property", !self.item_name_property.is_empty()),
            ("item_weight_properties", !self.item_weight_properties.is_empty()),
            ("keyword_labels", !self.keyword_labels.is_empty()),
            ("keyword_relations", !self.keyword_relations.is_empty()),
            ("keyword_name_property", !self.keyword_name_property.is_empty()),
        ];
        match required.iter().find(|(_, ok)| !ok) {
            Some((field, _)) => Err(ConfigError::Invalid(format!("schema.{} must not be empty", field))),
            None => Ok(()),
        }
    }
}

/// Resolver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// K: publications per faculty member
    pub primary_limit: usize,
    /// M: keywords per publication
    pub secondary_limit: usize,
    /// Names sampled when resolution fails
    pub sample_size: usize,
    /// Did-you-mean suggestions shown
    pub matching_display: usize,
    /// Generic suggestions shown when nothing matches
    pub generic_display: usize,
    /// Score given to keyword edges that carry none
    pub neutral_score: f64,
    pub schema: SchemaProfile,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            primary_limit: 5,
            secondary_limit: 3,
            sample_size: 10,
            matching_display: 3,
            generic_display: 5,
            neutral_score: 1.0,
            schema: SchemaProfile::default(),
        }
    }
}

impl ResolverConfig {
    /// Parse and validate YAML
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: ResolverConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [
            ("primary_limit", self.primary_limit),
            ("secondary_limit", self.secondary_limit),
            ("sample_size", self.sample_size),
            ("matching_display", self.matching_display),
            ("generic_display", self.generic_display),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{} must be a positive integer", field)));
            }
        }
        if !self.neutral_score.is_finite() {
            return Err(ConfigError::Invalid("neutral_score must be finite".to_string()));
        }
        self.schema.validate()
    }
}

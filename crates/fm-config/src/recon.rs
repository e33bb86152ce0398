use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use fm_types::{ComponentKind, FieldGroup};
use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{ConfigError, ConfigResult};

/// Quality scores keyed by probe name, then component name.
pub type QualityScores = BTreeMap<String, BTreeMap<String, i32>>;

/// Catalogue entry for one component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// How the component's facts are shaped and compared.
    pub kind: ComponentKind,
    /// Identity groups, most specific first. Record tables only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unique_fields: Vec<FieldGroup>,
}

impl ComponentConfig {
    /// A scalar component.
    pub fn scalar() -> Self {
        Self {
            kind: ComponentKind::Scalar,
            unique_fields: Vec::new(),
        }
    }

    /// A flat-list component.
    pub fn flat_list() -> Self {
        Self {
            kind: ComponentKind::FlatList,
            unique_fields: Vec::new(),
        }
    }

    /// A record-table component identified by `unique_fields`.
    pub fn record_table(unique_fields: Vec<FieldGroup>) -> Self {
        Self {
            kind: ComponentKind::RecordTable,
            unique_fields,
        }
    }
}

/// Static configuration for merging and diffing one device's facts.
///
/// Missing keys in a TOML file fall back to [`ReconConfig::default`]; a
/// `[components]` or `[quality]` table present in the file replaces the
/// built-in table wholesale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconConfig {
    /// Quality returned for (probe, component) pairs with no entry.
    pub default_quality: i32,
    /// Fields never used to build a diff identity lookup.
    pub ignored_lookup_fields: BTreeSet<String>,
    /// Fields never compared when diffing two matched records.
    pub ignored_compare_fields: BTreeSet<String>,
    /// Components the diff engine skips entirely.
    pub diff_excluded: BTreeSet<String>,
    /// Device type names stripped from `model_name` values as `(type)`.
    pub device_types: Vec<String>,
    /// Per-probe, per-component trust scores. Higher is more trusted.
    pub quality: QualityScores,
    /// Component catalogue.
    pub components: BTreeMap<String, ComponentConfig>,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            default_quality: defaults::DEFAULT_QUALITY,
            ignored_lookup_fields: defaults::strings(defaults::IGNORED_LOOKUP_FIELDS),
            ignored_compare_fields: defaults::strings(defaults::IGNORED_COMPARE_FIELDS),
            diff_excluded: defaults::strings(defaults::DIFF_EXCLUDED),
            device_types: defaults::DEVICE_TYPES.iter().map(|s| s.to_string()).collect(),
            quality: defaults::quality_scores(),
            components: defaults::components(),
        }
    }
}

impl ReconConfig {
    /// An empty catalogue with the built-in comparison settings.
    ///
    /// Useful for tests and for callers that register components themselves.
    pub fn empty() -> Self {
        Self {
            quality: QualityScores::new(),
            components: BTreeMap::new(),
            ..Default::default()
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            components = config.components.len(),
            probes = config.quality.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Render the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check catalogue consistency.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_quality <= 0 {
            return Err(ConfigError::InvalidDefaultQuality(self.default_quality));
        }
        for (name, component) in &self.components {
            match component.kind {
                ComponentKind::RecordTable if component.unique_fields.is_empty() => {
                    return Err(ConfigError::MissingUniqueFields(name.clone()));
                }
                ComponentKind::Scalar | ComponentKind::FlatList
                    if !component.unique_fields.is_empty() =>
                {
                    return Err(ConfigError::UnexpectedUniqueFields {
                        component: name.clone(),
                        kind: component.kind.to_string(),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Register or replace a component.
    pub fn with_component(mut self, name: impl Into<String>, component: ComponentConfig) -> Self {
        self.components.insert(name.into(), component);
        self
    }

    /// Set the quality of `probe` for `component`.
    pub fn with_quality(
        mut self,
        probe: impl Into<String>,
        component: impl Into<String>,
        quality: i32,
    ) -> Self {
        self.quality
            .entry(probe.into())
            .or_default()
            .insert(component.into(), quality);
        self
    }

    /// The configured kind of `component`, if catalogued.
    pub fn kind_of(&self, component: &str) -> Option<ComponentKind> {
        self.components.get(component).map(|c| c.kind)
    }

    /// The unique field groups of `component`; empty when not a record table.
    pub fn unique_fields(&self, component: &str) -> &[FieldGroup] {
        self.components
            .get(component)
            .map(|c| c.unique_fields.as_slice())
            .unwrap_or(&[])
    }

    /// Names of all record-table components.
    pub fn record_tables(&self) -> impl Iterator<Item = &str> {
        self.components
            .iter()
            .filter(|(_, c)| c.kind == ComponentKind::RecordTable)
            .map(|(name, _)| name.as_str())
    }

    /// Returns `true` if the diff engine skips `component`.
    pub fn is_diff_excluded(&self, component: &str) -> bool {
        self.diff_excluded.contains(component)
    }
}

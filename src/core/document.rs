use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Name of the root table that owns every section in the settings file.
/// All instances of the application read and write under this one tag.
pub const ROOT_TAG: &str = "shared-settings";

const VERSION_KEY: &str = "version";

/// One named settings section. The payload is an opaque TOML table; the
/// store locates sections by name but never interprets what is inside.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    name: String,
    values: toml::Table,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: toml::Table::new(),
        }
    }

    pub fn with_values(name: impl Into<String>, values: toml::Table) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Builds a section from any serializable settings struct.
    pub fn from_serialize<T: Serialize>(name: impl Into<String>, value: &T) -> Result<Self> {
        let values =
            toml::Table::try_from(value).context("Failed to serialize section contents")?;
        Ok(Self {
            name: name.into(),
            values,
        })
    }

    /// Maps the section contents back onto a typed settings struct.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        self.values
            .clone()
            .try_into()
            .context("Failed to deserialize section contents")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &toml::Table {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut toml::Table {
        &mut self.values
    }

    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<toml::Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// In-memory form of the on-disk settings document: the version stamp of
/// the build that last wrote it, plus the sections keyed by name. The map
/// keying guarantees at most one section per distinct name.
#[derive(Debug, Clone, Default)]
pub struct SettingsDocument {
    path: PathBuf,
    version: Option<String>,
    sections: BTreeMap<String, toml::Table>,
}

impl SettingsDocument {
    /// Parses the serialized document. The file must carry the fixed root
    /// table; anything else is malformed and the caller decides what a
    /// malformed file degrades to.
    pub(crate) fn parse(text: &str) -> Result<Self> {
        let mut outer: toml::Table =
            toml::from_str(text).context("Failed to parse settings document")?;

        let root = match outer.remove(ROOT_TAG) {
            Some(toml::Value::Table(root)) => root,
            _ => anyhow::bail!("Settings document has no [{ROOT_TAG}] root table"),
        };

        let mut version = None;
        let mut sections = BTreeMap::new();
        for (name, value) in root {
            match value {
                toml::Value::String(stamp) if name == VERSION_KEY => version = Some(stamp),
                // The version key is reserved for the stamp; a table under
                // that name is not addressable as a section.
                toml::Value::Table(values) if name != VERSION_KEY => {
                    sections.insert(name, values);
                }
                // A root entry that is neither the version stamp nor a table
                // cannot be addressed as a section; drop it instead of
                // treating the whole document as corrupt.
                _ => {}
            }
        }

        Ok(Self {
            path: PathBuf::new(),
            version,
            sections,
        })
    }

    pub(crate) fn to_toml_string(&self) -> Result<String> {
        let mut root = toml::Table::new();
        for (name, values) in &self.sections {
            root.insert(name.clone(), toml::Value::Table(values.clone()));
        }
        // Inserted last so a section abusing the reserved name can never
        // shadow the stamp.
        if let Some(stamp) = &self.version {
            root.insert(
                VERSION_KEY.to_string(),
                toml::Value::String(stamp.clone()),
            );
        }

        let mut outer = toml::Table::new();
        outer.insert(ROOT_TAG.to_string(), toml::Value::Table(root));
        toml::to_string_pretty(&outer).context("Failed to serialize settings document")
    }

    pub(crate) fn set_path(&mut self, path: &Path) {
        self.path = path.to_path_buf();
    }

    /// Path this document was loaded from (empty for a document that never
    /// touched disk).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the section with the given name, or a fresh empty section if
    /// none is stored. Callers always get a usable payload back.
    pub fn section(&self, name: &str) -> Section {
        match self.sections.get(name) {
            Some(values) => Section::with_values(name, values.clone()),
            None => Section::new(name),
        }
    }

    pub fn contains_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Replaces the section with the same name, or inserts it as a new one.
    pub fn replace_section(&mut self, section: Section) {
        self.sections.insert(section.name, section.values);
    }

    /// Removes a section outright. Returns whether it was present.
    pub fn remove_section(&mut self, name: &str) -> bool {
        self.sections.remove(name).is_some()
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub(crate) fn set_version_stamp(&mut self, stamp: String) {
        self.version = Some(stamp);
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

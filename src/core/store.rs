use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::document::{Section, SettingsDocument};
use crate::core::version;
use crate::sync::lock;

/// Lock name shared by every instance of the application. The hex suffix
/// keeps the lock file from colliding with other tools in the same temp
/// directory. Must stay identical across releases, or old and new builds
/// would stop excluding each other.
const SETTINGS_LOCK_NAME: &str = "shared-settings-8f41c2d7";

/// Store for one settings file. Each instance is parameterized by its path
/// and lock name, so independent stores (in tests, mostly) can coexist
/// without contending for the same lock.
///
/// The store caches nothing: `load` reads the file fresh every call, and
/// every write re-reads the file before touching it. That re-read is what
/// keeps two application instances from clobbering each other's unrelated
/// sections — the later writer picks up whatever the earlier one saved.
pub struct SettingsStore {
    settings_path: PathBuf,
    lock_name: String,
}

impl SettingsStore {
    pub fn new(settings_path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: settings_path.into(),
            lock_name: SETTINGS_LOCK_NAME.to_string(),
        }
    }

    /// Store with a caller-chosen lock name instead of the application-wide
    /// one.
    pub fn with_lock_name(
        settings_path: impl Into<PathBuf>,
        lock_name: impl Into<String>,
    ) -> Self {
        Self {
            settings_path: settings_path.into(),
            lock_name: lock_name.into(),
        }
    }

    /// Re-reads the document, applies `mutator`, and persists the result,
    /// all under the cross-process lock. This is the general primitive that
    /// `save_section` specializes.
    ///
    /// Read-side failures are absorbed: a missing file starts a fresh
    /// document (creating the parent directory if needed) and a malformed
    /// file is replaced by a fresh document. The version stamp is rewritten
    /// before the mutator runs, so a persisted document is never stamped
    /// stale relative to the build that wrote it. Write-side failures are
    /// the caller's problem and propagate.
    ///
    /// The mutator runs while the lock is held and must not call back into
    /// store operations; the lock is not reentrant.
    pub fn update<F>(&self, mutator: F) -> Result<()>
    where
        F: FnOnce(&mut SettingsDocument),
    {
        let _guard = lock::acquire(&self.lock_name)?;

        let mut doc = match fs::read_to_string(&self.settings_path) {
            Ok(text) => SettingsDocument::parse(&text).unwrap_or_default(),
            Err(_) => {
                // First write to this path; the parent directory may not
                // exist yet.
                if let Some(parent) = self.settings_path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    fs::create_dir_all(parent)
                        .context("Failed to create settings directory")?;
                }
                SettingsDocument::default()
            }
        };
        doc.set_path(&self.settings_path);

        doc.set_version_stamp(version::build_identity());
        mutator(&mut doc);

        let text = doc.to_toml_string()?;
        fs::write(&self.settings_path, text).context("Failed to write settings file")?;
        Ok(())
    }

    fn read_document(&self) -> SettingsDocument {
        let mut doc = match fs::read_to_string(&self.settings_path) {
            Ok(text) => SettingsDocument::parse(&text).unwrap_or_default(),
            Err(_) => SettingsDocument::default(),
        };
        doc.set_path(&self.settings_path);
        doc
    }
}

/// The `SettingsProvider` trait defines the public interface for loading
/// and saving settings sections.
///
/// Collaborators that derive section payloads (an options page, a session
/// tracker) depend on this trait rather than on the concrete store.
pub trait SettingsProvider {
    /// Loads the settings file from disk, under the cross-process lock.
    ///
    /// Never fails for document problems: a missing, unreadable or
    /// malformed file degrades to an empty document, so a fresh install
    /// and a corrupted file behave identically. The only error source is
    /// the lock machinery itself.
    fn load(&self) -> Result<SettingsDocument>;

    /// Persists one section, replacing any stored section with the same
    /// name and leaving every other section untouched.
    fn save_section(&self, section: Section) -> Result<()>;

    fn settings_path(&self) -> &Path;
}

impl SettingsProvider for SettingsStore {
    fn load(&self) -> Result<SettingsDocument> {
        let _guard = lock::acquire(&self.lock_name)?;
        Ok(self.read_document())
    }

    fn save_section(&self, section: Section) -> Result<()> {
        self.update(|doc| doc.replace_section(section))
    }

    fn settings_path(&self) -> &Path {
        &self.settings_path
    }
}

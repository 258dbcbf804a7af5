use serde::{Deserialize, Serialize};
use shared_settings::core::document::Section;
use shared_settings::core::store::{SettingsProvider, SettingsStore};
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct WindowSettings {
    width: u32,
    height: u32,
    maximized: bool,
}

fn setup_store(lock_name: &str) -> (TempDir, SettingsStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = SettingsStore::with_lock_name(dir.path().join("settings.toml"), lock_name);
    (dir, store)
}

#[test]
fn test_typed_settings_workflow() {
    let (td, store) = setup_store("sst-it-workflow");

    // 1. A collaborator derives a settings payload and saves it as a section
    let window = WindowSettings {
        width: 1280,
        height: 720,
        maximized: false,
    };
    let section = Section::from_serialize("window", &window).unwrap();
    store.save_section(section).unwrap();

    // 2. A second store on the same path stands in for a fresh instance
    let second_instance =
        SettingsStore::with_lock_name(td.path().join("settings.toml"), "sst-it-workflow");
    let doc = second_instance.load().unwrap();
    assert_eq!(doc.path(), td.path().join("settings.toml"));

    // 3. The payload survives the round trip as a typed struct
    let reloaded: WindowSettings = doc.section("window").deserialize().unwrap();
    assert_eq!(reloaded, window, "Window settings should survive a reload");

    // 4. The second instance updates an unrelated section via the general mutator
    second_instance
        .update(|doc| {
            let mut session = doc.section("session");
            session.set("open_files", vec!["main.rs"]);
            doc.replace_section(session);
        })
        .unwrap();

    // 5. Both sections are present afterwards
    let doc = store.load().unwrap();
    assert!(doc.contains_section("window"), "Unrelated update lost the window section");
    assert!(doc.contains_section("session"), "Updated section was not persisted");

    // 6. The raw file carries the fixed root table and a version stamp
    let text = fs::read_to_string(td.path().join("settings.toml")).unwrap();
    assert!(text.contains("[shared-settings]"), "Root table missing from the file");
    assert!(text.contains("version = "), "Version stamp missing from the file");
}

#[test]
fn test_recovery_from_manual_corruption() {
    let (td, store) = setup_store("sst-it-corruption");

    let mut section = Section::new("editor");
    section.set("tab_width", 4);
    store.save_section(section).unwrap();

    // Someone hand-edits the file into garbage.
    fs::write(td.path().join("settings.toml"), ">>> broken <<<").unwrap();

    // Loading behaves like a clean install rather than failing.
    let doc = store.load().unwrap();
    assert!(doc.is_empty(), "Corrupt file should read as an empty document");

    // The next save starts over and persists normally.
    let mut section = Section::new("editor");
    section.set("tab_width", 2);
    store.save_section(section).unwrap();

    let doc = store.load().unwrap();
    assert_eq!(
        doc.section("editor").get("tab_width").and_then(|v| v.as_integer()),
        Some(2)
    );
}

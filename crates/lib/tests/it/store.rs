//! Engine persistence and revision conflicts.

use std::sync::Arc;

use bazaar::store::{Collection, Database, InMemory};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Note {
    text: String,
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let store = Arc::new(InMemory::new());
    let notes: Collection<Note> = Collection::new(store.clone(), "notes");
    let id = notes
        .insert(&Note {
            text: "remember".to_string(),
        })
        .unwrap();
    store.save_to_file(&path).unwrap();

    let reloaded = Arc::new(InMemory::load_from_file(&path).unwrap());
    let notes: Collection<Note> = Collection::new(reloaded, "notes");
    let stored = notes.get(&id).unwrap();
    assert_eq!(stored.doc.text, "remember");
    assert_eq!(stored.rev, 1);
}

#[test]
fn missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = InMemory::load_from_file(dir.path().join("absent.json")).unwrap();
    assert!(store.scan("anything").unwrap().is_empty());
}

#[test]
fn replace_bumps_revision_and_detects_races() {
    let store = Arc::new(InMemory::new());
    let notes: Collection<Note> = Collection::new(store, "notes");
    let id = notes
        .insert(&Note {
            text: "v1".to_string(),
        })
        .unwrap();

    let mut a = notes.get(&id).unwrap();
    let b = notes.get(&id).unwrap();

    a.doc.text = "v2".to_string();
    assert_eq!(notes.replace(&a).unwrap(), 2);

    // The stale reader loses.
    let err = notes.replace(&b).unwrap_err();
    assert!(err.is_conflict());

    // update_with retries once and wins.
    let updated = notes
        .update_with(&id, |current| {
            let mut note = current.doc.clone();
            note.text.push('!');
            Ok(note)
        })
        .unwrap();
    assert_eq!(updated.doc.text, "v2!");
    assert_eq!(updated.rev, 3);
}

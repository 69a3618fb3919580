use hymnal::HymnRecord;
use hymnal::storage::library::{DEFAULT_RECENT_LIMIT, FAVORITES_KEY, RECENT_KEY};
use hymnal::storage::{JsonFileStore, KeyValueStore, Library, MemoryStore};

fn hymn(n: u32) -> HymnRecord {
    HymnRecord::new(format!("hymn-{n}"), n.to_string(), format!("Hymn {n}"), "Words")
}

fn ids(hymns: &[HymnRecord]) -> Vec<&str> {
    hymns.iter().map(|h| h.id.as_str()).collect()
}

#[test]
fn recents_keep_most_recent_first_up_to_limit() {
    let mut library = Library::new(MemoryStore::new());
    assert_eq!(library.recent_limit(), DEFAULT_RECENT_LIMIT);

    for n in 1..=7 {
        library.add_to_recent(&hymn(n)).unwrap();
    }
    let recent = library.recent().unwrap();
    assert_eq!(ids(&recent), vec!["hymn-7", "hymn-6", "hymn-5", "hymn-4", "hymn-3"]);
}

#[test]
fn revisiting_moves_to_front_without_duplicates() {
    let mut library = Library::new(MemoryStore::new()).with_recent_limit(3);
    library.add_to_recent(&hymn(1)).unwrap();
    library.add_to_recent(&hymn(2)).unwrap();
    let recent = library.add_to_recent(&hymn(1)).unwrap();
    assert_eq!(ids(&recent), vec!["hymn-1", "hymn-2"]);
}

#[test]
fn favorites_toggle_and_persist_order() {
    let mut library = Library::new(MemoryStore::new());
    assert!(library.toggle_favorite(&hymn(3)).unwrap());
    assert!(library.toggle_favorite(&hymn(1)).unwrap());
    assert!(!library.add_favorite(&hymn(3)).unwrap());
    assert_eq!(ids(&library.favorites().unwrap()), vec!["hymn-3", "hymn-1"]);

    assert!(!library.toggle_favorite(&hymn(3)).unwrap());
    assert!(!library.is_favorite("hymn-3").unwrap());
    assert!(!library.remove_favorite("hymn-3").unwrap());
    assert!(library.remove_favorite("hymn-1").unwrap());
    assert!(library.favorites().unwrap().is_empty());
}

#[test]
fn stored_payloads_use_well_known_keys() {
    let mut library = Library::new(MemoryStore::new());
    library.add_to_recent(&hymn(1)).unwrap();
    library.toggle_favorite(&hymn(2)).unwrap();

    let store = library.into_store();
    let recent: serde_json::Value =
        serde_json::from_str(&store.get(RECENT_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(recent[0]["id"], "hymn-1");
    let favorites: serde_json::Value =
        serde_json::from_str(&store.get(FAVORITES_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(favorites[0]["hymnNumber"], "2");
}

#[test]
fn corrupt_list_reads_as_empty() {
    let mut store = MemoryStore::new();
    store.set(RECENT_KEY, "{not json".to_string()).unwrap();
    let mut library = Library::new(store);
    assert!(library.recent().unwrap().is_empty());

    library.add_to_recent(&hymn(4)).unwrap();
    assert_eq!(ids(&library.recent().unwrap()), vec!["hymn-4"]);
}

#[test]
fn json_file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state").join("library.json");

    {
        let mut library = Library::new(JsonFileStore::open(&path).unwrap());
        library.add_to_recent(&hymn(1)).unwrap();
        library.toggle_favorite(&hymn(9)).unwrap();
    }

    let library = Library::new(JsonFileStore::open(&path).unwrap());
    assert_eq!(ids(&library.recent().unwrap()), vec!["hymn-1"]);
    assert!(library.is_favorite("hymn-9").unwrap());
}

#[test]
fn clear_recent_leaves_favorites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");
    let mut library = Library::new(JsonFileStore::open(&path).unwrap());
    library.add_to_recent(&hymn(1)).unwrap();
    library.toggle_favorite(&hymn(1)).unwrap();
    library.clear_recent().unwrap();

    let reopened = Library::new(JsonFileStore::open(&path).unwrap());
    assert!(reopened.recent().unwrap().is_empty());
    assert!(reopened.is_favorite("hymn-1").unwrap());
}

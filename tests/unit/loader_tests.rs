use hymnal::HymnalError;
use hymnal::test_utils::UnitTestFixture;

#[test]
fn loads_sorted_by_number_and_derives_fields() {
    let fixture = UnitTestFixture::new();
    fixture.create_hymn("10", "Ten", "Author Ten", "1.\nTenth hymn\nChorus:\nRefrain");
    fixture.create_hymn("2", "Two", "Author Two", "Second hymn");
    fixture.create_hymn("2a", "Two A", "Author Two", "Second hymn, alternate");

    let hymnal = fixture.loader().load_hymnal().unwrap();
    let numbers: Vec<_> = hymnal.iter().map(|h| h.hymn_number.as_str()).collect();
    assert_eq!(numbers, vec!["2", "2a", "10"]);

    let ten = hymnal.find("10").unwrap();
    assert_eq!(ten.id, "hymn-10");
    assert_eq!(ten.first_line, "Tenth hymn");
    assert_eq!(ten.chorus.as_deref(), Some("Refrain"));
    assert_eq!(ten.author_name(), Some("Author Ten"));
}

#[test]
fn malformed_and_foreign_files_are_skipped() {
    let fixture = UnitTestFixture::new();
    fixture.create_hymn("1", "One", "A", "First");
    fixture.create_file("hymns/broken.json", "{ not json");
    fixture.create_file("hymns/notes.txt", "not a hymn");

    let hymns = fixture.loader().load_all().unwrap();
    assert_eq!(hymns.len(), 1);
    assert_eq!(hymns[0].title, "One");
}

#[test]
fn missing_author_defaults_to_unknown() {
    let fixture = UnitTestFixture::new();
    fixture.create_file(
        "hymns/hymn_7.json",
        r#"{"hymnNumber": 7, "title": "Seven", "lyrics": "Seventh"}"#,
    );

    let hymns = fixture.loader().load_all().unwrap();
    assert_eq!(hymns[0].hymn_number, "7");
    assert_eq!(hymns[0].author_name(), Some("Unknown"));
}

#[test]
fn save_lyrics_keeps_unknown_fields() {
    let fixture = UnitTestFixture::new();
    fixture.create_file(
        "hymns/hymn_3.json",
        r#"{"hymnNumber": "3", "title": "Three", "lyrics": "Old", "tune": "OLD HUNDREDTH"}"#,
    );

    let loader = fixture.loader();
    let mut record = loader.get_by_id("hymn-3").unwrap().unwrap();
    record.set_lyrics("1.\nNew words");
    let path = loader.save_lyrics(&record).unwrap();

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(saved["lyrics"], "1.\nNew words");
    assert_eq!(saved["tune"], "OLD HUNDREDTH");

    let reloaded = loader.get_by_id("hymn-3").unwrap().unwrap();
    assert_eq!(reloaded.first_line, "New words");
}

#[test]
fn save_without_directory_fails() {
    let fixture = UnitTestFixture::new();
    fixture.create_hymn("1", "One", "A", "First");
    let mut record = fixture.loader().get_by_id("hymn-1").unwrap().unwrap();
    record.set_lyrics("Changed");

    let missing = hymnal::hymns::HymnLoader::new(fixture.data_path.join("elsewhere"));
    assert!(matches!(
        missing.save_lyrics(&record),
        Err(HymnalError::HymnsDirMissing(_))
    ));
}

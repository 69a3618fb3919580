use hymnal::search::{SearchOptions, SearchType, filter_hymns};
use hymnal::HymnRecord;

fn scenario() -> Vec<HymnRecord> {
    vec![
        HymnRecord::new(
            "hymn-1",
            "1",
            "Amazing Grace",
            "Amazing grace! How sweet the sound\nThat saved a wretch like me!",
        )
        .with_author("John Newton"),
        HymnRecord::new(
            "hymn-2",
            "2",
            "How Great Thou Art",
            "O Lord my God, when I in awesome wonder",
        ),
    ]
}

fn ids<'a>(hits: &[&'a HymnRecord]) -> Vec<&'a str> {
    hits.iter().map(|h| h.id.as_str()).collect()
}

#[test]
fn two_record_scenario() {
    let records = scenario();

    assert!(filter_hymns(&records, "355", &SearchOptions::default()).is_empty());

    let title = SearchOptions::default()
        .with_type(SearchType::Title)
        .with_threshold(70);
    assert_eq!(ids(&filter_hymns(&records, "amazing", &title)), vec!["hymn-1"]);

    let newton = SearchOptions::default().with_author("newton");
    assert_eq!(ids(&filter_hymns(&records, "", &newton)), vec!["hymn-1"]);
}

#[test]
fn empty_query_returns_input_unchanged() {
    let records = scenario();
    let hits = filter_hymns(&records, "", &SearchOptions::default());
    assert_eq!(ids(&hits), vec!["hymn-1", "hymn-2"]);
}

#[test]
fn number_suffix_rules() {
    let records = vec![HymnRecord::new("abide", "355a", "Abide With Me", "Abide with me")];
    let options = SearchOptions::default();
    assert_eq!(filter_hymns(&records, "355a", &options).len(), 1);
    assert_eq!(filter_hymns(&records, "355", &options).len(), 1);
    assert!(filter_hymns(&records, "355b", &options).is_empty());
    assert!(filter_hymns(&records, "356", &options).is_empty());
}

#[test]
fn malformed_numbers_never_match() {
    let records = vec![
        HymnRecord::new("odd", "12-b", "Odd", "Words"),
        HymnRecord::new("huge", "99999999999999999999999", "Huge", "Words"),
    ];
    let number = SearchOptions::default().with_type(SearchType::Number);
    assert!(filter_hymns(&records, "12", &number).is_empty());
    assert!(filter_hymns(&records, "99999999999999999999999", &number).is_empty());
}

#[test]
fn punctuation_is_ignored() {
    let records = scenario();
    let title = SearchOptions::default()
        .with_type(SearchType::Title)
        .with_threshold(70);
    assert_eq!(ids(&filter_hymns(&records, "Amazing-Grace", &title)), vec!["hymn-1"]);
    assert_eq!(ids(&filter_hymns(&records, "how great, thou art!", &title)), vec!["hymn-2"]);
}

#[test]
fn author_filter_excludes_text_matches() {
    let mut records = scenario();
    records.push(
        HymnRecord::new("wesley", "3", "Grace Abounding", "Amazing love, how can it be")
            .with_author("Charles Wesley"),
    );
    records.push(HymnRecord::new("anon", "4", "Amazing Mercy", "Amazing mercy"));

    let options = SearchOptions::default().with_author("Newton");
    assert_eq!(ids(&filter_hymns(&records, "amazing", &options)), vec!["hymn-1"]);
}

#[test]
fn category_filter_requires_a_category() {
    let records = vec![
        HymnRecord::new("a", "1", "One", "Words").with_category("Advent"),
        HymnRecord::new("b", "2", "Two", "Words"),
    ];
    let options = SearchOptions::default().with_category("ADVENT");
    assert_eq!(ids(&filter_hymns(&records, "", &options)), vec!["a"]);
}

#[test]
fn upper_and_lower_case_queries_agree() {
    let records = scenario();
    for search_type in [
        SearchType::All,
        SearchType::Title,
        SearchType::Lyrics,
        SearchType::FirstLine,
    ] {
        let options = SearchOptions::default().with_type(search_type);
        assert_eq!(
            ids(&filter_hymns(&records, "AMAZING", &options)),
            ids(&filter_hymns(&records, "amazing", &options)),
            "{search_type}"
        );
    }
}

#[test]
fn empty_fields_never_match() {
    let records = vec![HymnRecord::new("blank", "5", "", "")];
    let options = SearchOptions::default().with_threshold(0);
    assert!(filter_hymns(&records, "grace", &options).is_empty());
}

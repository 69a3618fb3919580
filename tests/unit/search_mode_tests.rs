use hymnal::search::{RankedIndex, SearchMode, SearchOptions, SearchType, search, search_in_mode};
use hymnal::test_utils::UnitTestFixture;

fn fixture() -> UnitTestFixture {
    let fixture = UnitTestFixture::new();
    fixture.create_hymn(
        "1",
        "Amazing Grace",
        "John Newton",
        "1.\nAmazing grace! How sweet the sound\nThat saved a wretch like me!",
    );
    fixture.create_hymn(
        "2",
        "Holy, Holy, Holy",
        "Reginald Heber",
        "1.\nHoly, holy, holy! Lord God Almighty!\nEarly in the morning our song shall rise to Thee",
    );
    fixture.create_hymn(
        "3",
        "Be Thou My Vision",
        "Eleanor Hull",
        "1.\nBe Thou my vision, O Lord of my heart",
    );
    fixture.create_hymn(
        "12a",
        "Morning Has Broken",
        "Eleanor Farjeon",
        "1.\nMorning has broken like the first morning",
    );
    fixture
}

#[test]
fn numbers_go_to_the_matcher() {
    let fixture = fixture();
    let hymns = fixture.loader().load_all().unwrap();

    let outcome = search(&hymns, "12", &SearchOptions::default());
    assert_eq!(outcome.mode, SearchMode::Matcher);
    assert_eq!(outcome.hymns()[0].hymn_number, "12a");
    assert!(outcome.hits.iter().all(|hit| hit.score.is_none()));
}

#[test]
fn free_text_is_ranked_best_first() {
    let fixture = fixture();
    let hymns = fixture.loader().load_all().unwrap();

    let outcome = search(&hymns, "holy holy", &SearchOptions::default());
    assert_eq!(outcome.mode, SearchMode::Ranked);
    assert_eq!(outcome.hymns()[0].title, "Holy, Holy, Holy");

    let scores: Vec<f64> = outcome.hits.iter().filter_map(|hit| hit.score).collect();
    assert!(scores.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn ranked_tolerates_typos_the_matcher_rejects() {
    let fixture = fixture();
    let hymns = fixture.loader().load_all().unwrap();
    let options = SearchOptions::default().with_type(SearchType::Title);

    let ranked = search_in_mode(&hymns, "be thou my vison", &options, SearchMode::Ranked);
    assert_eq!(ranked.hymns()[0].title, "Be Thou My Vision");

    let matcher = search_in_mode(&hymns, "bethoumyvison", &options, SearchMode::Matcher);
    assert!(matcher.is_empty());
}

#[test]
fn ranked_applies_author_filter_after_scoring() {
    let fixture = fixture();
    let hymns = fixture.loader().load_all().unwrap();
    let options = SearchOptions::default().with_author("farjeon");

    let outcome = search(&hymns, "morning", &options);
    assert_eq!(outcome.mode, SearchMode::Ranked);
    let titles: Vec<_> = outcome.hymns().iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, vec!["Morning Has Broken"]);
}

#[test]
fn number_type_forces_matcher() {
    let fixture = fixture();
    let hymns = fixture.loader().load_all().unwrap();
    let options = SearchOptions::default().with_type(SearchType::Number);
    assert_eq!(search(&hymns, "grace", &options).mode, SearchMode::Matcher);
    assert!(search(&hymns, "grace", &options).is_empty());
}

#[test]
fn sensitivity_controls_ranked_threshold() {
    let fixture = fixture();
    let hymns = fixture.loader().load_all().unwrap();

    let strict = RankedIndex::new(&hymns, SearchType::Title, 100);
    assert!(strict.search("amazing grase").is_empty());
    assert_eq!(strict.search("amazing grace").len(), 1);

    let loose = RankedIndex::new(&hymns, SearchType::Title, 70);
    assert_eq!(loose.search("amazing grase")[0].hymn.hymn_number, "1");
}

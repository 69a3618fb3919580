use proptest::prelude::*;

use hymnal::HymnRecord;
use hymnal::hymns::HymnNumber;
use hymnal::search::{NormalizedQuery, SearchOptions, SearchType, filter_hymns, normalize, search};

fn arb_hymn() -> impl Strategy<Value = HymnRecord> {
    (
        "[0-9]{1,3}[a-c]?",
        "[A-Za-z ]{0,24}",
        "[A-Za-z ,.!\n]{0,80}",
        prop::option::of("[A-Za-z ]{1,16}"),
    )
        .prop_map(|(number, title, lyrics, author)| {
            let record = HymnRecord::new(format!("hymn-{number}"), number, title, lyrics);
            match author {
                Some(author) => record.with_author(author),
                None => record,
            }
        })
}

fn arb_hymns() -> impl Strategy<Value = Vec<HymnRecord>> {
    prop::collection::vec(arb_hymn(), 0..12)
}

fn arb_search_type() -> impl Strategy<Value = SearchType> {
    prop_oneof![
        Just(SearchType::All),
        Just(SearchType::Title),
        Just(SearchType::Lyrics),
        Just(SearchType::FirstLine),
        Just(SearchType::Number),
    ]
}

fn is_subsequence(hits: &[&HymnRecord], hymns: &[HymnRecord]) -> bool {
    let mut remaining = hymns.iter();
    hits.iter()
        .all(|hit| remaining.any(|hymn| std::ptr::eq(*hit, hymn)))
}

proptest! {
    #[test]
    fn empty_query_is_identity(hymns in arb_hymns(), search_type in arb_search_type(), threshold in 0u8..=100) {
        let options = SearchOptions::default().with_type(search_type).with_threshold(threshold);
        let hits = filter_hymns(&hymns, "", &options);
        prop_assert_eq!(hits.len(), hymns.len());
        prop_assert!(is_subsequence(&hits, &hymns));
    }

    #[test]
    fn matcher_preserves_input_order(hymns in arb_hymns(), query in "[a-z0-9 ]{0,12}", search_type in arb_search_type()) {
        let options = SearchOptions::default().with_type(search_type);
        let hits = filter_hymns(&hymns, &query, &options);
        prop_assert!(is_subsequence(&hits, &hymns));
    }

    #[test]
    fn matcher_is_case_insensitive(hymns in arb_hymns(), query in "[a-z ]{0,12}", search_type in arb_search_type()) {
        let options = SearchOptions::default().with_type(search_type);
        let lower: Vec<_> = filter_hymns(&hymns, &query, &options).iter().map(|h| h.id.clone()).collect();
        let upper: Vec<_> = filter_hymns(&hymns, &query.to_uppercase(), &options).iter().map(|h| h.id.clone()).collect();
        prop_assert_eq!(lower, upper);
    }

    #[test]
    fn threshold_is_monotonic(query in "[a-z]{1,6}( [a-z]{1,6}){0,4}", field in "[a-z]{1,6}( [a-z]{1,6}){0,8}") {
        let q = NormalizedQuery::new(&query);
        let field = normalize(&field);
        prop_assume!(!field.contains(&q.spaced) && !field.contains(&q.joined));

        let percent = q.overlap_percent(&field);
        for threshold in 0u8..=100 {
            prop_assert_eq!(q.matches(&field, threshold), f64::from(threshold) <= percent);
        }
    }

    #[test]
    fn search_is_deterministic(hymns in arb_hymns(), query in "[a-z0-9 ]{0,12}") {
        let options = SearchOptions::default();
        let first: Vec<_> = search(&hymns, &query, &options).hymns().iter().map(|h| h.id.clone()).collect();
        let second: Vec<_> = search(&hymns, &query, &options).hymns().iter().map(|h| h.id.clone()).collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn number_query_without_letter_matches_every_suffix(numeric in 0u64..10_000, letter in "[a-z]") {
        let record = HymnNumber::parse(&format!("{numeric}{letter}")).unwrap();
        let query = HymnNumber::parse_query(&numeric.to_string()).unwrap();
        prop_assert!(record.satisfies(&query));

        let other = HymnNumber::parse_query(&format!("{}{letter}", numeric + 1)).unwrap();
        prop_assert!(!record.satisfies(&other));
    }
}

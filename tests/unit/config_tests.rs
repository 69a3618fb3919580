use std::fs;
use std::path::PathBuf;

use hymnal::config::Config;
use hymnal::search::SearchType;
use hymnal::test_utils::{TestCase, run_table_tests};

fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

fn load_fixture(relative: &str) -> Config {
    let content = fs::read_to_string(fixture_path(relative)).expect("read fixture");
    Config::from_toml_str(&content).expect("parse config")
}

#[test]
fn config_search_from_fixture() -> Result<(), String> {
    let cases = vec![
        TestCase::new(
            "default",
            "tests/fixtures/configs/default.toml",
            (70u8, SearchType::All, true, 5usize),
        ),
        TestCase::new(
            "strict_titles",
            "tests/fixtures/configs/strict_titles.toml",
            (90u8, SearchType::Title, false, 10usize),
        ),
        TestCase::new(
            "partial",
            "tests/fixtures/configs/partial.toml",
            (70u8, SearchType::FirstLine, true, 5usize),
        ),
    ];

    run_table_tests(cases, |relative_path| {
        let config = load_fixture(relative_path);
        (
            config.search.default_threshold,
            config.search.default_type,
            config.search.ranked,
            config.library.recent_limit,
        )
    })
}

#[test]
fn default_fixture_matches_builtin_defaults() {
    assert_eq!(load_fixture("tests/fixtures/configs/default.toml"), Config::default());
}

#[test]
fn fixture_round_trips_through_toml() {
    let config = load_fixture("tests/fixtures/configs/strict_titles.toml");
    let rendered = config.to_toml_string().unwrap();
    assert_eq!(Config::from_toml_str(&rendered).unwrap(), config);
}

#[test]
fn project_config_is_read_from_root() {
    let dir = tempfile::tempdir().unwrap();
    fs::copy(
        fixture_path("tests/fixtures/configs/strict_titles.toml"),
        dir.path().join("config.toml"),
    )
    .unwrap();

    let config = Config::load(Some(&dir.path().join("config.toml")), dir.path()).unwrap();
    assert_eq!(config.search.default_type, SearchType::Title);
    assert_eq!(config.search_options().fuzzy_threshold, 90);
}

#[test]
fn unknown_keys_are_ignored() {
    let config = Config::from_toml_str("[search]\nlegacy_mode = true\n").unwrap();
    assert_eq!(config, Config::default());
}

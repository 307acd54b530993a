//! Shared helpers for the integration tests

use notion_md::SnapshotSource;
use std::path::PathBuf;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn load_snapshot(name: &str) -> SnapshotSource {
    SnapshotSource::from_path(fixture_path(name))
        .unwrap_or_else(|err| panic!("failed to load fixture {name}: {err}"))
}

pub fn load_expected(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|err| panic!("failed to read fixture {name}: {err}"))
        .trim_end_matches('\n')
        .to_string()
}

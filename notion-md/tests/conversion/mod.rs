//! End-to-end conversion tests
//!
//! Snapshots in tests/fixtures are replayed through `SnapshotSource`.

mod kitchensink;
mod pagination;
mod transformers;

use assert_fs::TempDir;
use assert_fs::fixture::ChildPath;
use assert_fs::prelude::*;
use std::path::Path;

/// Seconds since the epoch for 2021-01-01T00:00:00Z.
pub const NEW_YEAR_2021: i64 = 1_609_459_200;

/// Create a media file with a metadata file next to it recording `timestamp`.
pub fn media_with_sidecar(temp_dir: &TempDir, name: &str, timestamp: &str) -> ChildPath {
    let media = temp_dir.child(name);
    media.write_str("media").unwrap();
    temp_dir
        .child(format!("{name}.json"))
        .write_str(&format!(
            r#"{{"title": "{name}", "photoTakenTime": {{"timestamp": "{timestamp}", "formatted": ""}}}}"#
        ))
        .unwrap();
    media
}

pub fn modified_seconds(path: &Path) -> i64 {
    let meta = std::fs::metadata(path).unwrap();
    filetime::FileTime::from_last_modification_time(&meta).unix_seconds()
}

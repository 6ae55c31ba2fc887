use serde::Deserialize;
use std::ffi::OsString;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use time::{OffsetDateTime, UtcOffset};

use crate::photostamp_core::error::{PhotostampError, Result};

/// Extension of the metadata files written next to each exported media file (lowercase).
pub const SIDECAR_EXTENSION: &str = "json";

/// Shape of a Takeout metadata file. Only the capture time is read; every other field is ignored.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub photo_taken_time: PhotoTakenTime,
}

#[derive(Deserialize, Debug)]
pub struct PhotoTakenTime {
    /// Seconds since the Unix epoch, encoded as a decimal string.
    pub timestamp: String,
}

/// The moment a photo was taken, in the local offset that applied at that instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureTime(OffsetDateTime);

impl CaptureTime {
    pub fn from_unix_seconds(seconds: i64) -> std::result::Result<Self, time::error::ComponentRange> {
        let utc = OffsetDateTime::from_unix_timestamp(seconds)?;
        Ok(CaptureTime(utc.to_offset(local_offset_at(utc))))
    }

    pub fn unix_seconds(&self) -> i64 {
        self.0.unix_timestamp()
    }

    pub fn as_system_time(&self) -> SystemTime {
        SystemTime::from(self.0)
    }
}

impl std::fmt::Display for CaptureTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Local offset in effect at `at`, falling back to UTC when it cannot be determined.
///
/// On Unix `time` only reads the local offset while the process is single-threaded,
/// so callers running other threads (test harnesses included) always get UTC.
fn local_offset_at(at: OffsetDateTime) -> UtcOffset {
    UtcOffset::local_offset_at(at).unwrap_or_else(|_| {
        log::debug!("Failed to determine local offset, using UTC instead.");
        UtcOffset::UTC
    })
}

/// Check if a file is a metadata sidecar based on its extension.
pub fn is_sidecar(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase() == SIDECAR_EXTENSION)
        .unwrap_or(false)
}

/// Expected sidecar path for a media file: the full file name with `.json` appended.
///
/// Example: "IMG_0001.jpg" -> "IMG_0001.jpg.json"
pub fn sidecar_path_for(media_path: &Path) -> PathBuf {
    let mut path: OsString = media_path.as_os_str().to_owned();
    path.push(".");
    path.push(SIDECAR_EXTENSION);
    PathBuf::from(path)
}

/// Media file a sidecar belongs to: the sidecar path with its extension removed.
pub fn media_path_for(sidecar_path: &Path) -> PathBuf {
    sidecar_path.with_extension("")
}

/// Locate the sidecar for a media file, failing with `NoSidecar` if it does not exist.
pub fn find_sidecar(media_path: &Path) -> Result<PathBuf> {
    let sidecar = sidecar_path_for(media_path);
    if sidecar.is_file() {
        Ok(sidecar)
    } else {
        Err(PhotostampError::NoSidecar(media_path.to_path_buf()))
    }
}

/// Open and decode a sidecar, returning the capture time it records.
pub fn read_capture_time(sidecar_path: &Path) -> Result<CaptureTime> {
    let file = File::open(sidecar_path).map_err(|source| PhotostampError::SidecarOpen {
        path: sidecar_path.to_path_buf(),
        source,
    })?;
    let metadata: Metadata = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        PhotostampError::MetadataDecode {
            path: sidecar_path.to_path_buf(),
            source,
        }
    })?;
    parse_capture_time(sidecar_path, &metadata.photo_taken_time.timestamp)
}

fn parse_capture_time(sidecar_path: &Path, value: &str) -> Result<CaptureTime> {
    let invalid = |reason: String| PhotostampError::InvalidTimestamp {
        path: sidecar_path.to_path_buf(),
        value: value.to_string(),
        reason,
    };
    let seconds: i64 = value.trim().parse().map_err(|e| invalid(format!("{e}")))?;
    CaptureTime::from_unix_seconds(seconds).map_err(|e| invalid(e.to_string()))
}

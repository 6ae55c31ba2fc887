use filetime::FileTime;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::photostamp_core::error::{PhotostampError, Result};
use crate::photostamp_core::sidecar::CaptureTime;

/// Whether this platform lets us set a file's creation time.
pub const CREATION_TIME_SUPPORTED: bool = cfg!(any(windows, target_os = "macos"));

/// Writes creation and modification times to a file.
pub trait TimestampWriter {
    fn write_times(&mut self, path: &Path, time: CaptureTime) -> Result<()>;
}

/// Writes timestamps to the real filesystem.
///
/// By default a file whose creation time cannot be set counts as a failed
/// write. With `mtime_only` the creation time is skipped on such platforms
/// and only the modification time is written.
#[derive(Debug, Default, Clone)]
pub struct FsTimestampWriter {
    pub mtime_only: bool,
}

impl FsTimestampWriter {
    pub fn new(mtime_only: bool) -> Self {
        Self { mtime_only }
    }

    pub fn mtime_only() -> Self {
        Self { mtime_only: true }
    }
}

impl TimestampWriter for FsTimestampWriter {
    fn write_times(&mut self, path: &Path, time: CaptureTime) -> Result<()> {
        let attribute_error = |source: io::Error| PhotostampError::AttributeWrite {
            path: path.to_path_buf(),
            source,
        };
        let system_time = time.as_system_time();

        if CREATION_TIME_SUPPORTED {
            set_created(path, system_time).map_err(attribute_error)?;
        } else if !self.mtime_only {
            return Err(PhotostampError::CreationTimeUnsupported {
                path: path.to_path_buf(),
            });
        } else {
            log::trace!(
                "Creation time not settable here, only updating mtime of {}",
                path.display()
            );
        }

        filetime::set_file_mtime(path, FileTime::from_system_time(system_time))
            .map_err(attribute_error)?;

        log::debug!("Set timestamps of {} to {}", path.display(), time);
        Ok(())
    }
}

#[cfg(windows)]
fn set_created(path: &Path, time: SystemTime) -> io::Result<()> {
    use std::fs::{FileTimes, OpenOptions};
    use std::os::windows::fs::{FileTimesExt, OpenOptionsExt};

    const FILE_WRITE_ATTRIBUTES: u32 = 0x0100;

    let file = OpenOptions::new()
        .access_mode(FILE_WRITE_ATTRIBUTES)
        .open(path)?;
    file.set_times(FileTimes::new().set_created(time))
}

#[cfg(target_os = "macos")]
fn set_created(path: &Path, time: SystemTime) -> io::Result<()> {
    use std::fs::{File, FileTimes};
    use std::os::macos::fs::FileTimesExt;

    let file = File::open(path)?;
    file.set_times(FileTimes::new().set_created(time))
}

#[cfg(not(any(windows, target_os = "macos")))]
fn set_created(_path: &Path, _time: SystemTime) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "creation time cannot be set on this platform",
    ))
}

/// Apply a capture time to each target in order, stopping at the first failure.
///
/// Returns one entry per target that was attempted. Targets after a failed
/// one are left untouched and have no entry.
pub fn apply_capture_time<W: TimestampWriter + ?Sized>(
    writer: &mut W,
    time: CaptureTime,
    targets: &[PathBuf],
) -> Vec<(PathBuf, Result<()>)> {
    let mut attempted = Vec::with_capacity(targets.len());
    for target in targets {
        let result = writer.write_times(target, time);
        let failed = result.is_err();
        attempted.push((target.clone(), result));
        if failed {
            break;
        }
    }
    attempted
}

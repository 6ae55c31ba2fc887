use std::path::{Path, PathBuf};

use crate::photostamp_core::error::{PhotostampError, Result};
use crate::photostamp_core::expand::expand_path;
use crate::photostamp_core::report::{Report, ResultRecord};
use crate::photostamp_core::sidecar::{
    CaptureTime, find_sidecar, is_sidecar, media_path_for, read_capture_time,
};
use crate::photostamp_core::timestamps::{FsTimestampWriter, TimestampWriter, apply_capture_time};

/// Receives progress while a run is in flight.
pub trait RunObserver {
    /// A target file is about to be looked at.
    fn visiting(&mut self, _path: &Path) {}

    /// A record was appended to the report.
    fn recorded(&mut self, _record: &ResultRecord) {}
}

/// Observer that ignores everything.
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

/// What to do with a single target file once its sidecar has been looked at.
enum Resolution {
    /// The file is itself a sidecar; its media file handles it.
    IsSidecar,
    Pair {
        capture_time: CaptureTime,
        targets: [PathBuf; 2],
    },
}

/// Sequential timestamp repair over a list of input paths.
pub struct Pipeline<W: TimestampWriter> {
    writer: W,
    report: Report,
}

impl Pipeline<FsTimestampWriter> {
    pub fn with_fs_writer(mtime_only: bool) -> Self {
        Pipeline::new(FsTimestampWriter::new(mtime_only))
    }
}

impl<W: TimestampWriter> Pipeline<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            report: Report::new(),
        }
    }

    /// Process every input path in order and return the ordered report.
    pub fn run<P: AsRef<Path>>(self, paths: &[P]) -> Vec<ResultRecord> {
        self.run_with_observer(paths, &mut NoopObserver)
    }

    pub fn run_with_observer<P: AsRef<Path>>(
        mut self,
        paths: &[P],
        observer: &mut dyn RunObserver,
    ) -> Vec<ResultRecord> {
        for path in paths {
            let path = path.as_ref();
            log::debug!("Processing input {}", path.display());

            match expand_path(path) {
                Ok(files) => {
                    for file in files {
                        self.process_file(&file, observer);
                    }
                }
                Err(e) => {
                    log::debug!("Skipping input {}: {}", path.display(), e);
                    let record = self.report.record_error(path, &e);
                    observer.recorded(record);
                }
            }
        }

        log::info!("Run complete: {} records", self.report.len());
        self.report.into_records()
    }

    fn process_file(&mut self, target: &Path, observer: &mut dyn RunObserver) {
        observer.visiting(target);

        match resolve(target) {
            Ok(Resolution::IsSidecar) => {
                let media = media_path_for(target);
                if media.is_file() {
                    log::trace!("Skipping metadata file {}", target.display());
                } else {
                    log::warn!(
                        "Metadata file {} has no matching media file, ignoring it",
                        target.display()
                    );
                }
            }
            Ok(Resolution::Pair {
                capture_time,
                targets,
            }) => {
                log::debug!(
                    "Capture time for {} is {} ({}s since epoch)",
                    target.display(),
                    capture_time,
                    capture_time.unix_seconds()
                );
                for (path, result) in apply_capture_time(&mut self.writer, capture_time, &targets) {
                    let record = match result {
                        Ok(()) => self.report.record_updated(&path),
                        Err(e) => {
                            log::debug!("{}", e);
                            self.report.record_error(&path, &e)
                        }
                    };
                    observer.recorded(record);
                }
            }
            Err(e) => {
                // Decode failures are reported against the sidecar, everything else against the target.
                let record_path = match &e {
                    PhotostampError::SidecarOpen { path, .. }
                    | PhotostampError::MetadataDecode { path, .. }
                    | PhotostampError::InvalidTimestamp { path, .. } => path.clone(),
                    _ => target.to_path_buf(),
                };
                log::debug!("{}", e);
                let record = self.report.record_error(&record_path, &e);
                observer.recorded(record);
            }
        }
    }
}

/// Decide how a target file is handled: skipped as a sidecar, or paired with its capture time.
fn resolve(target: &Path) -> Result<Resolution> {
    if is_sidecar(target) {
        return Ok(Resolution::IsSidecar);
    }
    let sidecar = find_sidecar(target)?;
    let capture_time = read_capture_time(&sidecar)?;
    Ok(Resolution::Pair {
        capture_time,
        targets: [target.to_path_buf(), sidecar],
    })
}

/// Run the pipeline against the real filesystem, requiring both creation and modification times.
pub fn run<P: AsRef<Path>>(paths: &[P]) -> Vec<ResultRecord> {
    Pipeline::with_fs_writer(false).run(paths)
}

pub mod cli;
pub mod error;
pub mod expand;
pub mod pipeline;
pub mod report;
pub mod sidecar;
pub mod timestamps;

pub use cli::{Cli, OutputFormat};
pub use error::PhotostampError;
pub use expand::expand_path;
pub use pipeline::{NoopObserver, Pipeline, RunObserver, run};
pub use report::{Outcome, Report, ResultRecord, Summary, format_report};
pub use sidecar::{CaptureTime, Metadata, SIDECAR_EXTENSION, is_sidecar, read_capture_time};
pub use timestamps::{FsTimestampWriter, TimestampWriter, apply_capture_time};

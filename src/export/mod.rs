pub mod request;
pub mod sink;

pub use request::{CropRect, ExportError, ExportRequest, Timing};
pub use sink::{ExportSink, LoggingSink};

//! Destination for export requests.

use crate::export::request::{ExportError, ExportRequest};

/// The backend that performs the actual trim/crop/concat.
pub trait ExportSink {
    fn submit(&mut self, request: ExportRequest) -> Result<(), ExportError>;
}

/// Sink that logs the request payload and keeps the last one.
/// Used by the preview binary, which has no backend attached.
#[derive(Debug, Default)]
pub struct LoggingSink {
    last: Option<ExportRequest>,
}

impl LoggingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&ExportRequest> {
        self.last.as_ref()
    }
}

impl ExportSink for LoggingSink {
    fn submit(&mut self, request: ExportRequest) -> Result<(), ExportError> {
        let payload = request.to_json()?;
        tracing::info!(
            segments = request.timings.len(),
            kept_seconds = request.kept_seconds(),
            %payload,
            "export requested"
        );
        self.last = Some(request);
        Ok(())
    }
}

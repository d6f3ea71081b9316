//! Dispatch entry points: negotiate a format, commit headers, stream a body.
//!
//! Failure asymmetry, by construction: anything that goes wrong before the
//! headers are committed becomes a full HTTP error response (406 for an
//! unrecognized format, 500 when the delegate cannot build a serializer),
//! with the source left completely unconsumed. Anything that goes wrong
//! after commit can only be logged; the partial body already sent stands
//! as-is, and no matching `Content-Length` is tracked or promised.

use std::io::Write;

use tracing::{debug, error, info};

use crate::delegate::RdfLibrary;
use crate::formats::{
    HtmlBindingsEncoder, HtmlGraphEncoder, NQuadsGraphEncoder, TextBindingsEncoder,
};
use crate::http::{PendingResponse, Request, Response};
use crate::model::{GraphStream, QueryResultCursor};
use crate::registry::{is_html_format, is_nquads_format, is_text_format, FormatRegistry};
use crate::negotiate;

/// Default graph format identifier when negotiation yields no candidate.
pub const DEFAULT_GRAPH_FORMAT: &str = "rdfxml";
/// Default bindings format identifier when negotiation yields no candidate.
pub const DEFAULT_RESULTS_FORMAT: &str = "application/sparql-results+xml";

const HTML_MIME: &str = "text/html";
const TEXT_MIME: &str = "text/plain";
const NQUADS_MIME: &str = "text/x-nquads";

/// Log severity for an error page.
#[derive(Debug, Clone, Copy)]
enum Severity {
    Info,
    Error,
}

/// Serves statement streams and binding cursors over HTTP in a negotiated
/// format. The delegate catalogs are enumerated once at construction and
/// read-only afterwards, so one responder can serve concurrent requests.
pub struct Responder<L: RdfLibrary> {
    library: L,
    graph_formats: FormatRegistry,
    result_formats: FormatRegistry,
    default_graph_format: String,
    default_results_format: String,
}

impl<L: RdfLibrary> Responder<L> {
    pub fn new(library: L) -> Self {
        let graph_formats = FormatRegistry::new(library.graph_formats());
        let result_formats = FormatRegistry::new(library.result_formats());
        Self {
            library,
            graph_formats,
            result_formats,
            default_graph_format: DEFAULT_GRAPH_FORMAT.to_string(),
            default_results_format: DEFAULT_RESULTS_FORMAT.to_string(),
        }
    }

    /// Override the graph format used when negotiation yields no candidate.
    pub fn with_default_graph_format(mut self, format: impl Into<String>) -> Self {
        self.default_graph_format = format.into();
        self
    }

    /// Override the bindings format used when negotiation yields no
    /// candidate.
    pub fn with_default_results_format(mut self, format: impl Into<String>) -> Self {
        self.default_results_format = format.into();
        self
    }

    /// Serialize a statement stream to `sink` in the format the request asks
    /// for. The stream is consumed exactly once, by exactly one encoder, and
    /// not at all when the response is an error page.
    pub fn serialize_graph<W: Write>(
        &self,
        request: &Request,
        stream: GraphStream,
        sink: W,
    ) -> Response {
        let requested = negotiate::resolve_requested_format(request, &self.graph_candidates())
            .unwrap_or_else(|| self.default_graph_format.clone());
        debug!(format = %requested, "serializing graph stream");

        if is_html_format(&requested) {
            let mut committed = PendingResponse::new(200)
                .with_header("Content-Type", HTML_MIME)
                .commit(sink);
            match HtmlGraphEncoder::new().encode(stream, &mut committed) {
                Ok(rows) => debug!(rows, "graph table sent"),
                Err(e) => error!("graph serialization failed after headers were sent: {e}"),
            }
            return committed.finish();
        }

        if is_nquads_format(&requested) {
            let mut committed = PendingResponse::new(200)
                .with_header("Content-Type", NQUADS_MIME)
                .commit(sink);
            match NQuadsGraphEncoder::new().encode(stream, &mut committed) {
                Ok(statements) => debug!(statements, "graph stream sent"),
                Err(e) => error!("graph serialization failed after headers were sent: {e}"),
            }
            return committed.finish();
        }

        let Some(descriptor) = self.graph_formats.resolve(&requested) else {
            return error_page(
                Severity::Info,
                406,
                "Result format not supported for graph query type.",
                sink,
            );
        };
        let Some(serializer) = self.library.graph_serializer(descriptor) else {
            return error_page(Severity::Error, 500, "Failed to create serializer.", sink);
        };

        let mut pending = PendingResponse::new(200);
        if let Some(mime_type) = &descriptor.mime_type {
            pending.set_header("Content-Type", mime_type);
        }
        let mut committed = pending.commit(sink);
        if let Err(e) = serializer.serialize(stream, &mut committed) {
            error!("graph serialization failed after headers were sent: {e}");
        }
        committed.finish()
    }

    /// Serialize a cursor of binding rows to `sink` in the format the
    /// request asks for. Same consumption and failure contract as
    /// [`Responder::serialize_graph`].
    pub fn serialize_bindings<W: Write>(
        &self,
        request: &Request,
        cursor: QueryResultCursor,
        sink: W,
    ) -> Response {
        let requested = negotiate::resolve_requested_format(request, &self.result_candidates())
            .unwrap_or_else(|| self.default_results_format.clone());
        debug!(format = %requested, "serializing query results");

        if is_html_format(&requested) {
            let mut committed = PendingResponse::new(200)
                .with_header("Content-Type", HTML_MIME)
                .commit(sink);
            match HtmlBindingsEncoder::new().encode(cursor, &mut committed) {
                Ok(rows) => debug!(rows, "query returned rows"),
                Err(e) => error!("result serialization failed after headers were sent: {e}"),
            }
            return committed.finish();
        }

        if is_text_format(&requested) {
            let mut committed = PendingResponse::new(200)
                .with_header("Content-Type", TEXT_MIME)
                .commit(sink);
            match TextBindingsEncoder::new().encode(cursor, &mut committed) {
                Ok(rows) => debug!(rows, "query returned rows"),
                Err(e) => error!("result serialization failed after headers were sent: {e}"),
            }
            return committed.finish();
        }

        let Some(descriptor) = self.result_formats.resolve(&requested) else {
            return error_page(
                Severity::Info,
                406,
                "Result format not supported for bindings query type.",
                sink,
            );
        };
        let Some(serializer) = self.library.result_serializer(descriptor) else {
            return error_page(Severity::Error, 500, "Failed to create serializer.", sink);
        };

        let mut pending = PendingResponse::new(200);
        if let Some(mime_type) = &descriptor.mime_type {
            pending.set_header("Content-Type", mime_type);
        }
        let mut committed = pending.commit(sink);
        if let Err(e) = serializer.serialize(cursor, &mut committed) {
            error!("result serialization failed after headers were sent: {e}");
        }
        committed.finish()
    }

    /// Media types advertised for graph responses: built-ins first, then the
    /// delegate catalog in registration order.
    fn graph_candidates(&self) -> Vec<String> {
        let mut candidates = vec![HTML_MIME.to_string(), NQUADS_MIME.to_string()];
        candidates.extend(self.graph_formats.mime_types().map(str::to_string));
        candidates
    }

    /// Media types advertised for bindings responses.
    fn result_candidates(&self) -> Vec<String> {
        let mut candidates = vec![HTML_MIME.to_string(), TEXT_MIME.to_string()];
        candidates.extend(self.result_formats.mime_types().map(str::to_string));
        candidates
    }
}

/// Build, commit, and send a diagnostic error response.
fn error_page<W: Write>(severity: Severity, status: u16, message: &str, sink: W) -> Response {
    match severity {
        Severity::Info => info!(status, "{message}"),
        Severity::Error => error!(status, "{message}"),
    }

    let mut committed = PendingResponse::new(status)
        .with_header("Content-Type", TEXT_MIME)
        .commit(sink);
    if let Err(e) = writeln!(committed, "{message}") {
        debug!("failed to send error page body: {e}");
    }
    committed.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delegate::{SerializeGraph, SerializeResults};
    use crate::registry::FormatDescriptor;

    struct EmptyLibrary;

    impl RdfLibrary for EmptyLibrary {
        fn graph_formats(&self) -> Vec<FormatDescriptor> {
            Vec::new()
        }
        fn result_formats(&self) -> Vec<FormatDescriptor> {
            Vec::new()
        }
        fn graph_serializer(&self, _: &FormatDescriptor) -> Option<Box<dyn SerializeGraph>> {
            None
        }
        fn result_serializer(&self, _: &FormatDescriptor) -> Option<Box<dyn SerializeResults>> {
            None
        }
    }

    #[test]
    fn test_builtin_shadow_catalog_entries() {
        // A catalog entry named "html" must not win over the built-in table
        // encoder.
        struct ShadowLibrary;
        impl RdfLibrary for ShadowLibrary {
            fn graph_formats(&self) -> Vec<FormatDescriptor> {
                vec![FormatDescriptor::new(
                    "html",
                    None,
                    Some("application/xhtml+xml".to_string()),
                )]
            }
            fn result_formats(&self) -> Vec<FormatDescriptor> {
                Vec::new()
            }
            fn graph_serializer(&self, _: &FormatDescriptor) -> Option<Box<dyn SerializeGraph>> {
                None
            }
            fn result_serializer(
                &self,
                _: &FormatDescriptor,
            ) -> Option<Box<dyn SerializeResults>> {
                None
            }
        }

        let responder = Responder::new(ShadowLibrary);
        let request = Request::new("GET", "/data").with_query_param("format", "html");
        let mut wire = Vec::new();
        let response =
            responder.serialize_graph(&request, GraphStream::from_statements(Vec::new()), &mut wire);

        assert_eq!(response.status(), 200);
        assert_eq!(response.header("Content-Type"), Some(HTML_MIME));
        assert!(String::from_utf8(wire).unwrap().contains("<table"));
    }

    #[test]
    fn test_error_page_has_diagnostic_body() {
        let responder = Responder::new(EmptyLibrary);
        let request = Request::new("GET", "/data").with_query_param("format", "application/bogus");
        let mut wire = Vec::new();
        let response =
            responder.serialize_graph(&request, GraphStream::from_statements(Vec::new()), &mut wire);

        assert_eq!(response.status(), 406);
        let text = String::from_utf8(wire).unwrap();
        assert!(text.starts_with("HTTP/1.1 406 Not Acceptable\r\n"));
        assert!(text.ends_with("Result format not supported for graph query type.\n"));
    }
}

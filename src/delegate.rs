//! Seam to the external RDF serialization library.
//!
//! Every format that is not built in is handed to the library through these
//! traits. The library handle is an explicit dependency of the dispatcher
//! rather than ambient process state, so tests substitute fakes freely.
//! A delegate either produces a complete serialization or reports an opaque
//! failure; once headers are on the wire that failure is log-only.

use std::io::Write;

use crate::model::{GraphStream, QueryResultCursor};
use crate::registry::FormatDescriptor;
use crate::Result;

/// Handle to the external RDF toolkit.
pub trait RdfLibrary {
    /// Formats the library can serialize graphs to, in registration order.
    fn graph_formats(&self) -> Vec<FormatDescriptor>;

    /// Formats the library can serialize query results to, in registration
    /// order.
    fn result_formats(&self) -> Vec<FormatDescriptor>;

    /// Construct a one-shot graph serializer for `format`, or `None` if the
    /// library cannot instantiate one.
    fn graph_serializer(&self, format: &FormatDescriptor) -> Option<Box<dyn SerializeGraph>>;

    /// Construct a one-shot query-result serializer for `format`, or `None`
    /// if the library cannot instantiate one.
    fn result_serializer(&self, format: &FormatDescriptor) -> Option<Box<dyn SerializeResults>>;
}

/// A delegate serializer for a statement stream. Consumes the stream exactly
/// once and writes the complete serialization to `sink`.
pub trait SerializeGraph {
    fn serialize(&self, stream: GraphStream, sink: &mut dyn Write) -> Result<()>;
}

/// A delegate serializer for a cursor of binding rows. Consumes the cursor
/// exactly once and writes the complete serialization to `sink`.
pub trait SerializeResults {
    fn serialize(&self, cursor: QueryResultCursor, sink: &mut dyn Write) -> Result<()>;
}

//! # rdfwire
//!
//! Content-negotiated streaming serialization of RDF data over HTTP.
//!
//! The crate takes a lazy stream of RDF statements (or a cursor of SPARQL
//! binding rows), negotiates an output format against the client's request,
//! commits the response headers exactly once, and then streams the encoded
//! body directly to the transport without materializing the result.
//!
//! Three encoders are built in: an XHTML table view, N-Quads, and a
//! tab-separated text view of binding rows. Every other format is handed to
//! an external RDF toolkit through the [`delegate::RdfLibrary`] seam.
//!
//! ## Example
//!
//! ```rust
//! use rdfwire::http::Request;
//! use rdfwire::model::{GraphStream, Statement, Term};
//! use rdfwire::respond::Responder;
//!
//! # struct NoLibrary;
//! # impl rdfwire::delegate::RdfLibrary for NoLibrary {
//! #     fn graph_formats(&self) -> Vec<rdfwire::registry::FormatDescriptor> { Vec::new() }
//! #     fn result_formats(&self) -> Vec<rdfwire::registry::FormatDescriptor> { Vec::new() }
//! #     fn graph_serializer(&self, _: &rdfwire::registry::FormatDescriptor)
//! #         -> Option<Box<dyn rdfwire::delegate::SerializeGraph>> { None }
//! #     fn result_serializer(&self, _: &rdfwire::registry::FormatDescriptor)
//! #         -> Option<Box<dyn rdfwire::delegate::SerializeResults>> { None }
//! # }
//! let responder = Responder::new(NoLibrary);
//! let request = Request::new("GET", "/data").with_query_param("format", "nquads");
//! let stream = GraphStream::from_statements(vec![Statement::new(
//!     Term::resource("http://example.org/s"),
//!     Term::resource("http://example.org/p"),
//!     Term::literal("o"),
//! )]);
//!
//! let mut body = Vec::new();
//! let response = responder.serialize_graph(&request, stream, &mut body);
//! assert_eq!(response.status(), 200);
//! ```

pub mod delegate;
pub mod formats;
pub mod http;
pub mod model;
pub mod negotiate;
pub mod registry;
pub mod respond;

pub use http::{Request, Response};
pub use model::{BindingRow, GraphStream, QueryResultCursor, Statement, Term};
pub use registry::{FormatDescriptor, FormatRegistry};
pub use respond::Responder;

/// Core error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// A term kind that has no lexical form in the target syntax.
    #[error("term kind not serializable: {0}")]
    UnsupportedTerm(String),
    /// The body sink failed; the encoder stops consuming its source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The delegate library reported an opaque serialization failure.
    #[error("delegate serializer failed: {0}")]
    Serializer(String),
}

/// Result type alias for serialization operations.
pub type Result<T> = std::result::Result<T, WireError>;

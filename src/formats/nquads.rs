//! Streaming N-Quads graph encoder.
//!
//! One line per statement, single pass, O(1) memory per statement. Each
//! record is staged in a small reusable buffer so that a term failure aborts
//! only that record: nothing partial reaches the sink and the stream
//! continues with the next statement. Sink failures abort the whole encode
//! so the source is not drained against a dead transport.

use std::io::Write;

use tracing::warn;

use crate::formats::ntriples::NodeWriter;
use crate::model::{GraphStream, Statement};
use crate::{Result, WireError};

/// Fixed comment preamble identifying the format.
const PREAMBLE: &str = "# This data is in the N-Quads format\n\
                        # http://sw.deri.org/2008/07/n-quads/\n\
                        #\n";

/// Encodes a statement stream as N-Quads.
#[derive(Debug, Clone, Copy, Default)]
pub struct NQuadsGraphEncoder {
    nodes: NodeWriter,
}

impl NQuadsGraphEncoder {
    pub fn new() -> Self {
        Self {
            nodes: NodeWriter::new(),
        }
    }

    /// Consume the stream and write the N-Quads body. Returns the number of
    /// statements written. Statements with a non-serializable term are
    /// logged and skipped.
    pub fn encode<W: Write>(&self, stream: GraphStream, sink: &mut W) -> Result<u64> {
        sink.write_all(PREAMBLE.as_bytes())?;

        let mut record = Vec::with_capacity(256);
        let mut written = 0u64;
        for statement in stream {
            record.clear();
            match self.encode_statement(&statement, &mut record) {
                Ok(()) => {
                    sink.write_all(&record)?;
                    written += 1;
                }
                Err(WireError::UnsupportedTerm(kind)) => {
                    warn!(%kind, "skipping statement with non-serializable term");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(written)
    }

    fn encode_statement(&self, statement: &Statement, record: &mut Vec<u8>) -> Result<()> {
        self.nodes.write_term(Some(&statement.subject), record)?;
        record.push(b' ');
        self.nodes.write_term(Some(&statement.predicate), record)?;
        record.push(b' ');
        self.nodes.write_term(Some(&statement.object), record)?;
        if let Some(context) = &statement.context {
            record.push(b' ');
            self.nodes.write_term(Some(context), record)?;
        }
        record.extend_from_slice(b" .\n");
        Ok(())
    }
}

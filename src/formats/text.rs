//! Tab-separated text encoder for query results.
//!
//! Header line: each variable name prefixed with `?`, tab-joined. Data rows:
//! each bound term in its standalone lexical form (the [`Term`] `Display`
//! impl), tab-joined, with `NULL` for unbound cells.

use std::io::Write;

use crate::model::{QueryResultCursor, Term};
use crate::Result;

/// Renders a cursor of binding rows as plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextBindingsEncoder;

impl TextBindingsEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Consume the cursor and write the text body. Returns the number of
    /// data rows written.
    pub fn encode<W: Write>(&self, cursor: QueryResultCursor, sink: &mut W) -> Result<u64> {
        let variables = cursor.variables().to_vec();

        for (index, name) in variables.iter().enumerate() {
            if index > 0 {
                sink.write_all(b"\t")?;
            }
            write!(sink, "?{name}")?;
        }
        sink.write_all(b"\n")?;

        let mut written = 0u64;
        for row in cursor {
            for index in 0..variables.len() {
                if index > 0 {
                    sink.write_all(b"\t")?;
                }
                match row.get(index) {
                    Some(term) => write_term(sink, term)?,
                    None => sink.write_all(b"NULL")?,
                }
            }
            sink.write_all(b"\n")?;
            written += 1;
        }
        Ok(written)
    }
}

fn write_term<W: Write>(sink: &mut W, term: &Term) -> std::io::Result<()> {
    write!(sink, "{term}")
}

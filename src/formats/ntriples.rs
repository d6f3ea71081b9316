//! N-Triples/N-Quads lexical writer for single terms.
//!
//! The escaping here must match the N-Triples grammar exactly so that any
//! conformant parser round-trips the output: backslash and the delimiting
//! character are escaped, `\n` `\r` `\t` use their short forms, and all other
//! control characters become `\uXXXX`.

use std::io::{self, Write};

use crate::model::Term;
use crate::{Result, WireError};

/// Writes one term in its N-Triples lexical form. Held by the custom
/// encoders as an explicit field rather than reached through shared state.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeWriter;

impl NodeWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write one optional term. A missing term renders as the literal text
    /// `(null)`. Variables have no N-Triples form and fail with
    /// [`WireError::UnsupportedTerm`]; the caller aborts the current record
    /// and moves on to the next.
    pub fn write_term<W: Write>(&self, term: Option<&Term>, sink: &mut W) -> Result<()> {
        let Some(term) = term else {
            sink.write_all(b"(null)").map_err(WireError::Io)?;
            return Ok(());
        };

        match term {
            Term::Literal {
                value,
                language,
                datatype,
            } => {
                sink.write_all(b"\"")?;
                write_escaped(sink, value, '"')?;
                sink.write_all(b"\"")?;
                if let Some(language) = language {
                    write!(sink, "@{language}")?;
                } else if let Some(datatype) = datatype {
                    sink.write_all(b"^^<")?;
                    write_escaped(sink, datatype, '>')?;
                    sink.write_all(b">")?;
                }
            }
            Term::Blank(label) => {
                // Labels are assumed grammar-valid; written verbatim.
                write!(sink, "_:{label}")?;
            }
            Term::Resource(iri) => {
                sink.write_all(b"<")?;
                write_escaped(sink, iri, '>')?;
                sink.write_all(b">")?;
            }
            Term::Variable(name) => {
                return Err(WireError::UnsupportedTerm(format!("variable ?{name}")));
            }
        }
        Ok(())
    }
}

/// Write `s` with N-Triples string escaping, where `delimiter` is the
/// character that terminates the surrounding production (`"` for literals,
/// `>` for IRIs). The delimiter itself is escaped: `"` has a short form,
/// anything else falls back to `\uXXXX`.
pub fn write_escaped<W: Write>(sink: &mut W, s: &str, delimiter: char) -> io::Result<()> {
    let mut utf8 = [0u8; 4];
    for ch in s.chars() {
        match ch {
            '\\' => sink.write_all(b"\\\\")?,
            '\n' => sink.write_all(b"\\n")?,
            '\r' => sink.write_all(b"\\r")?,
            '\t' => sink.write_all(b"\\t")?,
            c if c == delimiter => {
                if c == '"' {
                    sink.write_all(b"\\\"")?;
                } else {
                    write!(sink, "\\u{:04X}", c as u32)?;
                }
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7F => {
                write!(sink, "\\u{:04X}", c as u32)?;
            }
            c => sink.write_all(c.encode_utf8(&mut utf8).as_bytes())?,
        }
    }
    Ok(())
}

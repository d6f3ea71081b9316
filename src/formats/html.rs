//! XHTML table encoders for graphs and query results.
//!
//! Both encoders emit a minimal strict-XHTML document with a single table:
//! one header row, one data row per statement or binding row. Term cells go
//! through XML escaping; unbound cells render as the literal text `NULL`.

use std::io::{self, Write};

use crate::model::{GraphStream, QueryResultCursor, Term};
use crate::Result;

const XHTML_PREAMBLE: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\"\n          \
\"http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd\">\n\
<html xmlns=\"http://www.w3.org/1999/xhtml\">\n\
<head><title>rdfwire</title></head><body>";

const XHTML_POSTAMBLE: &str = "</table></body></html>\n";

/// XML-escape `s` for element content: `&`, `<`, and `>`. Quote characters
/// need no escaping outside attribute values.
fn write_xml_escaped<W: Write>(sink: &mut W, s: &str) -> io::Result<()> {
    let mut utf8 = [0u8; 4];
    for ch in s.chars() {
        match ch {
            '&' => sink.write_all(b"&amp;")?,
            '<' => sink.write_all(b"&lt;")?,
            '>' => sink.write_all(b"&gt;")?,
            c => sink.write_all(c.encode_utf8(&mut utf8).as_bytes())?,
        }
    }
    Ok(())
}

fn write_term_cell<W: Write>(sink: &mut W, term: &Term) -> io::Result<()> {
    write_xml_escaped(sink, &term.to_string())
}

/// Renders a statement stream as an XHTML table.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlGraphEncoder;

impl HtmlGraphEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Consume the stream and write the table body. Returns the number of
    /// rows written.
    pub fn encode<W: Write>(&self, stream: GraphStream, sink: &mut W) -> Result<u64> {
        sink.write_all(XHTML_PREAMBLE.as_bytes())?;
        sink.write_all(
            b"<table class=\"triples\" border=\"1\">\n\
              <tr><th>Subject</th><th>Predicate</th><th>Object</th></tr>\n",
        )?;

        let mut written = 0u64;
        for statement in stream {
            sink.write_all(b"<tr><td>")?;
            write_term_cell(sink, &statement.subject)?;
            sink.write_all(b"</td><td>")?;
            write_term_cell(sink, &statement.predicate)?;
            sink.write_all(b"</td><td>")?;
            write_term_cell(sink, &statement.object)?;
            sink.write_all(b"</td></tr>\n")?;
            written += 1;
        }

        sink.write_all(XHTML_POSTAMBLE.as_bytes())?;
        Ok(written)
    }
}

/// Renders a cursor of binding rows as an XHTML table.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlBindingsEncoder;

impl HtmlBindingsEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Consume the cursor and write the table body. Returns the number of
    /// rows written.
    pub fn encode<W: Write>(&self, cursor: QueryResultCursor, sink: &mut W) -> Result<u64> {
        let variables = cursor.variables().to_vec();

        sink.write_all(XHTML_PREAMBLE.as_bytes())?;
        sink.write_all(b"<table class=\"sparql\" border=\"1\">\n<tr>")?;
        for name in &variables {
            // Known quirk, asserted by test: variable-name header cells are
            // written verbatim, without XML escaping.
            write!(sink, "<th>{name}</th>")?;
        }
        sink.write_all(b"</tr>\n")?;

        let mut written = 0u64;
        for row in cursor {
            sink.write_all(b"<tr>")?;
            for index in 0..variables.len() {
                sink.write_all(b"<td>")?;
                match row.get(index) {
                    Some(term) => write_term_cell(sink, term)?,
                    None => sink.write_all(b"NULL")?,
                }
                sink.write_all(b"</td>")?;
            }
            sink.write_all(b"</tr>\n")?;
            written += 1;
        }

        sink.write_all(XHTML_POSTAMBLE.as_bytes())?;
        Ok(written)
    }
}

//! RDF terms, statements, and the lazy sources consumed by the encoders.
//!
//! [`GraphStream`] and [`QueryResultCursor`] are forward-only, single-consumer
//! sequences: ownership passes to exactly one encoder, which traverses the
//! source at most once. Dropping an unconsumed source never advances it.

use std::fmt;

/// One RDF term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// A resource identified by an IRI.
    Resource(String),
    /// A blank node label, without the `_:` prefix.
    Blank(String),
    /// A literal with an optional language tag or datatype IRI.
    Literal {
        value: String,
        language: Option<String>,
        datatype: Option<String>,
    },
    /// A query variable. Variables have no lexical form in the line-oriented
    /// syntaxes; the N-Triples writer rejects them per record.
    Variable(String),
}

impl Term {
    /// A resource term.
    pub fn resource(iri: impl Into<String>) -> Self {
        Term::Resource(iri.into())
    }

    /// A blank node term.
    pub fn blank(label: impl Into<String>) -> Self {
        Term::Blank(label.into())
    }

    /// A plain literal.
    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            language: None,
            datatype: None,
        }
    }

    /// A language-tagged literal.
    pub fn lang_literal(value: impl Into<String>, language: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            language: Some(language.into()),
            datatype: None,
        }
    }

    /// A datatyped literal.
    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Term::Literal {
            value: value.into(),
            language: None,
            datatype: Some(datatype.into()),
        }
    }
}

/// Standalone lexical form: quoted literal, angle-bracketed IRI, blank node
/// label, or `?name`. This is the self-contained rendering used by the text
/// and HTML table encoders; the N-Quads wire encoding lives in
/// [`crate::formats::ntriples`].
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Resource(iri) => write!(f, "<{iri}>"),
            Term::Blank(label) => write!(f, "_:{label}"),
            Term::Literal {
                value,
                language,
                datatype,
            } => {
                f.write_str("\"")?;
                for ch in value.chars() {
                    match ch {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        c => write!(f, "{c}")?,
                    }
                }
                f.write_str("\"")?;
                if let Some(language) = language {
                    write!(f, "@{language}")?;
                } else if let Some(datatype) = datatype {
                    write!(f, "^^<{datatype}>")?;
                }
                Ok(())
            }
            Term::Variable(name) => write!(f, "?{name}"),
        }
    }
}

/// One RDF statement, with an optional context (named graph) term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
    pub context: Option<Term>,
}

impl Statement {
    /// A statement in the default graph.
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
            context: None,
        }
    }

    /// Attach a context term naming the source graph.
    pub fn with_context(mut self, context: Term) -> Self {
        self.context = Some(context);
        self
    }
}

/// Forward-only stream of statements. Single consumer, exactly-once traversal.
pub struct GraphStream {
    inner: Box<dyn Iterator<Item = Statement>>,
}

impl GraphStream {
    /// Wrap any statement iterator.
    pub fn new(iter: impl Iterator<Item = Statement> + 'static) -> Self {
        Self {
            inner: Box::new(iter),
        }
    }

    /// A stream over an in-memory statement list. Mostly useful in tests and
    /// small handlers; production sources are lazy storage cursors.
    pub fn from_statements(statements: Vec<Statement>) -> Self {
        Self::new(statements.into_iter())
    }
}

impl Iterator for GraphStream {
    type Item = Statement;

    fn next(&mut self) -> Option<Statement> {
        self.inner.next()
    }
}

impl fmt::Debug for GraphStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GraphStream")
    }
}

/// One query solution: each variable index maps to an optional term, where
/// absence means the variable is unbound in this row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingRow {
    cells: Vec<Option<Term>>,
}

impl BindingRow {
    pub fn new(cells: Vec<Option<Term>>) -> Self {
        Self { cells }
    }

    /// The term bound at variable index `index`, if any. Indexes past the end
    /// of the row read as unbound.
    pub fn get(&self, index: usize) -> Option<&Term> {
        self.cells.get(index).and_then(|cell| cell.as_ref())
    }
}

/// A fixed ordered list of variable names plus a forward-only sequence of
/// binding rows. Single consumer, exactly-once traversal.
pub struct QueryResultCursor {
    variables: Vec<String>,
    rows: Box<dyn Iterator<Item = BindingRow>>,
}

impl QueryResultCursor {
    pub fn new(
        variables: Vec<String>,
        rows: impl Iterator<Item = BindingRow> + 'static,
    ) -> Self {
        Self {
            variables,
            rows: Box::new(rows),
        }
    }

    /// Cursor over in-memory rows.
    pub fn from_rows(variables: Vec<String>, rows: Vec<BindingRow>) -> Self {
        Self::new(variables, rows.into_iter())
    }

    /// Variable names, in projection order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }
}

impl Iterator for QueryResultCursor {
    type Item = BindingRow;

    fn next(&mut self) -> Option<BindingRow> {
        self.rows.next()
    }
}

impl fmt::Debug for QueryResultCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryResultCursor")
            .field("variables", &self.variables)
            .finish_non_exhaustive()
    }
}

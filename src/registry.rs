//! Format descriptors and the resolver over the delegate catalog.
//!
//! The catalog is enumerated from the delegate library once at startup and
//! read-only afterwards, so the alias lookup is precomputed here instead of
//! re-scanning three fields per request. Built-in formats are recognized by
//! dedicated predicates checked before catalog resolution, so they shadow any
//! catalog entry that happens to share a name.

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

/// One serialization format advertised by the delegate library: a canonical
/// name, an optional alias URI, and an optional MIME type. Immutable once
/// enumerated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatDescriptor {
    pub name: String,
    pub uri: Option<String>,
    pub mime_type: Option<String>,
}

impl FormatDescriptor {
    pub fn new(
        name: impl Into<String>,
        uri: Option<String>,
        mime_type: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            uri,
            mime_type,
        }
    }
}

/// Requested identifiers that select the built-in XHTML table encoders.
pub fn is_html_format(format: &str) -> bool {
    matches!(format, "html" | "text/html")
}

/// Requested identifiers that select the built-in tab-separated text encoder
/// (bindings only).
pub fn is_text_format(format: &str) -> bool {
    matches!(format, "text" | "text/plain")
}

/// Requested identifiers that select the built-in N-Quads encoder (graphs
/// only).
pub fn is_nquads_format(format: &str) -> bool {
    matches!(format, "nquads" | "text/x-nquads" | "application/n-quads")
}

/// Catalog of delegate formats, in registration order, with a precomputed
/// alias lookup. Built once at process start; safe for concurrent reads.
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    formats: Vec<FormatDescriptor>,
    by_alias: HashMap<String, usize>,
}

impl FormatRegistry {
    /// Build the registry. Every descriptor is reachable under its name,
    /// alias URI, and MIME type. The first registration of an alias wins;
    /// shadowed duplicates are logged and otherwise ignored.
    pub fn new(formats: Vec<FormatDescriptor>) -> Self {
        let mut by_alias: HashMap<String, usize> = HashMap::new();
        for (index, descriptor) in formats.iter().enumerate() {
            let aliases = [
                Some(descriptor.name.as_str()),
                descriptor.uri.as_deref(),
                descriptor.mime_type.as_deref(),
            ];
            for alias in aliases.into_iter().flatten() {
                match by_alias.entry(alias.to_string()) {
                    std::collections::hash_map::Entry::Vacant(entry) => {
                        entry.insert(index);
                    }
                    std::collections::hash_map::Entry::Occupied(entry) => {
                        if *entry.get() != index {
                            warn!(
                                alias,
                                shadowed_by = %formats[*entry.get()].name,
                                "duplicate format alias in catalog; first registration wins"
                            );
                        }
                    }
                }
            }
        }
        Self { formats, by_alias }
    }

    /// Resolve a requested identifier against the catalog: exact,
    /// case-sensitive equality with a descriptor's name, alias URI, or MIME
    /// type, earliest registration first.
    pub fn resolve(&self, requested: &str) -> Option<&FormatDescriptor> {
        self.by_alias
            .get(requested)
            .map(|&index| &self.formats[index])
    }

    /// All descriptors, in registration order.
    pub fn formats(&self) -> &[FormatDescriptor] {
        &self.formats
    }

    /// The MIME types the catalog can serve, for Accept negotiation.
    pub fn mime_types(&self) -> impl Iterator<Item = &str> {
        self.formats
            .iter()
            .filter_map(|descriptor| descriptor.mime_type.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> FormatRegistry {
        FormatRegistry::new(vec![
            FormatDescriptor::new(
                "rdfxml",
                Some("http://www.w3.org/ns/formats/RDF_XML".to_string()),
                Some("application/rdf+xml".to_string()),
            ),
            FormatDescriptor::new(
                "turtle",
                Some("http://www.w3.org/ns/formats/Turtle".to_string()),
                Some("text/turtle".to_string()),
            ),
            FormatDescriptor::new("dot", None, None),
        ])
    }

    #[test]
    fn test_resolve_by_name() {
        let registry = sample_registry();
        assert_eq!(registry.resolve("turtle").unwrap().name, "turtle");
        assert_eq!(registry.resolve("dot").unwrap().name, "dot");
    }

    #[test]
    fn test_resolve_by_uri() {
        let registry = sample_registry();
        assert_eq!(
            registry
                .resolve("http://www.w3.org/ns/formats/RDF_XML")
                .unwrap()
                .name,
            "rdfxml"
        );
    }

    #[test]
    fn test_resolve_by_mime_type() {
        let registry = sample_registry();
        assert_eq!(registry.resolve("text/turtle").unwrap().name, "turtle");
    }

    #[test]
    fn test_resolve_miss_returns_none() {
        let registry = sample_registry();
        assert!(registry.resolve("application/bogus").is_none());
        assert!(registry.resolve("Turtle").is_none()); // case-sensitive
        assert!(registry.resolve("").is_none());
    }

    #[test]
    fn test_duplicate_alias_first_registration_wins() {
        let registry = FormatRegistry::new(vec![
            FormatDescriptor::new("json", None, Some("application/json".to_string())),
            FormatDescriptor::new("json-triples", None, Some("application/json".to_string())),
        ]);
        assert_eq!(registry.resolve("application/json").unwrap().name, "json");
        assert_eq!(registry.resolve("json-triples").unwrap().name, "json-triples");
    }

    #[test]
    fn test_builtin_predicates() {
        assert!(is_html_format("html"));
        assert!(is_html_format("text/html"));
        assert!(!is_html_format("text/HTML"));

        assert!(is_text_format("text"));
        assert!(is_text_format("text/plain"));

        assert!(is_nquads_format("nquads"));
        assert!(is_nquads_format("text/x-nquads"));
        assert!(is_nquads_format("application/n-quads"));
        assert!(!is_nquads_format("application/n-triples"));
    }
}

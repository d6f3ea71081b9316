//! Content negotiation: pick a requested format identifier from the request.
//!
//! An explicit `format` query parameter always wins and is passed through
//! verbatim, even when unsupported, so the dispatcher can answer 406.
//! Otherwise the `Accept` header is parsed into media ranges sorted by
//! quality. The first range matching a candidate wins; a wildcard range
//! means "no preference" and yields `None` so the caller applies its default.
//! If the header names only unsupported non-wildcard types, the highest-q
//! range is propagated verbatim, again leaving the 406 decision to the
//! dispatcher.

use crate::http::Request;

/// Resolve the requested format identifier for this request, given the
/// candidate identifiers the operation can serve. `None` means the caller
/// should fall back to its fixed default.
pub fn resolve_requested_format(request: &Request, candidates: &[String]) -> Option<String> {
    if let Some(format) = request.query_param("format") {
        return Some(format.to_string());
    }

    let accept = request.header("accept")?;
    let ranges = parse_accept_header(accept);

    for (media_type, _quality) in &ranges {
        if media_type == "*/*" || media_type.ends_with("/*") {
            return None;
        }
        if candidates.iter().any(|candidate| candidate == media_type) {
            return Some(media_type.clone());
        }
    }

    // Nothing we serve and no wildcard: surface the client's first choice
    // unchanged rather than silently substituting the default.
    ranges.into_iter().next().map(|(media_type, _)| media_type)
}

/// Parse an Accept header into `(media_type, quality)` pairs, sorted by
/// quality descending. Malformed parts are dropped.
fn parse_accept_header(accept: &str) -> Vec<(String, f32)> {
    let mut types: Vec<(String, f32)> = accept
        .split(',')
        .filter_map(|part| {
            let part = part.trim();
            if part.is_empty() {
                return None;
            }
            let mut segments = part.split(';');
            let media_type = segments.next()?.trim().to_lowercase();

            let quality = segments
                .find_map(|segment| {
                    let segment = segment.trim();
                    segment.strip_prefix("q=")?.parse::<f32>().ok()
                })
                .unwrap_or(1.0);

            Some((media_type, quality))
        })
        .collect();

    types.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    types
}

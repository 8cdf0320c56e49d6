use may_minihttp::Response;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::Mutex;
use tracing::warn;

use crate::context::{Context, CONTENT_TYPE_HTML, CONTENT_TYPE_JSON, CONTENT_TYPE_TEXT};

/// `may_minihttp` stores response headers in a fixed array of this size.
pub const MAX_RESPONSE_HEADERS: usize = 16;

/// Distinct custom header lines kept for the life of the process.
pub const MAX_INTERNED_HEADERS: usize = 1024;

static HEADER_LINES: Lazy<HeaderInterner> =
    Lazy::new(|| HeaderInterner::with_capacity(MAX_INTERNED_HEADERS));

/// Bounded set of `&'static str` header lines.
///
/// `may_minihttp` only accepts `'static` header lines, so every distinct line
/// is leaked once and reused afterwards. Once `capacity` lines exist, new ones
/// are refused instead of leaked.
pub struct HeaderInterner {
    lines: Mutex<HashSet<&'static str>>,
    capacity: usize,
}

impl HeaderInterner {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: Mutex::new(HashSet::new()),
            capacity,
        }
    }

    /// The interned copy of `line`, or `None` when the interner is full.
    pub fn intern(&self, line: &str) -> Option<&'static str> {
        let mut lines = self
            .lines
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(existing) = lines.get(line).copied() {
            return Some(existing);
        }
        if lines.len() >= self.capacity {
            return None;
        }
        let leaked: &'static str = Box::leak(line.to_owned().into_boxed_str());
        lines.insert(leaked);
        Some(leaked)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn status_reason(status: u16) -> &'static str {
    http::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown")
}

fn header_line(name: &str, value: &str) -> Option<&'static str> {
    if name.eq_ignore_ascii_case("content-type") {
        match value {
            CONTENT_TYPE_TEXT => return Some("Content-Type: text/plain; charset=utf-8"),
            CONTENT_TYPE_HTML => return Some("Content-Type: text/html; charset=utf-8"),
            CONTENT_TYPE_JSON => return Some("Content-Type: application/json"),
            _ => {}
        }
    }
    HEADER_LINES.intern(&format!("{name}: {value}"))
}

/// Write the status, headers and body accumulated on `ctx`.
///
/// Headers past [`MAX_RESPONSE_HEADERS`], or new custom lines once the
/// interner is full, are dropped with a warning.
pub fn write_context_response(res: &mut Response, ctx: &Context) {
    let status = ctx.status_code();
    res.status_code(usize::from(status), status_reason(status));

    let headers = ctx.response_headers();
    if headers.len() > MAX_RESPONSE_HEADERS {
        warn!(
            path = %ctx.path,
            header_count = headers.len(),
            max = MAX_RESPONSE_HEADERS,
            "Too many response headers, extra headers dropped"
        );
    }
    for (name, value) in headers.iter().take(MAX_RESPONSE_HEADERS) {
        match header_line(name, value) {
            Some(line) => {
                res.header(line);
            }
            None => warn!(
                path = %ctx.path,
                header = %name,
                "Header line cache full, response header dropped"
            ),
        }
    }
    res.body_vec(ctx.response_body().to_vec());
}

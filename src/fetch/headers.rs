use crate::error::{QgetError, Result};
use crate::types::HeaderSet;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Fixed header triple attached to every outgoing request.
///
/// CORS headers normally live on responses; these go out on the request
/// side, where servers generally ignore them. Sent unconditionally.
pub(crate) const CORS_HEADERS: [(&str, &str); 3] = [
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "GET, POST, OPTIONS"),
    ("access-control-allow-headers", "Authorization, Content-Type, Accept"),
];

/// Build the base header map sent with every GET.
pub(crate) fn base_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (k, v) in CORS_HEADERS {
        headers.insert(
            HeaderName::from_static(k),
            HeaderValue::from_static(v),
        );
    }
    headers
}

/// Merge caller-supplied headers on top of the fixed set.
///
/// Caller values win on name collision. Names and values come from
/// untrusted input (CLI flags, config), so conversion is fallible.
pub(crate) fn apply_extra(headers: &mut HeaderMap, extra: &HeaderSet) -> Result<()> {
    for (k, v) in &extra.0 {
        let name = HeaderName::from_bytes(k.as_bytes())
            .map_err(|e| QgetError::Other(format!("invalid header name {k:?}: {e}")))?;
        let value = HeaderValue::from_str(v)
            .map_err(|e| QgetError::Other(format!("invalid header value for {k:?}: {e}")))?;
        headers.insert(name, value);
    }
    Ok(())
}

//! URI helpers matching the gateway's URL conventions.

/// Force the `https` scheme on a URI advertised by the gateway.
///
/// The gateway sometimes advertises `http:` URLs for resources that are only
/// served over TLS.
pub fn ensure_https(uri: &str) -> String {
    uri.replacen("http:", "https:", 1)
}

/// Append one or more path segments, each separated by `/`.
pub fn append_path(uri: &str, paths: &[&str]) -> String {
    let mut result = uri.to_string();
    for path in paths {
        result.push('/');
        result.push_str(path);
    }
    result
}

/// Build the gateway root resource URI for a host address.
pub fn gateway_root(address: &str) -> String {
    format!("https://{address}/api/rest")
}

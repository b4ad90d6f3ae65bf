//! Redirect targets and query strings

use url::form_urlencoded::byte_serialize;

/// Form-encode a query key or value. `/` stays readable so return paths look
/// like `?redirectTo=/dashboard`.
fn encode(raw: &str) -> String {
    byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace("%2F", "/")
}

/// Append `params` to `path` as a query string.
pub fn with_query(path: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }

    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{path}?{query}")
}

/// Accept a caller-supplied return path only if it stays on this site.
///
/// Rejects absolute URLs and protocol-relative (`//host`, `/\host`) targets.
/// Browsers drop tabs and newlines while parsing a location, so any control
/// character or backslash anywhere in the path is refused as well.
pub fn local_path(candidate: Option<&str>) -> Option<&str> {
    let path = candidate?.trim();
    if !path.starts_with('/') || path.starts_with("//") {
        return None;
    }
    if path.chars().any(|c| c.is_control() || c == '\\') {
        return None;
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_query_keeps_slashes() {
        assert_eq!(
            with_query("/auth/login", &[("redirectTo", "/dashboard")]),
            "/auth/login?redirectTo=/dashboard"
        );
    }

    #[test]
    fn test_with_query_escapes_nested_query() {
        assert_eq!(
            with_query("/auth/signup", &[("redirectTo", "/join?code=AB2C")]),
            "/auth/signup?redirectTo=/join%3Fcode%3DAB2C"
        );
        assert_eq!(
            with_query("/auth/login", &[("message", "Signed out")]),
            "/auth/login?message=Signed+out"
        );
    }

    #[test]
    fn test_with_query_no_params() {
        assert_eq!(with_query("/dashboard", &[]), "/dashboard");
    }

    #[test]
    fn test_local_path() {
        assert_eq!(local_path(Some("/dashboard")), Some("/dashboard"));
        assert_eq!(local_path(Some("https://evil.example")), None);
        assert_eq!(local_path(Some("//evil.example")), None);
        assert_eq!(local_path(Some("/\\evil.example")), None);
        assert_eq!(local_path(None), None);
    }

    #[test]
    fn test_local_path_rejects_hidden_characters() {
        assert_eq!(local_path(Some("/\t/evil.example")), None);
        assert_eq!(local_path(Some("/\n/evil.example")), None);
        assert_eq!(local_path(Some("/a\nb")), None);
        assert_eq!(local_path(Some("/a\\b")), None);
        assert_eq!(local_path(Some("/join?code=AB2C")), Some("/join?code=AB2C"));
    }
}

//! Absolute URL building for pagination links and media assets.

use axum::http::{header, HeaderMap, Uri};
use url::{form_urlencoded, Url};

use service::pagination::Page;

use crate::errors::JsonApiError;

/// Scheme and authority that absolute links should use.
///
/// A configured public base URL wins; otherwise the request `Host` header is used
/// (with `X-Forwarded-Proto` when a proxy set it), defaulting to `localhost`.
pub fn request_origin(public_base_url: Option<&str>, headers: &HeaderMap) -> Result<Url, JsonApiError> {
    if let Some(base) = public_base_url.and_then(|b| Url::parse(b).ok()) {
        return Ok(base);
    }
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .filter(|s| *s == "https" || *s == "http")
        .unwrap_or("http");
    Url::parse(&format!("{scheme}://{host}/"))
        .map_err(|e| JsonApiError::bad_request(format!("invalid Host header: {e}")))
}

/// The request URL on `origin` with `page` rewritten; page 1 drops the parameter.
/// Other query parameters keep their order.
pub fn page_url(origin: &Url, uri: &Uri, page: u64) -> String {
    let kept: Vec<(String, String)> = form_urlencoded::parse(uri.query().unwrap_or_default().as_bytes())
        .filter(|(k, _)| k != "page")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut url = origin.clone();
    url.set_fragment(None);
    url.set_query(None);
    let base_path = origin.path().trim_end_matches('/');
    url.set_path(&format!("{base_path}{}", uri.path()));

    if !kept.is_empty() || page > 1 {
        let mut pairs = url.query_pairs_mut();
        pairs.extend_pairs(kept.iter());
        if page > 1 {
            pairs.append_pair("page", &page.to_string());
        }
    }
    url.into()
}

/// `(next, previous)` links for `page`, relative to the request URI.
pub fn page_links<T>(origin: &Url, uri: &Uri, page: &Page<T>) -> (Option<String>, Option<String>) {
    let next = page.next_page().map(|n| page_url(origin, uri, n));
    let previous = page.previous_page().map(|p| page_url(origin, uri, p));
    (next, previous)
}

/// Absolute URL of a stored asset, or `None` when nothing was uploaded.
/// Each path segment is percent-encoded, so `#`, `?` and `%` stay part of the file name.
pub fn media_url(origin: &Url, url_prefix: &str, path: Option<&str>) -> Option<String> {
    let path = path.map(str::trim).filter(|p| !p.is_empty())?;
    let mut url = origin.clone();
    url.set_query(None);
    url.set_fragment(None);
    {
        let mut segments = url.path_segments_mut().ok()?;
        segments
            .pop_if_empty()
            .extend(url_prefix.split('/').filter(|s| !s.is_empty()))
            .extend(path.split('/').filter(|s| !s.is_empty()));
    }
    Some(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn origin(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn origin_prefers_configured_base() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("internal:8080"));
        let base = request_origin(Some("https://acme.example"), &headers).unwrap();
        assert_eq!(base.as_str(), "https://acme.example/");
        assert_eq!(request_origin(None, &headers).unwrap().as_str(), "http://internal:8080/");
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        assert_eq!(request_origin(None, &headers).unwrap().as_str(), "https://internal:8080/");
        assert_eq!(request_origin(None, &HeaderMap::new()).unwrap().as_str(), "http://localhost/");
    }

    #[test]
    fn page_url_replaces_and_drops_page() {
        let o = origin("http://h");
        let uri: Uri = "/api/projects/?technology=Django&page=2&page_size=5".parse().unwrap();
        assert_eq!(page_url(&o, &uri, 3), "http://h/api/projects/?technology=Django&page_size=5&page=3");
        let uri: Uri = "/api/projects/?page=2&page_size=5".parse().unwrap();
        assert_eq!(page_url(&o, &uri, 1), "http://h/api/projects/?page_size=5");
        let uri: Uri = "/api/projects/?page=2".parse().unwrap();
        assert_eq!(page_url(&o, &uri, 1), "http://h/api/projects/");
        let uri: Uri = "/api/projects/?pages=1".parse().unwrap();
        assert_eq!(page_url(&o, &uri, 1), "http://h/api/projects/?pages=1");
    }

    #[test]
    fn page_url_keeps_encoded_values_and_base_path() {
        let uri: Uri = "/api/projects/?technology=C%2B%2B%20%26%20Rust".parse().unwrap();
        let next = page_url(&origin("https://acme.example/site"), &uri, 2);
        assert_eq!(next, "https://acme.example/site/api/projects/?technology=C%2B%2B+%26+Rust&page=2");
        let parsed = Url::parse(&next).unwrap();
        let tech = parsed.query_pairs().find(|(k, _)| k == "technology").map(|(_, v)| v.into_owned());
        assert_eq!(tech.as_deref(), Some("C++ & Rust"));
    }

    #[test]
    fn links_for_first_and_last_page() {
        let o = origin("http://h");
        let uri: Uri = "/api/projects/?page_size=100".parse().unwrap();
        let first = Page { items: vec![(); 100], count: 150, page: 1, per_page: 100 };
        let (next, prev) = page_links(&o, &uri, &first);
        assert_eq!(next.as_deref(), Some("http://h/api/projects/?page_size=100&page=2"));
        assert_eq!(prev, None);

        let uri: Uri = "/api/projects/?page=2".parse().unwrap();
        let last = Page { items: vec![(); 50], count: 150, page: 2, per_page: 100 };
        let (next, prev) = page_links(&o, &uri, &last);
        assert_eq!(next, None);
        assert_eq!(prev.as_deref(), Some("http://h/api/projects/"));
    }

    #[test]
    fn media_url_is_absolute_or_none() {
        let o = origin("http://h");
        assert_eq!(
            media_url(&o, "/media/", Some("projects/site shot.png")).as_deref(),
            Some("http://h/media/projects/site%20shot.png")
        );
        assert_eq!(media_url(&o, "/media/", Some("")), None);
        assert_eq!(media_url(&o, "/media/", None), None);
    }

    #[test]
    fn media_url_escapes_reserved_characters_in_file_names() {
        let o = origin("http://h");
        for name in ["a#1.png", "100%.png", "q?.png"] {
            let url = media_url(&o, "/media/", Some(&format!("projects/{name}"))).unwrap();
            let parsed = Url::parse(&url).unwrap();
            assert_eq!(parsed.query(), None, "{url}");
            assert_eq!(parsed.fragment(), None, "{url}");
            let last = parsed.path_segments().and_then(|mut s| s.next_back()).unwrap();
            let decoded = url::form_urlencoded::parse(format!("x={last}").as_bytes())
                .next()
                .map(|(_, v)| v.into_owned())
                .unwrap();
            assert_eq!(decoded, name);
            assert!(parsed.path().starts_with("/media/projects/"));
        }
        assert_eq!(
            media_url(&o, "/media/", Some("projects/a#1.png")).as_deref(),
            Some("http://h/media/projects/a%231.png")
        );
    }
}

//! Stylesheet bookkeeping shared by the browser loader.

/// Whether any attached stylesheet matches the wanted one.
///
/// `attached` yields each link's raw `href` attribute and its resolved URL.
/// A link matches when either its attribute equals `href` or its resolved
/// URL equals `resolved`. The comparison is literal, so hrefs containing
/// quotes or brackets match like any other.
pub fn contains_stylesheet<I>(attached: I, href: &str, resolved: &str) -> bool
where
    I: IntoIterator<Item = (Option<String>, String)>,
{
    attached
        .into_iter()
        .any(|(raw, url)| raw.as_deref() == Some(href) || (!resolved.is_empty() && url == resolved))
}

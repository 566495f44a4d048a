use url::Url;

/// Returns true if the href carries an HTTP or HTTPS scheme
///
/// Such hrefs are used verbatim; everything else is resolved against the
/// page it was found on.
pub fn is_absolute(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}

/// Resolves an archive href found on a detail page into an absolute URL
///
/// Absolute hrefs are returned unchanged. Relative hrefs are joined onto the
/// directory of the detail page (not onto its full path), so `files/x.zip`
/// found on `https://example/cards/1/card2.html` becomes
/// `https://example/cards/1/files/x.zip`.
///
/// # Examples
///
/// ```
/// use aozora_collector::url::resolve_archive_href;
///
/// let url = resolve_archive_href("https://example/cards/1/card2.html", "files/x.zip").unwrap();
/// assert_eq!(url, "https://example/cards/1/files/x.zip");
/// ```
pub fn resolve_archive_href(page_url: &str, href: &str) -> Result<String, url::ParseError> {
    if is_absolute(href) {
        return Ok(href.to_string());
    }
    join_to_parent_dir(page_url, href)
}

/// Joins a relative reference onto the parent directory of `base`
///
/// Dot segments are cleaned after joining. A leading `/` on the reference
/// does not reset to the host root; it is joined onto the directory like any
/// other relative path. The base's query and fragment are dropped; the
/// reference's own query and fragment are kept.
pub fn join_to_parent_dir(base: &str, reference: &str) -> Result<String, url::ParseError> {
    let mut url = Url::parse(base)?;

    let (rest, fragment) = split_once_opt(reference, '#');
    let (path, query) = split_once_opt(rest, '?');

    let dir = parent_dir(url.path());
    let joined = clean_path(&format!("{}/{}", dir, path));

    url.set_path(&joined);
    url.set_query(query);
    url.set_fragment(fragment);

    Ok(url.to_string())
}

/// Returns everything in `path` before its last element, cleaned
///
/// `/cards/1/card2.html` yields `/cards/1`; `/` and the empty path yield `/`.
pub fn parent_dir(path: &str) -> String {
    match path.rfind('/') {
        Some(idx) => clean_path(&path[..=idx]),
        None => "/".to_string(),
    }
}

/// Cleans a rooted URL path by removing dot segments and duplicate slashes
///
/// `..` never climbs above the root. A trailing slash is not preserved.
pub fn clean_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    format!("/{}", segments.join("/"))
}

fn split_once_opt(s: &str, delim: char) -> (&str, Option<&str>) {
    match s.split_once(delim) {
        Some((head, tail)) => (head, Some(tail)),
        None => (s, None),
    }
}

//! Path string utilities used when deriving output names
//!
//! Output names are forward-slash strings handed back to the front-end, not
//! host paths, so these work on `str` rather than `Path`.

/// Lexically normalize a slash-separated path.
///
/// Repeated slashes collapse, `.` segments drop, and `..` removes the
/// preceding segment. A path that cleans to nothing becomes `.`.
///
/// # Examples
/// ```
/// use protoc_gen_tera::generation::utils::clean;
///
/// assert_eq!(clean("a//b/./c/../d/"), "a/b/d");
/// assert_eq!(clean("../x/.."), "..");
/// assert_eq!(clean("/../a"), "/a");
/// ```
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Directory part of a slash-separated path, cleaned; `.` for a bare name.
///
/// # Examples
/// ```
/// use protoc_gen_tera::generation::utils::dir_name;
///
/// assert_eq!(dir_name("acme/users.proto"), "acme");
/// assert_eq!(dir_name("users.proto"), ".");
/// assert_eq!(dir_name("/abs.proto"), "/");
/// assert_eq!(dir_name("a/./b.tmpl"), "a");
/// ```
pub fn dir_name(path: &str) -> String {
    match path.rfind('/') {
        Some(idx) => clean(&path[..=idx]),
        None => ".".to_string(),
    }
}

/// Last element of a slash-separated path, ignoring trailing slashes
///
/// # Examples
/// ```
/// use protoc_gen_tera::generation::utils::base_name;
///
/// assert_eq!(base_name("acme/users.proto"), "users.proto");
/// assert_eq!(base_name("users.proto"), "users.proto");
/// ```
pub fn base_name(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return if path.is_empty() { ".".to_string() } else { "/".to_string() };
    }
    trimmed.rsplit('/').next().unwrap_or(trimmed).to_string()
}

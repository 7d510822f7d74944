/// Join a base URL and a relative asset path with exactly one `/` between them.
///
/// Trailing slashes on the base and leading slashes on the relative part are dropped, and
/// backslashes in the relative part are normalised so manifests written on Windows still produce
/// valid URLs. An empty base yields a root-relative path.
pub fn join_url(base: &str, relative: &str) -> String {
    let base = base.trim_end_matches('/');
    let relative = relative.replace('\\', "/");
    let relative = relative.trim_start_matches('/');
    format!("{base}/{relative}")
}

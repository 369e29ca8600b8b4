use url::Url;

use migrator_logging::migrator_debug;

/// Returns true when `candidate` parses as an absolute URL carrying both a
/// scheme and a host. Purely syntactic; no liveness check.
pub fn is_valid_link(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => url.has_host(),
        Err(_) => false,
    }
}

/// Drops invalid links, preserving the relative order of survivors.
///
/// Each dropped entry is reported at debug level so `--verbose` runs show
/// exactly what was discarded.
pub fn filter_valid(lines: Vec<String>) -> Vec<String> {
    let mut valid = Vec::with_capacity(lines.len());
    for line in lines {
        if is_valid_link(&line) {
            valid.push(line);
        } else {
            migrator_debug!("bad link: {line}");
        }
    }
    valid
}

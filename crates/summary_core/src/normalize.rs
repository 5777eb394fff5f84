/// Returns `raw` trimmed, with `http://` prepended unless it already carries an
/// `http://` or `https://` scheme. Host names are not validated.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_url;

    #[test]
    fn bare_domain_gets_http_scheme() {
        assert_eq!(normalize_url("gabeecoffee.com"), "http://gabeecoffee.com");
    }

    #[test]
    fn whitespace_is_trimmed_before_prefixing() {
        assert_eq!(normalize_url("  example.org/about \n"), "http://example.org/about");
    }

    #[test]
    fn existing_schemes_are_kept() {
        assert_eq!(normalize_url("https://example.org"), "https://example.org");
        assert_eq!(normalize_url(" http://example.org "), "http://example.org");
    }

    #[test]
    fn scheme_check_is_case_sensitive() {
        assert_eq!(normalize_url("HTTPS://example.org"), "http://HTTPS://example.org");
    }

    #[test]
    fn other_schemes_are_not_recognised() {
        assert_eq!(normalize_url("ftp://example.org"), "http://ftp://example.org");
    }

    #[test]
    fn malformed_hosts_pass_through() {
        assert_eq!(normalize_url("not a host"), "http://not a host");
    }
}

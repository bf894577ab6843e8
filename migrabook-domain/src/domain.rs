//! Domain input normalization and syntax validation.

use std::sync::LazyLock;

use regex::Regex;

const MIN_DOMAIN_LEN: usize = 4;
const MAX_DOMAIN_LEN: usize = 253;

/// 1–63 alphanumerics, hyphens allowed only inside the label.
static LABEL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?$").ok());

static TLD_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[a-zA-Z]{2,63}$").ok());

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

/// Turn whatever the user typed into a bare domain suitable for DNS lookups.
///
/// `"https://www.Example.COM:8080/path?q=1"` becomes `"example.com"`. The
/// `www.` prefix is dropped here; the verifier adds it back for the `www`
/// A-record check.
pub fn normalize_domain(raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    let mut rest = compact.as_str();
    if let Some(s) = strip_prefix_ignore_case(rest, "https://")
        .or_else(|| strip_prefix_ignore_case(rest, "http://"))
    {
        rest = s;
    }
    if let Some(s) = strip_prefix_ignore_case(rest, "www.") {
        rest = s;
    }
    if let Some(end) = rest.find(['/', '?', '#']) {
        rest = &rest[..end];
    }
    if let Some((host, port)) = rest.rsplit_once(':')
        && !port.is_empty()
        && port.bytes().all(|b| b.is_ascii_digit())
    {
        rest = host;
    }

    rest.trim().to_lowercase()
}

/// Syntax-only check that `domain` is a plausible DNS name.
///
/// Expects already-normalized input. Says nothing about whether the name resolves.
pub fn is_valid_domain(domain: &str) -> bool {
    if !(MIN_DOMAIN_LEN..=MAX_DOMAIN_LEN).contains(&domain.len()) {
        return false;
    }
    if domain.starts_with('-') || domain.ends_with('-') || domain.contains("..") {
        return false;
    }

    let (Some(label_re), Some(tld_re)) = (LABEL_RE.as_ref(), TLD_RE.as_ref()) else {
        log::error!("Domain syntax patterns failed to compile");
        return false;
    };

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    if !labels.iter().all(|label| label_re.is_match(label)) {
        return false;
    }
    labels.last().is_some_and(|tld| tld_re.is_match(tld))
}

/// The parent zone of `domain`, or `None` once only a single label would remain.
pub(crate) fn parent_domain(domain: &str) -> Option<&str> {
    let (_, parent) = domain.split_once('.')?;
    parent.contains('.').then_some(parent)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== normalize_domain ====================

    #[test]
    fn strips_scheme_www_and_path() {
        assert_eq!(normalize_domain("https://www.Example.COM/path"), "example.com");
    }

    #[test]
    fn scheme_and_www_prefix_match_bare_form() {
        for raw in [
            "https://www.mystore.com",
            "http://www.mystore.com",
            "HTTPS://WWW.mystore.com",
            "www.mystore.com",
        ] {
            assert_eq!(normalize_domain(raw), normalize_domain("mystore.com"), "{raw}");
        }
    }

    #[test]
    fn strips_port_query_and_trailing_slashes() {
        assert_eq!(normalize_domain("shop.example.com:8443"), "shop.example.com");
        assert_eq!(normalize_domain("example.com///"), "example.com");
        assert_eq!(normalize_domain("example.com?ref=ad"), "example.com");
        assert_eq!(normalize_domain("http://example.com:80/a/b#top"), "example.com");
    }

    #[test]
    fn removes_inner_and_outer_whitespace() {
        assert_eq!(normalize_domain("  my store.com \n"), "mystore.com");
        assert_eq!(normalize_domain(" https://example.com"), "example.com");
    }

    #[test]
    fn keeps_www_inside_the_name() {
        assert_eq!(normalize_domain("wwwexample.com"), "wwwexample.com");
        assert_eq!(normalize_domain("shop.www.example.com"), "shop.www.example.com");
    }

    #[test]
    fn empty_input_normalizes_to_empty() {
        assert_eq!(normalize_domain(""), "");
        assert_eq!(normalize_domain("   "), "");
        assert_eq!(normalize_domain("https://"), "");
    }

    #[test]
    fn non_numeric_port_suffix_is_kept() {
        assert_eq!(normalize_domain("example.com:abc"), "example.com:abc");
    }

    // ==================== is_valid_domain ====================

    #[test]
    fn accepts_ordinary_domains() {
        assert!(is_valid_domain("mystore.com"));
        assert!(is_valid_domain("app.my-store.com.br"));
        assert!(is_valid_domain("a1.io"));
    }

    #[test]
    fn rejects_bad_shapes() {
        for bad in ["", "no-dot", "-bad.com", "bad-.com", "a..b.com", "bad.com-", "x.c"] {
            assert!(!is_valid_domain(bad), "{bad} should be invalid");
        }
    }

    #[test]
    fn rejects_numeric_or_short_tld() {
        assert!(!is_valid_domain("example.c0m"));
        assert!(!is_valid_domain("192.168.0.1"));
        assert!(!is_valid_domain("example.c"));
    }

    #[test]
    fn rejects_label_hyphen_edges() {
        assert!(!is_valid_domain("shop.-store.com"));
        assert!(!is_valid_domain("shop.store-.com"));
        assert!(is_valid_domain("shop.my-store.com"));
    }

    #[test]
    fn enforces_label_and_total_length() {
        let long_label = "a".repeat(64);
        assert!(!is_valid_domain(&format!("{long_label}.com")));
        assert!(is_valid_domain(&format!("{}.com", "a".repeat(63))));

        let too_long = format!("{}.com", vec!["abcdefghi"; 26].join("."));
        assert!(too_long.len() > 253);
        assert!(!is_valid_domain(&too_long));
    }

    #[test]
    fn rejects_underscores_and_spaces() {
        assert!(!is_valid_domain("my_store.com"));
        assert!(!is_valid_domain("my store.com"));
    }

    // ==================== parent_domain ====================

    #[test]
    fn parent_walks_up_until_two_labels() {
        assert_eq!(parent_domain("a.b.example.com"), Some("b.example.com"));
        assert_eq!(parent_domain("b.example.com"), Some("example.com"));
        assert_eq!(parent_domain("example.com"), None);
        assert_eq!(parent_domain("com"), None);
    }
}

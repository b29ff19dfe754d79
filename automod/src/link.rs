//! Link heuristic.
//!
//! Matches scheme-qualified URLs, bare `label.label` domains with an optional path, `discord.gg`
//! invites, and `label.<tld>` for a short list of common and throwaway TLDs. It catches
//! unobfuscated links; it is not a URL grammar, so both false positives (`e.g.something`) and
//! false negatives (`example dot com`) are expected.

use once_cell::sync::Lazy;
use regex::Regex;

const SCHEME_URL: &str =
    r"https?://(?:[a-zA-Z]|[0-9]|[$-_@.&+]|[!*\(\),]|(?:%[0-9a-fA-F][0-9a-fA-F]))+";
const BARE_DOMAIN: &str = r"(?:www\.)?[a-zA-Z0-9-]+\.[a-zA-Z]{2,}(?:/[^\s]*)?";
const INVITE: &str = r"discord\.gg/[a-zA-Z0-9]+";
const LISTED_TLD: &str = r"[a-zA-Z0-9-]+\.(?:com|net|org|io|gg|co|tv|me|xyz|tk|ml|ga|cf)";

static LINK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&[SCHEME_URL, BARE_DOMAIN, INVITE, LISTED_TLD].join("|")).expect("valid regex")
});

/// True if `text` contains anything that looks like a link.
pub fn contains_link(text: &str) -> bool {
    LINK_PATTERN.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_common_links() {
        assert!(contains_link("check http://example.com"));
        assert!(contains_link("join discord.gg/abc123"));
        assert!(contains_link("visit cool-site.xyz"));
        assert!(contains_link("https://x.y/path?q=1"));
        assert!(contains_link("see www.rust-lang.org/learn"));
        assert!(contains_link("FREE NITRO AT Steam-Gift.RU"));
    }

    #[test]
    fn test_plain_text_is_not_a_link() {
        assert!(!contains_link("no links here, just text"));
        assert!(!contains_link(""));
        assert!(!contains_link("version 1.2 is out"));
        assert!(!contains_link("hello... anyone?"));
    }

    #[test]
    fn test_single_letter_tld_is_not_a_link() {
        assert!(!contains_link("a.b"));
    }
}

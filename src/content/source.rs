// URL source classification.
//
// One closed enum, one classification function. The host comparison is
// exact (after lowercasing and stripping a leading "www."), so a typo'd
// host lands in Unrecognized instead of silently matching a substring.

/// Hosts served by the embed-retrieval service.
const SOCIAL_HOSTS: &[&str] = &["twitter.com", "x.com"];

/// Host served by the scrape service.
const COMMUNITY_HOST: &str = "youthvibe.000webhostapp.com";

/// Where a submitted URL's content comes from. Exactly one kind is chosen
/// per submission; `Unrecognized` fails the submission before any network
/// call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    SocialEmbed,
    CommunityPost,
    Unrecognized,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::SocialEmbed => "social embed",
            SourceKind::CommunityPost => "community post",
            SourceKind::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Extract the host portion of an http(s) URL, lowercased, without a
/// leading "www.". Returns `None` for anything that isn't an http(s) URL.
/// The scheme match is case-insensitive.
pub fn host_of(url: &str) -> Option<String> {
    let rest = ["https://", "http://"].iter().find_map(|scheme| {
        match (url.get(..scheme.len()), url.get(scheme.len()..)) {
            (Some(head), Some(tail)) if head.eq_ignore_ascii_case(scheme) => Some(tail),
            _ => None,
        }
    })?;
    let host = rest.split(['/', '?', '#']).next()?;
    if host.is_empty() {
        return None;
    }
    let host = host.to_ascii_lowercase();
    Some(host.strip_prefix("www.").unwrap_or(&host).to_string())
}

/// Classify a submitted URL by its host.
pub fn classify(url: &str) -> SourceKind {
    let Some(host) = host_of(url) else {
        return SourceKind::Unrecognized;
    };
    if SOCIAL_HOSTS.contains(&host.as_str()) {
        SourceKind::SocialEmbed
    } else if host == COMMUNITY_HOST {
        SourceKind::CommunityPost
    } else {
        SourceKind::Unrecognized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twitter_and_x_are_social() {
        assert_eq!(classify("https://twitter.com/user/status/1"), SourceKind::SocialEmbed);
        assert_eq!(classify("https://x.com/user/status/1"), SourceKind::SocialEmbed);
    }

    #[test]
    fn www_prefix_and_case_are_normalized() {
        assert_eq!(classify("https://www.Twitter.com/user/status/1"), SourceKind::SocialEmbed);
        assert_eq!(classify("HTTPS://x.com/a"), SourceKind::SocialEmbed);
    }

    #[test]
    fn community_host_is_exact() {
        assert_eq!(
            classify("https://youthvibe.000webhostapp.com/post/42"),
            SourceKind::CommunityPost
        );
        // Substring lookalikes must not match
        assert_eq!(
            classify("https://youthvibe.000webhostapp.com.evil.example/post/42"),
            SourceKind::Unrecognized
        );
    }

    #[test]
    fn unknown_host_is_unrecognized() {
        assert_eq!(classify("https://example.com/post"), SourceKind::Unrecognized);
    }

    #[test]
    fn non_http_is_unrecognized() {
        assert_eq!(classify("ftp://twitter.com/x"), SourceKind::Unrecognized);
        assert_eq!(classify("not a url"), SourceKind::Unrecognized);
    }

    #[test]
    fn host_of_strips_path_query_fragment() {
        assert_eq!(host_of("https://x.com/a?b=c#d"), Some("x.com".to_string()));
        assert_eq!(host_of("http://www.X.com"), Some("x.com".to_string()));
        assert_eq!(host_of("https:///nohost"), None);
    }
}

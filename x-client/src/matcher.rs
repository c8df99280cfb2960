//! Matching buffered responses to logical upstream endpoints.
//!
//! The markers are opaque interoperability tokens: literal substrings of the
//! platform's internal, versioned API paths. They are never parsed.

use crate::driver::RawResponse;

/// Post-detail lookup endpoint.
pub const POST_DETAIL_MARKER: &str = "TweetResultByRestId";
/// User lookup endpoint.
pub const USER_LOOKUP_MARKER: &str = "UserBy";

/// Case-sensitive substring containment on the request URL, in arrival order.
/// Zero matches is a valid result, distinct from "matched but empty payload".
pub fn filter_matches<'a>(buffer: &'a [RawResponse], marker: &str) -> Vec<&'a RawResponse> {
    buffer
        .iter()
        .filter(|response| response.url.contains(marker))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::ResourceKind;

    fn xhr(id: &str, url: &str) -> RawResponse {
        RawResponse {
            id: id.to_string(),
            url: url.to_string(),
            kind: ResourceKind::Xhr,
        }
    }

    #[test]
    fn keeps_matches_in_arrival_order() {
        let buffer = vec![
            xhr("1", "https://x.com/i/api/graphql/abc/TweetResultByRestId?id=1"),
            xhr("2", "https://x.com/i/api/graphql/def/HomeTimeline"),
            xhr("3", "https://x.com/i/api/graphql/ghi/TweetResultByRestId?id=2"),
        ];
        let matches = filter_matches(&buffer, POST_DETAIL_MARKER);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].id, "1");
        assert_eq!(matches[1].id, "3");
    }

    #[test]
    fn zero_matches_is_valid() {
        let buffer = vec![xhr("1", "https://x.com/i/api/graphql/def/HomeTimeline")];
        assert!(filter_matches(&buffer, POST_DETAIL_MARKER).is_empty());
        assert!(filter_matches(&[], USER_LOOKUP_MARKER).is_empty());
    }

    #[test]
    fn matching_is_case_sensitive() {
        let buffer = vec![xhr("1", "https://x.com/i/api/graphql/abc/tweetresultbyrestid")];
        assert!(filter_matches(&buffer, POST_DETAIL_MARKER).is_empty());
    }

    #[test]
    fn user_lookup_marker_matches_its_variants() {
        let buffer = vec![
            xhr("1", "https://x.com/i/api/graphql/abc/UserByScreenName?x=1"),
            xhr("2", "https://x.com/i/api/graphql/def/UserByRestId?x=2"),
        ];
        let matches = filter_matches(&buffer, USER_LOOKUP_MARKER);
        assert_eq!(matches.len(), 2);
    }
}

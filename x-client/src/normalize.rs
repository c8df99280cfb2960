//! Conversion of raw endpoint payloads into normalized records.
//!
//! Everything here is pure: the same payload always yields the same record,
//! and a missing field is carried as `None`/empty rather than surfaced as an
//! error. Only an unparseable body or a missing top-level wrapper is reported.

use birdwatch_core::{
    AuthorSummary, ExtractError, PathQuery, PollChoice, PollRecord, PostRecord, UserProfile,
};
use serde_json::Value;

const POST_WRAPPER: &str = "data.tweetResult.result";
const PROFILE_WRAPPER: &str = "data.user.result";

fn text_at(tree: &Value, path: &str) -> Option<String> {
    PathQuery::parse(path).eval(tree).as_str().map(str::to_string)
}

fn count_at(tree: &Value, path: &str) -> Option<u64> {
    PathQuery::parse(path).eval(tree).as_u64()
}

fn flag_at(tree: &Value, path: &str) -> Option<bool> {
    PathQuery::parse(path).eval(tree).as_bool()
}

fn strings_at(tree: &Value, path: &str) -> Vec<String> {
    PathQuery::parse(path).eval(tree).into_strings()
}

/// Parse one captured post-detail body and normalize it.
pub fn parse_post_payload(body: &str) -> Result<PostRecord, ExtractError> {
    let data: Value = serde_json::from_str(body).map_err(|e| ExtractError::InvalidJson {
        details: e.to_string(),
    })?;
    match PathQuery::parse(POST_WRAPPER).eval(&data).first() {
        Some(result) => Ok(normalize_post(result)),
        None => Err(ExtractError::MissingWrapper {
            wrapper: POST_WRAPPER.to_string(),
        }),
    }
}

/// Parse one captured user-lookup body and normalize it.
pub fn parse_profile_payload(body: &str) -> Result<UserProfile, ExtractError> {
    let data: Value = serde_json::from_str(body).map_err(|e| ExtractError::InvalidJson {
        details: e.to_string(),
    })?;
    match PathQuery::parse(PROFILE_WRAPPER).eval(&data).first() {
        Some(result) => Ok(normalize_profile(result)),
        None => Err(ExtractError::MissingWrapper {
            wrapper: PROFILE_WRAPPER.to_string(),
        }),
    }
}

pub fn normalize_post(result: &Value) -> PostRecord {
    // The upstream payload exposes attached links under two entity shapes;
    // both feed one canonical list, first occurrence wins.
    let mut attached_urls = strings_at(result, "legacy.entities.urls[].expanded_url");
    for url in strings_at(result, "legacy.entities.url.urls[].expanded_url") {
        if !attached_urls.contains(&url) {
            attached_urls.push(url);
        }
    }

    let poll = match PathQuery::parse("card.legacy.binding_values").eval(result).first() {
        Some(Value::Array(bindings)) => normalize_poll(bindings),
        _ => PollRecord::default(),
    };

    let author = PathQuery::parse("core.user_results.result")
        .eval(result)
        .first()
        .map(normalize_author);

    PostRecord {
        created_at: text_at(result, "legacy.created_at"),
        attached_urls,
        attached_media: strings_at(result, "legacy.entities.media[].media_url_https"),
        tagged_users: strings_at(result, "legacy.entities.user_mentions[].screen_name"),
        tagged_hashtags: strings_at(result, "legacy.entities.hashtags[].text"),
        likes: count_at(result, "legacy.favorite_count"),
        bookmarks: count_at(result, "legacy.bookmark_count"),
        quotes: count_at(result, "legacy.quote_count"),
        replies: count_at(result, "legacy.reply_count"),
        retweets: count_at(result, "legacy.retweet_count"),
        text: text_at(result, "legacy.full_text"),
        is_quote: flag_at(result, "legacy.is_quote_status"),
        is_retweet: flag_at(result, "legacy.retweeted"),
        language: text_at(result, "legacy.lang"),
        user_id: text_at(result, "legacy.user_id_str"),
        id: text_at(result, "legacy.id_str"),
        conversation_id: text_at(result, "legacy.conversation_id_str"),
        source: text_at(result, "source"),
        views: text_at(result, "views.count"),
        poll,
        author,
    }
}

pub fn normalize_author(user: &Value) -> AuthorSummary {
    AuthorSummary {
        id: text_at(user, "rest_id"),
        name: text_at(user, "legacy.name"),
        screen_name: text_at(user, "legacy.screen_name"),
        description: text_at(user, "legacy.description"),
        verified: flag_at(user, "legacy.verified"),
        followers: count_at(user, "legacy.followers_count"),
        friends: count_at(user, "legacy.friends_count"),
        statuses: count_at(user, "legacy.statuses_count"),
        avatar_url: text_at(user, "legacy.profile_image_url_https"),
        created_at: text_at(user, "legacy.created_at"),
    }
}

pub fn normalize_profile(result: &Value) -> UserProfile {
    UserProfile {
        avatar_url: text_at(result, "legacy.profile_image_url_https"),
        identity_verified: flag_at(result, "verification_info.is_identity_verified"),
        banner_url: text_at(result, "legacy.profile_banner_url"),
        name: text_at(result, "legacy.name"),
        media_count: count_at(result, "legacy.media_count"),
        id: text_at(result, "id"),
        display_url: PathQuery::parse("legacy.entities.url.urls[].display_url")
            .eval(result)
            .first()
            .and_then(Value::as_str)
            .map(str::to_string),
        description: text_at(result, "legacy.description"),
        created_at: text_at(result, "legacy.created_at"),
    }
}

#[derive(Debug, Clone, Copy)]
enum PollSlot {
    Choice,
    End,
    Updated,
    Ended,
    Duration,
}

/// Ordered dispatch table for poll binding keys. Evaluated top to bottom;
/// the first pattern contained in a key wins, unmatched keys are dropped.
const POLL_SLOTS: [(&str, PollSlot); 5] = [
    ("choice", PollSlot::Choice),
    ("end_datetime", PollSlot::End),
    ("last_updated_datetime", PollSlot::Updated),
    ("counts_are_final", PollSlot::Ended),
    ("duration_minutes", PollSlot::Duration),
];

fn normalize_poll(bindings: &[Value]) -> PollRecord {
    let mut poll = PollRecord::default();
    for entry in bindings {
        let key = match entry.get("key").and_then(Value::as_str) {
            Some(key) => key,
            None => continue,
        };
        for (pattern, slot) in POLL_SLOTS {
            if !key.contains(pattern) {
                continue;
            }
            match slot {
                PollSlot::Choice => {
                    if let Some(label) = text_at(entry, "value.string_value") {
                        poll.choices.push(PollChoice {
                            key: key.to_string(),
                            label,
                        });
                    }
                }
                PollSlot::End => poll.end = text_at(entry, "value.string_value"),
                PollSlot::Updated => poll.updated = text_at(entry, "value.string_value"),
                PollSlot::Ended => poll.ended = flag_at(entry, "value.boolean_value"),
                PollSlot::Duration => poll.duration = text_at(entry, "value.string_value"),
            }
            break;
        }
    }
    poll
}

use crate::render::Report;
use serde::Serialize;

/// Normalized output for a single post. The shape is always complete: a field
/// the upstream payload lacks is carried as `None`/empty, never dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PostRecord {
    pub created_at: Option<String>,
    pub attached_urls: Vec<String>,
    pub attached_media: Vec<String>,
    pub tagged_users: Vec<String>,
    pub tagged_hashtags: Vec<String>,
    pub likes: Option<u64>,
    pub bookmarks: Option<u64>,
    pub quotes: Option<u64>,
    pub replies: Option<u64>,
    pub retweets: Option<u64>,
    pub text: Option<String>,
    pub is_quote: Option<bool>,
    pub is_retweet: Option<bool>,
    pub language: Option<String>,
    pub user_id: Option<String>,
    pub id: Option<String>,
    pub conversation_id: Option<String>,
    pub source: Option<String>,
    /// Upstream reports view counts as a string.
    pub views: Option<String>,
    pub poll: PollRecord,
    pub author: Option<AuthorSummary>,
}

impl PostRecord {
    pub fn to_report(&self) -> Report {
        let mut report = Report::new();
        report.push("Posted at", self.created_at.clone());
        report.push("Attached URLs", self.attached_urls.clone());
        report.push("Attached Media", self.attached_media.clone());
        report.push("Tagged Users", self.tagged_users.clone());
        report.push("Tagged Hashtags", self.tagged_hashtags.clone());
        report.push("Likes", self.likes);
        report.push("Bookmarks", self.bookmarks);
        report.push("Quotes", self.quotes);
        report.push("Replies", self.replies);
        report.push("Retweets", self.retweets);
        report.push("Text", self.text.clone());
        report.push("Is a quote tweet", self.is_quote);
        report.push("Is a retweet", self.is_retweet);
        report.push("Language", self.language.clone());
        report.push("User ID", self.user_id.clone());
        report.push("ID", self.id.clone());
        report.push("Conversation ID", self.conversation_id.clone());
        report.push("Source", self.source.clone());
        report.push("Views", self.views.clone());
        report.push("Poll", self.poll.to_report());
        if let Some(author) = &self.author {
            report.push("User", author.to_report());
        }
        report
    }
}

/// Public author fields embedded in a post payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuthorSummary {
    pub id: Option<String>,
    pub name: Option<String>,
    pub screen_name: Option<String>,
    pub description: Option<String>,
    pub verified: Option<bool>,
    pub followers: Option<u64>,
    pub friends: Option<u64>,
    pub statuses: Option<u64>,
    pub avatar_url: Option<String>,
    pub created_at: Option<String>,
}

impl AuthorSummary {
    pub fn to_report(&self) -> Report {
        let mut report = Report::new();
        report.push("ID", self.id.clone());
        report.push("Name", self.name.clone());
        report.push("Screen Name", self.screen_name.clone());
        report.push("Description", self.description.clone());
        report.push("Verified", self.verified);
        report.push("Followers", self.followers);
        report.push("Friends", self.friends);
        report.push("Statuses", self.statuses);
        report.push("Profile URL", self.avatar_url.clone());
        report.push("Created At", self.created_at.clone());
        report
    }
}

/// Richer user fields produced by profile-scrape mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserProfile {
    pub avatar_url: Option<String>,
    pub identity_verified: Option<bool>,
    pub banner_url: Option<String>,
    pub name: Option<String>,
    pub media_count: Option<u64>,
    pub id: Option<String>,
    pub display_url: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<String>,
}

impl UserProfile {
    pub fn to_report(&self) -> Report {
        let mut report = Report::new();
        report.push("Profile URL", self.avatar_url.clone());
        report.push("Verified", self.identity_verified);
        report.push("Profile Banner URL", self.banner_url.clone());
        report.push("Name", self.name.clone());
        report.push("Media Count", self.media_count);
        report.push("ID", self.id.clone());
        report.push("Display URL", self.display_url.clone());
        report.push("Description", self.description.clone());
        report.push("Created At", self.created_at.clone());
        report
    }
}

/// Poll data extracted from a post's card binding values. Empty when the post
/// carries no poll card.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PollRecord {
    pub choices: Vec<PollChoice>,
    pub end: Option<String>,
    pub updated: Option<String>,
    pub duration: Option<String>,
    pub ended: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollChoice {
    /// Raw binding key, e.g. `choice1_label`.
    pub key: String,
    pub label: String,
}

impl PollRecord {
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
            && self.end.is_none()
            && self.updated.is_none()
            && self.duration.is_none()
            && self.ended.is_none()
    }

    /// Unlike the always-complete records above, a poll report only lists the
    /// entries the card actually carried.
    pub fn to_report(&self) -> Report {
        let mut report = Report::new();
        for choice in &self.choices {
            report.push(&choice.key, choice.label.clone());
        }
        if let Some(end) = &self.end {
            report.push("end", end.clone());
        }
        if let Some(updated) = &self.updated {
            report.push("updated", updated.clone());
        }
        if let Some(duration) = &self.duration {
            report.push("duration", duration.clone());
        }
        if let Some(ended) = self.ended {
            report.push("ended", ended);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_poll_is_empty() {
        assert!(PollRecord::default().is_empty());
        assert!(PollRecord::default().to_report().is_empty());
    }

    #[test]
    fn post_report_keeps_declared_field_order() {
        let record = PostRecord {
            likes: Some(42),
            text: Some("hello".to_string()),
            ..Default::default()
        };
        let report = record.to_report();
        let labels: Vec<&str> = report
            .entries()
            .iter()
            .map(|(label, _)| label.as_str())
            .collect();
        assert_eq!(labels[0], "Posted at");
        assert_eq!(labels[5], "Likes");
        assert_eq!(labels[10], "Text");
        assert_eq!(*labels.last().unwrap(), "Poll");
    }

    #[test]
    fn author_block_appears_only_when_present() {
        let mut record = PostRecord::default();
        assert!(!record
            .to_report()
            .entries()
            .iter()
            .any(|(label, _)| label == "User"));

        record.author = Some(AuthorSummary {
            screen_name: Some("someone".to_string()),
            ..Default::default()
        });
        assert!(record
            .to_report()
            .entries()
            .iter()
            .any(|(label, _)| label == "User"));
    }
}

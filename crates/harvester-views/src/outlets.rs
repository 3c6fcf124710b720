//! The `outlets/crawler` view: feed discovery over outlet profiles.
//!
//! An outlet profile may name its sitemap and RSS feeds under
//! `website.sitemap`, `website.rss`, and `podcast.rss`. Each of those
//! fields is historically either a single URL string or a list of
//! them, and any of them may be missing. The view flattens whatever
//! is present into one row per feed URL, valued with the outlet's
//! document id, in a fixed precedence order the crawler relies on.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ViewError;
use crate::view::{Emit, View};

/// A feed reference that may be absent, a single URL, or a list.
///
/// The array-or-scalar shape is resolved once at deserialization;
/// JSON `null` and a missing field both collapse to [`FeedField::Absent`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FeedField {
    /// Field missing or `null`.
    #[default]
    Absent,
    /// A single URL string.
    One(String),
    /// An ordered list of URL strings.
    Many(Vec<String>),
}

impl FeedField {
    /// URLs carried by the field, in document order.
    pub fn urls(&self) -> &[String] {
        match self {
            Self::Absent => &[],
            Self::One(url) => std::slice::from_ref(url),
            Self::Many(urls) => urls,
        }
    }
}

/// Website substructure of an outlet profile.
#[derive(Debug, Clone, Deserialize)]
pub struct WebsiteProfile {
    #[serde(default)]
    pub sitemap: FeedField,
    #[serde(default)]
    pub rss: FeedField,
}

/// Podcast substructure of an outlet profile.
#[derive(Debug, Clone, Deserialize)]
pub struct PodcastProfile {
    #[serde(default)]
    pub rss: FeedField,
}

/// An outlet document, reduced to the fields the view reads.
#[derive(Debug, Clone, Deserialize)]
pub struct OutletDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub website: Option<WebsiteProfile>,
    pub podcast: Option<PodcastProfile>,
}

impl OutletDocument {
    /// All feed references in emission order: `website.sitemap`, then
    /// `website.rss`, then `podcast.rss`.
    ///
    /// No URL validation happens here; whatever string the profile
    /// carries is yielded as-is. An outlet with no feed fields yields
    /// nothing, which is not an error.
    pub fn feed_refs(&self) -> impl Iterator<Item = &str> {
        let sitemap = self.website.as_ref().map_or(&[][..], |w| w.sitemap.urls());
        let rss = self.website.as_ref().map_or(&[][..], |w| w.rss.urls());
        let podcast = self.podcast.as_ref().map_or(&[][..], |p| p.rss.urls());
        sitemap.iter().chain(rss).chain(podcast).map(String::as_str)
    }
}

/// Map function registered as `_design/outlets`, view `crawler`.
pub struct OutletCrawlerView;

impl View for OutletCrawlerView {
    fn database(&self) -> &'static str {
        "outlets"
    }

    fn name(&self) -> &'static str {
        "crawler"
    }

    fn map(&self, doc: &Value, emit: &mut Emit<'_>) -> Result<(), ViewError> {
        let outlet = OutletDocument::deserialize(doc)?;
        for url in outlet.feed_refs() {
            emit(Value::String(url.to_owned()), Value::String(outlet.id.clone()));
        }
        Ok(())
    }
}

//! The `tweets/replies_full` view: reply edges between statuses.
//!
//! Every tweet gets a self-identity row so the reducer can tell which
//! statuses are already in the database; tweets that reply to another
//! status additionally get a reply-edge row keyed by the status they
//! reply to. The reply fetcher groups the reduced view by the first
//! key component to find statuses it still needs to download.

use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ViewError;
use crate::view::{Emit, View};

/// Flag distinguishing the two row kinds the view emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeFlag {
    /// This status exists as itself.
    Identity,
    /// This status is a reply to the status named in the key.
    Reply,
}

impl EdgeFlag {
    /// Wire representation: 0 for identity, 1 for reply.
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Identity => 0,
            Self::Reply => 1,
        }
    }
}

impl Serialize for EdgeFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

/// Ordered key triple: subject status id, this status id, author id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeKey(pub [String; 3]);

/// Author substructure of a tweet.
#[derive(Debug, Clone, Deserialize)]
pub struct TweetUser {
    pub id_str: String,
}

/// A tweet document, reduced to the fields the view reads.
///
/// `user` is optional at the parse boundary even though upstream
/// harvesting always stores it; [`TweetDocument::reply_edges`] is the
/// single place the missing case surfaces.
#[derive(Debug, Clone, Deserialize)]
pub struct TweetDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub id_str: String,
    pub user: Option<TweetUser>,
    pub in_reply_to_user_id_str: Option<String>,
    pub in_reply_to_status_id_str: Option<String>,
}

impl TweetDocument {
    /// Rows for this tweet: the reply edge when both reply fields are
    /// set (one alone is not enough), then the unconditional
    /// self-identity row, always in that order.
    ///
    /// Fails with [`ViewError::MissingField`] before emitting anything
    /// when `user` is absent. That hard failure is deliberate: the
    /// harvester guarantees `user` on every stored tweet, and a
    /// document without it should be surfaced to the host rather than
    /// silently indexed with a hole in its key.
    pub fn reply_edges(&self) -> Result<Vec<(EdgeKey, EdgeFlag)>, ViewError> {
        let user = self
            .user
            .as_ref()
            .ok_or(ViewError::MissingField { path: "user.id_str" })?;
        let mut rows = Vec::with_capacity(2);
        if let (Some(_), Some(status)) = (
            self.in_reply_to_user_id_str.as_ref(),
            self.in_reply_to_status_id_str.as_ref(),
        ) {
            rows.push((
                EdgeKey([status.clone(), self.id_str.clone(), user.id_str.clone()]),
                EdgeFlag::Reply,
            ));
        }
        rows.push((
            EdgeKey([self.id.clone(), self.id_str.clone(), user.id_str.clone()]),
            EdgeFlag::Identity,
        ));
        Ok(rows)
    }
}

/// Map function registered as `_design/tweets`, view `replies_full`.
pub struct TweetRepliesView;

impl View for TweetRepliesView {
    fn database(&self) -> &'static str {
        "tweets"
    }

    fn name(&self) -> &'static str {
        "replies_full"
    }

    fn map(&self, doc: &Value, emit: &mut Emit<'_>) -> Result<(), ViewError> {
        let tweet = TweetDocument::deserialize(doc)?;
        for (key, flag) in tweet.reply_edges()? {
            emit(serde_json::to_value(&key)?, serde_json::to_value(flag)?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map_to_pairs(doc: Value) -> Result<Vec<(Value, Value)>, ViewError> {
        let mut rows = Vec::new();
        TweetRepliesView.map(&doc, &mut |k, v| rows.push((k, v)))?;
        Ok(rows)
    }

    #[test]
    fn test_reply_tweet_emits_edge_then_identity() {
        let doc = json!({
            "_id": "doc2",
            "id_str": "s2",
            "user": {"id_str": "u2"},
            "in_reply_to_user_id_str": "u1",
            "in_reply_to_status_id_str": "s1",
        });
        let rows = map_to_pairs(doc).unwrap();
        assert_eq!(
            rows,
            vec![
                (json!(["s1", "s2", "u2"]), json!(1)),
                (json!(["doc2", "s2", "u2"]), json!(0)),
            ]
        );
    }

    #[test]
    fn test_partial_reply_fields_emit_identity_only() {
        let doc = json!({
            "_id": "doc2",
            "id_str": "s2",
            "user": {"id_str": "u2"},
            "in_reply_to_user_id_str": "u1",
        });
        let rows = map_to_pairs(doc).unwrap();
        assert_eq!(rows, vec![(json!(["doc2", "s2", "u2"]), json!(0))]);
    }

    #[test]
    fn test_null_reply_fields_emit_identity_only() {
        let doc = json!({
            "_id": "doc2",
            "id_str": "s2",
            "user": {"id_str": "u2"},
            "in_reply_to_user_id_str": null,
            "in_reply_to_status_id_str": "s1",
        });
        let rows = map_to_pairs(doc).unwrap();
        assert_eq!(rows, vec![(json!(["doc2", "s2", "u2"]), json!(0))]);
    }

    #[test]
    fn test_missing_user_fails_without_emitting() {
        let doc = json!({"_id": "doc2", "id_str": "s2"});
        let mut emitted = 0;
        let err = TweetRepliesView
            .map(&doc, &mut |_, _| emitted += 1)
            .unwrap_err();
        assert!(matches!(
            err,
            ViewError::MissingField { path: "user.id_str" }
        ));
        assert_eq!(emitted, 0);
    }

    #[test]
    fn test_edge_flag_wire_values() {
        assert_eq!(serde_json::to_value(EdgeFlag::Identity).unwrap(), json!(0));
        assert_eq!(serde_json::to_value(EdgeFlag::Reply).unwrap(), json!(1));
    }
}

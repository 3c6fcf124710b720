//! Host-side driver for map functions.
//!
//! The real view engine feeds documents to a registered map function
//! one at a time and isolates failures per document. This runner
//! reproduces that contract for tests and offline runs: rows are
//! collected in emission order across the batch, and a document that
//! fails is skipped without affecting the rest.

use serde_json::Value;
use tracing::{trace, warn};

use crate::error::ViewError;
use crate::view::View;

/// One emitted row, as the database would store it.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ViewRow {
    pub key: Value,
    pub value: Value,
}

/// A document the view failed on, identified by `_id` when it has one.
#[derive(Debug)]
pub struct MapFailure {
    pub doc_id: Option<String>,
    pub error: ViewError,
}

/// Everything a batch run produced.
#[derive(Debug, Default)]
pub struct MapOutput {
    pub rows: Vec<ViewRow>,
    pub failures: Vec<MapFailure>,
}

/// Run one view across a batch of raw documents.
///
/// Rows emitted by a document that later fails are discarded, so a
/// failing document contributes nothing but a [`MapFailure`].
pub fn run_view<I>(view: &dyn View, docs: I) -> MapOutput
where
    I: IntoIterator<Item = Value>,
{
    let mut output = MapOutput::default();
    for doc in docs {
        let before = output.rows.len();
        let rows = &mut output.rows;
        let result = view.map(&doc, &mut |key, value| {
            rows.push(ViewRow { key, value });
        });
        match result {
            Ok(()) => {
                trace!(
                    view = view.name(),
                    rows = output.rows.len() - before,
                    "mapped document"
                );
            }
            Err(error) => {
                output.rows.truncate(before);
                let doc_id = doc.get("_id").and_then(Value::as_str).map(str::to_owned);
                warn!(
                    view = view.name(),
                    doc_id = doc_id.as_deref().unwrap_or("<no _id>"),
                    %error,
                    "skipping document"
                );
                output.failures.push(MapFailure { doc_id, error });
            }
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outlets::OutletCrawlerView;
    use crate::view::Emit;
    use serde_json::json;

    #[test]
    fn test_failing_document_is_isolated() {
        let docs = vec![
            json!({"_id": "doc1", "website": {"sitemap": "a"}}),
            json!({"_id": "bad", "website": {"sitemap": 42}}),
            json!({"_id": "doc3", "website": {"rss": "b"}}),
        ];
        let output = run_view(&OutletCrawlerView, docs);
        assert_eq!(output.rows.len(), 2);
        assert_eq!(output.rows[0].key, json!("a"));
        assert_eq!(output.rows[1].key, json!("b"));
        assert_eq!(output.failures.len(), 1);
        assert_eq!(output.failures[0].doc_id.as_deref(), Some("bad"));
    }

    /// View that emits one row, then fails.
    struct EmitThenFail;

    impl View for EmitThenFail {
        fn database(&self) -> &'static str {
            "test"
        }

        fn name(&self) -> &'static str {
            "emit_then_fail"
        }

        fn map(&self, _doc: &Value, emit: &mut Emit<'_>) -> Result<(), ViewError> {
            emit(json!("half"), json!(0));
            Err(ViewError::MissingField { path: "late" })
        }
    }

    #[test]
    fn test_rows_from_failed_document_are_discarded() {
        let output = run_view(&EmitThenFail, vec![json!({"_id": "doc1"})]);
        assert!(output.rows.is_empty());
        assert_eq!(output.failures.len(), 1);
    }

    #[test]
    fn test_empty_batch_produces_nothing() {
        let output = run_view(&OutletCrawlerView, Vec::new());
        assert!(output.rows.is_empty());
        assert!(output.failures.is_empty());
    }
}

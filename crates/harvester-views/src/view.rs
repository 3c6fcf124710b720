//! Type-erased seam between map functions and the host runtime.

use serde_json::Value;

use crate::error::ViewError;

/// Sink for the key/value rows produced while mapping one document.
///
/// Called zero or more times per invocation; call order is the row
/// order the view defines.
pub type Emit<'a> = dyn FnMut(Value, Value) + 'a;

/// A named map function belonging to one database's design document.
///
/// Keys and values cross this boundary as [`serde_json::Value`],
/// matching the database's row representation; implementations
/// deserialize the raw document into their typed model and delegate
/// to plain functions over it. Implementations are `Send + Sync` so
/// the host may fan invocations out across threads.
pub trait View: Send + Sync {
    /// Database the view indexes (the design-document prefix).
    fn database(&self) -> &'static str;

    /// View name within the design document.
    fn name(&self) -> &'static str;

    /// Map one raw document, calling `emit` once per output row.
    fn map(&self, doc: &Value, emit: &mut Emit<'_>) -> Result<(), ViewError>;
}

//! Map-stage view functions for the harvester's document store.
//!
//! The harvester keeps outlet profiles and tweets in a CouchDB-style
//! document database and indexes them through map-reduce views. This
//! crate holds the map half of those views as pure Rust functions:
//! each takes one document and emits zero or more key/value rows, and
//! the surrounding database engine owns grouping, reduction, and
//! storage.
//!
//! - [`outlets::OutletCrawlerView`] (`outlets/crawler`) keys every
//!   sitemap and RSS reference found in an outlet profile by feed URL,
//!   so the crawler can ask "which feeds exist?" from the reduced view.
//! - [`tweets::TweetRepliesView`] (`tweets/replies_full`) emits reply
//!   edges between statuses plus a self-identity row per tweet, so the
//!   reply fetcher can find statuses it has not downloaded yet.
//!
//! Map functions are stateless and never mutate their input; the host
//! may invoke them concurrently across any number of documents. See
//! [`runner::run_view`] for the invocation contract made executable.

pub mod error;
pub mod outlets;
pub mod registry;
pub mod runner;
pub mod tweets;
pub mod view;

pub use error::ViewError;
pub use view::View;

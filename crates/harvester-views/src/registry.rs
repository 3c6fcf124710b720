//! Built-in views, grouped the way the design documents group them.
//!
//! The database holds one design document per database prefix
//! (`_design/outlets`, `_design/tweets`), each carrying its map
//! functions by view name. This module is the native equivalent: the
//! host asks for the views of a database and registers them under
//! `database()/name()`.

use crate::outlets::OutletCrawlerView;
use crate::tweets::TweetRepliesView;
use crate::view::View;

/// All map functions shipped with the harvester.
pub fn all() -> Vec<Box<dyn View>> {
    vec![Box::new(OutletCrawlerView), Box::new(TweetRepliesView)]
}

/// The views belonging to one database's design document.
pub fn for_database(database: &str) -> Vec<Box<dyn View>> {
    all()
        .into_iter()
        .filter(|view| view.database() == database)
        .collect()
}

//! Output generators.
//!
//! - **Page**: `<slug>/index.html` per article, plus its sibling files
//! - **Index**: `index.html`, the year-grouped listing of articles and links
//! - **Feed**: `index.xml`, RSS 2.0 for published articles
//! - **Assets**: `static/` merged into the output root

pub mod assets;
pub mod feed;
pub mod index;
pub mod page;

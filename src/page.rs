//! The single-page client served at `/`.
//!
//! The page posts the form field `url` to `/crawl` and renders the returned
//! envelope into three containers: `#internal-links`, `#external-links` and
//! `#media-items`. The markup builders live in the `script#crawl-view` block
//! as `CrawlView.render(view, envelope)`, kept free of DOM lookups. Each
//! container is emptied before it is repopulated, so rendering the same
//! envelope twice leaves the same DOM behind.

pub const INDEX_HTML: &str = include_str!("../static/index.html");

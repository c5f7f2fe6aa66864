//! Pagination module
//!
//! Canvas paginates every collection endpoint with an RFC 5988 `Link`
//! header. This module turns a first page plus a single-page fetcher into the
//! complete, ordered collection.
//!
//! # Overview
//!
//! - [`Page`] - One decoded response: body plus the optional `rel="next"` URL
//! - [`parse_link_header`] - Extracts the URL for a given rel
//! - [`collect_pages`] - Follows next links until exhausted, bounded by [`PageLimits`]
//!
//! The combinator knows nothing about HTTP, so it can be driven by any
//! fetch function (the real transport, or a fake in tests).

mod collect;
mod link;
mod page;

pub use collect::{collect_pages, PageLimits};
pub use link::parse_link_header;
pub use page::Page;

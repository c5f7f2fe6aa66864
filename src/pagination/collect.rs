use super::page::Page;
use crate::error::{Error, Result};
use crate::types::JsonValue;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::debug;

/// Ceiling for one aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Maximum number of pages, the first one included
    pub max_pages: u32,
    /// Wall-clock budget for the follow-up fetches
    pub max_duration: Option<Duration>,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            max_pages: 500,
            max_duration: Some(Duration::from_secs(300)),
        }
    }
}

impl PageLimits {
    /// No wall-clock budget, only a page ceiling
    pub fn pages(max_pages: u32) -> Self {
        Self {
            max_pages,
            max_duration: None,
        }
    }
}

/// Aggregate a paginated collection.
///
/// If `first` is not a JSON array it is returned unchanged. Otherwise each
/// `next` URL is handed to `fetch_next` in turn, strictly sequentially, and the
/// records are appended in fetch order until a page arrives without a `next`
/// link. Exceeding `limits` fails with [`Error::PaginationLimit`].
pub async fn collect_pages<F, Fut>(
    first: Page,
    limits: &PageLimits,
    mut fetch_next: F,
) -> Result<JsonValue>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Page>>,
{
    let Page { body, mut next } = first;
    let mut records = match body {
        JsonValue::Array(records) => records,
        other => return Ok(other),
    };

    let started = Instant::now();
    let mut pages: u32 = 1;

    while let Some(url) = next.take() {
        if pages >= limits.max_pages {
            return Err(Error::PaginationLimit {
                pages,
                reason: format!("page limit of {} reached", limits.max_pages),
            });
        }

        debug!("Following next link after page {}: {}", pages, url);

        let page = match limits.max_duration {
            Some(budget) => {
                let remaining = budget.saturating_sub(started.elapsed());
                tokio::time::timeout(remaining, fetch_next(url))
                    .await
                    .map_err(|_| Error::PaginationLimit {
                        pages,
                        reason: format!("time budget of {budget:?} exhausted"),
                    })??
            }
            None => fetch_next(url).await?,
        };
        pages += 1;

        match page.body {
            JsonValue::Array(more) => {
                debug!("Page {}: {} records", pages, more.len());
                records.extend(more);
            }
            other => {
                return Err(Error::decode(format!(
                    "page {pages} of a collection is not a JSON array: {other}"
                )));
            }
        }
        next = page.next;
    }

    Ok(JsonValue::Array(records))
}

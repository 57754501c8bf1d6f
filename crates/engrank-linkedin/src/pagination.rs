//! Generic pagination for the provider's list endpoints.
//!
//! Every stream runs through the same loop ([`paginate`]): fetch the page at
//! the current [`Cursor`], consume its items, then ask the stream's
//! [`Protocol`] whether another page follows. The protocols differ only in
//! which continuation signal they read:
//!
//! | Protocol | Used by | Continues while |
//! |----------|---------|-----------------|
//! | [`Protocol::Token`] | posts, comments | a token is issued (and any reported page count is not reached) |
//! | [`Protocol::Count`] | reactions | `page < ceil(total / page_size)` |
//! | [`Protocol::CountWithToken`] | reposts | a token is issued and `page < totalPages` |
//!
//! A transport failure stops the stream and is reported as
//! [`StopReason::Failed`]; all other stop reasons are benign. Token streams
//! are additionally capped at [`MAX_PAGES`].

use std::future::Future;
use std::time::Duration;

use crate::error::LinkedinError;

/// Maximum number of pages fetched for one [`Protocol::Token`] stream. Guards
/// against a provider that keeps issuing continuation tokens forever. The
/// count-based protocols are bounded by their reported totals instead.
pub const MAX_PAGES: u32 = 200;

/// Position within a stream: a 1-based page index plus the continuation
/// token issued by the previous page, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub page: u32,
    pub token: Option<String>,
}

impl Cursor {
    #[must_use]
    pub fn first() -> Self {
        Self {
            page: 1,
            token: None,
        }
    }

    fn next(&self, token: Option<String>) -> Self {
        Self {
            page: self.page + 1,
            token,
        }
    }
}

/// One page as seen by the paginator: the items (absent when the provider
/// sent none) and whatever continuation signals the endpoint reports.
#[derive(Debug)]
pub struct RawPage<T> {
    pub items: Option<Vec<T>>,
    pub token: Option<String>,
    pub total_items: Option<u64>,
    pub total_pages: Option<u32>,
}

impl<T> Default for RawPage<T> {
    fn default() -> Self {
        Self {
            items: None,
            token: None,
            total_items: None,
            total_pages: None,
        }
    }
}

/// Continuation rule of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    /// Opaque token per page; no token means last page. A reported total page
    /// count, when present, also bounds the stream.
    Token,
    /// Total item count per response; the ceiling is `ceil(total / page_size)`.
    Count { page_size: u32 },
    /// Reported total page count bounds the stream; a missing token is an
    /// additional stop.
    CountWithToken,
}

/// Why a stream stopped.
#[derive(Debug)]
pub enum StopReason {
    /// The page had no items (or the provider reported `success: false`).
    EmptyPage,
    /// The protocol needed a continuation signal the page did not carry.
    NoContinuation,
    /// The page index reached the stream's computed ceiling.
    CeilingReached,
    /// An item failed the keep predicate (date-window cutoff).
    Cutoff,
    /// The page request failed.
    Failed(LinkedinError),
}

/// Outcome of [`Protocol::advance`].
#[derive(Debug)]
pub enum Continuation {
    Next(Cursor),
    Stop(StopReason),
}

impl Protocol {
    /// `true` when only the provider's tokens bound the stream.
    #[must_use]
    pub fn is_open_ended(self) -> bool {
        matches!(self, Protocol::Token)
    }

    /// Decides whether a page follows the one just consumed at `cursor`.
    ///
    /// Signals are checked in priority order: continuation token first, then
    /// the page ceiling. Empty tokens count as absent.
    #[must_use]
    pub fn advance(
        self,
        cursor: &Cursor,
        token: Option<&str>,
        total_items: Option<u64>,
        total_pages: Option<u32>,
    ) -> Continuation {
        let token = token.filter(|t| !t.is_empty()).map(str::to_owned);

        match self {
            Protocol::Token => {
                let Some(token) = token else {
                    return Continuation::Stop(StopReason::NoContinuation);
                };
                if total_pages.is_some_and(|total| cursor.page >= total) {
                    return Continuation::Stop(StopReason::CeilingReached);
                }
                Continuation::Next(cursor.next(Some(token)))
            }
            Protocol::Count { page_size } => {
                let Some(total) = total_items else {
                    return Continuation::Stop(StopReason::NoContinuation);
                };
                let ceiling = total.div_ceil(u64::from(page_size.max(1)));
                if u64::from(cursor.page) >= ceiling {
                    return Continuation::Stop(StopReason::CeilingReached);
                }
                Continuation::Next(cursor.next(None))
            }
            Protocol::CountWithToken => {
                let (Some(token), Some(total)) = (token, total_pages) else {
                    return Continuation::Stop(StopReason::NoContinuation);
                };
                if cursor.page >= total {
                    return Continuation::Stop(StopReason::CeilingReached);
                }
                Continuation::Next(cursor.next(Some(token)))
            }
        }
    }
}

/// Items collected from one stream and the reason it stopped.
#[derive(Debug)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages_fetched: u32,
    pub stop: StopReason,
}

impl<T> Paginated<T> {
    /// Converts into a plain result: a failed stream discards whatever it had
    /// collected and returns the error.
    ///
    /// # Errors
    ///
    /// Returns the [`LinkedinError`] carried by [`StopReason::Failed`].
    pub fn into_result(self) -> Result<Vec<T>, LinkedinError> {
        match self.stop {
            StopReason::Failed(e) => Err(e),
            _ => Ok(self.items),
        }
    }
}

/// Drives one stream to completion.
///
/// `fetch_page` is called with the current cursor; `keep` is applied to each
/// item in page order, and the first item it rejects ends the whole stream
/// immediately, discarding the rest of that page. `delay` is slept between
/// page requests (never before the first).
pub(crate) async fn paginate<T, F, Fut, K>(
    stream: &str,
    protocol: Protocol,
    delay: Duration,
    mut fetch_page: F,
    mut keep: K,
) -> Paginated<T>
where
    F: FnMut(Cursor) -> Fut,
    Fut: Future<Output = Result<RawPage<T>, LinkedinError>>,
    K: FnMut(&T) -> bool,
{
    let mut items: Vec<T> = Vec::new();
    let mut cursor = Cursor::first();
    let mut pages_fetched = 0u32;

    let stop = loop {
        if protocol.is_open_ended() && pages_fetched >= MAX_PAGES {
            break StopReason::Failed(LinkedinError::PaginationLimit {
                stream: stream.to_owned(),
                max_pages: MAX_PAGES,
            });
        }
        if pages_fetched > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        pages_fetched += 1;

        let page = match fetch_page(cursor.clone()).await {
            Ok(page) => page,
            Err(e) => break StopReason::Failed(e),
        };

        let RawPage {
            items: page_items,
            token,
            total_items,
            total_pages,
        } = page;

        let Some(page_items) = page_items.filter(|v| !v.is_empty()) else {
            tracing::debug!(stream, page = cursor.page, "no items on page");
            break StopReason::EmptyPage;
        };

        let received = page_items.len();
        let mut cut = false;
        for item in page_items {
            if !keep(&item) {
                cut = true;
                break;
            }
            items.push(item);
        }

        tracing::debug!(
            stream,
            page = cursor.page,
            received,
            total = items.len(),
            "page consumed"
        );

        if cut {
            break StopReason::Cutoff;
        }

        match protocol.advance(&cursor, token.as_deref(), total_items, total_pages) {
            Continuation::Next(next) => cursor = next,
            Continuation::Stop(reason) => break reason,
        }
    };

    if let StopReason::Failed(e) = &stop {
        tracing::warn!(stream, page = cursor.page, error = %e, "stream stopped on error");
    } else {
        tracing::debug!(stream, pages_fetched, total = items.len(), stop = ?stop, "stream finished");
    }

    Paginated {
        items,
        pages_fetched,
        stop,
    }
}

//! Page-number pagination over ordered record sequences
//!
//! The [`Paginator`] never filters or sorts. It receives a sequence that is
//! already authorized, filtered and ordered (anything implementing
//! [`SequenceProvider`]) and cuts one page out of it.
//!
//! # Example
//! ```rust,ignore
//! // GET /posts?page_number=2&page_size=10
//! let request = paginator.request(&query)?;
//! let page = paginator.paginate(&publications, request)?;
//! let body = page.into_envelope(&PageLinks::from_uri(&uri));
//! ```

use axum::http::Uri;
use serde::{Deserialize, Serialize};

use crate::core::error::PaginationError;

/// Items per page when the client does not ask for a size
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Upper bound for a client-requested page size
pub const MAX_PAGE_SIZE: usize = 100;

/// Query parameter selecting the page
pub const PAGE_NUMBER_PARAM: &str = "page_number";

/// Query parameter selecting the page size
pub const PAGE_SIZE_PARAM: &str = "page_size";

/// Something that can report how many records it holds and hand out an
/// ordered slice of them.
pub trait SequenceProvider {
    type Item;

    /// Total number of records in the sequence
    fn count(&self) -> usize;

    /// Up to `limit` records starting at `offset`, in sequence order
    fn slice(&self, offset: usize, limit: usize) -> Vec<Self::Item>;
}

impl<T: Clone> SequenceProvider for [T] {
    type Item = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn slice(&self, offset: usize, limit: usize) -> Vec<T> {
        self.iter().skip(offset).take(limit).cloned().collect()
    }
}

impl<T: Clone> SequenceProvider for Vec<T> {
    type Item = T;

    fn count(&self) -> usize {
        self.len()
    }

    fn slice(&self, offset: usize, limit: usize) -> Vec<T> {
        self.as_slice().slice(offset, limit)
    }
}

/// Raw pagination query parameters, exactly as sent by the client
///
/// Values stay strings so that a malformed `page_size` can fall back to the
/// default instead of rejecting the whole query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageQuery {
    pub page_number: Option<String>,
    pub page_size: Option<String>,
}

/// A validated page selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_number: usize,
    pub page_size: usize,
}

impl PageRequest {
    pub fn new(page_number: usize, page_size: usize) -> Self {
        Self {
            page_number,
            page_size,
        }
    }
}

/// One page of records plus navigation metadata
///
/// `next` and `previous` are page numbers; [`Page::into_envelope`] turns them
/// into links.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub next: Option<usize>,
    pub previous: Option<usize>,
}

impl<T> Page<T> {
    /// Convert every item while keeping the page metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
            next: self.next,
            previous: self.previous,
        }
    }

    /// Build the JSON envelope sent to clients
    pub fn into_envelope(self, links: &PageLinks) -> PageEnvelope<T> {
        PageEnvelope {
            next: self.next.map(|n| links.link(n)),
            previous: self.previous.map(|p| links.link(p)),
            page_number: self.page_number,
            page_size: self.page_size,
            total_pages: self.total_pages,
            total_items: self.total_items,
            results: self.items,
        }
    }
}

/// Paginated response body. Field names and order are part of the API.
#[derive(Debug, Clone, Serialize)]
pub struct PageEnvelope<T> {
    pub next: Option<String>,
    pub previous: Option<String>,
    pub page_number: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub results: Vec<T>,
}

/// Builds links to sibling pages of the current request
///
/// Every query parameter except `page_number` is carried over, so filters
/// survive navigation. Keys are compared after percent-decoding, the same way
/// the query extractor reads them. A link to page 1 drops `page_number` entirely.
#[derive(Debug, Clone)]
pub struct PageLinks {
    path: String,
    retained: Vec<(String, String)>,
}

impl PageLinks {
    pub fn new(path: impl Into<String>, query: Option<&str>) -> Self {
        let retained = serde_urlencoded::from_str::<Vec<(String, String)>>(
            query.unwrap_or_default(),
        )
        .unwrap_or_default()
        .into_iter()
        .filter(|(key, _)| key != PAGE_NUMBER_PARAM)
        .collect();

        Self {
            path: path.into(),
            retained,
        }
    }

    pub fn from_uri(uri: &Uri) -> Self {
        Self::new(uri.path(), uri.query())
    }

    /// Link to `page_number`, relative to the server root
    pub fn link(&self, page_number: usize) -> String {
        let mut pairs = self.retained.clone();
        if page_number > 1 {
            pairs.push((PAGE_NUMBER_PARAM.to_string(), page_number.to_string()));
        }

        match serde_urlencoded::to_string(&pairs) {
            Ok(query) if !query.is_empty() => format!("{}?{}", self.path, query),
            _ => self.path.clone(),
        }
    }
}

/// Cuts pages out of ordered sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    default_page_size: usize,
    max_page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE)
    }
}

impl Paginator {
    /// Create a paginator. Sizes are forced to be at least 1 and the default
    /// never exceeds the maximum.
    pub fn new(default_page_size: usize, max_page_size: usize) -> Self {
        let max_page_size = max_page_size.max(1);
        Self {
            default_page_size: default_page_size.clamp(1, max_page_size),
            max_page_size,
        }
    }

    pub fn default_page_size(&self) -> usize {
        self.default_page_size
    }

    pub fn max_page_size(&self) -> usize {
        self.max_page_size
    }

    /// Turn raw query parameters into a page request
    ///
    /// - missing `page_number` means page 1; a non-integer one is an invalid page
    /// - missing, non-integer or zero `page_size` means the default size
    /// - `page_size` above the maximum is clamped
    pub fn request(&self, query: &PageQuery) -> Result<PageRequest, PaginationError> {
        let page_number = match query.page_number.as_deref().map(str::trim) {
            None | Some("") => 1,
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| PaginationError::NotAnInteger {
                    value: raw.to_string(),
                })?,
        };

        let page_size = query
            .page_size
            .as_deref()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(self.default_page_size);

        Ok(PageRequest::new(page_number, self.clamp_page_size(page_size)))
    }

    fn clamp_page_size(&self, page_size: usize) -> usize {
        page_size.clamp(1, self.max_page_size)
    }

    /// Cut the requested page out of `provider`
    ///
    /// Fails with [`PaginationError`] when the page number is below 1, or past
    /// the last page. An empty sequence still has a (empty) first page.
    pub fn paginate<P>(
        &self,
        provider: &P,
        request: PageRequest,
    ) -> Result<Page<P::Item>, PaginationError>
    where
        P: SequenceProvider + ?Sized,
    {
        let page_size = self.clamp_page_size(request.page_size);
        let page_number = request.page_number;

        if page_number < 1 {
            return Err(PaginationError::BelowFirst { page_number });
        }

        let total_items = provider.count();
        let total_pages = total_items.div_ceil(page_size);
        let last_page = total_pages.max(1);

        if page_number > last_page {
            return Err(PaginationError::PastLast {
                page_number,
                last_page,
            });
        }

        let offset = (page_number - 1) * page_size;
        let items = provider.slice(offset, page_size);

        Ok(Page {
            items,
            page_number,
            page_size,
            total_items,
            total_pages,
            next: (page_number < total_pages).then_some(page_number + 1),
            previous: (page_number > 1).then(|| page_number - 1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page_number: Option<&str>, page_size: Option<&str>) -> PageQuery {
        PageQuery {
            page_number: page_number.map(str::to_string),
            page_size: page_size.map(str::to_string),
        }
    }

    #[test]
    fn test_request_defaults() {
        let paginator = Paginator::default();
        let request = paginator.request(&PageQuery::default()).unwrap();
        assert_eq!(request, PageRequest::new(1, 20));
    }

    #[test]
    fn test_request_clamps_oversized_page_size() {
        let paginator = Paginator::default();
        let request = paginator.request(&query(None, Some("1000"))).unwrap();
        assert_eq!(request.page_size, 100);
    }

    #[test]
    fn test_request_falls_back_on_bad_page_size() {
        let paginator = Paginator::default();
        for raw in ["0", "-5", "ten", ""] {
            let request = paginator.request(&query(None, Some(raw))).unwrap();
            assert_eq!(request.page_size, 20, "page_size={:?}", raw);
        }
    }

    #[test]
    fn test_request_rejects_non_integer_page() {
        let paginator = Paginator::default();
        let err = paginator.request(&query(Some("abc"), None)).unwrap_err();
        assert_eq!(
            err,
            PaginationError::NotAnInteger {
                value: "abc".to_string()
            }
        );
        assert!(paginator.request(&query(Some("-1"), None)).is_err());
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        let paginator = Paginator::new(20, 100);
        for total in [0usize, 1, 19, 20, 21, 40, 41, 145] {
            let records: Vec<usize> = (0..total).collect();
            let page = paginator.paginate(&records, PageRequest::new(1, 20)).unwrap();
            assert_eq!(page.total_pages, total.div_ceil(20), "total={}", total);
            assert_eq!(page.total_items, total);
        }
    }

    #[test]
    fn test_twenty_one_records() {
        let paginator = Paginator::default();
        let records: Vec<u32> = (1..=21).collect();

        let first = paginator.paginate(&records, PageRequest::new(1, 20)).unwrap();
        assert_eq!(first.items.len(), 20);
        assert_eq!(first.next, Some(2));
        assert_eq!(first.previous, None);

        let second = paginator.paginate(&records, PageRequest::new(2, 20)).unwrap();
        assert_eq!(second.items, vec![21]);
        assert_eq!(second.next, None);
        assert_eq!(second.previous, Some(1));
    }

    #[test]
    fn test_empty_sequence_has_one_empty_page() {
        let paginator = Paginator::default();
        let records: Vec<u32> = Vec::new();

        let page = paginator.paginate(&records, PageRequest::new(1, 20)).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.next, None);
        assert_eq!(page.previous, None);

        let err = paginator
            .paginate(&records, PageRequest::new(2, 20))
            .unwrap_err();
        assert_eq!(
            err,
            PaginationError::PastLast {
                page_number: 2,
                last_page: 1
            }
        );
    }

    #[test]
    fn test_page_zero_is_invalid() {
        let paginator = Paginator::default();
        let records = vec![1, 2, 3];
        let err = paginator.paginate(&records, PageRequest::new(0, 20)).unwrap_err();
        assert_eq!(err, PaginationError::BelowFirst { page_number: 0 });
    }

    #[test]
    fn test_page_after_last_is_invalid() {
        let paginator = Paginator::default();
        let records: Vec<u32> = (0..45).collect();
        assert!(paginator.paginate(&records, PageRequest::new(3, 20)).is_ok());
        assert!(paginator.paginate(&records, PageRequest::new(4, 20)).is_err());
    }

    #[test]
    fn test_pages_concatenate_to_sequence() {
        let paginator = Paginator::default();
        let records: Vec<u32> = (0..53).rev().collect();

        for page_size in 1..=12 {
            let first = paginator
                .paginate(&records, PageRequest::new(1, page_size))
                .unwrap();
            let mut seen = first.items.clone();
            for page_number in 2..=first.total_pages {
                let page = paginator
                    .paginate(&records, PageRequest::new(page_number, page_size))
                    .unwrap();
                assert!(page.items.len() <= page_size);
                seen.extend(page.items);
            }
            assert_eq!(seen, records, "page_size={}", page_size);
        }
    }

    #[test]
    fn test_paginate_reclamps_page_size() {
        let paginator = Paginator::new(20, 100);
        let records: Vec<u32> = (0..250).collect();
        let page = paginator
            .paginate(&records, PageRequest::new(1, 1000))
            .unwrap();
        assert_eq!(page.page_size, 100);
        assert_eq!(page.items.len(), 100);

        let last = paginator
            .paginate(&records, PageRequest::new(3, 1000))
            .unwrap();
        assert_eq!(last.items.len(), 50);
    }

    #[test]
    fn test_slice_provider() {
        let paginator = Paginator::default();
        let records = [10, 20, 30];
        let page = paginator
            .paginate(&records[..], PageRequest::new(2, 2))
            .unwrap();
        assert_eq!(page.items, vec![30]);
    }

    #[test]
    fn test_links_keep_filters_and_replace_page() {
        let links = PageLinks::new("/posts", Some("author=abc&page_number=2&page_size=5"));
        assert_eq!(links.link(3), "/posts?author=abc&page_size=5&page_number=3");
        assert_eq!(links.link(1), "/posts?author=abc&page_size=5");

        let bare = PageLinks::new("/users", None);
        assert_eq!(bare.link(1), "/users");
        assert_eq!(bare.link(2), "/users?page_number=2");
    }

    #[test]
    fn test_links_drop_percent_encoded_page_key() {
        let links = PageLinks::new("/posts", Some("page%5Fnumber=2&page_size=2"));
        assert_eq!(links.link(3), "/posts?page_size=2&page_number=3");
        assert_eq!(links.link(1), "/posts?page_size=2");
    }

    #[test]
    fn test_links_reencode_retained_values() {
        let links = PageLinks::new("/users", Some("username=ada%20l&page_number=4"));
        assert_eq!(links.link(5), "/users?username=ada+l&page_number=5");
        assert_eq!(links.link(1), "/users?username=ada+l");
    }

    #[test]
    fn test_envelope_field_order() {
        let paginator = Paginator::default();
        let records: Vec<u32> = (0..21).collect();
        let page = paginator.paginate(&records, PageRequest::new(2, 20)).unwrap();
        let envelope = page.into_envelope(&PageLinks::new("/posts", Some("page_number=2")));

        let json = serde_json::to_string(&envelope).unwrap();
        assert!(json.starts_with(
            r#"{"next":null,"previous":"/posts","page_number":2,"page_size":20,"total_pages":2,"total_items":21,"results":[20]"#
        ));
    }
}

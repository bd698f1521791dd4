//! # List View State
//!
//! Paginated list state with stale-response protection.
//!
//! ## Why an Epoch?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Stale Response Problem                               │
//! │                                                                         │
//! │  t0: user opens Offers page 1 ──► begin_load() ──► token(epoch=1)      │
//! │  t1: user clicks page 2        ──► begin_load() ──► token(epoch=2)     │
//! │  t2: page 2 response arrives   ──► apply(token=2) ──► APPLIED          │
//! │  t3: page 1 response arrives   ──► apply(token=1) ──► DROPPED          │
//! │                                                                         │
//! │  Responses race on the network; whichever view the user asked for      │
//! │  LAST wins. A response carrying an old token is silently ignored,      │
//! │  never merged.                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every navigation (page change, new search, leaving the view) bumps the
//! epoch, which invalidates all in-flight loads started before it.

use std::sync::{Arc, Mutex};

use dealdesk_client::dto::Page;

/// Opaque token tying an in-flight load to the view state that started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken {
    epoch: u64,
}

/// Paginated list state for one dashboard view.
#[derive(Debug)]
pub struct ListView<T> {
    /// Current view identity; bumped on every navigation.
    epoch: u64,

    /// 1-based page the user is looking at (or loading).
    page: u32,

    /// Page size used for requests.
    per_page: u32,

    /// Total matching items as of the last applied response.
    total: u64,

    /// Items of the last applied response.
    items: Vec<T>,

    /// True while a load for the current epoch is in flight.
    loading: bool,
}

impl<T> ListView<T> {
    /// Creates an empty view on page 1.
    pub fn new(per_page: u32) -> Self {
        ListView {
            epoch: 0,
            page: 1,
            per_page: per_page.max(1),
            total: 0,
            items: Vec::new(),
            loading: false,
        }
    }

    /// Starts a load for the current page, invalidating any in-flight load.
    ///
    /// Returns the token the eventual response must present to
    /// [`apply`](Self::apply).
    pub fn begin_load(&mut self) -> LoadToken {
        self.epoch += 1;
        self.loading = true;
        LoadToken { epoch: self.epoch }
    }

    /// Navigates to a page and starts loading it.
    pub fn navigate_to_page(&mut self, page: u32) -> LoadToken {
        self.page = page.max(1);
        self.begin_load()
    }

    /// Marks the view as navigated away from. All in-flight loads become
    /// stale; their responses will be dropped on arrival.
    pub fn leave(&mut self) {
        self.epoch += 1;
        self.loading = false;
    }

    /// Applies a load response if it belongs to the current view identity.
    ///
    /// Returns true when applied; false when the token is stale and the
    /// response was dropped.
    pub fn apply(&mut self, token: LoadToken, page: Page<T>) -> bool {
        if token.epoch != self.epoch {
            return false;
        }

        self.items = page.items;
        self.total = page.total;
        self.page = page.page;
        self.per_page = page.per_page;
        self.loading = false;
        true
    }

    /// Records a failed load if it belongs to the current view identity.
    ///
    /// Items from the previous successful load stay visible; the caller
    /// surfaces the error message alongside them.
    pub fn fail(&mut self, token: LoadToken) -> bool {
        if token.epoch != self.epoch {
            return false;
        }
        self.loading = false;
        true
    }

    /// Items of the last applied response.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Total matching items across all pages.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Current 1-based page.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Page size used for requests.
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// True while a load for the current epoch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True if pages after the current one exist.
    pub fn has_more(&self) -> bool {
        (self.page as u64) * (self.per_page as u64) < self.total
    }
}

/// Shared list view state.
#[derive(Debug)]
pub struct ListViewState<T> {
    view: Arc<Mutex<ListView<T>>>,
}

impl<T> ListViewState<T> {
    /// Creates a new view state with the given page size.
    pub fn new(per_page: u32) -> Self {
        ListViewState {
            view: Arc::new(Mutex::new(ListView::new(per_page))),
        }
    }

    /// Executes a function with read access to the view.
    pub fn with_view<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ListView<T>) -> R,
    {
        let view = self.view.lock().expect("View mutex poisoned");
        f(&view)
    }

    /// Executes a function with write access to the view.
    pub fn with_view_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ListView<T>) -> R,
    {
        let mut view = self.view.lock().expect("View mutex poisoned");
        f(&mut view)
    }
}

impl<T> Clone for ListViewState<T> {
    fn clone(&self) -> Self {
        ListViewState {
            view: Arc::clone(&self.view),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(items: Vec<u32>, total: u64, page: u32) -> Page<u32> {
        Page {
            items,
            total,
            page,
            per_page: 25,
        }
    }

    #[test]
    fn test_apply_current_load() {
        let mut view = ListView::new(25);
        let token = view.begin_load();
        assert!(view.is_loading());

        assert!(view.apply(token, page_of(vec![1, 2, 3], 3, 1)));
        assert_eq!(view.items(), &[1, 2, 3]);
        assert_eq!(view.total(), 3);
        assert!(!view.is_loading());
    }

    #[test]
    fn test_stale_response_dropped() {
        let mut view = ListView::new(25);

        let stale = view.navigate_to_page(1);
        let current = view.navigate_to_page(2);

        // Page 2 answer arrives first and wins.
        assert!(view.apply(current, page_of(vec![26, 27], 27, 2)));

        // The late page 1 answer is dropped, view unchanged.
        assert!(!view.apply(stale, page_of(vec![1, 2], 27, 1)));
        assert_eq!(view.page(), 2);
        assert_eq!(view.items(), &[26, 27]);
    }

    #[test]
    fn test_leave_invalidates_inflight_load() {
        let mut view = ListView::new(25);
        let token = view.begin_load();

        view.leave();

        assert!(!view.apply(token, page_of(vec![1], 1, 1)));
        assert!(view.items().is_empty());
        assert!(!view.is_loading());
    }

    #[test]
    fn test_failed_load_keeps_previous_items() {
        let mut view = ListView::new(25);
        let token = view.begin_load();
        assert!(view.apply(token, page_of(vec![1, 2], 2, 1)));

        let token = view.begin_load();
        assert!(view.fail(token));
        assert_eq!(view.items(), &[1, 2]); // previous page still visible
        assert!(!view.is_loading());
    }

    #[test]
    fn test_stale_failure_ignored() {
        let mut view = ListView::<i32>::new(25);
        let stale = view.begin_load();
        let _current = view.begin_load();

        assert!(!view.fail(stale));
        assert!(view.is_loading()); // the current load is still in flight
    }

    #[test]
    fn test_has_more() {
        let mut view = ListView::new(25);
        let token = view.begin_load();
        view.apply(token, page_of((1..=25).collect(), 60, 1));
        assert!(view.has_more());

        let token = view.navigate_to_page(3);
        view.apply(token, page_of(vec![51], 60, 3));
        assert!(!view.has_more());
    }
}

//! The board gateway: the engine's one I/O boundary.
//!
//! Everything the engine needs from the upstream board goes through
//! [`BoardGateway`]. Production uses the Trello implementation in
//! [`trello`]; tests substitute their own.

pub mod trello;

use std::sync::atomic::{AtomicBool, Ordering};

use jiff::Timestamp;

use crate::model::{BoardSnapshot, CommentAction, Member};

/// Errors from board access.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// Required configuration keys are absent. Fatal before any fetch, so a
    /// misconfigured deployment never serves empty-but-valid-looking data.
    #[error("missing board configuration: {}", .0.join(", "))]
    MissingConfig(Vec<&'static str>),

    #[error("board request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected board response: {0}")]
    Json(#[from] serde_json::Error),

    /// The comment load was cancelled by the caller mid-pagination.
    #[error("comment fetch cancelled")]
    Cancelled,
}

pub type Result<T> = core::result::Result<T, BoardError>;

/// Page size for comment pagination; the upstream API caps pages at 1000.
pub const COMMENT_PAGE_LIMIT: usize = 1000;

/// What the engine needs from the upstream board.
pub trait BoardGateway {
    /// Fetch the current board snapshot: open cards and lists, custom field
    /// definitions, and members.
    fn fetch_snapshot(&self) -> Result<BoardSnapshot>;

    /// Fetch one page of comment actions, newest first, older than `before`.
    fn fetch_comment_page(&self, before: Option<&str>, limit: usize) -> Result<Vec<CommentAction>>;

    /// Set a card's due date, scheduling it as a stop.
    fn plan_stop(&self, card_id: &str, due: Timestamp) -> Result<()>;

    /// Clear a card's due date, unscheduling it.
    fn remove_stop(&self, card_id: &str) -> Result<()>;

    /// Apply a batch of due-date updates, in order.
    fn reorder_stops(&self, updates: &[(String, Timestamp)]) -> Result<()>;
}

/// Fetch the complete comment history.
///
/// Pages come strictly sequentially: a full page means more remain, a short
/// page is the end-of-data sentinel. Each page is handed to `on_page` as it
/// arrives so a consumer can render incrementally, but the accumulation is
/// only returned once every page succeeded — a fetch error or a raised
/// `cancel` flag aborts the whole load, so partial results are never
/// mistaken for the complete log.
pub fn collect_comments<G: BoardGateway + ?Sized>(
    gateway: &G,
    cancel: &AtomicBool,
    mut on_page: impl FnMut(&[CommentAction]),
) -> Result<Vec<CommentAction>> {
    let mut all = Vec::new();
    let mut before: Option<String> = None;

    loop {
        if cancel.load(Ordering::Relaxed) {
            return Err(BoardError::Cancelled);
        }

        let page = gateway.fetch_comment_page(before.as_deref(), COMMENT_PAGE_LIMIT)?;
        on_page(&page);

        let full_page = page.len() >= COMMENT_PAGE_LIMIT;
        before = page.last().map(|action| action.id.clone());
        all.extend(page);

        if !full_page {
            return Ok(all);
        }
    }
}

/// Whether the configured member may plan: admins and normal members only.
pub fn can_plan(members: &[Member], member_id: Option<&str>) -> bool {
    let Some(member_id) = member_id else {
        return false;
    };
    members
        .iter()
        .any(|member| member.id == member_id && matches!(member.member_type.as_str(), "admin" | "normal"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;

    use crate::model::ActionData;

    fn action(id: usize) -> CommentAction {
        CommentAction {
            id: format!("a{id}"),
            kind: "commentCard".into(),
            date: "2025-07-07T12:00:00Z".parse().unwrap(),
            data: ActionData::default(),
        }
    }

    fn page(start: usize, len: usize) -> Vec<CommentAction> {
        (start..start + len).map(action).collect()
    }

    /// Serves a fixed sequence of pages; panics past the end.
    struct PagedGateway {
        pages: RefCell<Vec<Vec<CommentAction>>>,
        calls: RefCell<usize>,
        fail_on_call: Option<usize>,
    }

    impl PagedGateway {
        fn new(pages: Vec<Vec<CommentAction>>) -> Self {
            Self {
                pages: RefCell::new(pages),
                calls: RefCell::new(0),
                fail_on_call: None,
            }
        }

        fn calls(&self) -> usize {
            *self.calls.borrow()
        }
    }

    impl BoardGateway for PagedGateway {
        fn fetch_snapshot(&self) -> Result<BoardSnapshot> {
            unreachable!("not used by pagination tests")
        }

        fn fetch_comment_page(
            &self,
            _before: Option<&str>,
            _limit: usize,
        ) -> Result<Vec<CommentAction>> {
            let call = *self.calls.borrow();
            *self.calls.borrow_mut() += 1;
            if self.fail_on_call == Some(call) {
                // Shape error standing in for an upstream failure.
                return Err(serde_json::from_str::<u32>("not json").unwrap_err().into());
            }
            Ok(self.pages.borrow_mut().remove(0))
        }

        fn plan_stop(&self, _card_id: &str, _due: Timestamp) -> Result<()> {
            unreachable!("not used by pagination tests")
        }

        fn remove_stop(&self, _card_id: &str) -> Result<()> {
            unreachable!("not used by pagination tests")
        }

        fn reorder_stops(&self, _updates: &[(String, Timestamp)]) -> Result<()> {
            unreachable!("not used by pagination tests")
        }
    }

    #[test]
    fn pagination_stops_on_a_short_page() {
        let gateway = PagedGateway::new(vec![page(0, 1000), page(1000, 1000), page(2000, 400)]);
        let cancel = AtomicBool::new(false);

        let all = collect_comments(&gateway, &cancel, |_| {}).unwrap();

        assert_eq!(gateway.calls(), 3);
        assert_eq!(all.len(), 2400);
        // Accumulated in fetch order, untouched by classification.
        assert_eq!(all[0].id, "a0");
        assert_eq!(all[2399].id, "a2399");
    }

    #[test]
    fn single_short_page_terminates_immediately() {
        let gateway = PagedGateway::new(vec![page(0, 3)]);
        let cancel = AtomicBool::new(false);
        let all = collect_comments(&gateway, &cancel, |_| {}).unwrap();
        assert_eq!(gateway.calls(), 1);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn pages_are_delivered_incrementally() {
        let gateway = PagedGateway::new(vec![page(0, 1000), page(1000, 10)]);
        let cancel = AtomicBool::new(false);
        let mut batch_sizes = Vec::new();

        collect_comments(&gateway, &cancel, |batch| batch_sizes.push(batch.len())).unwrap();

        assert_eq!(batch_sizes, [1000, 10]);
    }

    #[test]
    fn mid_pagination_failure_aborts_the_load() {
        let mut gateway = PagedGateway::new(vec![page(0, 1000), Vec::new()]);
        gateway.fail_on_call = Some(1);
        let cancel = AtomicBool::new(false);

        let err = collect_comments(&gateway, &cancel, |_| {}).unwrap_err();

        assert!(matches!(err, BoardError::Json(_)));
        assert_eq!(gateway.calls(), 2);
    }

    #[test]
    fn cancellation_stops_before_the_next_page() {
        let gateway = PagedGateway::new(vec![page(0, 1000), page(1000, 10)]);
        let cancel = AtomicBool::new(false);

        let err = collect_comments(&gateway, &cancel, |_| {
            // Consumer walks away after the first batch.
            cancel.store(true, Ordering::Relaxed);
        })
        .unwrap_err();

        assert!(matches!(err, BoardError::Cancelled));
        assert_eq!(gateway.calls(), 1);
    }

    #[test]
    fn planning_requires_admin_or_normal_membership() {
        let members = vec![
            Member {
                id: "m-admin".into(),
                member_type: "admin".into(),
            },
            Member {
                id: "m-observer".into(),
                member_type: "observer".into(),
            },
        ];
        assert!(can_plan(&members, Some("m-admin")));
        assert!(!can_plan(&members, Some("m-observer")));
        assert!(!can_plan(&members, Some("m-stranger")));
        assert!(!can_plan(&members, None));
    }
}

use tracing::{debug, info, warn};

use super::pagination::Pagination;
use crate::domain::{Record, RecordId};
use crate::errors::ClientError;
use crate::notify::{Notification, Notifications};
use crate::transport::RecordTransport;

const FETCH_FAILED: &str = "error fetching users";
const DELETE_FAILED: &str = "error deleting user";
const DELETE_SUCCEEDED: &str = "successfully deleted user";

/// Mutations that invalidate the list cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationEvent {
    Saved,
    Deleted(RecordId),
}

/// Owns the authoritative list cache and the page window over it.
///
/// The cache is only ever replaced wholesale by a successful fetch; deletes
/// and saves trigger a refetch instead of patching it locally, so display
/// order and membership always come from the service.
#[derive(Debug)]
pub struct RecordListController {
    cache: Vec<Record>,
    pagination: Pagination,
    activated: bool,
    notifications: Notifications,
}

impl RecordListController {
    pub fn new(page_size: usize) -> Self {
        Self {
            cache: Vec::new(),
            pagination: Pagination::new(page_size),
            activated: false,
            notifications: Notifications::default(),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.cache
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    /// Fetches the collection the first time the list view is shown. Later
    /// calls do nothing until [`invalidate`](Self::invalidate) is called.
    pub fn activate<T>(&mut self, transport: &T)
    where
        T: RecordTransport + ?Sized,
    {
        if self.activated {
            return;
        }
        self.activated = true;
        self.refresh(transport);
    }

    /// Drops the cache and page position when the view is left. The next
    /// activation starts empty on page 1 and refetches.
    pub fn invalidate(&mut self) {
        self.cache.clear();
        self.pagination = Pagination::new(self.pagination.page_size());
        self.activated = false;
    }

    pub fn refresh<T>(&mut self, transport: &T)
    where
        T: RecordTransport + ?Sized,
    {
        let result = transport.list();
        self.apply_fetch(result);
    }

    /// Applies a list response. Success replaces the cache and re-clamps the
    /// page; failure keeps whatever is cached and raises a notification. The
    /// most recently applied response wins.
    pub fn apply_fetch(&mut self, result: Result<Vec<Record>, ClientError>) {
        match result {
            Ok(records) => {
                debug!(count = records.len(), "list cache replaced");
                self.cache = records;
                self.pagination.clamp(self.cache.len());
            }
            Err(err) => {
                warn!(error = %err, "fetching users failed");
                self.notifications.push(Notification::error(FETCH_FAILED));
            }
        }
    }

    /// Refetches after any mutation. The list counts as shown afterwards, so
    /// the following activation does not fetch again.
    pub fn handle<T>(&mut self, event: MutationEvent, transport: &T)
    where
        T: RecordTransport + ?Sized,
    {
        debug!(?event, "mutation observed; refetching");
        self.activated = true;
        self.refresh(transport);
    }

    /// Deletes `id` remotely; on success refetches the whole list.
    pub fn request_delete<T>(&mut self, id: &RecordId, transport: &T) -> bool
    where
        T: RecordTransport + ?Sized,
    {
        match transport.delete(id) {
            Ok(()) => {
                info!(%id, "user deleted");
                self.notifications.push(Notification::success(DELETE_SUCCEEDED));
                self.handle(MutationEvent::Deleted(id.clone()), transport);
                true
            }
            Err(err) => {
                warn!(%id, error = %err, "deleting user failed");
                self.notifications.push(Notification::error(DELETE_FAILED));
                false
            }
        }
    }

    pub fn page_size(&self) -> usize {
        self.pagination.page_size()
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current_page()
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count(self.cache.len())
    }

    /// The slice of the cache for the current page.
    pub fn visible_page(&self) -> &[Record] {
        self.pagination.window(&self.cache)
    }

    /// Any page of the cache; out-of-range pages clamp.
    pub fn derive_page(&self, page: usize, page_size: usize) -> &[Record] {
        super::pagination::derive_page(&self.cache, page, page_size)
    }

    pub fn next_page(&mut self) {
        self.pagination.next(self.cache.len());
    }

    pub fn previous_page(&mut self) {
        self.pagination.previous(self.cache.len());
    }

    pub fn go_to(&mut self, page: usize) {
        self.pagination.go_to(page, self.cache.len());
    }

    pub fn has_next(&self) -> bool {
        !self.pagination.is_last(self.cache.len())
    }

    pub fn has_previous(&self) -> bool {
        !self.pagination.is_first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationKind;
    use crate::transport::{InMemoryTransport, Operation};
    use chrono::NaiveDate;

    fn record(id: &str) -> Record {
        Record {
            id: RecordId::new(id),
            username: id.to_lowercase(),
            first_name: id.into(),
            last_name: "Test".into(),
            dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        }
    }

    fn ids(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn activation_fetches_once() {
        let transport = InMemoryTransport::with_records(vec![record("A")]);
        let mut list = RecordListController::new(5);
        list.activate(&transport);
        list.activate(&transport);
        assert_eq!(transport.calls_of(Operation::List), 1);
        assert_eq!(ids(list.records()), vec!["A"]);

        list.invalidate();
        list.activate(&transport);
        assert_eq!(transport.calls_of(Operation::List), 2);
    }

    #[test]
    fn failed_fetch_leaves_empty_cache_and_notifies() {
        let transport = InMemoryTransport::with_records(vec![record("A")]);
        transport.fail_next(Operation::List, ClientError::transport("down"));
        let mut list = RecordListController::new(5);
        list.activate(&transport);
        assert!(list.is_empty());
        assert_eq!(list.page_count(), 1);
        let notes = list.take_notifications();
        assert_eq!(notes, vec![Notification::error(FETCH_FAILED)]);
    }

    #[test]
    fn failed_delete_keeps_cache_untouched() {
        let transport = InMemoryTransport::with_records(vec![record("A"), record("B")]);
        let mut list = RecordListController::new(5);
        list.activate(&transport);
        transport.fail_next(Operation::Delete, ClientError::transport("boom"));
        assert!(!list.request_delete(&RecordId::new("A"), &transport));
        assert_eq!(ids(list.records()), vec!["A", "B"]);
        assert_eq!(transport.calls_of(Operation::List), 1);
        let notes = list.take_notifications();
        assert_eq!(notes[0].kind, NotificationKind::Error);
    }

    #[test]
    fn successful_delete_refetches() {
        let transport = InMemoryTransport::with_records(vec![record("A"), record("B")]);
        let mut list = RecordListController::new(5);
        list.activate(&transport);
        assert!(list.request_delete(&RecordId::new("A"), &transport));
        assert_eq!(transport.calls_of(Operation::List), 2);
        assert_eq!(ids(list.records()), vec!["B"]);
        assert_eq!(
            list.take_notifications(),
            vec![Notification::success(DELETE_SUCCEEDED)]
        );
    }

    #[test]
    fn remount_after_failed_fetch_starts_empty_on_first_page() {
        let records = vec![record("A"), record("B"), record("C")];
        let transport = InMemoryTransport::with_records(records);
        let mut list = RecordListController::new(2);
        list.activate(&transport);
        list.next_page();
        assert_eq!(list.current_page(), 2);

        transport.delete(&RecordId::new("A")).unwrap();
        list.invalidate();
        transport.fail_next(Operation::List, ClientError::transport("down"));
        list.activate(&transport);

        assert!(list.is_empty());
        assert_eq!(list.current_page(), 1);
        assert_eq!(transport.calls_of(Operation::List), 2);
        assert_eq!(
            list.take_notifications(),
            vec![Notification::error(FETCH_FAILED)]
        );
    }

    #[test]
    fn saved_event_refetches_and_counts_as_shown() {
        let transport = InMemoryTransport::with_records(vec![record("A")]);
        let mut list = RecordListController::new(5);
        list.activate(&transport);
        list.invalidate();

        list.handle(MutationEvent::Saved, &transport);
        assert_eq!(ids(list.records()), vec!["A"]);
        list.activate(&transport);
        assert_eq!(transport.calls_of(Operation::List), 2);
    }

    #[test]
    fn later_response_wins() {
        let mut list = RecordListController::new(5);
        list.apply_fetch(Ok(vec![record("A"), record("B")]));
        list.apply_fetch(Ok(vec![record("C")]));
        assert_eq!(ids(list.records()), vec!["C"]);
    }

    #[test]
    fn refetch_failure_keeps_previous_cache() {
        let mut list = RecordListController::new(5);
        list.apply_fetch(Ok(vec![record("A")]));
        list.apply_fetch(Err(ClientError::transport("down")));
        assert_eq!(ids(list.records()), vec!["A"]);
    }

    #[test]
    fn paging_window_follows_navigation() {
        let mut list = RecordListController::new(2);
        list.apply_fetch(Ok(vec![record("A"), record("B"), record("C")]));
        assert_eq!(list.page_count(), 2);
        assert_eq!(ids(list.visible_page()), vec!["A", "B"]);
        assert!(list.has_next());
        list.next_page();
        assert_eq!(ids(list.visible_page()), vec!["C"]);
        assert!(!list.has_next());
        assert!(list.has_previous());
        list.go_to(0);
        assert_eq!(list.current_page(), 1);
        assert_eq!(ids(list.derive_page(7, 2)), vec!["C"]);
    }
}

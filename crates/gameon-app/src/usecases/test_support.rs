//! Hand-written port fakes shared by the use case tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use gameon_core::ports::{
    merge_documents, ClockPort, Document, DocumentStorePort, GeolocationPort, KeyValuePort,
    LocationError, NavigationPort, PermissionStatus, PersistenceError, StoreReadError,
    StoreWriteError, UserNoticePort,
};
use gameon_core::preferences::ReverseGeocodedAddress;
use gameon_core::{LocationCoords, Notice, Route};
use serde_json::Value;
use tokio::sync::Notify;

#[derive(Default)]
pub struct InMemoryDocumentStore {
    docs: Mutex<HashMap<(String, String), Document>>,
    read_error: Mutex<Option<StoreReadError>>,
    write_error: Mutex<Option<StoreWriteError>>,
    writes: AtomicUsize,
}

impl InMemoryDocumentStore {
    pub fn insert(&self, collection: &str, id: &str, value: Value) {
        let doc = value.as_object().cloned().expect("object");
        self.docs
            .lock()
            .unwrap()
            .insert((collection.to_string(), id.to_string()), doc);
    }

    pub fn get(&self, collection: &str, id: &str) -> Option<Document> {
        self.docs
            .lock()
            .unwrap()
            .get(&(collection.to_string(), id.to_string()))
            .cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_reads(&self, err: StoreReadError) {
        *self.read_error.lock().unwrap() = Some(err);
    }

    pub fn fail_writes(&self, err: StoreWriteError) {
        *self.write_error.lock().unwrap() = Some(err);
    }

    pub fn heal(&self) {
        *self.read_error.lock().unwrap() = None;
        *self.write_error.lock().unwrap() = None;
    }
}

#[async_trait]
impl DocumentStorePort for InMemoryDocumentStore {
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreReadError> {
        if let Some(err) = self.read_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.get(collection, id))
    }

    async fn merge_write_document(
        &self,
        collection: &str,
        id: &str,
        partial: Document,
    ) -> Result<(), StoreWriteError> {
        if let Some(err) = self.write_error.lock().unwrap().clone() {
            return Err(err);
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut docs = self.docs.lock().unwrap();
        let target = docs
            .entry((collection.to_string(), id.to_string()))
            .or_default();
        merge_documents(target, partial);
        Ok(())
    }

    async fn list_documents(
        &self,
        collection: &str,
    ) -> Result<Vec<(String, Document)>, StoreReadError> {
        if let Some(err) = self.read_error.lock().unwrap().clone() {
            return Err(err);
        }
        let mut docs: Vec<(String, Document)> = self
            .docs
            .lock()
            .unwrap()
            .iter()
            .filter(|((c, _), _)| c == collection)
            .map(|((_, id), doc)| (id.clone(), doc.clone()))
            .collect();
        docs.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(docs)
    }
}

/// Clock pinned to a UTC instant; local time is reported as UTC.
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn at(rfc3339: &str) -> Self {
        let now = DateTime::parse_from_rfc3339(rfc3339)
            .expect("valid timestamp")
            .with_timezone(&Utc);
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance_minutes(&self, minutes: i64) {
        *self.now.lock().unwrap() += Duration::minutes(minutes);
    }
}

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }

    fn now_local(&self) -> NaiveDateTime {
        self.now().naive_utc()
    }
}

#[derive(Default)]
pub struct RecordingNotices {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotices {
    pub fn all(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.all().into_iter().map(|n| n.title).collect()
    }
}

impl UserNoticePort for RecordingNotices {
    fn alert(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

pub struct FakeNavigator {
    stack: Mutex<Vec<Route>>,
}

impl FakeNavigator {
    pub fn at(route: Route) -> Self {
        Self {
            stack: Mutex::new(vec![route]),
        }
    }

    pub fn stack(&self) -> Vec<Route> {
        self.stack.lock().unwrap().clone()
    }
}

impl NavigationPort for FakeNavigator {
    fn current_route(&self) -> Route {
        *self.stack.lock().unwrap().last().expect("non-empty stack")
    }

    fn replace(&self, route: Route) {
        let mut stack = self.stack.lock().unwrap();
        stack.pop();
        stack.push(route);
    }

    fn push(&self, route: Route) {
        self.stack.lock().unwrap().push(route);
    }

    fn back(&self) -> bool {
        let mut stack = self.stack.lock().unwrap();
        if stack.len() > 1 {
            stack.pop();
            true
        } else {
            false
        }
    }
}

pub struct FakeGeolocation {
    pub permission: Result<PermissionStatus, LocationError>,
    pub position: Result<LocationCoords, LocationError>,
    pub address: Result<Option<ReverseGeocodedAddress>, LocationError>,
}

impl FakeGeolocation {
    pub fn granted(coords: LocationCoords, address: Option<ReverseGeocodedAddress>) -> Self {
        Self {
            permission: Ok(PermissionStatus::Granted),
            position: Ok(coords),
            address: Ok(address),
        }
    }

    pub fn denied() -> Self {
        Self {
            permission: Ok(PermissionStatus::Denied),
            position: Err(LocationError::PermissionDenied),
            address: Ok(None),
        }
    }
}

#[async_trait]
impl GeolocationPort for FakeGeolocation {
    async fn request_permission(&self) -> Result<PermissionStatus, LocationError> {
        self.permission.clone()
    }

    async fn current_position(&self) -> Result<LocationCoords, LocationError> {
        self.position.clone()
    }

    async fn reverse_geocode(
        &self,
        _coords: LocationCoords,
    ) -> Result<Option<ReverseGeocodedAddress>, LocationError> {
        self.address.clone()
    }
}

/// Key-value fake whose reads can be held until released.
#[derive(Default)]
pub struct MemoryKv {
    items: Mutex<HashMap<String, String>>,
    read_gate: Mutex<Option<Arc<Notify>>>,
    fail_reads: Mutex<bool>,
    fail_writes: Mutex<bool>,
    writes: Mutex<Vec<(String, String)>>,
}

impl MemoryKv {
    pub fn with_item(key: &str, value: &str) -> Self {
        let kv = Self::default();
        kv.items
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        kv
    }

    /// Blocks subsequent reads until the returned handle is notified.
    pub fn hold_reads(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.read_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn fail_reads(&self) {
        *self.fail_reads.lock().unwrap() = true;
    }

    pub fn fail_writes(&self) {
        *self.fail_writes.lock().unwrap() = true;
    }

    pub fn item(&self, key: &str) -> Option<String> {
        self.items.lock().unwrap().get(key).cloned()
    }

    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl KeyValuePort for MemoryKv {
    async fn get_item(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let gate = self.read_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if *self.fail_reads.lock().unwrap() {
            return Err(PersistenceError::Io("read failed".into()));
        }
        Ok(self.item(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(PersistenceError::Io("disk full".into()));
        }
        self.writes
            .lock()
            .unwrap()
            .push((key.to_string(), value.to_string()));
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

mockall::mock! {
    pub Auth {}

    #[async_trait]
    impl gameon_core::ports::AuthPort for Auth {
        fn subscribe(&self) -> gameon_core::ports::AuthSubscription;
        fn current_user(&self) -> Option<gameon_core::AuthUser>;
        async fn sign_in(
            &self,
            email: &str,
            password: &str,
        ) -> Result<gameon_core::AuthUser, gameon_core::ports::AuthError>;
        async fn sign_up(
            &self,
            email: &str,
            password: &str,
        ) -> Result<gameon_core::AuthUser, gameon_core::ports::AuthError>;
        async fn sign_out(&self) -> Result<(), gameon_core::ports::AuthError>;
    }
}

mockall::mock! {
    pub Notices {}

    impl UserNoticePort for Notices {
        fn alert(&self, notice: Notice);
    }
}

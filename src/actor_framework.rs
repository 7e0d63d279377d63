use std::fmt::Debug;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use crate::domain::{HasSlug, RecordMeta};
use crate::error::StoreError;
use crate::storage::{KeyedStore, LoadedRecords};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// A record type managed by a [`CollectionActor`].
///
/// One implementation per collection; the associated constants name the
/// storage key and id prefix.
pub trait Entity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Create: Send + Debug;
    type Patch: Send + Debug;
    type Action: Send + Debug;
    type ActionResult: Send + Debug;

    /// Short name used in logs and errors.
    const COLLECTION: &'static str;
    /// Versioned storage key, e.g. `brisk_services_v1`.
    const STORAGE_KEY: &'static str;
    /// Prefix of generated ids, e.g. `svc`.
    const ID_PREFIX: &'static str;
    /// Collections that must never be empty. An empty stored array is
    /// treated as corrupt and replaced by the seed.
    const SEED_REQUIRED: bool = false;

    fn meta(&self) -> &RecordMeta;
    fn meta_mut(&mut self) -> &mut RecordMeta;

    fn id(&self) -> &str {
        &self.meta().id
    }

    /// Build the record from its assigned metadata and the create payload.
    fn from_create(meta: RecordMeta, payload: Self::Create) -> Result<Self, String>;

    /// Shallow-merge `patch` into the record.
    fn apply_patch(&mut self, patch: Self::Patch) -> Result<(), String>;

    /// Entity-specific mutation beyond plain patching.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, String>;
}

/// A create payload plus the optional caller-supplied id and creation time.
#[derive(Debug, Clone)]
pub struct NewRecord<P> {
    pub id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub payload: P,
}

impl<P> NewRecord<P> {
    pub fn new(payload: P) -> Self {
        Self {
            id: None,
            created_at: None,
            payload,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// `<prefix>_<unix millis>_<6 base36 chars>`
pub fn generate_id(prefix: &str) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::rng();
    let suffix: String = (0..6)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{}_{}_{}", prefix, Utc::now().timestamp_millis(), suffix)
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum CollectionRequest<T: Entity> {
    List {
        respond_to: Response<Vec<T>>,
    },
    Get {
        id: String,
        respond_to: Response<Option<T>>,
    },
    Create {
        record: NewRecord<T::Create>,
        respond_to: Response<T>,
    },
    Update {
        id: String,
        patch: T::Patch,
        respond_to: Response<Option<T>>,
    },
    Remove {
        id: String,
        respond_to: Response<bool>,
    },
    Reset {
        respond_to: Response<Vec<T>>,
    },
    Action {
        id: String,
        action: T::Action,
        respond_to: Response<Option<T::ActionResult>>,
    },
}

macro_rules! send_error {
    ($respond_to:expr, $error:expr) => {{
        let _ = $respond_to.send(Err($error));
        return;
    }};
}

// =============================================================================
// 3. THE GENERIC ACTOR
// =============================================================================

const MAX_ID_ATTEMPTS: usize = 16;

/// Owns one persisted collection and serves requests one at a time.
///
/// The collection is re-read through [`KeyedStore`] on every request and
/// every mutation rewrites the whole array under the collection's key.
pub struct CollectionActor<T: Entity> {
    receiver: mpsc::Receiver<CollectionRequest<T>>,
    storage: KeyedStore,
    seed: Vec<T>,
    next_id_fn: Box<dyn Fn() -> String + Send + Sync>,
}

impl<T: Entity> CollectionActor<T> {
    pub fn new(
        buffer_size: usize,
        storage: KeyedStore,
        seed: Vec<T>,
        next_id_fn: impl Fn() -> String + Send + Sync + 'static,
    ) -> (Self, CollectionClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            storage,
            seed,
            next_id_fn: Box::new(next_id_fn),
        };
        (actor, CollectionClient::new(sender))
    }

    /// Actor whose ids come from [`generate_id`] with the entity's prefix.
    pub fn with_generated_ids(
        buffer_size: usize,
        storage: KeyedStore,
        seed: Vec<T>,
    ) -> (Self, CollectionClient<T>) {
        Self::new(buffer_size, storage, seed, || generate_id(T::ID_PREFIX))
    }

    #[instrument(name = "collection_actor", skip(self), fields(collection = T::COLLECTION))]
    pub async fn run(mut self) {
        info!(key = %self.storage.key(), "Collection actor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CollectionRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.ensure_init().records));
                }
                CollectionRequest::Get { id, respond_to } => {
                    self.handle_get(id, respond_to);
                }
                CollectionRequest::Create { record, respond_to } => {
                    self.handle_create(record, respond_to);
                }
                CollectionRequest::Update { id, patch, respond_to } => {
                    self.handle_update(id, patch, respond_to);
                }
                CollectionRequest::Remove { id, respond_to } => {
                    self.handle_remove(id, respond_to);
                }
                CollectionRequest::Reset { respond_to } => {
                    self.handle_reset(respond_to);
                }
                CollectionRequest::Action { id, action, respond_to } => {
                    self.handle_action(id, action, respond_to);
                }
            }
        }

        info!("Collection actor stopped");
    }

    /// Decoded records plus the stored entries that did not decode. Those
    /// are written back untouched by every mutation.
    fn ensure_init(&self) -> LoadedRecords<T> {
        let loaded = self.storage.init_with_seed(&self.seed);
        if T::SEED_REQUIRED && loaded.records.is_empty() && loaded.unreadable.is_empty() && !self.seed.is_empty() {
            warn!("Stored collection is empty, rewriting seed");
            self.storage.save(&self.seed);
            return LoadedRecords {
                records: self.seed.clone(),
                unreadable: Vec::new(),
            };
        }
        loaded
    }

    fn fresh_id(&self, items: &[T]) -> Option<String> {
        (0..MAX_ID_ATTEMPTS)
            .map(|_| (self.next_id_fn)())
            .find(|candidate| items.iter().all(|item| item.id() != candidate.as_str()))
    }

    #[instrument(fields(record_id = %id), skip(self, respond_to))]
    fn handle_get(&self, id: String, respond_to: Response<Option<T>>) {
        let item = self.ensure_init().records.into_iter().find(|item| item.id() == id);
        if item.is_none() {
            debug!("Record not found");
        }
        let _ = respond_to.send(Ok(item));
    }

    #[instrument(skip(self, record, respond_to))]
    fn handle_create(&self, record: NewRecord<T::Create>, respond_to: Response<T>) {
        debug!("Processing create request");
        let LoadedRecords {
            records: mut items,
            unreadable,
        } = self.ensure_init();

        let id = match record.id {
            Some(id) if items.iter().any(|item| item.id() == id) => {
                warn!(record_id = %id, "Supplied id already exists");
                send_error!(
                    respond_to,
                    StoreError::DuplicateId {
                        collection: T::COLLECTION,
                        id,
                    }
                );
            }
            Some(id) => id,
            None => match self.fresh_id(&items) {
                Some(id) => id,
                None => send_error!(
                    respond_to,
                    StoreError::DuplicateId {
                        collection: T::COLLECTION,
                        id: T::ID_PREFIX.to_string(),
                    }
                ),
            },
        };

        let now = Utc::now();
        let meta = RecordMeta {
            id,
            created_at: record.created_at.unwrap_or(now),
            updated_at: now,
        };

        match T::from_create(meta, record.payload) {
            Ok(item) => {
                items.push(item.clone());
                self.storage.save_records(&items, &unreadable);
                info!(record_id = %item.id(), count = items.len(), "Record created");
                let _ = respond_to.send(Ok(item));
            }
            Err(reason) => {
                warn!(reason = %reason, "Create rejected");
                let _ = respond_to.send(Err(StoreError::Rejected {
                    collection: T::COLLECTION,
                    reason,
                }));
            }
        }
    }

    #[instrument(fields(record_id = %id), skip(self, patch, respond_to))]
    fn handle_update(&self, id: String, patch: T::Patch, respond_to: Response<Option<T>>) {
        debug!("Processing update request");
        let LoadedRecords {
            records: mut items,
            unreadable,
        } = self.ensure_init();

        let Some(slot) = items.iter_mut().find(|item| item.id() == id) else {
            debug!("Record not found for update");
            let _ = respond_to.send(Ok(None));
            return;
        };

        let mut updated = slot.clone();
        if let Err(reason) = updated.apply_patch(patch) {
            warn!(reason = %reason, "Update rejected");
            send_error!(
                respond_to,
                StoreError::Rejected {
                    collection: T::COLLECTION,
                    reason,
                }
            );
        }
        updated.meta_mut().updated_at = Utc::now();
        *slot = updated.clone();

        self.storage.save_records(&items, &unreadable);
        info!("Record updated");
        let _ = respond_to.send(Ok(Some(updated)));
    }

    #[instrument(fields(record_id = %id), skip(self, respond_to))]
    fn handle_remove(&self, id: String, respond_to: Response<bool>) {
        let LoadedRecords { records, unreadable } = self.ensure_init();
        let before = records.len();
        let remaining: Vec<T> = records.into_iter().filter(|item| item.id() != id).collect();
        let changed = remaining.len() != before;

        if changed {
            self.storage.save_records(&remaining, &unreadable);
            info!(count = remaining.len(), "Record removed");
        } else {
            debug!("Nothing to remove");
        }
        let _ = respond_to.send(Ok(changed));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_reset(&self, respond_to: Response<Vec<T>>) {
        self.storage.clear();
        let items = self.ensure_init().records;
        info!(count = items.len(), "Collection reset to seed");
        let _ = respond_to.send(Ok(items));
    }

    #[instrument(fields(record_id = %id), skip(self, action, respond_to))]
    fn handle_action(
        &self,
        id: String,
        action: T::Action,
        respond_to: Response<Option<T::ActionResult>>,
    ) {
        debug!(action = ?action, "Processing action request");
        let LoadedRecords {
            records: mut items,
            unreadable,
        } = self.ensure_init();

        let Some(slot) = items.iter_mut().find(|item| item.id() == id) else {
            debug!("Record not found for action");
            let _ = respond_to.send(Ok(None));
            return;
        };

        let mut updated = slot.clone();
        match updated.handle_action(action) {
            Ok(result) => {
                updated.meta_mut().updated_at = Utc::now();
                *slot = updated;
                self.storage.save_records(&items, &unreadable);
                let _ = respond_to.send(Ok(Some(result)));
            }
            Err(reason) => {
                warn!(reason = %reason, "Action rejected");
                let _ = respond_to.send(Err(StoreError::Rejected {
                    collection: T::COLLECTION,
                    reason,
                }));
            }
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// Cloneable handle to a [`CollectionActor`].
pub struct CollectionClient<T: Entity> {
    sender: mpsc::Sender<CollectionRequest<T>>,
}

impl<T: Entity> Clone for CollectionClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Entity> CollectionClient<T> {
    pub fn new(sender: mpsc::Sender<CollectionRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> CollectionRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorCommunication("Actor closed".to_string()))?;
        response
            .await
            .map_err(|_| StoreError::ActorCommunication("Actor dropped".to_string()))?
    }

    pub async fn list(&self) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| CollectionRequest::List { respond_to }).await
    }

    /// `list()` narrowed by a caller-side predicate.
    pub async fn list_where(&self, predicate: impl Fn(&T) -> bool) -> Result<Vec<T>, StoreError> {
        Ok(self.list().await?.into_iter().filter(|item| predicate(item)).collect())
    }

    pub async fn get(&self, id: impl Into<String>) -> Result<Option<T>, StoreError> {
        let id = id.into();
        self.request(|respond_to| CollectionRequest::Get { id, respond_to }).await
    }

    pub async fn create(&self, payload: T::Create) -> Result<T, StoreError> {
        self.insert(NewRecord::new(payload)).await
    }

    pub async fn insert(&self, record: NewRecord<T::Create>) -> Result<T, StoreError> {
        self.request(|respond_to| CollectionRequest::Create { record, respond_to }).await
    }

    pub async fn update(&self, id: impl Into<String>, patch: T::Patch) -> Result<Option<T>, StoreError> {
        let id = id.into();
        self.request(|respond_to| CollectionRequest::Update { id, patch, respond_to }).await
    }

    pub async fn remove(&self, id: impl Into<String>) -> Result<bool, StoreError> {
        let id = id.into();
        self.request(|respond_to| CollectionRequest::Remove { id, respond_to }).await
    }

    pub async fn reset(&self) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| CollectionRequest::Reset { respond_to }).await
    }

    pub async fn perform_action(
        &self,
        id: impl Into<String>,
        action: T::Action,
    ) -> Result<Option<T::ActionResult>, StoreError> {
        let id = id.into();
        self.request(|respond_to| CollectionRequest::Action { id, action, respond_to }).await
    }
}

impl<T: Entity + HasSlug> CollectionClient<T> {
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<T>, StoreError> {
        Ok(self.list().await?.into_iter().find(|item| item.slug() == slug))
    }
}

// =============================================================================
// 5. TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryPersistence, Persistence, StorageStats};
    use serde::Deserialize;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        #[serde(flatten)]
        meta: RecordMeta,
        slug: String,
        title: String,
        pinned: bool,
    }

    #[derive(Debug)]
    struct NoteCreate {
        slug: String,
        title: String,
    }

    #[derive(Debug, Default)]
    struct NotePatch {
        title: Option<String>,
    }

    #[derive(Debug)]
    enum NoteAction {
        Pin,
    }

    impl Entity for Note {
        type Create = NoteCreate;
        type Patch = NotePatch;
        type Action = NoteAction;
        type ActionResult = bool;

        const COLLECTION: &'static str = "notes";
        const STORAGE_KEY: &'static str = "brisk_notes_v1";
        const ID_PREFIX: &'static str = "note";

        fn meta(&self) -> &RecordMeta {
            &self.meta
        }

        fn meta_mut(&mut self) -> &mut RecordMeta {
            &mut self.meta
        }

        fn from_create(meta: RecordMeta, payload: NoteCreate) -> Result<Self, String> {
            if payload.title.is_empty() {
                return Err("title required".to_string());
            }
            Ok(Self {
                meta,
                slug: payload.slug,
                title: payload.title,
                pinned: false,
            })
        }

        fn apply_patch(&mut self, patch: NotePatch) -> Result<(), String> {
            if let Some(title) = patch.title {
                self.title = title;
            }
            Ok(())
        }

        fn handle_action(&mut self, action: NoteAction) -> Result<bool, String> {
            match action {
                NoteAction::Pin => {
                    let changed = !self.pinned;
                    self.pinned = true;
                    Ok(changed)
                }
            }
        }
    }

    impl HasSlug for Note {
        fn slug(&self) -> &str {
            &self.slug
        }
    }

    /// Same shape, but the collection must never be empty.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Pinned(Note);

    impl Entity for Pinned {
        type Create = NoteCreate;
        type Patch = NotePatch;
        type Action = ();
        type ActionResult = ();

        const COLLECTION: &'static str = "pinned";
        const STORAGE_KEY: &'static str = "brisk_pinned_v1";
        const ID_PREFIX: &'static str = "pin";
        const SEED_REQUIRED: bool = true;

        fn meta(&self) -> &RecordMeta {
            &self.0.meta
        }

        fn meta_mut(&mut self) -> &mut RecordMeta {
            &mut self.0.meta
        }

        fn from_create(meta: RecordMeta, payload: NoteCreate) -> Result<Self, String> {
            Note::from_create(meta, payload).map(Pinned)
        }

        fn apply_patch(&mut self, patch: NotePatch) -> Result<(), String> {
            self.0.apply_patch(patch)
        }

        fn handle_action(&mut self, _action: ()) -> Result<(), String> {
            Ok(())
        }
    }

    fn seed_note(id: &str, slug: &str) -> Note {
        Note {
            meta: RecordMeta::seed(id),
            slug: slug.to_string(),
            title: format!("Seed {}", slug),
            pinned: false,
        }
    }

    fn note(slug: &str, title: &str) -> NoteCreate {
        NoteCreate {
            slug: slug.to_string(),
            title: title.to_string(),
        }
    }

    fn start<T: Entity>(backend: Arc<dyn Persistence>, seed: Vec<T>) -> CollectionClient<T> {
        let storage = KeyedStore::new(backend, T::STORAGE_KEY, StorageStats::new());
        let (actor, client) = CollectionActor::with_generated_ids(10, storage, seed);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_create_assigns_unique_ids_and_lists_record() {
        let client = start::<Note>(Arc::new(MemoryPersistence::new()), vec![seed_note("note_a", "a")]);

        let mut seen = vec!["note_a".to_string()];
        for i in 0..20 {
            let created = client.create(note(&format!("n{}", i), "Title")).await.unwrap();
            assert!(created.meta.id.starts_with("note_"));
            assert!(!seen.contains(&created.meta.id));
            assert_eq!(created.meta.created_at, created.meta.updated_at);
            seen.push(created.meta.id.clone());

            let listed = client.list().await.unwrap();
            assert_eq!(listed.iter().filter(|n| n.meta.id == created.meta.id).count(), 1);
            assert_eq!(listed.last(), Some(&created));
        }
        assert_eq!(client.list().await.unwrap().len(), 21);
    }

    #[tokio::test]
    async fn test_create_honours_supplied_id_and_created_at() {
        let client = start::<Note>(Arc::new(MemoryPersistence::new()), vec![]);
        let created_at = DateTime::parse_from_rfc3339("2023-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);

        let record = NewRecord::new(note("x", "X")).with_id("note_fixed").created_at(created_at);
        let created = client.insert(record).await.unwrap();
        assert_eq!(created.meta.id, "note_fixed");
        assert_eq!(created.meta.created_at, created_at);
        assert!(created.meta.updated_at > created_at);

        let duplicate = client
            .insert(NewRecord::new(note("y", "Y")).with_id("note_fixed"))
            .await;
        assert_eq!(
            duplicate,
            Err(StoreError::DuplicateId {
                collection: "notes",
                id: "note_fixed".to_string()
            })
        );
        assert_eq!(client.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_generated_id_collision_is_retried() {
        let backend: Arc<dyn Persistence> = Arc::new(MemoryPersistence::new());
        let storage = KeyedStore::new(backend, Note::STORAGE_KEY, StorageStats::new());
        let counter = Arc::new(AtomicU64::new(0));
        let next_id = move || format!("note_{}", counter.fetch_add(1, Ordering::SeqCst) / 2);
        let (actor, client) = CollectionActor::<Note>::new(10, storage, vec![], next_id);
        tokio::spawn(actor.run());

        let first = client.create(note("a", "A")).await.unwrap();
        let second = client.create(note("b", "B")).await.unwrap();
        assert_eq!(first.meta.id, "note_0");
        assert_eq!(second.meta.id, "note_1");
    }

    #[tokio::test]
    async fn test_rejected_create_leaves_collection_unchanged() {
        let client = start::<Note>(Arc::new(MemoryPersistence::new()), vec![seed_note("note_a", "a")]);
        let result = client.create(note("empty", "")).await;
        assert!(matches!(result, Err(StoreError::Rejected { collection: "notes", .. })));
        assert_eq!(client.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_changes_only_patched_field() {
        let client = start::<Note>(Arc::new(MemoryPersistence::new()), vec![]);
        let created = client.create(note("a", "Before")).await.unwrap();

        let patch = NotePatch {
            title: Some("After".to_string()),
        };
        let updated = client.update(created.meta.id.clone(), patch).await.unwrap().unwrap();

        assert_eq!(updated.meta.id, created.meta.id);
        assert_eq!(updated.meta.created_at, created.meta.created_at);
        assert!(updated.meta.updated_at >= created.meta.updated_at);
        assert_eq!(updated.title, "After");
        assert_eq!(updated.slug, created.slug);
        assert_eq!(updated.pinned, created.pinned);
        assert_eq!(client.get(created.meta.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_update_unknown_id_returns_none() {
        let client = start::<Note>(Arc::new(MemoryPersistence::new()), vec![seed_note("note_a", "a")]);
        let before = client.list().await.unwrap();

        let result = client.update("missing", NotePatch::default()).await.unwrap();
        assert!(result.is_none());
        assert_eq!(client.list().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let client = start::<Note>(Arc::new(MemoryPersistence::new()), vec![seed_note("note_a", "a")]);
        let created = client.create(note("b", "B")).await.unwrap();

        assert!(client.remove(created.meta.id.clone()).await.unwrap());
        let after_first = client.list().await.unwrap();
        assert!(!client.remove(created.meta.id).await.unwrap());
        assert_eq!(client.list().await.unwrap(), after_first);
        assert_eq!(after_first.len(), 1);
    }

    #[tokio::test]
    async fn test_reset_restores_seed() {
        let seed = vec![seed_note("note_a", "a"), seed_note("note_b", "b")];
        let client = start::<Note>(Arc::new(MemoryPersistence::new()), seed.clone());

        client.create(note("c", "C")).await.unwrap();
        client.remove("note_a").await.unwrap();

        assert_eq!(client.reset().await.unwrap(), seed);
        assert_eq!(client.list().await.unwrap(), seed);
    }

    #[tokio::test]
    async fn test_empty_collection_kept_unless_seed_required() {
        let backend = Arc::new(MemoryPersistence::new());
        backend.write(Note::STORAGE_KEY, "[]").unwrap();
        backend.write(Pinned::STORAGE_KEY, "[]").unwrap();

        let notes = start::<Note>(backend.clone(), vec![seed_note("note_a", "a")]);
        assert!(notes.list().await.unwrap().is_empty());

        let pinned_seed = vec![Pinned(seed_note("pin_a", "a"))];
        let pinned = start::<Pinned>(backend.clone(), pinned_seed.clone());
        assert_eq!(pinned.list().await.unwrap(), pinned_seed);

        let stored: Vec<Pinned> =
            serde_json::from_str(&backend.read(Pinned::STORAGE_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored, pinned_seed);
    }

    #[tokio::test]
    async fn test_malformed_storage_falls_back_to_seed() {
        let backend = Arc::new(MemoryPersistence::new());
        backend.write(Note::STORAGE_KEY, "not json at all").unwrap();
        let stats = StorageStats::new();
        let storage = KeyedStore::new(backend.clone(), Note::STORAGE_KEY, stats.clone());
        let seed = vec![seed_note("note_a", "a")];
        let (actor, client) = CollectionActor::with_generated_ids(10, storage, seed.clone());
        tokio::spawn(actor.run());

        assert_eq!(client.list().await.unwrap(), seed);
        assert_eq!(stats.read_fallbacks(), 1);
        assert!(backend.read(Note::STORAGE_KEY).unwrap().unwrap().starts_with('['));
    }

    #[tokio::test]
    async fn test_undecodable_records_survive_reads_and_writes() {
        let backend = Arc::new(MemoryPersistence::new());
        backend
            .write(
                Note::STORAGE_KEY,
                r#"[{"id":"note_old","createdAt":"2024-05-01T00:00:00Z","slug":"old","title":"Old","pinned":false},
                    {"id":"note_bad","title":"no slug or timestamps"}]"#,
            )
            .unwrap();
        let stats = StorageStats::new();
        let storage = KeyedStore::new(backend.clone(), Note::STORAGE_KEY, stats.clone());
        let (actor, client) = CollectionActor::with_generated_ids(10, storage, vec![seed_note("note_a", "a")]);
        tokio::spawn(actor.run());

        let listed = client.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].meta.id, "note_old");
        assert_eq!(listed[0].meta.updated_at, listed[0].meta.created_at);
        assert_eq!(stats.skipped_records(), 1);
        assert_eq!(stats.read_fallbacks(), 0);

        client.create(note("new", "New")).await.unwrap();
        client.remove("note_old").await.unwrap();

        let raw: Vec<serde_json::Value> =
            serde_json::from_str(&backend.read(Note::STORAGE_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(raw.len(), 2);
        assert!(raw.iter().any(|entry| entry["id"] == "note_bad"));
    }

    #[tokio::test]
    async fn test_seed_required_keeps_undecodable_records() {
        let backend = Arc::new(MemoryPersistence::new());
        backend.write(Pinned::STORAGE_KEY, r#"[{"id":"pin_bad"}]"#).unwrap();

        let pinned = start::<Pinned>(backend.clone(), vec![Pinned(seed_note("pin_a", "a"))]);
        assert!(pinned.list().await.unwrap().is_empty());
        assert_eq!(
            backend.read(Pinned::STORAGE_KEY).unwrap().as_deref(),
            Some(r#"[{"id":"pin_bad"}]"#)
        );
    }

    #[tokio::test]
    async fn test_action_persists_and_refreshes_updated_at() {
        let client = start::<Note>(Arc::new(MemoryPersistence::new()), vec![]);
        let created = client.create(note("a", "A")).await.unwrap();

        assert_eq!(client.perform_action(created.meta.id.clone(), NoteAction::Pin).await.unwrap(), Some(true));
        assert_eq!(client.perform_action(created.meta.id.clone(), NoteAction::Pin).await.unwrap(), Some(false));
        assert_eq!(client.perform_action("missing", NoteAction::Pin).await.unwrap(), None);

        let stored = client.get(created.meta.id).await.unwrap().unwrap();
        assert!(stored.pinned);
        assert!(stored.meta.updated_at >= created.meta.updated_at);
    }

    #[tokio::test]
    async fn test_find_by_slug_and_list_where() {
        let seed = vec![seed_note("note_a", "alpha"), seed_note("note_b", "beta")];
        let client = start::<Note>(Arc::new(MemoryPersistence::new()), seed);

        let found = client.find_by_slug("beta").await.unwrap().unwrap();
        assert_eq!(found.meta.id, "note_b");
        assert!(client.find_by_slug("gamma").await.unwrap().is_none());

        let filtered = client.list_where(|n| n.slug.starts_with('a')).await.unwrap();
        assert_eq!(filtered.len(), 1);
    }

    #[tokio::test]
    async fn test_closed_actor_reports_communication_error() {
        let (sender, receiver) = mpsc::channel::<CollectionRequest<Note>>(1);
        drop(receiver);
        let client = CollectionClient::new(sender);
        assert!(matches!(client.list().await, Err(StoreError::ActorCommunication(_))));
    }

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id("don");
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "don");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 6);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }
}

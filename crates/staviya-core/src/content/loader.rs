use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinSet;

use super::collection::CollectionName;
use super::models::ContentItem;
use super::store::ContentStore;
use crate::{Error, Result};

/// What the view renders from: one loading flag for every section
#[derive(Debug, Clone, PartialEq)]
pub struct LoadState {
    pub is_loading: bool,
    pub collections: BTreeMap<CollectionName, Vec<ContentItem>>,
}

impl Default for LoadState {
    fn default() -> Self {
        Self {
            is_loading: true,
            collections: BTreeMap::new(),
        }
    }
}

impl LoadState {
    /// Loading state with every requested collection present and empty
    fn pending(names: &BTreeSet<CollectionName>) -> Self {
        Self {
            is_loading: true,
            collections: names.iter().map(|name| (*name, Vec::new())).collect(),
        }
    }

    /// Items of a collection (empty when absent or still loading)
    pub fn items(&self, name: CollectionName) -> &[ContentItem] {
        self.collections
            .get(&name)
            .map(|items| items.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_ready(&self) -> bool {
        !self.is_loading
    }
}

/// Fetches collections concurrently and publishes a single aggregate state.
///
/// The loader is the only writer of [`LoadState`]; views read it through
/// [`CollectionLoader::subscribe`].
pub struct CollectionLoader {
    store: Arc<dyn ContentStore>,
    state_tx: watch::Sender<LoadState>,
    shutdown_tx: watch::Sender<bool>,
    generation: AtomicU64,
}

impl CollectionLoader {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        let (state_tx, _) = watch::channel(LoadState::default());
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            store,
            state_tx,
            shutdown_tx,
            generation: AtomicU64::new(0),
        }
    }

    /// Read-only subscription to the published state
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state_tx.subscribe()
    }

    /// Copy of the currently published state
    pub fn snapshot(&self) -> LoadState {
        self.state_tx.borrow().clone()
    }

    /// Load every collection the site shows
    pub async fn load_all(&self) -> Result<LoadState> {
        self.load(&CollectionName::ALL).await
    }

    /// Fetch the given collections concurrently.
    ///
    /// Prior state is replaced, never merged. A failed collection is logged
    /// and left empty; the state turns ready once every request settled.
    pub async fn load(&self, names: &[CollectionName]) -> Result<LoadState> {
        if self.is_torn_down() {
            return Err(Error::TornDown);
        }

        let requested: BTreeSet<CollectionName> = names.iter().copied().collect();
        let generation = self.begin(LoadState::pending(&requested));
        tracing::info!("Loading {} collections", requested.len());

        let mut join_set = JoinSet::new();
        for name in &requested {
            let name = *name;
            let store = Arc::clone(&self.store);
            join_set.spawn(async move {
                let result = store.fetch_collection(name.store_id()).await;
                (name, result)
            });
        }

        let mut shutdown = self.shutdown_tx.subscribe();
        let mut collections = BTreeMap::new();

        loop {
            tokio::select! {
                _ = torn_down(&mut shutdown) => {
                    join_set.abort_all();
                    tracing::info!("View torn down, discarding {} pending fetches", join_set.len());
                    return Err(Error::TornDown);
                }
                joined = join_set.join_next() => match joined {
                    Some(Ok((name, result))) => {
                        collections.insert(name, settle(name, result));
                    }
                    Some(Err(e)) => {
                        // The collection is backfilled as empty below
                        tracing::error!("Collection fetch task failed: {}", e);
                    }
                    None => break,
                },
            }
        }

        for name in &requested {
            collections.entry(*name).or_insert_with(Vec::new);
        }

        if self.is_torn_down() {
            return Err(Error::TornDown);
        }

        let state = LoadState {
            is_loading: false,
            collections,
        };
        if !self.publish(generation, &state) {
            tracing::debug!("Discarding results of superseded load #{}", generation);
            return Err(Error::Superseded);
        }
        tracing::info!(
            "Loaded {} collections ({} items)",
            state.collections.len(),
            state.collections.values().map(Vec::len).sum::<usize>()
        );

        Ok(state)
    }

    /// Start a new generation and publish its pending state. Both happen
    /// under the channel's lock, so no publish can land between them.
    fn begin(&self, pending: LoadState) -> u64 {
        let mut generation = 0;
        self.state_tx.send_modify(|current| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *current = pending;
        });
        generation
    }

    /// Publish `state` if `generation` is still the latest load
    fn publish(&self, generation: u64, state: &LoadState) -> bool {
        self.state_tx.send_if_modified(|current| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *current = state.clone();
            true
        })
    }

    /// Signal that the consuming view is gone. Pending results are dropped.
    pub fn teardown(&self) {
        self.shutdown_tx.send_replace(true);
    }

    pub fn is_torn_down(&self) -> bool {
        *self.shutdown_tx.borrow()
    }
}

/// Resolves once the shutdown flag is raised
async fn torn_down(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow_and_update() {
            return;
        }
        if shutdown.changed().await.is_err() {
            // Sender gone: teardown can no longer happen
            std::future::pending::<()>().await;
        }
    }
}

/// Turn a fetch outcome into the items shown for that collection
fn settle(
    name: CollectionName,
    result: Result<Vec<serde_json::Value>>,
) -> Vec<ContentItem> {
    match result {
        Ok(records) => decode_collection(name, records),
        Err(e) => {
            tracing::error!("Error loading collection '{}': {}", name, e);
            Vec::new()
        }
    }
}

/// Decode records, drop malformed and duplicate ones, then apply the sort policy
pub fn decode_collection(name: CollectionName, records: Vec<serde_json::Value>) -> Vec<ContentItem> {
    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        match ContentItem::decode(name, record) {
            Ok(item) => {
                if seen.insert(item.id().to_string()) {
                    items.push(item);
                } else {
                    tracing::warn!("Duplicate id '{}' in '{}', keeping first", item.id(), name);
                }
            }
            Err(e) => {
                tracing::warn!("Skipping malformed record #{} in '{}': {}", index, name, e);
            }
        }
    }

    name.sort_policy().apply(&mut items);
    items
}

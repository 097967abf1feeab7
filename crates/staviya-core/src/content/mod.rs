mod collection;
mod demo;
mod loader;
mod models;
mod store;

pub use collection::{CollectionName, SortPolicy};
pub use demo::demo_store;
pub use loader::{decode_collection, CollectionLoader, LoadState};
pub use models::{ContentItem, Milestone, Service, StatEntry, Technology};
pub use store::{
    open_store, parse_items, ContentStore, FileContentStore, HttpContentStore, MemoryContentStore,
};

pub mod collection;

use std::path::Path;

use anyhow::Result;
use tokio::fs;
use tracing::info;

use kindred_types::models::{Account, FriendRequest, Message, Post};

pub use collection::Collection;

/// The record store: one JSON collection file per entity type under a
/// single data directory. There is no caching layer and no cross-collection
/// transaction; each collection is independently loaded and rewritten.
pub struct Store {
    pub accounts: Collection<Account>,
    pub posts: Collection<Post>,
    pub friendships: Collection<FriendRequest>,
    pub messages: Collection<Message>,
}

impl Store {
    pub async fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir).await?;
        info!("Record store directory: {}", dir.display());
        Ok(Self {
            accounts: Collection::new(dir.join("accounts.json")),
            posts: Collection::new(dir.join("posts.json")),
            friendships: Collection::new(dir.join("friendships.json")),
            messages: Collection::new(dir.join("messages.json")),
        })
    }
}

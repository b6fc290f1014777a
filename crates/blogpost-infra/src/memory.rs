//! In-memory post repository - used when no database is configured, and by tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blogpost_core::domain::{BlogPost, NewPost, PostPatch};
use blogpost_core::error::RepoError;
use blogpost_core::ports::PostRepository;

/// In-memory post store using a HashMap behind an async RwLock.
///
/// Each operation holds the lock for its whole duration, so single-post
/// operations are atomic. Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, BlogPost>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    fn sorted(store: &HashMap<Uuid, BlogPost>) -> Vec<BlogPost> {
        let mut posts: Vec<BlogPost> = store.values().cloned().collect();
        posts.sort_by(|a, b| a.created.cmp(&b.created).then(a.id.cmp(&b.id)));
        posts
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: NewPost) -> Result<BlogPost, RepoError> {
        let post = BlogPost::new(post);
        let mut store = self.store.write().await;
        if store.contains_key(&post.id) {
            return Err(RepoError::Constraint(format!("duplicate id {}", post.id)));
        }
        store.insert(post.id, post.clone());
        tracing::debug!(post_id = %post.id, "Stored post in memory");
        Ok(post)
    }

    async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<BlogPost>, RepoError> {
        let created: Vec<BlogPost> = posts.into_iter().map(BlogPost::new).collect();

        let mut store = self.store.write().await;
        if let Some(dup) = created.iter().find(|p| store.contains_key(&p.id)) {
            return Err(RepoError::Constraint(format!("duplicate id {}", dup.id)));
        }
        for post in &created {
            store.insert(post.id, post.clone());
        }
        Ok(created)
    }

    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        let store = self.store.read().await;
        Ok(Self::sorted(&store))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn find_one(&self) -> Result<Option<BlogPost>, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .values()
            .min_by(|a, b| a.created.cmp(&b.created).then(a.id.cmp(&b.id)))
            .cloned())
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        patch: PostPatch,
    ) -> Result<Option<BlogPost>, RepoError> {
        let mut store = self.store.write().await;
        let Some(post) = store.get_mut(&id) else {
            return Ok(None);
        };
        post.apply(patch);
        Ok(Some(post.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepoError> {
        let mut store = self.store.write().await;
        Ok(store.remove(&id).is_some())
    }

    async fn count(&self) -> Result<u64, RepoError> {
        let store = self.store.read().await;
        Ok(store.len() as u64)
    }

    async fn clear(&self) -> Result<u64, RepoError> {
        let mut store = self.store.write().await;
        let removed = store.len() as u64;
        store.clear();
        Ok(removed)
    }
}

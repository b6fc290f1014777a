use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BlogPost, NewPost, PostPatch};
use crate::error::RepoError;

/// Post repository - the persistence contract for blog posts.
///
/// Implementations assign `id` and `created` on insertion; callers never
/// supply them.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Create a single post.
    async fn create(&self, post: NewPost) -> Result<BlogPost, RepoError>;

    /// Bulk-create posts. Used to seed fixture data.
    async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<BlogPost>, RepoError>;

    /// All stored posts, oldest first.
    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError>;

    /// Find a post by its unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError>;

    /// Any single post, if the store is not empty.
    async fn find_one(&self) -> Result<Option<BlogPost>, RepoError>;

    /// Apply a partial update. Returns `None` if no post has this ID.
    async fn update_by_id(&self, id: Uuid, patch: PostPatch)
    -> Result<Option<BlogPost>, RepoError>;

    /// Delete a post by its ID. Returns whether a post was removed;
    /// deleting an absent ID is not an error.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepoError>;

    /// Number of stored posts.
    async fn count(&self) -> Result<u64, RepoError>;

    /// Remove every post, returning how many were deleted.
    async fn clear(&self) -> Result<u64, RepoError>;
}

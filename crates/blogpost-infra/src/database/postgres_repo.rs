//! PostgreSQL repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbConn, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryOrder, Schema, Set,
};
use uuid::Uuid;

use blogpost_core::domain::{BlogPost, NewPost, PostPatch};
use blogpost_core::error::RepoError;
use blogpost_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Create the `posts` table from the entity definition if it is missing.
    pub async fn ensure_schema(&self) -> Result<(), RepoError> {
        let backend = self.db.get_database_backend();
        let mut stmt = Schema::new(backend).create_table_from_entity(PostEntity);
        stmt.if_not_exists();

        self.db
            .execute(backend.build(&stmt))
            .await
            .map_err(map_db_err)?;

        tracing::debug!("Ensured posts table exists");
        Ok(())
    }
}

fn map_db_err(e: DbErr) -> RepoError {
    match e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(e.to_string()),
        DbErr::RecordNotFound(_) => RepoError::NotFound,
        _ => {
            let err_str = e.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint("Entity already exists".to_string())
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: NewPost) -> Result<BlogPost, RepoError> {
        let active_model: post::ActiveModel = BlogPost::new(post).into();
        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;

        tracing::debug!(post_id = %model.id, "Inserted post");
        Ok(model.into())
    }

    async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<BlogPost>, RepoError> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let models = posts
            .into_iter()
            .map(|post| post::ActiveModel::from(BlogPost::new(post)))
            .collect::<Vec<_>>();

        let inserted = PostEntity::insert_many(models)
            .exec_with_returning_many(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(count = inserted.len(), "Inserted posts");
        Ok(inserted.into_iter().map(Into::into).collect())
    }

    async fn find_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::Created)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_one(&self) -> Result<Option<BlogPost>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::Created)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn update_by_id(
        &self,
        id: Uuid,
        patch: PostPatch,
    ) -> Result<Option<BlogPost>, RepoError> {
        let Some(model) = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        if patch.is_empty() {
            return Ok(Some(model.into()));
        }

        let mut active_model = model.into_active_model();
        if let Some(title) = patch.title {
            active_model.title = Set(title);
        }
        if let Some(content) = patch.content {
            active_model.content = Set(content);
        }

        // The row can vanish between the lookup and the UPDATE.
        match active_model.update(&self.db).await {
            Ok(updated) => Ok(Some(updated.into())),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(map_db_err(e)),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn count(&self) -> Result<u64, RepoError> {
        PostEntity::find()
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn clear(&self) -> Result<u64, RepoError> {
        let result = PostEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::warn!(rows = result.rows_affected, "Cleared posts table");
        Ok(result.rows_affected)
    }
}

use async_trait::async_trait;

use crate::error::RepositoryResult;
use crate::executor::Executor;

/// Typed CRUD contract for repositories operating within a transaction
/// session.
///
/// A repository holds a clone of the session [`Executor`] handed to the unit
/// of work and runs its queries through it, so every repository in one unit
/// of work shares a single transaction. Query building and relation loading
/// are deliberately out of scope; implementations write their own SQL.
///
/// Implementations map an empty executor slot (transaction already committed
/// or rolled back) to [`sqlx::Error::PoolClosed`].
#[async_trait]
pub trait Repository: Send + Sync {
    type Entity: Send + Sync;
    type Id: Send + Sync;

    /// The session executor this repository runs its queries through.
    fn executor(&self) -> &Executor;

    /// Find a single entity by its primary key.
    async fn find_by_id(&self, id: Self::Id) -> RepositoryResult<Option<Self::Entity>>;

    /// Fetch all entities of this type.
    async fn find_all(&self) -> RepositoryResult<Vec<Self::Entity>>;

    /// Insert a new entity.
    async fn insert(&self, entity: &Self::Entity) -> RepositoryResult<()>;

    /// Update an existing entity by its primary key.
    async fn update(&self, entity: &Self::Entity) -> RepositoryResult<()>;

    /// Delete an entity, returning the number of rows removed.
    async fn delete(&self, entity: &Self::Entity) -> RepositoryResult<u64>;

    /// Count all entities of this type.
    async fn count(&self) -> RepositoryResult<i64>;
}

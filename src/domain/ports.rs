use crate::domain::filter::{Projection, RecipeFilter};
use crate::domain::model::{Cuisine, Document, Recipe, RecipeId, Tag};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Read access to the cuisine and tag reference collections.
#[async_trait]
pub trait ReferenceLookup: Send + Sync {
    /// Exact-name lookup.
    async fn find_cuisine_by_name(&self, name: &str) -> Result<Option<Cuisine>>;

    /// All tags whose name is in `names`, in collection order. Names without a
    /// match are simply absent from the result.
    async fn find_tags_by_name_in(&self, names: &[String]) -> Result<Vec<Tag>>;
}

#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn insert(&self, recipe: Recipe) -> Result<RecipeId>;

    /// Returns `false` when no recipe has this id.
    async fn replace(&self, id: &str, recipe: Recipe) -> Result<bool>;

    /// Returns `false` when no recipe has this id.
    async fn delete(&self, id: &str) -> Result<bool>;

    async fn find(&self, filter: &RecipeFilter, projection: &Projection) -> Result<Vec<Document>>;
}

pub trait SnapshotStorage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
impl<T: ReferenceLookup + ?Sized> ReferenceLookup for Arc<T> {
    async fn find_cuisine_by_name(&self, name: &str) -> Result<Option<Cuisine>> {
        (**self).find_cuisine_by_name(name).await
    }

    async fn find_tags_by_name_in(&self, names: &[String]) -> Result<Vec<Tag>> {
        (**self).find_tags_by_name_in(names).await
    }
}

#[async_trait]
impl<T: RecipeRepository + ?Sized> RecipeRepository for Arc<T> {
    async fn insert(&self, recipe: Recipe) -> Result<RecipeId> {
        (**self).insert(recipe).await
    }

    async fn replace(&self, id: &str, recipe: Recipe) -> Result<bool> {
        (**self).replace(id, recipe).await
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        (**self).delete(id).await
    }

    async fn find(&self, filter: &RecipeFilter, projection: &Projection) -> Result<Vec<Document>> {
        (**self).find(filter, projection).await
    }
}

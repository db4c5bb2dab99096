//! In-process document store for cuisines, tags and recipes.
//!
//! Collections live behind `tokio` read/write locks and can optionally be
//! mirrored to a JSON snapshot after every write. Recipe order is insertion
//! order; tag lookups return tags in collection order.

use crate::adapters::storage::LocalStorage;
use crate::core::{
    Cuisine, Document, Projection, Recipe, RecipeFilter, RecipeId, RecipeRepository,
    ReferenceLookup, SnapshotStorage, Tag,
};
use crate::utils::error::{CatalogueError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub cuisines: Vec<Cuisine>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

struct Persistence<S> {
    storage: S,
    file: String,
    // Serializes snapshot writes so the newest state is always written last.
    write_lock: Mutex<()>,
}

pub struct InMemoryStore<S = LocalStorage> {
    cuisines: RwLock<Vec<Cuisine>>,
    tags: RwLock<Vec<Tag>>,
    recipes: RwLock<Vec<Recipe>>,
    persistence: Option<Persistence<S>>,
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::from_snapshot(Snapshot::default(), None)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SnapshotStorage> InMemoryStore<S> {
    fn from_snapshot(snapshot: Snapshot, persistence: Option<Persistence<S>>) -> Self {
        Self {
            cuisines: RwLock::new(snapshot.cuisines),
            tags: RwLock::new(snapshot.tags),
            recipes: RwLock::new(snapshot.recipes),
            persistence,
        }
    }

    /// Load the store from `file` in `storage`, starting empty when the file
    /// does not exist yet. Every later write rewrites the file.
    pub async fn open(storage: S, file: impl Into<String>) -> Result<Self> {
        let file = file.into();

        let snapshot = match storage.read_file(&file).await {
            Ok(bytes) => serde_json::from_slice::<Snapshot>(&bytes)?,
            Err(CatalogueError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No snapshot at {}, starting with an empty catalogue", file);
                Snapshot::default()
            }
            Err(e) => return Err(e),
        };

        tracing::info!(
            "Loaded {} cuisines, {} tags, {} recipes from {}",
            snapshot.cuisines.len(),
            snapshot.tags.len(),
            snapshot.recipes.len(),
            file
        );

        Ok(Self::from_snapshot(
            snapshot,
            Some(Persistence {
                storage,
                file,
                write_lock: Mutex::new(()),
            }),
        ))
    }

    /// Add a cuisine unless one with this name exists; returns the stored one.
    pub async fn add_cuisine(&self, name: &str) -> Result<Cuisine> {
        let (cuisine, created) = {
            let mut cuisines = self.cuisines.write().await;
            match cuisines.iter().find(|c| c.name == name) {
                Some(existing) => (existing.clone(), false),
                None => {
                    let cuisine = Cuisine {
                        id: new_id(),
                        name: name.to_string(),
                    };
                    cuisines.push(cuisine.clone());
                    (cuisine, true)
                }
            }
        };

        if created {
            if let Err(e) = self.persist().await {
                self.cuisines.write().await.retain(|c| c.id != cuisine.id);
                return Err(e);
            }
        }
        Ok(cuisine)
    }

    /// Add a tag unless one with this name exists; returns the stored one.
    pub async fn add_tag(&self, name: &str) -> Result<Tag> {
        let (tag, created) = {
            let mut tags = self.tags.write().await;
            match tags.iter().find(|t| t.name == name) {
                Some(existing) => (existing.clone(), false),
                None => {
                    let tag = Tag {
                        id: new_id(),
                        name: name.to_string(),
                    };
                    tags.push(tag.clone());
                    (tag, true)
                }
            }
        };

        if created {
            if let Err(e) = self.persist().await {
                self.tags.write().await.retain(|t| t.id != tag.id);
                return Err(e);
            }
        }
        Ok(tag)
    }

    /// Make sure the given reference names exist.
    pub async fn seed(&self, cuisines: &[String], tags: &[String]) -> Result<()> {
        for name in cuisines {
            self.add_cuisine(name).await?;
        }
        for name in tags {
            self.add_tag(name).await?;
        }
        tracing::debug!("Seeded {} cuisines and {} tags", cuisines.len(), tags.len());
        Ok(())
    }

    pub async fn tags(&self) -> Vec<Tag> {
        self.tags.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Recipe> {
        self.recipes
            .read()
            .await
            .iter()
            .find(|r| r.id.as_deref() == Some(id))
            .cloned()
    }

    pub async fn snapshot(&self) -> Snapshot {
        Snapshot {
            cuisines: self.cuisines.read().await.clone(),
            tags: self.tags.read().await.clone(),
            recipes: self.recipes.read().await.clone(),
        }
    }

    /// Write the current state to the snapshot file. Callers undo their own
    /// change when this fails so memory never runs ahead of the file.
    async fn persist(&self) -> Result<()> {
        let Some(persistence) = &self.persistence else {
            return Ok(());
        };

        let _guard = persistence.write_lock.lock().await;
        let data = serde_json::to_vec_pretty(&self.snapshot().await)?;
        persistence.storage.write_file(&persistence.file, &data).await?;
        tracing::debug!("Snapshot written to {}", persistence.file);
        Ok(())
    }
}

#[async_trait]
impl<S: SnapshotStorage> ReferenceLookup for InMemoryStore<S> {
    async fn find_cuisine_by_name(&self, name: &str) -> Result<Option<Cuisine>> {
        Ok(self
            .cuisines
            .read()
            .await
            .iter()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn find_tags_by_name_in(&self, names: &[String]) -> Result<Vec<Tag>> {
        Ok(self
            .tags
            .read()
            .await
            .iter()
            .filter(|t| names.iter().any(|n| *n == t.name))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl<S: SnapshotStorage> RecipeRepository for InMemoryStore<S> {
    async fn insert(&self, mut recipe: Recipe) -> Result<RecipeId> {
        let id = new_id();
        recipe.id = Some(id.clone());
        self.recipes.write().await.push(recipe);

        if let Err(e) = self.persist().await {
            self.recipes
                .write()
                .await
                .retain(|r| r.id.as_deref() != Some(id.as_str()));
            return Err(e);
        }
        Ok(id)
    }

    async fn replace(&self, id: &str, mut recipe: Recipe) -> Result<bool> {
        let previous = {
            let mut recipes = self.recipes.write().await;
            let Some(slot) = recipes.iter_mut().find(|r| r.id.as_deref() == Some(id)) else {
                return Ok(false);
            };
            recipe.id = Some(id.to_string());
            std::mem::replace(slot, recipe)
        };

        if let Err(e) = self.persist().await {
            let mut recipes = self.recipes.write().await;
            if let Some(slot) = recipes.iter_mut().find(|r| r.id.as_deref() == Some(id)) {
                *slot = previous;
            }
            return Err(e);
        }
        Ok(true)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let removed = {
            let mut recipes = self.recipes.write().await;
            recipes
                .iter()
                .position(|r| r.id.as_deref() == Some(id))
                .map(|index| (index, recipes.remove(index)))
        };
        let Some((index, recipe)) = removed else {
            return Ok(false);
        };

        if let Err(e) = self.persist().await {
            let mut recipes = self.recipes.write().await;
            let index = index.min(recipes.len());
            recipes.insert(index, recipe);
            return Err(e);
        }
        Ok(true)
    }

    async fn find(&self, filter: &RecipeFilter, projection: &Projection) -> Result<Vec<Document>> {
        self.recipes
            .read()
            .await
            .iter()
            .filter(|recipe| filter.matches(recipe))
            .map(|recipe| projection.apply(recipe))
            .collect()
    }
}

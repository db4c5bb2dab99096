use crate::core::query::{compile, SearchParams};
use crate::core::validator::{ReferenceValidator, TagCountPolicy};
use crate::core::{Document, Projection, RecipeId, RecipePayload, RecipeRepository, ReferenceLookup};
use crate::utils::error::{CatalogueError, Result};

/// Write and search flows over injected reference and recipe collaborators.
pub struct CatalogueService<L, R> {
    references: L,
    recipes: R,
    validator: ReferenceValidator,
}

impl<L: ReferenceLookup, R: RecipeRepository> CatalogueService<L, R> {
    pub fn new(references: L, recipes: R) -> Self {
        Self::with_policy(references, recipes, TagCountPolicy::default())
    }

    pub fn with_policy(references: L, recipes: R, policy: TagCountPolicy) -> Self {
        Self {
            references,
            recipes,
            validator: ReferenceValidator::new(policy),
        }
    }

    pub async fn create(&self, payload: &RecipePayload) -> Result<RecipeId> {
        let recipe = self
            .validator
            .validate(payload, &self.references)
            .await
            .inspect_err(|e| log_failure("create", e))?;
        let id = self
            .recipes
            .insert(recipe)
            .await
            .inspect_err(|e| log_failure("create", e))?;
        tracing::info!("Recipe {} added", id);
        Ok(id)
    }

    /// Full replacement: the whole payload is validated again.
    pub async fn replace(&self, id: &str, payload: &RecipePayload) -> Result<()> {
        let result = async {
            let recipe = self.validator.validate(payload, &self.references).await?;
            if !self.recipes.replace(id, recipe).await? {
                return Err(CatalogueError::NotFound { id: id.to_string() });
            }
            Ok(())
        }
        .await;

        match &result {
            Ok(()) => tracing::info!("Recipe {} replaced", id),
            Err(e) => log_failure("replace", e),
        }
        result
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let result = match self.recipes.delete(id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(CatalogueError::NotFound { id: id.to_string() }),
            Err(e) => Err(e),
        };

        match &result {
            Ok(()) => tracing::info!("Recipe {} deleted", id),
            Err(e) => log_failure("delete", e),
        }
        result
    }

    pub async fn search(&self, params: &SearchParams) -> Result<Vec<Document>> {
        let filter = compile(params);
        let recipes = self
            .recipes
            .find(&filter, &Projection::summary())
            .await
            .inspect_err(|e| log_failure("search", e))?;
        tracing::debug!("Search matched {} recipes", recipes.len());
        Ok(recipes)
    }
}

fn log_failure(operation: &str, error: &CatalogueError) {
    if error.is_client_error() {
        tracing::warn!("Recipe {} rejected: {}", operation, error);
    } else {
        tracing::error!("Recipe {} failed: {}", operation, error);
    }
}

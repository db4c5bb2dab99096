pub mod catalogue;
pub mod query;
pub mod validator;

pub use crate::domain::filter::{Pattern, Projection, RecipeFilter};
pub use crate::domain::model::{
    Amount, Cuisine, Document, Ingredient, Recipe, RecipeId, RecipePayload, Tag,
};
pub use crate::domain::ports::{RecipeRepository, ReferenceLookup, SnapshotStorage};
pub use crate::utils::error::Result;

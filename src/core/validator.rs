//! Cross-validation of recipe submissions against the cuisine and tag
//! reference collections.
//!
//! Checks run in a fixed order and stop at the first failure: field presence,
//! then cuisine, then tags. Presence failures never touch the store.

use crate::core::{Amount, Ingredient, Recipe, RecipePayload, ReferenceLookup};
use crate::utils::error::{CatalogueError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How many tags a submission must resolve to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagCountPolicy {
    /// One resolved tag per requested name, duplicates included.
    /// `["vegan", "vegan"]` resolves to a single tag and is rejected.
    #[default]
    Strict,
    /// One resolved tag per distinct requested name.
    Distinct,
}

impl TagCountPolicy {
    pub fn expected_count(&self, requested: &[String]) -> usize {
        match self {
            TagCountPolicy::Strict => requested.len(),
            TagCountPolicy::Distinct => requested.iter().collect::<HashSet<_>>().len(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceValidator {
    policy: TagCountPolicy,
}

/// Payload fields after the presence check.
struct PresentFields<'a> {
    name: &'a str,
    cuisine: &'a str,
    prep_time: &'a Amount,
    cook_time: &'a Amount,
    servings: &'a Amount,
    ingredients: &'a [Ingredient],
    instructions: &'a [String],
    tags: &'a [String],
}

impl ReferenceValidator {
    pub fn new(policy: TagCountPolicy) -> Self {
        Self { policy }
    }

    /// Produce the canonical recipe for `payload`. The result carries no id.
    pub async fn validate<L: ReferenceLookup + ?Sized>(
        &self,
        payload: &RecipePayload,
        lookup: &L,
    ) -> Result<Recipe> {
        let fields = check_presence(payload)?;

        let cuisine = lookup
            .find_cuisine_by_name(fields.cuisine)
            .await?
            .ok_or_else(|| CatalogueError::InvalidCuisine {
                name: fields.cuisine.to_string(),
            })?;

        let tags = lookup.find_tags_by_name_in(fields.tags).await?;
        let expected = self.policy.expected_count(fields.tags);
        if tags.len() != expected {
            return Err(CatalogueError::InvalidTags {
                requested: expected,
                resolved: tags.len(),
            });
        }

        Ok(Recipe {
            id: None,
            name: fields.name.to_string(),
            cuisine,
            prep_time: fields.prep_time.clone(),
            cook_time: fields.cook_time.clone(),
            servings: fields.servings.clone(),
            ingredients: fields.ingredients.to_vec(),
            instructions: fields.instructions.to_vec(),
            tags,
        })
    }
}

fn check_presence(payload: &RecipePayload) -> Result<PresentFields<'_>> {
    let mut missing = Vec::new();

    let name = text("name", &payload.name, &mut missing);
    let cuisine = text("cuisine", &payload.cuisine, &mut missing);
    let prep_time = amount("prepTime", &payload.prep_time, &mut missing);
    let cook_time = amount("cookTime", &payload.cook_time, &mut missing);
    let servings = amount("servings", &payload.servings, &mut missing);
    let ingredients = list("ingredients", &payload.ingredients, &mut missing);
    let instructions = list("instructions", &payload.instructions, &mut missing);
    let tags = list("tags", &payload.tags, &mut missing);

    match (
        name,
        cuisine,
        prep_time,
        cook_time,
        servings,
        ingredients,
        instructions,
        tags,
    ) {
        (
            Some(name),
            Some(cuisine),
            Some(prep_time),
            Some(cook_time),
            Some(servings),
            Some(ingredients),
            Some(instructions),
            Some(tags),
        ) => Ok(PresentFields {
            name,
            cuisine,
            prep_time,
            cook_time,
            servings,
            ingredients,
            instructions,
            tags,
        }),
        _ => Err(CatalogueError::MissingFields { fields: missing }),
    }
}

fn text<'a>(
    field: &'static str,
    value: &'a Option<String>,
    missing: &mut Vec<&'static str>,
) -> Option<&'a str> {
    let present = value.as_deref().filter(|s| !s.is_empty());
    if present.is_none() {
        missing.push(field);
    }
    present
}

fn amount<'a>(
    field: &'static str,
    value: &'a Option<Amount>,
    missing: &mut Vec<&'static str>,
) -> Option<&'a Amount> {
    let present = value.as_ref().filter(|a| a.is_present());
    if present.is_none() {
        missing.push(field);
    }
    present
}

fn list<'a, T>(
    field: &'static str,
    value: &'a Option<Vec<T>>,
    missing: &mut Vec<&'static str>,
) -> Option<&'a [T]> {
    let present = value.as_deref().filter(|items| !items.is_empty());
    if present.is_none() {
        missing.push(field);
    }
    present
}

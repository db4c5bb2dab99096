use crate::core::{Pattern, RecipeFilter};
use serde::{Deserialize, Serialize};

/// Raw search parameters as received in the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
    /// Comma-separated tag names.
    pub tags: Option<String>,
    /// Comma-separated ingredient name fragments.
    pub ingredients: Option<String>,
}

/// Compile search parameters into a filter. Absent or empty parameters leave
/// their field unconstrained; compilation never fails.
pub fn compile(params: &SearchParams) -> RecipeFilter {
    let name = given(&params.name).map(Pattern::case_insensitive);

    let tags_any_of = given(&params.tags).map(|tags| tags.split(',').map(str::to_string).collect());

    let ingredients_all_of = given(&params.ingredients).map(|ingredients| {
        ingredients
            .split(',')
            .map(Pattern::case_insensitive)
            .collect()
    });

    let filter = RecipeFilter {
        name,
        tags_any_of,
        ingredients_all_of,
    };
    tracing::debug!("Compiled search {:?} into {:?}", params, filter);
    filter
}

fn given(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

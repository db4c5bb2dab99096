//! Backend-agnostic search criteria over the recipe collection.
//!
//! A [`RecipeFilter`] is plain data: a store with a native query language can
//! translate its named constraints, and stores without one can call
//! [`RecipeFilter::matches`] per record.

use crate::domain::model::{Document, Recipe};
use crate::utils::error::Result;
use regex::{Regex, RegexBuilder};

/// Case-insensitive substring pattern.
///
/// The fragment is interpreted as a regular expression, so `^pan` anchors and
/// `a.c` matches any character. A fragment that does not compile falls back to
/// a literal substring match.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    matcher: Matcher,
}

#[derive(Debug, Clone)]
enum Matcher {
    Regex(Regex),
    Literal(String),
}

impl Pattern {
    pub fn case_insensitive(fragment: &str) -> Self {
        let matcher = match RegexBuilder::new(fragment).case_insensitive(true).build() {
            Ok(regex) => Matcher::Regex(regex),
            Err(e) => {
                tracing::debug!("Pattern '{}' is not a valid regex ({}), matching literally", fragment, e);
                Matcher::Literal(fragment.to_lowercase())
            }
        };

        Self {
            source: fragment.to_string(),
            matcher,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.matcher, Matcher::Literal(_))
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        match &self.matcher {
            Matcher::Regex(regex) => regex.is_match(haystack),
            Matcher::Literal(needle) => haystack.to_lowercase().contains(needle.as_str()),
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.is_literal() == other.is_literal()
    }
}

/// Composite filter; every present constraint must hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeFilter {
    /// `name` matches this pattern.
    pub name: Option<Pattern>,
    /// At least one of the recipe's tag names is in this set.
    pub tags_any_of: Option<Vec<String>>,
    /// Every pattern matches the name of some ingredient.
    pub ingredients_all_of: Option<Vec<Pattern>>,
}

impl RecipeFilter {
    /// The identity filter: no constraints.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_identity(&self) -> bool {
        self.name.is_none() && self.tags_any_of.is_none() && self.ingredients_all_of.is_none()
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(pattern) = &self.name {
            if !pattern.is_match(&recipe.name) {
                return false;
            }
        }

        if let Some(wanted) = &self.tags_any_of {
            if !recipe.tag_names().any(|tag| wanted.iter().any(|w| w == tag)) {
                return false;
            }
        }

        if let Some(patterns) = &self.ingredients_all_of {
            let all_present = patterns
                .iter()
                .all(|pattern| recipe.ingredient_names().any(|name| pattern.is_match(name)));
            if !all_present {
                return false;
            }
        }

        true
    }
}

/// Which top-level recipe fields `find` returns. The identifier is always
/// included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    fields: Vec<&'static str>,
}

impl Projection {
    pub fn new(fields: &[&'static str]) -> Self {
        Self {
            fields: fields.to_vec(),
        }
    }

    /// `{_id, name, cuisine, tags, prepTime}` as served by recipe search.
    pub fn summary() -> Self {
        Self::new(&["name", "cuisine", "tags", "prepTime"])
    }

    pub fn apply(&self, recipe: &Recipe) -> Result<Document> {
        let mut document = match serde_json::to_value(recipe)? {
            serde_json::Value::Object(map) => map,
            _ => Document::new(),
        };
        document.retain(|key, _| key == "_id" || self.fields.contains(&key.as_str()));
        Ok(document)
    }
}

use serde::{Deserialize, Serialize};

/// Opaque identifier assigned by the store.
pub type RecipeId = String;

/// A projected record as returned by `find`.
pub type Document = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cuisine {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// A numeric or free-text value such as `30` or `"1h 15m"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// Zero and empty text count as absent.
    pub fn is_present(&self) -> bool {
        match self {
            Amount::Number(n) => *n != 0.0 && !n.is_nan(),
            Amount::Text(s) => !s.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Amount>,
    /// Any other ingredient attributes (unit, notes) carried through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: Option<Amount>) -> Self {
        Self {
            name: name.into(),
            quantity,
            extra: serde_json::Map::new(),
        }
    }
}

/// Raw recipe submission. Every field is optional here so that presence
/// can be reported by the validator rather than by deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub prep_time: Option<Amount>,
    #[serde(default)]
    pub cook_time: Option<Amount>,
    #[serde(default)]
    pub servings: Option<Amount>,
    #[serde(default)]
    pub ingredients: Option<Vec<Ingredient>>,
    #[serde(default)]
    pub instructions: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Canonical, denormalized recipe as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecipeId>,
    pub name: String,
    pub cuisine: Cuisine,
    pub prep_time: Amount,
    pub cook_time: Amount,
    pub servings: Amount,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub tags: Vec<Tag>,
}

impl Recipe {
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.name.as_str())
    }

    pub fn ingredient_names(&self) -> impl Iterator<Item = &str> {
        self.ingredients.iter().map(|i| i.name.as_str())
    }
}

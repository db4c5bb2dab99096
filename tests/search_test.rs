use recipe_catalogue::core::query::compile;
use recipe_catalogue::core::{Amount, Document, Ingredient, RecipePayload};
use recipe_catalogue::{CatalogueService, InMemoryStore, SearchParams};
use std::sync::Arc;

type Service = CatalogueService<Arc<InMemoryStore>, Arc<InMemoryStore>>;

async fn catalogue() -> Service {
    let store = Arc::new(InMemoryStore::new());
    store
        .seed(
            &["French".to_string(), "Indian".to_string()],
            &[
                "dessert".to_string(),
                "spicy".to_string(),
                "vegan".to_string(),
            ],
        )
        .await
        .unwrap();

    let service = CatalogueService::new(store.clone(), store);
    for (name, cuisine, tags, ingredients) in [
        ("Crepes", "French", vec!["dessert"], vec!["Plain Flour", "Sugar", "Milk"]),
        ("Baguette", "French", vec!["vegan"], vec!["flour", "yeast", "salt"]),
        ("Vindaloo", "Indian", vec!["spicy"], vec!["Chilli", "Pork", "Vinegar"]),
        ("Chana Masala", "Indian", vec!["spicy", "vegan"], vec!["chickpeas", "chilli"]),
    ] {
        service.create(&payload(name, cuisine, &tags, &ingredients)).await.unwrap();
    }
    service
}

fn payload(name: &str, cuisine: &str, tags: &[&str], ingredients: &[&str]) -> RecipePayload {
    RecipePayload {
        name: Some(name.to_string()),
        cuisine: Some(cuisine.to_string()),
        prep_time: Some(Amount::Number(15.0)),
        cook_time: Some(Amount::Number(30.0)),
        servings: Some(Amount::Number(4.0)),
        ingredients: Some(ingredients.iter().map(|i| Ingredient::new(*i, None)).collect()),
        instructions: Some(vec!["Prepare".to_string()]),
        tags: Some(tags.iter().map(|t| t.to_string()).collect()),
    }
}

fn params(name: Option<&str>, tags: Option<&str>, ingredients: Option<&str>) -> SearchParams {
    SearchParams {
        name: name.map(str::to_string),
        tags: tags.map(str::to_string),
        ingredients: ingredients.map(str::to_string),
    }
}

fn names(documents: &[Document]) -> Vec<&str> {
    documents
        .iter()
        .filter_map(|d| d.get("name").and_then(|n| n.as_str()))
        .collect()
}

#[tokio::test]
async fn test_no_parameters_return_every_recipe() {
    let service = catalogue().await;
    let found = service.search(&SearchParams::default()).await.unwrap();

    assert_eq!(
        names(&found),
        vec!["Crepes", "Baguette", "Vindaloo", "Chana Masala"]
    );
}

#[tokio::test]
async fn test_tags_match_any_requested_tag() {
    let service = catalogue().await;
    let found = service
        .search(&params(None, Some("dessert,spicy"), None))
        .await
        .unwrap();

    assert_eq!(names(&found), vec!["Crepes", "Vindaloo", "Chana Masala"]);
}

#[tokio::test]
async fn test_tags_are_exact_and_case_sensitive() {
    let service = catalogue().await;
    let found = service
        .search(&params(None, Some("Dessert"), None))
        .await
        .unwrap();

    assert!(found.is_empty());
}

#[tokio::test]
async fn test_ingredients_must_all_be_present() {
    let service = catalogue().await;

    let found = service
        .search(&params(None, None, Some("flour,sugar")))
        .await
        .unwrap();
    assert_eq!(names(&found), vec!["Crepes"]);

    let found = service
        .search(&params(None, None, Some("FLOUR")))
        .await
        .unwrap();
    assert_eq!(names(&found), vec!["Crepes", "Baguette"]);
}

#[tokio::test]
async fn test_name_is_case_insensitive_substring() {
    let service = catalogue().await;
    let found = service
        .search(&params(Some("MASALA"), None, None))
        .await
        .unwrap();

    assert_eq!(names(&found), vec!["Chana Masala"]);
}

#[tokio::test]
async fn test_fields_combine_conjunctively() {
    let service = catalogue().await;
    let found = service
        .search(&params(None, Some("spicy"), Some("chickpea")))
        .await
        .unwrap();

    assert_eq!(names(&found), vec!["Chana Masala"]);
}

#[tokio::test]
async fn test_trailing_comma_is_harmless() {
    let service = catalogue().await;
    let found = service
        .search(&params(None, None, Some("chilli,")))
        .await
        .unwrap();

    assert_eq!(names(&found), vec!["Vindaloo", "Chana Masala"]);
}

#[tokio::test]
async fn test_regex_metacharacters_keep_regex_meaning() {
    let service = catalogue().await;
    let found = service
        .search(&params(Some("^c"), None, None))
        .await
        .unwrap();

    assert_eq!(names(&found), vec!["Crepes", "Chana Masala"]);
}

#[tokio::test]
async fn test_invalid_regex_does_not_fail_search() {
    let service = catalogue().await;
    let found = service
        .search(&params(Some("[crepes"), None, None))
        .await
        .unwrap();

    assert!(found.is_empty());
    assert!(compile(&params(Some("[crepes"), None, None))
        .name
        .unwrap()
        .is_literal());
}

#[tokio::test]
async fn test_created_recipe_projects_back_its_summary() {
    let service = catalogue().await;
    let found = service
        .search(&params(Some("Chana"), None, None))
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    let summary = &found[0];
    assert!(summary.contains_key("_id"));
    assert_eq!(summary["name"], "Chana Masala");
    assert_eq!(summary["cuisine"]["name"], "Indian");
    assert_eq!(summary["prepTime"], 15.0);

    let tag_names: Vec<&str> = summary["tags"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t["name"].as_str())
        .collect();
    assert_eq!(tag_names, vec!["spicy", "vegan"]);

    assert!(!summary.contains_key("ingredients"));
    assert!(!summary.contains_key("cookTime"));
}

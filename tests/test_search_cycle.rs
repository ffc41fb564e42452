//! End-to-end search cycle: keystrokes debounce into a single fetch, the
//! catalog accepts the newest completion and serves the filtered view.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use mockito::{Matcher, Server};
use recipe_scout::providers::{MealDbProvider, RecipeSource};
use recipe_scout::{Debouncer, RecipeCatalog};

#[tokio::test]
async fn test_burst_of_queries_dispatches_only_the_last_fetch() {
    let mut server = Server::new_async().await;

    // The intermediate keystroke must never reach the network
    let partial_mock = server
        .mock("GET", "/search.php")
        .match_query(Matcher::UrlEncoded("s".into(), "past".into()))
        .expect(0)
        .create();

    let final_name_mock = server
        .mock("GET", "/search.php")
        .match_query(Matcher::UrlEncoded("s".into(), "pasta".into()))
        .with_status(200)
        .with_body(
            r#"{"meals": [{"idMeal": "52982", "strMeal": "Spaghetti Carbonara", "strMealThumb": "https://example.com/c.jpg", "strArea": "Italian", "strCategory": "Pasta"}]}"#,
        )
        .create();
    let final_ingredient_mock = server
        .mock("GET", "/filter.php")
        .match_query(Matcher::UrlEncoded("i".into(), "pasta".into()))
        .with_status(200)
        .with_body(r#"{"meals": null}"#)
        .create();

    let catalog = Arc::new(Mutex::new(RecipeCatalog::new()));
    let mut debouncer = Debouncer::new(Duration::from_millis(50));

    for query in ["past", "pasta"] {
        let ticket = {
            let mut catalog = catalog.lock().unwrap();
            catalog.set_query(query);
            catalog.begin_fetch()
        };

        let catalog = Arc::clone(&catalog);
        let base_url = server.url();
        let query = query.to_string();
        debouncer.schedule(async move {
            let provider = MealDbProvider::with_base_url(base_url);
            if let Ok(recipes) = provider.fetch(&query, 10).await {
                catalog.lock().unwrap().complete_fetch(ticket, recipes);
            }
        });

        // Next keystroke lands well inside the debounce window
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    // Let the surviving timer fire and its fetch complete
    tokio::time::sleep(Duration::from_millis(300)).await;

    let catalog = catalog.lock().unwrap();
    assert_eq!(catalog.query(), "pasta");
    assert_eq!(catalog.filtered().len(), 1);
    assert_eq!(catalog.filtered()[0].title, "Spaghetti Carbonara");

    partial_mock.assert();
    final_name_mock.assert();
    final_ingredient_mock.assert();
}

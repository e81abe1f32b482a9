use mockito::{Matcher, Mock, ServerGuard};
use recipe_roulette::{
    Difficulty, DifficultyFilter, DifficultyPolicy, FetchError, LookupFailurePolicy,
    RecipeRoulette, RefreshOutcome, RouletteError, TotalFailurePolicy,
};
use serde_json::{json, Map, Value};

fn meal_json(id: &str, name: &str, instructions: &str, ingredient_count: usize) -> Value {
    let mut meal = Map::new();
    meal.insert("idMeal".into(), json!(id));
    meal.insert("strMeal".into(), json!(name));
    meal.insert("strInstructions".into(), json!(instructions));
    for slot in 1..=20 {
        let (ingredient, measure) = if slot <= ingredient_count {
            (json!(format!("Ingredient {}", slot)), json!("1 tbsp"))
        } else {
            (json!(""), json!(" "))
        };
        meal.insert(format!("strIngredient{}", slot), ingredient);
        meal.insert(format!("strMeasure{}", slot), measure);
    }
    json!({ "meals": [Value::Object(meal)] })
}

fn stubs_json(ids: &[&str]) -> Value {
    let meals: Vec<Value> = ids
        .iter()
        .map(|id| json!({ "strMeal": format!("Meal {}", id), "strMealThumb": "", "idMeal": id }))
        .collect();
    json!({ "meals": meals })
}

async fn mock_json(
    server: &mut ServerGuard,
    path: &str,
    query: &str,
    status: usize,
    body: Value,
) -> Mock {
    server
        .mock("GET", path)
        .match_query(Matcher::UrlEncoded("i".into(), query.into()))
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

fn roulette(server: &ServerGuard, ingredients: &[&str]) -> recipe_roulette::RecipeRouletteBuilder {
    RecipeRoulette::builder()
        .base_url(server.url())
        .ingredients(ingredients.iter().copied())
        .seed(7)
        .total_failure(TotalFailurePolicy::Error)
}

#[tokio::test]
async fn test_failed_lookup_is_dropped_from_pool() {
    let mut server = mockito::Server::new_async().await;
    let _filter = mock_json(&mut server, "/filter.php", "chicken", 200, stubs_json(&["A", "B"])).await;
    let _a = mock_json(
        &mut server,
        "/lookup.php",
        "A",
        200,
        meal_json("A", "Chicken Adobo", &"s".repeat(150), 5),
    )
    .await;
    let _b = mock_json(&mut server, "/lookup.php", "B", 500, json!({})).await;

    for policy in [
        DifficultyPolicy::ByInstructionLength,
        DifficultyPolicy::ByIngredientCount,
    ] {
        let roulette = roulette(&server, &["chicken"])
            .difficulty_policy(policy)
            .build()
            .unwrap();

        let outcome = roulette.refresh().await.unwrap();
        assert!(matches!(outcome, RefreshOutcome::Fetched(1)));

        let snapshot = roulette.controller().pool().snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, "A");
        assert_eq!(snapshot[0].difficulty, Difficulty::Easy);
        assert_eq!(snapshot[0].ingredients.len(), 5);
        assert_eq!(snapshot[0].ingredients[0], "1 tbsp Ingredient 1");

        for _ in 0..50 {
            assert_eq!(roulette.pick_one().id, "A");
        }
    }
}

#[tokio::test]
async fn test_overlapping_filters_yield_one_record() {
    let mut server = mockito::Server::new_async().await;
    let _chicken = mock_json(&mut server, "/filter.php", "chicken", 200, stubs_json(&["X"])).await;
    let _breast = mock_json(
        &mut server,
        "/filter.php",
        "chicken_breast",
        200,
        stubs_json(&["X"]),
    )
    .await;
    let lookup = server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::UrlEncoded("i".into(), "X".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(meal_json("X", "Chicken Parm", "Bread, fry, bake.", 8).to_string())
        .expect(1)
        .create_async()
        .await;

    let roulette = roulette(&server, &["chicken", "chicken_breast"]).build().unwrap();
    roulette.refresh().await.unwrap();

    let snapshot = roulette.controller().pool().snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, "X");
    lookup.assert_async().await;
}

#[tokio::test]
async fn test_not_found_lookup_is_dropped() {
    let mut server = mockito::Server::new_async().await;
    let _filter = mock_json(&mut server, "/filter.php", "eggs", 200, stubs_json(&["1", "2"])).await;
    let _one = mock_json(
        &mut server,
        "/lookup.php",
        "1",
        200,
        meal_json("1", "Shakshuka", "Simmer and crack eggs in.", 6),
    )
    .await;
    let _two = mock_json(&mut server, "/lookup.php", "2", 200, json!({ "meals": null })).await;

    let roulette = roulette(&server, &["eggs"]).build().unwrap();
    roulette.refresh().await.unwrap();

    assert_eq!(roulette.controller().pool().len(), 1);
}

#[tokio::test]
async fn test_fail_fast_rejects_partial_batch() {
    let mut server = mockito::Server::new_async().await;
    let _filter = mock_json(&mut server, "/filter.php", "eggs", 200, stubs_json(&["1", "2"])).await;
    let _one = mock_json(
        &mut server,
        "/lookup.php",
        "1",
        200,
        meal_json("1", "Shakshuka", "Simmer and crack eggs in.", 6),
    )
    .await;
    let _two = mock_json(&mut server, "/lookup.php", "2", 503, json!({})).await;

    let roulette = roulette(&server, &["eggs"])
        .lookup_failure(LookupFailurePolicy::FailFast)
        .build()
        .unwrap();

    let result = roulette.refresh().await;
    assert!(matches!(
        result,
        Err(RouletteError::Fetch(FetchError::LookupFailed { ref id, .. })) if id == "2"
    ));
    assert!(roulette.controller().pool().is_empty());
}

#[tokio::test]
async fn test_no_matches_is_an_explicit_error() {
    let mut server = mockito::Server::new_async().await;
    let _filter = mock_json(
        &mut server,
        "/filter.php",
        "unobtainium",
        200,
        json!({ "meals": null }),
    )
    .await;

    let roulette = roulette(&server, &["unobtainium"]).build().unwrap();
    let result = roulette.refresh().await;

    assert!(matches!(
        result,
        Err(RouletteError::Fetch(FetchError::NoCandidates))
    ));
    assert!(roulette.pick_one().is_sentinel());
}

#[tokio::test]
async fn test_server_down_falls_back_to_built_in_recipes() {
    let mut server = mockito::Server::new_async().await;
    let _filter = mock_json(&mut server, "/filter.php", "eggs", 500, json!({})).await;

    let roulette = roulette(&server, &["eggs"])
        .total_failure(TotalFailurePolicy::BuiltIn)
        .build()
        .unwrap();

    match roulette.refresh().await.unwrap() {
        RefreshOutcome::BuiltIn { count, reason } => {
            assert_eq!(count, 6);
            assert!(matches!(reason, FetchError::AllQueriesFailed(_)));
        }
        other => panic!("Expected built-in fallback, got {:?}", other),
    }

    roulette.set_filter(DifficultyFilter::Only(Difficulty::Hard));
    let picked = roulette.pick_one();
    assert_eq!(picked.difficulty, Difficulty::Hard);
    assert!(picked.name == "Soufflé" || picked.name == "Eggs Benedict");
}

#[tokio::test]
async fn test_refresh_replaces_previous_batch() {
    let mut server = mockito::Server::new_async().await;
    let _filter = mock_json(&mut server, "/filter.php", "eggs", 200, stubs_json(&["1"])).await;
    let _one = mock_json(
        &mut server,
        "/lookup.php",
        "1",
        200,
        meal_json("1", "Shakshuka", "Simmer and crack eggs in.", 6),
    )
    .await;

    let roulette = roulette(&server, &["eggs"]).build().unwrap();
    roulette
        .controller()
        .pool()
        .replace(recipe_roulette::built_in_recipes());

    roulette.refresh().await.unwrap();

    let snapshot = roulette.controller().pool().snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].name, "Shakshuka");
}

// Integration tests for Size Advisor

use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};
use size_advisor::core::{BasicInfo, BodyShape, ProfileBook, QuizSession, QuizStep, SizeEngine};
use size_advisor::models::{FitLevel, FitPreference, RawMeasurements, SizeLabel};
use size_advisor::routes::{configure_routes, AppState};
use size_advisor::services::{CachedStore, InMemoryStore, RecommendationStore};
use std::sync::Arc;

fn create_state() -> AppState {
    AppState {
        store: Arc::new(CachedStore::new(Arc::new(InMemoryStore::new()), 100, 60)),
        engine: SizeEngine::default(),
    }
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = init_app!(create_state());

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_recommend_endpoint() {
    let app = init_app!(create_state());

    let req = test::TestRequest::post()
        .uri("/api/v1/size/recommend")
        .set_json(json!({
            "measurements": { "bust": 95, "waist": "78", "hip": 103 },
            "fitPreference": { "general": "regular", "areas": { "chest": "loose" } }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["recommendedSize"], "M");
    assert_eq!(body["overallConfidencePercent"], 86);
    assert_eq!(body["fitAnalysis"]["bust"]["label"], "slightly loose");
    assert_eq!(body["fitAnalysis"]["waist"]["label"], "perfect");
    assert!(body["perSizeScore"]["XL"].is_number());
}

#[actix_web::test]
async fn test_recommend_rejects_invalid_measurements() {
    let app = init_app!(create_state());

    let req = test::TestRequest::post()
        .uri("/api/v1/size/recommend")
        .set_json(json!({
            "measurements": { "bust": "abc", "hip": 103, "weight": 250 }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    let fields = body["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0], json!({ "field": "bust", "reason": "non_numeric" }));
    assert_eq!(fields[1], json!({ "field": "waist", "reason": "missing" }));
    assert_eq!(fields[2], json!({ "field": "weight", "reason": "out_of_range" }));
}

#[actix_web::test]
async fn test_recommend_reports_non_scalar_answers_with_other_fields() {
    let app = init_app!(create_state());

    let req = test::TestRequest::post()
        .uri("/api/v1/size/recommend")
        .set_json(json!({
            "measurements": { "bust": true, "waist": { "cm": 78 }, "hip": 20 }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["fields"],
        json!([
            { "field": "bust", "reason": "non_numeric" },
            { "field": "waist", "reason": "non_numeric" },
            { "field": "hip", "reason": "out_of_range" }
        ])
    );
}

#[actix_web::test]
async fn test_save_then_get_round_trip() {
    let app = init_app!(create_state());
    let before = chrono::Utc::now();

    let req = test::TestRequest::post()
        .uri("/api/v1/size/save")
        .set_json(json!({
            "ownerId": "user-42",
            "answers": { "fit_preference": "regular" },
            "recommendedSize": "M"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["recommendation"]["recommendedSize"], "M");

    let req = test::TestRequest::get()
        .uri("/api/v1/size/get?ownerId=user-42")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["recommendation"]["recommendedSize"], "M");
    assert_eq!(body["recommendation"]["rawAnswers"]["fit_preference"], "regular");

    let last_updated: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(body["recommendation"]["lastUpdated"].clone()).unwrap();
    assert!(last_updated >= before);
}

#[actix_web::test]
async fn test_get_unknown_owner_is_404() {
    let app = init_app!(create_state());

    let req = test::TestRequest::get()
        .uri("/api/v1/size/get?ownerId=nobody")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_save_rejects_bad_requests() {
    let app = init_app!(create_state());

    let req = test::TestRequest::post()
        .uri("/api/v1/size/save")
        .set_json(json!({ "ownerId": "user-1", "answers": {}, "recommendedSize": "XXL" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/v1/size/save")
        .set_json(json!({ "ownerId": "", "answers": {}, "recommendedSize": "M" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_second_save_replaces_first() {
    let store = InMemoryStore::new();

    store.save("user-7", &json!({ "attempt": 1 }), SizeLabel::S).await.unwrap();
    store.save("user-7", &json!({ "attempt": 2 }), SizeLabel::L).await.unwrap();

    assert_eq!(store.len().await, 1);
    let record = store.get("user-7").await.unwrap();
    assert_eq!(record.recommended_size, SizeLabel::L);
    assert_eq!(record.raw_answers["attempt"], 2);
}

#[tokio::test]
async fn test_owners_do_not_interfere() {
    let store: Arc<dyn RecommendationStore> = Arc::new(InMemoryStore::new());

    let saves = SizeLabel::ALL.into_iter().enumerate().map(|(idx, size)| {
        let store = store.clone();
        tokio::spawn(async move {
            store
                .save(&format!("owner-{}", idx), &json!({}), size)
                .await
                .unwrap()
        })
    });
    for handle in saves.collect::<Vec<_>>() {
        handle.await.unwrap();
    }

    for (idx, size) in SizeLabel::ALL.into_iter().enumerate() {
        let record = store.get(&format!("owner-{}", idx)).await.unwrap();
        assert_eq!(record.recommended_size, size);
    }
}

#[tokio::test]
async fn test_quiz_result_saved_per_profile() {
    let store = InMemoryStore::new();
    let mut profiles = ProfileBook::new();
    let profile_id = profiles.add_profile(
        "me",
        RawMeasurements::circumferences(104.0, 85.0, 111.0).with_height_weight(170.0, 75.0),
    );
    let profile = profiles.get(profile_id).unwrap();

    let mut quiz = QuizSession::default();
    quiz.set_basic_info(BasicInfo {
        height: profile.measurements.height.clone(),
        weight: profile.measurements.weight.clone(),
        age: None,
    });
    quiz.advance().unwrap();
    quiz.set_body_shape(BodyShape {
        bust: profile.measurements.bust.clone(),
        waist: profile.measurements.waist.clone(),
        hip: profile.measurements.hip.clone(),
    });
    quiz.advance().unwrap();
    quiz.set_fit_preference(FitPreference::new(FitLevel::Regular));
    assert_eq!(quiz.advance().unwrap(), QuizStep::Result);

    let size = quiz.result().unwrap().recommended_size;
    assert_eq!(size, SizeLabel::L);

    store.save(&profile.owner_id(), &quiz.raw_answers(), size).await.unwrap();
    let record = store.get(&profile.owner_id()).await.unwrap();

    assert_eq!(record.recommended_size, SizeLabel::L);
    assert_eq!(record.raw_answers["bodyShape"]["bust"], 104.0);
}

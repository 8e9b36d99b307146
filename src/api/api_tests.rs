#[cfg(test)]
mod search_api_tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::sync::atomic::Ordering;
    use tower::ServiceExt;

    use crate::api::{app_state::AppState, create_router};
    use crate::models::company::Company;
    use crate::observability::AppMetrics;
    use crate::services::{CriteriaExtractor, create_search_service};
    use crate::storage::MemoryCompanyStore;

    fn test_app() -> (Router, Arc<AppMetrics>) {
        let store = MemoryCompanyStore::new(vec![
            Company {
                id: 1,
                company_name_en: Some("Foshan Evergreen Flooring Co.".into()),
                company_name_cn: Some("佛山常青地板有限公司".into()),
                province: Some("Guangdong".into()),
                main_products: Some("PVC flooring, SPC flooring".into()),
                credit_rating: Some("AA".into()),
                ..Default::default()
            },
            Company {
                id: 2,
                company_name_en: Some("Yiwu Toy Factory".into()),
                province: Some("Zhejiang".into()),
                main_products: Some("plush toys".into()),
                ..Default::default()
            },
        ]);
        let metrics = Arc::new(AppMetrics::default());
        let service = create_search_service(
            Arc::new(store),
            CriteriaExtractor::keyword_only(),
            metrics.clone(),
        );
        let state = AppState::new(service, metrics.clone());
        (create_router(state), metrics)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_search_returns_ranked_companies() {
        let (app, metrics) = test_app();

        let response = app
            .oneshot(get("/api/v1/search?q=Guangdong%20PVC%20flooring&limit=5&assist=false"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["source"], "store");
        assert_eq!(body["total_results"], 1);
        assert_eq!(body["companies"][0]["company"]["id"], 1);
        assert_eq!(body["used_assist"], false);
        assert_eq!(metrics.http_requests_total.load(Ordering::SeqCst), 1);
        assert_eq!(metrics.search_requests_total.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_search_post_accepts_json_body() {
        let (app, _) = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/search")
                    .header("Content-Type", "application/json")
                    .body(Body::from(
                        json!({"query": "plush toys", "limit": 3, "use_assist": false})
                            .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["query"], "plush toys");
        assert_eq!(body["companies"][0]["company"]["id"], 2);
    }

    #[tokio::test]
    async fn test_empty_query_is_bad_request() {
        let (app, _) = test_app();

        let response = app.oneshot(get("/api/v1/search?q=%20")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_get_company_found_and_missing() {
        let (app, _) = test_app();

        let found = app.clone().oneshot(get("/api/v1/companies/2")).await.unwrap();
        assert_eq!(found.status(), StatusCode::OK);
        assert_eq!(body_json(found).await["company_name_en"], "Yiwu Toy Factory");

        let missing = app.oneshot(get("/api/v1/companies/99")).await.unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_search_by_name_lists_matches() {
        let (app, _) = test_app();

        let response = app
            .oneshot(get("/api/v1/companies/search?name=%E5%B8%B8%E9%9D%92"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["companies"][0]["id"], 1);
    }

    #[tokio::test]
    async fn test_store_endpoints() {
        let (app, _) = test_app();

        let connection = app
            .clone()
            .oneshot(get("/api/v1/store/connection"))
            .await
            .unwrap();
        assert_eq!(connection.status(), StatusCode::OK);
        assert_eq!(body_json(connection).await["ok"], true);

        let statistics = app.oneshot(get("/api/v1/store/statistics")).await.unwrap();
        let body = body_json(statistics).await;
        assert_eq!(body["total_companies"], 2);
        assert_eq!(body["provinces"], json!(["Guangdong", "Zhejiang"]));
    }
}

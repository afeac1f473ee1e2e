//! Integration tests for the CLI `ApiClient`.

#[cfg(test)]
mod tests {
    use serde_json::json;
    use trendboard_cli::client::ApiClient;
    use trendboard_shared::{
        api::{ApiError, RequestContext},
        filters::{FilterField, FilterPatch, FilterState},
        moderation::{ModerationAction, ModerationTarget},
        query::{PageSize, Pagination},
        users::UserPatch,
    };
    use wiremock::{
        matchers::{body_json, header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(RequestContext::new(server.uri(), Some("tok".to_string())))
    }

    #[tokio::test]
    async fn listing_repeats_multi_value_params_and_sends_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/trends"))
            .and(query_param("department_name", "HR"))
            .and(query_param("department_name", "IT"))
            .and(query_param("page", "2"))
            .and(query_param("limit", "25"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "trends": [{"id": 7, "title": "Automation"}],
                "total": 26
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut filters = FilterState::default();
        let _ = filters.apply_partial(FilterPatch::new().set(FilterField::Department, ["IT", "HR"]));
        let listing = client(&server)
            .trends(&filters, &Pagination::starting_at(2, PageSize::TwentyFive))
            .await
            .expect("listing");

        assert_eq!(listing.total(), 26);
        assert_eq!(listing.trends[0].title, "Automation");

        let requests = server.received_requests().await.expect("recording enabled");
        let query = requests[0].url.query().unwrap_or_default().to_string();
        assert_eq!(query.matches("department_name=").count(), 2, "{query}");
    }

    #[tokio::test]
    async fn bulk_approve_puts_ids() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/trends/bulk-approve"))
            .and(body_json(json!({"trend_ids": [1, 2, 3]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server)
            .moderate(ModerationAction::Approve, &ModerationTarget::Bulk(vec![1, 2, 3]))
            .await
            .expect("approve");
        assert_eq!(response.message.as_deref(), Some("ok"));
    }

    #[tokio::test]
    async fn bulk_disapprove_sends_body_with_delete() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/trends/bulk-disapprove"))
            .and(body_json(json!({"trend_ids": [4]})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .moderate(ModerationAction::Disapprove, &ModerationTarget::Bulk(vec![4]))
            .await
            .expect("empty body is accepted");
    }

    #[tokio::test]
    async fn single_approve_hits_trend_path() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/trends/42/approve"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "approved"})))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .moderate(ModerationAction::Approve, &ModerationTarget::Single(42))
            .await
            .expect("approve");
    }

    #[tokio::test]
    async fn server_error_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/trends/9/disapprove"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "Admin access required"})))
            .mount(&server)
            .await;

        let err = client(&server)
            .moderate(ModerationAction::Disapprove, &ModerationTarget::Single(9))
            .await
            .expect_err("forbidden");
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.user_message(), "Admin access required");
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/trends/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client(&server)
            .stats(&FilterState::default())
            .await
            .expect_err("parse failure");
        assert!(matches!(err, ApiError::Parse(_)), "{err:?}");
    }

    #[tokio::test]
    async fn catalog_combines_three_lists() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/departments"))
            .and(query_param("active_only", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "departments": [{"id": 1, "name": "IT"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "categories": [{"id": 1, "category_name": "Technology", "department": "IT"}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/subcategories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "subcategories": [{"id": 1, "sub_category_name": "AI", "category_name": "Technology"}]
            })))
            .mount(&server)
            .await;

        let catalog = client(&server).catalog().await.expect("catalog");
        assert_eq!(catalog.departments.len(), 1);
        assert_eq!(catalog.categories[0].category_name, "Technology");
        assert_eq!(catalog.subcategories[0].sub_category_name, "AI");
    }

    #[tokio::test]
    async fn related_lookup_skips_the_trend_itself() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/trends"))
            .and(query_param("category", "Technology"))
            .and(query_param("sub_category", "AI"))
            .and(query_param("limit", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "trends": [
                    {"id": 1, "title": "Self"},
                    {"id": 2, "title": "B"},
                    {"id": 3, "title": "C"},
                    {"id": 4, "title": "D"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let trend = serde_json::from_value(json!({
            "id": 1,
            "title": "Self",
            "category": "Technology",
            "sub_category": "AI"
        }))
        .expect("trend");
        let related = client(&server).related(&trend).await.expect("related");
        let ids: Vec<i64> = related.iter().map(|trend| trend.id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[tokio::test]
    async fn deactivating_a_user_puts_only_the_flag() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/users/17"))
            .and(body_json(json!({"is_active": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "updated"})))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server)
            .update_user(&"17".to_string(), &UserPatch::active(false))
            .await
            .expect("update");
        assert_eq!(response.message.as_deref(), Some("updated"));
    }
}

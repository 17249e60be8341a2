//! Integration tests for `DashboardClient` using wiremock HTTP mocks.

use socialdash_client::{AnalyticsQuery, ClientError, DashboardClient, SearchKind, VideoFilter};
use socialdash_core::{
    DateRangeSelection, MetricType, NewCollection, Platform, PlatformFilter, RateValue,
};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> DashboardClient {
    DashboardClient::with_base_url(base_url).expect("client construction should not fail")
}

#[tokio::test]
async fn overview_sends_shared_query_parameters() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "views": {"total": 125_000, "change": 0},
        "engagement": {"total": 9_800, "change": 0},
        "likes": {"total": 8_000, "change": 0},
        "comments": {"total": 600, "change": 0},
        "shares": {"total": 700, "change": 0},
        "saves": {"total": 500, "change": 0}
    });

    Mock::given(method("GET"))
        .and(path("/api/analytics/overview"))
        .and(query_param("days", "30"))
        .and(query_param("metric_type", "organic"))
        .and(query_param("platform", "tiktok,instagram"))
        .and(query_param("collection_id", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let query = AnalyticsQuery::for_range(DateRangeSelection::Last30Days)
        .with_metric_type(MetricType::Organic)
        .with_collection(Some(2));
    let overview = test_client(&server.uri())
        .overview(&query)
        .await
        .expect("should parse overview");

    assert_eq!(overview.views.total, 125_000);
    assert_eq!(overview.saves.total, 500);
}

#[tokio::test]
async fn growth_for_overrides_metric_type() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/analytics/historical-growth"))
        .and(query_param("metric_type", "ads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"date": "2025-04-01", "views": 900, "views_growth": 150},
            {"date": "2025-04-02", "views": 1000, "views_growth": 100}
        ])))
        .mount(&server)
        .await;

    let points = test_client(&server.uri())
        .growth_for(&AnalyticsQuery::default(), MetricType::Ads)
        .await
        .expect("should parse growth");

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].views_growth, 150);
    assert_eq!(points[1].date.to_string(), "2025-04-02");
}

#[tokio::test]
async fn video_stats_wraps_bare_array_as_page() {
    let server = MockServer::start().await;

    let rows: Vec<serde_json::Value> = (0..20)
        .map(|i| {
            serde_json::json!({
                "id": format!("v{i}"),
                "platform": "tiktok",
                "views": 1000 - i,
                "likes": 10,
                "comments": 1,
                "shares": 1,
                "saves": 0,
                "engagement_rate": "1.20",
                "performance_multiplier": 1.1,
                "performance_indicator": "1.1x more than usual",
                "posted_at": "2025-04-01T12:00:00"
            })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path("/api/analytics/video-stats"))
        .and(query_param("limit", "20"))
        .and(query_param("offset", "0"))
        .and(query_param("platform", "instagram"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&rows))
        .mount(&server)
        .await;

    let query =
        AnalyticsQuery::default().with_platform(PlatformFilter::Only(Platform::Instagram));
    let page = test_client(&server.uri())
        .video_stats(&query, 20)
        .await
        .expect("should parse video stats");

    assert_eq!(page.items.len(), 20);
    assert!(page.has_more, "a full page implies more rows");
    assert_eq!(page.total, None);
    assert_eq!(page.items[0].engagement_rate, RateValue::Text("1.20".into()));
}

#[tokio::test]
async fn metrics_breakdown_omits_days() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/analytics/metrics-breakdown"))
        .and(query_param("metric_type", "total"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "daily": {"avg_views": 10, "avg_views_gain": 10, "avg_comments_gain": 1, "avg_likes_gain": 2},
            "weekly": {"avg_views": 70, "avg_views_gain": 70, "avg_comments_gain": 7, "avg_likes_gain": 14}
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let breakdown = client
        .metrics_breakdown(&AnalyticsQuery::default())
        .await
        .expect("should parse breakdown");
    assert_eq!(breakdown.weekly.avg_likes_gain, 14);

    let requests = server.received_requests().await.expect("recording enabled");
    assert!(
        requests[0].url.query_pairs().all(|(k, _)| k != "days"),
        "metrics breakdown has fixed windows"
    );
}

#[tokio::test]
async fn videos_reads_envelope_and_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/videos"))
        .and(query_param("creator", "maxmari"))
        .and(query_param("is_spark_ad", "true"))
        .and(query_param("limit", "50"))
        .and(query_param("offset", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "videos": [
                {"id": "a1", "platform": "tiktok", "views": 10, "is_spark_ad": true},
                {"id": "a2", "platform": "tiktok", "views": 5, "is_spark_ad": true}
            ],
            "total": 52,
            "limit": 50,
            "offset": 50,
            "has_more": false
        })))
        .mount(&server)
        .await;

    let filter = VideoFilter {
        creator: Some("maxmari".into()),
        is_spark_ad: Some(true),
        ..VideoFilter::default()
    };
    let page = test_client(&server.uri())
        .videos(&filter, 50, 50)
        .await
        .expect("should parse videos");

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total, Some(52));
    assert!(!page.has_more);
}

#[tokio::test]
async fn set_spark_ad_sends_patch_with_flag() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/videos/7301/spark-ad"))
        .and(query_param("is_spark_ad", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "video_id": "7301",
            "is_spark_ad": true,
            "message": "Video marked as Spark Ad"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ack = test_client(&server.uri())
        .set_spark_ad("7301", true)
        .await
        .expect("should toggle");
    assert!(ack.success);
    assert!(ack.is_spark_ad);
}

#[tokio::test]
async fn status_error_carries_backend_detail() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/videos/missing/spark-ad"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"detail": "Video not found"})),
        )
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .set_spark_ad("missing", false)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.detail(), Some("Video not found"));
    assert!(err.to_string().contains("Video not found"));
}

#[tokio::test]
async fn submit_accounts_posts_all_entries_in_one_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/scrape/urls"))
        .and(body_json(serde_json::json!({
            "urls": ["username1", "https://www.instagram.com/username2/"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Scraping started in background",
            "urls": ["https://www.tiktok.com/@username1", "https://www.instagram.com/username2/"],
            "status": "processing"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ack = test_client(&server.uri())
        .submit_accounts(["username1", "", "https://www.instagram.com/username2/"])
        .await
        .expect("should submit");
    assert_eq!(ack.status, "processing");
    assert_eq!(ack.urls.len(), 2);
}

#[tokio::test]
async fn submit_accounts_rejects_blank_input_without_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .submit_accounts(["  ", ""])
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

#[tokio::test]
async fn delete_account_returns_message() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/accounts/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Account maxmari deleted successfully",
            "account_id": "12"
        })))
        .mount(&server)
        .await;

    let message = test_client(&server.uri())
        .delete_account(12)
        .await
        .expect("should delete");
    assert_eq!(message, "Account maxmari deleted successfully");
}

#[tokio::test]
async fn create_collection_posts_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/collections"))
        .and(body_json(serde_json::json!({"name": "Skincare", "color": "#8B5CF6"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 9,
            "name": "Skincare",
            "description": null,
            "color": "#8B5CF6",
            "icon": "folder",
            "is_default": false,
            "video_count": 0,
            "account_count": 0,
            "created_at": "2025-05-01T09:00:00",
            "updated_at": "2025-05-01T09:00:00"
        })))
        .mount(&server)
        .await;

    let created = test_client(&server.uri())
        .create_collection(&NewCollection {
            name: "Skincare".into(),
            color: Some("#8B5CF6".into()),
            ..NewCollection::default()
        })
        .await
        .expect("should create");
    assert_eq!(created.id, 9);
    assert_eq!(created.icon.as_deref(), Some("folder"));
}

#[tokio::test]
async fn update_collection_puts_body() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/collections/9"))
        .and(body_json(serde_json::json!({"name": "Skin", "icon": "star"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 9,
            "name": "Skin",
            "color": "#8B5CF6",
            "icon": "star",
            "is_default": false,
            "video_count": 4,
            "account_count": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let updated = test_client(&server.uri())
        .update_collection(
            9,
            &NewCollection {
                name: "Skin".into(),
                icon: Some("star".into()),
                ..NewCollection::default()
            },
        )
        .await
        .expect("should update");
    assert_eq!(updated.name, "Skin");
    assert_eq!(updated.account_count, 2);
}

#[tokio::test]
async fn creators_filters_by_platform() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/creators"))
        .and(query_param("platform", "instagram"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"username": "studio.daily", "nickname": "Studio Daily"},
            {"username": "maxmari"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let creators = test_client(&server.uri())
        .creators(Some(Platform::Instagram))
        .await
        .expect("should list creators");
    assert_eq!(creators.len(), 2);
    assert_eq!(creators[0].nickname.as_deref(), Some("Studio Daily"));
    assert_eq!(creators[1].nickname, None);
}

#[tokio::test]
async fn set_spark_ad_keeps_video_id_in_one_segment() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/videos/reel%2F42/spark-ad"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "video_id": "reel/42",
            "is_spark_ad": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ack = test_client(&server.uri())
        .set_spark_ad("reel/42", false)
        .await
        .expect("should toggle");
    assert_eq!(ack.video_id, "reel/42");
}

#[tokio::test]
async fn add_account_conflict_surfaces_as_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/collections/3/accounts/8"))
        .respond_with(ResponseTemplate::new(400).set_body_json(
            serde_json::json!({"detail": "Account already in this collection"}),
        ))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .add_account_to_collection(3, 8)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 400, .. }));
}

#[tokio::test]
async fn hashtag_search_strips_leading_hash() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/search/hashtag"))
        .and(body_json(serde_json::json!({"query": "skincare", "platform": "tiktok", "limit": 10})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "s1", "platform": "tiktok", "views": 40, "hashtags": ["skincare"]}
        ])))
        .mount(&server)
        .await;

    let results = test_client(&server.uri())
        .search(SearchKind::Hashtag, "#skincare", Platform::TikTok, 10)
        .await
        .expect("should search");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].hashtags.as_deref(), Some(&["skincare".to_owned()][..]));
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/collections"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri()).collections().await.unwrap_err();
    assert!(
        matches!(err, ClientError::Deserialize { ref context, .. } if context == "GET /api/collections"),
        "unexpected error: {err:?}"
    );
}

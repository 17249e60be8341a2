use super::*;

fn test_client(base_url: &str) -> DashboardClient {
    DashboardClient::with_base_url(base_url).expect("client construction should not fail")
}

#[test]
fn build_url_appends_path_and_query() {
    let client = test_client("http://localhost:8000");
    let url = client.build_url(
        "api/analytics/overview",
        &[("days", "7".to_owned()), ("metric_type", "total".to_owned())],
    );
    assert_eq!(
        url.as_str(),
        "http://localhost:8000/api/analytics/overview?days=7&metric_type=total"
    );
}

#[test]
fn build_url_keeps_base_path_prefix() {
    let client = test_client("https://example.com/backend/");
    let url = client.build_url("/api/collections", &[]);
    assert_eq!(url.as_str(), "https://example.com/backend/api/collections");
}

#[test]
fn build_url_encodes_platform_list() {
    let client = test_client("http://localhost:8000");
    let url = client.build_url(
        "api/analytics/video-stats",
        &[("platform", "tiktok,instagram".to_owned())],
    );
    assert!(
        url.as_str().ends_with("platform=tiktok%2Cinstagram"),
        "comma should be percent-encoded: {url}"
    );
}

#[test]
fn build_segment_url_escapes_each_segment() {
    let client = test_client("https://example.com/backend");
    let url = client.build_segment_url(
        &["api", "videos", "a/b?c", "spark-ad"],
        &[("is_spark_ad", "true".to_owned())],
    );
    assert_eq!(
        url.as_str(),
        "https://example.com/backend/api/videos/a%2Fb%3Fc/spark-ad?is_spark_ad=true"
    );
}

#[test]
fn rejects_unparseable_base_url() {
    let err = DashboardClient::with_base_url("not a url").unwrap_err();
    assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
}

#[test]
fn extract_detail_reads_string_and_list_forms() {
    assert_eq!(
        extract_detail(r#"{"detail": "Video not found"}"#).as_deref(),
        Some("Video not found")
    );
    let list = extract_detail(r#"{"detail": [{"msg": "field required"}]}"#).unwrap();
    assert!(list.contains("field required"));
    assert_eq!(extract_detail("<html>bad gateway</html>"), None);
    assert_eq!(extract_detail(r#"{"error": "x"}"#), None);
}

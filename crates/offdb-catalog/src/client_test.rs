use super::*;

fn client_for(base_url: &str) -> OffClient {
    let config = CatalogConfig {
        user_agent: "offdb-test/0.1".to_owned(),
        base_url: base_url.to_owned(),
        timeout_secs: 5,
    };
    OffClient::new(&config).expect("client should build")
}

fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

#[test]
fn search_url_targets_search_endpoint() {
    let client = client_for(DEFAULT_BASE_URL);
    let url = client.search_url("granola", 20);
    assert_eq!(url.path(), "/cgi/search.pl");
    assert_eq!(url.host_str(), Some("world.openfoodfacts.org"));
    assert_eq!(query_value(&url, "json").as_deref(), Some("1"));
    assert_eq!(query_value(&url, "page_size").as_deref(), Some("20"));
    assert_eq!(query_value(&url, "search_terms").as_deref(), Some("granola"));
}

#[test]
fn search_url_encodes_query() {
    let client = client_for(DEFAULT_BASE_URL);
    let url = client.search_url("kit kat & co", 5);
    assert_eq!(
        query_value(&url, "search_terms").as_deref(),
        Some("kit kat & co")
    );
    assert!(!url.as_str().contains("kit kat"));
}

#[test]
fn search_url_strips_trailing_slash_on_base() {
    let client = client_for("https://world.openfoodfacts.org/");
    let url = client.search_url("granola", 5);
    assert!(
        url.as_str()
            .starts_with("https://world.openfoodfacts.org/cgi/search.pl?"),
        "got: {url}"
    );
}

#[test]
fn search_url_keeps_base_path_prefix() {
    let client = client_for("http://localhost:8080/off");
    let url = client.search_url("granola", 5);
    assert_eq!(url.path(), "/off/cgi/search.pl");
}

#[test]
fn new_rejects_blank_user_agent() {
    let config = CatalogConfig::new("   ");
    let result = OffClient::new(&config);
    assert!(
        matches!(result, Err(CatalogError::MissingUserAgent)),
        "expected MissingUserAgent"
    );
}

#[test]
fn new_rejects_invalid_base_url() {
    let config = CatalogConfig {
        base_url: "not a url".to_owned(),
        ..CatalogConfig::new("offdb-test/0.1")
    };
    let result = OffClient::new(&config);
    assert!(
        matches!(result, Err(CatalogError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl"
    );
}

#[test]
fn outcome_failures_collapse_to_empty() {
    assert!(SearchOutcome::TransportError("down".into())
        .into_products()
        .is_empty());
    assert!(SearchOutcome::UnexpectedError("500".into())
        .into_products()
        .is_empty());
    assert!(SearchOutcome::Empty.into_products().is_empty());
}

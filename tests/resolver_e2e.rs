//! Tiered resolution against a mock fight finder.

mod common;

use sherdog_scraper::{FighterQuery, Resolution, SearchTier};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{client_for, search_results_html};

const FIGHT_FINDER: &str = "/stats/fightfinder";

fn results(hrefs: &[&str]) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(search_results_html(hrefs))
}

#[tokio::test]
async fn test_unique_name_match_skips_weight_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FIGHT_FINDER))
        .and(query_param("SearchTxt", "Jon Jones"))
        .and(query_param_is_missing("weight"))
        .respond_with(results(&["/fighter/Jon-Jones-27944"]))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(FIGHT_FINDER))
        .and(query_param("weight", "3"))
        .respond_with(results(&[]))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = FighterQuery::new("Jon Jones", "Light Heavyweight", "NA");
    let resolution = client.resolve(&query).await.unwrap();

    assert_eq!(
        resolution,
        Resolution::Found {
            url: format!("{}/fighter/Jon-Jones-27944", server.uri()),
            tier: SearchTier::NameOnly,
        }
    );
}

#[tokio::test]
async fn test_nickname_is_tried_before_weight_class() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FIGHT_FINDER))
        .and(query_param("SearchTxt", "Steve Garcia"))
        .and(query_param_is_missing("weight"))
        .respond_with(results(&["/fighter/Steve-Garcia-1", "/fighter/Steve-Garcia-2"]))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(FIGHT_FINDER))
        .and(query_param("SearchTxt", "Steve Garcia Mr. Taco"))
        .and(query_param_is_missing("weight"))
        .respond_with(results(&["/fighter/Steve-Garcia-2"]))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(FIGHT_FINDER))
        .and(query_param("weight", "6"))
        .respond_with(results(&["/fighter/Steve-Garcia-1"]))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = FighterQuery::new("Steve Garcia", "Lightweight", "Mr. Taco");
    let resolution = client.resolve(&query).await.unwrap();

    assert_eq!(
        resolution,
        Resolution::Found {
            url: format!("{}/fighter/Steve-Garcia-2", server.uri()),
            tier: SearchTier::NameNickname,
        }
    );
}

#[tokio::test]
async fn test_missing_nickname_falls_back_to_weight_class() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FIGHT_FINDER))
        .and(query_param("SearchTxt", "Tim Means"))
        .and(query_param_is_missing("weight"))
        .respond_with(results(&["/fighter/Tim-Means-1", "/fighter/Tim-Means-2"]))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(FIGHT_FINDER))
        .and(query_param("SearchTxt", "Tim Means"))
        .and(query_param("weight", "5"))
        .respond_with(results(&["/fighter/Tim-Means-2"]))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = FighterQuery::new("Tim Means", "Welterweight", "NA");
    let resolution = client.resolve(&query).await.unwrap();

    assert_eq!(
        resolution.url(),
        Some(format!("{}/fighter/Tim-Means-2", server.uri()).as_str())
    );
}

#[tokio::test]
async fn test_ambiguous_at_every_tier_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FIGHT_FINDER))
        .respond_with(results(&["/fighter/A-1", "/fighter/A-2"]))
        .expect(4)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = FighterQuery::new("Common Name", "Heavyweight", "The Nick");
    let resolution = client.resolve(&query).await.unwrap();

    assert_eq!(
        resolution,
        Resolution::NotFound {
            tried: vec![
                SearchTier::NameOnly,
                SearchTier::NameNickname,
                SearchTier::NameWeight,
                SearchTier::NameNicknameWeight,
            ]
        }
    );
}

#[tokio::test]
async fn test_unknown_weight_class_skips_weight_tiers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FIGHT_FINDER))
        .and(query_param_is_missing("weight"))
        .respond_with(results(&[]))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = FighterQuery::new("Nobody", "Openweight", "NA");
    let resolution = client.resolve(&query).await.unwrap();

    assert_eq!(
        resolution,
        Resolution::NotFound {
            tried: vec![SearchTier::NameOnly]
        }
    );
}

#[tokio::test]
async fn test_search_error_is_returned() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(FIGHT_FINDER))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = FighterQuery::new("Jon Jones", "Light Heavyweight", "NA");
    assert!(client.resolve(&query).await.is_err());
}

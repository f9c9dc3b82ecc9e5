use pagetable::{extract, CellValue, ExtractConfig, ExtractError, PageTableExtractor, StatusPolicy};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const POPULATION_PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>Population</title></head><body>
<table id="other"><tr><th>x</th></tr><tr><td>ignored</td></tr></table>
<table id="t1" class="table">
  <thead>
    <tr><th>#</th><th>Country</th><th>Population</th><th>Yearly Change</th></tr>
  </thead>
  <tbody>
    <tr><td>1</td><td>China</td><td>1,439,323,776</td><td>0.39 %</td></tr>
    <tr><td>2</td><td>India</td><td>1,380,004,385</td><td>0.99 %</td></tr>
    <tr><td>3</td><td>United States</td><td>331,002,651</td><td>0.59 %</td></tr>
  </tbody>
</table>
</body></html>"#;

async fn serve(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/population"))
        .respond_with(
            ResponseTemplate::new(status).set_body_raw(body.to_string(), "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;
    server
}

fn page_url(server: &MockServer) -> String {
    format!("{}/population", server.uri())
}

#[tokio::test]
async fn test_happy_path_shape_and_values() {
    let server = serve(200, POPULATION_PAGE).await;

    let table = extract(&page_url(&server), "t1").await.unwrap();

    assert_eq!(table.columns, vec!["#", "Country", "Population", "Yearly Change"]);
    assert_eq!(table.len(), 3);
    assert!(table.rows.iter().all(|r| r.len() == 4));

    let india = table.row(1).unwrap();
    assert_eq!(india.get("Country"), Some(&CellValue::Text("India".into())));
    assert_eq!(india.get("Population"), Some(&CellValue::Int(1_380_004_385)));
    assert_eq!(india.get("Yearly Change"), Some(&CellValue::Text("0.99 %".into())));
}

#[tokio::test]
async fn test_scenario_fragment() {
    let body = r#"<table id="t1"><tr><th>Country</th><th>Population</th></tr><tr><td>A</td><td>100</td></tr></table>"#;
    let server = serve(200, body).await;

    let table = extract(&page_url(&server), "t1").await.unwrap();

    assert_eq!(table.columns, vec!["Country", "Population"]);
    assert_eq!(table.rows, vec![vec![CellValue::Text("A".into()), CellValue::Int(100)]]);
}

#[tokio::test]
async fn test_missing_table_is_extraction_error() {
    let server = serve(200, POPULATION_PAGE).await;

    let err = extract(&page_url(&server), "nope").await.unwrap_err();

    assert!(matches!(err, ExtractError::TableNotFound { ref id } if id == "nope"));
    assert!(err.is_extraction());
    assert_eq!(err.user_message(), "Error: no table with id \"nope\" in document");
}

#[tokio::test]
async fn test_non_success_status_fails_before_parsing() {
    for status in [404u16, 410, 500, 503] {
        // the error page even contains the table; strict mode must not look at it
        let server = serve(status, POPULATION_PAGE).await;

        let err = extract(&page_url(&server), "t1").await.unwrap_err();

        assert_eq!(err.kind(), "status", "status {status}");
        assert_eq!(err.status(), Some(status));
        assert!(err.user_message().starts_with(&format!("Error: HTTP {status}")));
    }
}

#[tokio::test]
async fn test_ignore_policy_parses_error_body() {
    let server = serve(404, POPULATION_PAGE).await;
    let config = ExtractConfig::new(page_url(&server), "t1").with_status_policy(StatusPolicy::Ignore);

    let table = pagetable::extract_with(&config).await.unwrap();
    assert_eq!(table.len(), 3);

    let server = serve(500, "<html><body><h1>Internal Server Error</h1></body></html>").await;
    let config = ExtractConfig::new(page_url(&server), "t1").with_status_policy(StatusPolicy::Ignore);

    let err = pagetable::extract_with(&config).await.unwrap_err();
    assert_eq!(err.kind(), "table_not_found");
}

#[tokio::test]
async fn test_header_only_table() {
    let body = r#"<table id="t1"><thead><tr><th>a</th><th>b</th></tr></thead><tbody></tbody></table>"#;
    let server = serve(200, body).await;

    let table = extract(&page_url(&server), "t1").await.unwrap();

    assert_eq!(table.columns, vec!["a", "b"]);
    assert_eq!(table.len(), 0);
}

#[tokio::test]
async fn test_repeated_calls_are_identical() {
    let server = serve(200, POPULATION_PAGE).await;
    let extractor = PageTableExtractor::new(&ExtractConfig::default()).unwrap();
    let url = page_url(&server);

    let first = extractor.extract(&url, "t1").await.unwrap();
    let second = extractor.extract(&url, "t1").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // bind then release a port so nothing is listening on it
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{port}/population");

    let err = extract(&url, "t1").await.unwrap_err();

    assert_eq!(err.kind(), "transport");
    assert!(matches!(err, ExtractError::Transport(_)));
}

#[tokio::test]
async fn test_body_decoded_with_declared_charset() {
    let server = MockServer::start().await;
    // "Côte d'Ivoire" in ISO-8859-1
    let mut body = b"<table id=\"t1\"><tr><th>Country</th></tr><tr><td>C".to_vec();
    body.push(0xF4);
    body.extend_from_slice(b"te d'Ivoire</td></tr></table>");
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=iso-8859-1"),
        )
        .mount(&server)
        .await;

    let table = extract(&server.uri(), "t1").await.unwrap();

    assert_eq!(table.rows[0][0], CellValue::Text("Côte d'Ivoire".into()));
}

#[tokio::test]
async fn test_single_request_per_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = extract(&server.uri(), "t1").await.unwrap_err();
    assert_eq!(err.kind(), "status");
    // expect(1) is verified when the server drops
}

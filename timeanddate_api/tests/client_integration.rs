use timeanddate_api::{Authentication, Client, Error};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn auth() -> Authentication {
    Authentication::new("testkey", "testsecret")
}

#[tokio::test]
async fn get_dst_list_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("dstlist.xml");

    Mock::given(method("GET"))
        .and(path("/dstlist"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), auth());
    let result = client.get_daylight_saving_time().await;
    assert!(result.is_ok());

    let entries = result.unwrap();
    assert_eq!(entries.len(), 3);
    // Order comes from the service and must be preserved.
    assert_eq!(entries[0].country.id, "no");
    assert_eq!(entries[1].country.id, "au");
    assert_eq!(entries[2].country.id, "qa");

    assert_eq!(entries[0].country.name, "Norway");
    assert_eq!(entries[0].std_timezone.offset_seconds, 3600);
    assert_eq!(
        entries[0].dst_timezone.as_ref().unwrap().offset_seconds,
        7200
    );
    assert_eq!(entries[0].places.as_ref().unwrap().len(), 2);

    // Qatar observes no DST: fields are absent, not defaulted.
    assert_eq!(entries[2].dst_start, None);
    assert_eq!(entries[2].dst_end, None);
    assert_eq!(entries[2].dst_timezone, None);
    assert!(!entries[2].observes_dst());
}

#[tokio::test]
async fn get_dst_list_with_time_changes() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("dstlist_timechanges.xml");

    Mock::given(method("GET"))
        .and(path("/dstlist"))
        .and(query_param("timechanges", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let mut client = Client::with_base_url(&mock_server.uri(), auth());
    client.set_include_time_changes(true);
    let entries = client.get_daylight_saving_time().await.unwrap();
    let changes = entries[0].time_changes.as_ref().unwrap();
    assert_eq!(changes.len(), 2);
    assert!(changes[0].utc_time < changes[1].utc_time);
}

#[tokio::test]
async fn country_call_forces_onlydst_off() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("dstlist.xml");

    // The mock only matches when onlydst was forced to 0; a request with the
    // configured default of 1 would 404.
    Mock::given(method("GET"))
        .and(path("/dstlist"))
        .and(query_param("country", "no"))
        .and(query_param("onlydst", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), auth());
    let result = client.get_daylight_saving_time_for_country("no").await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn year_call_keeps_configured_onlydst() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("dstlist.xml");

    Mock::given(method("GET"))
        .and(path("/dstlist"))
        .and(query_param("year", "2024"))
        .and(query_param("onlydst", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), auth());
    let result = client.get_daylight_saving_time_for_year(2024).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn country_and_year_call_forces_onlydst_off() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("dstlist.xml");

    Mock::given(method("GET"))
        .and(path("/dstlist"))
        .and(query_param("country", "no"))
        .and(query_param("year", "2024"))
        .and(query_param("onlydst", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), auth());
    let result = client
        .get_daylight_saving_time_for_country_and_year("no", 2024)
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn partial_filter_is_accepted() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("dstlist.xml");

    // Year-only through the two-argument call: no country parameter at all.
    Mock::given(method("GET"))
        .and(path("/dstlist"))
        .and(query_param("year", "2024"))
        .and(query_param("onlydst", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), auth());
    let result = client
        .get_daylight_saving_time_for_country_and_year("", 2024)
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn empty_country_is_rejected_without_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dstlist"))
        .respond_with(ResponseTemplate::new(200).set_body_string("unreachable"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), auth());
    let result = client.get_daylight_saving_time_for_country("").await;
    assert!(matches!(result, Err(Error::InvalidArgument(_))));

    mock_server.verify().await;
}

#[tokio::test]
async fn non_positive_year_is_rejected() {
    let client = Client::with_base_url("http://localhost:1", auth());
    for year in [0, -1] {
        let result = client.get_daylight_saving_time_for_year(year).await;
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }
}

#[tokio::test]
async fn both_invalid_filters_are_rejected() {
    let client = Client::with_base_url("http://localhost:1", auth());
    let result = client
        .get_daylight_saving_time_for_country_and_year("", 0)
        .await;
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}

#[tokio::test]
async fn get_dst_list_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dstlist"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), auth());
    let result = client.get_daylight_saving_time().await;
    assert!(matches!(
        result,
        Err(Error::HttpStatus { status: 500, .. })
    ));
}

#[tokio::test]
async fn get_dst_list_service_error_payload() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("dstlist_error.xml");

    Mock::given(method("GET"))
        .and(path("/dstlist"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), auth());
    let result = client.get_daylight_saving_time().await;
    match result {
        Err(Error::Service { code, message }) => {
            assert_eq!(code, Some(102));
            assert_eq!(message, "Accesskey rejected");
        }
        other => panic!("expected Service error, got {other:?}"),
    }
}

#[tokio::test]
async fn get_dst_list_malformed_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dstlist"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid xml}"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), auth());
    let result = client.get_daylight_saving_time().await;
    assert!(matches!(result, Err(Error::MalformedResponse(_))));
}

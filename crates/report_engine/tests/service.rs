use std::time::Duration;

use pretty_assertions::assert_eq;
use report_core::LaunchRequest;
use report_engine::{HttpReportService, RemoteErrorKind, ReportService, ServiceSettings};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> HttpReportService {
    HttpReportService::new(ServiceSettings {
        base_url: format!("{}/reports/", server.uri()),
        ..ServiceSettings::default()
    })
    .expect("client")
}

#[tokio::test]
async fn launch_posts_camel_case_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/reports/executeReportAsync"))
        .and(body_json(json!({
            "reportDeveloperName": "Open_Cases",
            "filterByCurrentRecord": true,
            "objectId": "001XX000003DHPh",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("0LGxx0000000001")))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let instance = service
        .execute_report_async(&LaunchRequest {
            report_developer_name: "Open_Cases".to_string(),
            filter_by_current_record: true,
            object_id: "001XX000003DHPh".to_string(),
        })
        .await
        .expect("launch ok");
    assert_eq!(instance, "0LGxx0000000001");
}

#[tokio::test]
async fn status_and_data_use_instance_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/reports/getReportInstance"))
        .and(body_json(json!({ "reportInstanceId": "0LG1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("Running")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/reports/getReportData"))
        .and(body_json(json!({
            "reportInstanceId": "0LG1",
            "configFilterSortable": false,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reportName": "Open Cases",
            "customValues": "[{\"a\":1}]",
        })))
        .mount(&server)
        .await;

    let service = service_for(&server);
    assert_eq!(service.get_report_instance("0LG1").await.unwrap(), "Running");
    let record = service.get_report_data("0LG1", false).await.unwrap();
    assert_eq!(record["customValues"], json!("[{\"a\":1}]"));
}

#[tokio::test]
async fn http_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/reports/getReportInstance"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Script-thrown exception"))
        .mount(&server)
        .await;

    let err = service_for(&server)
        .get_report_instance("0LG1")
        .await
        .unwrap_err();
    assert_eq!(err.kind, RemoteErrorKind::HttpStatus(500));
    assert_eq!(err.message, "Script-thrown exception");
}

#[tokio::test]
async fn unexpected_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/reports/getReportInstance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "Running" })))
        .mount(&server)
        .await;

    let err = service_for(&server)
        .get_report_instance("0LG1")
        .await
        .unwrap_err();
    assert_eq!(err.kind, RemoteErrorKind::Decode);
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/reports/getReportInstance"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!("Running")),
        )
        .mount(&server)
        .await;

    let service = HttpReportService::new(ServiceSettings {
        base_url: format!("{}/reports", server.uri()),
        request_timeout: Duration::from_millis(50),
        ..ServiceSettings::default()
    })
    .unwrap();

    let err = service.get_report_instance("0LG1").await.unwrap_err();
    assert_eq!(err.kind, RemoteErrorKind::Timeout);
}

#[tokio::test]
async fn invalid_base_url_is_reported() {
    let service = HttpReportService::new(ServiceSettings {
        base_url: "not a url".to_string(),
        ..ServiceSettings::default()
    })
    .unwrap();

    let err = service.get_report_instance("0LG1").await.unwrap_err();
    assert_eq!(err.kind, RemoteErrorKind::InvalidUrl);
}

//! End-to-end upload tests against a mock registration API
//!
//! Each test writes a CSV export and a config into a temp directory, points the
//! API at a mockito server and checks the ledger files left behind.

use mockito::Matcher;
use std::fs;
use std::path::Path;
use svcreg::config::load_config;
use svcreg::core::upload::UploadCoordinator;
use tempfile::TempDir;

const HEADER: &str = "name,type,national_code,mobile,price,test_count,date,discount,test_code,name_rabet_company,family_rabet_company,tariffs_basis";

const EXPORT: &str = "\
Sara,1,0012345678,09121234567,\"120,000\",30,1402/05/01,0,101,,,1
Reza,1,0098765432,tel 09351112233,50000,2,1402/05/02,5000,202,,,2
Sara,1,0012345678,09121234567,80000,1,1402/05/03,0,303,,,1
";

fn write_fixture(dir: &TempDir, api_url: &str, extra: &str) -> String {
    let csv_path = dir.path().join("export.csv");
    fs::write(&csv_path, format!("{HEADER}\n{EXPORT}")).unwrap();

    let out = |name: &str| dir.path().join(name).to_string_lossy().replace('\\', "/");
    let config = format!(
        r#"
[source]
path = "{csv}"

[api]
url = "{api_url}"
timeout_seconds = 5
max_per_request = 2

[[api.auth]]
name = "user_name"
value = "lab"

[api.retry]
max_retries = 1
retry_delay_ms = 0

[upload]
batch_delay_ms = 0
flush_every = 1

[output]
success_log = "{ok}"
error_log = "{err}"
error_rows = "{rows}"
{extra}
"#,
        csv = csv_path.to_string_lossy().replace('\\', "/"),
        ok = out("success_log.csv"),
        err = out("error_log.csv"),
        rows = out("error_rows.txt"),
    );

    let config_path = dir.path().join("svcreg.toml");
    fs::write(&config_path, config).unwrap();
    config_path.to_string_lossy().to_string()
}

fn read(dir: &TempDir, name: &str) -> String {
    fs::read_to_string(dir.path().join(name)).unwrap()
}

#[tokio::test]
async fn test_upload_writes_ledger() {
    let mut server = mockito::Server::new_async().await;

    let sara = server
        .mock("POST", "/api/add_service")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("user_name".into(), "lab".into()),
            Matcher::UrlEncoded("national_code".into(), "0012345678".into()),
            Matcher::UrlEncoded("services[0][price]".into(), "120000".into()),
            Matcher::UrlEncoded("services[0][time_execute]".into(), "30".into()),
            Matcher::UrlEncoded("services[1][test_code]".into(), "303".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"error":0,"result":[{"error":0,"data":"SVC-A"},{"error":1,"type":"dup","msg":"already registered"}]}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let reza = server
        .mock("POST", "/api/add_service")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("national_code".into(), "0098765432".into()),
            Matcher::UrlEncoded("mobile".into(), "09351112233".into()),
            Matcher::UrlEncoded("services[0][test_count]".into(), "2".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"error":1,"type":"auth","msg":"bad credentials"}"#)
        .expect(1)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let config_path = write_fixture(&dir, &format!("{}/api/add_service", server.url()), "");
    let config = load_config(&config_path).unwrap();

    let summary = UploadCoordinator::new(config)
        .unwrap()
        .execute_upload()
        .await
        .unwrap();

    sara.assert_async().await;
    reza.assert_async().await;

    assert_eq!(summary.total_rows, 3);
    assert_eq!(summary.total_batches, 2);
    assert_eq!(summary.successful_rows, 1);
    assert_eq!(summary.failed_rows, 2);
    assert!(!summary.is_successful());

    assert_eq!(read(&dir, "success_log.csv"), "row_id,service_id\n2,SVC-A\n");
    assert_eq!(
        read(&dir, "error_log.csv"),
        "row_id,error_kind,message\n3,auth,bad credentials\n4,dup,already registered\n"
    );
    assert_eq!(read(&dir, "error_rows.txt"), "3\n4\n");
}

#[tokio::test]
async fn test_start_row_skips_earlier_rows() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/add_service")
        .match_body(Matcher::UrlEncoded(
            "national_code".into(),
            "0012345678".into(),
        ))
        .with_status(200)
        .with_body(r#"{"error":0,"result":[{"error":0,"data":"SVC-C"}]}"#)
        .expect(1)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let config_path = write_fixture(&dir, &format!("{}/api/add_service", server.url()), "");
    let mut config = load_config(&config_path).unwrap();
    config.source.start_row = 4;

    let summary = UploadCoordinator::new(config)
        .unwrap()
        .execute_upload()
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(summary.total_rows, 1);
    assert!(summary.is_successful());
    assert_eq!(read(&dir, "success_log.csv"), "row_id,service_id\n4,SVC-C\n");
    assert_eq!(read(&dir, "error_log.csv"), "row_id,error_kind,message\n");
    assert_eq!(read(&dir, "error_rows.txt"), "");
}

#[tokio::test]
async fn test_unreachable_api_records_http_errors() {
    // bind then drop to get a port nobody listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = TempDir::new().unwrap();
    let config_path = write_fixture(&dir, &format!("http://{addr}/api/add_service"), "");
    let config = load_config(&config_path).unwrap();

    let summary = UploadCoordinator::new(config)
        .unwrap()
        .execute_upload()
        .await
        .unwrap();

    assert_eq!(summary.transport_failures, 2);
    assert_eq!(summary.failed_rows, 3);

    let errors = read(&dir, "error_log.csv");
    let lines: Vec<&str> = errors.lines().skip(1).collect();
    assert_eq!(lines.len(), 3);
    assert!(lines
        .iter()
        .all(|line| line.contains(",HTTP,") && line.contains("2 attempt(s)")));
    assert_eq!(read(&dir, "error_rows.txt"), "2\n3\n4\n");
}

#[tokio::test]
async fn test_dry_run_leaves_no_files() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let config_path = write_fixture(
        &dir,
        &format!("{}/api/add_service", server.url()),
        "[application]\ndry_run = true\n",
    );
    let config = load_config(&config_path).unwrap();

    let summary = UploadCoordinator::new(config)
        .unwrap()
        .execute_upload()
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(summary.dry_run);
    assert_eq!(summary.total_batches, 2);
    assert!(!Path::new(&dir.path().join("success_log.csv")).exists());
}

#[tokio::test]
async fn test_missing_input_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config_path = write_fixture(&dir, "http://127.0.0.1:9/api", "");
    let mut config = load_config(&config_path).unwrap();
    config.source.path = dir.path().join("missing.csv").to_string_lossy().to_string();

    let result = UploadCoordinator::new(config)
        .unwrap()
        .execute_upload()
        .await;

    assert!(result.is_err());
}

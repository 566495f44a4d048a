//! Integration tests for configuration-driven runs

use aozora_collector::config::load_config;
use aozora_collector::Pipeline;
use std::io::Write;
use tempfile::NamedTempFile;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write config");
    file.flush().expect("Failed to flush config");
    file
}

#[tokio::test]
async fn test_config_file_drives_discovery() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // The index only answers requests carrying the configured user agent
    Mock::given(method("GET"))
        .and(path("/list.html"))
        .and(header("user-agent", "ConfiguredAgent/2.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<ul class="works">
                <li><a href="/cards/000148/card789.html">吾輩は猫である</a></li>
                <li><a href="/about.html">about</a></li>
            </ul>"#,
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cards/000148/card789.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<table summary="作家データ">
                <tr><td>分類：</td><td>著者</td></tr>
                <tr><td>作家名：</td><td>夏目 漱石</td></tr>
            </table>
            <table class="download"><tr><td><a href="files/789_ruby_5639.zip">zip</a></td></tr></table>"#,
        ))
        .mount(&mock_server)
        .await;

    let file = write_config(&format!(
        r#"
[catalog]
index-url = "{base}/list.html"
site-root = "{base}"
link-selector = "ul.works li a"

[http]
user-agent = "ConfiguredAgent/2.0"
timeout-secs = 5
"#,
        base = base_url
    ));

    let config = load_config(file.path()).expect("Failed to load config");
    let index_url = config.catalog.index_url.clone();
    let pipeline = Pipeline::from_config(config).expect("Failed to build pipeline");

    let entries = pipeline.discover(&index_url).await.expect("Discovery failed");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].author(), "夏目 漱石");
    assert_eq!(entries[0].title(), "吾輩は猫である");
    assert_eq!(
        entries[0].archive_location(),
        Some(format!("{}/cards/000148/files/789_ruby_5639.zip", base_url).as_str())
    );
}

#[test]
fn test_invalid_config_is_rejected() {
    let file = write_config(
        r#"
[archive]
text-extensions = []
"#,
    );
    assert!(load_config(file.path()).is_err());
}

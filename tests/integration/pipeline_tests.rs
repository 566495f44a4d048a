//! Integration tests for the collection pipeline
//!
//! These tests use wiremock to serve a small catalog (index page, detail
//! pages and archives) and run the real HTTP fetcher against it.

use aozora_collector::config::{CatalogConfig, Config, HttpConfig};
use aozora_collector::{EntryError, FetchError, Pipeline, Resolution};
use std::io::{Cursor, Write};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Creates a test configuration pointing the catalog at the mock server
fn create_test_config(site_root: &str) -> Config {
    Config {
        catalog: CatalogConfig {
            index_url: format!("{}/index_pages/person879.html", site_root),
            site_root: site_root.to_string(),
            link_selector: "ol li a".to_string(),
        },
        http: HttpConfig {
            user_agent: "TestCollector/1.0".to_string(),
            timeout_secs: 5,
            connect_timeout_secs: 2,
        },
        ..Config::default()
    }
}

fn build_zip(members: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in members {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("Failed to start zip member");
        writer.write_all(content).expect("Failed to write zip member");
    }
    writer.finish().expect("Failed to finish zip").into_inner()
}

fn detail_page(author: &str, zip_href: &str) -> String {
    format!(
        r#"<html><body>
        <table summary="作家データ">
            <tr><td class="header">分類：</td><td>著者</td></tr>
            <tr><td class="header">作家名：</td><td><a href="../../index_pages/person879.html">{}</a></td></tr>
        </table>
        <table class="download">
            <tr><th>ファイル種別</th><th>圧縮</th><th>ファイル名（リンク）</th></tr>
            <tr bgcolor="white"><td>テキストファイル(ルビあり)</td><td>zip</td><td><a href="{}">file.zip</a></td></tr>
        </table>
        </body></html>"#,
        author, zip_href
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

async fn mount_archive(server: &MockServer, archive_path: &str, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(archive_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body)
                .insert_header("content-type", "application/zip"),
        )
        .mount(server)
        .await;
}

/// Mounts an index with three works and one unrelated link
async fn mount_catalog(server: &MockServer) {
    let base_url = server.uri();

    mount_page(
        server,
        "/index_pages/person879.html",
        r#"<html><body>
        <h2>作品一覧</h2>
        <ol>
            <li><a href="../cards/000879/card127.html">羅生門</a>（新字旧仮名、作品ID：127）</li>
            <li><a href="../cards/000879/card42.html">鼻</a>（新字旧仮名、作品ID：42）</li>
            <li><a href="../index_pages/person148.html">夏目 漱石</a></li>
            <li><a href="../cards/000879/card92.html">蜘蛛の糸</a>（新字新仮名、作品ID：92）</li>
        </ol>
        </body></html>"#
            .to_string(),
    )
    .await;

    mount_page(
        server,
        "/cards/000879/card127.html",
        detail_page("芥川 竜之介", "./files/127_ruby_150.zip"),
    )
    .await;
    mount_page(
        server,
        "/cards/000879/card42.html",
        detail_page("芥川 竜之介", "./files/42_ruby_154.zip"),
    )
    .await;
    mount_page(
        server,
        "/cards/000879/card92.html",
        detail_page(
            "芥川 竜之介",
            &format!("{}/mirror/92_ruby_164.zip", base_url),
        ),
    )
    .await;

    mount_archive(
        server,
        "/cards/000879/files/127_ruby_150.zip",
        build_zip(&[
            ("rashomon.html", "<p>羅生門</p>".as_bytes()),
            ("rashomon.txt", "ある日の暮方の事である。".as_bytes()),
        ]),
    )
    .await;
    mount_archive(
        server,
        "/mirror/92_ruby_164.zip",
        build_zip(&[("kumonoito.txt", "ある日の事でございます。".as_bytes())]),
    )
    .await;
}

#[tokio::test]
async fn test_full_run_against_mock_catalog() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;

    // Archive for card42 is not mounted, so its download returns 404
    let config = create_test_config(&mock_server.uri());
    let index_url = config.catalog.index_url.clone();
    let pipeline = Pipeline::from_config(config).expect("Failed to build pipeline");

    let outcomes = pipeline.collect(&index_url).await.expect("Run failed");
    assert_eq!(outcomes.len(), 3);

    let first = &outcomes[0];
    assert_eq!(first.entry.title(), "羅生門");
    assert_eq!(first.entry.author(), "芥川 竜之介");
    assert_eq!(
        first.entry.detail_page_location(),
        format!("{}/cards/000879/card127.html", mock_server.uri())
    );
    assert_eq!(
        first.entry.archive_location(),
        Some(format!("{}/cards/000879/files/127_ruby_150.zip", mock_server.uri()).as_str())
    );
    assert_eq!(
        first.result.as_deref().expect("First entry failed"),
        "ある日の暮方の事である。"
    );

    assert!(matches!(
        outcomes[1].result,
        Err(EntryError::Fetch(FetchError::Status { status: 404, .. }))
    ));

    let third = &outcomes[2];
    assert_eq!(
        third.entry.archive_location(),
        Some(format!("{}/mirror/92_ruby_164.zip", mock_server.uri()).as_str())
    );
    assert_eq!(
        third.result.as_deref().expect("Third entry failed"),
        "ある日の事でございます。"
    );
}

#[tokio::test]
async fn test_discovery_is_repeatable() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;

    let config = create_test_config(&mock_server.uri());
    let index_url = config.catalog.index_url.clone();
    let pipeline = Pipeline::from_config(config).expect("Failed to build pipeline");

    let first = pipeline.discover(&index_url).await.expect("Discovery failed");
    let second = pipeline.discover(&index_url).await.expect("Discovery failed");

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_index_server_error_is_fatal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/index_pages/person879.html"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let index_url = config.catalog.index_url.clone();
    let pipeline = Pipeline::from_config(config).expect("Failed to build pipeline");

    let result = pipeline.collect(&index_url).await;
    assert!(matches!(
        result,
        Err(aozora_collector::CollectorError::Discovery {
            source: FetchError::Status { status: 500, .. },
            ..
        })
    ));
}

#[tokio::test]
async fn test_detail_page_failure_keeps_entry() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/index_pages/person879.html",
        r#"<ol><li><a href="../cards/000879/card127.html">羅生門</a></li></ol>"#.to_string(),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/cards/000879/card127.html"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let index_url = config.catalog.index_url.clone();
    let pipeline = Pipeline::from_config(config).expect("Failed to build pipeline");

    let outcomes = pipeline.collect(&index_url).await.expect("Run failed");
    assert_eq!(outcomes.len(), 1);

    let entry = &outcomes[0].entry;
    assert_eq!(entry.title_id(), "127");
    assert_eq!(entry.author(), "");
    assert!(matches!(entry.resolution(), Resolution::Failed { .. }));

    match &outcomes[0].result {
        Err(EntryError::UnresolvedArchive {
            resolution_error: Some(reason),
        }) => assert!(reason.contains("503"), "unexpected reason: {}", reason),
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_archive_reported() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/index_pages/person879.html",
        r#"<ol><li><a href="../cards/000879/card127.html">羅生門</a></li></ol>"#.to_string(),
    )
    .await;
    mount_page(
        &mock_server,
        "/cards/000879/card127.html",
        detail_page("芥川 竜之介", "files/broken.zip"),
    )
    .await;
    mount_archive(
        &mock_server,
        "/cards/000879/files/broken.zip",
        b"<html>not found</html>".to_vec(),
    )
    .await;

    let config = create_test_config(&mock_server.uri());
    let index_url = config.catalog.index_url.clone();
    let pipeline = Pipeline::from_config(config).expect("Failed to build pipeline");

    let outcomes = pipeline.collect(&index_url).await.expect("Run failed");
    assert!(matches!(
        outcomes[0].result,
        Err(EntryError::MalformedArchive(_))
    ));
}

#[tokio::test]
async fn test_slow_archive_times_out_without_ending_run() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;

    // card42's archive answers only after the request timeout has passed
    Mock::given(method("GET"))
        .and(path("/cards/000879/files/42_ruby_154.zip"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(build_zip(&[("hana.txt", "禅智内供の鼻と云えば".as_bytes())]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri());
    config.http.timeout_secs = 1;
    let index_url = config.catalog.index_url.clone();
    let pipeline = Pipeline::from_config(config).expect("Failed to build pipeline");

    let outcomes = pipeline.collect(&index_url).await.expect("Run failed");
    assert_eq!(outcomes.len(), 3);

    assert_eq!(
        outcomes[0].result.as_deref().expect("First entry failed"),
        "ある日の暮方の事である。"
    );
    assert!(
        matches!(
            outcomes[1].result,
            Err(EntryError::Fetch(FetchError::Timeout { .. }))
        ),
        "unexpected outcome: {:?}",
        outcomes[1].result
    );
    assert_eq!(
        outcomes[2].result.as_deref().expect("Third entry failed"),
        "ある日の事でございます。"
    );
}

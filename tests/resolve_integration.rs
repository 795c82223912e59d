//! Integration tests for resolve_final_url
//!
//! These tests drive full resolutions against wiremock servers:
//! - Header redirect chains and hop budget enforcement
//! - Meta refresh redirects
//! - Cookie propagation across hops
//! - Terminal responses, scheme rejection and the overall deadline

use std::time::Duration;

use hopfollow::{
    resolve_final_url, Config, ErrorKind, LogLevel, RedirectTrigger, ResolveError,
};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Helper function to create a basic Config for testing
fn create_test_config(url: String, max_hops: u32) -> Config {
    Config {
        url,
        max_hops,
        timeout_secs: 5.0,
        verbose: false,
        log_level: LogLevel::Error, // Reduce noise in tests
        user_agent: "hopfollow_test/1.0".to_string(),
        ..Default::default()
    }
}

async fn resolve(url: String, max_hops: u32) -> Result<hopfollow::Resolution, ResolveError> {
    resolve_final_url(&create_test_config(url, max_hops), CancellationToken::new()).await
}

fn redirect(status: u16, location: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).insert_header("Location", location)
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8")
}

/// Mounts /r/0 -> /r/1 -> ... -> /r/{k} where /r/{k} is a plain 200.
async fn mount_chain(server: &MockServer, k: usize) {
    for i in 0..k {
        Mock::given(method("GET"))
            .and(path(format!("/r/{i}")))
            .respond_with(redirect(302, &format!("/r/{}", i + 1)))
            .mount(server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path(format!("/r/{k}")))
        .respond_with(ResponseTemplate::new(200).set_body_string("end"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_relative_location_resolves_against_current_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x"))
        .respond_with(redirect(302, "/b"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let resolution = resolve(format!("{}/x", server.uri()), 10).await.unwrap();
    assert_eq!(resolution.final_url.as_str(), format!("{}/b", server.uri()));
    assert_eq!(resolution.redirect_count(), 1);
}

#[tokio::test]
async fn test_chain_shorter_than_budget_succeeds() {
    let server = MockServer::start().await;
    mount_chain(&server, 3).await;

    let resolution = resolve(format!("{}/r/0", server.uri()), 4).await.unwrap();
    assert_eq!(resolution.final_url.path(), "/r/3");
    assert_eq!(resolution.hops.len(), 4);
}

#[tokio::test]
async fn test_chain_as_long_as_budget_fails() {
    let server = MockServer::start().await;
    mount_chain(&server, 3).await;

    let err = resolve(format!("{}/r/0", server.uri()), 3)
        .await
        .unwrap_err();
    assert!(
        matches!(err, ResolveError::TooManyRedirects { hop: 4, limit: 3 }),
        "got {err:?}"
    );
    // The terminal page is never requested
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|r| r.url.path() != "/r/3"));
}

#[tokio::test]
async fn test_zero_budget_issues_no_request() {
    let server = MockServer::start().await;
    mount_chain(&server, 0).await;

    let err = resolve(format!("{}/r/0", server.uri()), 0)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TooManyRedirects);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_all_redirect_statuses_are_followed() {
    let server = MockServer::start().await;
    for (i, status) in [301u16, 302, 303, 307, 308].into_iter().enumerate() {
        Mock::given(method("GET"))
            .and(path(format!("/s/{i}")))
            .respond_with(redirect(status, &format!("/s/{}", i + 1)))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/s/5"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let resolution = resolve(format!("{}/s/0", server.uri()), 10).await.unwrap();
    assert_eq!(resolution.final_url.path(), "/s/5");
    assert_eq!(resolution.redirect_count(), 5);
}

#[tokio::test]
async fn test_meta_refresh_is_followed() {
    let server = MockServer::start().await;
    let target = format!("{}/landing", server.uri());
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(html(&format!(
            r#"<html><head><meta http-equiv="refresh" content="0;url={target}"></head></html>"#
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/landing"))
        .respond_with(html("<html><body>welcome</body></html>"))
        .mount(&server)
        .await;

    let resolution = resolve(format!("{}/page", server.uri()), 10).await.unwrap();
    assert_eq!(resolution.final_url.as_str(), target);
    assert_eq!(
        resolution.hops[0].next.as_ref().map(|(_, trigger)| *trigger),
        Some(RedirectTrigger::MetaRefresh)
    );
    assert_eq!(
        resolution.hops[0].content_type.as_deref(),
        Some("text/html; charset=utf-8")
    );
}

#[tokio::test]
async fn test_meta_refresh_uppercase_key_and_quotes() {
    let server = MockServer::start().await;
    let target = format!("{}/quoted", server.uri());
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(html(&format!(
            r#"<meta http-equiv="refresh" content="5;URL='{target}'">"#
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/quoted"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let resolution = resolve(format!("{}/page", server.uri()), 10).await.unwrap();
    assert_eq!(resolution.final_url.as_str(), target);
}

#[tokio::test]
async fn test_relative_meta_refresh_resolves_against_its_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/start"))
        .respond_with(redirect(302, "/pages/a"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pages/a"))
        .respond_with(html(r#"<meta http-equiv="refresh" content="0; url=next">"#))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pages/next"))
        .respond_with(html("<p>done</p>"))
        .mount(&server)
        .await;

    let resolution = resolve(format!("{}/start", server.uri()), 10).await.unwrap();
    assert_eq!(resolution.final_url.path(), "/pages/next");
}

#[tokio::test]
async fn test_meta_refresh_counts_against_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(html(r#"<meta http-equiv="refresh" content="0;url=/loop">"#))
        .mount(&server)
        .await;

    let err = resolve(format!("{}/loop", server.uri()), 4)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TooManyRedirects);
    assert_eq!(server.received_requests().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_malformed_meta_refresh_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bad"))
        .respond_with(html(r#"<meta http-equiv="refresh" content="nope">"#))
        .mount(&server)
        .await;

    let err = resolve(format!("{}/bad", server.uri()), 10)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedMetaRedirect);
    assert_eq!(err.hop(), Some(1));
}

#[tokio::test]
async fn test_html_without_meta_refresh_is_terminal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/plain"))
        .respond_with(html("<html><head><title>t</title></head></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let start = format!("{}/plain", server.uri());
    let resolution = resolve(start.clone(), 10).await.unwrap();
    assert_eq!(resolution.final_url.as_str(), start);
}

#[tokio::test]
async fn test_non_html_response_is_terminal_regardless_of_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/json")
                .set_body_string(
                    r#"{"page":"<meta http-equiv=\"refresh\" content=\"0;url=/elsewhere\">"}"#,
                ),
        )
        .expect(1)
        .mount(&server)
        .await;

    let start = format!("{}/api", server.uri());
    let resolution = resolve(start.clone(), 10).await.unwrap();
    assert_eq!(resolution.final_url.as_str(), start);
    assert_eq!(resolution.hops.len(), 1);
}

#[tokio::test]
async fn test_location_wins_over_meta_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/both"))
        .respond_with(
            redirect(302, "/by-header")
                .insert_header("Content-Type", "text/html")
                .set_body_string(r#"<meta http-equiv="refresh" content="0;url=/by-meta">"#),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/by-header"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let resolution = resolve(format!("{}/both", server.uri()), 10).await.unwrap();
    assert_eq!(resolution.final_url.path(), "/by-header");
}

#[tokio::test]
async fn test_cookies_follow_matching_hops_only() {
    let server = MockServer::start().await;
    let same_host = server.uri();
    let other_host = server.uri().replace("127.0.0.1", "localhost");

    Mock::given(method("GET"))
        .and(path("/login-same"))
        .respond_with(
            redirect(302, &format!("{same_host}/check"))
                .insert_header("Set-Cookie", "session=abc; Path=/"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/login-other"))
        .respond_with(
            redirect(302, &format!("{other_host}/check"))
                .insert_header("Set-Cookie", "session=abc; Path=/"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/check"))
        .respond_with(|req: &Request| {
            let has_session = req
                .headers
                .get("cookie")
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.contains("session=abc"));
            if has_session {
                redirect(302, "/with-cookie")
            } else {
                redirect(302, "/without-cookie")
            }
        })
        .mount(&server)
        .await;
    for landing in ["/with-cookie", "/without-cookie"] {
        Mock::given(method("GET"))
            .and(path(landing))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
    }

    let resolution = resolve(format!("{same_host}/login-same"), 10)
        .await
        .unwrap();
    assert_eq!(resolution.final_url.path(), "/with-cookie");

    // Same server, different host name: the host-only cookie is withheld
    let resolution = resolve(format!("{same_host}/login-other"), 10)
        .await
        .unwrap();
    assert_eq!(resolution.final_url.path(), "/without-cookie");
    assert_eq!(resolution.final_url.host_str(), Some("localhost"));
}

#[tokio::test]
async fn test_cookies_do_not_leak_between_resolutions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/set"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("Set-Cookie", "session=abc; Path=/"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/probe"))
        .respond_with(|req: &Request| {
            if req.headers.get("cookie").is_some() {
                redirect(302, "/leaked")
            } else {
                ResponseTemplate::new(200)
            }
        })
        .mount(&server)
        .await;

    let (first, second) = tokio::join!(
        resolve(format!("{}/set", server.uri()), 10),
        resolve(format!("{}/probe", server.uri()), 10),
    );
    first.unwrap();
    assert_eq!(second.unwrap().final_url.path(), "/probe");

    // Sequential calls start from an empty jar too
    let after = resolve(format!("{}/probe", server.uri()), 10).await.unwrap();
    assert_eq!(after.final_url.path(), "/probe");
}

#[tokio::test]
async fn test_browser_signature_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ua"))
        .and(wiremock::matchers::header("user-agent", "hopfollow_test/1.0"))
        .and(wiremock::matchers::header_exists("accept-language"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    resolve(format!("{}/ua", server.uri()), 10).await.unwrap();
}

#[tokio::test]
async fn test_unsupported_scheme_at_start_and_in_redirect() {
    let err = resolve("ftp://files.example/pub".to_string(), 10)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ResolveError::UnsupportedScheme { hop: 1, ref scheme } if scheme == "ftp"
    ));

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/to-ftp"))
        .respond_with(redirect(301, "ftp://files.example/pub"))
        .mount(&server)
        .await;

    let err = resolve(format!("{}/to-ftp", server.uri()), 10)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ResolveError::UnsupportedScheme { hop: 2, ref scheme } if scheme == "ftp"
    ));
}

#[tokio::test]
async fn test_invalid_redirect_target() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(redirect(302, "http://[::1"))
        .mount(&server)
        .await;

    let err = resolve(format!("{}/broken", server.uri()), 10)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidUrl);
    assert_eq!(err.hop(), Some(1));
}

#[tokio::test]
async fn test_slow_resolution_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fast"))
        .respond_with(redirect(302, "/slow"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let config = Config {
        timeout_secs: 0.2,
        ..create_test_config(format!("{}/fast", server.uri()), 10)
    };
    let cancel = CancellationToken::new();
    let started = std::time::Instant::now();
    let err = resolve_final_url(&config, cancel.clone())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Timeout);
    // The slow page is the second request
    assert_eq!(err.hop(), Some(2));
    assert!(err.to_string().starts_with("hop 2: timeout 0.20 sec."));
    assert!(cancel.is_cancelled());
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_zero_timeout_disables_deadline() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slowish"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
        .mount(&server)
        .await;

    let config = Config {
        timeout_secs: 0.0,
        ..create_test_config(format!("{}/slowish", server.uri()), 10)
    };
    let resolution = resolve_final_url(&config, CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(resolution.final_url.path(), "/slowish");
}

#[tokio::test]
async fn test_negative_timeout_is_config_error() {
    let server = MockServer::start().await;
    let config = Config {
        timeout_secs: -1.0,
        ..create_test_config(server.uri(), 10)
    };
    let err = resolve_final_url(&config, CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_external_cancellation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hang"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let config = create_test_config(format!("{}/hang", server.uri()), 10);
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let err = resolve_final_url(&config, cancel).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);
}

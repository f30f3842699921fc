//! Adapter round trips against a local HTTP server.
//!
//! Each test starts a one-shot server on 127.0.0.1 that records the raw
//! request and answers with a canned response.

use std::sync::Arc;

use terjemah_core::{Language, TranslationRequest};
use terjemah_fetch::{
    DispatchError, HttpError, ProviderError, TranslateContext, TranslationAdapter,
    TranslationDispatcher,
};
use terjemah_providers::{
    GoogleAdapter, LibreTranslateAdapter, MyMemoryAdapter, OpenAiAdapter, ProviderRegistry,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

// ============================================================================
// One-shot Server
// ============================================================================

struct OneShot {
    base_url: String,
    request: JoinHandle<String>,
}

impl OneShot {
    async fn respond(status: &'static str, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let request = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let raw = read_request(&mut socket).await;

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            raw
        });

        Self {
            base_url: format!("http://{addr}"),
            request,
        }
    }

    async fn received(self) -> String {
        self.request.await.unwrap()
    }
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "client closed before sending headers");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    String::from_utf8_lossy(&buf).into_owned()
}

fn ctx() -> TranslateContext {
    TranslateContext::builder().no_proxy().build()
}

fn body_json(raw: &str) -> serde_json::Value {
    let body = raw.split("\r\n\r\n").nth(1).unwrap();
    serde_json::from_str(body).unwrap()
}

// ============================================================================
// Adapter Round Trips
// ============================================================================

#[tokio::test]
async fn test_mymemory_get_request() {
    let server = OneShot::respond(
        "200 OK",
        r#"{"responseData":{"translatedText":"terima kasih"},"responseStatus":200}"#,
    )
    .await;
    let adapter = MyMemoryAdapter::with_base_url(&server.base_url);
    let request = TranslationRequest::new("ありがとう", Language::Japanese, Language::Indonesian);

    let text = adapter.translate(&ctx(), &request, None).await.unwrap();
    assert_eq!(text, "terima kasih");

    let raw = server.received().await;
    let request_line = raw.lines().next().unwrap();
    assert!(request_line.starts_with("GET /get?q="));
    assert!(request_line.contains("langpair=ja%7Cid"));
}

#[tokio::test]
async fn test_openai_post_with_bearer() {
    let server = OneShot::respond(
        "200 OK",
        r#"{"choices":[{"message":{"role":"assistant","content":" おはようございます \n"}}]}"#,
    )
    .await;
    let adapter = OpenAiAdapter::with_base_url(&server.base_url);
    let request = TranslationRequest::new("selamat pagi", Language::Indonesian, Language::Japanese);

    let text = adapter.translate(&ctx(), &request, Some("sk-test")).await.unwrap();
    assert_eq!(text, "おはようございます");

    let raw = server.received().await;
    assert!(raw.starts_with("POST /v1/chat/completions"));
    assert!(raw.to_lowercase().contains("authorization: bearer sk-test"));

    let body = body_json(&raw);
    assert_eq!(body["model"], "gpt-4");
    assert_eq!(body["messages"][1]["content"], "selamat pagi");
}

#[tokio::test]
async fn test_google_key_in_query() {
    let server = OneShot::respond(
        "200 OK",
        r#"{"data":{"translations":[{"translatedText":"こんにちは"}]}}"#,
    )
    .await;
    let adapter = GoogleAdapter::with_base_url(&server.base_url);
    let request = TranslationRequest::new("halo", Language::Indonesian, Language::Japanese);

    let text = adapter.translate(&ctx(), &request, Some("g-key")).await.unwrap();
    assert_eq!(text, "こんにちは");

    let raw = server.received().await;
    assert!(raw.starts_with("POST /language/translate/v2?key=g-key"));
    assert_eq!(
        body_json(&raw),
        serde_json::json!({"q": "halo", "source": "id", "target": "ja"})
    );
}

#[tokio::test]
async fn test_libretranslate_sends_optional_key() {
    let server = OneShot::respond("200 OK", r#"{"translatedText":"halo"}"#).await;
    let adapter = LibreTranslateAdapter::with_base_url(&server.base_url);
    let request = TranslationRequest::new("こんにちは", Language::Japanese, Language::Indonesian);

    let text = adapter.translate(&ctx(), &request, Some("lt-key")).await.unwrap();
    assert_eq!(text, "halo");

    let body = body_json(&server.received().await);
    assert_eq!(body["api_key"], "lt-key");
    assert_eq!(body["source"], "ja");
}

#[tokio::test]
async fn test_non_success_status_is_error() {
    let server = OneShot::respond("500 Internal Server Error", r#"{"error":"boom"}"#).await;
    let adapter = LibreTranslateAdapter::with_base_url(&server.base_url);
    let request = TranslationRequest::new("halo", Language::Indonesian, Language::Japanese);

    let err = adapter.translate(&ctx(), &request, None).await.unwrap_err();
    assert!(matches!(
        err,
        ProviderError::Http(HttpError::Status { status: 500, .. })
    ));
    server.received().await;
}

// ============================================================================
// Dispatch Over HTTP
// ============================================================================

fn dispatcher_with(
    adapters: Vec<Arc<dyn TranslationAdapter>>,
) -> terjemah_fetch::DispatcherBuilder {
    adapters
        .into_iter()
        .fold(TranslationDispatcher::builder().context(ctx()), |builder, adapter| {
            let defaults = ProviderRegistry::get(adapter.id()).unwrap().default_config();
            builder.provider(defaults, adapter)
        })
}

#[tokio::test]
async fn test_japanese_to_indonesian_via_mymemory() {
    let server = OneShot::respond(
        "200 OK",
        r#"{"responseData":{"translatedText":"terima kasih"},"responseStatus":200}"#,
    )
    .await;

    // Only MyMemory is registered, standing in for the others being
    // disabled or exhausted.
    let adapters: Vec<Arc<dyn TranslationAdapter>> =
        vec![Arc::new(MyMemoryAdapter::with_base_url(&server.base_url))];
    let dispatcher = dispatcher_with(adapters)
        .fallback_order(["mymemory"])
        .build()
        .await
        .unwrap();

    let request = TranslationRequest::new("ありがとう", Language::Japanese, Language::Indonesian);
    let result = dispatcher.dispatch(&request).await.unwrap();

    assert_eq!(result.translated_text, "terima kasih");
    assert_eq!(result.provider_id, "mymemory");
    assert_eq!(result.provider_name, "MyMemory");
    assert!((result.confidence - 0.8).abs() < f64::EPSILON);
    assert_eq!(dispatcher.provider("mymemory").await.unwrap().used_today, 1);
    server.received().await;
}

#[tokio::test]
async fn test_fallback_across_real_adapters() {
    let failing = OneShot::respond("503 Service Unavailable", "{}").await;
    let working = OneShot::respond(
        "200 OK",
        r#"{"responseData":{"translatedText":"おはよう"},"responseStatus":200}"#,
    )
    .await;

    let adapters: Vec<Arc<dyn TranslationAdapter>> = vec![
        // No key configured: fails before any request.
        Arc::new(OpenAiAdapter::with_base_url("http://127.0.0.1:9")),
        Arc::new(LibreTranslateAdapter::with_base_url(&failing.base_url)),
        Arc::new(MyMemoryAdapter::with_base_url(&working.base_url)),
    ];
    let dispatcher = dispatcher_with(adapters)
        .fallback_order(["gpt4", "libretranslate", "mymemory"])
        .build()
        .await
        .unwrap();

    let request = TranslationRequest::new("selamat pagi", Language::Indonesian, Language::Japanese);
    let outcome = dispatcher.dispatch_outcome(&request).await;

    assert_eq!(outcome.successful_provider(), Some("mymemory"));
    assert_eq!(outcome.attempts_count(), 3);
    assert!(outcome.errors()[0].contains("API key not configured"));
    assert!(outcome.errors()[1].contains("503"));

    let providers = dispatcher.providers().await;
    let used: Vec<(&str, u32)> = providers
        .iter()
        .map(|p| (p.id.as_str(), p.used_today))
        .collect();
    assert_eq!(used, vec![("gpt4", 0), ("libretranslate", 0), ("mymemory", 1)]);

    failing.received().await;
    working.received().await;
}

#[tokio::test]
async fn test_all_http_providers_failing() {
    let a = OneShot::respond("500 Internal Server Error", "{}").await;
    let b = OneShot::respond("429 Too Many Requests", "{}").await;

    let adapters: Vec<Arc<dyn TranslationAdapter>> = vec![
        Arc::new(LibreTranslateAdapter::with_base_url(&a.base_url)),
        Arc::new(MyMemoryAdapter::with_base_url(&b.base_url)),
    ];
    let dispatcher = dispatcher_with(adapters)
        .fallback_order(["libretranslate", "mymemory"])
        .build()
        .await
        .unwrap();

    let request = TranslationRequest::new("halo", Language::Indonesian, Language::Japanese);
    let err = dispatcher.dispatch(&request).await.unwrap_err();
    assert!(matches!(err, DispatchError::AllProvidersFailed { attempts: 2 }));

    a.received().await;
    b.received().await;
}

use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub key: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct CannedReply {
    status: u16,
    body: String,
}

/// Stand-in for the Gemini `generateContent` endpoint that answers every
/// request with the same canned reply and records what it was sent.
pub struct FakeGemini {
    pub url: String,
    received: web::Data<Mutex<Vec<ReceivedRequest>>>,
}

impl FakeGemini {
    pub fn received(&self) -> Vec<ReceivedRequest> {
        self.received.lock().unwrap().clone()
    }
}

/// Envelope the real endpoint wraps model text in.
pub fn candidate_reply(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {"parts": [{"text": text}], "role": "model"},
            "finishReason": "STOP"
        }]
    })
    .to_string()
}

pub async fn spawn_fake_gemini(status: u16, body: String) -> FakeGemini {
    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let reply = web::Data::new(CannedReply { status, body });
    let received = web::Data::new(Mutex::new(Vec::<ReceivedRequest>::new()));
    let received_for_server = received.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(reply.clone())
            .app_data(received_for_server.clone())
            .route("/v1beta/models/gemini-pro:generateContent", web::post().to(generate_content))
    })
    .workers(1)
    .listen(listener)
    .expect("Failed to bind address")
    .run();
    let _ = tokio::spawn(server);

    FakeGemini {
        url: format!("http://127.0.0.1:{}/v1beta/models/gemini-pro:generateContent", port),
        received,
    }
}

async fn generate_content(
    reply: web::Data<CannedReply>,
    received: web::Data<Mutex<Vec<ReceivedRequest>>>,
    query: web::Query<HashMap<String, String>>,
    body: web::Json<Value>,
) -> HttpResponse {
    received.lock().unwrap().push(ReceivedRequest {
        key: query.get("key").cloned(),
        body: body.into_inner(),
    });

    HttpResponse::build(StatusCode::from_u16(reply.status).unwrap())
        .content_type("application/json")
        .body(reply.body.clone())
}

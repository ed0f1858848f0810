//! In-process fake of the roster service for adapter and behaviour tests.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. Dropping the harness stops the server.

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::header;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};
use tokio::runtime::Runtime;
use tokio::task::LocalSet;
use url::Url;

/// One request as the fake service saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub token: Option<String>,
    pub cookie: Option<String>,
    pub content_type: Option<String>,
    pub accept: Option<String>,
    pub body: String,
}

/// Canned response replacing the stateful behaviour of one route.
#[derive(Debug, Clone)]
pub struct Scripted {
    pub status: u16,
    pub body: String,
    pub delay: Option<Duration>,
    pub location: Option<String>,
}

impl Scripted {
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
            delay: None,
            location: None,
        }
    }

    pub fn json(status: u16, body: Value) -> Self {
        Self {
            body: body.to_string(),
            ..Self::status(status)
        }
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::status(status)
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn redirect_to(mut self, location: &str) -> Self {
        self.location = Some(location.to_owned());
        self
    }
}

#[derive(Debug, Default)]
struct RosterState {
    students: Vec<Value>,
    next_id: u32,
    admin_status: u16,
    overrides: HashMap<(String, String), Scripted>,
    rotate_token: Option<String>,
    requests: Vec<RecordedRequest>,
}

/// Shared handle on the fake service state.
#[derive(Debug, Clone, Default)]
pub struct FakeRoster {
    state: Arc<Mutex<RosterState>>,
}

impl FakeRoster {
    fn lock(&self) -> MutexGuard<'_, RosterState> {
        self.state.lock().expect("fake roster lock")
    }

    /// Seed a student as the service would store it.
    pub fn seed(&self, id: Value, name: &str, email: &str) {
        self.lock().students.push(json!({
            "student_id": id,
            "name": name,
            "email": email,
            "status": "Active",
            "status_code": "A",
        }));
    }

    /// Status the admin endpoint answers with.
    pub fn set_admin_status(&self, status: u16) {
        self.lock().admin_status = status;
    }

    /// Replace the behaviour of `method path`.
    pub fn script(&self, method: &str, path: &str, response: Scripted) {
        self.lock()
            .overrides
            .insert((method.to_owned(), path.to_owned()), response);
    }

    /// Set a new anti-forgery cookie on the next response.
    pub fn rotate_token(&self, token: &str) {
        self.lock().rotate_token = Some(token.to_owned());
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.method == method && request.path == path)
            .collect()
    }

    pub fn student_count(&self) -> usize {
        self.lock().students.len()
    }
}

fn header_text(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

async fn respond(req: HttpRequest, body: web::Bytes, roster: web::Data<FakeRoster>) -> HttpResponse {
    let method = req.method().as_str().to_owned();
    let path = req.path().to_owned();
    let recorded = RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        token: header_text(&req, "x-xsrf-token"),
        cookie: header_text(&req, "cookie"),
        content_type: header_text(&req, "content-type"),
        accept: header_text(&req, "accept"),
        body: String::from_utf8_lossy(&body).into_owned(),
    };

    let (scripted, rotate) = {
        let mut state = roster.lock();
        state.requests.push(recorded);
        let scripted = state.overrides.get(&(method.clone(), path.clone())).cloned();
        (scripted, state.rotate_token.take())
    };

    let mut response = match scripted {
        Some(scripted) => {
            if let Some(delay) = scripted.delay {
                actix_web::rt::time::sleep(delay).await;
            }
            let mut builder = HttpResponse::build(status_code(scripted.status));
            if let Some(location) = scripted.location {
                builder.insert_header((header::LOCATION, location));
            }
            builder
                .content_type("application/json")
                .body(scripted.body)
        }
        None => route(&roster, &method, &path, &body),
    };

    if let Some(token) = rotate {
        let cookie = format!("XSRF-TOKEN={token}; Path=/");
        if let Ok(value) = header::HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}

fn route(roster: &FakeRoster, method: &str, path: &str, body: &[u8]) -> HttpResponse {
    let mut state = roster.lock();
    match (method, path) {
        ("GET", "/student") => HttpResponse::Ok().json(&state.students),
        ("POST", "/student") => {
            let Ok(payload) = serde_json::from_slice::<Value>(body) else {
                return HttpResponse::BadRequest().finish();
            };
            state.next_id += 1;
            let id = format!("N{}", state.next_id);
            state.students.push(json!({
                "student_id": id,
                "name": payload["name"],
                "email": payload["email"],
                "status": payload.get("status").cloned().unwrap_or(json!("Active")),
                "status_code": payload.get("status_code").cloned().unwrap_or(json!("A")),
            }));
            HttpResponse::Created().finish()
        }
        ("GET", "/admin") => {
            let status = if state.admin_status == 0 {
                200
            } else {
                state.admin_status
            };
            HttpResponse::build(status_code(status)).finish()
        }
        ("DELETE", other) => {
            let Some(id) = other.strip_prefix("/student/") else {
                return HttpResponse::NotFound().finish();
            };
            let before = state.students.len();
            state.students.retain(|student| {
                let stored = match &student["student_id"] {
                    Value::String(text) => text.clone(),
                    value => value.to_string(),
                };
                stored != id
            });
            if state.students.len() == before {
                HttpResponse::NotFound().finish()
            } else {
                HttpResponse::Ok().finish()
            }
        }
        _ => HttpResponse::NotFound().finish(),
    }
}

fn status_code(status: u16) -> actix_web::http::StatusCode {
    actix_web::http::StatusCode::from_u16(status).expect("valid fixture status")
}

/// Running fake service plus the runtime the tests drive it on.
pub struct RosterHarness {
    pub runtime: Runtime,
    pub local: LocalSet,
    pub base_url: Url,
    pub roster: FakeRoster,
    server: ServerHandle,
}

impl RosterHarness {
    /// Start a fake service backed by `roster`.
    pub fn start(roster: FakeRoster) -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("tokio runtime");
        let local = LocalSet::new();
        let (base_url, server) = local
            .block_on(&runtime, spawn_fake_server(roster.clone()))
            .expect("fake roster starts");
        Self {
            runtime,
            local,
            base_url,
            roster,
            server,
        }
    }

    /// Drive `future` to completion on the harness runtime.
    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.local.block_on(&self.runtime, future)
    }
}

impl Drop for RosterHarness {
    fn drop(&mut self) {
        let server = self.server.clone();
        self.local.block_on(&self.runtime, async move {
            server.stop(true).await;
        });
    }
}

async fn spawn_fake_server(roster: FakeRoster) -> Result<(Url, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let data = web::Data::new(roster);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .default_service(web::to(respond))
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    let url = Url::parse(&format!("http://{addr}/")).map_err(|err| err.to_string())?;
    Ok((url, handle))
}

//! Live server harness for issue behaviour tests.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The `WorldFixture` ensures the server
//! is stopped even if a test panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::http::Method;
use actix_web::{App, HttpServer, web};
use awc::Client;
use issue_tracker::Trace;
use issue_tracker::domain::{IssueService, TRACE_ID_HEADER};
use issue_tracker::inbound::http::routes;
use issue_tracker::inbound::http::state::HttpState;
use issue_tracker::outbound::memory::InMemoryIssueRepository;
use mockable::DefaultClock;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

pub(crate) struct IssueWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_trace_id: Option<String>,
    pub(crate) issue_id: Option<String>,
    pub(crate) created: Option<Value>,
}

pub(crate) type SharedWorld = Rc<RefCell<IssueWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        shutdown(self.world.clone());
    }
}

fn shutdown(world: SharedWorld) {
    // `LocalSet` must be driven on the thread that owns it, so we hold the
    // world while calling `block_on`. The future must not borrow the world.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

async fn spawn_issue_server() -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let service = Arc::new(IssueService::new(
        Arc::new(InMemoryIssueRepository::new()),
        Arc::new(DefaultClock),
    ));
    let http_data = web::Data::new(HttpState::new(service.clone(), service));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(http_data.clone())
            .wrap(Trace)
            .configure(routes)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();

    let (base_url, server) = local
        .block_on(&runtime, spawn_issue_server())
        .expect("server should start");

    let world = Rc::new(RefCell::new(IssueWorld {
        runtime,
        local,
        base_url,
        server,
        last_status: None,
        last_body: None,
        last_trace_id: None,
        issue_id: None,
        created: None,
    }));

    WorldFixture { world }
}

/// Send a request with an optional JSON body and record the response.
pub(crate) fn perform_json_request(
    world: &SharedWorld,
    method: Method,
    path: &str,
    payload: Option<Value>,
) {
    let url_path = path.to_owned();
    let (status, trace_id, body) = with_world_async(world, |base_url| async move {
        let request = Client::default().request(method, format!("{base_url}{url_path}"));
        let mut response = match payload {
            Some(payload) => request.send_json(&payload).await.expect("json request"),
            None => request.send().await.expect("request"),
        };
        let status = response.status().as_u16();
        let trace_id = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.body().await.expect("body");
        let json: Value = serde_json::from_slice(&body).expect("json body");
        (status, trace_id, json)
    });

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_trace_id = trace_id;
    ctx.last_body = Some(body);
}

/// Send an urlencoded form body and record the response.
pub(crate) fn perform_form_request(
    world: &SharedWorld,
    method: Method,
    path: &str,
    form: Vec<(String, String)>,
) {
    let url_path = path.to_owned();
    let (status, body) = with_world_async(world, |base_url| async move {
        let mut response = Client::default()
            .request(method, format!("{base_url}{url_path}"))
            .send_form(&form)
            .await
            .expect("form request");
        let status = response.status().as_u16();
        let body = response.body().await.expect("body");
        let json: Value = serde_json::from_slice(&body).expect("json body");
        (status, json)
    });

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_trace_id = None;
    ctx.last_body = Some(body);
}

//! Fake wallet provider: an in-process JSON-RPC endpoint.
//!
//! Serves scripted replies over real HTTP, so the wallet client and the RPC
//! contract binding are exercised end to end without a wallet or a chain.

use std::sync::{Arc, Mutex};

use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Reply to one JSON-RPC request: a result, or an error code and message.
pub type RpcReply = Result<Value, (i64, String)>;

type Handler = Arc<dyn Fn(&str, &Value) -> RpcReply + Send + Sync>;

/// A running fake provider. The server stops when this is dropped.
pub struct FakeProvider {
    url: String,
    requests: Arc<Mutex<Vec<(String, Value)>>>,
    task: JoinHandle<()>,
}

impl FakeProvider {
    /// Start serving on an ephemeral localhost port.
    ///
    /// `handler` receives the method name and params of every request.
    pub async fn spawn<F>(handler: F) -> Self
    where
        F: Fn(&str, &Value) -> RpcReply + Send + Sync + 'static,
    {
        let handler: Handler = Arc::new(handler);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = requests.clone();

        let app = Router::new().route(
            "/",
            post(move |Json(request): Json<Value>| {
                let handler = handler.clone();
                let log = log.clone();
                async move {
                    let method = request["method"].as_str().unwrap_or_default().to_string();
                    let params = request["params"].clone();
                    log.lock().unwrap().push((method.clone(), params.clone()));
                    let id = request["id"].clone();
                    Json(match handler(&method, &params) {
                        Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
                        Err((code, message)) => json!({
                            "jsonrpc": "2.0",
                            "id": id,
                            "error": { "code": code, "message": message },
                        }),
                    })
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake provider");
        let addr = listener.local_addr().expect("fake provider address");
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake provider server");
        });

        Self {
            url: format!("http://{addr}"),
            requests,
            task,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Every request received so far as `(method, params)`.
    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }

    /// Method names of every request received so far.
    pub fn methods(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(method, _)| method.clone())
            .collect()
    }
}

impl Drop for FakeProvider {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// A localhost URL nothing is listening on.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}")
}

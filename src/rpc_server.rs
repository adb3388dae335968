//! WikiSearch RPC Server: JSON-RPC over stdin/stdout for a GUI front-end.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"search", "params":{"query":"Alan Turing","language":"EN"}}
//! Response: {"id":1, "result":{"status":"displayed","text":"..."}} or {"id":1, "error":"..."}
//!
//! Requests are served one at a time. Closing stdin flushes history and
//! settings and exits.

use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use serde_json::{json, Value};

use wikisearch::app::App;
use wikisearch::logging;
use wikisearch::rpc_handler::handle_method;
use wikisearch::types::config::AppConfig;

fn respond(out: &mut impl Write, message: &Value) {
    if writeln!(out, "{}", message).and_then(|_| out.flush()).is_err() {
        tracing::error!("failed to write response to stdout");
    }
}

fn main() {
    logging::init();

    let config = AppConfig::from_env();
    let mut app = match App::with_wikipedia(config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("failed to initialize WikiSearch: {}", e);
            std::process::exit(1);
        }
    };
    app.startup();
    let app = Mutex::new(app);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    respond(&mut out, &json!({"event":"ready","version":env!("CARGO_PKG_VERSION")}));

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                respond(&mut out, &json!({"id":null,"error":format!("parse error: {}",e)}));
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        tracing::debug!("rpc {}", method);
        let response = match handle_method(&app, method, &params) {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        respond(&mut out, &response);
    }

    match app.into_inner() {
        Ok(mut app) => app.shutdown(),
        Err(poisoned) => poisoned.into_inner().shutdown(),
    }
}

//! RPC method handler for the WikiSearch JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` turns a method name and JSON params into a call on `App`
//! and returns the tagged outcome as JSON.

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::app::App;
use crate::types::errors::SessionError;
use crate::types::language::Language;
use crate::types::settings::Settings;

fn str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, String> {
    params
        .get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("missing {}", name))
}

/// Dispatch a JSON-RPC method call to the matching `App` operation.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub fn handle_method(app: &Mutex<App>, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Language ───
        "languages.list" => {
            let arr: Vec<Value> = Language::ALL
                .iter()
                .map(|l| json!({"label": l.label(), "code": l.code()}))
                .collect();
            Ok(json!(arr))
        }
        "language.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            Ok(json!({"language": a.language().label()}))
        }
        "language.set" => {
            let code = str_param(params, "language")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let language = a.set_language(code).map_err(|e| e.to_string())?;
            Ok(json!({"language": language.label()}))
        }

        // ─── Search ───
        "search" => {
            let query = str_param(params, "query")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            if let Some(code) = params.get("language").and_then(|v| v.as_str()) {
                a.set_language(code).map_err(|e| e.to_string())?;
            }
            let outcome = a.search(query);
            serde_json::to_value(outcome).map_err(|e| e.to_string())
        }
        "link.resolve" => {
            let title = str_param(params, "title")?;
            let a = app.lock().map_err(|e| e.to_string())?;
            let link = match params.get("language").and_then(|v| v.as_str()) {
                Some(code) => {
                    let language = Language::parse(code).ok_or_else(|| {
                        SessionError::UnsupportedLanguage(code.to_string()).to_string()
                    })?;
                    a.controller.resolve_option(title, language.code())
                }
                None => a.resolve_option(title),
            };
            serde_json::to_value(link).map_err(|e| e.to_string())
        }

        // ─── History ───
        "history.list" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            let arr: Vec<Value> = a
                .history()
                .iter()
                .enumerate()
                .map(|(i, h)| {
                    json!({
                        "index": i,
                        "query": h.query,
                        "language_code": h.language_code,
                        "label": h.to_string(),
                    })
                })
                .collect();
            Ok(json!(arr))
        }
        "history.open" => {
            let index = params
                .get("index")
                .and_then(|v| v.as_u64())
                .ok_or("missing index")? as usize;
            let mut a = app.lock().map_err(|e| e.to_string())?;
            let (entry, outcome) = a
                .open_history(index)
                .ok_or_else(|| format!("no history entry at index {}", index))?;
            Ok(json!({
                "query": entry.query,
                "language_code": entry.language_code,
                "result": outcome,
            }))
        }

        // ─── Settings ───
        "settings.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(&a.session.settings).map_err(|e| e.to_string())
        }
        "settings.set" => {
            let key = str_param(params, "key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            let mut a = app.lock().map_err(|e| e.to_string())?;

            let mut current = serde_json::to_value(&a.session.settings).map_err(|e| e.to_string())?;
            match current.get_mut(key) {
                Some(slot) => *slot = value,
                None => return Err(format!("invalid settings key: {}", key)),
            }
            let updated: Settings = serde_json::from_value(current)
                .map_err(|e| format!("invalid value for '{}': {}", key, e))?;

            a.update_settings(updated).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "settings.reset" => {
            let mut a = app.lock().map_err(|e| e.to_string())?;
            a.reset_settings().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "theme.get" => {
            let a = app.lock().map_err(|e| e.to_string())?;
            serde_json::to_value(a.palette()).map_err(|e| e.to_string())
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}

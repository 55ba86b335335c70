// SPDX-License-Identifier: MIT

pub mod error;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::arbiter::actions;
use crate::arbiter::config::Config;
use crate::arbiter::tree::condition::{self, Condition};
use crate::arbiter::tree::executor::extract_field;
use crate::arbiter::tree::validator::validate_condition;
use crate::arbiter::tree::{ActionRegistry, DataRecord, DecisionEngine, DecisionTree, TreeValidator};
use crate::engine::error::{ArbiterError, Result};
use error::ApiError;

static DECISION_TREE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::to_value(schemars::schema_for!(DecisionTree)).unwrap_or_default()
});

/// JSON Schema of a decision tree document
pub fn decision_tree_schema() -> &'static Value {
    &DECISION_TREE_SCHEMA
}

/// Shared state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    engine: DecisionEngine,
    validator: TreeValidator,
    timeout: Duration,
}

impl AppState {
    pub fn new(registry: ActionRegistry, config: &Config) -> Self {
        let validator =
            TreeValidator::new(config.max_repeat_count).with_known_kinds(registry.kinds());
        Self {
            engine: DecisionEngine::new(Arc::new(registry)),
            validator,
            timeout: config.evaluation_timeout,
        }
    }
}

/// Build the router with all API routes and middleware
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/actions", get(list_actions))
        .route("/api/schema/decision-tree", get(get_schema))
        .route("/api/execute-decision-tree", post(execute_decision_tree))
        .route("/api/conditions/evaluate", post(evaluate_condition))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(config: Config) -> Result<()> {
    let registry = actions::default_registry(&config);
    let app = build_router(AppState::new(registry, &config));

    let addr = SocketAddr::from((config.bind_addr, config.port));
    log::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_actions(State(state): State<AppState>) -> Json<Value> {
    let registry = state.engine.registry();
    let actions: Vec<Value> = registry
        .kinds()
        .iter()
        .filter_map(|kind| registry.get(kind))
        .map(|executor| {
            json!({
                "kind": executor.kind(),
                "description": executor.description(),
                "parameters": executor.schema(),
            })
        })
        .collect();
    Json(json!(actions))
}

async fn get_schema() -> Json<Value> {
    Json(decision_tree_schema().clone())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecutionRequest {
    decision_tree: DecisionTree,
    data: DataRecord,
}

async fn execute_decision_tree(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ExecutionRequest>, JsonRejection>,
) -> std::result::Result<Json<DecisionTree>, ApiError> {
    let Json(request) = payload?;
    let execution_id = Uuid::new_v4();
    let name = request.decision_tree.name.clone();

    log::info!("[{}] Executing decision tree '{}'", execution_id, name);

    if let Err(e) = state.validator.validate(&request.decision_tree) {
        log::warn!("[{}] Rejected decision tree '{}': {}", execution_id, name, e);
        return Err(e.into());
    }

    let evaluation = state
        .engine
        .evaluate_tree(&request.decision_tree, &request.data);
    let result = match tokio::time::timeout(state.timeout, evaluation).await {
        Ok(result) => result,
        Err(_) => Err(ArbiterError::Timeout(state.timeout.as_secs())),
    };

    match result {
        Ok(tree) => {
            log::info!("[{}] Decision tree '{}' completed", execution_id, name);
            Ok(Json(tree))
        }
        Err(e) => {
            log::error!("[{}] Decision tree '{}' failed: {}", execution_id, name, e);
            Err(e.into())
        }
    }
}

#[derive(Deserialize)]
struct ConditionRequest {
    condition: Condition,
    data: DataRecord,
}

async fn evaluate_condition(
    payload: std::result::Result<Json<ConditionRequest>, JsonRejection>,
) -> std::result::Result<Json<Value>, ApiError> {
    let Json(request) = payload?;
    validate_condition(&request.condition)?;

    let field_value = extract_field(&request.data, &request.condition.field_name)?;
    let result = condition::evaluate(&request.condition, field_value)?;
    Ok(Json(json!({ "result": result })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_describes_tree() {
        let schema = decision_tree_schema();
        let properties = &schema["properties"];
        assert!(properties["name"].is_object());
        assert!(properties["condition"].is_object());
        assert!(properties["trueActions"].is_object());
        assert!(schema["required"]
            .as_array()
            .unwrap()
            .contains(&json!("name")));
    }
}

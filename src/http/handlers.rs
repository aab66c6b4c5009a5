//! Route handlers.
//!
//! Handlers extract and default query parameters, call into the latency
//! executor or the fault simulators, log the decision and map the result
//! to a response. No handler holds state across requests.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::chaos::{self, ChaosOutcome, KubernetesFault};
use crate::config::ServiceConfig;
use crate::http::request::request_id;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::latency::{DelayOutcome, DelayRequest, Wait};
use crate::observability::metrics;

#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LatencyParams {
    pub delay_ms: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct LatencyBody {
    pub status: &'static str,
    pub delay_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct KubernetesParams {
    pub error_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChaosParams {
    pub failure_rate: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ChaosBody {
    pub status: &'static str,
    pub message: &'static str,
}

/// `GET /`
pub async fn home(State(config): State<Arc<ServiceConfig>>) -> Json<StatusBody> {
    tracing::info!("Homepage accessed");
    Json(StatusBody {
        status: "running",
        service: Some(config.service.name.clone()),
    })
}

/// `GET /health`. Must stay cheap; it is polled by probes.
pub async fn health() -> Json<StatusBody> {
    Json(StatusBody {
        status: "healthy",
        service: None,
    })
}

/// `GET /api/latency?delay_ms=N`
pub async fn latency<W: Wait>(
    State(state): State<AppState<W>>,
    headers: HeaderMap,
    query: Result<Query<LatencyParams>, QueryRejection>,
) -> Result<Json<LatencyBody>, ApiError> {
    let request_id = request_id(&headers);
    let Query(params) = query?;
    let requested_ms = params
        .delay_ms
        .unwrap_or(state.config.latency.default_delay_ms);

    tracing::info!(request_id, requested_ms, "Latency request received");

    let outcome = state
        .executor
        .run(DelayRequest::from_millis(requested_ms))
        .await;
    metrics::record_delay_outcome(&outcome);

    match outcome {
        DelayOutcome::Success { delay_ms } => {
            tracing::info!(request_id, delay_ms, "Latency request completed");
        }
        DelayOutcome::Rejected { reason } => {
            tracing::warn!(
                request_id,
                requested_ms,
                max_ms = state.executor.limits().max_delay_ms(),
                %reason,
                "Rejected request for excessive delay"
            );
        }
        DelayOutcome::TimedOut => {
            tracing::error!(
                request_id,
                requested_ms,
                deadline_ms = state.executor.limits().deadline().as_millis() as u64,
                "Request processing timed out server-side"
            );
        }
    }

    let delay_ms = outcome.into_result()?;
    Ok(Json(LatencyBody {
        status: "success",
        delay_ms,
    }))
}

/// `GET /api/kubernetes?error_type=T`. Always fails.
pub async fn kubernetes(
    State(config): State<Arc<ServiceConfig>>,
    query: Result<Query<KubernetesParams>, QueryRejection>,
) -> ApiError {
    let params = match query {
        Ok(Query(params)) => params,
        Err(rejection) => return rejection.into(),
    };
    let error_type = params
        .error_type
        .unwrap_or_else(|| config.kubernetes.default_error_type.clone());

    let fault = KubernetesFault::from_error_type(&error_type);
    tracing::error!(
        fault = fault.error_type(),
        recognised = !matches!(fault, KubernetesFault::Unknown(_)),
        "Simulating a Kubernetes error"
    );

    match fault {
        KubernetesFault::PodCrash => {
            ApiError::ServiceUnavailable("Service unavailable due to pod crash".to_string())
        }
        KubernetesFault::Unknown(_) => ApiError::BadRequest("Unknown error_type specified".to_string()),
    }
}

/// `GET /api/chaos?failure_rate=F`
pub async fn chaos(
    State(config): State<Arc<ServiceConfig>>,
    query: Result<Query<ChaosParams>, QueryRejection>,
) -> Result<Json<ChaosBody>, ApiError> {
    let Query(params) = query?;
    let failure_rate = params
        .failure_rate
        .unwrap_or(config.chaos.default_failure_rate);

    let outcome = chaos::roll(failure_rate);
    metrics::record_chaos_outcome(outcome);

    match outcome {
        ChaosOutcome::Failed => {
            tracing::error!(failure_rate, "Chaos endpoint triggered a failure");
            Err(ApiError::Internal("Random failure occurred".to_string()))
        }
        ChaosOutcome::Survived => {
            tracing::info!(failure_rate, "Chaos endpoint succeeded");
            Ok(Json(ChaosBody {
                status: "success",
                message: "Request survived the chaos!",
            }))
        }
    }
}

//! Citation network and trends handlers

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppState;
use citenet_common::{
    errors::{AppError, Result},
    metrics,
};
use citenet_graph::{
    CitationGraph, CitationSession, Edge, GraphSnapshot, GraphStats, Node, YearCount,
};

/// Title filter query
#[derive(Debug, Default, Deserialize, Validate)]
pub struct NetworkQuery {
    #[validate(length(max = 256))]
    pub q: Option<String>,
}

/// Graph as consumed by the renderer
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkResponse {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub stats: GraphStats,
    pub built_at: DateTime<Utc>,
}

impl NetworkResponse {
    fn new(graph: CitationGraph, query: Option<String>, snapshot: &GraphSnapshot) -> Self {
        let stats = graph.stats();
        Self {
            nodes: graph.nodes,
            edges: graph.edges,
            query,
            stats,
            built_at: snapshot.built_at,
        }
    }
}

/// Full citation network, or its title-filtered subgraph when `q` is given
pub async fn get_network(
    State(state): State<AppState>,
    Query(params): Query<NetworkQuery>,
) -> Result<Json<NetworkResponse>> {
    params.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: Some("q".to_string()),
    })?;

    let snapshot = state.graphs.snapshot().await?;

    let mut session = CitationSession::new(snapshot.graph.clone());
    if let Some(q) = params.q.as_deref() {
        session.filter(q);
    }

    let query = session.active_query().map(str::to_string);
    if query.is_some() {
        metrics::record_filter(session.view().node_count());
    }

    Ok(Json(NetworkResponse::new(session.into_view(), query, &snapshot)))
}

/// Drop any filter: the full cached network
pub async fn reset_network(State(state): State<AppState>) -> Result<Json<NetworkResponse>> {
    let snapshot = state.graphs.snapshot().await?;
    Ok(Json(full_network(&snapshot)))
}

/// Refetch the corpus and rebuild the cached network
pub async fn refresh_network(State(state): State<AppState>) -> Result<Json<NetworkResponse>> {
    let snapshot = state.graphs.refresh().await?;
    Ok(Json(full_network(&snapshot)))
}

/// Papers per publication year, ascending
pub async fn get_trends(State(state): State<AppState>) -> Result<Json<Vec<YearCount>>> {
    let snapshot = state.graphs.snapshot().await?;
    Ok(Json(snapshot.trends.clone()))
}

fn full_network(snapshot: &GraphSnapshot) -> NetworkResponse {
    NetworkResponse::new(snapshot.graph.as_ref().clone(), None, snapshot)
}

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const UPDATED_SINCE_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserAssignment {
    pub id: i64,
    pub project_id: i64,
    pub user_id: i64,
    pub deactivated: bool,
    pub hourly_rate: Option<f64>,
    pub budget: Option<f64>,
    pub is_project_manager: Option<bool>,
    pub estimate: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateUserAssignment {
    pub id: i64,
}

/// Fields a PUT may change. `project_id` and `user_id` are accepted on the
/// wire but an assignment never moves.
#[derive(Deserialize)]
pub struct UpdateUserAssignment {
    pub deactivated: Option<bool>,
    pub hourly_rate: Option<f64>,
    pub budget: Option<f64>,
    pub is_project_manager: Option<bool>,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub updated_since: Option<String>,
}

#[derive(Default)]
pub struct Store {
    next_id: i64,
    assignments: BTreeMap<i64, UserAssignment>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route(
            "/projects/{project_id}/user_assignments",
            get(list_user_assignments).post(create_user_assignment),
        )
        .route(
            "/projects/{project_id}/user_assignments/{id}",
            get(get_user_assignment)
                .put(update_user_assignment)
                .delete(delete_user_assignment),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_user_assignments(
    State(db): State<Db>,
    Path(project_id): Path<i64>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<UserAssignment>>, StatusCode> {
    let since = match params.updated_since.as_deref() {
        Some(raw) => Some(
            NaiveDateTime::parse_from_str(raw, UPDATED_SINCE_FORMAT).map_err(|_| StatusCode::BAD_REQUEST)?,
        ),
        None => None,
    };

    let store = db.read().await;
    let assignments: Vec<UserAssignment> = store
        .assignments
        .values()
        .filter(|a| a.project_id == project_id)
        .filter(|a| since.is_none_or(|since| a.updated_at.naive_utc() >= since))
        .cloned()
        .collect();
    tracing::debug!(project_id, count = assignments.len(), "listed user assignments");
    Ok(Json(assignments))
}

async fn create_user_assignment(
    State(db): State<Db>,
    Path(project_id): Path<i64>,
    Json(input): Json<CreateUserAssignment>,
) -> (StatusCode, Json<UserAssignment>) {
    let mut store = db.write().await;
    store.next_id += 1;
    let now = Utc::now();
    let assignment = UserAssignment {
        id: store.next_id,
        project_id,
        user_id: input.id,
        deactivated: false,
        hourly_rate: None,
        budget: None,
        is_project_manager: Some(false),
        estimate: None,
        created_at: now,
        updated_at: now,
    };
    store.assignments.insert(assignment.id, assignment.clone());
    tracing::info!(project_id, user_id = input.id, id = assignment.id, "created user assignment");
    (StatusCode::CREATED, Json(assignment))
}

async fn get_user_assignment(
    State(db): State<Db>,
    Path((project_id, id)): Path<(i64, i64)>,
) -> Result<Json<UserAssignment>, StatusCode> {
    let store = db.read().await;
    store
        .assignments
        .get(&id)
        .filter(|a| a.project_id == project_id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_user_assignment(
    State(db): State<Db>,
    Path((project_id, id)): Path<(i64, i64)>,
    Json(input): Json<UpdateUserAssignment>,
) -> Result<Json<UserAssignment>, StatusCode> {
    let mut store = db.write().await;
    let assignment = store
        .assignments
        .get_mut(&id)
        .filter(|a| a.project_id == project_id)
        .ok_or(StatusCode::NOT_FOUND)?;
    if let Some(deactivated) = input.deactivated {
        assignment.deactivated = deactivated;
    }
    if input.hourly_rate.is_some() {
        assignment.hourly_rate = input.hourly_rate;
    }
    if input.budget.is_some() {
        assignment.budget = input.budget;
    }
    if input.is_project_manager.is_some() {
        assignment.is_project_manager = input.is_project_manager;
    }
    assignment.updated_at = Utc::now();
    tracing::info!(project_id, id, "updated user assignment");
    Ok(Json(assignment.clone()))
}

async fn delete_user_assignment(
    State(db): State<Db>,
    Path((project_id, id)): Path<(i64, i64)>,
) -> StatusCode {
    let mut store = db.write().await;
    let owned = store
        .assignments
        .get(&id)
        .is_some_and(|a| a.project_id == project_id);
    if !owned {
        return StatusCode::NOT_FOUND;
    }
    store.assignments.remove(&id);
    tracing::info!(project_id, id, "deleted user assignment");
    StatusCode::OK
}

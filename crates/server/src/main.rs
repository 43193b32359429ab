// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::info;
use volsched_api::{
    ApiError, AssignRotationRequest, AssignRotationResponse, CancelSignupResponse,
    ChangePasswordRequest, ChangePasswordResponse, CreateEventRequest, CreateEventResponse,
    CreateShiftRequest, CreateShiftResponse, DeleteEventResponse, DeleteShiftResponse, EventInfo,
    EventSignupResponse, EventStatusResponse, HistoryResponse, ListEventsResponse,
    ListShiftsResponse, ListStudentStatsResponse, LoginRequest, LoginResponse,
    LookupRotationResponse, OccurrenceStatusResponse, RegisterStudentRequest,
    RegisterStudentResponse, ShiftSignupResponse, StudentInfo, TotalHoursResponse,
    UpdateEventResponse, UpdateProfileRequest, UpdateProfileResponse, handlers,
};
use volsched_persistence::Persistence;

/// Volsched Server - HTTP server for the volunteer scheduling system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Seed the standard school shifts on startup
    #[arg(long, default_value_t = false)]
    seed: bool,
}

/// Application state shared across handlers.
///
/// The persistence adapter is wrapped in a Mutex so all database access
/// is serialized; together with the IMMEDIATE transactions in the
/// admission commits this keeps concurrent signups at a capacity
/// boundary from overshooting.
#[derive(Clone)]
struct AppState {
    /// The persistence adapter for the record store.
    persistence: Arc<Mutex<Persistence>>,
}

/// API request for creating an event.
///
/// This includes the acting student's identity in addition to the event
/// data.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateEventApiRequest {
    /// The acting student performing this action (must be an admin).
    acting_student_id: i64,
    /// The event title.
    title: String,
    /// Optional longer description.
    description: Option<String>,
    /// When the event starts (RFC 3339).
    start_time: String,
    /// When the event ends (RFC 3339).
    end_time: String,
    /// The registration deadline (RFC 3339).
    registration_deadline: String,
    /// Where the event takes place.
    location: String,
    /// The number of volunteer seats.
    required_volunteers: u32,
    /// `ALL` or a comma-separated list of enrollment years.
    grade_limit: String,
    /// Hour credit granted once the event has ended.
    hours_value: f64,
}

fn event_request_of(req: CreateEventApiRequest) -> (i64, CreateEventRequest) {
    (
        req.acting_student_id,
        CreateEventRequest {
            title: req.title,
            description: req.description,
            start_time: req.start_time,
            end_time: req.end_time,
            registration_deadline: req.registration_deadline,
            location: req.location,
            required_volunteers: req.required_volunteers,
            grade_limit: req.grade_limit,
            hours_value: req.hours_value,
        },
    )
}

/// API request for creating a shift template.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateShiftApiRequest {
    /// The acting student performing this action (must be an admin).
    acting_student_id: i64,
    /// The shift name.
    name: String,
    /// The weekday index, 1 (Monday) through 5 (Friday).
    day_of_week: u8,
    /// Time of day the shift starts (`HH:MM:SS`).
    start_time: String,
    /// Time of day the shift ends (`HH:MM:SS`).
    end_time: String,
    /// Seats per dated occurrence.
    capacity: u32,
    /// Hour credit granted once the occurrence date has passed.
    hours_value: f64,
}

/// API request for assigning a rotation week.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AssignRotationApiRequest {
    /// The acting student performing this action (must be an admin).
    acting_student_id: i64,
    /// The Monday of the governed week (`YYYY-MM-DD`).
    week_monday: String,
    /// The authorized full class name, e.g. `2024-3`.
    assigned_class: String,
}

/// API request body for event signup and cancellation.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct EventSignupApiRequest {
    /// The student signing up or cancelling.
    student_id: i64,
}

/// API request body for shift signup and cancellation.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ShiftSignupApiRequest {
    /// The student signing up or cancelling.
    student_id: i64,
    /// The occurrence date (`YYYY-MM-DD`).
    date: String,
}

/// Query parameters carrying the acting student for admin operations.
#[derive(Debug, Deserialize)]
struct AdminActionQuery {
    /// The acting student performing this action (must be an admin).
    acting_student_id: i64,
}

/// Query parameters for a dated occurrence.
#[derive(Debug, Deserialize)]
struct OccurrenceQuery {
    /// The occurrence date (`YYYY-MM-DD`).
    date: String,
}

/// Query parameters for a rotation lookup.
#[derive(Debug, Deserialize)]
struct RotationQuery {
    /// Any date in the week of interest (`YYYY-MM-DD`).
    date: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } | ApiError::PasswordPolicyViolation { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. }
            | ApiError::CapacityExceeded { .. }
            | ApiError::QuotaExceeded { .. } => StatusCode::CONFLICT,
            ApiError::DomainRuleViolation { .. } | ApiError::NotConfigured { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Account handlers
// ============================================================================

/// Handler for POST `/students` endpoint.
///
/// Registers a new student account.
async fn handle_register_student(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterStudentRequest>,
) -> Result<Json<RegisterStudentResponse>, HttpError> {
    info!(phone = %req.phone, "Handling register_student request");

    let mut persistence = app_state.persistence.lock().await;
    let response: RegisterStudentResponse = handlers::register_student(&mut persistence, req)?;

    Ok(Json(response))
}

/// Handler for POST `/login` endpoint.
///
/// Checks credentials and returns the student profile.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(phone = %req.phone, "Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse = handlers::login(&mut persistence, req)?;

    Ok(Json(response))
}

/// Handler for GET `/students/{student_id}` endpoint.
async fn handle_student_profile(
    AxumState(app_state): AxumState<AppState>,
    Path(student_id): Path<i64>,
) -> Result<Json<StudentInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: StudentInfo = handlers::student_profile(&mut persistence, student_id)?;

    Ok(Json(response))
}

/// Handler for PUT `/students/{student_id}/profile` endpoint.
async fn handle_update_profile(
    AxumState(app_state): AxumState<AppState>,
    Path(student_id): Path<i64>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UpdateProfileResponse>, HttpError> {
    info!(student_id, "Handling update_profile request");

    let mut persistence = app_state.persistence.lock().await;
    let response: UpdateProfileResponse =
        handlers::update_profile(&mut persistence, student_id, req)?;

    Ok(Json(response))
}

/// Handler for PUT `/students/{student_id}/password` endpoint.
async fn handle_change_password(
    AxumState(app_state): AxumState<AppState>,
    Path(student_id): Path<i64>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<ChangePasswordResponse>, HttpError> {
    info!(student_id, "Handling change_password request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ChangePasswordResponse =
        handlers::change_password(&mut persistence, student_id, req)?;

    Ok(Json(response))
}

/// Handler for GET `/students/{student_id}/hours` endpoint.
///
/// Sums the student's completed hour credit.
async fn handle_total_hours(
    AxumState(app_state): AxumState<AppState>,
    Path(student_id): Path<i64>,
) -> Result<Json<TotalHoursResponse>, HttpError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.persistence.lock().await;
    let response: TotalHoursResponse = handlers::total_hours(&mut persistence, now, student_id)?;

    Ok(Json(response))
}

/// Handler for GET `/students/{student_id}/history` endpoint.
///
/// Returns the student's merged assignment history, newest first.
async fn handle_history(
    AxumState(app_state): AxumState<AppState>,
    Path(student_id): Path<i64>,
) -> Result<Json<HistoryResponse>, HttpError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.persistence.lock().await;
    let response: HistoryResponse = handlers::history(&mut persistence, now, student_id)?;

    Ok(Json(response))
}

/// Handler for GET `/stats` endpoint.
///
/// Lists per-student completed-hour totals (admin only).
async fn handle_student_stats(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<AdminActionQuery>,
) -> Result<Json<ListStudentStatsResponse>, HttpError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.persistence.lock().await;
    let response: ListStudentStatsResponse =
        handlers::list_student_stats(&mut persistence, now, query.acting_student_id)?;

    Ok(Json(response))
}

// ============================================================================
// Event handlers
// ============================================================================

/// Handler for POST `/events` endpoint.
///
/// Creates a new event (admin only).
async fn handle_create_event(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateEventApiRequest>,
) -> Result<Json<CreateEventResponse>, HttpError> {
    info!(
        acting_student_id = req.acting_student_id,
        title = %req.title,
        "Handling create_event request"
    );

    let (acting_student_id, create_request) = event_request_of(req);
    let mut persistence = app_state.persistence.lock().await;
    let response: CreateEventResponse =
        handlers::create_event(&mut persistence, acting_student_id, create_request)?;

    Ok(Json(response))
}

/// Handler for GET `/events` endpoint.
///
/// Lists all events with computed status.
async fn handle_list_events(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListEventsResponse>, HttpError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.persistence.lock().await;
    let response: ListEventsResponse = handlers::list_events(&mut persistence, now)?;

    Ok(Json(response))
}

/// Handler for GET `/events/{event_id}` endpoint.
async fn handle_get_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<EventInfo>, HttpError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.persistence.lock().await;
    let response: EventInfo = handlers::get_event(&mut persistence, now, event_id)?;

    Ok(Json(response))
}

/// Handler for PUT `/events/{event_id}` endpoint.
///
/// Replaces an event's stored fields (admin only).
async fn handle_update_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
    Json(req): Json<CreateEventApiRequest>,
) -> Result<Json<UpdateEventResponse>, HttpError> {
    info!(event_id, "Handling update_event request");

    let (acting_student_id, update_request) = event_request_of(req);
    let mut persistence = app_state.persistence.lock().await;
    let response: UpdateEventResponse =
        handlers::update_event(&mut persistence, acting_student_id, event_id, update_request)?;

    Ok(Json(response))
}

/// Handler for DELETE `/events/{event_id}` endpoint.
///
/// Deletes an event and its signups (admin only).
async fn handle_delete_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
    Query(query): Query<AdminActionQuery>,
) -> Result<Json<DeleteEventResponse>, HttpError> {
    info!(event_id, "Handling delete_event request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteEventResponse =
        handlers::delete_event(&mut persistence, query.acting_student_id, event_id)?;

    Ok(Json(response))
}

/// Handler for GET `/events/{event_id}/status` endpoint.
///
/// Derives the event's lifecycle status at request time.
async fn handle_event_status(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<EventStatusResponse>, HttpError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.persistence.lock().await;
    let response: EventStatusResponse = handlers::event_status(&mut persistence, now, event_id)?;

    Ok(Json(response))
}

/// Handler for POST `/events/{event_id}/signup` endpoint.
async fn handle_event_signup(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
    Json(req): Json<EventSignupApiRequest>,
) -> Result<Json<EventSignupResponse>, HttpError> {
    info!(
        event_id,
        student_id = req.student_id,
        "Handling event signup request"
    );

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.persistence.lock().await;
    let response: EventSignupResponse =
        handlers::signup_for_event(&mut persistence, now, req.student_id, event_id)?;

    Ok(Json(response))
}

/// Handler for POST `/events/{event_id}/cancel` endpoint.
async fn handle_event_cancel(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
    Json(req): Json<EventSignupApiRequest>,
) -> Result<Json<CancelSignupResponse>, HttpError> {
    info!(
        event_id,
        student_id = req.student_id,
        "Handling event cancel request"
    );

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.persistence.lock().await;
    let response: CancelSignupResponse =
        handlers::cancel_event_signup(&mut persistence, now, req.student_id, event_id)?;

    Ok(Json(response))
}

// ============================================================================
// Shift handlers
// ============================================================================

/// Handler for POST `/shifts` endpoint.
///
/// Creates a new shift template (admin only).
async fn handle_create_shift(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateShiftApiRequest>,
) -> Result<Json<CreateShiftResponse>, HttpError> {
    info!(
        acting_student_id = req.acting_student_id,
        name = %req.name,
        "Handling create_shift request"
    );

    let create_request: CreateShiftRequest = CreateShiftRequest {
        name: req.name,
        day_of_week: req.day_of_week,
        start_time: req.start_time,
        end_time: req.end_time,
        capacity: req.capacity,
        hours_value: req.hours_value,
    };
    let mut persistence = app_state.persistence.lock().await;
    let response: CreateShiftResponse =
        handlers::create_shift(&mut persistence, req.acting_student_id, create_request)?;

    Ok(Json(response))
}

/// Handler for GET `/shifts` endpoint.
async fn handle_list_shifts(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListShiftsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListShiftsResponse = handlers::list_shifts(&mut persistence)?;

    Ok(Json(response))
}

/// Handler for DELETE `/shifts/{shift_id}` endpoint.
///
/// Deletes a shift template and its signups (admin only).
async fn handle_delete_shift(
    AxumState(app_state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
    Query(query): Query<AdminActionQuery>,
) -> Result<Json<DeleteShiftResponse>, HttpError> {
    info!(shift_id, "Handling delete_shift request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteShiftResponse =
        handlers::delete_shift(&mut persistence, query.acting_student_id, shift_id)?;

    Ok(Json(response))
}

/// Handler for GET `/shifts/{shift_id}/status` endpoint.
///
/// Derives the status and occupancy of one dated occurrence.
async fn handle_occurrence_status(
    AxumState(app_state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
    Query(query): Query<OccurrenceQuery>,
) -> Result<Json<OccurrenceStatusResponse>, HttpError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.persistence.lock().await;
    let response: OccurrenceStatusResponse =
        handlers::shift_occurrence_status(&mut persistence, now, shift_id, &query.date)?;

    Ok(Json(response))
}

/// Handler for POST `/shifts/{shift_id}/signup` endpoint.
async fn handle_shift_signup(
    AxumState(app_state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
    Json(req): Json<ShiftSignupApiRequest>,
) -> Result<Json<ShiftSignupResponse>, HttpError> {
    info!(
        shift_id,
        student_id = req.student_id,
        date = %req.date,
        "Handling shift signup request"
    );

    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut persistence = app_state.persistence.lock().await;
    let response: ShiftSignupResponse =
        handlers::signup_for_shift(&mut persistence, now, req.student_id, shift_id, &req.date)?;

    Ok(Json(response))
}

/// Handler for POST `/shifts/{shift_id}/cancel` endpoint.
async fn handle_shift_cancel(
    AxumState(app_state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
    Json(req): Json<ShiftSignupApiRequest>,
) -> Result<Json<CancelSignupResponse>, HttpError> {
    info!(
        shift_id,
        student_id = req.student_id,
        date = %req.date,
        "Handling shift cancel request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CancelSignupResponse =
        handlers::cancel_shift_signup(&mut persistence, req.student_id, shift_id, &req.date)?;

    Ok(Json(response))
}

// ============================================================================
// Rotation handlers
// ============================================================================

/// Handler for POST `/rotations` endpoint.
///
/// Assigns a class to a rotation week (admin only).
async fn handle_assign_rotation(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AssignRotationApiRequest>,
) -> Result<Json<AssignRotationResponse>, HttpError> {
    info!(
        acting_student_id = req.acting_student_id,
        week_monday = %req.week_monday,
        class = %req.assigned_class,
        "Handling assign_rotation request"
    );

    let assign_request: AssignRotationRequest = AssignRotationRequest {
        week_monday: req.week_monday,
        assigned_class: req.assigned_class,
    };
    let mut persistence = app_state.persistence.lock().await;
    let response: AssignRotationResponse =
        handlers::assign_rotation(&mut persistence, req.acting_student_id, assign_request)?;

    Ok(Json(response))
}

/// Handler for GET `/rotations` endpoint.
///
/// Looks up the rotation governing the week containing the given date.
async fn handle_lookup_rotation(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<RotationQuery>,
) -> Result<Json<LookupRotationResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: LookupRotationResponse =
        handlers::lookup_rotation(&mut persistence, &query.date)?;

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/students", post(handle_register_student))
        .route("/login", post(handle_login))
        .route("/students/{student_id}", get(handle_student_profile))
        .route("/students/{student_id}/profile", put(handle_update_profile))
        .route(
            "/students/{student_id}/password",
            put(handle_change_password),
        )
        .route("/students/{student_id}/hours", get(handle_total_hours))
        .route("/students/{student_id}/history", get(handle_history))
        .route("/stats", get(handle_student_stats))
        .route("/events", post(handle_create_event))
        .route("/events", get(handle_list_events))
        .route("/events/{event_id}", get(handle_get_event))
        .route("/events/{event_id}", put(handle_update_event))
        .route("/events/{event_id}", delete(handle_delete_event))
        .route("/events/{event_id}/status", get(handle_event_status))
        .route("/events/{event_id}/signup", post(handle_event_signup))
        .route("/events/{event_id}/cancel", post(handle_event_cancel))
        .route("/shifts", post(handle_create_shift))
        .route("/shifts", get(handle_list_shifts))
        .route("/shifts/{shift_id}", delete(handle_delete_shift))
        .route("/shifts/{shift_id}/status", get(handle_occurrence_status))
        .route("/shifts/{shift_id}/signup", post(handle_shift_signup))
        .route("/shifts/{shift_id}/cancel", post(handle_shift_cancel))
        .route("/rotations", post(handle_assign_rotation))
        .route("/rotations", get(handle_lookup_rotation))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Volsched Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if args.seed {
        persistence.seed_standard_shifts()?;
        info!("Seeded standard shifts");
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use time::format_description::well_known::Rfc3339;
    use time::macros::format_description;
    use time::{Date, Duration};
    use tower::ServiceExt;
    use volsched_domain::{Student, monday_of_week};

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state() -> AppState {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
        }
    }

    /// Registers an admin directly against persistence; the HTTP
    /// registration endpoint never grants the admin flag.
    async fn seed_admin(app_state: &AppState) -> i64 {
        let admin: Student = Student::new(
            String::from("19900000000"),
            String::from("Admin Zhang"),
            2023,
            1,
            None,
            None,
            true,
        );
        let mut persistence = app_state.persistence.lock().await;
        persistence.register_student(&admin, "Admin-Pass-1").unwrap()
    }

    fn registration_body(phone: &str) -> String {
        serde_json::to_string(&RegisterStudentRequest {
            phone: phone.to_string(),
            name: String::from("Li Wei"),
            enrollment_year: 2024,
            class_number: 3,
            wechat: None,
            qq: None,
            password: String::from("sunnyday42"),
            password_confirmation: String::from("sunnyday42"),
        })
        .unwrap()
    }

    /// An event a month out, so its status is Open under the real clock.
    fn future_event_body(acting_student_id: i64) -> String {
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let start: OffsetDateTime = now + Duration::days(30);
        serde_json::to_string(&CreateEventApiRequest {
            acting_student_id,
            title: String::from("Library reshelving"),
            description: None,
            start_time: start.format(&Rfc3339).unwrap(),
            end_time: (start + Duration::hours(2)).format(&Rfc3339).unwrap(),
            registration_deadline: (now + Duration::days(20)).format(&Rfc3339).unwrap(),
            location: String::from("Library"),
            required_volunteers: 2,
            grade_limit: String::from("ALL"),
            hours_value: 2.0,
        })
        .unwrap()
    }

    /// The Monday of next week, always bookable under the real clock.
    fn next_monday() -> String {
        let today: Date = OffsetDateTime::now_utc().date();
        let monday: Date = monday_of_week(today).saturating_add(Duration::days(7));
        let format = format_description!("[year]-[month]-[day]");
        monday.format(&format).unwrap()
    }

    async fn post_json(app: Router, uri: &str, body: String) -> axum::response::Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn get_uri(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_of(response: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn test_register_and_login_roundtrip() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let response = post_json(
            app.clone(),
            "/students",
            registration_body("13800000001"),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let login_body = serde_json::to_string(&LoginRequest {
            phone: String::from("13800000001"),
            password: String::from("sunnyday42"),
        })
        .unwrap();
        let response = post_json(app, "/login", login_body).await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let body = body_of(response).await;
        let login: LoginResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(login.student.class_name, "2024-3");
        assert!(!login.student.is_admin);
    }

    #[tokio::test]
    async fn test_register_invalid_phone_is_bad_request() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let response = post_json(app, "/students", registration_body("not-a-phone")).await;
        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);

        let body = body_of(response).await;
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(error.error);
        assert!(error.message.contains("phone"));
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let response = post_json(
            app.clone(),
            "/students",
            registration_body("13800000001"),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = post_json(app, "/students", registration_body("13800000001")).await;
        assert_eq!(response.status(), HttpStatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_non_admin_cannot_create_event() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let response = post_json(
            app.clone(),
            "/students",
            registration_body("13800000001"),
        )
        .await;
        let body = body_of(response).await;
        let registered: RegisterStudentResponse = serde_json::from_slice(&body).unwrap();

        let response = post_json(app, "/events", future_event_body(registered.student_id)).await;
        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);

        let body = body_of(response).await;
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(error.message.contains("Unauthorized"));
    }

    #[tokio::test]
    async fn test_admin_event_flow_with_signup() {
        let app_state: AppState = create_test_app_state();
        let admin_id: i64 = seed_admin(&app_state).await;
        let app: Router = build_router(app_state);

        let response = post_json(app.clone(), "/events", future_event_body(admin_id)).await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let body = body_of(response).await;
        let created: CreateEventResponse = serde_json::from_slice(&body).unwrap();

        let response = get_uri(app.clone(), "/events").await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let body = body_of(response).await;
        let listed: ListEventsResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(listed.events.len(), 1);
        assert_eq!(listed.events[0].status, "Open");

        let response = post_json(
            app.clone(),
            "/students",
            registration_body("13800000001"),
        )
        .await;
        let body = body_of(response).await;
        let registered: RegisterStudentResponse = serde_json::from_slice(&body).unwrap();

        let signup_body = serde_json::to_string(&EventSignupApiRequest {
            student_id: registered.student_id,
        })
        .unwrap();
        let uri: String = format!("/events/{}/signup", created.event_id);
        let response = post_json(app.clone(), &uri, signup_body.clone()).await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        // A second identical signup is a conflict.
        let response = post_json(app, &uri, signup_body).await;
        assert_eq!(response.status(), HttpStatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_shift_signup_requires_rotation() {
        let app_state: AppState = create_test_app_state();
        let admin_id: i64 = seed_admin(&app_state).await;
        let app: Router = build_router(app_state);

        let shift_body = serde_json::to_string(&CreateShiftApiRequest {
            acting_student_id: admin_id,
            name: String::from("Morning etiquette post"),
            day_of_week: 1,
            start_time: String::from("07:35:00"),
            end_time: String::from("07:55:00"),
            capacity: 2,
            hours_value: 0.5,
        })
        .unwrap();
        let response = post_json(app.clone(), "/shifts", shift_body).await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let body = body_of(response).await;
        let shift: CreateShiftResponse = serde_json::from_slice(&body).unwrap();

        let response = post_json(
            app.clone(),
            "/students",
            registration_body("13800000001"),
        )
        .await;
        let body = body_of(response).await;
        let registered: RegisterStudentResponse = serde_json::from_slice(&body).unwrap();

        let monday: String = next_monday();
        let signup_body = serde_json::to_string(&ShiftSignupApiRequest {
            student_id: registered.student_id,
            date: monday.clone(),
        })
        .unwrap();
        let uri: String = format!("/shifts/{}/signup", shift.shift_id);

        // No rotation configured for that week yet.
        let response = post_json(app.clone(), &uri, signup_body.clone()).await;
        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);

        let rotation_body = serde_json::to_string(&AssignRotationApiRequest {
            acting_student_id: admin_id,
            week_monday: monday,
            assigned_class: String::from("2024-3"),
        })
        .unwrap();
        let response = post_json(app.clone(), "/rotations", rotation_body).await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = post_json(app, &uri, signup_body).await;
        assert_eq!(response.status(), HttpStatusCode::OK);
    }

    #[tokio::test]
    async fn test_total_hours_starts_at_zero() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let response = post_json(
            app.clone(),
            "/students",
            registration_body("13800000001"),
        )
        .await;
        let body = body_of(response).await;
        let registered: RegisterStudentResponse = serde_json::from_slice(&body).unwrap();

        let uri: String = format!("/students/{}/hours", registered.student_id);
        let response = get_uri(app, &uri).await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let body = body_of(response).await;
        let hours: TotalHoursResponse = serde_json::from_slice(&body).unwrap();
        assert!(hours.total_hours.abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_unknown_student_profile_is_not_found() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);

        let response = get_uri(app, "/students/999").await;
        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }
}

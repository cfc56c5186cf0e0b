//! Route handlers.
//!
//! Handlers parse ids, call the synchronous core services and map their errors through
//! [`ApiError`]. Creates answer 201, deletes 204.

use crate::{AppState, ApiError};
use api_shared::{
    AppointmentQuery, ErrorBody, HealthRes, HealthService, MedicationQuery, PatientQuery,
    PharmacyQuery, PrescriptionQuery, ValidationErrorBody,
};
use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Local;
use rx_core::appointment::{Appointment, AppointmentDraft};
use rx_core::dashboard::DashboardSummary;
use rx_core::medication::Medication;
use rx_core::patient::{Patient, PatientDraft};
use rx_core::pharmacy::{Pharmacy, PharmacyDraft};
use rx_core::prescription::{Prescription, PrescriptionDraft};
use rx_core::status::TrackerView;
use rx_core::RecordId;

type ApiResult<T> = Result<T, ApiError>;

fn parse_id(raw: &str) -> ApiResult<RecordId> {
    RecordId::parse(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health(state.cfg.service_name()))
}

// ============================================================================
// PRESCRIPTIONS
// ============================================================================

#[utoipa::path(
    get,
    path = "/api/prescriptions",
    params(PrescriptionQuery),
    responses(
        (status = 200, description = "Prescriptions, newest first", body = [Prescription])
    )
)]
#[axum::debug_handler]
pub async fn list_prescriptions(
    State(state): State<AppState>,
    Query(query): Query<PrescriptionQuery>,
) -> Json<Vec<Prescription>> {
    Json(
        state
            .prescriptions
            .list(query.patient_id.as_deref(), query.status),
    )
}

#[utoipa::path(
    post,
    path = "/api/prescriptions",
    request_body = PrescriptionDraft,
    responses(
        (status = 201, description = "Prescription created", body = Prescription),
        (status = 422, description = "Validation failed", body = ValidationErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
/// Create a pending prescription.
///
/// The server sets the id, prescribed date and status, copies the patient and pharmacy names
/// from their records, and estimates when the prescription will be ready.
#[axum::debug_handler]
pub async fn create_prescription(
    State(state): State<AppState>,
    Json(draft): Json<PrescriptionDraft>,
) -> ApiResult<(StatusCode, Json<Prescription>)> {
    let prescription = state.prescriptions.create(draft)?;
    Ok((StatusCode::CREATED, Json(prescription)))
}

#[utoipa::path(
    get,
    path = "/api/prescriptions/{id}",
    params(("id" = String, Path, description = "Prescription id")),
    responses(
        (status = 200, description = "Prescription", body = Prescription),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "Unknown prescription", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn get_prescription(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> ApiResult<Json<Prescription>> {
    Ok(Json(state.prescriptions.get(&parse_id(&id)?)?))
}

#[utoipa::path(
    put,
    path = "/api/prescriptions/{id}",
    params(("id" = String, Path, description = "Prescription id")),
    request_body = PrescriptionDraft,
    responses(
        (status = 200, description = "Prescription updated", body = Prescription),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "Unknown prescription", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ValidationErrorBody)
    )
)]
/// Apply a partial update. Any status value is accepted.
#[axum::debug_handler]
pub async fn update_prescription(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(patch): Json<PrescriptionDraft>,
) -> ApiResult<Json<Prescription>> {
    Ok(Json(state.prescriptions.update(&parse_id(&id)?, patch)?))
}

#[utoipa::path(
    delete,
    path = "/api/prescriptions/{id}",
    params(("id" = String, Path, description = "Prescription id")),
    responses(
        (status = 204, description = "Prescription deleted"),
        (status = 404, description = "Unknown prescription", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn delete_prescription(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> ApiResult<StatusCode> {
    state.prescriptions.delete(&parse_id(&id)?)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/prescriptions/{id}/tracker",
    params(("id" = String, Path, description = "Prescription id")),
    responses(
        (status = 200, description = "Status and delivery tracker", body = TrackerView),
        (status = 404, description = "Unknown prescription", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn prescription_tracker(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> ApiResult<Json<TrackerView>> {
    Ok(Json(state.prescriptions.tracker(&parse_id(&id)?)?))
}

#[utoipa::path(
    post,
    path = "/api/prescriptions/{id}/follow-up",
    params(("id" = String, Path, description = "Prescription id")),
    request_body = AppointmentDraft,
    responses(
        (status = 201, description = "Follow-up appointment booked", body = Appointment),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "Unknown prescription", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ValidationErrorBody)
    )
)]
/// Book a follow-up visit for a prescription.
///
/// The patient defaults to the prescription's patient and a blank reason to
/// "Follow-up for prescription <id>".
#[axum::debug_handler]
pub async fn schedule_follow_up(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(draft): Json<AppointmentDraft>,
) -> ApiResult<(StatusCode, Json<Appointment>)> {
    let appointment = state
        .appointments
        .schedule_follow_up(&parse_id(&id)?, draft)?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

// ============================================================================
// APPOINTMENTS
// ============================================================================

#[utoipa::path(
    get,
    path = "/api/appointments",
    params(AppointmentQuery),
    responses(
        (status = 200, description = "Appointments in date and time order", body = [Appointment])
    )
)]
#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<AppState>,
    Query(query): Query<AppointmentQuery>,
) -> Json<Vec<Appointment>> {
    Json(
        state
            .appointments
            .list(query.patient_id.as_deref(), query.date, query.status),
    )
}

#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = AppointmentDraft,
    responses(
        (status = 201, description = "Appointment created", body = Appointment),
        (status = 422, description = "Validation failed", body = ValidationErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<AppState>,
    Json(draft): Json<AppointmentDraft>,
) -> ApiResult<(StatusCode, Json<Appointment>)> {
    let appointment = state.appointments.create(draft)?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment", body = Appointment),
        (status = 404, description = "Unknown appointment", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> ApiResult<Json<Appointment>> {
    Ok(Json(state.appointments.get(&parse_id(&id)?)?))
}

#[utoipa::path(
    put,
    path = "/api/appointments/{id}",
    params(("id" = String, Path, description = "Appointment id")),
    request_body = AppointmentDraft,
    responses(
        (status = 200, description = "Appointment updated", body = Appointment),
        (status = 404, description = "Unknown appointment", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ValidationErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(patch): Json<AppointmentDraft>,
) -> ApiResult<Json<Appointment>> {
    Ok(Json(state.appointments.update(&parse_id(&id)?, patch)?))
}

#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 204, description = "Appointment deleted"),
        (status = 404, description = "Unknown appointment", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> ApiResult<StatusCode> {
    state.appointments.delete(&parse_id(&id)?)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// PATIENTS
// ============================================================================

#[utoipa::path(
    get,
    path = "/api/patients",
    params(PatientQuery),
    responses(
        (status = 200, description = "Patients sorted by name", body = [Patient])
    )
)]
#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<AppState>,
    Query(query): Query<PatientQuery>,
) -> Json<Vec<Patient>> {
    Json(state.patients.list(query.search.as_deref()))
}

#[utoipa::path(
    post,
    path = "/api/patients",
    request_body = PatientDraft,
    responses(
        (status = 201, description = "Patient created", body = Patient),
        (status = 422, description = "Validation failed", body = ValidationErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<AppState>,
    Json(draft): Json<PatientDraft>,
) -> ApiResult<(StatusCode, Json<Patient>)> {
    let patient = state.patients.create(draft)?;
    Ok((StatusCode::CREATED, Json(patient)))
}

#[utoipa::path(
    get,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Patient", body = Patient),
        (status = 404, description = "Unknown patient", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> ApiResult<Json<Patient>> {
    Ok(Json(state.patients.get(&parse_id(&id)?)?))
}

#[utoipa::path(
    put,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    request_body = PatientDraft,
    responses(
        (status = 200, description = "Patient updated", body = Patient),
        (status = 404, description = "Unknown patient", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ValidationErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(patch): Json<PatientDraft>,
) -> ApiResult<Json<Patient>> {
    Ok(Json(state.patients.update(&parse_id(&id)?, patch)?))
}

#[utoipa::path(
    delete,
    path = "/api/patients/{id}",
    params(("id" = String, Path, description = "Patient id")),
    responses(
        (status = 204, description = "Patient deleted"),
        (status = 404, description = "Unknown patient", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> ApiResult<StatusCode> {
    state.patients.delete(&parse_id(&id)?)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// PHARMACIES
// ============================================================================

#[utoipa::path(
    get,
    path = "/api/pharmacies",
    params(PharmacyQuery),
    responses(
        (status = 200, description = "Pharmacies sorted by name", body = [Pharmacy])
    )
)]
#[axum::debug_handler]
pub async fn list_pharmacies(
    State(state): State<AppState>,
    Query(query): Query<PharmacyQuery>,
) -> Json<Vec<Pharmacy>> {
    Json(state.pharmacies.list(query.delivery_only.unwrap_or(false)))
}

#[utoipa::path(
    post,
    path = "/api/pharmacies",
    request_body = PharmacyDraft,
    responses(
        (status = 201, description = "Pharmacy created", body = Pharmacy),
        (status = 422, description = "Validation failed", body = ValidationErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn create_pharmacy(
    State(state): State<AppState>,
    Json(draft): Json<PharmacyDraft>,
) -> ApiResult<(StatusCode, Json<Pharmacy>)> {
    let pharmacy = state.pharmacies.create(draft)?;
    Ok((StatusCode::CREATED, Json(pharmacy)))
}

#[utoipa::path(
    get,
    path = "/api/pharmacies/{id}",
    params(("id" = String, Path, description = "Pharmacy id")),
    responses(
        (status = 200, description = "Pharmacy", body = Pharmacy),
        (status = 404, description = "Unknown pharmacy", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn get_pharmacy(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> ApiResult<Json<Pharmacy>> {
    Ok(Json(state.pharmacies.get(&parse_id(&id)?)?))
}

#[utoipa::path(
    put,
    path = "/api/pharmacies/{id}",
    params(("id" = String, Path, description = "Pharmacy id")),
    request_body = PharmacyDraft,
    responses(
        (status = 200, description = "Pharmacy updated", body = Pharmacy),
        (status = 404, description = "Unknown pharmacy", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ValidationErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn update_pharmacy(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(patch): Json<PharmacyDraft>,
) -> ApiResult<Json<Pharmacy>> {
    Ok(Json(state.pharmacies.update(&parse_id(&id)?, patch)?))
}

#[utoipa::path(
    delete,
    path = "/api/pharmacies/{id}",
    params(("id" = String, Path, description = "Pharmacy id")),
    responses(
        (status = 204, description = "Pharmacy deleted"),
        (status = 404, description = "Unknown pharmacy", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn delete_pharmacy(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> ApiResult<StatusCode> {
    state.pharmacies.delete(&parse_id(&id)?)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// MEDICATIONS AND DASHBOARD
// ============================================================================

#[utoipa::path(
    get,
    path = "/api/medications",
    params(MedicationQuery),
    responses(
        (status = 200, description = "Catalog medications", body = [Medication])
    )
)]
#[axum::debug_handler]
pub async fn list_medications(
    State(state): State<AppState>,
    Query(query): Query<MedicationQuery>,
) -> Json<Vec<Medication>> {
    Json(state.medications.list(query.search.as_deref()))
}

#[utoipa::path(
    get,
    path = "/api/medications/{id}",
    params(("id" = String, Path, description = "Catalog id")),
    responses(
        (status = 200, description = "Medication", body = Medication),
        (status = 404, description = "Unknown medication", body = ErrorBody)
    )
)]
#[axum::debug_handler]
pub async fn get_medication(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> ApiResult<Json<Medication>> {
    Ok(Json(state.medications.get(&id)?))
}

#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Headline counts for today", body = DashboardSummary)
    )
)]
#[axum::debug_handler]
pub async fn dashboard(State(state): State<AppState>) -> Json<DashboardSummary> {
    let prescriptions = state.prescriptions.list(None, None);
    let appointments = state.appointments.list(None, None, None);
    Json(DashboardSummary::compute(
        &prescriptions,
        &appointments,
        Local::now().date_naive(),
    ))
}

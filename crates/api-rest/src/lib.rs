//! # API REST
//!
//! REST API implementation for RxDesk.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (status codes, JSON error bodies, CORS)
//!
//! Uses `api-shared` for wire types and `rx-core` for everything else.

#![warn(rust_2018_idioms)]

mod error;
pub mod handlers;

pub use error::ApiError;

use axum::{
    routing::{get, post},
    Router,
};
use rx_core::{
    AppointmentService, CoreConfig, MedicationCatalog, PatientService, PharmacyService,
    PrescriptionService,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<CoreConfig>,
    pub patients: PatientService,
    pub pharmacies: PharmacyService,
    pub prescriptions: PrescriptionService,
    pub appointments: AppointmentService,
    pub medications: MedicationCatalog,
}

impl AppState {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            patients: PatientService::new(cfg.clone()),
            pharmacies: PharmacyService::new(cfg.clone()),
            prescriptions: PrescriptionService::new(cfg.clone()),
            appointments: AppointmentService::new(cfg.clone()),
            medications: MedicationCatalog::new(),
            cfg,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::list_prescriptions,
        handlers::create_prescription,
        handlers::get_prescription,
        handlers::update_prescription,
        handlers::delete_prescription,
        handlers::prescription_tracker,
        handlers::schedule_follow_up,
        handlers::list_appointments,
        handlers::create_appointment,
        handlers::get_appointment,
        handlers::update_appointment,
        handlers::delete_appointment,
        handlers::list_patients,
        handlers::create_patient,
        handlers::get_patient,
        handlers::update_patient,
        handlers::delete_patient,
        handlers::list_pharmacies,
        handlers::create_pharmacy,
        handlers::get_pharmacy,
        handlers::update_pharmacy,
        handlers::delete_pharmacy,
        handlers::list_medications,
        handlers::get_medication,
        handlers::dashboard,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::ErrorBody,
        api_shared::ValidationErrorBody,
        rx_core::validation::FieldError,
        rx_core::patient::Patient,
        rx_core::patient::PatientDraft,
        rx_core::pharmacy::Pharmacy,
        rx_core::pharmacy::PharmacyDraft,
        rx_core::medication::Medication,
        rx_core::medication::MedicationForm,
        rx_core::prescription::Prescription,
        rx_core::prescription::PrescriptionDraft,
        rx_core::prescription::PrescriptionStatus,
        rx_core::prescription::DeliveryOption,
        rx_core::appointment::Appointment,
        rx_core::appointment::AppointmentDraft,
        rx_core::appointment::AppointmentStatus,
        rx_core::appointment::AppointmentType,
        rx_core::status::TrackerView,
        rx_core::status::TrackerStep,
        rx_core::status::StatusColor,
        rx_core::status::DeliveryTracking,
        rx_core::status::DeliveryStep,
        rx_core::dashboard::DashboardSummary,
    ))
)]
pub struct ApiDoc;

/// Builds the full REST application: API routes, Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    use handlers::*;

    Router::new()
        .route("/health", get(health))
        .route(
            "/api/prescriptions",
            get(list_prescriptions).post(create_prescription),
        )
        .route(
            "/api/prescriptions/:id",
            get(get_prescription)
                .put(update_prescription)
                .delete(delete_prescription),
        )
        .route("/api/prescriptions/:id/tracker", get(prescription_tracker))
        .route(
            "/api/prescriptions/:id/follow-up",
            post(schedule_follow_up),
        )
        .route(
            "/api/appointments",
            get(list_appointments).post(create_appointment),
        )
        .route(
            "/api/appointments/:id",
            get(get_appointment)
                .put(update_appointment)
                .delete(delete_appointment),
        )
        .route("/api/patients", get(list_patients).post(create_patient))
        .route(
            "/api/patients/:id",
            get(get_patient).put(update_patient).delete(delete_patient),
        )
        .route("/api/pharmacies", get(list_pharmacies).post(create_pharmacy))
        .route(
            "/api/pharmacies/:id",
            get(get_pharmacy).put(update_pharmacy).delete(delete_pharmacy),
        )
        .route("/api/medications", get(list_medications))
        .route("/api/medications/:id", get(get_medication))
        .route("/api/dashboard", get(dashboard))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use rx_core::NonEmptyText;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_app(temp_dir: &TempDir) -> Router {
        let cfg = Arc::new(CoreConfig::new(
            temp_dir.path().to_path_buf(),
            NonEmptyText::new("rxdesk-test").unwrap(),
            false,
        ));
        let state = AppState::new(cfg);
        state.pharmacies.seed_samples().unwrap();
        router(state)
    }

    fn make_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn patient_body() -> Value {
        json!({
            "name": "Sarah Johnson",
            "email": "sarah@example.com",
            "phone": "(555) 123-4567",
            "dateOfBirth": "1985-04-12",
            "address": "12 Elm St"
        })
    }

    #[tokio::test]
    async fn test_health() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);

        let (status, body) = send(&app, make_request("GET", "/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], json!(true));
        assert_eq!(body["message"], json!("rxdesk-test is alive"));
    }

    #[tokio::test]
    async fn test_patient_crud() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);

        let (status, created) = send(
            &app,
            make_request("POST", "/api/patients", Some(patient_body())),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();

        let (status, updated) = send(
            &app,
            make_request(
                "PUT",
                &format!("/api/patients/{id}"),
                Some(json!({ "insuranceProvider": "Blue Cross" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["insuranceProvider"], json!("Blue Cross"));
        assert_eq!(updated["name"], json!("Sarah Johnson"));

        let (status, found) = send(
            &app,
            make_request("GET", "/api/patients?search=sarah", None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found.as_array().unwrap().len(), 1);

        let (status, _) = send(
            &app,
            make_request("DELETE", &format!("/api/patients/{id}"), None),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(
            &app,
            make_request("GET", &format!("/api/patients/{id}"), None),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_patient_returns_field_errors() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);

        let mut body = patient_body();
        body["phone"] = json!("5551234567");
        body["email"] = json!("not-an-email");

        let (status, errors) = send(&app, make_request("POST", "/api/patients", Some(body))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            errors,
            json!({ "errors": [
                { "field": "email", "message": "Please enter a valid email address" },
                { "field": "phone", "message": "Phone must be in format (XXX) XXX-XXXX" }
            ]})
        );
    }

    #[tokio::test]
    async fn test_malformed_id_is_bad_request() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);

        let (status, body) = send(&app, make_request("GET", "/api/prescriptions/xyz", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("32 lowercase hex"));
    }

    #[tokio::test]
    async fn test_prescription_flow_and_tracker() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);

        let (_, patient) = send(
            &app,
            make_request("POST", "/api/patients", Some(patient_body())),
        )
        .await;
        let (_, pharmacies) = send(
            &app,
            make_request("GET", "/api/pharmacies?deliveryOnly=true", None),
        )
        .await;
        let pharmacies = pharmacies.as_array().unwrap();
        assert_eq!(pharmacies.len(), 2);

        let (status, created) = send(
            &app,
            make_request(
                "POST",
                "/api/prescriptions",
                Some(json!({
                    "patientId": patient["id"],
                    "medicationId": "1",
                    "dosage": "500mg",
                    "instructions": "Three times daily",
                    "pharmacyId": pharmacies[0]["id"],
                    "deliveryOption": "delivery",
                    "deliveryAddress": "12 Elm St"
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["status"], json!("pending"));
        assert_eq!(created["medication"], json!("Amoxicillin"));
        assert_eq!(created["patientName"], json!("Sarah Johnson"));
        assert!(created["estimatedReady"].is_string());
        let id = created["id"].as_str().unwrap().to_string();

        let (status, ready) = send(
            &app,
            make_request(
                "PUT",
                &format!("/api/prescriptions/{id}"),
                Some(json!({ "status": "ready" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ready["status"], json!("ready"));

        let (status, tracker) = send(
            &app,
            make_request("GET", &format!("/api/prescriptions/{id}/tracker"), None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(tracker["color"], json!("blue"));
        assert_eq!(tracker["delivery"]["mode"], json!("delivery"));
        assert_eq!(tracker["steps"][2]["current"], json!(true));

        let (_, dashboard) = send(&app, make_request("GET", "/api/dashboard", None)).await;
        assert_eq!(dashboard["todaysPrescriptions"], json!(1));
        assert_eq!(dashboard["outForDelivery"], json!(1));
        assert_eq!(dashboard["readyForPickup"], json!(0));

        let (_, filtered) = send(
            &app,
            make_request("GET", "/api/prescriptions?status=pending", None),
        )
        .await;
        assert!(filtered.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_follow_up_for_prescription() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);

        let (_, patient) = send(
            &app,
            make_request("POST", "/api/patients", Some(patient_body())),
        )
        .await;
        let (_, pharmacies) = send(&app, make_request("GET", "/api/pharmacies", None)).await;
        let (_, prescription) = send(
            &app,
            make_request(
                "POST",
                "/api/prescriptions",
                Some(json!({
                    "patientId": patient["id"],
                    "medicationId": "3",
                    "dosage": "500mg",
                    "instructions": "Twice daily with meals",
                    "pharmacyId": pharmacies[0]["id"]
                })),
            ),
        )
        .await;
        let id = prescription["id"].as_str().unwrap().to_string();

        let (status, follow_up) = send(
            &app,
            make_request(
                "POST",
                &format!("/api/prescriptions/{id}/follow-up"),
                Some(json!({ "date": "2099-02-01", "time": "09:00" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(follow_up["type"], json!("follow-up"));
        assert_eq!(follow_up["patientId"], patient["id"]);
        assert_eq!(follow_up["prescriptionIds"], json!([id]));
        assert_eq!(
            follow_up["reason"],
            json!(format!("Follow-up for prescription {id}"))
        );

        let (status, _) = send(
            &app,
            make_request(
                "POST",
                "/api/prescriptions/0123456789abcdef0123456789abcdef/follow-up",
                Some(json!({ "date": "2099-02-01", "time": "09:00" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_prescription_with_unknown_patient_is_unprocessable() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);

        let (status, body) = send(
            &app,
            make_request(
                "POST",
                "/api/prescriptions",
                Some(json!({
                    "patientId": "0123456789abcdef0123456789abcdef",
                    "medication": "Lisinopril",
                    "dosage": "10mg",
                    "instructions": "Daily",
                    "pharmacyId": "0123456789abcdef0123456789abcdef"
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["errors"][0]["field"], json!("patientId"));
    }

    #[tokio::test]
    async fn test_appointment_in_past_is_rejected() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);
        let (_, patient) = send(
            &app,
            make_request("POST", "/api/patients", Some(patient_body())),
        )
        .await;

        let (status, body) = send(
            &app,
            make_request(
                "POST",
                "/api/appointments",
                Some(json!({
                    "patientId": patient["id"],
                    "date": "2020-01-01",
                    "time": "10:00",
                    "reason": "x"
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["errors"][0]["field"], json!("date"));

        let (status, created) = send(
            &app,
            make_request(
                "POST",
                "/api/appointments",
                Some(json!({
                    "patientId": patient["id"],
                    "date": "2099-01-01",
                    "time": "10:00",
                    "reason": "Annual review",
                    "type": "check-up"
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["status"], json!("scheduled"));

        let (_, on_day) = send(
            &app,
            make_request("GET", "/api/appointments?date=2099-01-01", None),
        )
        .await;
        assert_eq!(on_day.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_medication_catalog() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = test_app(&temp_dir);

        let (status, meds) = send(&app, make_request("GET", "/api/medications?search=20mg", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(meds.as_array().unwrap().len(), 2);

        let (status, _) = send(&app, make_request("GET", "/api/medications/9", None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use assert_matches::assert_matches;
use chrono::Utc;
use serde_json::Value;

use appointment_cell::handlers::*;
use appointment_cell::models::{BookAppointmentRequest, RescheduleAppointmentRequest};
use shared_database::AppState;
use shared_models::account::Role;
use shared_models::appointment::AppointmentStatus;
use shared_models::error::AppError;
use shared_utils::test_utils::{AccountFixtures, TestConfig, TestUser};

fn as_patient() -> Extension<shared_models::auth::AuthUser> {
    Extension(TestUser::new("p1", Role::Patient).to_auth_user())
}

fn booking(patient: &str, doctor: &str, date: &str) -> BookAppointmentRequest {
    BookAppointmentRequest {
        patient: Some(patient.to_string()),
        doctor: Some(doctor.to_string()),
        appointment_date: Some(date.to_string()),
        reason: None,
    }
}

async fn book(state: &AppState, request: BookAppointmentRequest) -> Result<Value, AppError> {
    let (status, Json(body)) = book_appointment(State(state.clone()), as_patient(), Ok(Json(request))).await?;
    assert_eq!(status, StatusCode::CREATED);
    Ok(body)
}

#[tokio::test]
async fn test_book_then_list_joins_doctor() {
    let state = AccountFixtures::seeded_state(&TestConfig::default()).await;
    let before = Utc::now();

    let body = book(&state, booking("p1", "d1", "2026-03-10")).await.unwrap();

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "booked");
    assert_eq!(body["data"]["appointmentDate"], "2026-03-10T00:00:00Z");
    let stored = state
        .appointments
        .find_appointment(body["data"]["id"].as_str().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(stored.created_at >= before);

    let Json(list) = get_appointments(State(state)).await.unwrap();
    let entries = list["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["doctor"]["name"], "Dr. Grey");
    assert_eq!(entries[0]["doctor"]["specialization"], "Surgery");
    assert_eq!(entries[0]["patient"]["name"], "Pat Doe");
    assert_eq!(entries[0]["status"], "booked");
}

#[tokio::test]
async fn test_book_keeps_trimmed_reason_and_drops_blank() {
    let state = AccountFixtures::seeded_state(&TestConfig::default()).await;

    let with_reason = BookAppointmentRequest {
        reason: Some("  Knee pain ".to_string()),
        ..booking("p1", "d1", "2026-03-10T09:30:00Z")
    };
    let body = book(&state, with_reason).await.unwrap();
    assert_eq!(body["data"]["reason"], "Knee pain");

    let blank_reason = BookAppointmentRequest {
        reason: Some("   ".to_string()),
        ..booking("p1", "d1", "2026-03-11")
    };
    let body = book(&state, blank_reason).await.unwrap();
    assert!(body["data"].get("reason").is_none());
}

#[tokio::test]
async fn test_book_validation() {
    let state = AccountFixtures::seeded_state(&TestConfig::default()).await;

    let no_date = BookAppointmentRequest { appointment_date: None, ..booking("p1", "d1", "") };
    assert_matches!(book(&state, no_date).await, Err(AppError::ValidationError(_)));

    assert_matches!(
        book(&state, booking("p1", "d1", "next week")).await,
        Err(AppError::ValidationError(msg)) if msg.starts_with("Invalid appointment date")
    );

    let no_doctor = BookAppointmentRequest { doctor: None, ..booking("p1", "d1", "2026-03-10") };
    assert_matches!(book(&state, no_doctor).await, Err(AppError::ValidationError(_)));

    assert_matches!(
        book(&state, booking("d1", "d1", "2026-03-10")).await,
        Err(AppError::ValidationError(_))
    );

    assert!(state.appointments.list_appointments().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_book_checks_participants_exist_and_roles() {
    let state = AccountFixtures::seeded_state(&TestConfig::default()).await;

    assert_matches!(
        book(&state, booking("ghost", "d1", "2026-03-10")).await,
        Err(AppError::NotFound(msg)) if msg == "Patient not found"
    );
    assert_matches!(
        book(&state, booking("p1", "ghost", "2026-03-10")).await,
        Err(AppError::NotFound(msg)) if msg == "Doctor not found"
    );
    assert_matches!(
        book(&state, booking("d1", "p1", "2026-03-10")).await,
        Err(AppError::ValidationError(msg)) if msg == "Account is not a patient"
    );
}

#[tokio::test]
async fn test_double_booking_is_not_prevented() {
    let state = AccountFixtures::seeded_state(&TestConfig::default()).await;

    book(&state, booking("p1", "d1", "2026-03-10T10:00")).await.unwrap();
    book(&state, booking("p1", "d1", "2026-03-10T10:00")).await.unwrap();

    assert_eq!(state.appointments.list_appointments().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_cancel_removes_appointment() {
    let state = AccountFixtures::seeded_state(&TestConfig::default()).await;
    let body = book(&state, booking("p1", "d1", "2026-03-10")).await.unwrap();
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let Json(cancelled) = cancel_appointment(State(state.clone()), Path(id.clone())).await.unwrap();

    assert_eq!(cancelled["success"], true);
    assert_eq!(cancelled["data"]["id"], id.as_str());
    assert_eq!(cancelled["message"], "Appointment cancelled successfully");

    let Json(list) = get_appointments(State(state.clone())).await.unwrap();
    assert!(list["data"].as_array().unwrap().is_empty());

    let again = cancel_appointment(State(state), Path(id)).await;
    assert_matches!(again, Err(AppError::NotFound(msg)) if msg == "Appointment not found");
}

#[tokio::test]
async fn test_reschedule_updates_date_only() {
    let state = AccountFixtures::seeded_state(&TestConfig::default()).await;
    let body = book(&state, booking("p1", "d1", "2026-03-10")).await.unwrap();
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let Json(updated) = reschedule_appointment(
        State(state),
        Path(id),
        Ok(Json(RescheduleAppointmentRequest {
            appointment_date: Some("2026-03-12T15:00:00Z".to_string()),
        })),
    )
    .await
    .unwrap();

    assert_eq!(updated["data"]["appointmentDate"], "2026-03-12T15:00:00Z");
    assert_eq!(updated["data"]["status"], "booked");
    assert_eq!(updated["data"]["doctor"]["id"], "d1");
}

#[tokio::test]
async fn test_reschedule_without_date_leaves_record_unchanged() {
    let state = AccountFixtures::seeded_state(&TestConfig::default()).await;
    let body = book(&state, booking("p1", "d1", "2026-03-10")).await.unwrap();
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let result = reschedule_appointment(
        State(state.clone()),
        Path(id.clone()),
        Ok(Json(RescheduleAppointmentRequest { appointment_date: None })),
    )
    .await;

    assert_matches!(result, Err(AppError::ValidationError(_)));
    let stored = state.appointments.find_appointment(&id).await.unwrap().unwrap();
    assert_eq!(stored.appointment_date.to_rfc3339(), "2026-03-10T00:00:00+00:00");
}

#[tokio::test]
async fn test_reschedule_missing_appointment() {
    let state = AccountFixtures::seeded_state(&TestConfig::default()).await;

    let result = reschedule_appointment(
        State(state),
        Path("nope".to_string()),
        Ok(Json(RescheduleAppointmentRequest {
            appointment_date: Some("2026-03-12".to_string()),
        })),
    )
    .await;

    assert_matches!(result, Err(AppError::NotFound(_)));
}

#[tokio::test]
async fn test_complete_once_then_rejected() {
    let state = AccountFixtures::seeded_state(&TestConfig::default()).await;
    let body = book(&state, booking("p1", "d1", "2026-03-10")).await.unwrap();
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let Json(completed) = complete_appointment(State(state.clone()), Path(id.clone())).await.unwrap();
    assert_eq!(completed["data"]["status"], "completed");

    let stored = state.appointments.find_appointment(&id).await.unwrap().unwrap();
    assert_eq!(stored.status, AppointmentStatus::Completed);

    let again = complete_appointment(State(state), Path(id)).await;
    assert_matches!(
        again,
        Err(AppError::ValidationError(msg)) if msg == "Appointment cannot be modified in current status: completed"
    );
}

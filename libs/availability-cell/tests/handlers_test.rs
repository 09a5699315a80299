use axum::{
    extract::{Extension, Path, State},
    Json,
};
use assert_matches::assert_matches;
use serde_json::json;

use availability_cell::handlers::{get_availability, update_availability};
use availability_cell::models::UpdateAvailabilityRequest;
use shared_models::account::Role;
use shared_models::error::AppError;
use shared_utils::test_utils::{AccountFixtures, TestConfig, TestUser};

#[tokio::test]
async fn test_get_default_availability_for_doctor() {
    let state = AccountFixtures::seeded_state(&TestConfig::default()).await;

    let Json(body) = get_availability(State(state), Path("d1".to_string())).await.unwrap();

    assert_eq!(body["success"], true);
    let weekly = body["data"]["weeklyHours"].as_array().unwrap();
    assert_eq!(weekly.len(), 7);
    assert_eq!(weekly[4]["day"], "Fri");
    assert_eq!(weekly[4]["end"], "17:00");
    assert_eq!(weekly[6]["enabled"], false);
    assert_eq!(body["data"]["blockedDates"], json!([]));
}

#[tokio::test]
async fn test_get_availability_for_patient_is_rejected() {
    let state = AccountFixtures::seeded_state(&TestConfig::default()).await;

    let result = get_availability(State(state), Path("p1".to_string())).await;

    assert_matches!(result, Err(AppError::ValidationError(msg)) if msg == "User is not a doctor");
}

#[tokio::test]
async fn test_get_availability_for_unknown_user() {
    let state = AccountFixtures::seeded_state(&TestConfig::default()).await;

    let result = get_availability(State(state), Path("ghost".to_string())).await;

    assert_matches!(result, Err(AppError::NotFound(msg)) if msg == "User not found");
}

#[tokio::test]
async fn test_update_blocked_dates_keeps_weekly_hours() {
    let state = AccountFixtures::seeded_state(&TestConfig::default()).await;
    let doctor = TestUser::new("d1", Role::Doctor);
    let request = UpdateAvailabilityRequest {
        weekly_hours: None,
        blocked_dates: Some(json!(["2026-03-12", "2026-03-10", "2026-03-12"])),
    };

    let Json(body) = update_availability(
        State(state.clone()),
        Path("d1".to_string()),
        Extension(doctor.to_auth_user()),
        Ok(Json(request)),
    )
    .await
    .unwrap();

    assert_eq!(body["data"]["blockedDates"], json!(["2026-03-10", "2026-03-12"]));
    assert_eq!(body["data"]["weeklyHours"].as_array().unwrap().len(), 7);

    let stored = state.accounts.find_account("d1").await.unwrap().unwrap();
    assert_eq!(stored.kind.availability().unwrap().blocked_dates.len(), 2);
}

#[tokio::test]
async fn test_update_replaces_weekly_hours_in_full() {
    let state = AccountFixtures::seeded_state(&TestConfig::default()).await;
    let doctor = TestUser::new("d1", Role::Doctor);
    let mut week = AccountFixtures::weekly_hours_json("12:00", "18:00");
    week.as_array_mut().unwrap().reverse();
    let request = UpdateAvailabilityRequest {
        weekly_hours: Some(week),
        blocked_dates: Some(json!("not-a-list")),
    };

    let Json(body) = update_availability(
        State(state),
        Path("d1".to_string()),
        Extension(doctor.to_auth_user()),
        Ok(Json(request)),
    )
    .await
    .unwrap();

    let weekly = body["data"]["weeklyHours"].as_array().unwrap();
    assert_eq!(weekly.len(), 7);
    assert_eq!(weekly[0]["day"], "Mon");
    assert_eq!(weekly[0]["start"], "12:00");
    assert_eq!(weekly[6]["day"], "Sun");
    assert_eq!(weekly[6]["enabled"], false);
    assert_eq!(body["data"]["blockedDates"], json!([]));
}

#[tokio::test]
async fn test_partial_week_is_rejected_and_hours_kept() {
    let state = AccountFixtures::seeded_state(&TestConfig::default()).await;
    let doctor = TestUser::new("d1", Role::Doctor);
    let request = UpdateAvailabilityRequest {
        weekly_hours: Some(json!([
            {"day": "Mon", "start": "10:00", "end": "11:00"},
            {"day": "Tue", "start": "10:00", "end": "11:00"}
        ])),
        blocked_dates: None,
    };

    let result = update_availability(
        State(state.clone()),
        Path("d1".to_string()),
        Extension(doctor.to_auth_user()),
        Ok(Json(request)),
    )
    .await;

    assert_matches!(result, Err(AppError::ValidationError(msg)) if msg.contains("all seven days"));
    let stored = state.accounts.find_account("d1").await.unwrap().unwrap();
    let weekly = &stored.kind.availability().unwrap().weekly_hours;
    assert_eq!(weekly.len(), 7);
    assert_eq!(weekly[0].start, "09:00");
}

#[tokio::test]
async fn test_invalid_entry_stores_nothing() {
    let state = AccountFixtures::seeded_state(&TestConfig::default()).await;
    let doctor = TestUser::new("d1", Role::Doctor);
    let request = UpdateAvailabilityRequest {
        weekly_hours: Some(json!([{"day": "Mon", "start": "18:00", "end": "09:00"}])),
        blocked_dates: Some(json!(["2026-03-10"])),
    };

    let result = update_availability(
        State(state.clone()),
        Path("d1".to_string()),
        Extension(doctor.to_auth_user()),
        Ok(Json(request)),
    )
    .await;

    assert_matches!(result, Err(AppError::ValidationError(_)));
    let stored = state.accounts.find_account("d1").await.unwrap().unwrap();
    assert!(stored.kind.availability().unwrap().blocked_dates.is_empty());
}

#[tokio::test]
async fn test_only_the_doctor_may_update() {
    let state = AccountFixtures::seeded_state(&TestConfig::default()).await;
    let someone_else = TestUser::new("p1", Role::Patient);

    let result = update_availability(
        State(state),
        Path("d1".to_string()),
        Extension(someone_else.to_auth_user()),
        Ok(Json(UpdateAvailabilityRequest::default())),
    )
    .await;

    assert_matches!(result, Err(AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_patient_updating_own_availability_is_rejected() {
    let state = AccountFixtures::seeded_state(&TestConfig::default()).await;
    let patient = TestUser::new("p1", Role::Patient);

    let result = update_availability(
        State(state),
        Path("p1".to_string()),
        Extension(patient.to_auth_user()),
        Ok(Json(UpdateAvailabilityRequest::default())),
    )
    .await;

    assert_matches!(result, Err(AppError::ValidationError(msg)) if msg == "User is not a doctor");
}

use chrono::{Local, Timelike};
use serde_json::json;
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};

use booking_flow_cell::models::{DateOption, FlowError, NoticeKind, TimeSlot, WizardEvent, WizardStep};
use booking_flow_cell::services::flow::FlowService;
use booking_flow_cell::services::slots;
use shared_config::AppConfig;
use shared_utils::test_utils::{TestConfig, MockSupabaseResponses};

fn config_for(mock_server: &MockServer) -> AppConfig {
    let mut config = TestConfig::default().to_app_config();
    config.supabase_url = mock_server.uri();
    config
}

async fn mount_directory_mocks(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/hospital"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::hospital_response(1, "H001", "KIMST Hospital"),
            MockSupabaseResponses::hospital_response(2, "H002", "Fathima Hospital Kannur")
        ])))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("hospital_id", "eq.H001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::doctor_response(10, "Dr. Erick Kuhlman", "Neurologist", "H001"),
            MockSupabaseResponses::doctor_response(11, "Dr. Verna Herzberg", "Gynaecologist", "H001")
        ])))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_full_booking_walkthrough() {
    let mock_server = MockServer::start().await;
    let config = config_for(&mock_server);

    mount_directory_mocks(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .and(header("Prefer", "return=representation"))
        .and(body_partial_json(json!({
            "hospital_id": 1,
            "doctor_id": 10,
            "appointment_time": "01:00 PM",
            "patient_id": "patient-0001"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockSupabaseResponses::appointment_response(
                42, 1, 10, "2025-06-01", "01:00 PM", "patient-0001"
            )
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = FlowService::new(&config);

    // Startup loads the hospital directory.
    let mut state = service.start().await;
    assert_eq!(state.step(), WizardStep::Hospital);
    assert_eq!(state.filtered_hospitals().len(), 2);
    assert!(state.error().is_none());

    // Hospital H1 -> doctor screen, doctor list fetched for its code.
    service.dispatch(&mut state, WizardEvent::SelectHospital(1)).await;
    assert_eq!(state.step(), WizardStep::Doctor);
    assert!(!state.is_loading());
    assert_eq!(state.filtered_doctors().len(), 2);

    // Doctor D1 -> date/time screen with clock-consistent defaults.
    service.dispatch(&mut state, WizardEvent::SelectDoctor(10)).await;
    assert_eq!(state.step(), WizardStep::DateTime);
    let expected_slot = slots::default_slot(Local::now().hour());
    assert_eq!(state.selected_slot(), expected_slot);
    assert_eq!(state.available_times(), slots::slot_times(expected_slot).as_slice());
    assert!(state.selected_time().is_none());

    // Afternoon bucket -> fixed grid, concrete time cleared.
    service
        .dispatch(&mut state, WizardEvent::SelectTimeSlot(TimeSlot::Afternoon))
        .await;
    assert_eq!(
        state.available_times(),
        &[
            "12:00 PM", "12:30 PM", "01:00 PM", "01:30 PM", "02:00 PM", "02:30 PM"
        ]
    );
    assert!(state.selected_time().is_none());

    service
        .dispatch(&mut state, WizardEvent::SelectTime("01:00 PM".to_string()))
        .await;
    service.dispatch(&mut state, WizardEvent::Confirm).await;

    assert_eq!(state.step(), WizardStep::Confirmation);
    assert_eq!(state.notice().unwrap().kind, NoticeKind::Success);
    assert_eq!(state.appointment().unwrap().id, 42);

    // Full reset back to the hospital screen.
    service.dispatch(&mut state, WizardEvent::BackToHome).await;
    assert_eq!(state.step(), WizardStep::Hospital);
    assert!(state.selected_hospital().is_none());
    assert!(state.selected_doctor().is_none());
    assert!(state.selected_time().is_none());
}

#[tokio::test]
async fn test_unreachable_backend_is_a_fatal_connection_error() {
    let mock_server = MockServer::start().await;
    let config = config_for(&mock_server);

    Mock::given(method("GET"))
        .and(path("/rest/v1/hospital"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend down"))
        .mount(&mock_server)
        .await;

    let service = FlowService::new(&config);
    let mut state = service.start().await;

    match state.error() {
        Some(FlowError::Connection(msg)) => assert!(msg.contains("backend down")),
        other => panic!("Expected connection error, got {:?}", other),
    }

    // The flow is dead: selections are refused.
    service.dispatch(&mut state, WizardEvent::SelectHospital(1)).await;
    assert_eq!(state.step(), WizardStep::Hospital);
    assert!(state.selected_hospital().is_none());
}

#[tokio::test]
async fn test_doctor_fetch_failure_blocks_the_doctor_screen() {
    let mock_server = MockServer::start().await;
    let config = config_for(&mock_server);

    Mock::given(method("GET"))
        .and(path("/rest/v1/hospital"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::hospital_response(1, "H001", "KIMST Hospital")
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(500).set_body_string("doctors unavailable"))
        .mount(&mock_server)
        .await;

    let service = FlowService::new(&config);
    let mut state = service.start().await;

    service.dispatch(&mut state, WizardEvent::SelectHospital(1)).await;

    assert_eq!(state.step(), WizardStep::Doctor);
    match state.error() {
        Some(FlowError::Fetch(msg)) => assert!(msg.contains("doctors unavailable")),
        other => panic!("Expected fetch error, got {:?}", other),
    }
    assert!(state.filtered_doctors().is_empty());

    // Back clears the error; re-selecting the hospital is the retry.
    service.dispatch(&mut state, WizardEvent::Back).await;
    assert_eq!(state.step(), WizardStep::Hospital);
    assert!(state.error().is_none());
}

#[tokio::test]
async fn test_booking_failure_keeps_the_datetime_screen() {
    let mock_server = MockServer::start().await;
    let config = config_for(&mock_server);

    mount_directory_mocks(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(500).set_body_string("insert failed"))
        .mount(&mock_server)
        .await;

    let service = FlowService::new(&config);
    let mut state = service.start().await;
    service.dispatch(&mut state, WizardEvent::SelectHospital(1)).await;
    service.dispatch(&mut state, WizardEvent::SelectDoctor(10)).await;
    service
        .dispatch(&mut state, WizardEvent::SelectTimeSlot(TimeSlot::Evening))
        .await;
    service
        .dispatch(&mut state, WizardEvent::SelectTime("03:30 PM".to_string()))
        .await;

    service.dispatch(&mut state, WizardEvent::Confirm).await;

    assert_eq!(state.step(), WizardStep::DateTime);
    let notice = state.notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Failure);
    assert!(notice.message.contains("insert failed"));
    // Selections survive for a manual retry.
    assert_eq!(state.selected_time(), Some("03:30 PM"));
}

#[tokio::test]
async fn test_tomorrow_option_books_the_next_day() {
    let mock_server = MockServer::start().await;
    let config = config_for(&mock_server);

    mount_directory_mocks(&mock_server).await;

    let tomorrow = Local::now().date_naive() + chrono::Duration::days(1);
    let tomorrow_str = tomorrow.format("%Y-%m-%d").to_string();

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .and(body_partial_json(json!({ "appointment_date": tomorrow_str })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            MockSupabaseResponses::appointment_response(
                43, 1, 10, &tomorrow_str, "03:00 PM", "patient-0001"
            )
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = FlowService::new(&config);
    let mut state = service.start().await;
    service.dispatch(&mut state, WizardEvent::SelectHospital(1)).await;
    service.dispatch(&mut state, WizardEvent::SelectDoctor(10)).await;
    service
        .dispatch(&mut state, WizardEvent::SelectDate(DateOption::Tomorrow))
        .await;
    service
        .dispatch(&mut state, WizardEvent::SelectTimeSlot(TimeSlot::Evening))
        .await;
    service
        .dispatch(&mut state, WizardEvent::SelectTime("03:00 PM".to_string()))
        .await;

    service.dispatch(&mut state, WizardEvent::Confirm).await;

    assert_eq!(state.step(), WizardStep::Confirmation);
    assert_eq!(state.appointment().unwrap().appointment_date, tomorrow);
}

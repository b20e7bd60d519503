use super::*;
use crate::api::shop::OrderAction;
use crate::models::{
    AppointmentStatus, BookingStatus, GroomingBookingUpdate, NewAppointment, NewGroomingBooking, NewRefillRequest,
    OrderStatus, RefillStatus,
};
use crate::session::Credentials;
use crate::test_support::{MockBackend, TOKEN, anonymous_client, client};
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::{Value, json};

// =============================================================================
// PURE HELPERS
// =============================================================================

#[test]
fn empty_body_decodes_as_null() {
    let value: Value = decode_body("").unwrap();
    assert_eq!(value, Value::Null);
    let unit: Option<Vec<i64>> = decode_body("  ").unwrap();
    assert!(unit.is_none());
}

#[test]
fn malformed_body_is_decode_error() {
    let err = decode_body::<Vec<i64>>("{oops").unwrap_err();
    assert!(matches!(err, DashboardError::Decode(_)));
}

#[test]
fn order_action_requests() {
    let (path, body) = OrderAction::Accept.request(12);
    assert_eq!(path, "/orders/12/accept_by_shop");
    assert_eq!(body, json!({}));

    let (path, body) = OrderAction::Decline { reason: None }.request(12);
    assert_eq!(path, "/orders/12/decline");
    assert_eq!(body, json!({"decline_reason": ""}));

    let (_, body) = OrderAction::Decline { reason: Some("Out of stock".into()) }.request(12);
    assert_eq!(body, json!({"decline_reason": "Out of stock"}));
}

#[test]
fn refill_request_paths() {
    assert_eq!(vet::refill_requests_path(None), "/prescriptions/refill/requests");
    assert_eq!(vet::refill_requests_path(Some(4)), "/prescriptions/4/refill-requests");
}

// =============================================================================
// AUTHORIZATION
// =============================================================================

#[tokio::test]
async fn anonymous_client_refuses_authorized_calls() {
    let backend = MockBackend::new();
    let url = backend.start().await;

    let err = anonymous_client(&url).fetch_orders().await.unwrap_err();
    assert!(matches!(err, DashboardError::NotLoggedIn));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn requests_carry_bearer_token() {
    let backend = MockBackend::new();
    backend.on("GET", "/orders", 200, json!([]));
    let url = backend.start().await;

    client(&url).fetch_orders().await.unwrap();
    let calls = backend.calls_to("GET", "/orders");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].authorization, format!("Bearer {TOKEN}"));
}

#[tokio::test]
async fn login_posts_form_and_parses_numeric_user_id() {
    let backend = MockBackend::new();
    backend.on("POST", "/login", 200, json!({"access_token": "abc", "user_id": 42, "role": "SHOP_OWNER"}));
    let url = backend.start().await;

    let response = anonymous_client(&url).login(&Credentials::new("owner@shop.test", "pw 1")).await.unwrap();
    assert_eq!(response.access_token, "abc");
    assert_eq!(response.user_id, "42");
    assert_eq!(response.role.as_deref(), Some("SHOP_OWNER"));

    let call = &backend.calls_to("POST", "/login")[0];
    assert!(call.content_type.starts_with("application/x-www-form-urlencoded"));
    assert!(call.body.contains("username=owner%40shop.test"));
    assert!(call.body.contains("password=pw+1"));
    assert!(call.authorization.is_empty());
}

#[tokio::test]
async fn login_rejection_is_invalid_credentials() {
    let backend = MockBackend::new();
    backend.on("POST", "/login", 401, json!({"detail": "Incorrect username or password"}));
    let url = backend.start().await;

    let err = anonymous_client(&url).login(&Credentials::new("a", "b")).await.unwrap_err();
    match err {
        DashboardError::InvalidCredentials { detail } => assert_eq!(detail, "Incorrect username or password"),
        other => panic!("unexpected error: {other:?}"),
    }
}

// =============================================================================
// ERRORS
// =============================================================================

#[tokio::test]
async fn non_success_status_surfaces_detail() {
    let backend = MockBackend::new();
    backend.on("POST", "/orders/9/accept_by_shop", 400, json!({"detail": "Order is not pending"}));
    let url = backend.start().await;

    let err = client(&url).order_action(9, &OrderAction::Accept).await.unwrap_err();
    match err {
        DashboardError::Status { status, detail } => {
            assert_eq!(status, 400);
            assert_eq!(detail, "Order is not pending");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn expired_token_is_unauthorized() {
    let backend = MockBackend::new();
    backend.on("GET", "/products", 401, json!({"detail": "Could not validate credentials"}));
    let url = backend.start().await;

    let err = client(&url).fetch_products().await.unwrap_err();
    assert!(err.is_unauthorized());
}

// =============================================================================
// SHOP
// =============================================================================

#[tokio::test]
async fn pending_orders_keep_backend_order() {
    let backend = MockBackend::new();
    backend.on(
        "GET",
        "/orders",
        200,
        json!([
            {"id": 3, "status": "PENDING"},
            {"id": 1, "status": "DELIVERED"},
            {"id": 2, "status": "PENDING"}
        ]),
    );
    let url = backend.start().await;

    let pending = client(&url).fetch_pending_orders().await.unwrap();
    let ids: Vec<i64> = pending.iter().map(|o| o.id).collect();
    assert_eq!(ids, [3, 2]);
    assert!(pending.iter().all(|o| o.status == OrderStatus::Pending));
}

#[tokio::test]
async fn category_failure_degrades_to_empty() {
    let backend = MockBackend::new();
    backend.on("GET", "/sanity/categories", 500, json!({"detail": "sanity down"}));
    let url = backend.start().await;

    let categories = client(&url).fetch_categories().await.unwrap();
    assert!(categories.is_empty());
}

#[tokio::test]
async fn decline_order_sends_reason() {
    let backend = MockBackend::new();
    backend.on("POST", "/orders/5/decline", 200, json!({"status": "DECLINED"}));
    let url = backend.start().await;

    client(&url).order_action(5, &OrderAction::Decline { reason: Some("No stock".into()) }).await.unwrap();
    let call = &backend.calls_to("POST", "/orders/5/decline")[0];
    assert_eq!(call.json(), json!({"decline_reason": "No stock"}));
}

// =============================================================================
// CLINIC
// =============================================================================

#[tokio::test]
async fn appointment_status_update_is_put_with_status() {
    let backend = MockBackend::new();
    backend.on("PUT", "/appointments/4", 200, json!({"id": 4, "status": "CONFIRMED"}));
    let url = backend.start().await;

    client(&url).update_appointment_status(4, AppointmentStatus::Confirmed).await.unwrap();
    assert_eq!(backend.calls_to("PUT", "/appointments/4")[0].json(), json!({"status": "CONFIRMED"}));
}

#[tokio::test]
async fn refill_decision_is_put_with_status() {
    let backend = MockBackend::new();
    backend.on("PUT", "/prescriptions/refill/request/8", 200, json!({}));
    let url = backend.start().await;

    client(&url).update_refill_request(8, RefillStatus::Denied).await.unwrap();
    assert_eq!(backend.calls_to("PUT", "/prescriptions/refill/request/8")[0].json(), json!({"status": "DENIED"}));
}

#[tokio::test]
async fn delete_accepts_empty_body() {
    let backend = MockBackend::new();
    backend.on_raw("DELETE", "/veterinarians/3", 204, "");
    backend.on("DELETE", "/appointments/6", 200, json!({"message": "deleted"}));
    let url = backend.start().await;

    let api = client(&url);
    api.delete_veterinarian(3).await.unwrap();
    api.delete_appointment(6).await.unwrap();
}

#[tokio::test]
async fn booked_appointments_query_by_date() {
    let backend = MockBackend::new();
    backend.on("GET", "/appointments/booked", 200, json!([{"date_time": "2024-06-01T10:00:00"}]));
    let url = backend.start().await;

    let booked = client(&url).fetch_booked_appointments(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()).await.unwrap();
    assert_eq!(booked.len(), 1);
    assert!(booked[0].date_time.is_some());
    assert_eq!(backend.calls_to("GET", "/appointments/booked")[0].query, "date=2024-06-01");
}

#[tokio::test]
async fn all_appointments_and_pet_records_use_their_paths() {
    let backend = MockBackend::new();
    backend
        .on("GET", "/appointments/all", 200, json!([{"id": 1, "status": "SCHEDULED"}, {"id": 2}]))
        .on("GET", "/pets/9/medical-records", 200, json!([{"id": 5, "pet_id": 9, "date": "2024-05-01"}]));
    let url = backend.start().await;
    let api = client(&url);

    let appointments = api.fetch_all_appointments().await.unwrap();
    assert_eq!(appointments.len(), 2);
    assert_eq!(appointments[0].status, AppointmentStatus::Scheduled);

    let records = api.fetch_medical_records(9).await.unwrap();
    assert_eq!(records[0].pet_id, Some(9));
    assert_eq!(backend.calls_to("GET", "/pets/9/medical-records")[0].authorization, format!("Bearer {TOKEN}"));
}

#[tokio::test]
async fn create_appointment_posts_json_without_unset_fields() {
    let backend = MockBackend::new();
    backend.on("POST", "/appointments/appointments", 200, json!({"id": 31, "status": "SCHEDULED"}));
    let url = backend.start().await;

    let appointment = NewAppointment {
        pet_id: Some(4),
        user_id: 2,
        service_id: 7,
        date_time: Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).single().unwrap(),
        veterinarian_id: None,
        other_pet_species: None,
        other_pet_breed: None,
    };
    let created = client(&url).create_appointment(&appointment).await.unwrap();
    assert_eq!(created.id, 31);

    let call = &backend.calls_to("POST", "/appointments/appointments")[0];
    assert!(call.content_type.starts_with("application/json"));
    assert_eq!(
        call.json(),
        json!({"pet_id": 4, "user_id": 2, "service_id": 7, "date_time": "2024-06-01T10:00:00Z"})
    );
}

#[tokio::test]
async fn refill_requests_list_and_create() {
    let backend = MockBackend::new();
    backend
        .on("GET", "/prescriptions/refill/requests", 200, json!([{"id": 8, "status": "PENDING"}]))
        .on("GET", "/prescriptions/4/refill-requests", 200, json!([]))
        .on("POST", "/prescriptions/refill/request", 200, json!({"id": 9, "prescription_id": 4, "status": "PENDING"}));
    let url = backend.start().await;
    let api = client(&url);

    let all = api.fetch_refill_requests(None).await.unwrap();
    assert_eq!(all[0].status, RefillStatus::Pending);
    assert!(api.fetch_refill_requests(Some(4)).await.unwrap().is_empty());
    assert_eq!(backend.calls_to("GET", "/prescriptions/4/refill-requests").len(), 1);

    let created = api
        .create_refill_request(&NewRefillRequest { prescription_id: 4, notes: Some("Running low".into()) })
        .await
        .unwrap();
    assert_eq!(created.id, 9);
    api.create_refill_request(&NewRefillRequest { prescription_id: 4, notes: None }).await.unwrap();

    let sent = backend.calls_to("POST", "/prescriptions/refill/request");
    assert_eq!(sent[0].json(), json!({"prescription_id": 4, "notes": "Running low"}));
    assert_eq!(sent[1].json(), json!({"prescription_id": 4}));
}

// =============================================================================
// GROOMING & HOTEL
// =============================================================================

#[tokio::test]
async fn grooming_bookings_are_paged_with_configured_limit() {
    let backend = MockBackend::new();
    backend.on("GET", "/pet-grooming/all-bookings", 200, json!([]));
    let url = backend.start().await;

    client(&url).fetch_all_grooming_bookings(0).await.unwrap();
    assert_eq!(backend.calls_to("GET", "/pet-grooming/all-bookings")[0].query, "skip=0&limit=50");
}

#[tokio::test]
async fn grooming_create_is_multipart_with_joined_service_ids() {
    let backend = MockBackend::new();
    backend.on("POST", "/pet-grooming/bookings", 200, json!({"id": 77, "status": "PENDING"}));
    let url = backend.start().await;

    let booking = NewGroomingBooking {
        pet_id: 1,
        user_id: 2,
        date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        start_time: "10:00".into(),
        service_ids: vec![3, 4],
        duration: 60,
    };
    let created = client(&url).create_grooming_booking(&booking).await.unwrap();
    assert_eq!(created.id, 77);

    let call = &backend.calls_to("POST", "/pet-grooming/bookings")[0];
    assert!(call.content_type.starts_with("multipart/form-data"));
    assert!(call.body.contains("name=\"service_ids\""));
    assert!(call.body.contains("3,4"));
}

#[tokio::test]
async fn grooming_update_omits_unset_fields() {
    let backend = MockBackend::new();
    backend.on("PUT", "/pet-grooming/bookings/5", 200, json!({}));
    let url = backend.start().await;

    client(&url)
        .update_grooming_booking(5, &GroomingBookingUpdate::status(BookingStatus::InProgress))
        .await
        .unwrap();
    let call = &backend.calls_to("PUT", "/pet-grooming/bookings/5")[0];
    assert!(call.body.contains("IN_PROGRESS"));
    assert!(!call.body.contains("start_time"));
}

#[tokio::test]
async fn grooming_decline_sends_cancel_reason() {
    let backend = MockBackend::new();
    backend.on("POST", "/pet-grooming/bookings/5/decline", 200, json!({}));
    let url = backend.start().await;

    client(&url).decline_grooming_booking(5, "Unavailable").await.unwrap();
    let call = &backend.calls_to("POST", "/pet-grooming/bookings/5/decline")[0];
    assert_eq!(call.json(), json!({"cancel_reason": "Unavailable"}));
}

#[tokio::test]
async fn hotel_decline_sends_reason() {
    let backend = MockBackend::new();
    backend.on("POST", "/pet-hotels/bookings/2/decline", 200, json!({}));
    let url = backend.start().await;

    client(&url).decline_hotel_booking(2, "Fully booked").await.unwrap();
    let call = &backend.calls_to("POST", "/pet-hotels/bookings/2/decline")[0];
    assert_eq!(call.json(), json!({"reason": "Fully booked"}));
}

#[tokio::test]
async fn hotel_accept_posts_without_body() {
    let backend = MockBackend::new();
    backend.on("POST", "/pet-hotels/bookings/2/accept", 200, json!({"id": 2, "status": "CONFIRMED"}));
    let url = backend.start().await;

    client(&url).accept_hotel_booking(2).await.unwrap();
    assert!(backend.calls_to("POST", "/pet-hotels/bookings/2/accept")[0].body.is_empty());
}

#[tokio::test]
async fn bookings_for_user_query_by_user_id() {
    let backend = MockBackend::new();
    backend
        .on("GET", "/pet-grooming/bookings", 200, json!([{"id": 1, "user_id": 12, "status": "PENDING"}]))
        .on("GET", "/pet-hotels/bookings", 200, json!([{"id": 2, "user_id": 12, "status": "CONFIRMED"}]));
    let url = backend.start().await;
    let api = client(&url);

    let grooming = api.fetch_grooming_bookings_for_user(12).await.unwrap();
    assert_eq!(grooming[0].user_id, Some(12));
    let hotel = api.fetch_hotel_bookings_for_user(12).await.unwrap();
    assert_eq!(hotel[0].id, 2);

    assert_eq!(backend.calls_to("GET", "/pet-grooming/bookings")[0].query, "user_id=12");
    assert_eq!(backend.calls_to("GET", "/pet-hotels/bookings")[0].query, "user_id=12");
}

use super::*;
use crate::test_support::{MockBackend, client};
use serde_json::json;

fn backend() -> MockBackend {
    let backend = MockBackend::new();
    backend.on(
        "GET",
        "/prescriptions",
        200,
        json!([
            {"id": 1, "medication_name": "Amoxicillin", "owner": {"id": 20, "name": "Aisha"}, "pet": {"id": 10, "name": "Milo"},
             "refill_requests": [{"id": 100, "status": "APPROVED"}, {"id": 101, "status": "PENDING"}]},
            {"id": 2, "medication_name": "Carprofen", "owner": {"id": 21, "name": "  "}}
        ]),
    );
    backend
}

#[tokio::test]
async fn reload_flags_pending_requests_and_names() {
    let backend = backend();
    let url = backend.start().await;
    let mut page = RefillsPage::new(client(&url));

    page.reload().await.unwrap();

    let views = page.prescriptions();
    assert_eq!(views[0].customer_name, "Aisha");
    assert_eq!(views[0].pet_name, "Milo");
    assert!(views[0].has_pending_requests);
    assert_eq!(views[1].customer_name, "Unknown");
    assert_eq!(views[1].pet_name, "Unknown");
    assert!(!views[1].has_pending_requests);
    assert_eq!(page.awaiting_review().count(), 1);
}

#[tokio::test]
async fn approve_and_deny_put_status() {
    let backend = backend();
    backend.on("PUT", "/prescriptions/refill/request/101", 200, json!({"id": 101}));
    let url = backend.start().await;
    let mut page = RefillsPage::new(client(&url));

    page.approve(101).await.unwrap();
    page.deny(101).await.unwrap();

    let sent = backend.calls_to("PUT", "/prescriptions/refill/request/101");
    assert_eq!(sent[0].json(), json!({"status": "APPROVED"}));
    assert_eq!(sent[1].json(), json!({"status": "DENIED"}));
    assert_eq!(backend.calls_to("GET", "/prescriptions").len(), 2);
}

#[tokio::test]
async fn deletes_hit_their_endpoints() {
    let backend = backend();
    backend
        .on_raw("DELETE", "/prescriptions/refill/request/100", 204, "")
        .on("DELETE", "/prescriptions/2", 200, json!({"message": "deleted"}));
    let url = backend.start().await;
    let mut page = RefillsPage::new(client(&url));

    page.delete_request(100).await.unwrap();
    page.delete_prescription(2).await.unwrap();

    assert_eq!(backend.calls_to("DELETE", "/prescriptions/refill/request/100").len(), 1);
    assert_eq!(backend.calls_to("DELETE", "/prescriptions/2").len(), 1);
}

#[tokio::test]
async fn failed_action_returns_error_without_reload() {
    let backend = backend();
    backend.on("PUT", "/prescriptions/1", 422, json!({"detail": [{"msg": "bad date"}]}));
    let url = backend.start().await;
    let mut page = RefillsPage::new(client(&url));

    let update = PrescriptionUpdate { dosage: Some("10mg".into()), ..PrescriptionUpdate::default() };
    let err = page.edit_prescription(1, &update).await.unwrap_err();

    assert_eq!(err.to_string(), r#"HTTP error! status: 422, message: [{"msg":"bad date"}]"#);
    assert!(backend.calls_to("GET", "/prescriptions").is_empty());
}

use super::*;
use crate::test_support::{MockBackend, client};
use serde_json::json;

fn backend() -> MockBackend {
    let backend = MockBackend::new();
    backend
        .on(
            "GET",
            "/pets/all-medical-records",
            200,
            json!([
                {"id": 1, "pet_id": 10, "date": "2024-02-01", "description": "Vaccination", "veterinarian_id": 5},
                {"id": 2, "pet_id": 10, "date": "2024-02-20T00:00:00", "description": "Dental"}
            ]),
        )
        .on("GET", "/pets/10", 200, json!({"id": 10, "name": "Milo", "owner_id": 20}))
        .on("GET", "/users/20", 200, json!({"id": 20, "name": "Aisha"}))
        .on("GET", "/veterinarians/5", 200, json!({"id": 5, "name": "Dr. Tan"}));
    backend
}

#[tokio::test]
async fn reload_joins_pet_owner_and_vet() {
    let backend = backend();
    let url = backend.start().await;
    let mut page = MedicalRecordsPage::new(client(&url));

    page.reload().await.unwrap();

    let records = page.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].pet_name, "Milo");
    assert_eq!(records[0].customer_name, "Aisha");
    assert_eq!(records[0].veterinarian_name, "Dr. Tan");
    assert_eq!(records[1].veterinarian_name, "N/A");
    assert_eq!(records[1].record.date.map(|d| d.to_string()).as_deref(), Some("2024-02-20"));
}

#[tokio::test]
async fn failed_lookup_fails_the_page() {
    let backend = backend();
    let url = backend.start().await;
    backend.on("GET", "/veterinarians/5", 500, json!({"detail": "vet lookup broken"}));
    let mut page = MedicalRecordsPage::new(client(&url));
    page.reload().await.unwrap();

    let err = page.reload().await.unwrap_err();

    assert!(matches!(err, crate::error::DashboardError::Status { status: 500, .. }));
    assert_eq!(page.error(), Some("Failed to load data: HTTP error! status: 500, message: vet lookup broken"));
    assert_eq!(page.records().len(), 2);
}

#[tokio::test]
async fn delete_targets_pet_scoped_path_and_reloads() {
    let backend = backend();
    backend.on_raw("DELETE", "/pets/10/medical-records/2", 204, "");
    let url = backend.start().await;
    let mut page = MedicalRecordsPage::new(client(&url));

    page.delete(10, 2).await.unwrap();

    assert_eq!(backend.calls_to("DELETE", "/pets/10/medical-records/2").len(), 1);
    assert_eq!(page.records().len(), 2);
}

#[tokio::test]
async fn update_sends_only_changed_fields() {
    let backend = backend();
    backend.on("PUT", "/pets/10/medical-records/1", 200, json!({"id": 1}));
    let url = backend.start().await;
    let mut page = MedicalRecordsPage::new(client(&url));

    let update = MedicalRecordUpdate { description: Some("Booster".into()), ..MedicalRecordUpdate::default() };
    page.update(10, 1, &update).await.unwrap();

    let sent = backend.calls_to("PUT", "/pets/10/medical-records/1");
    assert_eq!(sent[0].json(), json!({"description": "Booster"}));
}

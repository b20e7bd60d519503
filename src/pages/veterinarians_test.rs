use super::*;
use crate::error::DashboardError;
use crate::models::ProfilePicture;
use crate::test_support::{MockBackend, client};
use serde_json::json;

fn form() -> VeterinarianForm {
    VeterinarianForm {
        name: " Dr. Tan ".into(),
        email: "tan@petpaw.my".into(),
        phone_number: "012-3456789".into(),
        specialization: "Surgery".into(),
        profile_picture: None,
    }
}

fn backend() -> MockBackend {
    let backend = MockBackend::new();
    backend.on("GET", "/veterinarians", 200, json!([{"id": 5, "name": "Dr. Tan"}, {"id": 6, "name": "Dr. Lim"}]));
    backend
}

#[tokio::test]
async fn reload_lists_roster() {
    let backend = backend();
    let url = backend.start().await;
    let mut page = VeterinariansPage::new(client(&url));

    page.reload().await.unwrap();

    let names: Vec<_> = page.veterinarians().iter().filter_map(|v| v.name.as_deref()).collect();
    assert_eq!(names, ["Dr. Tan", "Dr. Lim"]);
}

#[tokio::test]
async fn create_sends_trimmed_multipart_and_reloads() {
    let backend = backend();
    backend.on("POST", "/veterinarians", 200, json!({"id": 7, "name": "Dr. Tan"}));
    let url = backend.start().await;
    let mut page = VeterinariansPage::new(client(&url));

    let mut with_picture = form();
    with_picture.profile_picture =
        Some(ProfilePicture { file_name: "tan.png".into(), mime: "image/png".into(), bytes: vec![1, 2, 3] });
    let created = page.create(&with_picture).await.unwrap();

    assert_eq!(created.id, 7);
    let call = &backend.calls_to("POST", "/veterinarians")[0];
    assert!(call.content_type.starts_with("multipart/form-data"));
    assert!(call.body.contains("name=\"name\""));
    assert!(call.body.contains("Dr. Tan") && !call.body.contains(" Dr. Tan "));
    assert!(call.body.contains("filename=\"tan.png\""));
    assert_eq!(page.veterinarians().len(), 2);
}

#[tokio::test]
async fn blank_required_field_is_rejected_locally() {
    let backend = backend();
    let url = backend.start().await;
    let mut page = VeterinariansPage::new(client(&url));

    let mut missing = form();
    missing.specialization = "   ".into();
    let err = page.create(&missing).await.unwrap_err();

    assert!(matches!(err, DashboardError::Validation(ref m) if m == "Specialization is required"));
    assert!(backend.calls_to("POST", "/veterinarians").is_empty());
}

#[tokio::test]
async fn update_and_delete_target_the_vet() {
    let backend = backend();
    backend
        .on("PUT", "/veterinarians/5", 200, json!({"id": 5, "name": "Dr. Tan"}))
        .on_raw("DELETE", "/veterinarians/6", 204, "");
    let url = backend.start().await;
    let mut page = VeterinariansPage::new(client(&url));

    page.update(5, &form()).await.unwrap();
    page.delete(6).await.unwrap();

    assert_eq!(backend.calls_to("PUT", "/veterinarians/5").len(), 1);
    assert_eq!(backend.calls_to("DELETE", "/veterinarians/6").len(), 1);
    assert_eq!(backend.calls_to("GET", "/veterinarians").len(), 2);
}

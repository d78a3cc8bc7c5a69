use serde_json::json;
use servio_admin::auth::Role;
use servio_admin::editor::{AccountEditor, EditorMode, EditorStatus, ServiceEntry};
use servio_admin::error::Error;
use servio_admin::resources::types::{AccountDetail, City};

fn provider_detail() -> AccountDetail {
    serde_json::from_value(json!({
        "id": 12,
        "email": "pro@example.com",
        "role_id": 2,
        "contacts": [
            {"phone": "123", "email": "c@example.com"}
        ],
        "service_provider": {
            "business_name": "Sparkle Cleaning",
            "description": "We clean.",
            "alias": "sparkle",
            "start_time": "08:00",
            "stop_time": "17:00",
            "category": {"id": 4, "name": "Cleaning"},
            "service_category": {"id": 2, "name": "Home"},
            "rating": 4.5,
            "services": [
                {"description": "Windows", "price": 25.0},
                {"description": "Floors", "price": 40.0}
            ],
            "certifications": [
                {"name": "ISO", "description": "cert", "link": "https://example.com"}
            ],
            "projects": [],
            "workspaces": [
                {"id": 1, "city_id": 10},
                {"id": 2, "city_id": 11}
            ]
        }
    }))
    .unwrap()
}

fn cities() -> Vec<City> {
    serde_json::from_value(json!([
        {"id": 10, "name": "Oslo"},
        {"id": 11, "name": "Bergen"},
        {"id": 12, "name": "Trondheim"}
    ]))
    .unwrap()
}

#[test]
fn create_with_provider_role_and_empty_business_name_passes() {
    let mut editor = AccountEditor::create();
    editor.form.email = "new@example.com".to_string();
    editor.form.role = Some(Role::Provider);
    editor.form.password = "secret1".to_string();

    let payload = editor.try_submit().expect("provider fields are optional");
    assert_eq!(editor.status(), EditorStatus::Submitting);
    assert_eq!(payload.role_id, 2);
    assert_eq!(payload.business_name, None);
    // provider sections still present (empty) because the role is Provider
    assert_eq!(payload.services.map(|s| s.len()), Some(0));
}

#[test]
fn invalid_email_blocks_submission_and_names_the_field() {
    let mut editor = AccountEditor::create();
    editor.form.email = "not-an-email".to_string();
    editor.form.role = Some(Role::EndUser);
    editor.form.password = "secret1".to_string();

    assert!(editor.try_submit().is_none());
    assert_eq!(editor.status(), EditorStatus::ValidationError);
    assert!(editor.errors().iter().any(|e| e.field == "email"));
}

#[test]
fn short_password_blocks_creation() {
    let mut editor = AccountEditor::create();
    editor.form.email = "a@example.com".to_string();
    editor.form.role = Some(Role::EndUser);
    editor.form.password = "12345".to_string();

    assert!(editor.try_submit().is_none());
    assert!(editor.errors().iter().any(|e| e.field == "password"));
}

#[test]
fn blank_password_means_unchanged_on_edit() {
    let mut editor = AccountEditor::edit(12);
    editor.load(provider_detail(), cities());
    editor.form.password = String::new();

    let payload = editor.try_submit().expect("blank password is fine on edit");
    assert_eq!(payload.password, None);
}

#[test]
fn non_numeric_service_price_is_rejected_by_position() {
    let mut editor = AccountEditor::create();
    editor.form.email = "a@example.com".to_string();
    editor.form.role = Some(Role::Provider);
    editor.form.password = "secret1".to_string();
    editor.form.services.add(ServiceEntry {
        description: "ok".to_string(),
        price: "25".to_string(),
    });
    editor.form.services.add(ServiceEntry {
        description: "bad".to_string(),
        price: "cheap".to_string(),
    });

    assert!(editor.try_submit().is_none());
    assert!(editor
        .errors()
        .iter()
        .any(|e| e.field == "services[1].price"));
}

#[test]
fn removing_a_staged_service_keeps_the_rest_in_order() {
    let mut editor = AccountEditor::create();
    let services = &mut editor.form.services;
    let _a = services.add(ServiceEntry {
        description: "A".to_string(),
        price: String::new(),
    });
    let b = services.add(ServiceEntry {
        description: "B".to_string(),
        price: String::new(),
    });
    let _c = services.add(ServiceEntry {
        description: "C".to_string(),
        price: String::new(),
    });

    assert!(services.remove(b));
    let order: Vec<&str> = services.items().map(|s| s.description.as_str()).collect();
    assert_eq!(order, vec!["A", "C"]);

    services.add(ServiceEntry {
        description: "D".to_string(),
        price: String::new(),
    });
    let order: Vec<&str> = services.items().map(|s| s.description.as_str()).collect();
    assert_eq!(order, vec!["A", "C", "D"]);
}

#[test]
fn load_populates_provider_sections_and_workspace_ids() {
    let mut editor = AccountEditor::edit(12);
    editor.begin_load();
    assert_eq!(editor.status(), EditorStatus::Loading);

    editor.load(provider_detail(), cities());
    assert_eq!(editor.status(), EditorStatus::Ready);
    assert_eq!(editor.form.email, "pro@example.com");
    assert_eq!(editor.form.business_name, "Sparkle Cleaning");
    assert_eq!(editor.form.category_id, "4");
    assert_eq!(editor.form.services.len(), 2);
    assert_eq!(editor.form.contacts.len(), 1);
    assert!(editor.form.workspaces.contains(&10));
    assert!(editor.form.workspaces.contains(&11));
    assert_eq!(editor.cities().len(), 3);
}

#[test]
fn demoted_role_never_submits_provider_fields() {
    let mut editor = AccountEditor::edit(12);
    editor.load(provider_detail(), cities());

    // provider data is staged; switching the role to EndUser in the same
    // session must strip it all from the payload
    editor.form.role = Some(Role::EndUser);
    let payload = editor.try_submit().unwrap();

    let value = serde_json::to_value(&payload).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.get("role_id"), Some(&json!(3)));
    for key in [
        "business_name",
        "services",
        "workspaces",
        "certifications",
        "projects",
        "category_id",
    ] {
        assert!(!object.contains_key(key), "{} leaked into the payload", key);
    }
    // contacts belong to every role
    assert!(object.contains_key("contacts"));
}

#[test]
fn workspace_toggle_mirrors_into_the_submitted_id_list() {
    let mut editor = AccountEditor::edit(12);
    editor.load(provider_detail(), cities());

    editor.toggle_workspace(12); // select
    editor.toggle_workspace(10); // deselect
    let payload = editor.try_submit().unwrap();
    assert_eq!(payload.workspaces, Some(vec![11, 12]));
}

#[test]
fn successful_edit_reloads_and_clears_the_password() {
    let mut editor = AccountEditor::edit(12);
    editor.load(provider_detail(), cities());
    editor.form.password = "newpass".to_string();

    let _payload = editor.try_submit().unwrap();
    editor.submit_succeeded(provider_detail());

    assert_eq!(editor.status(), EditorStatus::Saved);
    assert_eq!(editor.form.password, "");
    assert_eq!(editor.banner(), Some("User updated successfully!"));
    assert!(!editor.should_return_to_list());
    // reference cities survive the reload
    assert_eq!(editor.cities().len(), 3);
}

#[test]
fn successful_create_returns_to_the_list() {
    let mut editor = AccountEditor::create();
    editor.form.email = "new@example.com".to_string();
    editor.form.role = Some(Role::EndUser);
    editor.form.password = "secret1".to_string();

    let _payload = editor.try_submit().unwrap();
    editor.submit_succeeded(provider_detail());
    assert_eq!(editor.mode(), EditorMode::Create);
    assert!(editor.should_return_to_list());
}

#[test]
fn failed_submit_surfaces_the_server_message() {
    let mut editor = AccountEditor::edit(12);
    editor.load(provider_detail(), cities());

    let _payload = editor.try_submit().unwrap();
    editor.submit_failed(&Error::server(422, "The email has already been taken."));

    assert_eq!(editor.status(), EditorStatus::NetworkError);
    assert_eq!(editor.error(), Some("The email has already been taken."));
}

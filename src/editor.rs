//! Headless account editor: staged form state, repeatable sub-collections,
//! client-side validation, and payload construction.
//!
//! Repeatable sections (services, contacts, certifications, projects) are
//! kept in a [`StagedList`], which assigns each entry a stable local id at
//! add time. Removal and update address entries by id, not position, so
//! deleting the middle of a list cannot redirect a pending edit to the
//! wrong row. Ids never reach the wire; payloads are positional arrays.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::auth::Role;
use crate::error::Error;
use crate::resources::types::{AccountDetail, City};

/// Stable local identifier for a staged entry. Only meaningful within the
/// `StagedList` that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StagedId(u32);

/// Ordered collection of staged entries with stable ids.
#[derive(Debug, Clone)]
pub struct StagedList<T> {
    next_id: u32,
    entries: Vec<(StagedId, T)>,
}

impl<T> Default for StagedList<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<T> StagedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage existing items, assigning each an id.
    pub fn from_items(items: impl IntoIterator<Item = T>) -> Self {
        let mut list = Self::new();
        for item in items {
            list.add(item);
        }
        list
    }

    /// Append an entry at the end, regardless of prior removals.
    pub fn add(&mut self, item: T) -> StagedId {
        let id = StagedId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, item));
        id
    }

    /// Remove an entry by id. Returns whether it existed.
    pub fn remove(&mut self, id: StagedId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn get(&self, id: StagedId) -> Option<&T> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, item)| item)
    }

    pub fn get_mut(&mut self, id: StagedId) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, item)| item)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in stage order, with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (StagedId, &T)> {
        self.entries.iter().map(|(id, item)| (*id, item))
    }

    /// Entries in stage order, ids stripped.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, item)| item)
    }
}

/// Staged service row (price kept as raw input until validation)
#[derive(Debug, Clone, Default)]
pub struct ServiceEntry {
    pub description: String,
    pub price: String,
}

/// Staged certification row
#[derive(Debug, Clone, Default)]
pub struct CertificationEntry {
    pub name: String,
    pub description: String,
    pub link: String,
}

/// Staged project row
#[derive(Debug, Clone, Default)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub link: String,
}

/// Staged contact row
#[derive(Debug, Clone, Default)]
pub struct ContactEntry {
    pub phone: String,
    pub email: String,
    pub address: String,
    pub website: String,
    pub facebook: String,
    pub instagram: String,
}

/// The full staged form. Provider fields are always editable in memory;
/// whether they reach the wire is decided by the role at payload time.
#[derive(Debug, Clone, Default)]
pub struct AccountForm {
    pub email: String,
    pub role: Option<Role>,
    pub password: String,
    pub business_name: String,
    pub description: String,
    pub alias: String,
    pub category_id: String,
    pub service_category_id: String,
    pub start_time: String,
    pub stop_time: String,
    pub services: StagedList<ServiceEntry>,
    pub certifications: StagedList<CertificationEntry>,
    pub projects: StagedList<ProjectEntry>,
    pub contacts: StagedList<ContactEntry>,
    /// Selected city ids, mirroring the multi-select widget
    pub workspaces: BTreeSet<i64>,
}

/// One validation failure, scoped to the offending field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Whether the editor creates a new account or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(i64),
}

/// Editor lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorStatus {
    Idle,
    Loading,
    Ready,
    Submitting,
    Saved,
    ValidationError,
    NetworkError,
}

/// Account/provider record editor.
///
/// The fetch-populate-submit cycle is driven from outside: the caller
/// fetches the record and reference lists, hands them to [`load`](Self::load),
/// asks [`try_submit`](Self::try_submit) for a payload, performs the network
/// call, and reports back with [`submit_succeeded`](Self::submit_succeeded)
/// or [`submit_failed`](Self::submit_failed).
#[derive(Debug)]
pub struct AccountEditor {
    mode: EditorMode,
    status: EditorStatus,
    pub form: AccountForm,
    errors: Vec<FieldError>,
    banner: Option<String>,
    error: Option<String>,
    cities: Vec<City>,
}

impl AccountEditor {
    /// Editor for a new account. Create mode is immediately ready.
    pub fn create() -> Self {
        Self {
            mode: EditorMode::Create,
            status: EditorStatus::Ready,
            form: AccountForm::default(),
            errors: Vec::new(),
            banner: None,
            error: None,
            cities: Vec::new(),
        }
    }

    /// Editor for an existing account; starts idle until the record loads.
    pub fn edit(id: i64) -> Self {
        Self {
            mode: EditorMode::Edit(id),
            status: EditorStatus::Idle,
            form: AccountForm::default(),
            errors: Vec::new(),
            banner: None,
            error: None,
            cities: Vec::new(),
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn status(&self) -> EditorStatus {
        self.status
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Transient success banner, if a save just completed
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Submission error message, if the last submit failed
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Reference city list for the workspace picker
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Mark the record fetch as started.
    pub fn begin_load(&mut self) {
        self.status = EditorStatus::Loading;
    }

    /// Populate the form from a fetched record plus its reference cities.
    ///
    /// Provider fields are only staged when the record's role is Provider,
    /// mirroring what the server actually stores.
    pub fn load(&mut self, detail: AccountDetail, cities: Vec<City>) {
        let mut form = AccountForm {
            email: detail.email,
            role: Some(detail.role),
            ..AccountForm::default()
        };

        form.contacts = StagedList::from_items(detail.contacts.into_iter().map(|c| ContactEntry {
            phone: c.phone.unwrap_or_default(),
            email: c.email.unwrap_or_default(),
            address: c.address.unwrap_or_default(),
            website: c.website.unwrap_or_default(),
            facebook: c.facebook.unwrap_or_default(),
            instagram: c.instagram.unwrap_or_default(),
        }));

        if detail.role == Role::Provider {
            if let Some(sp) = detail.service_provider {
                form.business_name = sp.business_name.unwrap_or_default();
                form.description = sp.description.unwrap_or_default();
                form.alias = sp.alias.unwrap_or_default();
                form.start_time = sp.start_time.unwrap_or_default();
                form.stop_time = sp.stop_time.unwrap_or_default();
                form.category_id = sp
                    .category
                    .map(|c| c.id.to_string())
                    .unwrap_or_default();
                form.service_category_id = sp
                    .service_category
                    .map(|c| c.id.to_string())
                    .unwrap_or_default();
                form.services =
                    StagedList::from_items(sp.services.into_iter().map(|s| ServiceEntry {
                        description: s.description.unwrap_or_default(),
                        price: s.price.map(|p| p.to_string()).unwrap_or_default(),
                    }));
                form.certifications = StagedList::from_items(sp.certifications.into_iter().map(
                    |c| CertificationEntry {
                        name: c.name.unwrap_or_default(),
                        description: c.description.unwrap_or_default(),
                        link: c.link.unwrap_or_default(),
                    },
                ));
                form.projects =
                    StagedList::from_items(sp.projects.into_iter().map(|p| ProjectEntry {
                        name: p.name.unwrap_or_default(),
                        description: p.description.unwrap_or_default(),
                        link: p.link.unwrap_or_default(),
                    }));
                form.workspaces = sp
                    .workspaces
                    .into_iter()
                    .filter_map(|w| w.city_id)
                    .collect();
            }
        }

        self.form = form;
        self.cities = cities;
        self.status = EditorStatus::Ready;
    }

    /// Toggle a city in the workspace selection (multi-select mirror).
    pub fn toggle_workspace(&mut self, city_id: i64) {
        if !self.form.workspaces.insert(city_id) {
            self.form.workspaces.remove(&city_id);
        }
    }

    /// Validate the staged form, recording field-scoped errors.
    pub fn validate(&mut self) -> bool {
        let mut errors = Vec::new();
        let form = &self.form;

        if form.email.is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
        } else if !is_well_formed_email(&form.email) {
            errors.push(FieldError::new("email", "Invalid email"));
        }

        if form.role.is_none() {
            errors.push(FieldError::new("role_id", "Role is required"));
        }

        match self.mode {
            EditorMode::Create => {
                if form.password.is_empty() {
                    errors.push(FieldError::new("password", "Password is required"));
                } else if form.password.len() < 6 {
                    errors.push(FieldError::new(
                        "password",
                        "Password must be at least 6 characters",
                    ));
                }
            }
            EditorMode::Edit(_) => {
                // blank means unchanged
                if !form.password.is_empty() && form.password.len() < 6 {
                    errors.push(FieldError::new(
                        "password",
                        "Password must be at least 6 characters",
                    ));
                }
            }
        }

        for (field, value) in [
            ("category_id", &form.category_id),
            ("service_category_id", &form.service_category_id),
        ] {
            if !value.is_empty() && value.parse::<i64>().is_err() {
                errors.push(FieldError::new(field, "Must be a number"));
            }
        }

        for (position, (_, service)) in form.services.iter().enumerate() {
            if !service.price.is_empty() && service.price.parse::<f64>().is_err() {
                errors.push(FieldError::new(
                    format!("services[{}].price", position),
                    "Must be a number",
                ));
            }
        }

        self.errors = errors;
        self.errors.is_empty()
    }

    /// Validate and, if clean, hand back the payload to submit. Validation
    /// failures block submission entirely; no network call should be made.
    pub fn try_submit(&mut self) -> Option<AccountPayload> {
        self.banner = None;
        self.error = None;
        if !self.validate() {
            self.status = EditorStatus::ValidationError;
            return None;
        }
        self.status = EditorStatus::Submitting;
        Some(self.payload())
    }

    /// Record a successful save. Edit mode stays on the record with the
    /// saved copy reloaded and the password cleared; create mode signals
    /// navigation back to the list.
    pub fn submit_succeeded(&mut self, saved: AccountDetail) {
        self.status = EditorStatus::Saved;
        match self.mode {
            EditorMode::Create => {
                self.banner = Some("User created successfully!".to_string());
            }
            EditorMode::Edit(_) => {
                self.banner = Some("User updated successfully!".to_string());
                let cities = std::mem::take(&mut self.cities);
                self.load(saved, cities);
                self.status = EditorStatus::Saved;
                self.form.password.clear();
            }
        }
    }

    /// Record a failed save with the server's message (or a generic one).
    pub fn submit_failed(&mut self, err: &Error) {
        self.status = EditorStatus::NetworkError;
        self.error = Some(err.user_message());
    }

    /// After a successful create, the view returns to the list.
    pub fn should_return_to_list(&self) -> bool {
        self.mode == EditorMode::Create && self.status == EditorStatus::Saved
    }

    /// Build the full form payload (not a diff).
    ///
    /// Provider fields and nested provider collections are emitted only
    /// when the current role is Provider, even if they were staged while
    /// the role was temporarily something else.
    pub fn payload(&self) -> AccountPayload {
        let form = &self.form;
        let role = form.role.unwrap_or(Role::EndUser);

        let mut payload = AccountPayload {
            email: form.email.clone(),
            role_id: role.id(),
            password: opt(&form.password),
            contacts: form
                .contacts
                .items()
                .map(|c| ContactPayload {
                    phone: opt(&c.phone),
                    email: opt(&c.email),
                    address: opt(&c.address),
                    website: opt(&c.website),
                    facebook: opt(&c.facebook),
                    instagram: opt(&c.instagram),
                })
                .collect(),
            business_name: None,
            description: None,
            alias: None,
            category_id: None,
            service_category_id: None,
            start_time: None,
            stop_time: None,
            services: None,
            certifications: None,
            projects: None,
            workspaces: None,
        };

        if role == Role::Provider {
            payload.business_name = opt(&form.business_name);
            payload.description = opt(&form.description);
            payload.alias = opt(&form.alias);
            payload.category_id = form.category_id.parse().ok();
            payload.service_category_id = form.service_category_id.parse().ok();
            payload.start_time = opt(&form.start_time);
            payload.stop_time = opt(&form.stop_time);
            payload.services = Some(
                form.services
                    .items()
                    .map(|s| ServicePayload {
                        description: opt(&s.description),
                        price: s.price.parse().ok(),
                    })
                    .collect(),
            );
            payload.certifications = Some(
                form.certifications
                    .items()
                    .map(|c| LinkedItemPayload {
                        name: opt(&c.name),
                        description: opt(&c.description),
                        link: opt(&c.link),
                    })
                    .collect(),
            );
            payload.projects = Some(
                form.projects
                    .items()
                    .map(|p| LinkedItemPayload {
                        name: opt(&p.name),
                        description: opt(&p.description),
                        link: opt(&p.link),
                    })
                    .collect(),
            );
            payload.workspaces = Some(form.workspaces.iter().copied().collect());
        }

        payload
    }
}

fn opt(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Minimal well-formedness check: one `@`, non-empty local part, and a
/// dotted domain without whitespace.
fn is_well_formed_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    let mut labels = domain.split('.');
    labels.clone().count() >= 2 && labels.all(|label| !label.is_empty())
}

/// Submission body for account create/update
#[derive(Debug, Clone, Serialize)]
pub struct AccountPayload {
    pub email: String,
    pub role_id: u8,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    pub contacts: Vec<ContactPayload>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_category_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<ServicePayload>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<LinkedItemPayload>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<LinkedItemPayload>>,

    /// City ids only; assignment rows are rebuilt server-side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspaces: Option<Vec<i64>>,
}

/// Positional service row as submitted
#[derive(Debug, Clone, Serialize)]
pub struct ServicePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// Certification/project row as submitted (same shape for both)
#[derive(Debug, Clone, Serialize)]
pub struct LinkedItemPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Contact row as submitted
#[derive(Debug, Clone, Serialize)]
pub struct ContactPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

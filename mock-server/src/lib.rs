//! In-memory imitation of the lexoffice endpoints used by `lexoffice-core`.
//!
//! Routes live under `/v1` and require `Authorization: Bearer <key>`.
//! Error bodies follow the shapes the real API sends: `{status, error,
//! message}` on current endpoints and an `IssueList` for contact validation.
//! DTOs are defined here independently from the client crate; the client's
//! integration tests catch schema drift.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Multipart, Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const DEFAULT_API_KEY: &str = "test-key";
pub const MOCK_USER_EMAIL: &str = "buchhaltung@mock.lexoffice.test";

const DEFAULT_PAGE_SIZE: usize = 25;
const MAX_PAGE_SIZE: usize = 250;

const VOUCHER_TYPES: &[&str] = &[
    "salesinvoice",
    "salescreditnote",
    "purchaseinvoice",
    "purchasecreditnote",
    "invoice",
    "downpaymentinvoice",
    "creditnote",
    "orderconfirmation",
    "quotation",
    "deliverynote",
];

/// Types accepted by `POST /vouchers` (bookkeeping vouchers).
const BOOKKEEPING_TYPES: &[&str] = &["salesinvoice", "salescreditnote", "purchaseinvoice", "purchasecreditnote"];

const VOUCHER_STATUSES: &[&str] = &[
    "draft",
    "open",
    "paid",
    "paidoff",
    "voided",
    "transferred",
    "sepadebit",
    "overdue",
    "accepted",
    "rejected",
];

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherEntry {
    pub id: Uuid,
    pub voucher_type: String,
    pub voucher_status: String,
    pub voucher_number: Option<String>,
    pub voucher_date: String,
    pub created_date: String,
    pub updated_date: String,
    pub due_date: Option<String>,
    pub contact_id: Option<Uuid>,
    pub contact_name: Option<String>,
    pub total_amount: f64,
    pub open_amount: f64,
    pub currency: String,
    pub archived: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub version: i64,
    pub roles: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub archived: bool,
}

impl Contact {
    fn display_name(&self) -> String {
        if let Some(name) = self.company.as_ref().and_then(|c| c["name"].as_str()) {
            return name.to_string();
        }
        let person = self.person.as_ref();
        let part = |key: &str| person.and_then(|p| p[key].as_str()).unwrap_or("").trim().to_string();
        format!("{} {}", part("firstName"), part("lastName")).trim().to_string()
    }

    fn has_role(&self, role: &str) -> bool {
        self.roles.get(role).is_some_and(|v| !v.is_null())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredFile {
    pub id: Uuid,
    pub file_name: String,
    pub content_type: Option<String>,
    pub size: usize,
    pub voucher_id: Option<Uuid>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVoucher {
    #[serde(rename = "type")]
    pub voucher_type: String,
    pub voucher_number: String,
    pub voucher_date: String,
    pub due_date: Option<String>,
    pub total_gross_amount: f64,
    pub total_tax_amount: f64,
    pub tax_type: String,
    #[serde(default)]
    pub use_collective_contact: bool,
    pub contact_id: Option<Uuid>,
    #[serde(default)]
    pub voucher_items: Vec<Value>,
}

#[derive(Deserialize)]
pub struct NewContact {
    #[serde(default)]
    pub roles: Value,
    pub company: Option<Value>,
    pub person: Option<Value>,
    pub email: Option<String>,
    #[serde(default)]
    pub version: i64,
}

#[derive(Default)]
struct Store {
    vouchers: Vec<VoucherEntry>,
    invoices: HashMap<Uuid, Value>,
    files: Vec<StoredFile>,
    contacts: Vec<Contact>,
}

/// Shared server state: the accepted API key and the in-memory store.
#[derive(Clone)]
pub struct AppState {
    api_key: Arc<str>,
    organization_id: Uuid,
    store: Arc<RwLock<Store>>,
}

impl AppState {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: Arc::from(api_key),
            organization_id: Uuid::new_v4(),
            store: Arc::new(RwLock::new(Store::default())),
        }
    }

    pub fn organization_id(&self) -> Uuid {
        self.organization_id
    }

    /// Make an invoice document available under `GET /v1/invoices/{id}`.
    /// Returns `None` if the document has no valid `id`.
    pub async fn insert_invoice(&self, invoice: Value) -> Option<Uuid> {
        let id = invoice.get("id")?.as_str()?.parse().ok()?;
        self.store.write().await.invoices.insert(id, invoice);
        Some(id)
    }

    pub async fn insert_voucher(&self, voucher: VoucherEntry) {
        self.store.write().await.vouchers.push(voucher);
    }

    pub async fn files(&self) -> Vec<StoredFile> {
        self.store.read().await.files.clone()
    }

    pub async fn contacts(&self) -> Vec<Contact> {
        self.store.read().await.contacts.clone()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_API_KEY)
    }
}

pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .route("/ping", get(ping))
        .route("/voucherlist", get(voucher_list))
        .route("/invoices/{id}", get(get_invoice))
        .route("/files", post(upload_file))
        .route("/vouchers", post(create_voucher))
        .route("/vouchers/{id}/files", post(attach_voucher_file))
        .route("/contacts", get(search_contacts).post(create_contact))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer))
        .with_state(state);
    Router::new().nest("/v1", api)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

async fn require_bearer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let expected = format!("Bearer {}", state.api_key);
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Unauthorized"}))).into_response();
    }
    next.run(request).await
}

fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    let body = json!({
        "status": status.as_u16(),
        "error": status.canonical_reason().unwrap_or("Error"),
        "message": message.into(),
    });
    (status, Json(body)).into_response()
}

fn issue_list(i18n_key: &str, source: &str) -> Response {
    let body = json!({
        "requestId": Uuid::new_v4(),
        "IssueList": [{"i18nKey": i18n_key, "source": source, "type": "validation_failure"}],
    });
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

fn timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string()
}

fn created(id: Uuid, collection: &str, version: i64) -> Value {
    let now = timestamp();
    json!({
        "id": id,
        "resourceUri": format!("https://api.lexoffice.io/v1/{collection}/{id}"),
        "createdDate": now,
        "updatedDate": now,
        "version": version,
    })
}

/// Slice `items` into the requested page and wrap it with lexoffice's
/// pagination metadata.
fn page_of<T: Serialize>(items: &[T], page: usize, size: usize) -> Value {
    let total = items.len();
    let total_pages = total.div_ceil(size);
    let content: Vec<&T> = items.iter().skip(page.saturating_mul(size)).take(size).collect();
    json!({
        "content": content,
        "first": page == 0,
        "last": page.saturating_add(1) >= total_pages,
        "totalPages": total_pages,
        "totalElements": total,
        "numberOfElements": content.len(),
        "size": size,
        "number": page,
        "sort": [],
    })
}

fn paging(params: &HashMap<String, String>) -> Result<(usize, usize), Response> {
    let page = match params.get("page") {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| api_error(StatusCode::BAD_REQUEST, format!("invalid page '{raw}'")))?,
        None => 0,
    };
    let size = match params.get("size") {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| api_error(StatusCode::BAD_REQUEST, format!("invalid size '{raw}'")))?,
        None => DEFAULT_PAGE_SIZE,
    };
    if size == 0 {
        return Err(api_error(StatusCode::BAD_REQUEST, "size must be positive"));
    }
    Ok((page, size.min(MAX_PAGE_SIZE)))
}

async fn ping(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "organizationId": state.organization_id,
        "userId": Uuid::nil(),
        "userEmail": MOCK_USER_EMAIL,
        "applicationName": "mock-server",
    }))
}

async fn voucher_list(State(state): State<AppState>, Query(params): Query<HashMap<String, String>>) -> Response {
    let Some(types) = params.get("voucherType") else {
        return api_error(StatusCode::BAD_REQUEST, "Required parameter 'voucherType' is missing");
    };
    let Some(statuses) = params.get("voucherStatus") else {
        return api_error(StatusCode::BAD_REQUEST, "Required parameter 'voucherStatus' is missing");
    };

    let types: Vec<&str> = types.split(',').map(str::trim).collect();
    if let Some(bad) = types.iter().find(|t| !VOUCHER_TYPES.contains(t)) {
        return api_error(StatusCode::BAD_REQUEST, format!("Unknown voucherType '{bad}'"));
    }
    let statuses: Option<Vec<&str>> = match statuses.as_str() {
        "any" => None,
        list => Some(list.split(',').map(str::trim).collect()),
    };
    if let Some(bad) = statuses
        .iter()
        .flatten()
        .find(|s| !VOUCHER_STATUSES.contains(s))
    {
        return api_error(StatusCode::BAD_REQUEST, format!("Unknown voucherStatus '{bad}'"));
    }
    let (page, size) = match paging(&params) {
        Ok(paging) => paging,
        Err(response) => return response,
    };

    let store = state.store.read().await;
    let matching: Vec<&VoucherEntry> = store
        .vouchers
        .iter()
        .filter(|v| types.contains(&v.voucher_type.as_str()))
        .filter(|v| {
            statuses
                .as_ref()
                .is_none_or(|wanted| wanted.contains(&v.voucher_status.as_str()))
        })
        .collect();
    Json(page_of(&matching, page, size)).into_response()
}

async fn get_invoice(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Ok(id) = id.parse::<Uuid>() else {
        return api_error(StatusCode::BAD_REQUEST, format!("'{id}' is not a valid id"));
    };
    match state.store.read().await.invoices.get(&id) {
        Some(invoice) => Json(invoice.clone()).into_response(),
        None => api_error(StatusCode::NOT_FOUND, format!("Invoice {id} not found")),
    }
}

struct ReceivedFile {
    file_name: String,
    content_type: Option<String>,
    size: usize,
}

/// Collect the `file` part and any text parts of a multipart body.
async fn read_multipart(mut multipart: Multipart) -> Result<(Option<ReceivedFile>, HashMap<String, String>), Response> {
    let mut file = None;
    let mut fields = HashMap::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.body_text()))?;
            file = Some(ReceivedFile {
                file_name,
                content_type,
                size: bytes.len(),
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.body_text()))?;
            fields.insert(name, value);
        }
    }
    Ok((file, fields))
}

async fn upload_file(State(state): State<AppState>, multipart: Multipart) -> Response {
    let (file, fields) = match read_multipart(multipart).await {
        Ok(parts) => parts,
        Err(response) => return response,
    };
    let Some(file) = file else {
        return api_error(StatusCode::BAD_REQUEST, "Missing multipart part 'file'");
    };
    if fields.get("type").map(String::as_str) != Some("voucher") {
        return api_error(StatusCode::BAD_REQUEST, "Form field 'type' must be 'voucher'");
    }

    let id = Uuid::new_v4();
    tracing::info!(%id, file_name = %file.file_name, size = file.size, "stored file");
    state.store.write().await.files.push(StoredFile {
        id,
        file_name: file.file_name,
        content_type: file.content_type,
        size: file.size,
        voucher_id: None,
    });
    (StatusCode::ACCEPTED, Json(json!({"id": id}))).into_response()
}

async fn create_voucher(State(state): State<AppState>, Json(input): Json<NewVoucher>) -> Response {
    if !BOOKKEEPING_TYPES.contains(&input.voucher_type.as_str()) {
        return api_error(
            StatusCode::BAD_REQUEST,
            format!("Unsupported voucher type '{}'", input.voucher_type),
        );
    }
    if !matches!(input.tax_type.as_str(), "net" | "gross") {
        return api_error(StatusCode::BAD_REQUEST, format!("Unknown taxType '{}'", input.tax_type));
    }
    if input.contact_id.is_none() && !input.use_collective_contact {
        return api_error(
            StatusCode::BAD_REQUEST,
            "contactId is required unless useCollectiveContact is set",
        );
    }
    if input.voucher_items.is_empty() {
        return api_error(StatusCode::BAD_REQUEST, "voucherItems must not be empty");
    }

    let mut store = state.store.write().await;
    let duplicate = store
        .vouchers
        .iter()
        .any(|v| v.voucher_type == input.voucher_type && v.voucher_number.as_deref() == Some(input.voucher_number.as_str()));
    if duplicate {
        return api_error(
            StatusCode::BAD_REQUEST,
            format!("voucherNumber '{}' already exists", input.voucher_number),
        );
    }

    let contact_name = input
        .contact_id
        .and_then(|id| store.contacts.iter().find(|c| c.id == id))
        .map(Contact::display_name);
    let id = Uuid::new_v4();
    let now = timestamp();
    store.vouchers.push(VoucherEntry {
        id,
        voucher_type: input.voucher_type,
        voucher_status: "open".to_string(),
        voucher_number: Some(input.voucher_number),
        voucher_date: format!("{}T00:00:00.000+01:00", input.voucher_date),
        created_date: now.clone(),
        updated_date: now,
        due_date: input.due_date.map(|d| format!("{d}T00:00:00.000+01:00")),
        contact_id: input.contact_id,
        contact_name,
        total_amount: input.total_gross_amount,
        open_amount: input.total_gross_amount,
        currency: "EUR".to_string(),
        archived: false,
    });
    tracing::info!(%id, tax = input.total_tax_amount, "created voucher");
    Json(created(id, "vouchers", 1)).into_response()
}

async fn attach_voucher_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Response {
    let Ok(voucher_id) = id.parse::<Uuid>() else {
        return api_error(StatusCode::BAD_REQUEST, format!("'{id}' is not a valid id"));
    };
    if !state.store.read().await.vouchers.iter().any(|v| v.id == voucher_id) {
        return api_error(StatusCode::NOT_FOUND, format!("Voucher {voucher_id} not found"));
    }
    let file = match read_multipart(multipart).await {
        Ok((Some(file), _)) => file,
        Ok((None, _)) => return api_error(StatusCode::BAD_REQUEST, "Missing multipart part 'file'"),
        Err(response) => return response,
    };

    let file_id = Uuid::new_v4();
    tracing::info!(%voucher_id, %file_id, file_name = %file.file_name, "attached file");
    state.store.write().await.files.push(StoredFile {
        id: file_id,
        file_name: file.file_name,
        content_type: file.content_type,
        size: file.size,
        voucher_id: Some(voucher_id),
    });
    (StatusCode::ACCEPTED, Json(json!({"id": file_id}))).into_response()
}

async fn search_contacts(State(state): State<AppState>, Query(params): Query<HashMap<String, String>>) -> Response {
    let (page, size) = match paging(&params) {
        Ok(paging) => paging,
        Err(response) => return response,
    };
    let name = params.get("name").map(|n| n.to_lowercase());
    let wants = |role: &str| params.get(role).is_some_and(|v| v == "true");

    let store = state.store.read().await;
    let matching: Vec<&Contact> = store
        .contacts
        .iter()
        .filter(|c| {
            name.as_ref()
                .is_none_or(|n| c.display_name().to_lowercase().contains(n.as_str()))
        })
        .filter(|c| !wants("customer") || c.has_role("customer"))
        .filter(|c| !wants("vendor") || c.has_role("vendor"))
        .collect();
    Json(page_of(&matching, page, size)).into_response()
}

async fn create_contact(State(state): State<AppState>, Json(input): Json<NewContact>) -> Response {
    let company = input.company.filter(|v| !v.is_null());
    let person = input.person.filter(|v| !v.is_null());
    if company.is_some() == person.is_some() {
        return issue_list("missing_entity", "company and person");
    }
    let has_role = ["customer", "vendor"]
        .iter()
        .any(|r| input.roles.get(r).is_some_and(|v| v.is_object()));
    if !has_role {
        return issue_list("missing_entity", "roles");
    }

    let contact = Contact {
        id: Uuid::new_v4(),
        version: input.version,
        roles: input.roles,
        company,
        person,
        email: input.email,
        archived: false,
    };
    let body = created(contact.id, "contacts", contact.version);
    tracing::info!(id = %contact.id, name = %contact.display_name(), "created contact");
    state.store.write().await.contacts.push(contact);
    Json(body).into_response()
}

//! Stateless HTTP request builder and response parser for the lexoffice API.
//!
//! # Design
//! `LexofficeApi` holds only an immutable `ClientConfig`. Each operation is
//! split into a `build_*` method that produces an `HttpRequest` and a
//! `parse_*` method that consumes an `HttpResponse`. Authorization and
//! content headers are assembled per request; nothing is mutated between
//! calls. Every non-expected status becomes `ApiError::Api`, whichever
//! endpoint produced it.

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{ApiError, Endpoint};
use crate::http::{FormPart, HttpMethod, HttpRequest, HttpResponse, RequestBody};
use crate::requests::{NewContact, NewVoucher, VoucherListQuery};
use crate::types::{ContactList, ContactRoles, Invoice, Ping, ResourceRef, VoucherList};
use crate::upload::UploadFile;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoucherListParams<'a> {
    voucher_type: &'a str,
    voucher_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u32>,
}

#[derive(Serialize)]
struct ContactSearchParams<'a> {
    name: &'a str,
    customer: bool,
    vendor: bool,
}

/// Synchronous, stateless request builder and response parser.
#[derive(Debug)]
pub struct LexofficeApi {
    config: ClientConfig,
}

impl LexofficeApi {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url())
    }

    fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("Authorization".to_string(), self.config.authorization()),
            ("Accept".to_string(), "application/json".to_string()),
        ]
    }

    fn get(&self, url: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: self.headers(),
            body: None,
        }
    }

    fn post_json<T: Serialize>(&self, url: String, body: &T) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_vec(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let mut headers = self.headers();
        headers.push(("Content-Type".to_string(), "application/json".to_string()));
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url,
            headers,
            body: Some(RequestBody::Json(body)),
        })
    }

    /// The transport adds `Content-Type` with the boundary it picks.
    fn post_multipart(&self, url: String, parts: Vec<FormPart>) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url,
            headers: self.headers(),
            body: Some(RequestBody::Multipart(parts)),
        }
    }

    // --- ping ---

    pub fn build_ping(&self) -> HttpRequest {
        self.get(self.url("/ping"))
    }

    /// `Some` with the account identity on 200, `None` on any other status.
    pub fn parse_ping(&self, response: HttpResponse) -> Result<Option<Ping>, ApiError> {
        if response.status != 200 {
            return Ok(None);
        }
        decode(&response).map(Some)
    }

    // --- voucher list ---

    pub fn build_voucher_list(&self, query: &VoucherListQuery) -> Result<HttpRequest, ApiError> {
        let params = VoucherListParams {
            voucher_type: query.voucher_type.as_str(),
            voucher_status: query.status_param(),
            page: query.page,
            size: query.size,
        };
        let query_string =
            serde_urlencoded::to_string(&params).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.get(self.url(&format!("/voucherlist?{query_string}"))))
    }

    pub fn parse_voucher_list(&self, response: HttpResponse) -> Result<VoucherList, ApiError> {
        check_status(&response, 200, Endpoint::VoucherList)?;
        decode(&response)
    }

    // --- invoices ---

    pub fn build_get_invoice(&self, id: Uuid) -> HttpRequest {
        self.get(self.url(&format!("/invoices/{id}")))
    }

    pub fn parse_get_invoice(&self, response: HttpResponse) -> Result<Invoice, ApiError> {
        check_status(&response, 200, Endpoint::Invoice)?;
        decode(&response)
    }

    // --- files ---

    pub fn build_upload_file(&self, file: UploadFile) -> HttpRequest {
        let parts = vec![FormPart::file("file", file), FormPart::text("type", "voucher")];
        self.post_multipart(self.url("/files"), parts)
    }

    /// Uploads are processed asynchronously; the server answers 202.
    pub fn parse_upload_file(&self, response: HttpResponse) -> Result<ResourceRef, ApiError> {
        check_status(&response, 202, Endpoint::Files)?;
        decode(&response)
    }

    // --- vouchers ---

    pub fn build_create_voucher(&self, voucher: &NewVoucher) -> Result<HttpRequest, ApiError> {
        self.post_json(self.url("/vouchers"), voucher)
    }

    pub fn parse_create_voucher(&self, response: HttpResponse) -> Result<ResourceRef, ApiError> {
        check_status(&response, 200, Endpoint::Vouchers)?;
        decode(&response)
    }

    pub fn build_attach_voucher_file(&self, voucher_id: Uuid, file: UploadFile) -> HttpRequest {
        let url = self.url(&format!("/vouchers/{voucher_id}/files"));
        self.post_multipart(url, vec![FormPart::file("file", file)])
    }

    pub fn parse_attach_voucher_file(&self, response: HttpResponse) -> Result<ResourceRef, ApiError> {
        check_status(&response, 202, Endpoint::VoucherFiles)?;
        decode(&response)
    }

    // --- contacts ---

    pub fn build_search_contacts(&self, name: &str, roles: ContactRoles) -> Result<HttpRequest, ApiError> {
        let params = ContactSearchParams {
            name,
            customer: roles.customer,
            vendor: roles.vendor,
        };
        let query_string =
            serde_urlencoded::to_string(&params).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.get(self.url(&format!("/contacts?{query_string}"))))
    }

    pub fn parse_search_contacts(&self, response: HttpResponse) -> Result<ContactList, ApiError> {
        check_status(&response, 200, Endpoint::ContactSearch)?;
        decode(&response)
    }

    pub fn build_create_contact(&self, contact: &NewContact) -> Result<HttpRequest, ApiError> {
        self.post_json(self.url("/contacts"), contact)
    }

    pub fn parse_create_contact(&self, response: HttpResponse) -> Result<ResourceRef, ApiError> {
        check_status(&response, 200, Endpoint::ContactCreate)?;
        decode(&response)
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map any status other than `expected` to `ApiError::Api`.
fn check_status(response: &HttpResponse, expected: u16, endpoint: Endpoint) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    Err(ApiError::Api {
        endpoint,
        status: response.status,
        message: error_message(&response.body),
    })
}

/// Extract a readable message from an error body.
///
/// Current endpoints answer `{"error": .., "message": ..}` or just
/// `{"message": ..}`; older ones send an `IssueList`. Anything else is
/// returned as raw text.
pub(crate) fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };
    let field = |name: &str| value.get(name).and_then(serde_json::Value::as_str);

    match (field("error"), field("message")) {
        (Some(error), Some(message)) => return format!("{error}: {message}"),
        (None, Some(message)) => return message.to_string(),
        _ => {}
    }

    if let Some(issues) = value.get("IssueList").and_then(serde_json::Value::as_array) {
        let rendered: Vec<String> = issues
            .iter()
            .map(|issue| {
                let part = |name: &str| issue.get(name).and_then(serde_json::Value::as_str).unwrap_or("");
                format!("{} {} ({})", part("type"), part("source"), part("i18nKey"))
                    .trim()
                    .to_string()
            })
            .collect();
        if !rendered.is_empty() {
            return rendered.join("; ");
        }
    }

    body.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requests::VoucherItem;
    use crate::types::{TaxType, VoucherStatus, VoucherType};
    use chrono::NaiveDate;

    fn api() -> LexofficeApi {
        LexofficeApi::new(ClientConfig::new("test-key").with_base_url("http://localhost:3000/v1"))
    }

    fn json_body(req: &HttpRequest) -> serde_json::Value {
        serde_json::from_slice(req.body.as_ref().and_then(RequestBody::as_json).unwrap()).unwrap()
    }

    #[test]
    fn every_request_is_authorized() {
        let req = api().build_ping();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/v1/ping");
        assert_eq!(req.header("authorization"), Some("Bearer test-key"));
        assert_eq!(req.header("accept"), Some("application/json"));
        assert_eq!(req.header("content-type"), None);
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_ping_success() {
        let body = r#"{"organizationId":"aa93e8a8-2aa3-470b-b914-caad8a255dd8","userId":"1aea3c4d-3bd7-4ec8-a3ef-3d4fd5a0eb27","userEmail":"buchhaltung@example.com","applicationName":"lexoffice"}"#;
        let ping = api().parse_ping(HttpResponse::new(200, body)).unwrap().unwrap();
        assert_eq!(ping.user_email, "buchhaltung@example.com");
        assert!(ping.organization_id.is_some());
    }

    #[test]
    fn parse_ping_failure_is_not_an_error() {
        let ping = api()
            .parse_ping(HttpResponse::new(401, r#"{"message":"Unauthorized"}"#))
            .unwrap();
        assert!(ping.is_none());
    }

    #[test]
    fn build_voucher_list_defaults_status_to_any() {
        let req = api()
            .build_voucher_list(&VoucherListQuery::new(VoucherType::SalesInvoice))
            .unwrap();
        assert_eq!(
            req.url,
            "http://localhost:3000/v1/voucherlist?voucherType=salesinvoice&voucherStatus=any"
        );
    }

    #[test]
    fn build_voucher_list_with_filters() {
        let query = VoucherListQuery::new(VoucherType::PurchaseInvoice)
            .with_statuses([VoucherStatus::Open, VoucherStatus::Paid])
            .with_page(2)
            .with_size(50);
        let req = api().build_voucher_list(&query).unwrap();
        assert_eq!(
            req.url,
            "http://localhost:3000/v1/voucherlist?voucherType=purchaseinvoice&voucherStatus=open%2Cpaid&page=2&size=50"
        );
    }

    #[test]
    fn parse_voucher_list_error_with_error_and_message() {
        let response = HttpResponse::new(
            400,
            r#"{"timestamp":"2023-05-10T12:00:00.000+02:00","status":400,"error":"Bad Request","path":"/v1/voucherlist","message":"Missing parameter voucherType"}"#,
        );
        let err = api().parse_voucher_list(response).unwrap_err();
        match err {
            ApiError::Api {
                endpoint,
                status,
                message,
            } => {
                assert_eq!(endpoint, Endpoint::VoucherList);
                assert_eq!(status, 400);
                assert_eq!(message, "Bad Request: Missing parameter voucherType");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_voucher_list_error_with_bare_message() {
        let err = api()
            .parse_voucher_list(HttpResponse::new(401, r#"{"message":"Unauthorized"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::Api { status: 401, ref message, .. } if message == "Unauthorized"));
    }

    #[test]
    fn build_get_invoice_request() {
        let req = api().build_get_invoice(Uuid::nil());
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.url,
            "http://localhost:3000/v1/invoices/00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn parse_get_invoice_not_found() {
        let response = HttpResponse::new(
            404,
            r#"{"status":404,"error":"Not Found","message":"Invoice does not exist"}"#,
        );
        let err = api().parse_get_invoice(response).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("Invoice does not exist"));
    }

    #[test]
    fn parse_get_invoice_bad_json() {
        let err = api().parse_get_invoice(HttpResponse::new(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn build_upload_file_is_multipart() {
        let file = UploadFile::new("RE-1001.pdf", b"%PDF".to_vec());
        let req = api().build_upload_file(file.clone());
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/v1/files");
        assert_eq!(req.header("authorization"), Some("Bearer test-key"));
        assert_eq!(req.header("content-type"), None);

        let parts = req.body.as_ref().and_then(RequestBody::form_parts).unwrap();
        assert_eq!(parts, [FormPart::file("file", file), FormPart::text("type", "voucher")]);
    }

    #[test]
    fn parse_upload_file_requires_202() {
        let id = "8118c402-1234-4b4d-9a5c-3f1e2d3c4b5a";
        let file = api()
            .parse_upload_file(HttpResponse::new(202, format!(r#"{{"id":"{id}"}}"#)))
            .unwrap();
        assert_eq!(file.id.to_string(), id);

        let err = api()
            .parse_upload_file(HttpResponse::new(200, format!(r#"{{"id":"{id}"}}"#)))
            .unwrap_err();
        assert!(matches!(err, ApiError::Api { endpoint: Endpoint::Files, status: 200, .. }));
    }

    #[test]
    fn build_create_voucher_sends_json() {
        let voucher = NewVoucher {
            voucher_type: VoucherType::SalesInvoice,
            voucher_number: "ACC-SINV-2024-00001".to_string(),
            voucher_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            due_date: None,
            total_gross_amount: 119.0,
            total_tax_amount: 19.0,
            tax_type: TaxType::Net,
            use_collective_contact: false,
            contact_id: None,
            remark: None,
            voucher_items: vec![VoucherItem::from_totals(100.0, 19.0, Uuid::nil())],
        };
        let req = api().build_create_voucher(&voucher).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/v1/vouchers");
        assert_eq!(req.header("content-type"), Some("application/json"));
        let body = json_body(&req);
        assert_eq!(body["voucherNumber"], "ACC-SINV-2024-00001");
        assert_eq!(body["voucherDate"], "2024-01-15");
        assert!(body.get("contactId").is_none());
    }

    #[test]
    fn content_type_does_not_leak_between_requests() {
        let api = api();
        let contact = NewContact::company(ContactRoles::customer(), "Leak GmbH");
        let post = api.build_create_contact(&contact).unwrap();
        assert_eq!(post.header("content-type"), Some("application/json"));
        let get = api.build_search_contacts("Leak GmbH", ContactRoles::customer()).unwrap();
        assert_eq!(get.header("content-type"), None);
    }

    #[test]
    fn build_attach_voucher_file_request() {
        let file = UploadFile::new("beleg.pdf", Vec::new());
        let req = api().build_attach_voucher_file(Uuid::nil(), file.clone());
        assert_eq!(
            req.url,
            "http://localhost:3000/v1/vouchers/00000000-0000-0000-0000-000000000000/files"
        );
        let parts = req.body.as_ref().and_then(RequestBody::form_parts).unwrap();
        assert_eq!(parts, [FormPart::file("file", file)]);
    }

    #[test]
    fn build_search_contacts_encodes_name_and_roles() {
        let req = api()
            .build_search_contacts("Müller & Söhne", ContactRoles::customer())
            .unwrap();
        assert_eq!(
            req.url,
            "http://localhost:3000/v1/contacts?name=M%C3%BCller+%26+S%C3%B6hne&customer=true&vendor=false"
        );
    }

    #[test]
    fn parse_create_contact_wrong_status() {
        let err = api()
            .parse_create_contact(HttpResponse::new(500, "upstream exploded"))
            .unwrap_err();
        match err {
            ApiError::Api { status, message, .. } => {
                assert_eq!(status, 500);
                assert_eq!(message, "upstream exploded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn error_message_renders_issue_list() {
        let body = r#"{"requestId":"75d4dad6-6ccb-40fd-8c22-797f2d421d98","IssueList":[{"i18nKey":"missing_entity","source":"company and person","type":"validation_failure"}]}"#;
        assert_eq!(
            error_message(body),
            "validation_failure company and person (missing_entity)"
        );
    }

    #[test]
    fn error_message_falls_back_to_raw_body() {
        assert_eq!(error_message("  Bad Gateway \n"), "Bad Gateway");
        assert_eq!(error_message(r#"{"status":503}"#), r#"{"status":503}"#);
    }
}

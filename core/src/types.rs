//! Response models and enumerations of the lexoffice API.
//!
//! # Design
//! Models are decoded once from a JSON body and never mutated by the client.
//! Required fields fail decoding when missing; fields the API may omit are
//! `Option`s with `#[serde(default)]`. Nested identifiers go through
//! [`lenient_uuid`], which turns anything that is not a valid UUID into
//! `None` instead of an error. Monetary amounts are `f64` and passed through
//! untouched.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Decode an optional UUID leniently: absent, `null`, a non-string value or
/// an unparseable string all yield `None`.
pub fn lenient_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok()))
}

/// Decode a list that the server may send as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoucherType {
    SalesInvoice,
    SalesCreditNote,
    PurchaseInvoice,
    PurchaseCreditNote,
    Invoice,
    DownPaymentInvoice,
    CreditNote,
    OrderConfirmation,
    Quotation,
    DeliveryNote,
}

impl VoucherType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoucherType::SalesInvoice => "salesinvoice",
            VoucherType::SalesCreditNote => "salescreditnote",
            VoucherType::PurchaseInvoice => "purchaseinvoice",
            VoucherType::PurchaseCreditNote => "purchasecreditnote",
            VoucherType::Invoice => "invoice",
            VoucherType::DownPaymentInvoice => "downpaymentinvoice",
            VoucherType::CreditNote => "creditnote",
            VoucherType::OrderConfirmation => "orderconfirmation",
            VoucherType::Quotation => "quotation",
            VoucherType::DeliveryNote => "deliverynote",
        }
    }
}

impl fmt::Display for VoucherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoucherStatus {
    Draft,
    Open,
    Paid,
    PaidOff,
    Voided,
    Transferred,
    SepaDebit,
    Overdue,
    Accepted,
    Rejected,
}

impl VoucherStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoucherStatus::Draft => "draft",
            VoucherStatus::Open => "open",
            VoucherStatus::Paid => "paid",
            VoucherStatus::PaidOff => "paidoff",
            VoucherStatus::Voided => "voided",
            VoucherStatus::Transferred => "transferred",
            VoucherStatus::SepaDebit => "sepadebit",
            VoucherStatus::Overdue => "overdue",
            VoucherStatus::Accepted => "accepted",
            VoucherStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for VoucherStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of an invoice line item. Unknown values decode to `Undefined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineItemType {
    Service,
    Material,
    Custom,
    Text,
    #[default]
    #[serde(other)]
    Undefined,
}

impl LineItemType {
    /// Only material and custom items carry quantity and price details.
    pub fn has_pricing(&self) -> bool {
        matches!(self, LineItemType::Material | LineItemType::Custom)
    }
}

/// Whether voucher amounts are stated net or gross.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxType {
    Net,
    Gross,
}

impl TaxType {
    /// `Net` when the net total does not exceed the gross total.
    pub fn for_totals(net: f64, gross: f64) -> Self {
        if net <= gross {
            TaxType::Net
        } else {
            TaxType::Gross
        }
    }
}

// ---------------------------------------------------------------------------
// Connectivity
// ---------------------------------------------------------------------------

/// Identity of the account behind the API key, returned by `/ping`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ping {
    #[serde(default, deserialize_with = "lenient_uuid")]
    pub organization_id: Option<Uuid>,
    #[serde(default, deserialize_with = "lenient_uuid")]
    pub user_id: Option<Uuid>,
    pub user_email: String,
    #[serde(default)]
    pub application_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Vouchers
// ---------------------------------------------------------------------------

/// An entry of the voucher list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    pub id: Uuid,
    pub voucher_type: VoucherType,
    pub voucher_status: VoucherStatus,
    /// Drafts have no number yet.
    #[serde(default)]
    pub voucher_number: Option<String>,
    pub voucher_date: DateTime<FixedOffset>,
    pub created_date: DateTime<FixedOffset>,
    pub updated_date: DateTime<FixedOffset>,
    #[serde(default)]
    pub due_date: Option<DateTime<FixedOffset>>,
    /// `None` for collective contacts or an unparseable id.
    #[serde(default, deserialize_with = "lenient_uuid")]
    pub contact_id: Option<Uuid>,
    #[serde(default)]
    pub contact_name: Option<String>,
    pub total_amount: f64,
    #[serde(default)]
    pub open_amount: Option<f64>,
    pub currency: String,
    pub archived: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortOrder {
    #[serde(default)]
    pub property: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub ignore_case: bool,
    #[serde(default)]
    pub null_handling: Option<String>,
    #[serde(default)]
    pub ascending: bool,
}

/// One page of a paginated listing, with the server's pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub first: bool,
    pub last: bool,
    pub total_pages: u32,
    pub total_elements: u64,
    pub number_of_elements: u32,
    pub size: u32,
    pub number: u32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sort: Vec<SortOrder>,
}

pub type VoucherList = Page<Voucher>;

// ---------------------------------------------------------------------------
// Invoices
// ---------------------------------------------------------------------------

/// Recipient address of an invoice. Every field may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// `None` when the address is not linked to a stored contact.
    #[serde(default, deserialize_with = "lenient_uuid")]
    pub contact_id: Option<Uuid>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub supplement: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    /// Kept verbatim; leading zeros are significant.
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitPrice {
    pub currency: String,
    #[serde(default)]
    pub net_amount: Option<f64>,
    #[serde(default)]
    pub gross_amount: Option<f64>,
    #[serde(default)]
    pub tax_rate_percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalPrice {
    pub currency: String,
    pub total_net_amount: f64,
    pub total_gross_amount: f64,
    pub total_tax_amount: f64,
    #[serde(default)]
    pub total_discount_absolute: Option<f64>,
    #[serde(default)]
    pub total_discount_percentage: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLineItem {
    #[serde(default, deserialize_with = "lenient_uuid")]
    id: Option<Uuid>,
    #[serde(default, rename = "type")]
    item_type: Option<LineItemType>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    quantity: Option<f64>,
    #[serde(default)]
    unit_name: Option<String>,
    #[serde(default)]
    unit_price: Option<UnitPrice>,
    #[serde(default)]
    discount_percentage: Option<f64>,
    #[serde(default)]
    line_item_amount: Option<f64>,
}

/// A position on an invoice.
///
/// Quantity and price fields are only kept for `material` and `custom`
/// items; for every other type they are `None` regardless of the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawLineItem", rename_all = "camelCase")]
pub struct LineItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(rename = "type")]
    pub item_type: LineItemType,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<UnitPrice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_item_amount: Option<f64>,
}

impl From<RawLineItem> for LineItem {
    fn from(raw: RawLineItem) -> Self {
        let item_type = raw.item_type.unwrap_or_default();
        let priced = item_type.has_pricing();
        Self {
            id: raw.id,
            item_type,
            name: raw.name,
            description: raw.description,
            quantity: raw.quantity.filter(|_| priced),
            unit_name: raw.unit_name.filter(|_| priced),
            unit_price: raw.unit_price.filter(|_| priced),
            discount_percentage: raw.discount_percentage.filter(|_| priced),
            line_item_amount: raw.line_item_amount.filter(|_| priced),
        }
    }
}

/// A sales invoice as returned by `GET /invoices/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub created_date: DateTime<FixedOffset>,
    pub updated_date: DateTime<FixedOffset>,
    pub version: i64,
    #[serde(default)]
    pub language: Option<String>,
    pub archived: bool,
    pub voucher_status: VoucherStatus,
    #[serde(default)]
    pub voucher_number: Option<String>,
    pub voucher_date: DateTime<FixedOffset>,
    #[serde(default)]
    pub due_date: Option<DateTime<FixedOffset>>,
    pub address: Address,
    pub line_items: Vec<LineItem>,
    pub total_price: TotalPrice,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub introduction: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
}

// ---------------------------------------------------------------------------
// Contacts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_registration_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_tax_free_invoices: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salutation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    pub last_name: String,
}

impl Person {
    /// First and last name joined by a space, or just the last name. The
    /// space is kept so the contact search matches "Inge Musterfrau", not
    /// "IngeMusterfrau".
    pub fn display_name(&self) -> String {
        match self.first_name.as_deref().map(str::trim) {
            Some(first) if !first.is_empty() => format!("{first} {}", self.last_name),
            _ => self.last_name.clone(),
        }
    }
}

#[derive(Deserialize)]
struct RawRoles {
    #[serde(default)]
    customer: Option<serde_json::Value>,
    #[serde(default)]
    vendor: Option<serde_json::Value>,
}

/// Roles of a contact. On the wire each role is an object keyed by the role
/// name, e.g. `{"customer": {}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "RawRoles")]
pub struct ContactRoles {
    pub customer: bool,
    pub vendor: bool,
}

impl ContactRoles {
    pub fn customer() -> Self {
        Self {
            customer: true,
            vendor: false,
        }
    }

    pub fn vendor() -> Self {
        Self {
            customer: false,
            vendor: true,
        }
    }
}

impl From<RawRoles> for ContactRoles {
    fn from(raw: RawRoles) -> Self {
        Self {
            customer: raw.customer.is_some_and(|v| !v.is_null()),
            vendor: raw.vendor.is_some_and(|v| !v.is_null()),
        }
    }
}

#[derive(Serialize)]
struct EmptyRole {}

impl Serialize for ContactRoles {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if self.customer {
            map.serialize_entry("customer", &EmptyRole {})?;
        }
        if self.vendor {
            map.serialize_entry("vendor", &EmptyRole {})?;
        }
        map.end()
    }
}

/// An entry of the contact search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSummary {
    pub id: Uuid,
    #[serde(default)]
    pub version: Option<i64>,
    #[serde(default)]
    pub roles: ContactRoles,
    #[serde(default)]
    pub company: Option<Company>,
    #[serde(default)]
    pub person: Option<Person>,
    #[serde(default)]
    pub archived: Option<bool>,
}

pub type ContactList = Page<ContactSummary>;

// ---------------------------------------------------------------------------
// Write responses
// ---------------------------------------------------------------------------

/// Reference to a resource created by the API (voucher, contact, file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    pub id: Uuid,
    #[serde(default)]
    pub resource_uri: Option<String>,
    #[serde(default)]
    pub created_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub updated_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub version: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn invoice_json() -> serde_json::Value {
        json!({
            "id": "e9066f04-8cc7-4616-93f8-ac9ecc8479c8",
            "organizationId": "aa93e8a8-2aa3-470b-b914-caad8a255dd8",
            "createdDate": "2023-04-24T08:20:22.528+02:00",
            "updatedDate": "2023-04-24T08:20:22.528+02:00",
            "version": 2,
            "language": "de",
            "archived": false,
            "voucherStatus": "open",
            "voucherNumber": "RE1019",
            "voucherDate": "2023-02-22T00:00:00.000+01:00",
            "dueDate": "2023-03-08T00:00:00.000+01:00",
            "address": {
                "contactId": "97c5794f-8ab2-43ad-b459-c5980b055e4d",
                "name": "Bike & Ride GmbH & Co. KG",
                "supplement": "Gebäude 10",
                "street": "Musterstraße 42",
                "city": "Freiburg",
                "zip": "01067",
                "countryCode": "DE"
            },
            "lineItems": [
                {
                    "id": "97b98491-e953-4dc9-97a9-ae437a8052b4",
                    "type": "material",
                    "name": "Abus Kabelschloss Primo 590",
                    "description": "ÖNORM zertifiziert",
                    "quantity": 2,
                    "unitName": "Stück",
                    "unitPrice": {
                        "currency": "EUR",
                        "netAmount": 13.4,
                        "grossAmount": 15.95,
                        "taxRatePercentage": 19
                    },
                    "discountPercentage": 50,
                    "lineItemAmount": 13.4
                },
                {
                    "type": "text",
                    "name": "Lieferung",
                    "description": "Versand erfolgt per DHL",
                    "quantity": 1,
                    "unitName": "Stück"
                }
            ],
            "totalPrice": {
                "currency": "EUR",
                "totalNetAmount": 13.4,
                "totalGrossAmount": 15.95,
                "totalTaxAmount": 2.55,
                "totalDiscountAbsolute": null,
                "totalDiscountPercentage": null
            },
            "title": "Rechnung",
            "remark": "Vielen Dank"
        })
    }

    #[test]
    fn invoice_fields_survive_decoding() {
        let invoice: Invoice = serde_json::from_value(invoice_json()).unwrap();

        assert_eq!(invoice.id.to_string(), "e9066f04-8cc7-4616-93f8-ac9ecc8479c8");
        assert_eq!(invoice.version, 2);
        assert_eq!(invoice.language.as_deref(), Some("de"));
        assert_eq!(invoice.voucher_status, VoucherStatus::Open);
        assert_eq!(invoice.voucher_number.as_deref(), Some("RE1019"));
        assert_eq!(invoice.voucher_date.to_rfc3339(), "2023-02-22T00:00:00+01:00");
        assert_eq!(
            invoice.due_date.map(|d| d.to_rfc3339()).as_deref(),
            Some("2023-03-08T00:00:00+01:00")
        );
        assert_eq!(invoice.address.zip.as_deref(), Some("01067"));
        assert_eq!(invoice.address.supplement.as_deref(), Some("Gebäude 10"));
        assert_eq!(invoice.total_price.total_tax_amount, 2.55);
        assert_eq!(invoice.total_price.total_discount_absolute, None);
        assert_eq!(invoice.title.as_deref(), Some("Rechnung"));
        assert_eq!(invoice.introduction, None);
        assert_eq!(invoice.line_items.len(), 2);
    }

    #[test]
    fn priced_fields_kept_only_for_material_and_custom() {
        let invoice: Invoice = serde_json::from_value(invoice_json()).unwrap();

        let material = &invoice.line_items[0];
        assert_eq!(material.item_type, LineItemType::Material);
        assert_eq!(material.quantity, Some(2.0));
        assert_eq!(material.unit_price.as_ref().unwrap().gross_amount, Some(15.95));
        assert_eq!(material.discount_percentage, Some(50.0));

        let text = &invoice.line_items[1];
        assert_eq!(text.item_type, LineItemType::Text);
        assert_eq!(text.id, None);
        assert_eq!(text.description.as_deref(), Some("Versand erfolgt per DHL"));
        assert_eq!(text.quantity, None);
        assert_eq!(text.unit_name, None);
    }

    #[test]
    fn unknown_line_item_type_becomes_undefined() {
        let item: LineItem =
            serde_json::from_value(json!({"type": "subscription", "name": "x", "quantity": 3})).unwrap();
        assert_eq!(item.item_type, LineItemType::Undefined);
        assert_eq!(item.quantity, None);

        let item: LineItem = serde_json::from_value(json!({"name": "no type"})).unwrap();
        assert_eq!(item.item_type, LineItemType::Undefined);
    }

    fn page_json(sort: serde_json::Value) -> serde_json::Value {
        json!({
            "content": [],
            "first": true,
            "last": true,
            "totalPages": 0,
            "totalElements": 0,
            "numberOfElements": 0,
            "size": 25,
            "number": 0,
            "sort": sort,
        })
    }

    #[test]
    fn page_sort_may_be_null_or_sparse() {
        let page: ContactList = serde_json::from_value(page_json(json!(null))).unwrap();
        assert!(page.sort.is_empty());

        let mut value = page_json(json!(null));
        value.as_object_mut().unwrap().remove("sort");
        let page: ContactList = serde_json::from_value(value).unwrap();
        assert!(page.sort.is_empty());

        let page: ContactList = serde_json::from_value(page_json(json!([{"ascending": true}]))).unwrap();
        assert_eq!(page.sort.len(), 1);
        assert_eq!(page.sort[0].property, None);
        assert_eq!(page.sort[0].direction, None);
        assert!(page.sort[0].ascending);
    }

    #[test]
    fn lenient_uuid_maps_garbage_to_none() {
        let address: Address = serde_json::from_value(json!({"contactId": "not-a-uuid"})).unwrap();
        assert_eq!(address.contact_id, None);
        let address: Address = serde_json::from_value(json!({"contactId": 42})).unwrap();
        assert_eq!(address.contact_id, None);
        let address: Address = serde_json::from_value(json!({"contactId": null})).unwrap();
        assert_eq!(address.contact_id, None);
        let address: Address = serde_json::from_value(json!({})).unwrap();
        assert_eq!(address, Address::default());
    }

    #[test]
    fn invoice_without_required_field_fails() {
        let mut value = invoice_json();
        value.as_object_mut().unwrap().remove("totalPrice");
        assert!(serde_json::from_value::<Invoice>(value).is_err());
    }

    #[test]
    fn voucher_with_null_due_date() {
        let voucher: Voucher = serde_json::from_value(json!({
            "id": "d4e5b1d0-2c4f-4b8e-9b2e-7a0f1c3d5e6f",
            "voucherType": "purchaseinvoice",
            "voucherStatus": "paidoff",
            "voucherNumber": "ER-42",
            "voucherDate": "2023-06-14T00:00:00.000+02:00",
            "createdDate": "2023-06-14T10:11:12.000+02:00",
            "updatedDate": "2023-06-15T10:11:12.000+02:00",
            "dueDate": null,
            "contactName": "Sammellieferant",
            "totalAmount": 119.0,
            "openAmount": 0.0,
            "currency": "EUR",
            "archived": true
        }))
        .unwrap();
        assert_eq!(voucher.voucher_type, VoucherType::PurchaseInvoice);
        assert_eq!(voucher.voucher_status, VoucherStatus::PaidOff);
        assert_eq!(voucher.due_date, None);
        assert_eq!(voucher.contact_id, None);
        assert_eq!(voucher.total_amount, 119.0);
        assert!(voucher.archived);
    }

    #[test]
    fn enum_wire_names() {
        assert_eq!(serde_json::to_value(VoucherType::DownPaymentInvoice).unwrap(), "downpaymentinvoice");
        assert_eq!(serde_json::to_value(VoucherStatus::SepaDebit).unwrap(), "sepadebit");
        assert_eq!(VoucherType::OrderConfirmation.as_str(), "orderconfirmation");
        assert_eq!(VoucherStatus::PaidOff.to_string(), "paidoff");
        assert_eq!(serde_json::to_value(TaxType::Gross).unwrap(), "gross");
    }

    #[test]
    fn tax_type_for_totals() {
        assert_eq!(TaxType::for_totals(100.0, 119.0), TaxType::Net);
        assert_eq!(TaxType::for_totals(100.0, 100.0), TaxType::Net);
        assert_eq!(TaxType::for_totals(119.0, 100.0), TaxType::Gross);
    }

    #[test]
    fn contact_roles_wire_format() {
        let roles = ContactRoles {
            customer: true,
            vendor: true,
        };
        assert_eq!(
            serde_json::to_value(roles).unwrap(),
            json!({"customer": {}, "vendor": {}})
        );
        assert_eq!(serde_json::to_value(ContactRoles::vendor()).unwrap(), json!({"vendor": {}}));

        let parsed: ContactRoles = serde_json::from_value(json!({"customer": {"number": 10001}})).unwrap();
        assert_eq!(parsed, ContactRoles::customer());
    }

    #[test]
    fn person_display_name() {
        let person = Person {
            salutation: None,
            first_name: Some("Inge".to_string()),
            last_name: "Musterfrau".to_string(),
        };
        assert_eq!(person.display_name(), "Inge Musterfrau");
        assert_ne!(person.display_name(), "IngeMusterfrau");

        let person = Person {
            salutation: Some("Herr".to_string()),
            first_name: None,
            last_name: "Mustermann".to_string(),
        };
        assert_eq!(person.display_name(), "Mustermann");
    }
}

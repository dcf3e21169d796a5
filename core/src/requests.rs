//! Request payloads and query descriptions.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::types::{Company, ContactRoles, Person, TaxType, VoucherStatus, VoucherType};

/// Posting category lexoffice uses for sales income ("Einnahmen").
pub const CATEGORY_INCOMINGS: Uuid = Uuid::from_u128(0x8f8664a1_fd86_11e1_a21f_0800200c9a66);

/// Filter and paging for `GET /voucherlist`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoucherListQuery {
    pub voucher_type: VoucherType,
    /// `None` (or an empty list) means any status.
    pub statuses: Option<Vec<VoucherStatus>>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl VoucherListQuery {
    pub fn new(voucher_type: VoucherType) -> Self {
        Self {
            voucher_type,
            statuses: None,
            page: None,
            size: None,
        }
    }

    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = VoucherStatus>) -> Self {
        self.statuses = Some(statuses.into_iter().collect());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// The `voucherStatus` query value: comma-joined statuses or `any`.
    pub fn status_param(&self) -> String {
        match self.statuses.as_deref() {
            Some(statuses) if !statuses.is_empty() => statuses
                .iter()
                .map(VoucherStatus::as_str)
                .collect::<Vec<_>>()
                .join(","),
            _ => "any".to_string(),
        }
    }
}

/// One bookkeeping line of a voucher.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherItem {
    pub amount: f64,
    pub tax_amount: f64,
    pub tax_rate_percent: f64,
    pub category_id: Uuid,
}

impl VoucherItem {
    /// A single line covering a whole document, with the tax rate derived
    /// from the totals and rounded to one decimal.
    pub fn from_totals(net_amount: f64, tax_amount: f64, category_id: Uuid) -> Self {
        let tax_rate_percent = if net_amount == 0.0 {
            0.0
        } else {
            (tax_amount / net_amount * 1000.0).round() / 10.0
        };
        Self {
            amount: net_amount,
            tax_amount,
            tax_rate_percent,
            category_id,
        }
    }
}

/// Body of `POST /vouchers`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVoucher {
    #[serde(rename = "type")]
    pub voucher_type: VoucherType,
    pub voucher_number: String,
    pub voucher_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub total_gross_amount: f64,
    pub total_tax_amount: f64,
    pub tax_type: TaxType,
    pub use_collective_contact: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    pub voucher_items: Vec<VoucherItem>,
}

/// Body of `POST /contacts`. Exactly one of `company` and `person` must be
/// set; [`NewContact::display_name`] enforces this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub roles: ContactRoles,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub version: i64,
}

impl NewContact {
    pub fn company(roles: ContactRoles, name: impl Into<String>) -> Self {
        Self {
            roles,
            company: Some(Company {
                name: name.into(),
                tax_number: None,
                vat_registration_id: None,
                allow_tax_free_invoices: None,
            }),
            person: None,
            email: None,
            version: 0,
        }
    }

    pub fn person(roles: ContactRoles, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            roles,
            company: None,
            person: Some(Person {
                salutation: None,
                first_name: Some(first_name.into()),
                last_name: last_name.into(),
            }),
            email: None,
            version: 0,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Name used to look the contact up before creating it.
    pub fn display_name(&self) -> Result<String, ApiError> {
        match (&self.company, &self.person) {
            (Some(company), None) => Ok(company.name.clone()),
            (None, Some(person)) => Ok(person.display_name()),
            (None, None) => Err(ApiError::InvalidInput(
                "either company or person must be given".to_string(),
            )),
            (Some(_), Some(_)) => Err(ApiError::InvalidInput(
                "company and person are mutually exclusive".to_string(),
            )),
        }
    }
}

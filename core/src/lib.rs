//! Synchronous client for the lexoffice public API.
//!
//! # Overview
//! Vouchers, invoices, contacts and file uploads against
//! `https://api.lexoffice.io/v1`, with typed response models and a single
//! error type.
//!
//! # Design
//! - `LexofficeApi` is stateless: it builds `HttpRequest` values and parses
//!   `HttpResponse` values without touching the network.
//! - `LexofficeClient` executes those requests through a `Transport`
//!   (blocking `ureq` by default) and composes the multi-step operations.
//! - `ClientConfig` holds the API key and base URL and is never mutated;
//!   headers are built per request.
//! - Every unexpected status surfaces as `ApiError::Api` with the endpoint,
//!   status code and server message.

pub mod blocking;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod requests;
pub mod transport;
pub mod types;
pub mod upload;

pub use blocking::LexofficeClient;
pub use client::LexofficeApi;
pub use config::ClientConfig;
pub use error::{ApiError, Endpoint};
pub use http::{FormPart, HttpMethod, HttpRequest, HttpResponse, RequestBody};
pub use requests::{NewContact, NewVoucher, VoucherItem, VoucherListQuery, CATEGORY_INCOMINGS};
pub use transport::{Transport, UreqTransport};
pub use types::{
    Address, Company, ContactList, ContactRoles, ContactSummary, Invoice, LineItem, LineItemType, Page, Person,
    Ping, ResourceRef, SortOrder, TaxType, TotalPrice, UnitPrice, Voucher, VoucherList, VoucherStatus, VoucherType,
};
pub use upload::UploadFile;

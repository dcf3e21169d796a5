//! Blocking lexoffice client.
//!
//! # Design
//! `LexofficeClient` pairs the stateless `LexofficeApi` with a `Transport`.
//! Each method performs one or two round trips synchronously; nothing is
//! retried, cached or shared between calls. Multi-step operations (voucher
//! with attachment, create-or-get contact) live here because they need the
//! response of one request to build the next.

use std::path::Path;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::client::LexofficeApi;
use crate::config::ClientConfig;
use crate::error::{ApiError, Endpoint};
use crate::http::{HttpRequest, HttpResponse};
use crate::requests::{NewContact, NewVoucher, VoucherListQuery};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Invoice, Ping, VoucherList};
use crate::upload::UploadFile;

pub struct LexofficeClient<T = UreqTransport> {
    api: LexofficeApi,
    transport: T,
}

impl LexofficeClient<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }

    /// Build a client from `LEXOFFICE_API_KEY` / `LEXOFFICE_BASE_URL`.
    pub fn from_env() -> Result<Self, ApiError> {
        Ok(Self::new(ClientConfig::from_env()?))
    }
}

impl<T: Transport> LexofficeClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            api: LexofficeApi::new(config),
            transport,
        }
    }

    pub fn api(&self) -> &LexofficeApi {
        &self.api
    }

    fn send(&self, request: HttpRequest, endpoint: Endpoint) -> Result<HttpResponse, ApiError> {
        debug!(%endpoint, method = request.method.as_str(), url = %request.url, "sending request");
        let response = self.transport.execute(request)?;
        debug!(%endpoint, status = response.status, "received response");
        Ok(response)
    }

    /// `true` if the API accepted the key.
    pub fn ping(&self) -> Result<bool, ApiError> {
        Ok(self.ping_details()?.is_some())
    }

    /// Account identity behind the key, `None` if the ping was refused.
    pub fn ping_details(&self) -> Result<Option<Ping>, ApiError> {
        let response = self.send(self.api.build_ping(), Endpoint::Ping)?;
        let status = response.status;
        let ping = self.api.parse_ping(response)?;
        match &ping {
            Some(ping) => info!(user = %ping.user_email, "connected to lexoffice API"),
            None => warn!(status, "lexoffice ping refused"),
        }
        Ok(ping)
    }

    pub fn voucher_list(&self, query: &VoucherListQuery) -> Result<VoucherList, ApiError> {
        let request = self.api.build_voucher_list(query)?;
        let response = self.send(request, Endpoint::VoucherList)?;
        self.api.parse_voucher_list(response).inspect_err(log_failure)
    }

    pub fn invoice(&self, id: Uuid) -> Result<Invoice, ApiError> {
        let response = self.send(self.api.build_get_invoice(id), Endpoint::Invoice)?;
        self.api.parse_get_invoice(response).inspect_err(log_failure)
    }

    /// Upload a local file as a voucher document; returns the file id.
    pub fn upload_file(&self, path: impl AsRef<Path>) -> Result<Uuid, ApiError> {
        let file = UploadFile::from_path(path)?;
        let file_name = file.file_name.clone();
        let response = self.send(self.api.build_upload_file(file), Endpoint::Files)?;
        let created = self.api.parse_upload_file(response).inspect_err(log_failure)?;
        info!(file_id = %created.id, %file_name, "uploaded file");
        Ok(created.id)
    }

    /// Create a bookkeeping voucher and, when `attachment` is given, attach
    /// that file to it. Returns the voucher id.
    ///
    /// The attachment is read before the voucher is created, so a missing
    /// file never leaves a voucher behind.
    pub fn create_voucher(&self, voucher: &NewVoucher, attachment: Option<&Path>) -> Result<Uuid, ApiError> {
        let file = attachment.map(|path| UploadFile::from_path(path)).transpose()?;

        let request = self.api.build_create_voucher(voucher)?;
        let response = self.send(request, Endpoint::Vouchers)?;
        let created = self.api.parse_create_voucher(response).inspect_err(log_failure)?;
        info!(voucher_id = %created.id, number = %voucher.voucher_number, "created voucher");

        if let Some(file) = file {
            let request = self.api.build_attach_voucher_file(created.id, file);
            let response = self.send(request, Endpoint::VoucherFiles)?;
            let attached = self.api.parse_attach_voucher_file(response).inspect_err(log_failure)?;
            info!(voucher_id = %created.id, file_id = %attached.id, "attached file to voucher");
        }

        Ok(created.id)
    }

    /// Return the id of the first contact matching the display name and
    /// roles of `contact`, creating the contact when none matches.
    pub fn create_or_get_contact(&self, contact: &NewContact) -> Result<Uuid, ApiError> {
        let name = contact.display_name()?;

        let request = self.api.build_search_contacts(&name, contact.roles)?;
        let response = self.send(request, Endpoint::ContactSearch)?;
        let found = self.api.parse_search_contacts(response).inspect_err(log_failure)?;
        if let Some(existing) = found.content.first() {
            debug!(contact_id = %existing.id, %name, "found existing contact");
            return Ok(existing.id);
        }

        let request = self.api.build_create_contact(contact)?;
        let response = self.send(request, Endpoint::ContactCreate)?;
        let created = self.api.parse_create_contact(response).inspect_err(log_failure)?;
        info!(contact_id = %created.id, %name, "created contact");
        Ok(created.id)
    }
}

fn log_failure(err: &ApiError) {
    if let ApiError::Api {
        endpoint,
        status,
        message,
    } = err
    {
        warn!(%endpoint, status, %message, "lexoffice API error");
    }
}

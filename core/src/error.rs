//! Error types for the lexoffice API client.
//!
//! # Design
//! Every unexpected HTTP status, on every endpoint, lands in `Api` with the
//! status code, the server's message and the endpoint that produced it.
//! Failures that never reached the server (transport, local files, caller
//! input, configuration) get their own variants so callers can tell "the API
//! said no" apart from "we never asked".

use std::fmt;

use thiserror::Error;

/// The lexoffice endpoints this client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Ping,
    VoucherList,
    Invoice,
    Files,
    Vouchers,
    VoucherFiles,
    ContactSearch,
    ContactCreate,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Ping => "GET /ping",
            Endpoint::VoucherList => "GET /voucherlist",
            Endpoint::Invoice => "GET /invoices/{id}",
            Endpoint::Files => "POST /files",
            Endpoint::Vouchers => "POST /vouchers",
            Endpoint::VoucherFiles => "POST /vouchers/{id}/files",
            Endpoint::ContactSearch => "GET /contacts",
            Endpoint::ContactCreate => "POST /contacts",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by `LexofficeApi` parse methods and `LexofficeClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status the operation does not accept.
    #[error("{endpoint} failed with status {status}: {message}")]
    Api {
        endpoint: Endpoint,
        status: u16,
        message: String,
    },

    /// The HTTP round trip could not be completed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The request payload could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A success body could not be deserialized into the expected model.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// A local file meant for upload could not be read.
    #[error("cannot read {path}: {message}")]
    File { path: String, message: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),
}

impl ApiError {
    /// HTTP status of an `Api` error, `None` for every other variant.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

//! A catalog client that can be seeded with mock responses.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use reqwest::StatusCode;

use crate::client::ClientTrait;
use crate::error::{AuthError, CatalogClientError};
use crate::types::*;

type MockField<T> = Arc<Mutex<VecDeque<Result<T, ErrorReply>>>>;

/// A canned error response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReply {
    pub status: u16,
    pub message: String,
}

/// A catalog client that pops canned responses instead of issuing HTTP
/// calls.
///
/// Each endpoint has its own queue so that callers issuing concurrent
/// fetches still consume deterministic responses. Clones share the same
/// queues, which lets a test keep a handle for seeding after the client
/// has been moved into a [`Client`](crate::Client).
#[derive(Debug, Clone, Default)]
pub struct MockClient {
    products: MockField<Vec<Product>>,
    suggestions: MockField<Vec<String>>,
    spellchecks: MockField<SpellcheckVerdict>,
    top_searches: MockField<Vec<TopSearch>>,
    brands: MockField<Vec<String>>,
    types: MockField<Vec<String>>,
    logins: MockField<LoginOutcome>,
    registrations: MockField<ServerMessage>,
}

fn push<T>(queue: &MockField<T>, reply: Result<T, ErrorReply>) {
    queue
        .lock()
        .expect("couldn't acquire mock lock")
        .push_back(reply);
}

fn pop<T>(queue: &MockField<T>, endpoint: &str) -> Result<T, ErrorReply> {
    queue
        .lock()
        .expect("couldn't acquire mock lock")
        .pop_front()
        .unwrap_or_else(|| panic!("no mock response queued for {endpoint}"))
}

fn reply_error(err: ErrorReply) -> CatalogClientError {
    CatalogClientError::ErrorResponse {
        status: StatusCode::from_u16(err.status).expect("invalid mock status code"),
        detail: err.message,
    }
}

impl MockClient {
    /// Push a new response into the product fetch queue.
    pub fn push_products_response(&self, resp: Vec<Product>) {
        push(&self.products, Ok(resp));
    }

    /// Push an error into the product fetch queue.
    pub fn push_products_error(&self, status: u16, message: impl Into<String>) {
        push(&self.products, Err(ErrorReply {
            status,
            message: message.into(),
        }));
    }

    /// Push a new response into the autocomplete queue.
    pub fn push_suggestions_response(&self, resp: Vec<String>) {
        push(&self.suggestions, Ok(resp));
    }

    /// Push an error into the autocomplete queue.
    pub fn push_suggestions_error(&self, status: u16, message: impl Into<String>) {
        push(&self.suggestions, Err(ErrorReply {
            status,
            message: message.into(),
        }));
    }

    /// Push a new response into the spellcheck queue.
    pub fn push_spellcheck_response(&self, resp: SpellcheckVerdict) {
        push(&self.spellchecks, Ok(resp));
    }

    /// Push an error into the spellcheck queue.
    pub fn push_spellcheck_error(&self, status: u16, message: impl Into<String>) {
        push(&self.spellchecks, Err(ErrorReply {
            status,
            message: message.into(),
        }));
    }

    /// Push a new response into the top-searches queue.
    pub fn push_top_searches_response(&self, resp: Vec<TopSearch>) {
        push(&self.top_searches, Ok(resp));
    }

    /// Push an error into the top-searches queue.
    pub fn push_top_searches_error(&self, status: u16, message: impl Into<String>) {
        push(&self.top_searches, Err(ErrorReply {
            status,
            message: message.into(),
        }));
    }

    /// Push a new response into the brand vocabulary queue.
    pub fn push_brands_response(&self, resp: Vec<String>) {
        push(&self.brands, Ok(resp));
    }

    /// Push a new response into the type vocabulary queue.
    pub fn push_types_response(&self, resp: Vec<String>) {
        push(&self.types, Ok(resp));
    }

    /// Push a new response into the login queue.
    pub fn push_login_response(&self, resp: LoginOutcome) {
        push(&self.logins, Ok(resp));
    }

    /// Push an error into the login queue.
    pub fn push_login_error(&self, status: u16, message: impl Into<String>) {
        push(&self.logins, Err(ErrorReply {
            status,
            message: message.into(),
        }));
    }

    /// Push a new response into the registration queue.
    pub fn push_register_response(&self, resp: ServerMessage) {
        push(&self.registrations, Ok(resp));
    }

    /// Push an error into the registration queue.
    pub fn push_register_error(&self, status: u16, message: impl Into<String>) {
        push(&self.registrations, Err(ErrorReply {
            status,
            message: message.into(),
        }));
    }
}

impl ClientTrait for MockClient {
    async fn fetch_products(
        &self,
        _params: &ProductQuery,
    ) -> Result<Vec<Product>, CatalogClientError> {
        pop(&self.products, "products").map_err(reply_error)
    }

    async fn autocomplete(
        &self,
        _prefix: impl AsRef<str> + Send + Sync,
    ) -> Result<Vec<String>, CatalogClientError> {
        pop(&self.suggestions, "autocomplete").map_err(reply_error)
    }

    async fn spellcheck(
        &self,
        _word: impl AsRef<str> + Send + Sync,
    ) -> Result<SpellcheckVerdict, CatalogClientError> {
        pop(&self.spellchecks, "spellcheck").map_err(reply_error)
    }

    async fn top_searches(&self) -> Result<Vec<TopSearch>, CatalogClientError> {
        pop(&self.top_searches, "top-searches").map_err(reply_error)
    }

    async fn brands(&self) -> Result<Vec<String>, CatalogClientError> {
        pop(&self.brands, "brands").map_err(reply_error)
    }

    async fn toothbrush_types(&self) -> Result<Vec<String>, CatalogClientError> {
        pop(&self.types, "types").map_err(reply_error)
    }

    async fn login(&self, _request: &LoginRequest) -> Result<LoginOutcome, AuthError> {
        pop(&self.logins, "auth/login").map_err(auth_error)
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<ServerMessage, AuthError> {
        pop(&self.registrations, "auth/register").map_err(auth_error)
    }
}

fn auth_error(err: ErrorReply) -> AuthError {
    let status = StatusCode::from_u16(err.status).expect("invalid mock status code");
    if status.is_client_error() {
        AuthError::Rejected {
            status,
            message: err.message,
        }
    } else {
        AuthError::CatalogClient(CatalogClientError::ErrorResponse {
            status,
            detail: err.message,
        })
    }
}

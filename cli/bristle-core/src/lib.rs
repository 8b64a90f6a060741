//! Query-state orchestration for the toothbrush catalog client.
//!
//! The modules here keep search text, sort priority, facet filters,
//! pagination, autocomplete, and the spelling fallback mutually consistent
//! and translate them into catalog requests:
//!
//! - [`sort`]: ordered, toggleable multi-key sort state
//! - [`filters`]: multi-select brand/type facet state
//! - [`pagination`]: client-side page math over a full result set
//! - [`request`]: composition of view state into request parameters
//! - [`session`]: the coordinating state machine, free of I/O
//! - [`driver`]: executes session commands against a catalog client

pub mod driver;
pub mod filters;
pub mod pagination;
pub mod request;
pub mod session;
pub mod sort;

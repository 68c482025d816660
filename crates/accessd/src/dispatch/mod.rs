//! JSONL command dispatch.
//!
//! Each request line is a command envelope:
//!
//! ```json
//! {"id":"r-1","version":"2.0.0","action":"getTenderState","params":{"cpid":"ocds-b3wdp1-MD-1580458690892","ocid":"ocds-b3wdp1-MD-1580458690892-EV-1580458791896"}}
//! ```
//!
//! and is answered by exactly one response line:
//!
//! ```json
//! {"id":"r-1","version":"2.0.0","status":"success","result":{"status":"active","statusDetails":"tendering"}}
//! {"id":"r-2","version":"2.0.0","status":"error","errors":[{"code":"DR-7/3","description":"..."}]}
//! ```
//!
//! The pipeline for a request stops at the first failure: the action is
//! looked up, `params` is decoded into the handler's request shape, fields
//! are converted into validated domain values, and only then does the
//! business collaborator run.

mod action;
mod dispatcher;
mod envelope;
mod errors;
mod handler;
mod registry;
mod response;
mod serve;

pub use self::action::Action;
pub use self::dispatcher::Dispatcher;
pub use self::envelope::{CommandEnvelope, RejectedEnvelope};
pub use self::errors::ServeError;
pub use self::handler::{
    Assertion, AssertionHandler, CommandHandler, Outcome, Query, QueryHandler,
};
pub use self::registry::{HandlerRegistry, RegistryBuilder};
pub use self::response::{ResponseEnvelope, ResponseStatus, ResponseWriter};
pub use self::serve::{ServeSummary, serve};

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

//! # cloudstack-api
//!
//! Client for the CloudStack management API as used by the router
//! verification suite.
//!
//! This crate handles:
//!
//! - Request signing (HMAC-SHA1 over the canonical query string)
//! - JSON envelope unwrapping and server error mapping
//! - Async job waiting via `queryAsyncJobResult`
//! - Typed list/create/delete operations for the resources the suite touches
//! - A bounded poller shared by job waiting and network readiness checks

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;
pub mod ops;
pub mod poll;
pub mod requests;
pub mod signing;
pub mod types;

pub use client::{ApiClient, ApiCredentials, Params};
pub use error::{ApiError, Result};
pub use ops::{HostQuery, RouterQuery};
pub use poll::{poll_until, PollOutcome, PollPolicy};
pub use requests::{AccountRequest, Placement, ServiceOfferingRequest, VirtualMachineRequest};
pub use types::{
    Account, AsyncJob, Domain, Host, JobStatus, Network, NetworkState, NetworkType, OsType,
    Router, RouterState, ServiceOffering, Template, VirtualMachine, VlanIpRange, Zone,
};

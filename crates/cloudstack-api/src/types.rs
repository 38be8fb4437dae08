//! Resource types returned by the management API.
//!
//! Field names follow the server's lower-case JSON keys. Everything the
//! server may omit is an `Option` so that absence is observable.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, Result};

/// Virtual router appliance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Router {
    /// Router ID.
    pub id: String,
    /// Router name.
    #[serde(default)]
    pub name: String,
    /// Current state.
    pub state: RouterState,
    /// Zone the router lives in.
    #[serde(rename = "zoneid")]
    pub zone_id: String,
    /// Host running the router (absent while stopped).
    #[serde(rename = "hostid", default)]
    pub host_id: Option<String>,
    /// Management-plane address.
    #[serde(rename = "linklocalip", default)]
    pub link_local_ip: Option<String>,
    /// Public address.
    #[serde(rename = "publicip", default)]
    pub public_ip: Option<String>,
    /// Guest network address.
    #[serde(rename = "guestipaddress", default)]
    pub guest_ip: Option<String>,
    /// Gateway.
    #[serde(default)]
    pub gateway: Option<String>,
    /// Primary DNS.
    #[serde(default)]
    pub dns1: Option<String>,
    /// Secondary DNS.
    #[serde(default)]
    pub dns2: Option<String>,
    /// Owning account.
    #[serde(default)]
    pub account: Option<String>,
    /// Owning domain.
    #[serde(rename = "domainid", default)]
    pub domain_id: Option<String>,
}

/// Router lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouterState {
    Starting,
    Running,
    Stopping,
    Stopped,
    Destroyed,
    Migrating,
    Error,
    #[serde(other)]
    Unknown,
}

/// Hypervisor host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Host {
    /// Host ID.
    pub id: String,
    /// Host name.
    #[serde(default)]
    pub name: String,
    /// Host type (e.g. `Routing`).
    #[serde(rename = "type", default)]
    pub host_type: String,
    /// Host state (e.g. `Up`).
    #[serde(default)]
    pub state: String,
    /// Management address of the host.
    #[serde(rename = "ipaddress")]
    pub ip_address: String,
    /// Zone ID.
    #[serde(rename = "zoneid", default)]
    pub zone_id: Option<String>,
}

/// Guest network.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Network {
    /// Network ID.
    pub id: String,
    /// Network name.
    #[serde(default)]
    pub name: String,
    /// Lifecycle state.
    pub state: NetworkState,
}

/// Network lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkState {
    Allocated,
    Implementing,
    Implemented,
    Setup,
    Shutdown,
    Destroy,
    #[serde(other)]
    Unknown,
}

impl NetworkState {
    /// Returns true if the network can take a restart.
    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Implemented | Self::Setup)
    }
}

/// Availability zone.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Zone {
    /// Zone ID.
    pub id: String,
    /// Zone name.
    #[serde(default)]
    pub name: String,
    /// Network topology of the zone.
    #[serde(rename = "networktype")]
    pub network_type: NetworkType,
    /// Primary DNS.
    #[serde(default)]
    pub dns1: Option<String>,
    /// Secondary DNS.
    #[serde(default)]
    pub dns2: Option<String>,
}

/// Zone network topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkType {
    Basic,
    Advanced,
}

/// Public VLAN IP range.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VlanIpRange {
    /// Range ID.
    pub id: String,
    /// Zone ID.
    #[serde(rename = "zoneid", default)]
    pub zone_id: Option<String>,
    /// Gateway.
    #[serde(default)]
    pub gateway: Option<String>,
    /// Netmask.
    #[serde(default)]
    pub netmask: Option<String>,
    /// First address.
    #[serde(rename = "startip", default)]
    pub start_ip: Option<String>,
    /// Last address.
    #[serde(rename = "endip", default)]
    pub end_ip: Option<String>,
    /// VLAN tag.
    #[serde(default)]
    pub vlan: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Domain {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OsType {
    pub id: String,
    #[serde(default)]
    pub description: String,
}

/// VM template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Template {
    /// Template ID.
    pub id: String,
    /// Template name.
    #[serde(default)]
    pub name: String,
    /// OS type the template was registered with.
    #[serde(rename = "ostypeid", default)]
    pub os_type_id: Option<String>,
}

/// User account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    /// Account ID.
    pub id: String,
    /// Account name.
    pub name: String,
    /// Domain the account belongs to.
    #[serde(rename = "domainid")]
    pub domain_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceOffering {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Guest virtual machine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VirtualMachine {
    /// VM ID.
    pub id: String,
    /// VM name.
    #[serde(default)]
    pub name: String,
    /// Display name.
    #[serde(rename = "displayname", default)]
    pub display_name: Option<String>,
    /// Current state.
    #[serde(default)]
    pub state: String,
}

/// Status of an async job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "i32")]
pub enum JobStatus {
    Pending,
    Succeeded,
    Failed,
}

impl From<i32> for JobStatus {
    fn from(value: i32) -> Self {
        match value {
            1 => Self::Succeeded,
            2 => Self::Failed,
            _ => Self::Pending,
        }
    }
}

/// Result of `queryAsyncJobResult`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AsyncJob {
    /// Job ID.
    #[serde(rename = "jobid")]
    pub job_id: String,
    /// Job status.
    #[serde(rename = "jobstatus")]
    pub status: JobStatus,
    /// Result payload, or error details on failure.
    #[serde(rename = "jobresult", default)]
    pub result: Option<Value>,
}

impl AsyncJob {
    /// Returns true once the job left the pending state.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status != JobStatus::Pending
    }

    /// Converts a finished job into its result payload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::JobFailed`] if the job reported a failure.
    pub fn into_result(self) -> Result<Value> {
        match self.status {
            JobStatus::Failed => {
                let result = self.result.unwrap_or(Value::Null);
                let code = result
                    .get("errorcode")
                    .and_then(Value::as_u64)
                    .and_then(|c| u32::try_from(c).ok())
                    .unwrap_or(0);
                let text = result
                    .get("errortext")
                    .and_then(Value::as_str)
                    .unwrap_or("no error text")
                    .to_string();
                Err(ApiError::JobFailed {
                    job_id: self.job_id,
                    code,
                    text,
                })
            }
            JobStatus::Succeeded | JobStatus::Pending => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

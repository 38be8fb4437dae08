//! Parameters for the resources the suite creates.
//!
//! These are plain data so they can be embedded in configuration files.

use serde::{Deserialize, Serialize};

use crate::client::Params;

/// Account creation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Base username; callers usually append a unique suffix.
    pub username: String,
    pub password: String,
}

impl Default for AccountRequest {
    fn default() -> Self {
        Self {
            email: "test@test.com".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            username: "testuser".to_string(),
            password: "password".to_string(),
        }
    }
}

impl AccountRequest {
    pub(crate) fn to_params(&self, username: &str, domain_id: &str) -> Params {
        Params::new()
            .set("accounttype", 0)
            .set("email", &self.email)
            .set("firstname", &self.first_name)
            .set("lastname", &self.last_name)
            .set("username", username)
            .set("password", &self.password)
            .set("domainid", domain_id)
    }
}

/// Service offering creation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceOfferingRequest {
    pub name: String,
    pub display_text: String,
    pub cpu_number: u32,
    /// CPU speed in MHz.
    pub cpu_speed: u32,
    /// Memory in MB.
    pub memory_mb: u32,
}

impl Default for ServiceOfferingRequest {
    fn default() -> Self {
        Self {
            name: "Tiny Instance".to_string(),
            display_text: "Tiny Instance".to_string(),
            cpu_number: 1,
            cpu_speed: 100,
            memory_mb: 128,
        }
    }
}

impl ServiceOfferingRequest {
    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .set("name", &self.name)
            .set("displaytext", &self.display_text)
            .set("cpunumber", self.cpu_number)
            .set("cpuspeed", self.cpu_speed)
            .set("memory", self.memory_mb)
    }
}

/// Virtual machine deployment parameters that do not depend on other
/// resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VirtualMachineRequest {
    pub display_name: String,
    /// Hypervisor to deploy on; the server picks one when unset.
    pub hypervisor: Option<String>,
}

impl Default for VirtualMachineRequest {
    fn default() -> Self {
        Self {
            display_name: "Test VM".to_string(),
            hypervisor: None,
        }
    }
}

/// Resource IDs a deployment is bound to.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    pub zone_id: &'a str,
    pub template_id: &'a str,
    pub service_offering_id: &'a str,
    pub account: &'a str,
    pub domain_id: &'a str,
}

impl VirtualMachineRequest {
    pub(crate) fn to_params(&self, placement: &Placement<'_>) -> Params {
        Params::new()
            .set("displayname", &self.display_name)
            .set("zoneid", placement.zone_id)
            .set("templateid", placement.template_id)
            .set("serviceofferingid", placement.service_offering_id)
            .set("account", placement.account)
            .set("domainid", placement.domain_id)
            .set_opt("hypervisor", self.hypervisor.as_deref())
    }
}

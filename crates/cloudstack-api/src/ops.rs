//! Typed operations on top of [`ApiClient`].

use tracing::{info, instrument};

use crate::client::{take_object, ApiClient, Params};
use crate::error::Result;
use crate::requests::{AccountRequest, Placement, ServiceOfferingRequest, VirtualMachineRequest};
use crate::types::{
    Account, Domain, Host, Network, OsType, Router, ServiceOffering, Template, VirtualMachine,
    VlanIpRange, Zone,
};

/// Filter for `listRouters`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouterQuery {
    pub id: Option<String>,
    pub account: Option<String>,
    pub domain_id: Option<String>,
    pub list_all: bool,
}

impl RouterQuery {
    /// Routers visible to the caller across all accounts.
    #[must_use]
    pub fn all() -> Self {
        Self {
            list_all: true,
            ..Self::default()
        }
    }

    /// A single router.
    #[must_use]
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Routers owned by an account.
    #[must_use]
    pub fn by_account(account: impl Into<String>, domain_id: impl Into<String>) -> Self {
        Self {
            account: Some(account.into()),
            domain_id: Some(domain_id.into()),
            ..Self::default()
        }
    }

    fn to_params(&self) -> Params {
        Params::new()
            .set_opt("id", self.id.as_deref())
            .set_opt("account", self.account.as_deref())
            .set_opt("domainid", self.domain_id.as_deref())
            .set_opt("listall", self.list_all.then_some("true"))
    }
}

/// Filter for `listHosts`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostQuery {
    pub id: Option<String>,
    pub zone_id: Option<String>,
    pub host_type: Option<String>,
    pub state: Option<String>,
}

impl HostQuery {
    /// The `Up` routing host with the given ID in a zone.
    #[must_use]
    pub fn routing_host(zone_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            zone_id: Some(zone_id.into()),
            host_type: Some("Routing".to_string()),
            state: Some("Up".to_string()),
        }
    }

    fn to_params(&self) -> Params {
        Params::new()
            .set_opt("id", self.id.as_deref())
            .set_opt("zoneid", self.zone_id.as_deref())
            .set_opt("type", self.host_type.as_deref())
            .set_opt("state", self.state.as_deref())
    }
}

impl ApiClient {
    /// Lists routers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_routers(&self, query: &RouterQuery) -> Result<Vec<Router>> {
        self.list("listRouters", "router", query.to_params()).await
    }

    /// Lists hosts.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_hosts(&self, query: &HostQuery) -> Result<Vec<Host>> {
        self.list("listHosts", "host", query.to_params()).await
    }

    /// Lists the networks owned by an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_networks(&self, account: &str, domain_id: &str) -> Result<Vec<Network>> {
        let params = Params::new()
            .set("account", account)
            .set("domainid", domain_id);
        self.list("listNetworks", "network", params).await
    }

    /// Lists zones, optionally a single one.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_zones(&self, id: Option<&str>) -> Result<Vec<Zone>> {
        let params = Params::new().set_opt("id", id).set("available", "true");
        self.list("listZones", "zone", params).await
    }

    /// Lists the public VLAN IP ranges of a zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_vlan_ip_ranges(&self, zone_id: &str) -> Result<Vec<VlanIpRange>> {
        let params = Params::new().set("zoneid", zone_id);
        self.list("listVlanIpRanges", "vlaniprange", params).await
    }

    /// Lists domains, optionally a single one.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_domains(&self, id: Option<&str>) -> Result<Vec<Domain>> {
        let params = Params::new().set_opt("id", id);
        self.list("listDomains", "domain", params).await
    }

    /// Lists OS types matching a description.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_os_types(&self, description: &str) -> Result<Vec<OsType>> {
        let params = Params::new().set("description", description);
        self.list("listOsTypes", "ostype", params).await
    }

    /// Lists templates in a zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_templates(&self, filter: &str, zone_id: &str) -> Result<Vec<Template>> {
        let params = Params::new()
            .set("templatefilter", filter)
            .set("zoneid", zone_id);
        self.list("listTemplates", "template", params).await
    }

    /// Restarts a network, optionally destroying and recreating its router.
    ///
    /// # Errors
    ///
    /// Returns an error if the restart job fails.
    #[instrument(skip(self))]
    pub async fn restart_network(&self, id: &str, cleanup: bool) -> Result<()> {
        let params = Params::new().set("id", id).set("cleanup", cleanup);
        self.execute_async("restartNetwork", params).await?;
        info!(network = id, cleanup, "network restarted");
        Ok(())
    }

    /// Starts a router.
    ///
    /// # Errors
    ///
    /// Returns an error if the start job fails.
    #[instrument(skip(self))]
    pub async fn start_router(&self, id: &str) -> Result<Router> {
        self.router_job("startRouter", id).await
    }

    /// Stops a router.
    ///
    /// # Errors
    ///
    /// Returns an error if the stop job fails.
    #[instrument(skip(self))]
    pub async fn stop_router(&self, id: &str) -> Result<Router> {
        self.router_job("stopRouter", id).await
    }

    /// Reboots a router.
    ///
    /// # Errors
    ///
    /// Returns an error if the reboot job fails.
    #[instrument(skip(self))]
    pub async fn reboot_router(&self, id: &str) -> Result<Router> {
        self.router_job("rebootRouter", id).await
    }

    async fn router_job(&self, command: &str, id: &str) -> Result<Router> {
        let result = self
            .execute_async(command, Params::new().set("id", id))
            .await?;
        take_object(result, command, "router")
    }

    /// Creates a user account with the given username.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the account.
    #[instrument(skip(self, request))]
    pub async fn create_account(
        &self,
        request: &AccountRequest,
        username: &str,
        domain_id: &str,
    ) -> Result<Account> {
        let response = self
            .execute("createAccount", request.to_params(username, domain_id))
            .await?;
        let account: Account = take_object(response, "createAccount", "account")?;
        info!(account = %account.name, id = %account.id, "account created");
        Ok(account)
    }

    /// Creates a service offering.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the offering.
    #[instrument(skip(self, request))]
    pub async fn create_service_offering(
        &self,
        request: &ServiceOfferingRequest,
    ) -> Result<ServiceOffering> {
        let response = self
            .execute("createServiceOffering", request.to_params())
            .await?;
        let offering: ServiceOffering =
            take_object(response, "createServiceOffering", "serviceoffering")?;
        info!(id = %offering.id, "service offering created");
        Ok(offering)
    }

    /// Deploys a virtual machine and waits for the deployment job.
    ///
    /// # Errors
    ///
    /// Returns an error if the deployment job fails.
    #[instrument(skip(self, request))]
    pub async fn deploy_virtual_machine(
        &self,
        request: &VirtualMachineRequest,
        placement: &Placement<'_>,
    ) -> Result<VirtualMachine> {
        let result = self
            .execute_async("deployVirtualMachine", request.to_params(placement))
            .await?;
        let vm: VirtualMachine = take_object(result, "deployVirtualMachine", "virtualmachine")?;
        info!(id = %vm.id, state = %vm.state, "virtual machine deployed");
        Ok(vm)
    }

    /// Deletes an account together with everything it owns.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete job fails.
    #[instrument(skip(self))]
    pub async fn delete_account(&self, id: &str) -> Result<()> {
        self.execute_async("deleteAccount", Params::new().set("id", id))
            .await?;
        Ok(())
    }

    /// Deletes a service offering.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the delete.
    #[instrument(skip(self))]
    pub async fn delete_service_offering(&self, id: &str) -> Result<()> {
        self.execute("deleteServiceOffering", Params::new().set("id", id))
            .await?;
        Ok(())
    }
}

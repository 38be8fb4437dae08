//! Shared test resources.
//!
//! A [`Fixture`] is provisioned once per suite run and handed to every
//! scenario by reference. Scenarios never mutate it; teardown consumes it.

use cloudstack_api::{Account, Domain, ServiceOffering, Template, VirtualMachine, Zone};
use std::fmt;

/// Resources created (or resolved) for a suite run.
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Domain the account lives in.
    pub domain: Domain,
    /// Zone under test.
    pub zone: Zone,
    /// Template the VM was deployed from.
    pub template: Template,
    /// Account owning the VM and its network.
    pub account: Account,
    /// Offering created for the VM.
    pub service_offering: ServiceOffering,
    /// VM whose deployment brought up the account's router.
    pub virtual_machine: VirtualMachine,
}

/// A resource that could not be deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupFailure {
    /// Resource description, e.g. `account testuser-1a2b3c4d`.
    pub resource: String,
    /// Error text.
    pub error: String,
}

/// Outcome of tearing down a fixture.
///
/// Every deletion is attempted; failures are collected rather than aborting
/// the teardown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct CleanupReport {
    /// Deleted resources.
    pub removed: Vec<String>,
    /// Resources that could not be deleted.
    pub failures: Vec<CleanupFailure>,
}

impl CleanupReport {
    /// Records a deletion result.
    pub fn record<E: fmt::Display>(&mut self, resource: impl Into<String>, result: Result<(), E>) {
        let resource = resource.into();
        match result {
            Ok(()) => self.removed.push(resource),
            Err(e) => self.failures.push(CleanupFailure {
                resource,
                error: e.to_string(),
            }),
        }
    }

    /// Returns true if every deletion succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Converts the report into an error listing every failure.
    ///
    /// # Errors
    ///
    /// Returns an error if any deletion failed.
    pub fn into_result(self) -> anyhow::Result<()> {
        if self.is_clean() {
            Ok(())
        } else {
            Err(anyhow::anyhow!("{self}"))
        }
    }
}

impl fmt::Display for CleanupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return write!(f, "cleanup removed {} resources", self.removed.len());
        }
        write!(
            f,
            "cleanup failed for {} of {} resources",
            self.failures.len(),
            self.failures.len() + self.removed.len()
        )?;
        for failure in &self.failures {
            write!(f, "; {}: {}", failure.resource, failure.error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
impl Fixture {
    /// Fixture for an advanced zone with fixed IDs.
    pub(crate) fn sample() -> Self {
        Self {
            domain: Domain {
                id: "d-1".to_string(),
                name: "ROOT".to_string(),
            },
            zone: Zone {
                id: "z-1".to_string(),
                name: "zone1".to_string(),
                network_type: cloudstack_api::NetworkType::Advanced,
                dns1: Some("8.8.8.8".to_string()),
                dns2: None,
            },
            template: Template {
                id: "t-1".to_string(),
                name: "CentOS 5.3".to_string(),
                os_type_id: Some("os-12".to_string()),
            },
            account: Account {
                id: "a-1".to_string(),
                name: "testuser-1a2b3c4d".to_string(),
                domain_id: "d-1".to_string(),
            },
            service_offering: ServiceOffering {
                id: "so-1".to_string(),
                name: "Tiny Instance".to_string(),
            },
            virtual_machine: VirtualMachine {
                id: "vm-1".to_string(),
                name: "i-2-5-VM".to_string(),
                display_name: Some("Test VM".to_string()),
                state: "Running".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_report() {
        let mut report = CleanupReport::default();
        report.record("account a", Ok::<(), String>(()));
        report.record("service offering so", Ok::<(), String>(()));
        assert!(report.is_clean());
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_report_aggregates_all_failures() {
        let mut report = CleanupReport::default();
        report.record("account a", Err("job failed"));
        report.record("service offering so", Err("in use"));

        assert_eq!(report.failures.len(), 2);
        let err = report.into_result().unwrap_err().to_string();
        assert!(err.contains("cleanup failed for 2 of 2 resources"));
        assert!(err.contains("account a: job failed"));
        assert!(err.contains("service offering so: in use"));
    }
}

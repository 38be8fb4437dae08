//! Check macros for router scenarios.
//!
//! Scenarios return `anyhow::Result`, so these macros bail with a descriptive
//! error instead of panicking. The runner decides whether that error means
//! a failure or a skip.

/// Bails unless a router is in the expected state.
#[macro_export]
macro_rules! ensure_router_state {
    ($router:expr, $state:expr) => {
        ::anyhow::ensure!(
            $router.state == $state,
            "Check list router response for router state: router {} is {:?}, expected {:?}",
            $router.id,
            $router.state,
            $state
        )
    };
}

/// Bails unless a service status output reports `running` exactly once.
#[macro_export]
macro_rules! ensure_service_running {
    ($result:expr, $service:expr) => {{
        let output = format!("{}{}", $result.stdout, $result.stderr);
        let count = $crate::probe::running_count(&output);
        ::anyhow::ensure!(
            count == 1,
            "Check {} service is running or not: found {} running markers in {:?}",
            $service,
            count,
            output.trim()
        )
    }};
}

/// Asserts the outcome of a named scenario in a suite report.
#[macro_export]
macro_rules! assert_outcome {
    ($report:expr, $name:expr, $pattern:pat) => {{
        let scenario = $report
            .get($name)
            .unwrap_or_else(|| panic!("scenario {} not in report", $name));
        assert!(
            matches!(scenario.outcome, $pattern),
            "scenario {}: expected {}, got {}",
            $name,
            stringify!($pattern),
            scenario.outcome
        );
    }};
}

#[cfg(test)]
mod tests {
    use crate::remote::ExecResult;
    use cloudstack_api::{Router, RouterState};

    fn exec(stdout: &str) -> ExecResult {
        ExecResult {
            exit_code: 0,
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    fn check_running(result: &ExecResult) -> anyhow::Result<()> {
        ensure_service_running!(result, "dnsmasq");
        Ok(())
    }

    fn check_state(router: &Router, state: RouterState) -> anyhow::Result<()> {
        ensure_router_state!(router, state);
        Ok(())
    }

    #[test]
    fn test_service_running() {
        assert!(check_running(&exec("dnsmasq is running.")).is_ok());

        let err = check_running(&exec("dnsmasq is stopped")).unwrap_err();
        assert!(err.to_string().contains("Check dnsmasq service is running or not"));

        assert!(check_running(&exec("running\nrunning")).is_err());
    }

    #[test]
    fn test_router_state() {
        let router: Router = serde_json::from_str(r#"{"id":"r-1","state":"Stopped","zoneid":"z-1"}"#)
            .unwrap();
        assert!(check_state(&router, RouterState::Stopped).is_ok());

        let err = check_state(&router, RouterState::Running).unwrap_err();
        assert!(err.to_string().contains("router r-1 is Stopped, expected Running"));
    }
}

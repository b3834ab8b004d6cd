// src/deploy/wait.rs

use tracing::{debug, info};

use crate::config::WaitSettings;
use crate::ecs::{EcsBackend, Stability};
use crate::errors::{DeployError, Result};

/// Poll `service` until it reports stable.
///
/// Fails straight away on a describe error or when the service can no longer
/// settle (missing, draining, inactive). Returns the number of polls it took.
pub async fn wait_until_stable<B>(
    backend: &B,
    cluster: &str,
    service: &str,
    settings: &WaitSettings,
) -> Result<u32>
where
    B: EcsBackend + ?Sized,
{
    let mut attempts = 0;

    loop {
        attempts += 1;
        let snapshot = backend
            .describe_service(cluster, service)
            .await
            .map_err(|e| DeployError::Wait(e.to_string()))?;
        debug!(attempt = attempts, ?snapshot, "service state");

        match snapshot.stability() {
            Stability::Stable => return Ok(attempts),
            Stability::Failed(reason) => return Err(DeployError::Wait(reason)),
            Stability::Pending => {}
        }

        if attempts >= settings.max_attempts {
            return Err(DeployError::WaitTimeout { attempts });
        }

        if attempts % 5 == 1 {
            info!(
                "Waiting for {} in {} to be stable... (attempt {} of {})",
                service, cluster, attempts, settings.max_attempts
            );
        }
        tokio::time::sleep(settings.poll_interval).await;
    }
}

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

/// Retry budget for waiting on a host display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for MountPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 50,
            interval: Duration::from_millis(100),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("display surface did not mount after {attempts} retries")]
    Exhausted { attempts: u32 },
}

/// Resolves once `locate` yields a surface.
///
/// The lookup runs immediately, then once per `policy.interval` for up to
/// `policy.max_attempts` retries before giving up with a warning.
pub async fn wait_for_mount<S, P>(mut locate: P, policy: MountPolicy) -> Result<S, MountError>
where
    P: FnMut() -> Option<S>,
{
    if let Some(surface) = locate() {
        return Ok(surface);
    }

    for attempt in 1..=policy.max_attempts {
        sleep(policy.interval).await;
        if let Some(surface) = locate() {
            debug!(attempt, "display surface mounted");
            return Ok(surface);
        }
    }

    warn!(
        attempts = policy.max_attempts,
        "display surface never mounted, giving up"
    );
    Err(MountError::Exhausted {
        attempts: policy.max_attempts,
    })
}

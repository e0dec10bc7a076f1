//! Simulated network boundary
//!
//! Every catalog read goes through a [`FetchPolicy`]: it waits a fixed delay,
//! then rolls an independent failure chance. Tests inject
//! [`FetchPolicy::instant`] (no delay, never fails) or force failures with
//! [`FailureMode::Always`].

use crate::core::error::FetchError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_millis(300);
pub const DEFAULT_FAILURE_RATE: f64 = 0.05;

/// How a fetch decides whether to fail
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FailureMode {
    /// Every call succeeds
    Never,
    /// Every call fails with a network error
    Always,
    /// Each call fails independently with probability `rate`
    Random { rate: f64 },
}

impl Default for FailureMode {
    fn default() -> Self {
        FailureMode::Random {
            rate: DEFAULT_FAILURE_RATE,
        }
    }
}

/// Injectable latency and failure policy
///
/// Clones share the same random generator, so a seeded policy yields one
/// reproducible sequence of outcomes no matter which clone rolls.
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    delay: Duration,
    failure: FailureMode,
    rng: Arc<Mutex<StdRng>>,
}

impl FetchPolicy {
    pub fn new(delay: Duration, failure: FailureMode) -> Self {
        Self {
            delay,
            failure,
            rng: Arc::new(Mutex::new(StdRng::from_os_rng())),
        }
    }

    /// No delay and no failures
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, FailureMode::Never)
    }

    /// No delay and every call fails
    pub fn failing() -> Self {
        Self::new(Duration::ZERO, FailureMode::Always)
    }

    /// Use a deterministic random sequence
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Arc::new(Mutex::new(StdRng::seed_from_u64(seed)));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn failure_mode(&self) -> FailureMode {
        self.failure
    }

    /// Roll the failure chance for one call
    pub fn should_fail(&self) -> bool {
        match self.failure {
            FailureMode::Never => false,
            FailureMode::Always => true,
            FailureMode::Random { rate } => {
                let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                rng.random::<f64>() < rate
            }
        }
    }

    /// Wait out the delay, then fail or pass
    ///
    /// `what` names the resource for the error message ("products",
    /// "product details").
    pub async fn simulate(&self, what: &str) -> Result<(), FetchError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.should_fail() {
            tracing::debug!(resource = what, "Simulated network failure");
            return Err(FetchError::network(format!(
                "Failed to fetch {}. Please try again.",
                what
            )));
        }

        Ok(())
    }
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_DELAY, FailureMode::default())
    }
}

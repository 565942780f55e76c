use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::app::ports::EditorialPort;
use crate::config::CircuitBreakerConfig;
use crate::domain::Editorial;
use crate::error::{EditorialError, Result};
use crate::observability::AggregatorMetrics;

const SERVICE: &str = "editorial";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

#[derive(Debug)]
struct BreakerState {
    state: CircuitState,
    failures: u32,
    last_failure: Option<Instant>,
    /// Set while the single half-open trial call is outstanding.
    trial_in_flight: bool,
}

/// Clears the trial flag if the trial call is dropped before it records an outcome.
struct TrialGuard<'a> {
    breaker: &'a CircuitBreakerEditorialPort,
    armed: bool,
}

impl Drop for TrialGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.breaker.lock().trial_in_flight = false;
        }
    }
}

/// Editorial port decorator that stops calling a failing backend for a while.
pub struct CircuitBreakerEditorialPort {
    inner: Arc<dyn EditorialPort>,
    state: Mutex<BreakerState>,
    failure_threshold: u32,
    recovery_timeout: Duration,
}

impl CircuitBreakerEditorialPort {
    pub fn new(inner: Arc<dyn EditorialPort>, failure_threshold: u32, recovery_timeout: Duration) -> Self {
        Self {
            inner,
            state: Mutex::new(BreakerState {
                state: CircuitState::Closed,
                failures: 0,
                last_failure: None,
                trial_in_flight: false,
            }),
            failure_threshold: failure_threshold.max(1),
            recovery_timeout,
        }
    }

    pub fn from_config(inner: Arc<dyn EditorialPort>, config: &CircuitBreakerConfig) -> Self {
        Self::new(
            inner,
            config.failure_threshold,
            Duration::from_secs(config.recovery_timeout_seconds),
        )
    }

    fn lock(&self) -> MutexGuard<'_, BreakerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> CircuitState {
        self.lock().state
    }

    pub fn failure_count(&self) -> u32 {
        self.lock().failures
    }

    /// `None` rejects the call, `Some(true)` admits it as the half-open trial call.
    ///
    /// An expired open circuit moves to half-open; only one trial call is admitted until it reports back.
    fn admit(&self) -> Option<bool> {
        let mut guard = self.lock();
        match guard.state {
            CircuitState::Closed => Some(false),
            CircuitState::HalfOpen if guard.trial_in_flight => None,
            CircuitState::HalfOpen => {
                guard.trial_in_flight = true;
                Some(true)
            }
            CircuitState::Open => {
                let expired = guard
                    .last_failure
                    .map_or(true, |at| at.elapsed() >= self.recovery_timeout);
                if !expired {
                    return None;
                }
                info!(service = SERVICE, "Circuit half-open, letting one trial call through");
                guard.state = CircuitState::HalfOpen;
                guard.trial_in_flight = true;
                Some(true)
            }
        }
    }

    fn record_success(&self) {
        let mut guard = self.lock();
        if guard.state != CircuitState::Closed {
            info!(service = SERVICE, "Circuit closed");
        }
        guard.state = CircuitState::Closed;
        guard.failures = 0;
        guard.last_failure = None;
        guard.trial_in_flight = false;
    }

    fn record_failure(&self) {
        let mut guard = self.lock();
        guard.failures += 1;
        guard.last_failure = Some(Instant::now());
        guard.trial_in_flight = false;
        let reopen = guard.state == CircuitState::HalfOpen;
        if (reopen || guard.failures >= self.failure_threshold) && guard.state != CircuitState::Open {
            warn!(service = SERVICE, failures = guard.failures, "Circuit opened");
            guard.state = CircuitState::Open;
            AggregatorMetrics::record_circuit_opened(SERVICE);
        }
    }
}

#[async_trait]
impl EditorialPort for CircuitBreakerEditorialPort {
    async fn find_editorial_by_id(&self, id: &str) -> Result<Editorial> {
        let Some(trial) = self.admit() else {
            return Err(EditorialError::CircuitOpen {
                service: SERVICE.to_string(),
            });
        };
        let mut guard = trial.then(|| TrialGuard { breaker: self, armed: true });
        let result = self.inner.find_editorial_by_id(id).await;
        match &result {
            Ok(_) => self.record_success(),
            Err(e) if e.is_not_found() => self.record_success(),
            Err(_) => self.record_failure(),
        }
        if let Some(guard) = guard.as_mut() {
            guard.armed = false;
        }
        result
    }
}

pub mod circuit_breaker;
pub mod http_client;
pub mod in_memory;

use std::sync::Arc;

use crate::app::ports::Backends;
use crate::config::Config;
use crate::error::Result;

use self::circuit_breaker::CircuitBreakerEditorialPort;
use self::http_client::ServiceClient;

/// HTTP backends for every port, with the editorial port behind a circuit breaker.
pub fn http_backends(config: &Config) -> Result<Backends> {
    let client = Arc::new(ServiceClient::new(config.services.clone())?);
    let editorials = CircuitBreakerEditorialPort::from_config(client.clone(), &config.circuit_breaker);
    Ok(Backends {
        editorials: Arc::new(editorials),
        sections: client.clone(),
        journalists: client.clone(),
        tags: client.clone(),
        multimedia: client.clone(),
        membership: client.clone(),
        legacy: client,
    })
}

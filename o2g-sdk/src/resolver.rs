//! Endpoint bootstrap and API version negotiation

use o2g_api::{AccessMode, ApiDescriptor, GatewayRest, ServiceId, Version};
use rest_client::uri;
use tracing::{debug, info};

use crate::error::{SdkError, SdkResult};
use crate::host::HostDescriptor;
use crate::registry::ServiceRegistry;

/// Fetch the gateway descriptor, trying the private address first.
///
/// The public address is only tried when the private one is absent or
/// fails. There is no retry. On success the gateway URI of the registry
/// points at the address that answered.
pub(crate) async fn bootstrap(
    registry: &ServiceRegistry,
    host: &HostDescriptor,
) -> SdkResult<(ApiDescriptor, AccessMode)> {
    host.validate()?;

    let candidates = [
        (host.private_address(), AccessMode::Private),
        (host.public_address(), AccessMode::Public),
    ];

    for (address, mode) in candidates {
        let Some(address) = address else {
            continue;
        };

        match fetch_descriptor(registry, address).await {
            Ok(descriptor) => {
                info!("Connected to gateway on {} ({:?} access)", address, mode);
                return Ok((descriptor, mode));
            }
            Err(e) => debug!("Unable to bootstrap on {}: {}", address, e),
        }
    }

    Err(SdkError::Unreachable(host.to_string()))
}

async fn fetch_descriptor(registry: &ServiceRegistry, address: &str) -> SdkResult<ApiDescriptor> {
    registry.set_base_uri(ServiceId::Gateway, uri::gateway_root(address));
    let gateway = registry
        .get_or_create::<GatewayRest>(ServiceId::Gateway)
        .ok_or(SdkError::ServiceUnavailable(ServiceId::Gateway))?;

    Ok(gateway.get().await?)
}

/// Select the API version to use.
///
/// A pinned version must be advertised by the gateway. Otherwise the version
/// marked current is selected.
pub fn negotiate_version<'a>(
    descriptor: &'a ApiDescriptor,
    pinned: Option<&str>,
) -> SdkResult<&'a Version> {
    match pinned {
        Some(id) => descriptor
            .versions
            .iter()
            .find(|version| version.id == id)
            .ok_or_else(|| SdkError::UnsupportedVersion(id.to_string())),
        None => descriptor
            .versions
            .iter()
            .find(|version| version.is_current())
            .ok_or(SdkError::NoCurrentVersion),
    }
}

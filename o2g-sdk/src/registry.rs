//! Per-service URIs and cached clients
//!
//! The registry has one slot per [`ServiceId`]. A slot moves from
//! unregistered to registered when a URI becomes known, and to constructed
//! the first time a client is requested. Construction happens under the
//! registry lock and performs no I/O, so concurrent first accesses observe
//! the same client.

use std::any::Any;
use std::sync::Arc;

use o2g_api::{AccessMode, RestService, ServiceId, SessionInfo};
use parking_lot::Mutex;
use rest_client::HttpTransport;
use tracing::{debug, warn};

/// Prefix of every telephony-related relative URL
const TELEPHONY_PREFIX: &str = "/telephony";

enum Slot {
    Unregistered,
    Registered(String),
    Constructed {
        uri: String,
        client: Arc<dyn Any + Send + Sync>,
    },
}

impl Slot {
    fn uri(&self) -> Option<&str> {
        match self {
            Slot::Unregistered => None,
            Slot::Registered(uri) | Slot::Constructed { uri, .. } => Some(uri.as_str()),
        }
    }
}

/// Registry of service URIs and the clients bound to them
pub struct ServiceRegistry {
    transport: Arc<dyn HttpTransport>,
    slots: Mutex<Vec<Slot>>,
}

impl ServiceRegistry {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        let slots = ServiceId::ALL.iter().map(|_| Slot::Unregistered).collect();
        Self {
            transport,
            slots: Mutex::new(slots),
        }
    }

    /// Transport shared by every client of this registry
    pub fn transport(&self) -> Arc<dyn HttpTransport> {
        self.transport.clone()
    }

    /// Register `uri` for `id`, replacing any previous mapping and dropping
    /// a client already bound to the old URI.
    pub fn set_base_uri(&self, id: ServiceId, uri: impl Into<String>) {
        let uri = uri.into();
        debug!("Register service {}: {}", id, uri);
        self.slots.lock()[id.index()] = Slot::Registered(uri);
    }

    pub fn base_uri(&self, id: ServiceId) -> Option<String> {
        self.slots.lock()[id.index()].uri().map(str::to_string)
    }

    pub fn is_registered(&self, id: ServiceId) -> bool {
        self.slots.lock()[id.index()].uri().is_some()
    }

    /// Client bound to the URI of `id`, constructed on first access.
    ///
    /// Returns `None` while no URI is registered for `id`, or if a client of
    /// another type was already constructed for it.
    pub fn get_or_create<T: RestService>(&self, id: ServiceId) -> Option<Arc<T>> {
        let mut slots = self.slots.lock();
        let slot = &mut slots[id.index()];

        match slot {
            Slot::Unregistered => None,
            Slot::Constructed { client, .. } => match client.clone().downcast::<T>() {
                Ok(client) => Some(client),
                Err(_) => {
                    warn!(
                        "Service {} is bound to another client type than {}",
                        id,
                        std::any::type_name::<T>()
                    );
                    None
                }
            },
            Slot::Registered(uri) => {
                let uri = uri.clone();
                let client = Arc::new(T::new(uri.clone(), self.transport.clone()));
                *slot = Slot::Constructed {
                    uri,
                    client: client.clone(),
                };
                Some(client)
            }
        }
    }

    /// Register the services advertised in a session payload.
    ///
    /// URLs are built from the session base URL of `mode`. Every relative URL
    /// under `/telephony` is folded into [`ServiceId::Telephony`]. Services
    /// already registered are left untouched.
    pub fn register_from_session_services(&self, session: &SessionInfo, mode: AccessMode) {
        let base_url = session.base_url(mode);
        let mut slots = self.slots.lock();

        for service in &session.services {
            let (id, uri) = if service.relative_url.starts_with(TELEPHONY_PREFIX) {
                (ServiceId::Telephony, format!("{base_url}{TELEPHONY_PREFIX}"))
            } else {
                match ServiceId::from_name(&service.service_name) {
                    Some(id) => (id, format!("{base_url}{}", service.relative_url)),
                    None => {
                        debug!("Ignoring unknown service {}", service.service_name);
                        continue;
                    }
                }
            };

            let slot = &mut slots[id.index()];
            if slot.uri().is_none() {
                debug!("Register service {}: {}", id, uri);
                *slot = Slot::Registered(uri);
            }
        }
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slots = self.slots.lock();
        let mut map = f.debug_map();
        for id in ServiceId::ALL {
            if let Some(uri) = slots[id.index()].uri() {
                map.entry(&id, &uri);
            }
        }
        map.finish()
    }
}

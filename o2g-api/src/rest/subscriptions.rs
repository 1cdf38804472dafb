use rest_client::{HttpRequest, HttpTransport};
use std::sync::Arc;

use super::{get_result, RestService};
use crate::subscription::Subscription;
use crate::types::SubscriptionResult;
use crate::Result;

/// Client of the subscription service
pub struct SubscriptionsRest {
    uri: String,
    transport: Arc<dyn HttpTransport>,
}

impl SubscriptionsRest {
    /// Submit a subscription. The result carries the polling URLs when the
    /// gateway accepts it.
    pub async fn create(&self, subscription: &Subscription) -> Result<Option<SubscriptionResult>> {
        let request = HttpRequest::post(&self.uri).with_json(subscription)?;
        let response = self.transport.send(request).await?;
        get_result(&response)
    }
}

impl RestService for SubscriptionsRest {
    fn new(uri: String, transport: Arc<dyn HttpTransport>) -> Self {
        Self { uri, transport }
    }

    fn uri(&self) -> &str {
        &self.uri
    }
}

use fe2o3_amqp::session::SessionHandle;
use fe2o3_amqp_cbs::{client::CbsClient, token::CbsToken};
use fe2o3_amqp_types::primitives::Timestamp;

use crate::{authorization::SharedAccessSignature, constants::SAS_TOKEN_TYPE};

use super::error::AmqpProducerError;

/// Presents `signature` to the claims-based-security node for `resource`.
///
/// A CBS link is attached for the duration of the call and closed afterwards.
pub(crate) async fn authorize(
    session: &mut SessionHandle<()>,
    resource: &str,
    signature: &SharedAccessSignature,
) -> Result<(), AmqpProducerError> {
    log::debug!("Authorizing {} through the CBS node", resource);

    let mut cbs_client = CbsClient::attach(session)
        .await
        .map_err(|err| AmqpProducerError::Authorization(err.to_string()))?;

    let expires_at_utc =
        Timestamp::from_milliseconds(signature.expiration().unix_timestamp() * 1000);
    let token = CbsToken::new(signature.value(), SAS_TOKEN_TYPE, Some(expires_at_utc));
    let put_result = cbs_client
        .put_token(resource, token)
        .await
        .map_err(|err| AmqpProducerError::Authorization(err.to_string()));

    if let Err(err) = cbs_client.close().await {
        log::error!("Found error closing CBS client: {:?}", err);
    }

    put_result
}

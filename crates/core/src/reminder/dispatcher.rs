use super::composer::ComposedEmail;
use herald_infra::HeraldContext;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Notification channel error: {0}")]
    Channel(String),
    #[error("Notification channel did not answer within the dispatch timeout")]
    TimedOut,
}

/// Hands one composed notification to the channel. A send gets one
/// attempt bounded by `dispatch_timeout_millis`, there are no retries
/// here. Retrying is the next pass run's job, via the absent ledger row.
pub async fn dispatch(
    ctx: &HeraldContext,
    to: &str,
    email: &ComposedEmail,
) -> Result<(), DispatchError> {
    let timeout = Duration::from_millis(ctx.config.dispatch_timeout_millis);
    let send = ctx
        .mailer
        .send(to, &email.subject, &email.html, &email.text);

    match tokio::time::timeout(timeout, send).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(DispatchError::Channel(format!("{:?}", e))),
        Err(_) => Err(DispatchError::TimedOut),
    }
}

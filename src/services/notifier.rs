//! Out-of-band delivery of password reset links

use async_trait::async_trait;

/// Delivers a password reset link to the account holder.
///
/// Implementations talk to whatever channel reaches the user (mail relay,
/// message queue). The raw token only ever travels through this seam.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResetTokenNotifier: Send + Sync {
    async fn send_reset_link(&self, email: &str, name: &str, link: &str) -> anyhow::Result<()>;
}

/// Development notifier: writes the link to the debug log
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl ResetTokenNotifier for LogNotifier {
    async fn send_reset_link(&self, email: &str, name: &str, link: &str) -> anyhow::Result<()> {
        tracing::debug!(email = %email, name = %name, link = %link, "Password reset link issued");
        Ok(())
    }
}

/// Send a reset link for `token`. Delivery failures are logged, not returned,
/// so the caller's response does not depend on the account's mailbox.
pub async fn deliver_reset_link(
    notifier: &dyn ResetTokenNotifier,
    base_url: &str,
    email: &str,
    name: &str,
    token: &str,
) -> bool {
    let link = reset_link(base_url, token);
    match notifier.send_reset_link(email, name, &link).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = ?e, "Failed to deliver password reset link");
            false
        }
    }
}

/// Build the link the user follows to reset their password
pub fn reset_link(base_url: &str, token: &str) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{}{}token={}", base_url, separator, token)
}

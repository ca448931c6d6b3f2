/*
 * Responsibility
 * - the "authenticated context" type as handlers see it
 * - the auth gate verifies the token and stores it in request extensions;
 *   handlers only ever receive this type
 */

/// Context attached to a request once its bearer token has been verified.
///
/// Only the auth path inside this crate can build one, and handlers get
/// read access only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    user_id: String,
}

impl AuthCtx {
    pub(crate) fn new(user_id: String) -> Self {
        Self { user_id }
    }

    /// Subject id taken from the verified token's `id` claim.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

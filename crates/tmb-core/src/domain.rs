/// Telegram user id (numeric). Key of the session store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Telegram message id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// A stable reference to a Telegram message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

/// One user's disposable inbox: the mailbox credentials plus the provider
/// bearer token obtained for them.
///
/// All three fields are non-empty and `address` has the `mailbox@domain`
/// shape. Values built by [`crate::recovery::decode`] are checked; values
/// built by provisioning come straight from the provider.
#[derive(Clone, PartialEq, Eq)]
pub struct MailSession {
    pub address: String,
    pub password: String,
    pub auth_token: String,
}

impl MailSession {
    pub fn new(
        address: impl Into<String>,
        password: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            password: password.into(),
            auth_token: auth_token.into(),
        }
    }
}

// Credentials stay out of logs.
impl std::fmt::Debug for MailSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailSession")
            .field("address", &self.address)
            .field("password", &"<redacted>")
            .field("auth_token", &"<redacted>")
            .finish()
    }
}

/// `true` when `s` looks like `mailbox@domain`: exactly one `@` with
/// something on both sides and no whitespace.
pub fn is_mailbox_address(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !s.chars().any(char::is_whitespace)
}

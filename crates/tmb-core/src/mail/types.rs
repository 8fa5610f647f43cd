use serde::Deserialize;

/// Sender of a message. Only `address` is relied upon.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Sender {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub name: String,
}

/// Entry of an inbox listing.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct MessageSummary {
    pub id: String,
}

/// A full message as returned by the provider.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct MailMessage {
    pub id: String,
    #[serde(default)]
    pub from: Option<Sender>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<String>,
}

impl MailMessage {
    pub fn from_address(&self) -> Option<&str> {
        self.from
            .as_ref()
            .map(|f| f.address.as_str())
            .filter(|a| !a.trim().is_empty())
    }
}

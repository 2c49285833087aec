//! Core types for the subscription registry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Store-assigned identifier for a subscription.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(pub String);

impl SubscriptionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubscriptionId({})", self.0)
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SubscriptionId {
    fn from(s: &str) -> Self {
        SubscriptionId(s.to_string())
    }
}

/// Milliseconds since Unix epoch.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Current time.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or_default();
        Timestamp(millis)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

/// Delivery transport of a channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChannelType {
    Email,
    Rest,
}

/// Where notifications for a subscription are sent. Opaque to the registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mail_addresses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Channel {
    pub fn email(addresses: Vec<String>) -> Self {
        Self {
            channel_type: ChannelType::Email,
            mail_addresses: addresses,
            url: None,
        }
    }

    pub fn rest(url: impl Into<String>) -> Self {
        Self {
            channel_type: ChannelType::Rest,
            mail_addresses: Vec::new(),
            url: Some(url.into()),
        }
    }
}

/// A subscription record.
///
/// `slug` is the caller-chosen identity and the key for update and delete.
/// `id`, `created` and `modified` are owned by the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SubscriptionId>,
    pub slug: String,
    #[serde(default)]
    pub receiver: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subscribed_categories: Vec<String>,
    #[serde(default)]
    pub subscribed_labels: Vec<String>,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub created: Timestamp,
    #[serde(default)]
    pub modified: Timestamp,
    #[serde(default)]
    pub origin: Timestamp,
}

impl Subscription {
    pub fn new(slug: impl Into<String>, receiver: impl Into<String>) -> Self {
        Self {
            id: None,
            slug: slug.into(),
            receiver: receiver.into(),
            description: String::new(),
            subscribed_categories: Vec::new(),
            subscribed_labels: Vec::new(),
            channels: Vec::new(),
            created: Timestamp::default(),
            modified: Timestamp::default(),
            origin: Timestamp::default(),
        }
    }

    pub fn with_categories<I, T>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.subscribed_categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_labels<I, T>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.subscribed_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channels.push(channel);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// True if any of `categories` is in this subscription's category set.
    pub fn has_any_category(&self, categories: &[String]) -> bool {
        categories.iter().any(|c| self.subscribed_categories.contains(c))
    }

    /// True if any of `labels` is in this subscription's label set.
    pub fn has_any_label(&self, labels: &[String]) -> bool {
        labels.iter().any(|l| self.subscribed_labels.contains(l))
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "Subscription({})", self.slug),
        }
    }
}

/// Outcome of a successful create: the assigned id and the echoed slug.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Created {
    pub id: SubscriptionId,
    pub slug: String,
}

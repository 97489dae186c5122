use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A user-scheduled notification, structurally unrelated to bills.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    pub method: NotifyMethod,
}

impl Reminder {
    pub fn new(
        id: u64,
        title: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
        method: NotifyMethod,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            date,
            method,
        }
    }
}

/// Supported notification channels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotifyMethod {
    #[default]
    Email,
    Sms,
    Push,
}

impl NotifyMethod {
    pub fn label(&self) -> &'static str {
        match self {
            NotifyMethod::Email => "Email",
            NotifyMethod::Sms => "SMS",
            NotifyMethod::Push => "Push Notification",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "email" => Some(NotifyMethod::Email),
            "sms" => Some(NotifyMethod::Sms),
            "push" => Some(NotifyMethod::Push),
            _ => None,
        }
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// A stored record as it is read back from the document store.
pub type Document = Map<String, Value>;

pub const DEFAULT_LIST_LIMIT: u32 = 50;
pub const TROPHY_UNIT_PRICE: f64 = 9.0;

/// A validated payload that is persisted under its own record kind.
pub trait Record: Serialize {
    const KIND: &'static str;

    fn to_document(&self) -> Result<Document, serde_json::Error> {
        serde_json::to_value(self).and_then(serde_json::from_value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventFormat {
    #[default]
    Standard,
    Themed,
}

/// Trivia event booking submitted by a community associate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Booking {
    /// Event date, conventionally YYYY-MM-DD
    pub date: String,
    /// Start time, conventionally HH:MM
    pub start_time: String,
    pub location: String,
    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    pub expected_attendance: Option<i64>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub format: EventFormat,
    #[serde(default)]
    pub request_trophy_pack: bool,
    pub notes: Option<String>,
    pub contact_name: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub contact_email: Option<String>,
}

impl Record for Booking {
    const KIND: &'static str = "booking";
}

/// Order for a pack of owl trophies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TrophyOrder {
    #[validate(range(min = 10, message = "minimum order is 10 units"))]
    pub quantity: i64,
    pub delivery_address: String,
    pub contact_name: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub contact_email: Option<String>,
    /// Add to the existing invoice instead of charging separately
    #[serde(default = "default_add_to_invoice")]
    pub add_to_invoice: bool,
}

impl TrophyOrder {
    pub fn total(&self) -> f64 {
        (TROPHY_UNIT_PRICE * self.quantity as f64 * 100.0).round() / 100.0
    }
}

impl Record for TrophyOrder {
    const KIND: &'static str = "trophyorder";
}

fn default_add_to_invoice() -> bool {
    true
}

/// Fixed confirmation email content returned with every booking
#[derive(Debug, Serialize)]
pub struct AutoEmail {
    pub subject: &'static str,
    pub host_panel_link: &'static str,
    pub quiz_edition: &'static str,
    pub printable_poster_url: &'static str,
    pub wework_app_text: &'static str,
}

pub const BOOKING_CONFIRMATION: AutoEmail = AutoEmail {
    subject: "QED Express – Your Trivia Event is Confirmed",
    host_panel_link: "https://qed.example.com/host-panel",
    quiz_edition: "Auto-generated for your date",
    printable_poster_url: "https://qed.example.com/poster.pdf",
    wework_app_text: "Join us for QED Express Trivia!",
};

#[derive(Debug, Serialize)]
pub struct BookingCreated {
    pub ok: bool,
    pub id: String,
    pub auto_email: AutoEmail,
}

#[derive(Debug, Serialize)]
pub struct TrophyOrderCreated {
    pub ok: bool,
    pub id: String,
    pub unit_price: f64,
    pub total: f64,
}

/// Query parameters for list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

impl ListQuery {
    /// A negative limit caps the result at its magnitude.
    pub fn limit(&self) -> u32 {
        match self.limit {
            Some(limit) => u32::try_from(limit.unsigned_abs()).unwrap_or(u32::MAX),
            None => DEFAULT_LIST_LIMIT,
        }
    }
}

/// Database connectivity report for GET /test
#[derive(Debug, Serialize)]
pub struct DatabaseReport {
    pub backend: &'static str,
    pub database: String,
    pub database_url: Option<&'static str>,
    pub database_name: Option<String>,
    pub connection_status: &'static str,
    pub collections: Vec<String>,
}

impl Default for DatabaseReport {
    fn default() -> Self {
        Self {
            backend: "✅ Running",
            database: "❌ Not Available".to_string(),
            database_url: None,
            database_name: None,
            connection_status: "Not Connected",
            collections: Vec::new(),
        }
    }
}

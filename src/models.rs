use std::collections::{HashMap, HashSet};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

pub(crate) fn unix_timestamp_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// A room listing as returned by the listing collaborators. Already shaped
/// for display; the state core never re-fetches or paginates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomListing {
    pub id: String,
    pub title: String,
    /// Monthly rent in rupees.
    pub price: u32,
    pub images: Vec<String>,
    pub location: String,
    pub rating: f32,
}

impl RoomListing {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        price: u32,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            images: Vec::new(),
            location: location.into(),
            rating: 0.0,
        }
    }
}

/// A bookmarked listing. This is the only shape that reaches persistent
/// storage: a JSON array of these under a single key, no version field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRoom {
    pub id: String,
    pub title: String,
    pub price: u32,
    pub images: Vec<String>,
    pub location: String,
    pub rating: f32,
    /// Unix millis at the moment the room was saved.
    pub saved_at: i64,
}

impl SavedRoom {
    pub fn from_listing(listing: RoomListing, saved_at: i64) -> Self {
        Self {
            id: listing.id,
            title: listing.title,
            price: listing.price,
            images: listing.images,
            location: listing.location,
            rating: listing.rating,
            saved_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Message,
    BookingRequest,
    BookingConfirmed,
    PaymentReminder,
    PaymentReceived,
    System,
}

/// A session-durable record of an event needing user attention. Read state
/// moves one way (unread to read); records leave the list only via a bulk
/// clear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: u64,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// Opaque payload passed through to whoever renders the record.
    pub data: serde_json::Value,
    pub read: bool,
    pub created_at: i64,
    pub icon: Option<String>,
}

/// What callers hand to `NotificationCenter::add_notification`. The center
/// fills in the id (when absent), the timestamp, and the unread flag.
#[derive(Debug, Clone)]
pub struct NotificationInput {
    pub id: Option<u64>,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub data: serde_json::Value,
    pub icon: Option<String>,
}

impl NotificationInput {
    pub fn new(
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            kind,
            title: title.into(),
            message: message.into(),
            data: serde_json::Value::Null,
            icon: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryChannel {
    InApp,
    Toast,
    Push,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    pub push_enabled: bool,
    pub show_toasts: bool,
    pub channels: HashMap<NotificationKind, HashSet<DeliveryChannel>>,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            push_enabled: false,
            show_toasts: true,
            channels: default_channels(),
        }
    }
}

impl NotificationPreferences {
    /// Field-wise merge; `None` keeps the current value. A channels patch
    /// overrides per category rather than replacing the whole map.
    pub fn apply(&mut self, patch: PreferencesPatch) {
        if let Some(push_enabled) = patch.push_enabled {
            self.push_enabled = push_enabled;
        }
        if let Some(show_toasts) = patch.show_toasts {
            self.show_toasts = show_toasts;
        }
        if let Some(channels) = patch.channels {
            self.channels.extend(channels);
        }
    }

    pub fn channels_for(&self, kind: NotificationKind) -> HashSet<DeliveryChannel> {
        self.channels.get(&kind).cloned().unwrap_or_default()
    }
}

fn default_channels() -> HashMap<NotificationKind, HashSet<DeliveryChannel>> {
    use DeliveryChannel::*;
    use NotificationKind::*;
    [
        (Message, HashSet::from([InApp, Toast, Push])),
        (BookingRequest, HashSet::from([InApp, Toast, Push])),
        (BookingConfirmed, HashSet::from([InApp, Toast])),
        (PaymentReminder, HashSet::from([InApp, Toast, Push])),
        (PaymentReceived, HashSet::from([InApp, Toast])),
        (System, HashSet::from([InApp])),
    ]
    .into()
}

#[derive(Debug, Clone, Default)]
pub struct PreferencesPatch {
    pub push_enabled: Option<bool>,
    pub show_toasts: Option<bool>,
    pub channels: Option<HashMap<NotificationKind, HashSet<DeliveryChannel>>>,
}

/// Placeholder shape consumed by the chat views. No delivery guarantee
/// applies; every mutation is a local echo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub peer_name: String,
    pub messages: Vec<Message>,
    pub unread: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender: String,
    pub body: String,
    pub sent_at: i64,
    pub read: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferences_patch_merges_field_wise() {
        let mut prefs = NotificationPreferences::default();
        assert!(prefs.show_toasts);
        assert!(!prefs.push_enabled);

        prefs.apply(PreferencesPatch {
            push_enabled: Some(true),
            ..Default::default()
        });
        assert!(prefs.push_enabled);
        assert!(prefs.show_toasts, "untouched field must survive the merge");

        prefs.apply(PreferencesPatch {
            show_toasts: Some(false),
            ..Default::default()
        });
        assert!(prefs.push_enabled);
        assert!(!prefs.show_toasts);
    }

    #[test]
    fn channels_patch_overrides_per_category() {
        let mut prefs = NotificationPreferences::default();
        let quiet = HashSet::from([DeliveryChannel::InApp]);
        prefs.apply(PreferencesPatch {
            channels: Some([(NotificationKind::Message, quiet.clone())].into()),
            ..Default::default()
        });

        assert_eq!(prefs.channels_for(NotificationKind::Message), quiet);
        // Other categories keep their defaults.
        assert!(
            prefs
                .channels_for(NotificationKind::BookingRequest)
                .contains(&DeliveryChannel::Push)
        );
    }

    #[test]
    fn saved_room_carries_listing_fields() {
        let mut listing = RoomListing::new("r-9", "2BHK near metro", 14_500, "Koramangala");
        listing.rating = 4.3;
        listing.images = vec!["https://cdn.roomnest.in/r-9/1.jpg".into()];

        let saved = SavedRoom::from_listing(listing.clone(), 1_700_000_000_000);
        assert_eq!(saved.id, listing.id);
        assert_eq!(saved.price, listing.price);
        assert_eq!(saved.images, listing.images);
        assert_eq!(saved.saved_at, 1_700_000_000_000);
    }
}

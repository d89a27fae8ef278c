//! Client-side state core for the roomnest room/PG rental app.
//!
//! A frontend embeds this crate for the parts of the app that carry real
//! state: the saved-rooms list with write-through persistence, the
//! notification/toast pipeline, and the (deliberately inert) chat shell.
//! Rendering, routing and forms stay on the frontend's side.
//!
//! Each manager is an explicit instance created by its own constructor, so
//! tests and multi-window hosts get isolated state instead of ambient
//! globals.

pub mod chat;
pub mod mock;
pub mod models;
pub mod notifications;
pub mod push;
pub mod saved;
pub mod store;
pub mod toast;

pub use chat::{ChatShell, ChatTransport, MockChatTransport};
pub use models::{
    Conversation, DeliveryChannel, Message, NotificationInput, NotificationKind,
    NotificationPreferences, NotificationRecord, PreferencesPatch, RoomListing, SavedRoom,
};
pub use notifications::{NotificationCenter, NotificationState};
pub use push::{NoopPushService, PushError, PushService};
pub use saved::{SavedRoomsManager, StatusKind, StatusMessage};
pub use store::Store;
pub use toast::{DEFAULT_TOAST_DURATION, Toast, ToastAction};

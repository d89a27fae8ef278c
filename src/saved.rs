use anyhow::Result;

use crate::models::{RoomListing, SavedRoom, unix_timestamp_ms};
use crate::store::Store;

pub const SAVED_ROOMS_KEY: &str = "saved_rooms";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

/// In-memory list of saved rooms, written through to the [`Store`] on every
/// mutation. Status messages are a single slot: a second status raised
/// before the first is consumed overwrites it silently.
pub struct SavedRoomsManager {
    store: Store,
    rooms: Vec<SavedRoom>,
    last_status: Option<StatusMessage>,
}

impl SavedRoomsManager {
    /// Loads the persisted list, substituting empty when the key is missing
    /// or holds malformed data.
    pub fn new(store: Store) -> Result<Self> {
        let rooms = store.load(SAVED_ROOMS_KEY)?.unwrap_or_default();
        Ok(Self {
            store,
            rooms,
            last_status: None,
        })
    }

    pub fn rooms(&self) -> &[SavedRoom] {
        &self.rooms
    }

    pub fn is_room_saved(&self, id: &str) -> bool {
        self.rooms.iter().any(|room| room.id == id)
    }

    /// Appends the room unless its id is already present; a duplicate save
    /// leaves the list untouched and raises an informational status.
    pub fn save_room(&mut self, room: RoomListing) -> Result<()> {
        if self.is_room_saved(&room.id) {
            self.set_status(StatusKind::Info, "Room already saved");
            return Ok(());
        }

        self.rooms
            .push(SavedRoom::from_listing(room, unix_timestamp_ms()));
        self.persist()?;
        self.set_status(StatusKind::Success, "Room saved");
        Ok(())
    }

    /// Removes the matching entry. Removing an id that is not present is a
    /// no-op and raises no status.
    pub fn unsave_room(&mut self, id: &str) -> Result<()> {
        let before = self.rooms.len();
        self.rooms.retain(|room| room.id != id);
        if self.rooms.len() == before {
            return Ok(());
        }

        self.persist()?;
        self.set_status(StatusKind::Success, "Room removed from saved");
        Ok(())
    }

    pub fn toggle_save_room(&mut self, room: RoomListing) -> Result<()> {
        if self.is_room_saved(&room.id) {
            self.unsave_room(&room.id)
        } else {
            self.save_room(room)
        }
    }

    pub fn clear_all(&mut self) -> Result<()> {
        self.rooms.clear();
        self.persist()?;
        self.set_status(StatusKind::Success, "Saved rooms cleared");
        Ok(())
    }

    /// Consumes the pending status message, if any.
    pub fn take_status(&mut self) -> Option<StatusMessage> {
        self.last_status.take()
    }

    fn set_status(&mut self, kind: StatusKind, text: &str) {
        self.last_status = Some(StatusMessage {
            kind,
            text: text.to_string(),
        });
    }

    fn persist(&self) -> Result<()> {
        self.store.save(SAVED_ROOMS_KEY, &self.rooms)
    }
}

use roomnest::{SavedRoomsManager, Store, mock};

#[test]
fn saved_list_survives_a_store_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roomnest.db");
    let rooms = mock::sample_rooms();

    {
        let store = Store::open(&path).unwrap();
        let mut saved = SavedRoomsManager::new(store).unwrap();
        saved.save_room(rooms[0].clone()).unwrap();
        saved.save_room(rooms[1].clone()).unwrap();
    }

    let store = Store::open(&path).unwrap();
    let saved = SavedRoomsManager::new(store).unwrap();
    assert_eq!(saved.rooms().len(), 2);
    assert_eq!(saved.rooms()[0].id, rooms[0].id);
    assert_eq!(saved.rooms()[1].id, rooms[1].id);
    assert!(saved.rooms()[0].saved_at > 0);
}

#[test]
fn toggle_round_trip_leaves_persisted_state_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roomnest.db");
    let rooms = mock::sample_rooms();

    {
        let store = Store::open(&path).unwrap();
        let mut saved = SavedRoomsManager::new(store).unwrap();
        saved.save_room(rooms[0].clone()).unwrap();
        saved.toggle_save_room(rooms[1].clone()).unwrap();
        saved.toggle_save_room(rooms[1].clone()).unwrap();
    }

    let store = Store::open(&path).unwrap();
    let saved = SavedRoomsManager::new(store).unwrap();
    assert_eq!(saved.rooms().len(), 1);
    assert_eq!(saved.rooms()[0].id, rooms[0].id);
}

#[test]
fn clobbered_database_value_degrades_to_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roomnest.db");

    {
        let store = Store::open(&path).unwrap();
        let mut saved = SavedRoomsManager::new(store).unwrap();
        saved.save_room(mock::sample_rooms()[0].clone()).unwrap();
    }

    // Overwrite the persisted JSON with garbage through a second handle.
    {
        let store = Store::open(&path).unwrap();
        store.save("saved_rooms", &"][ not a list").unwrap();
    }

    let store = Store::open(&path).unwrap();
    let mut saved = SavedRoomsManager::new(store).unwrap();
    assert!(saved.rooms().is_empty());

    // The manager keeps working after recovery.
    saved.save_room(mock::sample_rooms()[2].clone()).unwrap();
    assert_eq!(saved.rooms().len(), 1);
}

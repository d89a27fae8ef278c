//! Canned data standing in for the listing and chat backends. Consumed by
//! tests and by hosts that want a seeded UI while the real services are
//! wired up.

use once_cell::sync::Lazy;

use crate::models::{Conversation, Message, RoomListing};

static SAMPLE_ROOMS: Lazy<Vec<RoomListing>> = Lazy::new(|| {
    vec![
        room(
            "r-101",
            "Sunrise PG, single occupancy",
            8_500,
            "HSR Layout, Bengaluru",
            4.2,
        ),
        room(
            "r-102",
            "2BHK shared flat near metro",
            12_000,
            "Andheri East, Mumbai",
            3.9,
        ),
        room(
            "r-103",
            "Furnished studio with balcony",
            15_500,
            "Viman Nagar, Pune",
            4.6,
        ),
        room(
            "r-104",
            "Ladies PG with meals included",
            7_000,
            "Madhapur, Hyderabad",
            4.0,
        ),
        room(
            "r-105",
            "Co-living room, all bills covered",
            10_500,
            "Sector 62, Noida",
            4.4,
        ),
    ]
});

static SAMPLE_CONVERSATIONS: Lazy<Vec<Conversation>> = Lazy::new(|| {
    vec![Conversation {
        id: "c-owner-101".to_string(),
        peer_name: "Sunrise PG Owner".to_string(),
        messages: vec![
            Message {
                id: "m-1".to_string(),
                sender: "me".to_string(),
                body: "Hi, is the single room still available?".to_string(),
                sent_at: 1_700_000_000_000,
                read: true,
            },
            Message {
                id: "m-2".to_string(),
                sender: "Sunrise PG Owner".to_string(),
                body: "Yes, you can visit this weekend.".to_string(),
                sent_at: 1_700_000_120_000,
                read: false,
            },
        ],
        unread: 1,
    }]
});

fn room(id: &str, title: &str, price: u32, location: &str, rating: f32) -> RoomListing {
    let mut listing = RoomListing::new(id, title, price, location);
    listing.rating = rating;
    listing.images = vec![
        format!("https://cdn.roomnest.in/{id}/1.jpg"),
        format!("https://cdn.roomnest.in/{id}/2.jpg"),
    ];
    listing
}

pub fn sample_rooms() -> &'static [RoomListing] {
    &SAMPLE_ROOMS
}

pub fn sample_conversations() -> &'static [Conversation] {
    &SAMPLE_CONVERSATIONS
}

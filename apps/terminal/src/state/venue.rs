//! # Venue State
//!
//! The single venue shared by the command loop and the clock ticker.
//!
//! ## Thread Safety
//! The venue is wrapped in `Arc<Mutex<T>>` because:
//! 1. The ticker task advances the clock while commands run
//! 2. Pricing must read clock and happy hour as one snapshot
//! 3. Only one caller may mutate tables or the catalog at a time

use std::sync::{Arc, Mutex};

use cantina_core::Venue;

/// Thread-safe handle to the venue.
#[derive(Clone)]
pub struct VenueState {
    venue: Arc<Mutex<Venue>>,
}

impl VenueState {
    pub fn new(venue: Venue) -> Self {
        VenueState {
            venue: Arc::new(Mutex::new(venue)),
        }
    }

    /// Executes a function with read access to the venue.
    pub fn with_venue<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Venue) -> R,
    {
        let venue = self.venue.lock().expect("Venue mutex poisoned");
        f(&venue)
    }

    /// Executes a function with write access to the venue.
    pub fn with_venue_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Venue) -> R,
    {
        let mut venue = self.venue.lock().expect("Venue mutex poisoned");
        f(&mut venue)
    }
}

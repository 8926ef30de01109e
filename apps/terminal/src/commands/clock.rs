//! # Clock Commands
//!
//! Venue status, the happy-hour switch and the venue clock.
//!
//! ## Clock Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  spawn_clock_ticker ──► every tick_ms ──► Venue::advance_clock (+1s)   │
//! │  tick               ──► once          ──► Venue::advance_clock (+1s)   │
//! │  clock set <hour>   ──►                   Venue::set_clock (hour:00:00)│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use cantina_core::DayPart;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{ConfigState, VenueState};

/// What the operator's status line shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusView {
    pub venue_name: String,
    pub clock: String,
    pub hour: u32,
    pub day_part: DayPart,
    pub happy_hour: bool,
    pub free_tables: Vec<u32>,
    pub occupied_tables: Vec<u32>,
}

pub fn get_status(venue: &VenueState, config: &ConfigState) -> StatusView {
    venue.with_venue(|v| {
        let status = v.status();
        StatusView {
            venue_name: config.venue_name.clone(),
            clock: status.clock.format("%H:%M:%S").to_string(),
            hour: status.hour,
            day_part: status.day_part,
            happy_hour: status.happy_hour,
            free_tables: v.free_tables(),
            occupied_tables: v.occupied_tables(),
        }
    })
}

/// Flips happy hour. Orders already registered keep their price.
pub fn toggle_happy_hour(venue: &VenueState, config: &ConfigState) -> StatusView {
    let active = venue.with_venue_mut(|v| v.toggle_happy_hour());
    info!(active, "Happy hour toggled");
    get_status(venue, config)
}

/// Jumps the clock to `hour:00:00`.
pub fn set_clock(
    venue: &VenueState,
    config: &ConfigState,
    hour: u32,
) -> Result<StatusView, ApiError> {
    venue.with_venue_mut(|v| v.set_clock(hour))?;
    info!(hour, "Clock set");
    Ok(get_status(venue, config))
}

/// Advances the clock by one second.
pub fn tick(venue: &VenueState, config: &ConfigState) -> StatusView {
    venue.with_venue_mut(|v| v.advance_clock());
    get_status(venue, config)
}

/// Advances the venue clock by one second every `period` until aborted.
///
/// The first tick fires one full period after spawning.
pub fn spawn_clock_ticker(venue: VenueState, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        interval.tick().await;

        loop {
            interval.tick().await;
            let clock = venue.with_venue_mut(|v| {
                v.advance_clock();
                v.clock()
            });
            debug!(%clock, "Clock tick");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{config, sample_state};
    use crate::error::ErrorCode;

    #[test]
    fn test_status_view() {
        let venue = sample_state();
        let status = get_status(&venue, &config());
        assert_eq!(status.venue_name, "Cantina Dev Bar");
        assert_eq!(status.clock, "12:00:00");
        assert_eq!(status.day_part, DayPart::Day);
        assert!(!status.happy_hour);
        assert_eq!(status.free_tables, vec![1, 2, 3, 4, 5]);
        assert!(status.occupied_tables.is_empty());
    }

    #[test]
    fn test_happy_hour_toggles_back_and_forth() {
        let venue = sample_state();
        assert!(toggle_happy_hour(&venue, &config()).happy_hour);
        assert!(!toggle_happy_hour(&venue, &config()).happy_hour);
    }

    #[test]
    fn test_set_clock_and_tick() {
        let venue = sample_state();
        let status = set_clock(&venue, &config(), 23).unwrap();
        assert_eq!(status.clock, "23:00:00");
        assert_eq!(status.day_part, DayPart::Night);

        assert_eq!(tick(&venue, &config()).clock, "23:00:01");

        let err = set_clock(&venue, &config(), 24).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_advances_clock() {
        let venue = sample_state();
        let handle = spawn_clock_ticker(venue.clone(), Duration::from_millis(1000));

        tokio::time::sleep(Duration::from_millis(3500)).await;
        handle.abort();

        let clock = venue.with_venue(|v| v.clock());
        assert_eq!(clock.format("%H:%M:%S").to_string(), "12:00:03");
    }
}

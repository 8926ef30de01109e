//! # Catalog Commands
//!
//! Browse items, quote prices and edit the catalog. Edits are written
//! back to the catalog file by the venue's persister.

use cantina_core::{CoreError, DayPart, Item, Modifier, ModifierKind};
use cantina_store::{parse_item_line, ParsedItem};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::VenueState;

/// A modifier as shown to the operator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifierView {
    pub name: String,
    pub kind: ModifierKind,
    pub price_per_unit: String,
}

impl From<&Modifier> for ModifierView {
    fn from(modifier: &Modifier) -> Self {
        ModifierView {
            name: modifier.name().to_string(),
            kind: modifier.kind(),
            price_per_unit: modifier.price_per_unit().amount(),
        }
    }
}

/// An item with its three price bands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub code: String,
    pub name: String,
    pub day_price: String,
    pub night_price: String,
    pub happy_hour_price: String,
    pub image_ref: String,
    pub modifiers: Vec<ModifierView>,
}

impl From<&Item> for ItemView {
    fn from(item: &Item) -> Self {
        ItemView {
            code: item.code().to_string(),
            name: item.name().to_string(),
            day_price: item.day_price().amount(),
            night_price: item.night_price().amount(),
            happy_hour_price: item.happy_hour_price().amount(),
            image_ref: item.image_ref().to_string(),
            modifiers: item.modifiers().iter().map(ModifierView::from).collect(),
        }
    }
}

/// What a new order for an item would cost right now.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceView {
    pub code: String,
    pub day_part: DayPart,
    pub happy_hour: bool,
    pub base_price: String,
}

/// Items in code order.
pub fn list_items(venue: &VenueState) -> Vec<ItemView> {
    venue.with_venue(|v| v.all_items().map(|item| ItemView::from(item.as_ref())).collect())
}

pub fn get_item(venue: &VenueState, code: &str) -> Result<ItemView, ApiError> {
    venue.with_venue(|v| {
        v.get_item(code)
            .map(|item| ItemView::from(item.as_ref()))
            .ok_or_else(|| ApiError::from(CoreError::ItemNotFound(code.to_string())))
    })
}

pub fn current_price(venue: &VenueState, code: &str) -> Result<PriceView, ApiError> {
    let quote = venue.with_venue(|v| v.current_price(code))?;
    Ok(PriceView {
        code: code.to_string(),
        day_part: quote.day_part,
        happy_hour: quote.happy_hour,
        base_price: quote.base_price.amount(),
    })
}

/// Adds an item from a catalog row (`code,name,day,night,happy,image[,mods]`).
pub fn add_item(venue: &VenueState, row: &str) -> Result<ItemView, ApiError> {
    let item = parse_row(row)?;
    let view = ItemView::from(&item);
    venue.with_venue_mut(|v| v.add_item(item))?;

    info!(code = %view.code, "Item added");
    Ok(view)
}

/// Replaces the item with the row's code. Open tables keep the old version.
pub fn replace_item(venue: &VenueState, row: &str) -> Result<ItemView, ApiError> {
    let item = parse_row(row)?;
    let view = ItemView::from(&item);
    venue.with_venue_mut(|v| v.replace_item(item))?;

    info!(code = %view.code, "Item replaced");
    Ok(view)
}

/// Removes an item, returning the remaining codes.
pub fn remove_item(venue: &VenueState, code: &str) -> Result<Vec<String>, ApiError> {
    let codes = venue.with_venue_mut(|v| {
        v.remove_item(code)?;
        Ok::<_, ApiError>(v.all_items().map(|item| item.code().to_string()).collect())
    })?;

    info!(code, "Item removed");
    Ok(codes)
}

fn parse_row(row: &str) -> Result<Item, ApiError> {
    let ParsedItem { item, rejected } = parse_item_line(row)?;
    for r in &rejected {
        warn!(code = item.code(), entry = %r.entry, reason = %r.reason, "Modifier dropped");
    }
    Ok(item)
}

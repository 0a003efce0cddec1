//! Extraction of free-game records from a parsed catalog response.
//!
//! Pure functions over [`CatalogResponse`]; everything network-related
//! lives in [`crate::client`]. Lookups tolerate missing keys and indices
//! per element, so one malformed entry never poisons the rest of the feed.

use crate::models::{CatalogElement, CatalogResponse, FreeGame, OfferGroup};
use tracing::{debug, info};

/// Store front for product links.
pub const STORE_BASE: &str = "https://store.epicgames.com";

/// Placeholder entries the store publishes before a giveaway is revealed.
const MYSTERY_MARKER: &str = "Mystery Game";

/// Fallback image when an element carries no usable key image.
pub const DEFAULT_THUMBNAIL: &str =
    "https://static-assets-prod.epicgames.com/epic-store/static/webpack/25c285e020572b4f76b770d6cca272ec.png";

/// Builds the store page URL for a resolved page slug.
pub fn product_url(locale: &str, slug: &str) -> String {
    format!("{}/{}/p/{}", STORE_BASE, locale, slug)
}

/// Builds the generic free-games listing URL used when no slug resolves.
pub fn free_games_url(locale: &str) -> String {
    format!("{}/{}/free-games", STORE_BASE, locale)
}

/// Scans the catalog for entries currently offered at zero price and
/// normalizes each into a [`FreeGame`]. Order follows the feed.
pub fn free_games(response: &CatalogResponse, locale: &str) -> Vec<FreeGame> {
    let elements = response.elements();
    debug!("Scanning {} catalog elements", elements.len());

    let games: Vec<FreeGame> =
        elements.iter().filter_map(|element| extract_element(element, locale)).collect();

    info!("Found {} free games", games.len());
    games
}

/// Normalizes a single element, or `None` when it is not a revealed,
/// actively promoted free game.
fn extract_element(element: &CatalogElement, locale: &str) -> Option<FreeGame> {
    if element.discount_price() != 0 {
        return None;
    }

    let title = element.title.clone();
    info!("Found free game: {}", title);

    if title.contains(MYSTERY_MARKER) {
        debug!("Mystery Game placeholder, skipping");
        return None;
    }

    let link = match page_slug(element) {
        Some(slug) => product_url(locale, &slug),
        None => {
            debug!("No page slug found for {}, using free-games listing", title);
            free_games_url(locale)
        }
    };

    let offer_groups = match &element.promotions {
        Some(promotions) if !promotions.promotional_offers.is_empty() => {
            &promotions.promotional_offers
        }
        _ => {
            debug!("No promotional offers for {}, skipping", title);
            return None;
        }
    };

    let end_date = promotion_end_date(offer_groups.first());
    debug!("End date for {}: {:?}", title, end_date);

    let thumbnail = thumbnail(element);

    Some(FreeGame {
        title,
        link,
        end_date: end_date.unwrap_or_default(),
        description: element.description.clone(),
        thumbnail,
    })
}

/// Resolves the page slug from the three alternative identifier paths:
/// offer mapping, catalogNs mapping, then the direct product slug.
fn page_slug(element: &CatalogElement) -> Option<String> {
    element
        .offer_mappings
        .first()
        .map(|m| m.page_slug.clone())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            element
                .catalog_ns
                .mappings
                .first()
                .map(|m| m.page_slug.clone())
                .filter(|s| !s.is_empty())
        })
        .or_else(|| element.product_slug.clone().filter(|s| !s.is_empty()))
}

/// Finds the end date of the first sub-offer with a zero discount
/// percentage, i.e. the offer that makes the game free.
fn promotion_end_date(group: Option<&OfferGroup>) -> Option<String> {
    group?
        .promotional_offers
        .iter()
        .find(|offer| {
            offer.discount_setting.as_ref().is_some_and(|s| s.discount_percentage == Some(0))
        })
        .and_then(|offer| offer.end_date.clone())
}

/// Picks the thumbnail: an image typed `Thumbnail`, else the first image,
/// else the store's default asset when the pick carries no URL.
fn thumbnail(element: &CatalogElement) -> String {
    element
        .key_images
        .iter()
        .find(|image| image.kind == "Thumbnail")
        .or_else(|| element.key_images.first())
        .map(|image| image.url.clone())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_THUMBNAIL.to_string())
}

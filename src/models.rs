//! Data models for the free-games promotions feed.
//!
//! The wire types mirror the `data.Catalog.searchStore.elements` shape of
//! the promotions endpoint. Elements are not uniform across the feed, so
//! every nested level is optional or defaulted and unknown fields are
//! ignored; a sparse element still deserializes and gets filtered out by
//! the extraction pass instead of failing the whole response.

use serde::{Deserialize, Deserializer, Serialize};

/// Accepts an explicit `null` where a defaulted value is expected; the
/// feed emits nulls as freely as it omits fields.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A normalized free-game record produced by the extraction pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeGame {
    /// Game title as listed in the catalog
    pub title: String,
    /// Store page URL (or the free-games listing when no slug resolves)
    pub link: String,
    /// Promotion end date, empty when no zero-discount offer was found
    pub end_date: String,
    /// Catalog description
    pub description: String,
    /// Thumbnail image URL
    pub thumbnail: String,
}

/// Top-level promotions response: `{data: {Catalog: {searchStore: {elements}}}}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogResponse {
    #[serde(default)]
    pub data: CatalogData,
}

impl CatalogResponse {
    /// Returns the catalog elements, empty when any nesting level was absent.
    pub fn elements(&self) -> &[CatalogElement] {
        &self.data.catalog.search_store.elements
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogData {
    #[serde(rename = "Catalog", default)]
    pub catalog: Catalog,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(rename = "searchStore", default)]
    pub search_store: SearchStore,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchStore {
    #[serde(default)]
    pub elements: Vec<CatalogElement>,
}

/// One entry in the storefront's product listing feed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogElement {
    #[serde(deserialize_with = "null_default")]
    pub title: String,
    #[serde(deserialize_with = "null_default")]
    pub description: String,
    /// Direct product page slug, the last resort for link resolution
    pub product_slug: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub offer_mappings: Vec<PageMapping>,
    #[serde(deserialize_with = "null_default")]
    pub catalog_ns: CatalogNamespace,
    #[serde(deserialize_with = "null_default")]
    pub key_images: Vec<KeyImage>,
    pub price: Option<PriceInfo>,
    pub promotions: Option<Promotions>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageMapping {
    #[serde(deserialize_with = "null_default")]
    pub page_slug: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogNamespace {
    #[serde(deserialize_with = "null_default")]
    pub mappings: Vec<PageMapping>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeyImage {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PriceInfo {
    pub total_price: Option<TotalPrice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TotalPrice {
    /// Discounted price in the feed's integer minor units. Absent or null
    /// values never count as free.
    pub discount_price: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Promotions {
    #[serde(deserialize_with = "null_default")]
    pub promotional_offers: Vec<OfferGroup>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OfferGroup {
    #[serde(deserialize_with = "null_default")]
    pub promotional_offers: Vec<PromotionalOffer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromotionalOffer {
    pub end_date: Option<String>,
    pub discount_setting: Option<DiscountSetting>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscountSetting {
    /// Absent percentages never read as a 100%-off promotion.
    pub discount_percentage: Option<i64>,
}

impl CatalogElement {
    /// Returns the discount price, defaulting to a nonzero sentinel when
    /// any of the nested price levels is absent.
    pub fn discount_price(&self) -> i64 {
        self.price
            .as_ref()
            .and_then(|p| p.total_price.as_ref())
            .and_then(|t| t.discount_price)
            .unwrap_or(1)
    }
}

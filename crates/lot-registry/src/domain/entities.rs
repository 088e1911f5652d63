//! # Domain Entities
//!
//! The `Lot` aggregate and its embedded `LotProduct` line items.
//!
//! Field names on the wire follow the ledger's canonical record format
//! (`ID`, `nfId`, `lotProducts`, `owner`, ...). Fields this version does not
//! know about are kept in `extensions` so that a Transfer written by an older
//! registry does not strip data written by a newer one.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A single product line inside a Lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotProduct {
    pub name: String,
    /// Expected to be non-negative; not enforced.
    pub quantity: i64,
    /// Expected to be non-negative; not enforced.
    pub unit_value: i64,
    /// Unit-of-measure label.
    pub unit: String,
    /// Unknown product fields. Must not reuse a name in [`LotProduct::FIELD_NAMES`].
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
}

impl LotProduct {
    /// Wire names of the known product fields.
    pub const FIELD_NAMES: [&'static str; 4] = ["name", "quantity", "unitValue", "unit"];

    pub fn new(
        name: impl Into<String>,
        quantity: i64,
        unit_value: i64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_value,
            unit: unit.into(),
            extensions: Map::new(),
        }
    }

    /// `quantity * unit_value`, or `None` on overflow.
    pub fn line_value(&self) -> Option<i64> {
        self.quantity.checked_mul(self.unit_value)
    }
}

/// The asset record managed by the registry.
///
/// ## Identity
///
/// `id` is the world-state key the record is stored under. It is set once at
/// creation and never rewritten.
///
/// ## `total`
///
/// `total` is a caller-supplied annotation. The registry does not derive it
/// from `lot_products`; see [`Lot::products_value`] for the computed figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lot {
    #[serde(rename = "ID")]
    pub id: String,
    pub nf_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub lot_products: Vec<LotProduct>,
    pub owner: String,
    pub owner_id: i64,
    pub lot_type: String,
    /// Opaque timestamp string; never parsed.
    pub created_at: String,
    pub total: i64,
    pub formated_address: String,
    /// Unknown record fields, preserved across read/write cycles.
    ///
    /// Only names outside [`Lot::FIELD_NAMES`] belong here; the codec
    /// refuses to encode a Lot whose extensions shadow a known field.
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
}

impl Lot {
    /// Wire names of the known record fields.
    pub const FIELD_NAMES: [&'static str; 9] = [
        "ID",
        "nfId",
        "lotProducts",
        "owner",
        "ownerId",
        "lotType",
        "createdAt",
        "total",
        "formatedAddress",
    ];

    /// First extension key, on the Lot or any product, that collides with a
    /// known field name.
    pub fn shadowed_field(&self) -> Option<&str> {
        let own = self
            .extensions
            .keys()
            .find(|key| Lot::FIELD_NAMES.contains(&key.as_str()));
        let in_products = || {
            self.lot_products.iter().find_map(|product| {
                product
                    .extensions
                    .keys()
                    .find(|key| LotProduct::FIELD_NAMES.contains(&key.as_str()))
            })
        };
        own.or_else(in_products).map(String::as_str)
    }

    /// Sum of every product's `quantity * unit_value`, or `None` on overflow.
    pub fn products_value(&self) -> Option<i64> {
        self.lot_products
            .iter()
            .try_fold(0i64, |acc, product| acc.checked_add(product.line_value()?))
    }

    /// Whether the stored `total` agrees with [`Lot::products_value`].
    pub fn total_matches_products(&self) -> bool {
        self.products_value() == Some(self.total)
    }

    /// Replace the owner fields. Every other field is left untouched.
    pub fn transfer_to(&mut self, new_owner: impl Into<String>, new_owner_id: i64) {
        self.owner = new_owner.into();
        self.owner_id = new_owner_id;
    }
}

// Records written by older writers may carry `"lotProducts": null`.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<LotProduct>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<LotProduct>>::deserialize(deserializer)?.unwrap_or_default())
}

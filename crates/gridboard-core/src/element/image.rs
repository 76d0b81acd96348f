//! Image element referencing an externally stored asset.

use super::ElementId;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A positioned image backed by an asset-store address.
///
/// The element owns only the address, never the bytes; duplicating an
/// image element shares the underlying asset by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    pub(crate) id: ElementId,
    /// Top-left corner, canvas-relative.
    pub position: Point,
    /// Display size in pixels.
    pub size: Size,
    /// Durable asset address returned by the asset store.
    pub address: String,
}

impl ImageElement {
    /// Create a new image element referencing `address`.
    pub fn new(position: Point, size: Size, address: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            size,
            address,
        }
    }

    /// File name component of the asset address (final path segment).
    ///
    /// This is the name the asset store expects for removal; an address
    /// with no path separators is returned whole.
    pub fn asset_name(&self) -> &str {
        self.address.rsplit('/').next().unwrap_or(&self.address)
    }
}

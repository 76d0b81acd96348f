//! Element construction and disposal.

use crate::document::Document;
use crate::element::{Element, ElementId, IconElement, IconTag, ImageElement, TextElement};
use crate::store::{AssetStore, UploadError};
use kurbo::{Point, Size, Vec2};
use std::sync::Arc;
use uuid::Uuid;

/// Default text element size.
pub const DEFAULT_TEXT_SIZE: Size = Size::new(150.0, 50.0);
/// Default image element size.
pub const DEFAULT_IMAGE_SIZE: Size = Size::new(150.0, 150.0);
/// Default icon element size.
pub const DEFAULT_ICON_SIZE: Size = Size::new(50.0, 50.0);
/// Placeholder content for new text elements.
pub const TEXT_PLACEHOLDER: &str = "Hello World";
/// Position offset applied to duplicated elements.
pub const DUPLICATE_OFFSET: Vec2 = Vec2::new(20.0, 20.0);

/// Create a new text element at the origin with placeholder content.
pub fn create_text() -> Element {
    let mut text = TextElement::new(Point::ZERO, DEFAULT_TEXT_SIZE, TEXT_PLACEHOLDER.to_string());
    text.text_size = crate::element::TextSize::XL;
    Element::Text(text)
}

/// Create a new icon element at the origin.
pub fn create_icon(tag: IconTag) -> Element {
    Element::Icon(IconElement::new(Point::ZERO, DEFAULT_ICON_SIZE, tag))
}

/// Clone an element with a fresh id, offset by [`DUPLICATE_OFFSET`].
///
/// Image clones share the source's asset address; the asset itself is not
/// copied.
pub fn duplicate(element: &Element) -> Element {
    let mut clone = element.clone();
    clone.regenerate_id();
    clone.offset_by(DUPLICATE_OFFSET);
    clone
}

/// Constructs elements whose creation or disposal touches the asset store.
pub struct ElementFactory<A: AssetStore> {
    assets: Arc<A>,
}

impl<A: AssetStore> ElementFactory<A> {
    /// Create a factory over the given asset store.
    pub fn new(assets: Arc<A>) -> Self {
        Self { assets }
    }

    /// Upload image bytes and create an element referencing the stored
    /// asset.
    ///
    /// The asset is stored under a generated unique name keeping the
    /// original file extension. On upload failure no element is created.
    pub async fn create_image(
        &self,
        bytes: Vec<u8>,
        file_ext: &str,
    ) -> Result<Element, UploadError> {
        let name = format!("{}.{file_ext}", Uuid::new_v4());
        let address = self.assets.upload(bytes, &name).await?;
        Ok(Element::Image(ImageElement::new(
            Point::ZERO,
            DEFAULT_IMAGE_SIZE,
            address,
        )))
    }

    /// Delete an element from the document, scheduling best-effort removal
    /// of any asset it referenced.
    ///
    /// Asset removal failures are logged and never block the local delete.
    /// Returns `false` when the id is unknown.
    pub async fn delete_from(&self, doc: &mut Document, id: ElementId) -> bool {
        let Some(element) = doc.delete_element(id) else {
            return false;
        };
        if let Element::Image(image) = &element {
            if let Err(err) = self.assets.remove(image.asset_name()).await {
                log::warn!("failed to remove asset {}: {err}", image.asset_name());
            }
        }
        true
    }
}

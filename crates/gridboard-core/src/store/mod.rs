//! Remote and asset store abstractions.
//!
//! The remote store holds one flat collection of element rows per
//! principal and reports changes over a payload-free notification channel.
//! The asset store holds uploaded image bytes under generated names.

mod memory;

pub use memory::{MemoryAssetStore, MemoryRemoteStore};

use crate::element::{
    Element, ElementId, ElementKind, IconElement, IconTag, ImageElement, TextAlign,
    TextElement, TextSize,
};
use crate::session::PrincipalId;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};
use thiserror::Error;

/// Remote store errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    /// Credentials lapsed mid-session; the caller must re-authenticate.
    #[error("credentials expired")]
    CredentialsExpired,
    /// No signed-in principal; remote operations are suspended.
    #[error("not signed in")]
    NotSignedIn,
    /// The store rejected or failed the operation.
    #[error("remote store error: {0}")]
    Backend(String),
}

/// Asset store errors during image creation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UploadError {
    /// The asset store rejected the upload.
    #[error("asset upload rejected: {0}")]
    Rejected(String),
    /// The network failed mid-upload.
    #[error("network failure during upload: {0}")]
    Network(String),
}

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// One persisted element row, as stored remotely.
///
/// Geometry is integer pixels on the wire; in-memory positions round on
/// the way out and widen back to floats on the way in. Icon rows carry
/// their glyph tag in `content` and leave the text columns empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub id: ElementId,
    pub owner_id: PrincipalId,
    pub kind: ElementKind,
    pub content: String,
    pub position_x: i64,
    pub position_y: i64,
    pub width: i64,
    pub height: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_size: Option<TextSize>,
}

impl ElementRecord {
    /// Build a wire row from an element, rounding geometry to integers.
    pub fn from_element(element: &Element, owner_id: PrincipalId) -> Self {
        let position = element.position();
        let size = element.size();
        let (text_align, text_size) = match element {
            Element::Text(text) => (Some(text.align), Some(text.text_size)),
            _ => (None, None),
        };
        Self {
            id: element.id(),
            owner_id,
            kind: element.kind(),
            content: element.content().to_string(),
            position_x: position.x.round() as i64,
            position_y: position.y.round() as i64,
            width: size.width.round() as i64,
            height: size.height.round() as i64,
            text_align,
            text_size,
        }
    }

    /// Rebuild an element from a wire row.
    ///
    /// Decoding is lenient where the schema is loose: an unrecognized text
    /// size falls back to `M`, an unrecognized icon tag to `user`.
    pub fn into_element(self) -> Element {
        let position = Point::new(self.position_x as f64, self.position_y as f64);
        let size = Size::new(self.width as f64, self.height as f64);
        match self.kind {
            ElementKind::Text => Element::Text(TextElement {
                id: self.id,
                position,
                size,
                content: self.content,
                align: self.text_align.unwrap_or_default(),
                text_size: self.text_size.unwrap_or_default(),
            }),
            ElementKind::Image => Element::Image(ImageElement {
                id: self.id,
                position,
                size,
                address: self.content,
            }),
            ElementKind::Icon => Element::Icon(IconElement {
                id: self.id,
                position,
                size,
                tag: IconTag::parse_lenient(&self.content),
            }),
        }
    }
}

/// A remote change notification.
///
/// The channel guarantees nothing beyond "something changed" — no payload,
/// no origin. Whether a notice is this session's own write echo is decided
/// by the sync engine's saving window, not by the notice itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeNotice;

/// A live-update subscription handle.
///
/// Notices queue until drained. Dropping the handle unsubscribes: the
/// store's side of the channel closes and the sender is pruned on its next
/// notification attempt.
#[derive(Debug)]
pub struct Subscription {
    rx: Receiver<ChangeNotice>,
}

impl Subscription {
    /// Pull the next pending notice, if any.
    pub fn try_next(&self) -> Option<ChangeNotice> {
        match self.rx.try_recv() {
            Ok(notice) => Some(notice),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Drain all pending notices, returning how many there were.
    pub fn drain(&self) -> usize {
        let mut count = 0;
        while self.try_next().is_some() {
            count += 1;
        }
        count
    }
}

/// Create a connected notifier/subscription pair.
///
/// Store implementations keep the [`ChangeNotifier`] and hand out the
/// [`Subscription`].
pub fn change_channel() -> (ChangeNotifier, Subscription) {
    let (tx, rx) = channel();
    (ChangeNotifier { tx }, Subscription { rx })
}

/// The store-side end of a live-update subscription.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    tx: Sender<ChangeNotice>,
}

impl ChangeNotifier {
    /// Send a change notice. Returns `false` if the subscriber is gone.
    pub fn notify(&self) -> bool {
        self.tx.send(ChangeNotice).is_ok()
    }
}

/// The remote store holding each principal's element collection.
///
/// `subscribe` fires on any insert/update/delete with no payload guarantee
/// beyond "something changed".
pub trait RemoteStore: Send + Sync {
    /// Fetch every element row owned by `owner`.
    fn list(&self, owner: PrincipalId) -> BoxFuture<'_, Result<Vec<ElementRecord>, RemoteError>>;

    /// Insert a batch of rows.
    fn insert_many(&self, records: Vec<ElementRecord>) -> BoxFuture<'_, Result<(), RemoteError>>;

    /// Delete every row owned by `owner`.
    fn delete_all(&self, owner: PrincipalId) -> BoxFuture<'_, Result<(), RemoteError>>;

    /// Open a live-update subscription.
    fn subscribe(&self) -> Subscription;
}

/// The asset store holding uploaded image bytes.
pub trait AssetStore: Send + Sync {
    /// Upload `bytes` under `name`, returning the durable address.
    fn upload(&self, bytes: Vec<u8>, name: &str) -> BoxFuture<'_, Result<String, UploadError>>;

    /// Remove the asset stored under `name`.
    ///
    /// Best-effort: callers log failures and never surface them.
    fn remove(&self, name: &str) -> BoxFuture<'_, Result<(), UploadError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_record_round_trip() {
        let mut text = TextElement::new(
            Point::new(81.0, 40.0),
            Size::new(163.0, 50.0),
            "<b>Hi</b>".to_string(),
        );
        text.align = TextAlign::Center;
        text.text_size = TextSize::XL;
        let element = Element::Text(text);
        let owner = PrincipalId::new_v4();

        let record = ElementRecord::from_element(&element, owner);
        assert_eq!(record.kind, ElementKind::Text);
        assert_eq!(record.owner_id, owner);
        assert_eq!(record.into_element(), element);
    }

    #[test]
    fn test_icon_tag_travels_in_content() {
        let icon = Element::Icon(IconElement::new(
            Point::ZERO,
            Size::new(50.0, 50.0),
            IconTag::ArrowLeft,
        ));
        let record = ElementRecord::from_element(&icon, PrincipalId::new_v4());
        assert_eq!(record.content, "arrow-left");
        assert!(record.text_align.is_none());
        assert_eq!(record.into_element(), icon);
    }

    #[test]
    fn test_geometry_rounds_on_the_wire() {
        let image = Element::Image(ImageElement::new(
            Point::new(81.42857142857143, 10.6),
            Size::new(162.85714285714286, 150.4),
            "store://a.png".to_string(),
        ));
        let record = ElementRecord::from_element(&image, PrincipalId::new_v4());
        assert_eq!(record.position_x, 81);
        assert_eq!(record.position_y, 11);
        assert_eq!(record.width, 163);
        assert_eq!(record.height, 150);
    }

    #[test]
    fn test_record_wire_shape() {
        let text = Element::Text(TextElement::new(
            Point::ZERO,
            Size::new(150.0, 50.0),
            "Hello".to_string(),
        ));
        let record = ElementRecord::from_element(&text, PrincipalId::new_v4());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "text");
        assert_eq!(json["position_x"], 0);
        assert_eq!(json["text_align"], "left");
        assert_eq!(json["text_size"], "M");
    }

    #[test]
    fn test_lenient_decode_defaults() {
        let record = ElementRecord {
            id: ElementId::new_v4(),
            owner_id: PrincipalId::new_v4(),
            kind: ElementKind::Icon,
            content: "sparkles".to_string(),
            position_x: 0,
            position_y: 0,
            width: 50,
            height: 50,
            text_align: None,
            text_size: None,
        };
        let Element::Icon(icon) = record.into_element() else {
            panic!("expected icon");
        };
        assert_eq!(icon.tag, IconTag::User);
    }

    #[test]
    fn test_subscription_drain() {
        let (notifier, subscription) = change_channel();
        assert_eq!(subscription.drain(), 0);
        assert!(notifier.notify());
        assert!(notifier.notify());
        assert_eq!(subscription.drain(), 2);
        assert!(subscription.try_next().is_none());
    }

    #[test]
    fn test_dropped_subscription_detected() {
        let (notifier, subscription) = change_channel();
        drop(subscription);
        assert!(!notifier.notify());
    }
}

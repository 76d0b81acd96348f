//! GridBoard Core Library
//!
//! Platform-agnostic layout and sync logic for the GridBoard visual editor.

pub mod document;
pub mod element;
pub mod factory;
pub mod format;
pub mod grid;
pub mod interaction;
pub mod session;
pub mod store;
pub mod sync;

pub use document::{Document, ElementPatch};
pub use element::{Element, ElementId, ElementKind, IconTag, TextAlign, TextSize};
pub use factory::ElementFactory;
pub use format::{InlineStyle, InlineStyleFormatter};
pub use grid::{CANVAS_WIDTH, COLUMN_WIDTH, GRID_COLUMNS, MIN_ELEMENT_HEIGHT, MIN_ELEMENT_WIDTH};
pub use interaction::{Gesture, InteractionEngine, PointerHit};
pub use session::{FixedSession, PrincipalId, SessionProvider};
pub use store::{AssetStore, ElementRecord, RemoteError, RemoteStore, Subscription, UploadError};
pub use sync::{AutoSave, SyncEngine, SyncStatus, DEFAULT_AUTOSAVE_INTERVAL_SECS};

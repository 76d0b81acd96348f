//! In-memory store implementations for testing and ephemeral use.

use super::{
    AssetStore, BoxFuture, ChangeNotifier, ElementRecord, RemoteError, RemoteStore,
    Subscription, UploadError, change_channel,
};
use crate::session::PrincipalId;
use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

/// In-memory remote store.
///
/// Rows live in one flat collection keyed by owner; every mutation fires a
/// change notice to all live subscribers, mirroring the table-level
/// subscription the real store provides.
#[derive(Default)]
pub struct MemoryRemoteStore {
    rows: RwLock<Vec<ElementRecord>>,
    subscribers: Mutex<Vec<ChangeNotifier>>,
}

impl MemoryRemoteStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn notify_all(&self) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        // Prune subscribers whose handle was dropped.
        subscribers.retain(|notifier| notifier.notify());
    }

    fn lock_err(what: &str) -> RemoteError {
        RemoteError::Backend(format!("lock error: {what}"))
    }
}

impl RemoteStore for MemoryRemoteStore {
    fn list(&self, owner: PrincipalId) -> BoxFuture<'_, Result<Vec<ElementRecord>, RemoteError>> {
        Box::pin(async move {
            let rows = self.rows.read().map_err(|_| Self::lock_err("rows"))?;
            Ok(rows
                .iter()
                .filter(|row| row.owner_id == owner)
                .cloned()
                .collect())
        })
    }

    fn insert_many(&self, records: Vec<ElementRecord>) -> BoxFuture<'_, Result<(), RemoteError>> {
        Box::pin(async move {
            {
                let mut rows = self.rows.write().map_err(|_| Self::lock_err("rows"))?;
                rows.extend(records);
            }
            self.notify_all();
            Ok(())
        })
    }

    fn delete_all(&self, owner: PrincipalId) -> BoxFuture<'_, Result<(), RemoteError>> {
        Box::pin(async move {
            {
                let mut rows = self.rows.write().map_err(|_| Self::lock_err("rows"))?;
                rows.retain(|row| row.owner_id != owner);
            }
            self.notify_all();
            Ok(())
        })
    }

    fn subscribe(&self) -> Subscription {
        let (notifier, subscription) = change_channel();
        self.subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notifier);
        subscription
    }
}

/// In-memory asset store.
///
/// Keeps uploaded bytes and a log of removal calls so tests can assert on
/// the best-effort cleanup path.
#[derive(Default)]
pub struct MemoryAssetStore {
    assets: RwLock<HashMap<String, Vec<u8>>>,
    removed: Mutex<Vec<String>>,
}

impl MemoryAssetStore {
    /// Address scheme for stored assets.
    const ADDRESS_PREFIX: &'static str = "store://";

    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Names passed to `remove`, in call order (including misses).
    pub fn removed(&self) -> Vec<String> {
        self.removed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Whether an asset is currently stored under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.assets
            .read()
            .map(|assets| assets.contains_key(name))
            .unwrap_or(false)
    }
}

impl AssetStore for MemoryAssetStore {
    fn upload(&self, bytes: Vec<u8>, name: &str) -> BoxFuture<'_, Result<String, UploadError>> {
        let name = name.to_string();
        Box::pin(async move {
            if bytes.is_empty() {
                return Err(UploadError::Rejected("empty upload".to_string()));
            }
            let mut assets = self
                .assets
                .write()
                .map_err(|_| UploadError::Network("lock error".to_string()))?;
            assets.insert(name.clone(), bytes);
            Ok(format!("{}{name}", Self::ADDRESS_PREFIX))
        })
    }

    fn remove(&self, name: &str) -> BoxFuture<'_, Result<(), UploadError>> {
        let name = name.to_string();
        Box::pin(async move {
            self.removed
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(name.clone());
            let mut assets = self
                .assets
                .write()
                .map_err(|_| UploadError::Network("lock error".to_string()))?;
            assets.remove(&name);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, IconElement, IconTag};
    use kurbo::{Point, Size};

    fn block_on<F: std::future::Future>(f: F) -> F::Output {
        // Simple blocking executor for tests
        use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

        fn dummy_raw_waker() -> RawWaker {
            fn no_op(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                dummy_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
            RawWaker::new(std::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
        let mut cx = Context::from_waker(&waker);
        let mut f = std::pin::pin!(f);

        loop {
            match f.as_mut().poll(&mut cx) {
                Poll::Ready(result) => return result,
                Poll::Pending => {}
            }
        }
    }

    fn icon_record(owner: PrincipalId) -> ElementRecord {
        let icon = Element::Icon(IconElement::new(
            Point::ZERO,
            Size::new(50.0, 50.0),
            IconTag::Check,
        ));
        ElementRecord::from_element(&icon, owner)
    }

    #[test]
    fn test_rows_scoped_by_owner() {
        let store = MemoryRemoteStore::new();
        let alice = PrincipalId::new_v4();
        let bob = PrincipalId::new_v4();

        block_on(store.insert_many(vec![icon_record(alice), icon_record(bob)])).unwrap();

        assert_eq!(block_on(store.list(alice)).unwrap().len(), 1);
        assert_eq!(block_on(store.list(bob)).unwrap().len(), 1);

        block_on(store.delete_all(alice)).unwrap();
        assert!(block_on(store.list(alice)).unwrap().is_empty());
        assert_eq!(block_on(store.list(bob)).unwrap().len(), 1);
    }

    #[test]
    fn test_mutations_fire_notices() {
        let store = MemoryRemoteStore::new();
        let owner = PrincipalId::new_v4();
        let subscription = store.subscribe();

        block_on(store.insert_many(vec![icon_record(owner)])).unwrap();
        block_on(store.delete_all(owner)).unwrap();

        assert_eq!(subscription.drain(), 2);
    }

    #[test]
    fn test_dropped_subscriber_pruned() {
        let store = MemoryRemoteStore::new();
        let owner = PrincipalId::new_v4();
        drop(store.subscribe());
        let live = store.subscribe();

        block_on(store.insert_many(vec![icon_record(owner)])).unwrap();
        assert_eq!(live.drain(), 1);
        assert_eq!(
            store
                .subscribers
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .len(),
            1
        );
    }

    #[test]
    fn test_asset_upload_and_remove() {
        let store = MemoryAssetStore::new();
        let address = block_on(store.upload(vec![1, 2, 3], "abc.png")).unwrap();
        assert_eq!(address, "store://abc.png");
        assert!(store.contains("abc.png"));

        block_on(store.remove("abc.png")).unwrap();
        assert!(!store.contains("abc.png"));
        assert_eq!(store.removed(), vec!["abc.png".to_string()]);
    }

    #[test]
    fn test_empty_upload_rejected() {
        let store = MemoryAssetStore::new();
        let result = block_on(store.upload(Vec::new(), "abc.png"));
        assert!(matches!(result, Err(UploadError::Rejected(_))));
    }
}

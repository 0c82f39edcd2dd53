//! Synchronizable Kubernetes objects.
//!
//! Each resource tracks one value inside a cluster object (a config map
//! key, a deployment volume item), compares it against a desired value and
//! patches only on mismatch.

use crate::error::SyncError;
use async_trait::async_trait;
use similar::TextDiff;

/// Lines of context around each hunk in [`K8sResource::diff`] output.
const DIFF_CONTEXT: usize = 5;

/// A Kubernetes object that can be synchronized.
///
/// The tracked value is fetched lazily and cached for the lifetime of the
/// resource. The cache is only ever replaced wholesale by
/// [`fetch`](K8sResource::fetch), and every successful
/// [`apply`](K8sResource::apply) must end with a fetch so the cache never
/// goes stale after a write.
#[async_trait]
pub trait K8sResource: Send {
    /// The tracked value. An absent value (`None`) means the object exists
    /// but the tracked key or entry does not.
    type State: Clone + PartialEq + Send + Sync;

    /// Stable identity of the target, for logs and error messages.
    fn description(&self) -> String;

    /// Cached state: `None` until the first fetch.
    fn cached(&self) -> Option<&Option<Self::State>>;

    /// Read the tracked value from the cluster, replacing the cache.
    ///
    /// Fails with [`SyncError::NotFound`] when the cluster object itself is
    /// missing; a present object without the tracked key yields `Ok(None)`.
    async fn fetch(&mut self) -> Result<Option<Self::State>, SyncError>;

    /// Patch the cluster object so the tracked value becomes `desired`,
    /// then refresh the cache with a fetch.
    async fn apply(&mut self, desired: &Self::State) -> Result<(), SyncError>;

    /// Plain-text rendering of a state value. Used only for diff output.
    fn render(state: &Self::State) -> String;

    /// Return the cached state, fetching it first if necessary.
    async fn current(&mut self) -> Result<Option<Self::State>, SyncError> {
        match self.cached() {
            Some(state) => Ok(state.clone()),
            None => self.fetch().await,
        }
    }

    /// Is the current value equal to `desired`? The comparison is exact;
    /// no normalization is applied.
    async fn in_sync(&mut self, desired: &Self::State) -> Result<bool, SyncError> {
        Ok(self.current().await?.as_ref() == Some(desired))
    }

    /// Bring the object in sync with `desired`.
    ///
    /// Returns `false` without writing when nothing differs, `true` after a
    /// successful patch. At most one write is issued per call.
    async fn sync(&mut self, desired: &Self::State) -> Result<bool, SyncError> {
        if self.in_sync(desired).await? {
            Ok(false)
        } else {
            self.apply(desired).await?;
            Ok(true)
        }
    }

    /// Unified diff between the current and desired values.
    ///
    /// Advisory only; sync decisions never depend on it.
    async fn diff(&mut self, desired: &Self::State) -> Result<String, SyncError> {
        let current = self
            .current()
            .await?
            .map(|state| Self::render(&state))
            .unwrap_or_default();
        let desired = Self::render(desired);

        Ok(TextDiff::from_lines(&current, &desired)
            .unified_diff()
            .context_radius(DIFF_CONTEXT)
            .header("current", "desired")
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory resource; `store` stands in for the cluster-side value.
    struct MemoryResource {
        store: Option<String>,
        current: Option<Option<String>>,
        fetches: usize,
        applies: usize,
    }

    impl MemoryResource {
        fn with_value(value: &str) -> Self {
            Self {
                store: Some(value.to_string()),
                current: None,
                fetches: 0,
                applies: 0,
            }
        }
    }

    #[async_trait]
    impl K8sResource for MemoryResource {
        type State = String;

        fn description(&self) -> String {
            "ns=test configmap/fake key=telegraf.conf".to_string()
        }

        fn cached(&self) -> Option<&Option<String>> {
            self.current.as_ref()
        }

        async fn fetch(&mut self) -> Result<Option<String>, SyncError> {
            self.fetches += 1;
            self.current = Some(self.store.clone());
            Ok(self.store.clone())
        }

        async fn apply(&mut self, desired: &String) -> Result<(), SyncError> {
            self.applies += 1;
            self.store = Some(desired.clone());
            self.fetch().await?;
            Ok(())
        }

        fn render(state: &String) -> String {
            state.clone()
        }
    }

    #[tokio::test]
    async fn sync_in_sync_is_a_no_op() {
        let mut resource = MemoryResource::with_value("x");

        assert!(!resource.sync(&"x".to_string()).await.unwrap());
        assert_eq!(resource.applies, 0);
    }

    #[tokio::test]
    async fn sync_patches_on_drift_and_refreshes_the_cache() {
        let mut resource = MemoryResource::with_value("x");

        assert!(resource.sync(&"y".to_string()).await.unwrap());
        assert_eq!(resource.applies, 1);
        assert_eq!(resource.current().await.unwrap(), Some("y".to_string()));
    }

    #[tokio::test]
    async fn repeated_sync_writes_exactly_once() {
        let mut resource = MemoryResource::with_value("x");

        assert!(resource.sync(&"y".to_string()).await.unwrap());
        assert!(!resource.sync(&"y".to_string()).await.unwrap());
        assert_eq!(resource.applies, 1);
    }

    #[tokio::test]
    async fn current_is_cached_after_the_first_fetch() {
        let mut resource = MemoryResource::with_value("x");

        resource.current().await.unwrap();
        resource.current().await.unwrap();

        assert_eq!(resource.fetches, 1);
    }

    #[tokio::test]
    async fn absent_value_is_never_in_sync_with_a_desired_one() {
        let mut resource = MemoryResource::with_value("x");
        resource.store = None;

        assert!(!resource.in_sync(&"y".to_string()).await.unwrap());
    }

    #[tokio::test]
    async fn diff_shows_both_sides() {
        let mut resource = MemoryResource::with_value("old value\n");

        let diff = resource.diff(&"new value\n".to_string()).await.unwrap();

        assert!(diff.contains("-old value"));
        assert!(diff.contains("+new value"));
    }
}

//! Read-through cache for values computed once per search session.
//!
//! [`ReadCache`] runs its loader lazily on first access and hands every later
//! caller the same value. Concurrent first accesses share one in-flight
//! computation instead of racing. A failed load leaves the cache empty so the
//! next access retries. There is no invalidation API: the cache lives exactly
//! as long as the session that owns it.

use std::future::Future;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::OnceCell;

use crate::error::Error;

type Loader<T, E> = Box<dyn Fn() -> BoxFuture<'static, Result<T, E>> + Send + Sync>;

/// Lazily-initialized, compute-once value.
pub struct ReadCache<T, E = Error> {
    cell: OnceCell<T>,
    loader: Loader<T, E>,
}

impl<T, E> ReadCache<T, E> {
    /// Create an empty cache around `loader`.
    ///
    /// # Examples
    ///
    /// ```
    /// use unicode_search::ReadCache;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let cache: ReadCache<u32, std::convert::Infallible> = ReadCache::new(|| async { Ok(42) });
    /// assert_eq!(cache.peek(), None);
    /// assert_eq!(*cache.get_value().await.unwrap(), 42);
    /// assert_eq!(cache.peek(), Some(&42));
    /// # });
    /// ```
    pub fn new<F, Fut>(loader: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self {
            cell: OnceCell::new(),
            loader: Box::new(move || loader().boxed()),
        }
    }

    /// Return the cached value, running the loader if it has not succeeded yet.
    pub async fn get_value(&self) -> Result<&T, E> {
        self.cell.get_or_try_init(|| (self.loader)()).await
    }

    /// The cached value, without triggering a load.
    pub fn peek(&self) -> Option<&T> {
        self.cell.get()
    }
}

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

// BookLocks serialises the read-then-write sequences of checkout per isbn, so two borrowers
// cannot both pass the availability check for the last copy.
#[derive(Debug, Default)]
pub(crate) struct BookLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl BookLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    // the guard releases the book when dropped
    pub(crate) async fn lock(&self, isbn: &str) -> BookGuard<'_> {
        let lock = self.entries().entry(isbn.to_string()).or_default().clone();
        BookGuard {
            locks: self,
            isbn: isbn.to_string(),
            guard: Some(lock.lock_owned().await),
        }
    }

    // number of isbns with a holder or a waiter
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries().len()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Arc<AsyncMutex<()>>>> {
        self.locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

// BookGuard holds one isbn and drops its map entry once nobody else holds or awaits it
#[derive(Debug)]
pub(crate) struct BookGuard<'a> {
    locks: &'a BookLocks,
    isbn: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for BookGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();
        let mut entries = self.locks.entries();
        let idle = entries.get(&self.isbn).map(|lock| Arc::strong_count(lock) == 1).unwrap_or(false);
        if idle {
            entries.remove(&self.isbn);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use crate::checkout::locks::BookLocks;

    #[tokio::test]
    async fn test_should_serialise_same_book() {
        let locks = Arc::new(BookLocks::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let mut handles = vec![];
        for _ in 0..8 {
            let locks = locks.clone();
            let inside = inside.clone();
            handles.push(tokio::spawn(async move {
                let _guard = locks.lock("B1").await;
                assert_eq!(0, inside.fetch_add(1, Ordering::SeqCst));
                for _ in 0..4 {
                    tokio::task::yield_now().await;
                }
                inside.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.expect("task should finish");
        }
        assert_eq!(0, locks.len());
    }

    #[tokio::test]
    async fn test_should_not_block_other_books() {
        let locks = BookLocks::new();
        let first = locks.lock("B1").await;
        let second = locks.lock("B2").await;
        assert_eq!(2, locks.len());
        drop(first);
        assert_eq!(1, locks.len());
        drop(second);
        assert_eq!(0, locks.len());
    }

    #[tokio::test]
    async fn test_should_keep_entry_while_waiter_queued() {
        let locks = Arc::new(BookLocks::new());
        let held = locks.lock("B1").await;
        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.lock("B1").await;
            })
        };
        while locks.entries().get("B1").map(Arc::strong_count).unwrap_or(0) < 3 {
            tokio::task::yield_now().await;
        }
        drop(held);
        assert_eq!(1, locks.len());
        waiter.await.expect("waiter should finish");
        assert_eq!(0, locks.len());
    }
}

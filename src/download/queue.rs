//! Shared FIFO of pending work items.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::media::WorkItem;

/// Unbounded FIFO shared between the collector and the workers.
///
/// `pop` never blocks: the queue is filled before any worker starts, so an
/// empty queue means there is no more work.
#[derive(Debug, Default)]
pub struct WorkQueue {
    items: Mutex<VecDeque<WorkItem>>,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<WorkItem>> {
        // A panicking holder cannot leave the deque half-modified.
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, item: WorkItem) {
        self.lock().push_back(item);
    }

    pub fn extend(&self, items: impl IntoIterator<Item = WorkItem>) {
        self.lock().extend(items);
    }

    /// Take the oldest item, or `None` once the queue is drained.
    pub fn pop(&self) -> Option<WorkItem> {
        self.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::EmojiMetadata;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn emoji(id: usize) -> WorkItem {
        WorkItem::Emoji(EmojiMetadata {
            id: id.to_string(),
            name: format!("e{}", id),
            animated: false,
        })
    }

    #[test]
    fn test_fifo_order() {
        let queue = WorkQueue::new();
        queue.push(emoji(1));
        queue.extend([emoji(2), emoji(3)]);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop().unwrap().id(), "1");
        assert_eq!(queue.pop().unwrap().id(), "2");
        assert_eq!(queue.pop().unwrap().id(), "3");
        assert!(queue.pop().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_concurrent_pop_delivers_each_item_once() {
        let queue = Arc::new(WorkQueue::new());
        queue.extend((0..1000).map(emoji));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let queue = Arc::clone(&queue);
                std::thread::spawn(move || {
                    let mut seen = Vec::new();
                    while let Some(item) = queue.pop() {
                        seen.push(item.id().to_string());
                    }
                    seen
                })
            })
            .collect();

        let mut all = Vec::new();
        for handle in handles {
            all.extend(handle.join().unwrap());
        }

        assert_eq!(all.len(), 1000);
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), 1000);
    }
}

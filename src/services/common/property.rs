use std::fmt::Debug;

use futures::stream::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// A reactive property that can be watched for changes.
///
/// When the value changes, all watchers are notified automatically.
/// Each watcher gets the current value immediately when subscribing.
#[derive(Clone)]
pub struct Property<T: Clone + Send + Sync + 'static> {
    tx: watch::Sender<T>,
    rx: watch::Receiver<T>,
}

impl<T: Clone + Send + Sync + 'static> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(initial: T) -> Self {
        let (tx, rx) = watch::channel(initial);
        Self { tx, rx }
    }

    /// Set a new value and notify all watchers.
    ///
    /// Only updates if the value is different (requires PartialEq).
    /// Only accessible within the crate to prevent external modification.
    pub(crate) fn set(&self, new_value: T)
    where
        T: PartialEq,
    {
        self.tx.send_if_modified(|current| {
            if *current != new_value {
                *current = new_value;
                true
            } else {
                false
            }
        });
    }

    /// Apply a read-modify-write step to the current value.
    ///
    /// The closure runs while the channel's write lock is held, so two
    /// concurrent updates are serialized and neither can be lost. Watchers
    /// are notified only if the value actually changed.
    pub(crate) fn update<F>(&self, modify: F)
    where
        F: FnOnce(&mut T),
        T: PartialEq,
    {
        self.tx.send_if_modified(|current| {
            let before = current.clone();
            modify(current);
            *current != before
        });
    }

    /// Get the current value.
    ///
    /// This is a synchronous operation that clones the current value.
    pub fn get(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Watch for changes to this property.
    ///
    /// The stream immediately yields the current value, then yields
    /// whenever the value changes.
    pub fn watch(&self) -> impl Stream<Item = T> + Send + use<T> {
        WatchStream::new(self.rx.clone())
    }
}

impl<T: Clone + Send + Sync + Debug + 'static> Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;

    use super::*;

    #[test]
    fn set_ignores_equal_values() {
        let property = Property::new(1);
        let mut rx = property.rx.clone();
        rx.mark_unchanged();

        property.set(1);
        assert!(!rx.has_changed().unwrap_or(true));

        property.set(2);
        assert!(rx.has_changed().unwrap_or(false));
        assert_eq!(property.get(), 2);
    }

    #[test]
    fn update_modifies_in_place() {
        let property = Property::new(vec![1, 2]);

        property.update(|values| values.push(3));

        assert_eq!(property.get(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn watch_yields_current_value_first() {
        let property = Property::new("first".to_string());
        let mut stream = Box::pin(property.watch());

        assert_eq!(stream.next().await.as_deref(), Some("first"));

        property.set("second".to_string());
        assert_eq!(stream.next().await.as_deref(), Some("second"));
    }
}

//! Application-wide language selection.
//!
//! One writer, many readers: the store owns the `watch` sender and every
//! consumer holds a receiver.  `set` and `toggle` are the only ways to change
//! the value.

use tokio::sync::watch;

use crate::core::content::Language;

pub struct LanguageStore {
    tx: watch::Sender<Language>,
}

impl LanguageStore {
    pub fn new(initial: Language) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn get(&self) -> Language {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Language> {
        self.tx.subscribe()
    }

    /// Returns `true` when the value actually changed.
    pub fn set(&self, lang: Language) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == lang {
                return false;
            }
            tracing::info!(from = current.code(), to = lang.code(), "language changed");
            *current = lang;
            true
        })
    }

    pub fn toggle(&self) -> Language {
        let next = self.get().toggled();
        self.set(next);
        next
    }
}

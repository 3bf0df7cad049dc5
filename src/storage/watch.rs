#![allow(dead_code)]
//! Change notifications for game rows
//!
//! Every mutation of a game row publishes the fresh record to subscribers
//! of that game id. Subscribers receive on a std mpsc channel and poll it
//! from their own tick loop; receivers that have been dropped are pruned
//! on the next publish. The hub is an in-process observer seam: callers
//! never learn how a change reached the store.

use super::GameRecord;
use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Mutex;

/// Registry of per-game subscribers.
#[derive(Default)]
pub struct WatchHub {
    subscribers: Mutex<HashMap<String, Vec<Sender<GameRecord>>>>,
}

impl WatchHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to every subsequent change of one game row.
    pub fn subscribe(&self, game_id: &str) -> Receiver<GameRecord> {
        let (tx, rx) = channel();
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.entry(game_id.to_string()).or_default().push(tx);
        }
        rx
    }

    /// Push a fresh record to the game's subscribers.
    pub fn publish(&self, record: &GameRecord) {
        let Ok(mut subs) = self.subscribers.lock() else {
            return;
        };
        if let Some(list) = subs.get_mut(&record.id) {
            list.retain(|tx| tx.send(record.clone()).is_ok());
            if list.is_empty() {
                subs.remove(&record.id);
            }
        }
    }

    /// Number of live subscriptions for a game (diagnostics).
    pub fn subscriber_count(&self, game_id: &str) -> usize {
        self.subscribers
            .lock()
            .map(|subs| subs.get(game_id).map_or(0, Vec::len))
            .unwrap_or(0)
    }
}

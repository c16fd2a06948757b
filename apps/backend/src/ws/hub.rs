//! In-process registry of live WebSocket sessions and their subscriptions.

use std::collections::HashSet;

use actix::prelude::*;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use super::protocol::Topic;

/// Pushed to sessions when data behind one of their topics changed.
#[derive(Message, Clone, Debug, PartialEq, Eq)]
#[rtype(result = "()")]
pub enum HubEvent {
    DecksChanged,
}

struct Connection {
    user_id: i64,
    recipient: Recipient<HubEvent>,
    topics: HashSet<Topic>,
}

#[derive(Default)]
pub struct LiveQueryRegistry {
    connections: DashMap<Uuid, Connection>,
    by_user: DashMap<i64, HashSet<Uuid>>,
}

impl LiveQueryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_connection(
        &self,
        user_id: i64,
        conn_id: Uuid,
        recipient: Recipient<HubEvent>,
    ) {
        self.connections.insert(
            conn_id,
            Connection {
                user_id,
                recipient,
                topics: HashSet::new(),
            },
        );
        self.by_user.entry(user_id).or_default().insert(conn_id);
    }

    pub fn unregister_connection(&self, conn_id: Uuid) {
        let Some((_, conn)) = self.connections.remove(&conn_id) else {
            return;
        };
        if let Some(mut ids) = self.by_user.get_mut(&conn.user_id) {
            ids.remove(&conn_id);
        }
        self.by_user
            .remove_if(&conn.user_id, |_, ids| ids.is_empty());
    }

    /// Returns `false` for an unknown connection.
    pub fn subscribe(&self, conn_id: Uuid, topic: Topic) -> bool {
        match self.connections.get_mut(&conn_id) {
            Some(mut conn) => {
                conn.topics.insert(topic);
                true
            }
            None => false,
        }
    }

    pub fn unsubscribe(&self, conn_id: Uuid, topic: &Topic) -> bool {
        match self.connections.get_mut(&conn_id) {
            Some(mut conn) => conn.topics.remove(topic),
            None => false,
        }
    }

    pub fn is_subscribed(&self, conn_id: Uuid, topic: &Topic) -> bool {
        self.connections
            .get(&conn_id)
            .map(|conn| conn.topics.contains(topic))
            .unwrap_or(false)
    }

    /// Tell every session of `user_id` subscribed to its decks to refresh.
    /// Returns how many sessions were notified.
    pub fn notify_decks_changed(&self, user_id: i64) -> usize {
        self.broadcast_to_user(user_id, &Topic::Decks, HubEvent::DecksChanged)
    }

    fn broadcast_to_user(&self, user_id: i64, topic: &Topic, event: HubEvent) -> usize {
        let conn_ids: Vec<Uuid> = match self.by_user.get(&user_id) {
            Some(ids) => ids.iter().copied().collect(),
            None => return 0,
        };

        let mut sent = 0;
        for conn_id in conn_ids {
            if let Some(conn) = self.connections.get(&conn_id) {
                if conn.topics.contains(topic) {
                    conn.recipient.do_send(event.clone());
                    sent += 1;
                }
            }
        }
        debug!(user_id, ?topic, sent, "Live query fan-out");
        sent
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn user_connection_count(&self, user_id: i64) -> usize {
        self.by_user.get(&user_id).map(|ids| ids.len()).unwrap_or(0)
    }
}

//! Швы transport'а: outbound очередь и inbound слот snapshot'а
//!
//! Сам transport живёт вне ядра. Glue код дренит `Outbox` после каждого
//! кадра и пушит каждое изменение room state в `SnapshotInbox`.

use bevy::prelude::*;

use super::wire::{GameState, OutboundMessage};

/// Сообщения этого кадра в порядке отправки
#[derive(Resource, Debug, Default)]
pub struct Outbox {
    messages: Vec<OutboundMessage>,
}

impl Outbox {
    pub fn push(&mut self, message: OutboundMessage) {
        self.messages.push(message);
    }

    pub fn drain(&mut self) -> Vec<OutboundMessage> {
        std::mem::take(&mut self.messages)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutboundMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Последний ещё не применённый authoritative snapshot
///
/// Snapshot = полное состояние, важен только самый свежий: старый pending
/// заменяется.
#[derive(Resource, Debug, Default)]
pub struct SnapshotInbox {
    pending: Option<GameState>,
    received: u64,
}

impl SnapshotInbox {
    pub fn push(&mut self, state: GameState) {
        self.pending = Some(state);
        self.received += 1;
    }

    pub fn take(&mut self) -> Option<GameState> {
        self.pending.take()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Сколько snapshot'ов пришло с запуска (применённые и вытесненные)
    pub fn received(&self) -> u64 {
        self.received
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_snapshot_wins() {
        let mut inbox = SnapshotInbox::default();
        assert!(inbox.take().is_none());

        inbox.push(GameState::default());
        let mut newer = GameState::default();
        newer.players.insert(
            "a".to_string(),
            crate::protocol::PlayerState {
                id: "a".to_string(),
                position: Default::default(),
                rotation: Default::default(),
                animation: String::new(),
            },
        );
        inbox.push(newer.clone());

        assert_eq!(inbox.received(), 2);
        assert_eq!(inbox.take(), Some(newer));
        assert!(!inbox.has_pending());
    }

    #[test]
    fn test_outbox_drain_empties() {
        let mut outbox = Outbox::default();
        outbox.push(OutboundMessage::PlayerMove(crate::protocol::PlayerMove {
            position: Default::default(),
            rotation: Default::default(),
            animation: "Rig|Saiga_Idle".to_string(),
        }));

        assert_eq!(outbox.len(), 1);
        assert_eq!(outbox.drain().len(), 1);
        assert!(outbox.is_empty());
    }
}

//! Protocol domain: wire types и очереди transport'а
//!
//! - wire.rs: GameState / PlayerState / ProjectileState, outbound payloads
//! - queues.rs: Outbox (core → transport), SnapshotInbox (transport → core)
//! - outbound.rs: `player:move` каждый кадр

pub mod outbound;
pub mod queues;
pub mod wire;

pub use outbound::emit_player_move;
pub use queues::{Outbox, SnapshotInbox};
pub use wire::{
    GameState, OutboundMessage, PlayerMove, PlayerState, ProjectileCreate, ProjectileState,
    QuatWire, Vec3Wire,
};

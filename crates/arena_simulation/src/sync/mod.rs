//! Remote Entity Reconciler (authoritative state → mirrors)
//!
//! ```text
//! SnapshotInbox → apply_snapshots → RemotePlayers / RemoteProjectiles
//!                                        ↓ sync_mirror_entities::<D>
//!                                   Mirrored<D> + Transform entities
//! ```

pub mod descriptors;
pub mod mirror;
pub mod systems;

pub use descriptors::{RemotePlayers, RemoteProjectiles, RenderPlayer, RenderProjectile};
pub use mirror::{Mirror, MirrorEntry, ReconcileReport};
pub use systems::{apply_snapshots, sync_mirror_entities, LocalClientId, Mirrored};

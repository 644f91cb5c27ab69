//! Headless прогон арены
//!
//! Plugin крутится на scripted input и in-process loopback комнате:
//! outbound сообщения становятся room state, room state возвращается
//! snapshot'ами, снаряды живут 2 s (как на сервере).

use std::collections::BTreeMap;

use arena_simulation::logger;
use arena_simulation::protocol::{PlayerState, ProjectileState};
use arena_simulation::{
    create_headless_app, ArenaSimulationPlugin, CombatStatus, GameState, LocalClientId,
    MotionState, OutboundMessage, Outbox, RawInput, RemoteProjectiles, SnapshotInbox,
};

const LOCAL_ID: &str = "local";
const PROJECTILE_LIFETIME_MS: f64 = 2000.0;
const TICK_MS: f64 = 1000.0 / 60.0;

/// Минимальная замена room server'а
#[derive(Default)]
struct LoopbackRoom {
    players: BTreeMap<String, PlayerState>,
    projectiles: BTreeMap<String, ProjectileState>,
    next_projectile: u64,
}

impl LoopbackRoom {
    fn apply(&mut self, message: OutboundMessage, now_ms: f64) {
        match message {
            OutboundMessage::PlayerMove(update) => {
                self.players.insert(
                    LOCAL_ID.to_string(),
                    PlayerState {
                        id: LOCAL_ID.to_string(),
                        position: update.position,
                        rotation: update.rotation,
                        animation: update.animation,
                    },
                );
            }
            OutboundMessage::ProjectileCreate(request) => {
                self.next_projectile += 1;
                let id = format!("projectile-{}", self.next_projectile);
                self.projectiles.insert(
                    id.clone(),
                    ProjectileState {
                        id,
                        position: request.position,
                        direction: request.direction,
                        color: request.color,
                        owner_id: LOCAL_ID.to_string(),
                        timestamp: now_ms,
                    },
                );
            }
        }
    }

    fn expire(&mut self, now_ms: f64) {
        self.projectiles
            .retain(|_, projectile| now_ms - projectile.timestamp < PROJECTILE_LIFETIME_MS);
    }

    fn state(&self) -> GameState {
        GameState {
            players: self.players.clone(),
            projectiles: self.projectiles.clone(),
        }
    }
}

/// Scripted hardware для `tick`: ходьба, sprint-jump, потом зажатый fire
fn script_input(raw: &mut RawInput, tick: u32) {
    raw.pointer_locked = true;
    raw.keyboard.release_all();

    match tick {
        0..=119 => raw.keyboard.press("w"),
        120..=239 => {
            raw.keyboard.press("w");
            raw.keyboard.press("Shift");
            if tick % 60 < 10 {
                raw.keyboard.press("Space");
            }
        }
        _ => raw.keyboard.pointer_primary = true,
    }
}

fn main() {
    let seed = 42;
    println!("Starting arena headless run (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(ArenaSimulationPlugin {
        seed,
        ..Default::default()
    });
    app.insert_resource(LocalClientId(Some(LOCAL_ID.to_string())));

    let mut room = LoopbackRoom::default();

    for tick in 0..600u32 {
        let now_ms = tick as f64 * TICK_MS;

        script_input(&mut app.world_mut().resource_mut::<RawInput>(), tick);
        app.update();

        let messages = app.world_mut().resource_mut::<Outbox>().drain();
        for message in messages {
            room.apply(message, now_ms);
        }
        room.expire(now_ms);
        app.world_mut()
            .resource_mut::<SnapshotInbox>()
            .push(room.state());

        if tick % 60 == 0 {
            let world = app.world_mut();
            let position = world
                .query::<(&bevy::prelude::Transform, &MotionState)>()
                .iter(world)
                .next()
                .map(|(transform, _)| transform.translation);
            let projectiles = world
                .get_resource::<RemoteProjectiles>()
                .map(|mirror| mirror.len())
                .unwrap_or(0);
            let status = world
                .get_resource::<CombatStatus>()
                .cloned()
                .unwrap_or_default();

            logger::log_info(&format!(
                "Tick {}: position {:?}, {} | {} projectiles, {} players",
                tick,
                position,
                status.ammo_label(),
                projectiles,
                status.connected_players
            ));
        }
    }

    println!("Run complete!");
}

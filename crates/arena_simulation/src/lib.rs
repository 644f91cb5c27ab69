//! Arena Simulation Core
//!
//! ECS-ядро мультиплеерного arena shooter на Bevy 0.16: kinematic персонаж
//! локального игрока, его combat/animation state, projectile launcher и
//! зеркала authoritative игроков и снарядов комнаты.
//!
//! ```text
//! FixedUpdate (60 Hz):
//!   aggregate_player_input → solve_*_motion → update_player_animation
//!   → run_projectile_launcher (→ Outbox: projectile:create)
//! Update (render rate):
//!   apply_snapshots (SnapshotInbox) → sync_mirror_entities::<D>
//!   → update_camera_rig → emit_player_move (→ Outbox: player:move)
//!   → update_combat_status
//! ```
//!
//! Transport, rendering и загрузка ассетов остаются на хосте.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

pub mod animation;
pub mod camera;
pub mod config;
pub mod hud;
pub mod input;
pub mod logger;
pub mod movement;
pub mod physics;
pub mod protocol;
pub mod shooting;
pub mod sync;

pub use animation::{AnimationMachine, AnimationState};
pub use camera::CameraRig;
pub use config::{GameSettings, SettingsError};
pub use hud::CombatStatus;
pub use input::{InputFrame, InputTriggers, RawInput};
pub use movement::{spawn_local_player, CharacterSpeeds, LocalPlayer, MotionState};
pub use physics::{ArenaBounds, PhysicsBackend};
pub use protocol::{GameState, OutboundMessage, Outbox, SnapshotInbox};
pub use shooting::{AimContext, ProjectileLauncher};
pub use sync::{LocalClientId, Mirrored, RemotePlayers, RemoteProjectiles, RenderPlayer, RenderProjectile};

pub use logger::{init_logger, log, log_error, log_info, log_warning};

/// Fixed-tick цепочка локального игрока
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Input,
    Motion,
    Animation,
    Launcher,
}

/// Цепочка на render rate (snapshots, camera, outbound, HUD)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PresentationSet {
    Snapshots,
    Mirrors,
    Camera,
    Outbound,
    Hud,
}

/// Главный plugin симуляции
///
/// С `PhysicsBackend::Rapier` хост сам добавляет
/// `RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule()`.
pub struct ArenaSimulationPlugin {
    pub backend: PhysicsBackend,
    pub seed: u64,
    /// Спавнить локального игрока в spawn point арены на Startup
    pub spawn_local_player: bool,
}

impl Default for ArenaSimulationPlugin {
    fn default() -> Self {
        Self {
            backend: PhysicsBackend::Arena,
            seed: 42,
            spawn_local_player: true,
        }
    }
}

impl Plugin for ArenaSimulationPlugin {
    fn build(&self, app: &mut App) {
        use bevy_rapier3d::plugin::PhysicsSet;

        app.init_resource::<GameSettings>();
        let mut settings = app
            .world()
            .get_resource::<GameSettings>()
            .cloned()
            .unwrap_or_default();

        // Хост мог вставить settings в обход from_json: tickHz <= 0 уронит Time::<Fixed>
        if let Err(err) = settings.validate() {
            logger::log_warning(&format!(
                "ArenaSimulationPlugin: invalid settings ({}), using defaults",
                err
            ));
            settings = GameSettings::default();
            app.insert_resource(settings.clone());
        }

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(self.seed));
        }

        app
            // Fixed timestep (60Hz по умолчанию)
            .insert_resource(Time::<Fixed>::from_hz(settings.motion.tick_hz))
            .insert_resource(self.backend)
            .insert_resource(ArenaBounds::new(&settings.arena, &settings.motion))
            .insert_resource(CameraRig::new(&settings.camera))
            .init_resource::<RawInput>()
            .init_resource::<Outbox>()
            .init_resource::<SnapshotInbox>()
            .init_resource::<LocalClientId>()
            .init_resource::<RemotePlayers>()
            .init_resource::<RemoteProjectiles>()
            .init_resource::<CombatStatus>()
            .register_type::<InputFrame>()
            .register_type::<MotionState>()
            .register_type::<AnimationMachine>()
            .register_type::<ProjectileLauncher>();

        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::Input,
                SimulationSet::Motion,
                SimulationSet::Animation,
                SimulationSet::Launcher,
            )
                .chain(),
        )
        .configure_sets(
            Update,
            (
                PresentationSet::Snapshots,
                PresentationSet::Mirrors,
                PresentationSet::Camera,
                PresentationSet::Outbound,
                PresentationSet::Hud,
            )
                .chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                input::aggregate_player_input.in_set(SimulationSet::Input),
                animation::update_player_animation.in_set(SimulationSet::Animation),
                shooting::run_projectile_launcher.in_set(SimulationSet::Launcher),
            ),
        );

        match self.backend {
            PhysicsBackend::Arena => {
                app.add_systems(
                    FixedUpdate,
                    movement::solve_arena_motion.in_set(SimulationSet::Motion),
                );
            }
            PhysicsBackend::Rapier => {
                // Запрос должен попасть в контроллер до того, как rapier его заберёт
                app.add_systems(
                    FixedUpdate,
                    movement::solve_rapier_motion
                        .in_set(SimulationSet::Motion)
                        .before(PhysicsSet::SyncBackend),
                );
            }
        }

        app.add_systems(
            Update,
            (
                sync::apply_snapshots.in_set(PresentationSet::Snapshots),
                (
                    sync::sync_mirror_entities::<RenderPlayer>,
                    sync::sync_mirror_entities::<RenderProjectile>,
                )
                    .in_set(PresentationSet::Mirrors),
                camera::update_camera_rig.in_set(PresentationSet::Camera),
                protocol::emit_player_move.in_set(PresentationSet::Outbound),
                hud::update_combat_status.in_set(PresentationSet::Hud),
            ),
        );

        if self.spawn_local_player {
            app.add_systems(Startup, setup_local_player);
        }

        logger::log_info(&format!(
            "ArenaSimulationPlugin: backend {:?}, {} Hz",
            self.backend, settings.motion.tick_hz
        ));
    }
}

fn setup_local_player(
    mut commands: Commands,
    settings: Res<GameSettings>,
    backend: Res<PhysicsBackend>,
    mut rig: ResMut<CameraRig>,
) {
    let entity = spawn_local_player(&mut commands, &settings, *backend);
    rig.position = Vec3::from_array(settings.arena.spawn) + Vec3::Y * settings.camera.eye_height;
    logger::log(&format!("Local player spawned: {:?}", entity));
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Минимальный Bevy App для headless прогонов
///
/// Время идёт ровно на один fixed step за `app.update()`: каждый update
/// после первого крутит FixedUpdate один раз.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();

    let step = Duration::from_secs_f64(1.0 / 60.0);
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_duration(step))
        .insert_resource(TimeUpdateStrategy::ManualDuration(step));

    app
}

/// Debug-снапшот всех `T`, отсортированный по entity index
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}

//! This module contains the main game logic and state.

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::query::With;
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::system::{IntoSystem, Res};
use bevy_ecs::world::World;
use glam::IVec2;
use tracing::{debug, error, info, trace};

use crate::error::{GameError, GameResult};
use crate::events::StageTransition;
use crate::formatter;
use crate::map::builder::Map;
use crate::map::direction::Direction;
use crate::map::grid::cell_center;
use crate::map::layout::LevelLayout;
use crate::systems::{
    animation_system, audio_system, collision_system, player_bundle, player_system, pursuer_system, spawn_system,
    stage_system, AudioEvent, AudioResource, AudioSink, AudioState, DeltaTime, DotCount, EntityType, GameRng, GameStage,
    InputState, ItemBundle, ItemCollider, LevelClock, PlayerBeacon, PlayerControlled, Position, ScoreResource,
    SpawnSchedule,
};

/// System set for all gameplay systems to ensure they run in a fixed order each tick
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum GameplaySet {
    /// Gameplay systems that process inputs
    Input,
    /// Gameplay systems that update the game state
    Update,
    /// Gameplay systems that respond to events
    Respond,
}

/// One level of Munch Man, built on the Bevy ECS architecture.
///
/// A `World` holds the entities, components and resources of the level while a `Schedule` defines the
/// order the gameplay systems run in. Every call to [`Game::tick`] advances the simulation by one step.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Builds a level from `layout`: the navigation map, the player, every dot and power ball, and
    /// the pursuer spawn schedule. `seed` fixes the pursuers' random choices.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Map` when the layout is missing its player start or pen, or is malformed.
    pub fn new(layout: &LevelLayout, seed: u64) -> GameResult<Game> {
        let map = Map::new(layout)?;
        let player_start = map.player_start;

        let mut world = World::default();
        let mut schedule = Schedule::default();

        Self::setup_ecs(&mut world);
        Self::insert_resources(&mut world, map, seed);
        Self::spawn_player(&mut world, player_start);
        Self::spawn_items(&mut world);
        Self::configure_schedule(&mut schedule);

        info!(seed, "Level ready");
        Ok(Game { world, schedule })
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<GameError>(world);
        EventRegistry::register_event::<AudioEvent>(world);
        EventRegistry::register_event::<StageTransition>(world);
    }

    fn insert_resources(world: &mut World, map: Map, seed: u64) {
        world.insert_resource(map);
        world.insert_resource(ScoreResource(0));
        world.insert_resource(DotCount(0));
        world.insert_resource(DeltaTime(0.0));
        world.insert_resource(LevelClock::default());
        world.insert_resource(GameRng::seeded(seed));
        world.insert_resource(InputState::default());
        world.insert_resource(AudioState::default());
        world.insert_resource(AudioResource::default());
        world.insert_resource(SpawnSchedule::default());
        world.insert_resource(GameStage::default());
    }

    fn spawn_player(world: &mut World, start: IVec2) {
        let bundle = player_bundle(world.resource::<Map>());
        world.insert_resource(PlayerBeacon { cell: start, direction: None });
        let entity = world.spawn(bundle).id();
        debug!(?entity, x = start.x, y = start.y, "Spawned player");
    }

    fn spawn_items(world: &mut World) {
        let items: Vec<(IVec2, EntityType)> = {
            let map = world.resource::<Map>();
            map.dots
                .iter()
                .map(|&cell| (cell, EntityType::Dot))
                .chain(map.power_balls.iter().map(|&cell| (cell, EntityType::PowerBall)))
                .collect()
        };

        let dots = items.iter().filter(|(_, kind)| *kind == EntityType::Dot).count();
        info!(
            dot_count = dots,
            power_ball_count = items.len() - dots,
            "Spawning collectible items"
        );

        for (cell, entity_type) in items {
            world.spawn(ItemBundle {
                position: Position(cell_center(cell)),
                entity_type,
                item_collider: ItemCollider,
            });
        }
        world.insert_resource(DotCount(dots as u32));
    }

    fn configure_schedule(schedule: &mut Schedule) {
        let in_play = |stage: Res<GameStage>| !stage.is_finished();

        schedule
            .add_systems((
                player_system.in_set(GameplaySet::Input),
                (spawn_system, pursuer_system, collision_system)
                    .chain()
                    .in_set(GameplaySet::Update),
                (animation_system.pipe(stage_system), audio_system)
                    .chain()
                    .in_set(GameplaySet::Respond),
            ))
            .configure_sets(
                (
                    GameplaySet::Input.run_if(in_play),
                    GameplaySet::Update.run_if(in_play),
                    GameplaySet::Respond,
                )
                    .chain(),
            );
    }

    /// Queues a directional press for the next tick.
    pub fn press(&mut self, direction: Direction) {
        self.world.resource_mut::<InputState>().press(direction);
    }

    /// Replaces the collaborator that plays sounds.
    pub fn set_audio_sink(&mut self, sink: Box<dyn AudioSink>) {
        self.world.insert_resource(AudioResource(sink));
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.world.resource_mut::<AudioState>().muted = muted;
    }

    /// Executes one step of game logic by running all scheduled ECS systems.
    ///
    /// Input pressed since the last tick is consumed, errors reported by systems are logged, and the
    /// event buffers are rotated so every event is seen by each reader exactly once.
    ///
    /// # Returns
    ///
    /// The stage the level is in after this step.
    pub fn tick(&mut self, dt: f32) -> GameStage {
        self.world.insert_resource(DeltaTime(dt));
        self.schedule.run(&mut self.world);
        self.world.resource_mut::<InputState>().clear();

        for error in self.world.resource_mut::<Events<GameError>>().drain() {
            error!(%error, "System reported an error");
        }
        self.world.resource_mut::<Events<AudioEvent>>().update();
        self.world.resource_mut::<Events<StageTransition>>().update();

        formatter::increment_tick();

        let stage = self.stage();
        trace!(?stage, score = self.score(), "Tick complete");
        stage
    }

    pub fn stage(&self) -> GameStage {
        *self.world.resource::<GameStage>()
    }

    pub fn score(&self) -> u32 {
        self.world.resource::<ScoreResource>().0
    }

    pub fn dots_remaining(&self) -> u32 {
        self.world.resource::<DotCount>().0
    }

    pub fn map(&self) -> &Map {
        self.world.resource::<Map>()
    }

    /// Whether the player entity still exists (it is removed once its death clip ends).
    pub fn has_player(&mut self) -> bool {
        self.world
            .query_filtered::<(), With<PlayerControlled>>()
            .iter(&self.world)
            .next()
            .is_some()
    }
}

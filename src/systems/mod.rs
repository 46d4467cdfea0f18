//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components, systems,
//! and resources.

pub mod ai;
pub mod animation;
pub mod audio;
pub mod collision;
pub mod components;
pub mod input;
pub mod player;
pub mod pursuer;
pub mod stage;

pub use self::ai::{AiContext, ModeKind, ModeTransition, PursuerMode, Sighting};
pub use self::animation::{animation_system, AnimationSignal};
pub use self::audio::{audio_system, AudioEvent, AudioResource, AudioSink, AudioState, LoggingSink, Sound};
pub use self::collision::{collision_system, make_random};
pub use self::components::*;
pub use self::input::InputState;
pub use self::player::{player_bundle, player_system};
pub use self::pursuer::{pursuer_bundle, pursuer_system, spawn_system, SpawnSchedule};
pub use self::stage::{stage_system, GameStage};

//! A smartcab learning to drive a grid of traffic lights with tabular Q-learning.
#![warn(clippy::cast_lossless)]
#![warn(clippy::cast_possible_truncation)]
#![warn(clippy::doc_markdown)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::for_kv_map)] // part of warn(clippy::all), specifically style?
#![warn(clippy::missing_const_for_fn)] // has some false positives
#![warn(clippy::needless_borrow)]
#![warn(clippy::needless_pass_by_value)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::use_self)] // also triggered by macro expansions
pub mod agents;
pub mod cli;
pub mod config;
pub mod envs;
mod error;
pub mod logging;
pub mod simulation;
pub mod spaces;

pub use agents::{Agent, RandomAgent, TabularQLearningAgent, TabularQLearningAgentConfig};
pub use config::{ConfigError, ExperimentConfig};
pub use envs::{Environment, TrafficWorld, TrafficWorldConfig};
pub use error::SmartcabError;
pub use simulation::{run_trials, RunError, RunSummary, Step};
pub use spaces::{Action, InvalidStateKind, Light, State};

/// Pseudo-random number generator used by agents and environments.
pub type Prng = rand_chacha::ChaCha8Rng;

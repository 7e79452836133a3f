//! A collection of tic-tac-toe variants sharing one turn-based game interface.
//!
//! The [`game`] module holds the board primitives, the line-win evaluator and
//! one state machine per variant. The [`session`] module is the local
//! front door: a variant registry plus a wrapper that serializes input,
//! rejects illegal moves and hands out immutable snapshots for rendering.

pub mod game;
pub mod session;

//! Core types and definitions for the Starfall Invaders simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, snapshots, events, and constants.
//! It has no dependency on any renderer, audio backend or runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;

//! HTTP route handlers

pub mod game;
pub mod player;
pub mod poll;
pub mod status;

//! A ray-cast grid shooter.
//!
//! The core is a software renderer (grid DDA walls plus depth-tested
//! billboards) and a fixed-step simulation of enemies and projectiles.  The
//! finished frame is handed to a wgpu presenter by the winit host loop in
//! [`engine`].

pub mod assets;
pub mod camera;
pub mod combat;
pub mod config;
pub mod enemy;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod input;
pub mod map;
pub mod player;
pub mod projectile;
pub mod renderer;
pub mod window;
pub mod world;

pub use error::GameError;

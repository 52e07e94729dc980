//! Domain Models - The vocabulary of the Landsraad
//!
//! Every name here should match how the game table talks about the world.

pub mod actor;
pub mod army;
pub mod character;
pub mod event;
pub mod house;
pub mod time;
pub mod trade;
pub mod vote;

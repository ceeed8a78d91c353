//! Static combat data: mechanic constants, troop stat table and terrain table.
//!
//! Nothing in this crate has behavior beyond lookups. The engine in
//! `combat-core` reads these tables; callers may also use them to display
//! or estimate army strength.

pub mod defines;
pub mod terrain;
pub mod units;

pub use terrain::{Terrain, TerrainModifiers, TerrainParseError};
pub use units::{TroopType, UnitStats};

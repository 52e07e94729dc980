//! Domain Services - Rules that span more than one value
//!
//! Pure functions over domain types. No storage, no clock.

pub mod economy;
pub mod settlement;
pub mod tally;

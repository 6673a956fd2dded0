/*
[INPUT]:  Dashboard payload definitions
[OUTPUT]: Type re-exports
[POS]:    Data layer - module wiring
[UPDATE]: When types are added or removed
*/

pub mod enums;
pub mod models;

pub use enums::*;
pub use models::*;

pub mod delivery;
pub mod eth;
pub mod registry;
pub mod store;

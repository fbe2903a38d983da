//! Positions module - one holding per asset.

mod positions_model;
mod positions_service;
mod positions_traits;

pub use positions_model::{NewPosition, Position};
pub use positions_service::PositionService;
pub use positions_traits::{PositionRepositoryTrait, PositionServiceTrait};

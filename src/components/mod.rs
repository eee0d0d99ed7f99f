//! The components module contains all shared components for our app.

mod app;
mod asset_detail;
mod asset_list;
mod icons;
mod player;

pub use app::*;
pub use asset_detail::*;
pub use asset_list::*;
pub use icons::*;
pub use player::*;

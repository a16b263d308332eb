//! Armoury Engine library.
//!
//! Application layer around the armoury domain: the archetype wargear sheet
//! and the item sheet, driven through ports the host implements.
//!
//! ## Structure
//!
//! - `use_cases/` - Sheet actions orchestrating domain aggregates
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;

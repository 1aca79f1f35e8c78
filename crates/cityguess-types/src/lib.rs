//! Shared type definitions for the cityguess selection engine.
//!
//! This crate is the single source of truth for the types that cross crate
//! boundaries and reach the front end. Types flow downstream to `TypeScript`
//! via `ts-rs`.
//!
//! # Modules
//!
//! - [`enums`] -- Difficulty tiers, relaxation levels, error identifiers
//! - [`structs`] -- Catalog cities, their identity and response projection
//! - [`request`] -- Selection request, seed and response payloads

pub mod enums;
pub mod request;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Difficulty, ParseDifficultyError, Relaxation, SelectionErrorKind};
pub use request::{
    DEFAULT_ROUND_COUNT, SelectionRequest, SelectionResponse, SelectionSeed,
};
pub use structs::{City, CityKey, CityView};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // Files are written to the `bindings/` directory relative to the
        // crate root.
        use ts_rs::TS;

        // Enums
        let _ = crate::enums::Difficulty::export_all();
        let _ = crate::enums::Relaxation::export_all();
        let _ = crate::enums::SelectionErrorKind::export_all();

        // Structs
        let _ = crate::structs::CityKey::export_all();
        let _ = crate::structs::City::export_all();
        let _ = crate::structs::CityView::export_all();

        // Requests
        let _ = crate::request::SelectionSeed::export_all();
        let _ = crate::request::SelectionRequest::export_all();
        let _ = crate::request::SelectionResponse::export_all();
    }
}

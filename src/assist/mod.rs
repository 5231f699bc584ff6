pub mod client;

pub use client::{AssistClient, TripSuggestion, INSIGHTS_FALLBACK, NO_DATA_MESSAGE};

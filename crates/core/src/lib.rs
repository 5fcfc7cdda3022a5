//! Loadwatch core domain logic.
//!
//! Everything in this crate is transport-agnostic: the HTTP layer in
//! `loadwatch-api` calls into [`load::LoadMonitorService`] and renders its
//! output. Time and load readings are injected through [`clock::Clock`] and
//! [`sampler::LoadSampler`] so the debounce logic can be driven with
//! simulated time in tests.

pub mod alert;
pub mod clock;
pub mod error;
pub mod load;
pub mod sampler;
pub mod types;

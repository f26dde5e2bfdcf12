//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository reads and engine evaluation into use-case APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod itinerary_service;

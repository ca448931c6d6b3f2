/*
 * Responsibility
 * - re-export the pieces app.rs needs (public/protected routers)
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::{protected, public};

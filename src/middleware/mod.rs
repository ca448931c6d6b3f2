/*
 * Responsibility
 * - public entry points of the middleware layer
 * - each submodule exposes an `apply(router, ..)` used from app.rs
 */
pub mod auth;
pub mod cors;
pub mod http;

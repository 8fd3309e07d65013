//! # Blog API Server
//!
//! Actix-web server exposing CRUD over blog posts.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod startup;
pub mod state;
pub mod telemetry;

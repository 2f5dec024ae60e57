//! Client for the lead tracking backend: typed transport, per-screen view
//! controllers and a terminal shell that drives them.

pub mod api;
pub mod date;
pub mod domain;
pub mod dto;
pub mod forms;
pub mod models;
pub mod routes;
pub mod shell;
pub mod views;

// src/adapter/mod.rs
// Inbound triggers

pub mod http_server;
pub mod scheduler;

// HTTP server exposing the record store over a JSON API

mod error;
mod handle_paginate;
mod handle_users;
mod routes;
pub mod startup;

use crate::reconcile::ReconcileEngine;
use crate::search::SearchEngine;
use crate::store::RecordStore;
use crate::validate::FieldValidator;
use axum::Router;
use std::sync::Arc;
use std::time::Instant;

pub use startup::{start_server, StartupConfig};

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    pub version: String,
}

/// Shared handler state: the store adapter plus the engines built around it.
/// Everything is injected here at construction; no globals.
#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<dyn RecordStore>,
    pub search: Arc<SearchEngine>,
    pub reconcile: Arc<ReconcileEngine>,
    pub validator: Arc<FieldValidator>,
    pub config: ServerConfig,
    pub start_time: Instant,
}

pub struct Server {
    store: Arc<dyn RecordStore>,
    config: ServerConfig,
    start_time: Instant,
}

impl Server {
    pub fn new(store: Arc<dyn RecordStore>, config: ServerConfig) -> Self {
        Self {
            store,
            config,
            start_time: Instant::now(),
        }
    }

    pub fn router(&self) -> Router {
        routes::create_router(
            Arc::clone(&self.store),
            self.config.clone(),
            self.start_time,
        )
    }

    pub fn start_time(&self) -> Instant {
        self.start_time
    }
}

//! CRUD operations over the entity store.
//!
//! Every operation validates its input before touching the store. Reference
//! checks run inside the same store write as the mutation they guard, so a
//! concurrent delete cannot slip in between the check and the write.

pub mod domains;
pub mod plugin_services;
pub mod plugins;
pub mod routes;

use portico_store::EntityStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AdminFacade {
    store: Arc<EntityStore>,
}

impl AdminFacade {
    pub fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }
}

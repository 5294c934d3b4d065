//! Session directory: session id to ledger.
//!
//! Two levels of locking: the map itself sits behind an `RwLock` (writes only on
//! login/rotate), and every ledger has its own `Mutex` so buy/sell on one session
//! serialize without blocking other sessions.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::domain::{ClientLedger, SessionId};
use crate::engine::EngineError;

pub type SharedLedger = Arc<Mutex<ClientLedger>>;

#[derive(Debug)]
pub struct SessionDirectory {
    ledgers: RwLock<HashMap<SessionId, SharedLedger>>,
    starting_cash: f64,
}

impl SessionDirectory {
    pub fn new(starting_cash: f64) -> Self {
        Self {
            ledgers: RwLock::new(HashMap::new()),
            starting_cash,
        }
    }

    /// Mint a new session id for `subject` and give it a fresh ledger.
    pub fn create(&self, subject: &str) -> SessionId {
        let id = SessionId::generate(subject);
        self.register(id.clone());
        id
    }

    /// Give an externally issued id a fresh ledger.
    ///
    /// Returns false, leaving the existing ledger in place, if the id is known.
    pub fn register(&self, id: SessionId) -> bool {
        let mut ledgers = self.ledgers.write();
        if ledgers.contains_key(&id) {
            return false;
        }
        ledgers.insert(id, Arc::new(Mutex::new(ClientLedger::new(self.starting_cash))));
        true
    }

    pub fn lookup(&self, id: &SessionId) -> Result<SharedLedger, EngineError> {
        self.ledgers
            .read()
            .get(id)
            .cloned()
            .ok_or(EngineError::Unauthorized)
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.ledgers.read().contains_key(id)
    }

    /// Re-key `old`'s ledger under `new`. `old` stops resolving.
    pub fn rotate(&self, old: &SessionId, new: SessionId) -> Result<(), EngineError> {
        let mut ledgers = self.ledgers.write();
        let ledger = ledgers.remove(old).ok_or(EngineError::Unauthorized)?;
        ledgers.insert(new, ledger);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.ledgers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledgers.read().is_empty()
    }
}

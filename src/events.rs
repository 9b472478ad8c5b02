use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{AccountId, LockPeriod};

/// all events emitted by the settlement engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    AccountOpened {
        account_id: AccountId,
        owner_id: String,
        principal: Money,
        lock_period: LockPeriod,
        maturity_timestamp: DateTime<Utc>,
        timestamp: DateTime<Utc>,
    },
    AccountMatured {
        account_id: AccountId,
        matured_at: DateTime<Utc>,
    },
    /// the wallet-crediting collaborator moves `payout` on receipt of this
    AccountWithdrawn {
        account_id: AccountId,
        principal: Money,
        interest_portion: Money,
        penalty: Money,
        payout: Money,
        was_early: bool,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

//! Notification events emitted by the chain.
//!
//! Business-rule rejections are reported as structured events through an
//! injected sink rather than written straight to process-wide output, so a
//! test harness can capture them. The `Display` form of each event is the
//! exact notification text an observer sees.

use std::fmt;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use foodchain_core::{ProductKind, Role};

/// Notifications emitted at business-rule rejection points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainEvent {
    /// A party that only collects payment tried to send money.
    MoneyNotSent { role: Role },
    /// A party that only pays tried to receive money.
    MoneyNotReceived { role: Role },
    /// The offered payment was below the product's fixed price.
    NotEnoughMoney { offered: u32, price: u32 },
    /// The offered payment exceeded the product's fixed price and the
    /// configured policy rejects overpayment.
    Overpayment { offered: u32, price: u32 },
    /// A transmission of an already in-flight product was attempted.
    DoubleSpendAttempt { role: Role, kind: ProductKind },
}

impl fmt::Display for ChainEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoneyNotSent { role } => write!(f, "{} doesn't send money!", role),
            Self::MoneyNotReceived { role } => {
                write!(f, "{} doesn't receive money, but pays!", role)
            }
            Self::NotEnoughMoney { .. } => write!(f, "Not enough money!"),
            Self::Overpayment { .. } => write!(f, "Overpayment is not accepted!"),
            Self::DoubleSpendAttempt { .. } => write!(f, "ATTEMPT TO COMMIT DOUBLE SPENDING"),
        }
    }
}

/// Sink for chain notifications, injected into channels and the chain at
/// construction time.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ChainEvent);
}

/// Writes each notification to standard output, mirroring it to the log.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn emit(&self, event: ChainEvent) {
        tracing::warn!(%event, "chain notification");
        println!("{event}");
    }
}

/// Captures notifications in memory for assertions.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<ChainEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured events, in emission order.
    pub fn events(&self) -> Vec<ChainEvent> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Whether any captured event's notification text contains `text`.
    pub fn contains(&self, text: &str) -> bool {
        self.events()
            .iter()
            .any(|event| event.to_string().contains(text))
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: ChainEvent) {
        tracing::warn!(%event, "chain notification");
        match self.events.lock() {
            Ok(mut guard) => guard.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

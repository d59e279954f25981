//! Business-event notification hook
//!
//! Status transitions raise [`BusinessEvent`]s toward whatever delivery
//! channel the surrounding application wires in (email, in-app, webhook).
//! Delivery is best-effort: a notification failure is logged and swallowed,
//! never surfaced as the failure of the business operation that raised it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identifiers::{
    AssetId, DocumentId, ReconciliationId, TenantId,
};

/// Errors from a notification channel
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Notification channel failed: {0}")]
    Channel(String),
}

/// Events raised by the accounting kernel on status transitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusinessEvent {
    DocumentApproved {
        tenant_id: TenantId,
        document_id: DocumentId,
    },
    DocumentSent {
        tenant_id: TenantId,
        document_id: DocumentId,
    },
    DocumentPaid {
        tenant_id: TenantId,
        document_id: DocumentId,
    },
    DocumentOverdue {
        tenant_id: TenantId,
        document_id: DocumentId,
    },
    AssetDisposed {
        tenant_id: TenantId,
        asset_id: AssetId,
    },
    ReconciliationCompleted {
        tenant_id: TenantId,
        reconciliation_id: ReconciliationId,
    },
}

/// Delivery channel for business events
pub trait Notifier {
    fn notify(&self, event: &BusinessEvent) -> Result<(), NotifyError>;
}

/// Notifier that drops every event
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: &BusinessEvent) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Delivers an event, logging and swallowing any failure
pub fn notify_best_effort(notifier: &dyn Notifier, event: BusinessEvent) {
    if let Err(err) = notifier.notify(&event) {
        tracing::warn!(error = %err, ?event, "notification delivery failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct FailingNotifier;

    impl Notifier for FailingNotifier {
        fn notify(&self, _event: &BusinessEvent) -> Result<(), NotifyError> {
            Err(NotifyError::Channel("smtp down".to_string()))
        }
    }

    struct RecordingNotifier {
        events: RefCell<Vec<BusinessEvent>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, event: &BusinessEvent) -> Result<(), NotifyError> {
            self.events.borrow_mut().push(event.clone());
            Ok(())
        }
    }

    #[test]
    fn test_best_effort_swallows_failure() {
        let event = BusinessEvent::DocumentPaid {
            tenant_id: TenantId::new(),
            document_id: DocumentId::new(),
        };
        // Must not panic or propagate
        notify_best_effort(&FailingNotifier, event);
    }

    #[test]
    fn test_best_effort_delivers() {
        let notifier = RecordingNotifier {
            events: RefCell::new(Vec::new()),
        };
        let event = BusinessEvent::DocumentSent {
            tenant_id: TenantId::new(),
            document_id: DocumentId::new(),
        };

        notify_best_effort(&notifier, event.clone());

        assert_eq!(*notifier.events.borrow(), vec![event]);
    }
}

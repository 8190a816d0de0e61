//! The intent loop: drains a channel of view intents into a session,
//! debouncing typed search text.
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

use shelf_core::config::SearchSettings;
use shelf_core::{Intent, LocalStore, ViewAdapter};

use crate::debounce::Debouncer;
use crate::session::Session;

/// Run until the intent channel closes, then return the session.
///
/// `SearchTextChanged` goes through the debouncer; `SearchSubmitted` and
/// `Reset` cancel any pending search and apply immediately. A search still pending when
/// the channel closes is applied before returning.
pub async fn run<A, S>(mut session: Session<A, S>, mut intents: UnboundedReceiver<Intent>, search: &SearchSettings) -> Session<A, S>
where
    A: ViewAdapter,
    S: LocalStore,
{
    let mut debouncer = Debouncer::new(Duration::from_millis(search.debounce_ms), search.leading_edge);
    loop {
        tokio::select! {
            intent = intents.recv() => {
                match intent {
                    Some(Intent::SearchTextChanged(text)) => {
                        if let Some(text) = debouncer.push(text) {
                            session.apply(Intent::SearchTextChanged(text));
                        }
                    }
                    Some(Intent::SearchSubmitted(text)) => {
                        debouncer.cancel();
                        session.apply(Intent::SearchSubmitted(text));
                    }
                    Some(Intent::Reset) => {
                        debouncer.cancel();
                        session.apply(Intent::Reset);
                    }
                    Some(intent) => session.apply(intent),
                    None => {
                        if let Some(text) = debouncer.flush() {
                            session.apply(Intent::SearchTextChanged(text));
                        }
                        break;
                    }
                }
            }
            text = debouncer.ready() => session.apply(Intent::SearchTextChanged(text)),
        }
    }
    tracing::debug!("intent channel closed");
    session
}

//! Fire-and-forget interaction dispatch.
//!
//! [`InteractionDispatcher::dispatch`] returns immediately. The resolver
//! call runs on the tokio runtime, and its result comes back through a
//! channel that the owning scene drains on its own thread each frame, so
//! animation and emotion state are only ever touched from that thread.

use std::sync::Arc;
use std::time::Duration;

use pandu_core::touch::RecognizedGesture;
use pandu_core::ReactionOutcome;
use pandu_net::{InteractionRecord, NetError, ReactionResolver};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// A finished dispatch, ready to apply.
#[derive(Debug)]
pub struct Resolution {
    /// Ticket returned by [`InteractionDispatcher::dispatch`].
    pub ticket: u64,
    /// The gesture that was sent.
    pub gesture: RecognizedGesture,
    /// Whether the avatar was talking when the gesture was sent.
    pub is_talking: bool,
    /// Resolver answer, or why there is none.
    pub result: Result<ReactionOutcome, NetError>,
}

/// Sends recognised gestures to a [`ReactionResolver`] in the background.
pub struct InteractionDispatcher<R> {
    resolver: Arc<R>,
    runtime: Handle,
    timeout: Duration,
    tx: mpsc::UnboundedSender<Resolution>,
    rx: mpsc::UnboundedReceiver<Resolution>,
    next_ticket: u64,
    in_flight: usize,
}

impl<R: ReactionResolver> InteractionDispatcher<R> {
    /// Create a dispatcher spawning onto `runtime`. Each resolver call is
    /// abandoned after `timeout`.
    #[must_use]
    pub fn new(resolver: R, runtime: Handle, timeout: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            resolver: Arc::new(resolver),
            runtime,
            timeout,
            tx,
            rx,
            next_ticket: 0,
            in_flight: 0,
        }
    }

    /// Send a gesture. Pull direction is dropped from the outbound record;
    /// the returned [`Resolution`] still carries the full gesture.
    pub fn dispatch(&mut self, gesture: RecognizedGesture, is_talking: bool) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight += 1;

        let record = InteractionRecord::now(gesture.part, gesture.gesture, gesture.intensity, is_talking);
        debug!(
            ticket,
            part = %record.part,
            gesture = %record.gesture,
            intensity = record.intensity,
            is_talking,
            "dispatching interaction"
        );

        let resolver = Arc::clone(&self.resolver);
        let tx = self.tx.clone();
        let timeout = self.timeout;
        self.runtime.spawn(async move {
            let result = match tokio::time::timeout(timeout, resolver.resolve(record)).await {
                Ok(result) => result,
                Err(_) => {
                    #[allow(clippy::cast_possible_truncation)]
                    let ms = timeout.as_millis() as u64;
                    Err(NetError::Timeout(ms))
                }
            };
            if let Err(e) = &result {
                warn!(ticket, error = %e, "interaction dispatch failed");
            }
            let resolution = Resolution {
                ticket,
                gesture,
                is_talking,
                result,
            };
            if tx.send(resolution).is_err() {
                debug!(ticket, "scene dropped before resolution");
            }
        });
        ticket
    }

    /// Take every resolution that has arrived, without waiting.
    pub fn poll(&mut self) -> Vec<Resolution> {
        let mut ready = Vec::new();
        while let Ok(resolution) = self.rx.try_recv() {
            ready.push(resolution);
        }
        self.in_flight = self.in_flight.saturating_sub(ready.len());
        ready
    }

    /// Wait for the next resolution. `None` when nothing is in flight.
    pub async fn next_resolution(&mut self) -> Option<Resolution> {
        if self.in_flight == 0 {
            return None;
        }
        let resolution = self.rx.recv().await?;
        self.in_flight -= 1;
        Some(resolution)
    }

    /// Dispatches whose result has not been taken yet.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

impl<R> std::fmt::Debug for InteractionDispatcher<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionDispatcher")
            .field("timeout", &self.timeout)
            .field("next_ticket", &self.next_ticket)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pandu_core::{BodyPart, GestureIntensity, GestureType, Point, PullDirection};
    use pandu_net::OfflineResolver;

    struct Sleepy;

    impl ReactionResolver for Sleepy {
        async fn resolve(&self, _record: InteractionRecord) -> Result<ReactionOutcome, NetError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Err(NetError::Unavailable("never".into()))
        }
    }

    fn hair_pull() -> RecognizedGesture {
        RecognizedGesture {
            part: BodyPart::Hair,
            gesture: GestureType::Pull(PullDirection::Down),
            intensity: GestureIntensity::Moderate,
            location: Point::new(0.0, 100.0),
        }
    }

    #[tokio::test]
    async fn failures_come_back_with_the_full_gesture() {
        let mut dispatcher = InteractionDispatcher::new(OfflineResolver, Handle::current(), Duration::from_secs(1));
        let ticket = dispatcher.dispatch(hair_pull(), true);
        assert_eq!(dispatcher.in_flight(), 1);

        let resolution = dispatcher.next_resolution().await.expect("one in flight");
        assert_eq!(resolution.ticket, ticket);
        assert_eq!(resolution.gesture.gesture, GestureType::Pull(PullDirection::Down));
        assert!(resolution.is_talking);
        assert!(resolution.result.is_err());
        assert_eq!(dispatcher.in_flight(), 0);
        assert!(dispatcher.next_resolution().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_resolver_times_out() {
        let mut dispatcher = InteractionDispatcher::new(Sleepy, Handle::current(), Duration::from_millis(500));
        dispatcher.dispatch(hair_pull(), false);
        let resolution = dispatcher.next_resolution().await.expect("one in flight");
        assert!(matches!(resolution.result, Err(NetError::Timeout(500))));
    }

    #[tokio::test]
    async fn poll_never_blocks() {
        let mut dispatcher = InteractionDispatcher::new(Sleepy, Handle::current(), Duration::from_secs(30));
        dispatcher.dispatch(hair_pull(), false);
        assert!(dispatcher.poll().is_empty());
        assert_eq!(dispatcher.in_flight(), 1);
    }

    #[tokio::test]
    async fn dropping_the_dispatcher_mid_flight_is_quiet() {
        let mut dispatcher = InteractionDispatcher::new(OfflineResolver, Handle::current(), Duration::from_secs(1));
        dispatcher.dispatch(hair_pull(), false);
        let tx = dispatcher.tx.clone();
        drop(dispatcher);
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert!(tx.is_closed());
    }
}

//! Moving events from a relay listener into a sink.

use relay::Listener;

use crate::log::Sink;

/// Feed every event the listener receives into `sink` until the relay
/// closes. Returns the number of events delivered.
pub async fn pump<S>(listener: &mut Listener, sink: &mut S) -> usize
where
    S: Sink + ?Sized,
{
    let mut delivered = 0;
    while let Some(event) = listener.recv().await {
        sink.on_event(event);
        delivered += 1;
    }
    tracing::debug!(target: "render_flow::sink", delivered = delivered, "relay closed, sink detached");
    delivered
}

/// Feed events that are already waiting, without blocking.
pub fn drain_pending<S>(listener: &mut Listener, sink: &mut S) -> usize
where
    S: Sink + ?Sized,
{
    let mut delivered = 0;
    while let Some(event) = listener.try_recv() {
        sink.on_event(event);
        delivered += 1;
    }
    delivered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::EventLog;
    use relay::{Publish, Relay};
    use render_events::{ElementDetails, MutationKind, ReflowEvent, RenderEvent};

    fn reflow(id: &str) -> RenderEvent {
        ReflowEvent::new("DIV", ElementDetails::new(Some(id), ["row"]), MutationKind::ChildList).into()
    }

    #[test]
    fn test_drain_pending() {
        let relay = Relay::new();
        let mut listener = relay.subscribe();
        let mut log = EventLog::new();

        assert_eq!(drain_pending(&mut listener, &mut log), 0);

        relay.send(reflow("a"));
        relay.send(reflow("b"));
        assert_eq!(drain_pending(&mut listener, &mut log), 2);
        assert_eq!(log.events().cloned().collect::<Vec<_>>(), vec![reflow("a"), reflow("b")]);
    }

    #[tokio::test]
    async fn test_pump_until_closed() {
        let relay = Relay::new();
        let mut listener = relay.subscribe();

        let task = tokio::spawn(async move {
            let mut log = EventLog::new();
            let delivered = pump(&mut listener, &mut log).await;
            (delivered, log)
        });

        relay.send(reflow("a"));
        relay.send(reflow("b"));
        relay.send(reflow("c"));
        drop(relay);

        let (delivered, log) = task.await.unwrap();
        assert_eq!(delivered, 3);
        assert_eq!(log.entries()[2].event, reflow("c"));
    }
}

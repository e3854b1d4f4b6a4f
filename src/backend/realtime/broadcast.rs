/**
 * Realtime Event Fan-out
 *
 * Each realtime connection owns an unbounded mpsc receiver; the presence
 * task keeps the matching sender. Broadcasting means pushing a clone of the
 * event into every sender.
 *
 * Sends to a connection whose stream has already been dropped fail
 * silently; that connection's disconnect command is on its way.
 */

use tokio::sync::mpsc;

use crate::shared::RealtimeEvent;

/// Sender half of one connection's outbound queue
pub type ConnectionSender = mpsc::UnboundedSender<RealtimeEvent>;

/// Receiver half of one connection's outbound queue
pub type ConnectionReceiver = mpsc::UnboundedReceiver<RealtimeEvent>;

/// Broadcast a realtime event to a set of connections
///
/// # Returns
///
/// Number of connections that accepted the event
pub fn broadcast_event<'a, I>(senders: I, event: &RealtimeEvent) -> usize
where
    I: IntoIterator<Item = &'a ConnectionSender>,
{
    let delivered = senders
        .into_iter()
        .filter(|sender| sender.send(event.clone()).is_ok())
        .count();

    tracing::debug!("[Realtime] {} broadcast to {} connections", event.name(), delivered);
    delivered
}

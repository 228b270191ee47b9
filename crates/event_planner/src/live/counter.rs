// Periodic counter channel.
//
// Each subscriber owns its own timer; there is no process-wide loop. Dropping
// the stream cancels that subscriber's timer and nothing else.

use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll, ready};
use std::time::Duration;
use tokio::time::{Instant, Interval, interval_at};

/// Emits 1, 2, 3, … one value per `period`, starting one full period after
/// the call, for as long as the stream is polled.
pub fn counter(period: Duration) -> Counter {
    Counter {
        interval: interval_at(Instant::now() + period, period),
        count: 0,
    }
}

pub struct Counter {
    interval: Interval,
    count: u64,
}

impl Stream for Counter {
    type Item = u64;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<u64>> {
        let this = self.get_mut();
        ready!(this.interval.poll_tick(cx));
        this.count += 1;
        Poll::Ready(Some(this.count))
    }
}

//! Posted-event loop with priority lanes.
//!
//! Events posted by orchestrator callbacks are consumed on the UI thread
//! through an [`EventLoop`]. Three lanes back the three priorities; a
//! high-priority event is always delivered before anything of lower
//! priority, regardless of arrival order. Within a lane, delivery is FIFO.
//! This is what keeps decoded protocol frames ahead of bulk waveform
//! buffers under load.

use crossbeam_channel::{unbounded, Receiver, Sender};

use nl_common::{AppEvent, EventSink, Priority};

/// Create a connected poster/loop pair.
pub fn event_loop<T: Send>() -> (EventPoster<T>, EventLoop<T>) {
    let (high_tx, high_rx) = unbounded();
    let (normal_tx, normal_rx) = unbounded();
    let (low_tx, low_rx) = unbounded();

    (
        EventPoster {
            high: high_tx,
            normal: normal_tx,
            low: low_tx,
        },
        EventLoop {
            high: high_rx,
            normal: normal_rx,
            low: low_rx,
            stashed_normal: None,
            stashed_low: None,
        },
    )
}

/// Sending half; callable from any thread. All clones feed the same loop.
pub struct EventPoster<T> {
    high: Sender<T>,
    normal: Sender<T>,
    low: Sender<T>,
}

impl<T> Clone for EventPoster<T> {
    fn clone(&self) -> Self {
        Self {
            high: self.high.clone(),
            normal: self.normal.clone(),
            low: self.low.clone(),
        }
    }
}

impl<T: Send> EventPoster<T> {
    /// Post a value into the lane for its priority. Posting after the loop
    /// is dropped is a no-op.
    pub fn post(&self, value: T, priority: Priority) {
        let lane = match priority {
            Priority::High => &self.high,
            Priority::Normal => &self.normal,
            Priority::Low => &self.low,
        };
        let _ = lane.send(value);
    }
}

impl EventSink for EventPoster<AppEvent> {
    fn post(&self, event: AppEvent, priority: Priority) {
        EventPoster::post(self, event, priority);
    }
}

/// Receiving half, owned by the consuming thread.
pub struct EventLoop<T> {
    high: Receiver<T>,
    normal: Receiver<T>,
    low: Receiver<T>,
    // Values taken from a lower lane while waiting; re-ranked on next poll.
    stashed_normal: Option<T>,
    stashed_low: Option<T>,
}

impl<T: Send> EventLoop<T> {
    /// Next pending value in priority order, or `None` when all lanes are
    /// currently empty.
    pub fn try_next(&mut self) -> Option<T> {
        if let Ok(value) = self.high.try_recv() {
            return Some(value);
        }
        if let Some(value) = self.stashed_normal.take() {
            return Some(value);
        }
        if let Ok(value) = self.normal.try_recv() {
            return Some(value);
        }
        if let Some(value) = self.stashed_low.take() {
            return Some(value);
        }
        self.low.try_recv().ok()
    }

    /// Block until a value is available; `None` once every poster has been
    /// dropped and the lanes are drained.
    pub fn next(&mut self) -> Option<T> {
        enum Wake<T> {
            High(Option<T>),
            Normal(Option<T>),
            Low(Option<T>),
        }

        loop {
            if let Some(value) = self.try_next() {
                return Some(value);
            }

            // All lanes empty: wait for any of them.
            let wake = crossbeam_channel::select! {
                recv(self.high) -> msg => Wake::High(msg.ok()),
                recv(self.normal) -> msg => Wake::Normal(msg.ok()),
                recv(self.low) -> msg => Wake::Low(msg.ok()),
            };

            match wake {
                Wake::High(Some(value)) => return Some(value),
                // Lower-lane arrivals are stashed and re-ranked so a high
                // value racing in is still delivered first.
                Wake::Normal(Some(value)) => self.stashed_normal = Some(value),
                Wake::Low(Some(value)) => self.stashed_low = Some(value),
                // A receive error means every poster is gone (the senders
                // travel together); drain whatever is buffered and finish.
                Wake::High(None) | Wake::Normal(None) | Wake::Low(None) => {
                    return self.try_next();
                }
            }
        }
    }
}

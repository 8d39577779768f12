//! Controller events and the channel-based bus that carries them.
//!
//! Each [`EventBus::subscribe`] call opens a fresh channel.  Dropping the
//! returned [`Subscription`] unsubscribes: the bus discards a subscriber the
//! first time a send to it fails.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use gp_core::RouteResult;
use gp_env::{ChaosReport, WeatherType};

use crate::VoiceIntent;

#[derive(Clone, Debug, PartialEq)]
pub enum SimEvent {
    /// One environment tick ran (timer-driven or explicit).
    EnvironmentUpdated { minute: u32 },
    TrafficChanged { level: f64 },
    WeatherChanged { rain: f64, kind: WeatherType, live: bool },
    CityChanged { name: &'static str },
    Chaos(ChaosReport),
    AutoUpdate { running: bool },
    TrainingStarted { episodes: usize },
    /// After each batch; `progress` runs from 0 to 100.
    TrainingProgress { progress: f64, episodes_done: usize, last_reward: f64 },
    TrainingFinished { episodes: usize },
    ComparisonFinished { rl: Box<RouteResult>, dijkstra: Box<RouteResult> },
    Voice(VoiceIntent),
    Shutdown,
}

#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<SimEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        Subscription { rx }
    }

    /// Deliver `event` to every live subscriber.
    pub fn publish(&mut self, event: SimEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Subscribers still registered.  Dropped subscriptions are only noticed
    /// on the next [`publish`](Self::publish).
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// Receiving end of one subscription.
#[derive(Debug)]
pub struct Subscription {
    rx: Receiver<SimEvent>,
}

impl Subscription {
    /// Next queued event, if any.  Never blocks.
    pub fn try_next(&self) -> Option<SimEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Everything queued so far.
    pub fn drain(&self) -> Vec<SimEvent> {
        self.rx.try_iter().collect()
    }

    /// Stop receiving events.
    pub fn unsubscribe(self) {}
}

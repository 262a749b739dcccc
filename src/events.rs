use crate::audio::SoundEffect;
use crossbeam::queue::SegQueue;
use glam::Vec2;
use std::sync::Arc;

// Playback events for audio -> gameplay communication
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// A pooled channel was (re)assigned; `effect` is `None` for raw clips
    EffectStarted {
        channel: usize,
        effect: Option<SoundEffect>,
    },
    SpatialStarted {
        effect: SoundEffect,
        position: Vec2,
    },
    MusicStarted(String),
    MusicStopped(String),
    MusicPaused,
    MusicResumed,
}

/// Lock-free event queue for audio -> gameplay communication
pub struct PlaybackEventQueue {
    queue: Arc<SegQueue<PlaybackEvent>>,
}

impl PlaybackEventQueue {
    pub fn new() -> Self {
        Self {
            queue: Arc::new(SegQueue::new()),
        }
    }

    /// Get a handle for sending events (for the audio side)
    pub fn sender(&self) -> PlaybackEventSender {
        PlaybackEventSender {
            queue: Arc::clone(&self.queue),
        }
    }

    /// Get a handle for receiving events (for the gameplay side)
    pub fn receiver(&self) -> PlaybackEventReceiver {
        PlaybackEventReceiver {
            queue: Arc::clone(&self.queue),
        }
    }
}

impl Default for PlaybackEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct PlaybackEventSender {
    queue: Arc<SegQueue<PlaybackEvent>>,
}

impl PlaybackEventSender {
    /// Non-blocking
    pub fn send(&self, event: PlaybackEvent) {
        self.queue.push(event);
    }
}

pub struct PlaybackEventReceiver {
    queue: Arc<SegQueue<PlaybackEvent>>,
}

impl PlaybackEventReceiver {
    /// Hands every pending event to `handle`, oldest first
    pub fn process_events<F>(&self, mut handle: F)
    where
        F: FnMut(PlaybackEvent),
    {
        while let Some(event) = self.queue.pop() {
            handle(event);
        }
    }

    pub fn drain(&self) -> Vec<PlaybackEvent> {
        let mut events = Vec::new();
        self.process_events(|event| events.push(event));
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_arrive_in_order() {
        let queue = PlaybackEventQueue::new();
        let sender = queue.sender();
        sender.send(PlaybackEvent::MusicStarted("crypt".into()));
        sender.send(PlaybackEvent::MusicPaused);

        let events = queue.receiver().drain();
        assert_eq!(
            events,
            vec![
                PlaybackEvent::MusicStarted("crypt".into()),
                PlaybackEvent::MusicPaused
            ]
        );
        assert!(queue.receiver().drain().is_empty());
    }
}

use crate::audio::{SoundEffect, SynthesizedClip};
use crossbeam::queue::SegQueue;
use glam::Vec2;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum AudioCommand {
    PlayEffect(SoundEffect),
    PlayNamed(String),
    PlayClip(Arc<SynthesizedClip>),
    PlayAt {
        effect: SoundEffect,
        position: Vec2,
    },
    PlayMusic(String),
    StopMusic,
    PauseMusic,
    ResumeMusic,
    SetMasterVolume(f32),
    SetMusicVolume(f32),
    SetSfxVolume(f32),
    SetMuted(bool),
    SetListenerPosition(Vec2),
}

/// Lock-free command queue for gameplay -> audio communication
/// Uses a multiple-producer, single-consumer queue from crossbeam
pub struct AudioCommandQueue {
    queue: Arc<SegQueue<AudioCommand>>,
}

impl AudioCommandQueue {
    pub fn new() -> Self {
        Self {
            queue: Arc::new(SegQueue::new()),
        }
    }

    /// Get a handle for sending commands (for the simulation thread)
    pub fn sender(&self) -> AudioCommandSender {
        AudioCommandSender {
            queue: Arc::clone(&self.queue),
        }
    }

    /// Get a handle for receiving commands (for the audio thread)
    pub fn receiver(&self) -> AudioCommandReceiver {
        AudioCommandReceiver {
            queue: Arc::clone(&self.queue),
        }
    }
}

/// Sender handle for the simulation thread
#[derive(Clone)]
pub struct AudioCommandSender {
    queue: Arc<SegQueue<AudioCommand>>,
}

impl AudioCommandSender {
    /// Send a command to the audio thread (non-blocking)
    pub fn send(&self, command: AudioCommand) {
        self.queue.push(command);
    }
}

/// Receiver handle for the audio thread
pub struct AudioCommandReceiver {
    queue: Arc<SegQueue<AudioCommand>>,
}

impl AudioCommandReceiver {
    /// Process pending commands in send order.
    /// This should be called at the start of each audio block
    pub fn process_commands<F>(&self, mut apply_command: F)
    where
        F: FnMut(AudioCommand),
    {
        // Cap the work done per audio block so a burst of requests
        // cannot starve the callback
        for _ in 0..64 {
            if let Some(command) = self.queue.pop() {
                apply_command(command);
            } else {
                break;
            }
        }
    }

    /// Check if there are pending commands
    pub fn has_commands(&self) -> bool {
        !self.queue.is_empty()
    }
}

impl Default for AudioCommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_processed_in_call_order() {
        let queue = AudioCommandQueue::new();
        let sender = queue.sender();
        sender.send(AudioCommand::PlayEffect(SoundEffect::Attack));
        sender.send(AudioCommand::PlayEffect(SoundEffect::EnemyHit));

        let mut seen = Vec::new();
        queue.receiver().process_commands(|command| {
            if let AudioCommand::PlayEffect(effect) = command {
                seen.push(effect);
            }
        });
        assert_eq!(seen, vec![SoundEffect::Attack, SoundEffect::EnemyHit]);
        assert!(!queue.receiver().has_commands());
    }

    #[test]
    fn test_block_limit_leaves_remaining_commands() {
        let queue = AudioCommandQueue::new();
        let sender = queue.sender();
        for _ in 0..70 {
            sender.send(AudioCommand::StopMusic);
        }

        let receiver = queue.receiver();
        let mut count = 0;
        receiver.process_commands(|_| count += 1);
        assert_eq!(count, 64);
        assert!(receiver.has_commands());
    }
}

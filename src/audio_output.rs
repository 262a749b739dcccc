use crate::audio::AudioServer;
use crate::commands::AudioCommandReceiver;
use crate::error::{Error, Result};
use cpal::{traits::*, Sample};
use parking_lot::Mutex;
use std::sync::Arc;

/// Frames rendered per pass when the device does not fix its buffer size.
const MIN_BLOCK_FRAMES: usize = 4096;

/// Keeps the device stream alive; dropping it stops playback.
pub struct AudioOutput {
    _stream: cpal::Stream,
}

impl AudioOutput {
    pub fn new(server: Arc<Mutex<AudioServer>>, commands: AudioCommandReceiver) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::AudioDevice("no output device available".into()))?;

        let config = device
            .default_output_config()
            .map_err(|e| Error::AudioDevice(e.to_string()))?;
        if config.sample_rate().0 != crate::audio::SAMPLE_RATE {
            // clips are fixed at 44.1 kHz; other rates play off-pitch
            tracing::warn!(
                device_rate = config.sample_rate().0,
                "output device does not run at 44100 Hz"
            );
        }

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => Self::run::<f32>(&device, &config.into(), server, commands),
            cpal::SampleFormat::I16 => Self::run::<i16>(&device, &config.into(), server, commands),
            cpal::SampleFormat::U16 => Self::run::<u16>(&device, &config.into(), server, commands),
            other => {
                return Err(Error::AudioDevice(format!(
                    "unsupported sample format {:?}",
                    other
                )))
            }
        }
        .map_err(|e| Error::AudioDevice(e.to_string()))?;

        stream
            .play()
            .map_err(|e| Error::AudioDevice(e.to_string()))?;
        tracing::info!("audio output started");

        Ok(AudioOutput { _stream: stream })
    }

    fn run<T>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        server: Arc<Mutex<AudioServer>>,
        commands: AudioCommandReceiver,
    ) -> std::result::Result<cpal::Stream, cpal::BuildStreamError>
    where
        T: Sample + cpal::SizedSample + cpal::FromSample<f32>,
    {
        let channels = (config.channels as usize).max(1);
        let block_frames = match config.buffer_size {
            cpal::BufferSize::Fixed(frames) => (frames as usize).max(MIN_BLOCK_FRAMES),
            cpal::BufferSize::Default => MIN_BLOCK_FRAMES,
        };
        // sized once here; the callback only ever slices it
        let mut stereo = vec![0.0f32; block_frames * 2];

        device.build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                let mut guard = server.try_lock();
                if let Some(server) = guard.as_mut() {
                    commands.process_commands(|command| server.apply_command(command));
                }

                for block in data.chunks_mut(channels * block_frames) {
                    let frames = block.len() / channels;
                    let stereo = &mut stereo[..frames * 2];
                    match guard.as_mut() {
                        Some(server) => server.generate(stereo),
                        None => stereo.fill(0.0),
                    }
                    write_frames(block, stereo, channels);
                }
            },
            |err| tracing::error!(error = %err, "audio stream error"),
            None,
        )
    }
}

fn write_frames<T>(data: &mut [T], stereo: &[f32], channels: usize)
where
    T: Sample + cpal::FromSample<f32>,
{
    for (frame, lr) in data.chunks_mut(channels).zip(stereo.chunks(2)) {
        let (left, right) = (lr[0], lr[1]);
        if channels >= 2 {
            frame[0] = T::from_sample(left);
            frame[1] = T::from_sample(right);
        } else {
            frame[0] = T::from_sample((left + right) * 0.5);
        }

        for sample in frame.iter_mut().skip(2) {
            *sample = T::from_sample(0.0f32);
        }
    }
}

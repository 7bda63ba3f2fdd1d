use crate::output::check_playable;
use crate::{AudioData, AudioOutput, AudioOutputError};
use rodio::{OutputStream, OutputStreamBuilder, Sink};
use std::sync::mpsc;
use std::thread;

/// Audio player that handles playback of audio samples
struct AudioPlayer {
    _stream: OutputStream,
    sink: Sink,
}

impl AudioPlayer {
    fn try_new() -> Result<Self, AudioOutputError> {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(_) => return Err(AudioOutputError::InitFailed),
        };

        let sink = Sink::connect_new(stream.mixer());

        Ok(AudioPlayer {
            _stream: stream,
            sink,
        })
    }

    fn play(&self, audio: AudioData) {
        let source = rodio::buffer::SamplesBuffer::new(
            audio.channels as u16,
            audio.sample_rate,
            audio.samples,
        );
        self.sink.append(source);
    }

    fn wait_until_end(&self) {
        self.sink.sleep_until_end();
    }
}

enum Command {
    Play(AudioData),
    Wait(mpsc::Sender<()>),
}

/// Default output device, owned by a dedicated thread.
///
/// The rodio stream never leaves the thread that opened it; callers talk to it over a channel.
pub struct RodioOutput {
    commands: mpsc::Sender<Command>,
}

impl RodioOutput {
    /// Open the default output device
    pub fn try_new() -> Result<Self, AudioOutputError> {
        let (commands, inbox) = mpsc::channel::<Command>();
        let (ready_tx, ready_rx) = mpsc::channel();

        thread::Builder::new()
            .name("audio-output".to_string())
            .spawn(move || {
                let player = match AudioPlayer::try_new() {
                    Ok(player) => {
                        let _ = ready_tx.send(Ok(()));
                        player
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };

                for command in inbox {
                    match command {
                        Command::Play(audio) => player.play(audio),
                        Command::Wait(done) => {
                            player.wait_until_end();
                            let _ = done.send(());
                        }
                    }
                }
                log::debug!("Audio output thread shutting down");
            })
            .map_err(|_| AudioOutputError::InitFailed)?;

        ready_rx
            .recv()
            .map_err(|_| AudioOutputError::InitFailed)??;

        log::info!("Audio output device opened");
        Ok(Self { commands })
    }
}

impl AudioOutput for RodioOutput {
    fn play(&self, audio: &AudioData) -> Result<(), AudioOutputError> {
        check_playable(audio)?;
        self.commands
            .send(Command::Play(audio.clone()))
            .map_err(|_| AudioOutputError::Disconnected)
    }

    fn wait_until_done(&self) -> Result<(), AudioOutputError> {
        let (done_tx, done_rx) = mpsc::channel();
        self.commands
            .send(Command::Wait(done_tx))
            .map_err(|_| AudioOutputError::Disconnected)?;
        done_rx.recv().map_err(|_| AudioOutputError::Disconnected)
    }
}

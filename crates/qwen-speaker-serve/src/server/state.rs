use crate::config::RequestDefaults;
use crate::dispatcher::Synthesizer;
use tokio::sync::Mutex;

pub(crate) struct AppState {
    /// One synthesis+playback cycle at a time; later requests wait their turn
    pub synthesizer: Mutex<Synthesizer>,
    pub defaults: RequestDefaults,
}

impl AppState {
    pub fn new(synthesizer: Synthesizer, defaults: RequestDefaults) -> Self {
        Self {
            synthesizer: Mutex::new(synthesizer),
            defaults,
        }
    }
}

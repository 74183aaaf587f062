use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use log::debug;

use super::{KeystrokeSink, SinkError};

/// Presses the keys on the real keyboard of whatever window has focus
pub struct EnigoSink {
    enigo: Enigo,
}

impl EnigoSink {
    pub fn new() -> Result<Self, SinkError> {
        let enigo = Enigo::new(&Settings::default()).map_err(|e| SinkError::Unavailable {
            source: Box::new(e),
        })?;
        Ok(Self { enigo })
    }
}

impl KeystrokeSink for EnigoSink {
    fn send_keys(&mut self, keys: &str) -> Result<(), SinkError> {
        debug!("typing {:?}", keys);
        let rejected = |e: enigo::InputError| SinkError::Rejected {
            keys: keys.to_string(),
            source: Box::new(e),
        };

        // text() would type a literal tab character, the inspector needs the key
        for (i, text) in keys.split('\t').enumerate() {
            if i > 0 {
                self.enigo.key(Key::Tab, Direction::Click).map_err(rejected)?;
            }
            if !text.is_empty() {
                self.enigo.text(text).map_err(rejected)?;
            }
        }
        Ok(())
    }
}

use std::io::{self, Write};
use thiserror::Error;

use crate::normalize::Level;

#[cfg(feature = "enigo")]
mod keyboard;
mod window;

#[cfg(feature = "enigo")]
pub use keyboard::EnigoSink;
pub use window::{focus_window, UNITY_WINDOW_CLASS};

/// Moves to the next field of the inspector
pub const FIELD_SEPARATOR: &str = "\t";
/// Moves past the foldout between two list entries
pub const ENTRY_SEPARATOR: &str = "\t\t";

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Couldn't write keystrokes")]
    Io(#[from] io::Error),
    #[error("Couldn't connect to the keyboard input system")]
    Unavailable {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Couldn't find an open window of class {class}")]
    WindowNotFound {
        class: String,
        #[source]
        source: io::Error,
    },
    #[error("Keystrokes {keys:?} were rejected")]
    Rejected {
        keys: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

//Wherever the keys end up, a tab in `keys` is a single press of the tab key
pub trait KeystrokeSink {
    fn send_keys(&mut self, keys: &str) -> Result<(), SinkError>;
}

impl<S: KeystrokeSink + ?Sized> KeystrokeSink for &mut S {
    fn send_keys(&mut self, keys: &str) -> Result<(), SinkError> {
        (**self).send_keys(keys)
    }
}

impl Level {
    /// The keystrokes that enter this level into a list field: the vertex
    /// count, then every vertex as `x`, tab, `y`, each entry followed by two
    /// tabs.
    pub fn keystrokes(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(2 + 4 * self.vertices.len());
        keys.push(self.count.to_string());
        keys.push(ENTRY_SEPARATOR.to_string());
        for vertex in &self.vertices {
            keys.push(format_coordinate(vertex.x));
            keys.push(FIELD_SEPARATOR.to_string());
            keys.push(format_coordinate(vertex.y));
            keys.push(ENTRY_SEPARATOR.to_string());
        }
        keys
    }
}

// shortest representation that reads back to the same value, always with a
// fractional part ("5.0", not "5") and at least two exponent digits ("1e-05")
fn format_coordinate(value: f64) -> String {
    let repr = format!("{:?}", value);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}

pub struct Scriber<S: KeystrokeSink> {
    sink: S,
}

impl<S: KeystrokeSink> Scriber<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn scribe(&mut self, level: &Level) -> Result<(), SinkError> {
        for keys in level.keystrokes() {
            self.sink.send_keys(&keys)?;
        }
        Ok(())
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Keeps every chunk of keys it is sent
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub sent: Vec<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything sent so far, as one string
    pub fn joined(&self) -> String {
        self.sent.concat()
    }
}

impl KeystrokeSink for RecordingSink {
    fn send_keys(&mut self, keys: &str) -> Result<(), SinkError> {
        self.sent.push(keys.to_string());
        Ok(())
    }
}

/// Writes keys as text instead of pressing them, tabs are spelled `{TAB}`.
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Terminate the line and flush
    pub fn finish(mut self) -> Result<W, SinkError> {
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> KeystrokeSink for WriterSink<W> {
    fn send_keys(&mut self, keys: &str) -> Result<(), SinkError> {
        write!(self.writer, "{}", keys.replace('\t', "{TAB}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn rectangle() -> Level {
        Level {
            count: 4,
            vertices: vec![
                DVec2::new(-5., 4.),
                DVec2::new(5., 4.),
                DVec2::new(5., -4.),
                DVec2::new(-5., -4.),
            ],
        }
    }

    #[test]
    fn test_keystrokes() {
        let keys = rectangle().keystrokes();
        assert_eq!(keys.len(), 2 + 4 * 4);
        assert_eq!(
            keys[..8],
            ["4", "\t\t", "-5.0", "\t", "4.0", "\t\t", "5.0", "\t"]
        );
        assert_eq!(keys.last().map(String::as_str), Some("\t\t"));
    }

    #[test]
    fn test_format_coordinate() {
        assert_eq!(format_coordinate(-5.0), "-5.0");
        assert_eq!(format_coordinate(0.0), "0.0");
        assert_eq!(format_coordinate(2.5), "2.5");
        assert_eq!(format_coordinate(1.0 / 3.0), "0.3333333333333333");

        // exponents are padded to two digits and always signed
        assert_eq!(
            format_coordinate(5.000000000143778e-06),
            "5.000000000143778e-06"
        );
        assert_eq!(format_coordinate(1e-5), "1e-05");
        assert_eq!(format_coordinate(-2.5e-7), "-2.5e-07");
        assert_eq!(format_coordinate(1.25e-123), "1.25e-123");
        assert_eq!(format_coordinate(1e16), "1e+16");
    }

    #[test]
    fn test_window_not_found() {
        let err = SinkError::WindowNotFound {
            class: UNITY_WINDOW_CLASS.to_string(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(
            err.to_string(),
            "Couldn't find an open window of class UnityContainerWndClass"
        );

        let source = std::error::Error::source(&err).expect("cause should be chained");
        assert_eq!(
            source.downcast_ref::<io::Error>().map(io::Error::kind),
            Some(io::ErrorKind::NotFound)
        );
    }

    #[test]
    fn test_scribe_to_recording_sink() {
        let mut scriber = Scriber::new(RecordingSink::new());
        scriber.scribe(&rectangle()).unwrap();
        assert_eq!(
            scriber.into_sink().joined(),
            "4\t\t-5.0\t4.0\t\t5.0\t4.0\t\t5.0\t-4.0\t\t-5.0\t-4.0\t\t"
        );
    }

    #[test]
    fn test_scribe_borrowed_sink() {
        let mut sink = RecordingSink::new();
        Scriber::new(&mut sink)
            .scribe(&Level {
                count: 1,
                vertices: vec![DVec2::new(0.25, -0.5)],
            })
            .unwrap();
        assert_eq!(sink.sent, vec!["1", "\t\t", "0.25", "\t", "-0.5", "\t\t"]);
    }

    #[test]
    fn test_writer_sink() {
        let mut scriber = Scriber::new(WriterSink::new(Vec::new()));
        scriber.scribe(&rectangle()).unwrap();
        let written = scriber.into_sink().finish().unwrap();
        assert_eq!(
            String::from_utf8(written).unwrap(),
            "4{TAB}{TAB}-5.0{TAB}4.0{TAB}{TAB}5.0{TAB}4.0{TAB}{TAB}\
             5.0{TAB}-4.0{TAB}{TAB}-5.0{TAB}-4.0{TAB}{TAB}\n"
        );
    }
}

use std::io::Write;

use meshwire_core::MeshwireResult;
use serde_json::Value;

/// Sink for lowered commands.
///
/// Implementations deliver each payload to one or more viewers and must keep
/// the order in which `send` was called.
pub trait Transport {
    fn send(&mut self, payload: &Value) -> MeshwireResult<()>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, payload: &Value) -> MeshwireResult<()> {
        (**self).send(payload)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, payload: &Value) -> MeshwireResult<()> {
        (**self).send(payload)
    }
}

/// Keeps every payload in memory, in send order.
#[derive(Debug, Default, Clone)]
pub struct RecordingTransport {
    pub sent: Vec<Value>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// `type` discriminators of everything sent so far.
    pub fn kinds(&self) -> Vec<&str> {
        self.sent
            .iter()
            .filter_map(|v| v.get("type").and_then(Value::as_str))
            .collect()
    }
}

impl Transport for RecordingTransport {
    fn send(&mut self, payload: &Value) -> MeshwireResult<()> {
        self.sent.push(payload.clone());
        Ok(())
    }
}

/// Writes one compact JSON document per line.
#[derive(Debug)]
pub struct JsonLinesTransport<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesTransport<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Transport for JsonLinesTransport<W> {
    fn send(&mut self, payload: &Value) -> MeshwireResult<()> {
        serde_json::to_writer(&mut self.writer, payload)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recording_keeps_order() {
        let mut t = RecordingTransport::new();
        t.send(&json!({ "type": "delete", "path": "" })).unwrap();
        t.send(&json!({ "type": "capture_image" })).unwrap();
        assert_eq!(t.kinds(), vec!["delete", "capture_image"]);
    }

    #[test]
    fn test_json_lines_output() {
        let mut t = JsonLinesTransport::new(Vec::new());
        t.send(&json!({ "type": "capture_image" })).unwrap();
        t.send(&json!({ "type": "delete", "path": "a" })).unwrap();
        let out = String::from_utf8(t.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let second: Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["path"], "a");
    }

    #[test]
    fn test_transport_through_mut_ref() {
        fn send_one<T: Transport>(mut transport: T) {
            transport.send(&json!({ "type": "capture_image" })).unwrap();
        }

        let mut inner = RecordingTransport::new();
        send_one(&mut inner);
        send_one(Box::new(&mut inner) as Box<dyn Transport + '_>);
        assert_eq!(inner.sent.len(), 2);
    }
}

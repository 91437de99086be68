//! Wire envelope for render events.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EventError, EventResult};
use crate::event::RenderEvent;

/// Value of the top-level `type` field on every render message.
pub const RENDER_EVENT_TYPE: &str = "RENDER_EVENT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum Envelope {
    #[serde(rename = "RENDER_EVENT")]
    RenderEvent,
}

/// A render event wrapped in its message envelope.
///
/// Serializes to a flat JSON object: the `type` discriminant, the
/// `eventType` variant tag and the variant's fields side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderMessage {
    #[serde(rename = "type")]
    envelope: Envelope,
    #[serde(flatten)]
    event: RenderEvent,
}

impl RenderMessage {
    /// Wrap an event.
    pub fn new(event: RenderEvent) -> Self {
        Self {
            envelope: Envelope::RenderEvent,
            event,
        }
    }

    /// The wrapped event.
    pub fn event(&self) -> &RenderEvent {
        &self.event
    }

    /// Unwrap the event.
    pub fn into_event(self) -> RenderEvent {
        self.event
    }

    /// Serialize to JSON text.
    pub fn to_json(&self) -> EventResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to a JSON value.
    pub fn to_value(&self) -> EventResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl From<RenderEvent> for RenderMessage {
    fn from(event: RenderEvent) -> Self {
        Self::new(event)
    }
}

/// Check whether a message carries the render-event envelope.
pub fn is_render_message(value: &Value) -> bool {
    value.get("type").and_then(Value::as_str) == Some(RENDER_EVENT_TYPE)
}

/// Decode a parsed message.
///
/// Messages without `type == "RENDER_EVENT"` are not ours and yield `None`.
pub fn decode_value(value: Value) -> EventResult<Option<RenderEvent>> {
    if !is_render_message(&value) {
        return Ok(None);
    }

    if value.get("eventType").and_then(Value::as_str).is_none() {
        return Err(EventError::MissingEventType);
    }

    let message: RenderMessage = serde_json::from_value(value)?;
    Ok(Some(message.into_event()))
}

/// Decode JSON message text.
pub fn decode(payload: &str) -> EventResult<Option<RenderEvent>> {
    let value: Value = serde_json::from_str(payload)?;
    decode_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{
        ElementDetails, LargeDomUpdateEvent, LayoutShiftEvent, MutationKind, ReflowEvent, RepaintEvent,
    };
    use serde_json::json;

    #[test]
    fn test_reflow_wire_shape() {
        let event: RenderEvent = ReflowEvent::new(
            "DIV",
            ElementDetails::new(Some("list"), Vec::<String>::new()),
            MutationKind::ChildList,
        )
        .into();

        let value = RenderMessage::new(event).to_value().unwrap();
        assert_eq!(
            value,
            json!({
                "type": "RENDER_EVENT",
                "eventType": "Reflow",
                "targetElement": "DIV",
                "elementDetails": { "id": "list", "classes": "N/A" },
                "changeType": "childList",
            })
        );
    }

    #[test]
    fn test_layout_shift_wire_shape() {
        let event: RenderEvent = LayoutShiftEvent::new(None, Some(0.15)).into();
        let value = RenderMessage::new(event).to_value().unwrap();
        assert_eq!(
            value,
            json!({
                "type": "RENDER_EVENT",
                "eventType": "Layout Shift",
                "affectedElement": "Unknown",
                "impact": 0.15,
            })
        );
    }

    #[test]
    fn test_repaint_wire_shape() {
        let event: RenderEvent = RepaintEvent::new(
            "SPAN",
            ElementDetails::new(None, ["btn"]),
            "background-color",
            "rgb(255, 0, 0)",
        )
        .into();
        let value = RenderMessage::new(event).to_value().unwrap();
        assert_eq!(
            value,
            json!({
                "type": "RENDER_EVENT",
                "eventType": "Repaint",
                "targetElement": "SPAN",
                "elementDetails": { "id": "N/A", "classes": "btn" },
                "changedAttribute": "background-color",
                "computedValue": "rgb(255, 0, 0)",
            })
        );
    }

    #[test]
    fn test_large_update_wire_shape() {
        let event: RenderEvent = LargeDomUpdateEvent::new("DIV", 25).into();
        let value = RenderMessage::new(event).to_value().unwrap();
        assert_eq!(
            value,
            json!({
                "type": "RENDER_EVENT",
                "eventType": "Large DOM Update",
                "targetElement": "DIV",
                "addedNodesCount": 25,
            })
        );
    }

    #[test]
    fn test_decode_preserves_every_field() {
        let events: Vec<RenderEvent> = vec![
            ReflowEvent::new("P", ElementDetails::new(Some("a"), ["x", "y"]), MutationKind::Attributes).into(),
            LayoutShiftEvent::new(Some("IMG"), Some(0.123456789)).into(),
            RepaintEvent::new("A", ElementDetails::unavailable(), "opacity", "0.5").into(),
            LargeDomUpdateEvent::new("UL", 21).into(),
        ];

        for event in events {
            let json = RenderMessage::new(event.clone()).to_json().unwrap();
            let decoded = decode(&json).unwrap();
            assert_eq!(decoded, Some(event));
        }
    }

    #[test]
    fn test_decode_ignores_foreign_messages() {
        assert_eq!(decode(r#"{"type":"PING"}"#).unwrap(), None);
        assert_eq!(decode(r#"{"eventType":"Reflow"}"#).unwrap(), None);
        assert_eq!(decode(r#"{"status":"OK"}"#).unwrap(), None);
    }

    #[test]
    fn test_decode_accepts_integer_impact() {
        let decoded = decode(
            r#"{"type":"RENDER_EVENT","eventType":"Layout Shift","affectedElement":"DIV","impact":0}"#,
        )
        .unwrap();
        assert_eq!(decoded, Some(LayoutShiftEvent::new(Some("DIV"), Some(0.0)).into()));
    }

    #[test]
    fn test_decode_fills_empty_element_details() {
        let decoded = decode(
            r#"{"type":"RENDER_EVENT","eventType":"Reflow","targetElement":"DIV","elementDetails":{"id":"","classes":""},"changeType":"attributes"}"#,
        )
        .unwrap();

        match decoded {
            Some(RenderEvent::Reflow(reflow)) => {
                assert_eq!(reflow.element_details().id(), "N/A");
                assert_eq!(reflow.element_details().classes(), "N/A");
            }
            other => panic!("expected reflow, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_render_message_without_event_type() {
        let result = decode(r#"{"type":"RENDER_EVENT"}"#);
        assert!(matches!(result, Err(EventError::MissingEventType)));
    }

    #[test]
    fn test_decode_rejects_unknown_event_type() {
        let result = decode(r#"{"type":"RENDER_EVENT","eventType":"Scroll","scrollAmount":3}"#);
        assert!(matches!(result, Err(EventError::Serialization(_))));
    }
}

//! Terminal turn outcome

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Terminal result of one agent turn
///
/// A tagged variant: a turn ends with either a direct answer or one tool's
/// payload, never both and never neither. External tagging produces the
/// caller envelope directly: `{"result": "..."}` or `{"tool_result": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// The model answered directly
    #[serde(rename = "result")]
    Answer(String),

    /// A tool ran; its raw payload is passed through unchanged
    #[serde(rename = "tool_result")]
    ToolOutput(Value),
}

impl TurnOutcome {
    /// Whether the turn ended with a direct answer
    pub fn is_answer(&self) -> bool {
        matches!(self, TurnOutcome::Answer(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn answer_serializes_as_result_envelope() {
        let outcome = TurnOutcome::Answer("makan sayur setiap hari".to_string());
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"result": "makan sayur setiap hari"})
        );
    }

    #[test]
    fn tool_output_serializes_as_tool_result_envelope() {
        let outcome = TurnOutcome::ToolOutput(json!({"bmi": 22.86}));
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"tool_result": {"bmi": 22.86}})
        );
    }

    #[test]
    fn envelope_round_trips() {
        let outcome = TurnOutcome::ToolOutput(json!([{"name": "gado gado"}]));
        let json = serde_json::to_string(&outcome).unwrap();
        let back: TurnOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
        assert!(!back.is_answer());
    }
}

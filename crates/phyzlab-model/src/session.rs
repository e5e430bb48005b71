//! Auth context and session attempt records.

use serde::{Deserialize, Serialize};

use crate::params::ParamSet;

/// What the runtime needs to know about the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthContext {
    pub authenticated: bool,
    pub display_name: String,
}

impl AuthContext {
    pub fn signed_in(display_name: &str) -> Self {
        Self {
            authenticated: true,
            display_name: display_name.to_string(),
        }
    }
}

/// One attempt at an experiment, ready to hand to a session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAttempt {
    pub experiment_id: String,
    pub user: String,
    pub inputs: ParamSet,
    pub outputs: ParamSet,
    pub started_at_ms: f64,
    pub ended_at_ms: f64,
}

impl SessionAttempt {
    pub fn duration_ms(&self) -> f64 {
        (self.ended_at_ms - self.started_at_ms).max(0.0)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_json_shape() {
        let attempt = SessionAttempt {
            experiment_id: "exp-0001".into(),
            user: "Ada".into(),
            inputs: ParamSet::new().with("voltage", 5.0),
            outputs: ParamSet::new().with("current", 0.5),
            started_at_ms: 1000.0,
            ended_at_ms: 4000.0,
        };
        let json: serde_json::Value = serde_json::from_str(&attempt.to_json().unwrap()).unwrap();
        assert_eq!(json["experimentId"], "exp-0001");
        assert_eq!(json["inputs"]["voltage"], 5.0);
        assert_eq!(json["outputs"]["current"], 0.5);
        assert_eq!(attempt.duration_ms(), 3000.0);
    }
}

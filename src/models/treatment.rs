use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Experiment arm a user is bucketed into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Treatment {
    #[serde(rename = "control")]
    Control,
    #[serde(rename = "variant-1")]
    Variant1,
}

impl Treatment {
    /// All treatments, in bucket order
    pub const ALL: [Treatment; 2] = [Treatment::Control, Treatment::Variant1];
}

impl Display for Treatment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Treatment::Control => write!(f, "control"),
            Treatment::Variant1 => write!(f, "variant-1"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_treatment_display_matches_serde() {
        for treatment in Treatment::ALL {
            let json = serde_json::to_string(&treatment).unwrap();
            assert_eq!(json, format!("\"{}\"", treatment));
        }
    }
}

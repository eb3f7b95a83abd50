//! Rule variants a game is created with.
//!
//! Defaults are the permissive jump union and no path check on fences.

use serde::{Deserialize, Serialize};

/// How a pawn may get around an adjacent opponent when the straight jump is fenced.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JumpRule {
    /// Any neighbor of either pawn is reachable. Also ignores a fence between
    /// the two pawns when deciding whether they are adjacent.
    #[default]
    Permissive,
    /// Standard Quoridor: the pawns must be connected, and only the open
    /// cells beside the opponent are offered when the straight jump is blocked.
    Strict,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub jumps: JumpRule,
    /// Reject fences that would leave either player without a route to their goal row.
    pub require_path: bool,
}

impl Rules {
    /// Tournament rules: strict jumps and path preservation.
    pub fn standard() -> Rules {
        Rules {
            jumps: JumpRule::Strict,
            require_path: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_permissive() {
        let rules = Rules::default();
        assert_eq!(rules.jumps, JumpRule::Permissive);
        assert!(!rules.require_path);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let rules: Rules = serde_json::from_str(r#"{ "require_path": true }"#).unwrap();
        assert_eq!(rules.jumps, JumpRule::Permissive);
        assert!(rules.require_path);

        let rules: Rules = serde_json::from_str(r#"{ "jumps": "strict" }"#).unwrap();
        assert_eq!(rules.jumps, JumpRule::Strict);
        assert!(!rules.require_path);

        let rules: Rules = serde_json::from_str("{}").unwrap();
        assert_eq!(rules, Rules::default());
    }

    #[test]
    fn test_unknown_jump_rule_rejected() {
        assert!(serde_json::from_str::<Rules>(r#"{ "jumps": "diagonal" }"#).is_err());
    }
}

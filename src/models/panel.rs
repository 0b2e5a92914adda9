use serde::{Deserialize, Serialize};

/// The five dashboard panels. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    Documents,
    Digitalization,
    Classification,
    Recommendations,
    Actions,
}

impl Default for Panel {
    fn default() -> Self {
        Self::Digitalization
    }
}

impl std::fmt::Display for Panel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Documents => write!(f, "documents"),
            Self::Digitalization => write!(f, "digitalization"),
            Self::Classification => write!(f, "classification"),
            Self::Recommendations => write!(f, "recommendations"),
            Self::Actions => write!(f, "actions"),
        }
    }
}

impl std::str::FromStr for Panel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "documents" => Ok(Self::Documents),
            "digitalization" => Ok(Self::Digitalization),
            "classification" => Ok(Self::Classification),
            "recommendations" => Ok(Self::Recommendations),
            "actions" => Ok(Self::Actions),
            _ => Err(format!("unknown panel: {s}")),
        }
    }
}

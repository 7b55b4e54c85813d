use serde::{Deserialize, Serialize};

/// Kind of scheduled activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkoutType {
    Rest,
    Easy,
    Long,
    Interval,
    Tempo,
    Race,
    Strength,
}

impl WorkoutType {
    pub const ALL: [WorkoutType; 7] = [
        WorkoutType::Rest,
        WorkoutType::Easy,
        WorkoutType::Long,
        WorkoutType::Interval,
        WorkoutType::Tempo,
        WorkoutType::Race,
        WorkoutType::Strength,
    ];

    /// Strength and rest carry no distance
    pub fn has_distance(&self) -> bool {
        !matches!(self, WorkoutType::Strength | WorkoutType::Rest)
    }

    /// Rest is the absence of workouts and is never stored as an entry
    pub fn is_schedulable(&self) -> bool {
        !matches!(self, WorkoutType::Rest)
    }
}

impl std::fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkoutType::Rest => write!(f, "Rest"),
            WorkoutType::Easy => write!(f, "Easy"),
            WorkoutType::Long => write!(f, "Long"),
            WorkoutType::Interval => write!(f, "Interval"),
            WorkoutType::Tempo => write!(f, "Tempo"),
            WorkoutType::Race => write!(f, "Race"),
            WorkoutType::Strength => write!(f, "Strength"),
        }
    }
}

impl std::str::FromStr for WorkoutType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rest" => Ok(WorkoutType::Rest),
            "easy" => Ok(WorkoutType::Easy),
            "long" => Ok(WorkoutType::Long),
            "interval" | "intervals" => Ok(WorkoutType::Interval),
            "tempo" => Ok(WorkoutType::Tempo),
            "race" => Ok(WorkoutType::Race),
            "strength" => Ok(WorkoutType::Strength),
            _ => Err(anyhow::anyhow!("Invalid workout type: {}", s)),
        }
    }
}

/// One scheduled activity inside a day slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    #[serde(default)]
    pub distance: f64, // km
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

impl Workout {
    pub fn new(
        id: String,
        workout_type: WorkoutType,
        distance: f64,
        nickname: Option<String>,
    ) -> Self {
        Self {
            id,
            workout_type,
            distance: distance.max(0.0),
            nickname: normalize_nickname(nickname),
        }
    }

    /// Nickname when one is set, otherwise the type name
    pub fn label(&self) -> String {
        match &self.nickname {
            Some(nickname) => nickname.clone(),
            None => self.workout_type.to_string(),
        }
    }
}

/// Empty or blank nicknames are stored as "no nickname"
pub(crate) fn normalize_nickname(nickname: Option<String>) -> Option<String> {
    nickname
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}

//! Entries of the assignment grid (tasks, public holidays and leaves)

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use chrono::NaiveDate;
use csscolorparser::Color;

/// Label given to leave entries
pub const LEAVE_LABEL: &str = "Leave";

/// Story points of an entry
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Points {
    Estimated(f64),
    /// Not point-estimated (holidays, leaves, or a value the service could not provide)
    NotApplicable,
}

impl Points {
    pub fn value(&self) -> Option<f64> {
        match self {
            Points::Estimated(p) => Some(*p),
            Points::NotApplicable => None,
        }
    }
}

impl Default for Points {
    fn default() -> Self {
        Points::NotApplicable
    }
}

impl Display for Points {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Points::Estimated(p) => write!(f, "{}", p),
            Points::NotApplicable => write!(f, "na"),
        }
    }
}

/// Used to support serde
impl Serialize for Points {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Points::Estimated(p) => serializer.serialize_f64(*p),
            Points::NotApplicable => serializer.serialize_str("na"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPoints {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

/// Used to support serde
impl<'de> Deserialize<'de> for Points {
    fn deserialize<D>(deserializer: D) -> Result<Points, D::Error>
    where
        D: Deserializer<'de>,
    {
        let points = match RawPoints::deserialize(deserializer)? {
            RawPoints::Number(p) if p.is_finite() => Points::Estimated(p),
            RawPoints::Text(text) => match text.trim().parse::<f64>() {
                Ok(p) if p.is_finite() => Points::Estimated(p),
                _ => Points::NotApplicable,
            },
            _ => Points::NotApplicable,
        };
        Ok(points)
    }
}


/// What an entry stands for
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EntryKind {
    Holiday { name: String },
    Leave,
    Task { label: String },
}

impl EntryKind {
    /// The text that is displayed for this entry
    pub fn label(&self) -> &str {
        match self {
            EntryKind::Holiday{ name } => name,
            EntryKind::Leave => LEAVE_LABEL,
            EntryKind::Task{ label } => label,
        }
    }

    pub fn is_task(&self) -> bool {
        matches!(self, EntryKind::Task{..})
    }
}

/// A single block of the grid: what a developer does (or does not do) on a given day
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    developer: String,
    date: NaiveDate,
    kind: EntryKind,
    points: Points,
    color: Option<Color>,
}

impl ScheduleEntry {
    pub fn holiday(developer: &str, date: NaiveDate, name: &str) -> Self {
        Self {
            developer: developer.to_string(),
            date,
            kind: EntryKind::Holiday{ name: name.to_string() },
            points: Points::NotApplicable,
            color: Some(crate::palette::HOLIDAY_COLOR.clone()),
        }
    }

    pub fn leave(developer: &str, date: NaiveDate) -> Self {
        Self {
            developer: developer.to_string(),
            date,
            kind: EntryKind::Leave,
            points: Points::NotApplicable,
            color: Some(crate::palette::LEAVE_COLOR.clone()),
        }
    }

    /// A task entry. Its color is assigned later on, once the whole grid is known
    pub fn task(developer: &str, date: NaiveDate, label: &str, points: Points) -> Self {
        Self {
            developer: developer.to_string(),
            date,
            kind: EntryKind::Task{ label: label.to_string() },
            points,
            color: None,
        }
    }

    pub fn developer(&self) -> &str       { &self.developer     }
    pub fn date(&self) -> NaiveDate       { self.date           }
    pub fn kind(&self) -> &EntryKind      { &self.kind          }
    pub fn label(&self) -> &str           { self.kind.label()   }
    pub fn points(&self) -> Points        { self.points         }
    pub fn color(&self) -> Option<&Color> { self.color.as_ref() }

    pub fn set_color(&mut self, color: Color) {
        self.color = Some(color);
    }
}

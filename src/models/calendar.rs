use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::workout::Workout;

/// Weekday key of a day slot, Monday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];

    /// Weekday name of a calendar date
    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }

    /// Days since Monday
    pub fn offset(&self) -> u32 {
        match self {
            Day::Mon => 0,
            Day::Tue => 1,
            Day::Wed => 2,
            Day::Thu => 3,
            Day::Fri => 4,
            Day::Sat => 5,
            Day::Sun => 6,
        }
    }
}

impl From<Weekday> for Day {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => Day::Mon,
            Weekday::Tue => Day::Tue,
            Weekday::Wed => Day::Wed,
            Weekday::Thu => Day::Thu,
            Weekday::Fri => Day::Fri,
            Weekday::Sat => Day::Sat,
            Weekday::Sun => Day::Sun,
        }
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
            Day::Sun => "Sun",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for Day {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono accepts both "mon" and "monday"
        s.trim()
            .parse::<Weekday>()
            .map(Day::from)
            .map_err(|_| anyhow::anyhow!("Invalid day: {}", s))
    }
}

/// The seven day slots of a week; every key is always present
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DaySlots {
    #[serde(rename = "Mon", default)]
    pub mon: Vec<Workout>,
    #[serde(rename = "Tue", default)]
    pub tue: Vec<Workout>,
    #[serde(rename = "Wed", default)]
    pub wed: Vec<Workout>,
    #[serde(rename = "Thu", default)]
    pub thu: Vec<Workout>,
    #[serde(rename = "Fri", default)]
    pub fri: Vec<Workout>,
    #[serde(rename = "Sat", default)]
    pub sat: Vec<Workout>,
    #[serde(rename = "Sun", default)]
    pub sun: Vec<Workout>,
}

impl DaySlots {
    pub fn get(&self, day: Day) -> &Vec<Workout> {
        match day {
            Day::Mon => &self.mon,
            Day::Tue => &self.tue,
            Day::Wed => &self.wed,
            Day::Thu => &self.thu,
            Day::Fri => &self.fri,
            Day::Sat => &self.sat,
            Day::Sun => &self.sun,
        }
    }

    pub fn get_mut(&mut self, day: Day) -> &mut Vec<Workout> {
        match day {
            Day::Mon => &mut self.mon,
            Day::Tue => &mut self.tue,
            Day::Wed => &mut self.wed,
            Day::Thu => &mut self.thu,
            Day::Fri => &mut self.fri,
            Day::Sat => &mut self.sat,
            Day::Sun => &mut self.sun,
        }
    }

    /// Slots in calendar order
    pub fn iter(&self) -> impl Iterator<Item = (Day, &Vec<Workout>)> + '_ {
        Day::ALL.into_iter().map(move |day| (day, self.get(day)))
    }
}

/// One calendar week of the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    pub week: u32,
    pub start_date: NaiveDate,
    pub days: DaySlots,
    pub weekly_total: u32,
}

impl Week {
    /// Empty week starting on the given Monday
    pub fn new(week: u32, start_date: NaiveDate) -> Self {
        Self {
            week,
            start_date,
            days: DaySlots::default(),
            weekly_total: 0,
        }
    }

    /// Sum of all workout distances, rounded to whole km
    pub fn computed_total(&self) -> u32 {
        let sum: f64 = self
            .days
            .iter()
            .flat_map(|(_, workouts)| workouts.iter())
            .map(|w| w.distance.max(0.0))
            .sum();
        round_total(sum)
    }

    /// Refresh the cached weekly total from the day slots
    pub fn recompute_total(&mut self) {
        self.weekly_total = self.computed_total();
    }

    pub fn workout_count(&self) -> usize {
        self.days.iter().map(|(_, workouts)| workouts.len()).sum()
    }

    /// Calendar date of a weekday inside this week
    pub fn date_of(&self, day: Day) -> NaiveDate {
        self.start_date + chrono::Duration::days(day.offset() as i64)
    }
}

/// Address of a single workout inside a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkoutLocation {
    /// 1-based week number
    pub week: u32,
    pub day: Day,
    /// 0-based position in the day's sequence
    pub index: usize,
}

impl WorkoutLocation {
    pub fn new(week: u32, day: Day, index: usize) -> Self {
        Self { week, day, index }
    }
}

impl std::fmt::Display for WorkoutLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "week {} {} #{}", self.week, self.day, self.index)
    }
}

/// Ordered sequence of weeks, numbered 1..N
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingPlan {
    pub weeks: Vec<Week>,
}

impl TrainingPlan {
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    pub fn week(&self, week: u32) -> Option<&Week> {
        self.weeks.iter().find(|w| w.week == week)
    }

    pub fn week_mut(&mut self, week: u32) -> Option<&mut Week> {
        self.weeks.iter_mut().find(|w| w.week == week)
    }

    pub fn workout(&self, at: WorkoutLocation) -> Option<&Workout> {
        self.week(at.week)
            .and_then(|w| w.days.get(at.day).get(at.index))
    }

    pub fn workout_count(&self) -> usize {
        self.weeks.iter().map(Week::workout_count).sum()
    }

    /// Sum of the cached weekly totals
    pub fn total_distance(&self) -> u32 {
        self.weeks.iter().map(|w| w.weekly_total).sum()
    }

    /// Locate a workout by id
    pub fn find_workout(&self, id: &str) -> Option<WorkoutLocation> {
        self.weeks.iter().find_map(|week| {
            week.days.iter().find_map(|(day, workouts)| {
                workouts
                    .iter()
                    .position(|w| w.id == id)
                    .map(|index| WorkoutLocation::new(week.week, day, index))
            })
        })
    }

    /// Weeks numbered 1..N without gaps and every cached total current
    pub fn is_consistent(&self) -> bool {
        self.weeks
            .iter()
            .enumerate()
            .all(|(i, w)| w.week as usize == i + 1 && w.weekly_total == w.computed_total())
    }
}

pub(crate) fn round_total(sum: f64) -> u32 {
    if sum.is_finite() {
        sum.max(0.0).round() as u32
    } else {
        0
    }
}

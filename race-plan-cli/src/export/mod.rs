//! Read-only rendering of a finished plan.
//!
//! Every format shows the cached `weeklyTotal` of each week as stored in
//! the plan; totals are never recomputed here.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Row, Table};
use race_plan::{Day, TrainingPlan, Week, Workout};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::Path;

pub const DEFAULT_TITLE: &str = "Your Training Plan";
const TOTAL_HEADER: &str = "Total (KM)";
const REST: &str = "Rest";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// One row per week
    #[default]
    Landscape,
    /// One block per week, weekdays listed vertically
    Portrait,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Text,
    Markdown,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Markdown => "md",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub title: String,
    pub orientation: Orientation,
    /// Colour name for text table headers (cyan, dark_green, grey, ...)
    pub header_color: String,
    pub format: ExportFormat,
    /// Style text output; off for files
    pub color: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            orientation: Orientation::default(),
            header_color: "cyan".to_string(),
            format: ExportFormat::default(),
            color: true,
        }
    }
}

/// `"<distance>km <label>"`
pub fn workout_cell(workout: &Workout) -> String {
    format!("{}km {}", workout.distance, workout.label())
}

fn day_cell(workouts: &[Workout], separator: &str) -> String {
    if workouts.is_empty() {
        return REST.to_string();
    }

    workouts
        .iter()
        .map(workout_cell)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Generate a default filename for an export made on `date`.
pub fn default_file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!("training-plan-{}.{}", date.format("%Y-%m-%d"), format.extension())
}

/// Render a plan in the configured format and orientation.
pub fn render(plan: &TrainingPlan, options: &ExportOptions) -> Result<String> {
    match options.format {
        ExportFormat::Text => render_text(plan, options),
        ExportFormat::Markdown => render_markdown(plan, options),
        ExportFormat::Csv => render_csv(plan, options.orientation),
        ExportFormat::Json => {
            serde_json::to_string_pretty(plan).context("Failed to serialize training plan")
        }
    }
}

/// Render a plan and write it to a file.
pub fn export_to_file(plan: &TrainingPlan, options: &ExportOptions, path: &Path) -> Result<()> {
    let content = render(plan, options)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write export to {}", path.display()))?;

    tracing::info!("Exported {} weeks to {:?}", plan.weeks.len(), path);
    Ok(())
}

fn landscape_header() -> Vec<String> {
    std::iter::once("Week".to_string())
        .chain(Day::ALL.iter().map(|day| day.to_string()))
        .chain(std::iter::once(TOTAL_HEADER.to_string()))
        .collect()
}

fn landscape_row(week: &Week, separator: &str) -> Vec<String> {
    std::iter::once(week.week.to_string())
        .chain(week.days.iter().map(|(_, workouts)| day_cell(workouts, separator)))
        .chain(std::iter::once(week.weekly_total.to_string()))
        .collect()
}

fn portrait_heading(week: &Week) -> String {
    format!("Week {} ({})", week.week, week.start_date.format("%Y-%m-%d"))
}

fn portrait_rows(week: &Week, separator: &str) -> Vec<Vec<String>> {
    week.days
        .iter()
        .map(|(day, workouts)| vec![day.to_string(), day_cell(workouts, separator)])
        .chain(std::iter::once(vec![
            TOTAL_HEADER.to_string(),
            week.weekly_total.to_string(),
        ]))
        .collect()
}

fn render_text(plan: &TrainingPlan, options: &ExportOptions) -> Result<String> {
    let mut out = String::new();
    if options.color {
        writeln!(out, "{}", options.title.bold())?;
    } else {
        writeln!(out, "{}", options.title)?;
    }

    if plan.is_empty() {
        writeln!(out)?;
        writeln!(out, "No training weeks")?;
        return Ok(out);
    }

    match options.orientation {
        Orientation::Landscape => {
            let rows: Vec<Vec<String>> =
                plan.weeks.iter().map(|w| landscape_row(w, "\n")).collect();
            writeln!(out)?;
            writeln!(out, "{}", text_table(&landscape_header(), &rows, options))?;
        }
        Orientation::Portrait => {
            let header = vec!["Day".to_string(), "Workouts".to_string()];
            for week in &plan.weeks {
                writeln!(out)?;
                writeln!(out, "{}", portrait_heading(week))?;
                let table = text_table(&header, &portrait_rows(week, "\n"), options);
                writeln!(out, "{}", table)?;
            }
        }
    }

    Ok(out)
}

/// Map a configured colour name onto the table palette; unknown names stay unstyled.
fn header_color(name: &str) -> Option<Color> {
    let color = match name.trim().to_lowercase().replace(&['_', '-', ' '][..], "").as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "darkred" => Color::DarkRed,
        "green" => Color::Green,
        "darkgreen" => Color::DarkGreen,
        "yellow" => Color::Yellow,
        "darkyellow" => Color::DarkYellow,
        "blue" => Color::Blue,
        "darkblue" => Color::DarkBlue,
        "magenta" | "purple" => Color::Magenta,
        "darkmagenta" => Color::DarkMagenta,
        "cyan" => Color::Cyan,
        "darkcyan" => Color::DarkCyan,
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        "darkgrey" | "darkgray" => Color::DarkGrey,
        _ => return None,
    };
    Some(color)
}

fn text_table(header: &[String], rows: &[Vec<String>], options: &ExportOptions) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if !options.color {
        table.force_no_tty();
    }

    let color = header_color(&options.header_color);
    table.set_header(header.iter().map(|title| {
        let cell = Cell::new(title).add_attribute(Attribute::Bold);
        match color {
            Some(color) => cell.fg(color),
            None => cell,
        }
    }));

    for row in rows {
        table.add_row(Row::from(row.iter().map(Cell::new)));
    }

    table
}

fn markdown_escape(cell: &str) -> String {
    cell.replace('|', "\\|")
}

fn write_markdown_table(out: &mut String, header: &[String], rows: &[Vec<String>]) -> Result<()> {
    writeln!(out, "| {} |", header.join(" | "))?;
    writeln!(out, "|{}|", vec!["---"; header.len()].join("|"))?;
    for row in rows {
        let cells: Vec<String> = row.iter().map(|c| markdown_escape(c)).collect();
        writeln!(out, "| {} |", cells.join(" | "))?;
    }
    Ok(())
}

fn render_markdown(plan: &TrainingPlan, options: &ExportOptions) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "# {}", options.title)?;

    if plan.is_empty() {
        writeln!(out)?;
        writeln!(out, "_No training weeks_")?;
        return Ok(out);
    }

    match options.orientation {
        Orientation::Landscape => {
            let rows: Vec<Vec<String>> =
                plan.weeks.iter().map(|w| landscape_row(w, "<br>")).collect();
            writeln!(out)?;
            write_markdown_table(&mut out, &landscape_header(), &rows)?;
        }
        Orientation::Portrait => {
            let header = vec!["Day".to_string(), "Workouts".to_string()];
            for week in &plan.weeks {
                writeln!(out)?;
                writeln!(out, "## {}", portrait_heading(week))?;
                writeln!(out)?;
                write_markdown_table(&mut out, &header, &portrait_rows(week, "<br>"))?;
            }
        }
    }

    Ok(out)
}

fn csv_field(field: &str) -> String {
    if field.contains(&[',', '"', '\n'][..]) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_csv_row(out: &mut String, fields: &[String]) -> Result<()> {
    let fields: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
    writeln!(out, "{}", fields.join(","))?;
    Ok(())
}

fn render_csv(plan: &TrainingPlan, orientation: Orientation) -> Result<String> {
    let mut out = String::new();

    match orientation {
        Orientation::Landscape => {
            write_csv_row(&mut out, &landscape_header())?;
            for week in &plan.weeks {
                write_csv_row(&mut out, &landscape_row(week, "; "))?;
            }
        }
        Orientation::Portrait => {
            let header = ["Week", "Start", "Day", "Workouts"].map(String::from);
            write_csv_row(&mut out, &header)?;
            for week in &plan.weeks {
                let start = week.start_date.format("%Y-%m-%d").to_string();
                for row in portrait_rows(week, "; ") {
                    let mut fields = vec![week.week.to_string(), start.clone()];
                    fields.extend(row);
                    write_csv_row(&mut out, &fields)?;
                }
            }
        }
    }

    Ok(out)
}

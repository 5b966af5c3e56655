//! Subcommand definitions and their handlers.

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use lifecoach_core::{
    parse_score, today_label, DocumentStore, GroupedActivities, HabitService, LifeArea,
    PlannerDocument, PlannerService, PlannerSummary, ScheduleData, TimeSlot, ValueCategory,
    Weekday, WheelEntry, WheelService,
};

const CELL_WIDTH: usize = 14;

#[derive(Subcommand)]
pub enum PlannerAction {
    /// List saved planner titles.
    List,
    /// Print a planner's activities and weekly grid.
    Show { title: String },
    /// Create an empty planner (overwrites an existing one).
    New { title: String },
    /// Add an activity to a category (HLV, HDV, LDV or ZV).
    AddActivity {
        title: String,
        category: ValueCategory,
        name: String,
    },
    /// Delete the activity at a 0-based position in its category.
    DeleteActivity {
        title: String,
        category: ValueCategory,
        index: usize,
    },
    /// Schedule an activity starting at a time slot, e.g. `09:00 Monday`.
    Assign {
        title: String,
        time: TimeSlot,
        day: Weekday,
        category: ValueCategory,
        activity: String,
        /// Number of consecutive hourly slots to fill.
        #[arg(long, default_value_t = 1)]
        hours: usize,
    },
    /// Move a scheduled cell to another slot.
    Move {
        title: String,
        from_time: TimeSlot,
        from_day: Weekday,
        to_time: TimeSlot,
        to_day: Weekday,
    },
    /// Unschedule one cell.
    Clear {
        title: String,
        time: TimeSlot,
        day: Weekday,
    },
    /// Hours per category and productivity score.
    Summary { title: String },
    /// Delete a saved planner.
    Delete { title: String },
}

#[derive(Subcommand)]
pub enum WheelAction {
    /// List dates with a saved assessment.
    List,
    /// Print one assessment.
    Show { date: String },
    /// Save an assessment. Unscored areas are stored as 0.
    Save {
        #[arg(long)]
        first_name: String,
        /// Date label such as `16-Oct-26`; defaults to today.
        #[arg(long)]
        date: Option<String>,
        /// `Area=score`, repeatable (e.g. `--score Body=7.5`).
        #[arg(long = "score", value_name = "AREA=SCORE")]
        scores: Vec<String>,
        /// `Area=goal text`, repeatable.
        #[arg(long = "goal", value_name = "AREA=GOAL")]
        goals: Vec<String>,
    },
    /// Compare two assessments area by area.
    Compare { date: String, other: String },
    /// Total score of the five most recent assessments.
    Progress,
    /// Print the scoring and goal prompts for each area.
    Areas,
}

#[derive(Subcommand)]
pub enum HabitAction {
    /// List habits with their completion state.
    List,
    /// Track a new habit in a life area.
    Add { name: String, area: LifeArea },
    /// Flip a habit between done and not done.
    Toggle { id: String },
    /// Stop tracking a habit.
    Delete { id: String },
}

pub fn run_planner<S: DocumentStore>(store: S, user_id: &str, action: PlannerAction) -> Result<()> {
    let service = PlannerService::new(store, user_id);
    match action {
        PlannerAction::List => {
            for title in service.list_planners()? {
                println!("{title}");
            }
        }
        PlannerAction::Show { title } => {
            let planner = service
                .load_planner(&title)?
                .with_context(|| format!("planner `{title}` not found"))?;
            print_planner(&planner);
        }
        PlannerAction::New { title } => {
            service.save_planner(&PlannerDocument::new(title.trim()))?;
            println!("created planner `{}`", title.trim());
        }
        PlannerAction::AddActivity {
            title,
            category,
            name,
        } => {
            let (_, added) = service.update_planner(&title, |planner| {
                planner
                    .activities
                    .add(category, &name)
                    .map(|activity| activity.name.clone())
            })?;
            println!("added `{added}` to {}", category.code());
        }
        PlannerAction::DeleteActivity {
            title,
            category,
            index,
        } => {
            let (planner, removed) = service
                .edit_planner(&title, |planner| {
                    planner.activities.delete(category, index).map(Some)
                })?
                .context("activity list unchanged")?;
            println!("deleted `{}` from {}", removed.name, category.code());
            let stale = planner
                .weekly_schedule
                .stale_cells(&planner.activities)
                .count();
            if stale > 0 {
                println!("note: {stale} scheduled cell(s) still reference removed activities");
            }
        }
        PlannerAction::Assign {
            title,
            time,
            day,
            category,
            activity,
            hours,
        } => {
            let (_, written) = service.update_planner(&title, |planner| {
                planner.assign_activity(time, day, category, &activity, hours)
            })?;
            println!("scheduled {} slot(s) on {day}", written.len());
        }
        PlannerAction::Move {
            title,
            from_time,
            from_day,
            to_time,
            to_day,
        } => {
            let moved = service.edit_planner(&title, |planner| {
                Ok(planner
                    .weekly_schedule
                    .move_cell((from_time, from_day), (to_time, to_day))
                    .then_some(()))
            })?;
            if moved.is_none() {
                bail!("nothing to move from {from_time} {from_day}");
            }
            println!("moved {from_time} {from_day} -> {to_time} {to_day}");
        }
        PlannerAction::Clear { title, time, day } => {
            let cleared = service.edit_planner(&title, |planner| {
                Ok(planner.weekly_schedule.clear(time, day))
            })?;
            match cleared {
                Some((_, cell)) => println!("cleared `{}` at {time} {day}", cell.activity),
                None => println!("{time} {day} was already empty"),
            }
        }
        PlannerAction::Summary { title } => {
            print_summary(&service.summary(&title)?);
        }
        PlannerAction::Delete { title } => {
            service.delete_planner(&title)?;
            println!("deleted planner `{}`", title.trim());
        }
    }
    Ok(())
}

pub fn run_wheel<S: DocumentStore>(store: S, user_id: &str, action: WheelAction) -> Result<()> {
    let service = WheelService::new(store, user_id);
    match action {
        WheelAction::List => {
            for date in service.list_dates()? {
                println!("{date}");
            }
        }
        WheelAction::Show { date } => {
            let entry = service
                .load_entry(&date)?
                .with_context(|| format!("no data found for `{date}`"))?;
            print_wheel(&entry);
        }
        WheelAction::Save {
            first_name,
            date,
            scores,
            goals,
        } => {
            let mut entry = WheelEntry::new(first_name, date.unwrap_or_else(today_label));
            for pair in &scores {
                let (area, value) = split_area_pair(pair)?;
                entry.set_score(area, parse_score(value));
            }
            for pair in &goals {
                let (area, goal) = split_area_pair(pair)?;
                entry.set_goal(area, goal);
            }
            let stored = service.save_entry(&entry)?;
            println!(
                "saved wheel for {} (total {:.1} / 100)",
                stored.date,
                stored.total_score()
            );
        }
        WheelAction::Compare { date, other } => {
            let comparison = service.compare(&date, &other)?;
            println!(
                "{:<18} {:>8} {:>8} {:>7}",
                "Area", comparison.current_date, comparison.comparison_date, "Delta"
            );
            for row in &comparison.areas {
                println!(
                    "{:<18} {:>8.1} {:>8.1} {:>+7.1}",
                    row.area.name(),
                    row.current,
                    row.comparison,
                    row.delta
                );
            }
            println!(
                "{:<18} {:>8.1} {:>8.1}",
                "Total", comparison.current_total, comparison.comparison_total
            );
        }
        WheelAction::Progress => {
            for point in service.progress()? {
                println!("{:<10} {:>6.1}", point.date, point.total_score);
            }
        }
        WheelAction::Areas => {
            for area in LifeArea::ALL {
                println!("{}\n  score: {}\n  goal:  {}", area, area.score_prompt(), area.goal_prompt());
            }
        }
    }
    Ok(())
}

pub fn run_habit<S: DocumentStore>(store: S, user_id: &str, action: HabitAction) -> Result<()> {
    let service = HabitService::new(store, user_id);
    match action {
        HabitAction::List => {
            for habit in service.list_habits()? {
                let mark = if habit.completed { "x" } else { " " };
                println!("[{mark}] {}  {} ({})", habit.id, habit.name, habit.category);
            }
        }
        HabitAction::Add { name, area } => {
            let habit = service.add_habit(&name, area)?;
            println!("added habit {} `{}`", habit.id, habit.name);
        }
        HabitAction::Toggle { id } => {
            let habit = service.toggle_habit(&id)?;
            let state = if habit.completed { "done" } else { "not done" };
            println!("`{}` marked {state}", habit.name);
        }
        HabitAction::Delete { id } => {
            service.delete_habit(&id)?;
            println!("deleted habit {id}");
        }
    }
    Ok(())
}

fn split_area_pair(pair: &str) -> Result<(LifeArea, &str)> {
    let Some((area, value)) = pair.split_once('=') else {
        bail!("expected AREA=VALUE, got `{pair}`");
    };
    Ok((area.parse()?, value))
}

fn print_planner(planner: &PlannerDocument) {
    println!("{}", planner.title);
    print_activities(&planner.activities);
    println!();
    print_grid(&planner.weekly_schedule);
    println!();
    print_summary(&PlannerSummary::for_planner(planner));
}

/// One column per category, rows prefixed with the index `delete-activity` takes.
fn print_activities(activities: &GroupedActivities) {
    let header: Vec<String> = ValueCategory::ALL
        .iter()
        .map(|category| format!("{:<CELL_WIDTH$}", category.code()))
        .collect();
    println!("{}", header.join(" ").trim_end());

    for row in 0..activities.max_len() {
        let cells: Vec<String> = ValueCategory::ALL
            .iter()
            .map(|category| {
                let text = activities
                    .group(*category)
                    .get(row)
                    .map(|activity| fit(&format!("{row}:{}", activity.name)))
                    .unwrap_or_default();
                format!("{text:<CELL_WIDTH$}")
            })
            .collect();
        println!("{}", cells.join(" ").trim_end());
    }
}

fn print_grid(schedule: &ScheduleData) {
    let mut header = format!("{:<6}", "Time");
    for day in Weekday::ALL {
        header.push_str(&format!(" {:<CELL_WIDTH$}", day.name()));
    }
    println!("{header}");

    for slot in TimeSlot::all() {
        let mut line = format!("{:<6}", slot.to_string());
        for day in Weekday::ALL {
            let text = schedule
                .get(slot, day)
                .map(|cell| fit(&format!("{} {}", cell.category.code(), cell.activity)))
                .unwrap_or_default();
            line.push_str(&format!(" {text:<CELL_WIDTH$}"));
        }
        println!("{}", line.trim_end());
    }
}

fn print_summary(summary: &PlannerSummary) {
    for slice in summary.tally.chart_slices() {
        println!(
            "{:<22} {:>3} ({:>3}%)",
            slice.label, slice.hours, slice.percent
        );
    }
    println!("Total planned hours:    {}", summary.total_hours);
    println!(
        "Most frequent category: {}",
        summary
            .most_frequent
            .map_or("-", |category| category.code())
    );
    println!("Total activities:       {}", summary.total_activities);
    match summary.productivity_score {
        Some(score) => println!("Productivity score:     {score:.2} / 4"),
        None => println!("Productivity score:     - / 4"),
    }
}

fn print_wheel(entry: &WheelEntry) {
    println!("{} - {}", entry.first_name, entry.date);
    for area in LifeArea::ALL {
        let goal = entry.goal(area);
        if goal.is_empty() {
            println!("{:<18} {:>4.1}", area.name(), entry.score(area));
        } else {
            println!("{:<18} {:>4.1}  goal: {goal}", area.name(), entry.score(area));
        }
    }
    println!("{:<18} {:>4.1} / 100", "Total", entry.total_score());
}

fn fit(text: &str) -> String {
    if text.chars().count() <= CELL_WIDTH {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(CELL_WIDTH - 1).collect();
    cut.push('~');
    cut
}

use std::env;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use taskboard::client::HttpTaskGateway;
use taskboard::config::ClientConfig;
use taskboard::logging;
use taskboard::models::{Category, Priority, Status, UnknownVariant};
use taskboard::store::{LoadState, TaskStore};
use taskboard::views::{self, DueFilter, GroupBy, SortKey, TaskFilter};

/// A century either way.
const MAX_MONTH_OFFSET: i32 = 1200;

struct ReportOptions {
    filter: TaskFilter,
    sort: SortKey,
    group_by: GroupBy,
    /// Months away from the current one for the calendar section.
    month_offset: i32,
}

fn option<T>(
    name: &str,
    parse: impl Fn(&str) -> Result<T, UnknownVariant>,
    default: T,
) -> Result<T, String> {
    match env::var(name) {
        Ok(raw) => parse(raw.trim()).map_err(|e| format!("{} {}", name, e)),
        Err(_) => Ok(default),
    }
}

impl ReportOptions {
    fn new_from_env() -> Result<Self, String> {
        Ok(Self {
            filter: TaskFilter {
                category: option("REPORT_CATEGORY", views::parse_selector::<Category>, None)?,
                status: option("REPORT_STATUS", views::parse_selector::<Status>, None)?,
                priority: option("REPORT_PRIORITY", views::parse_selector::<Priority>, None)?,
                due: option("REPORT_DUE", str::parse::<DueFilter>, DueFilter::default())?,
            },
            sort: option("REPORT_SORT", str::parse::<SortKey>, SortKey::default())?,
            group_by: option("REPORT_GROUP", str::parse::<GroupBy>, GroupBy::default())?,
            month_offset: month_offset()?,
        })
    }
}

fn month_offset() -> Result<i32, String> {
    let Ok(raw) = env::var("REPORT_MONTH_OFFSET") else {
        return Ok(0);
    };
    let offset: i32 = raw
        .trim()
        .parse()
        .map_err(|e| format!("REPORT_MONTH_OFFSET {}", e))?;
    if !(-MAX_MONTH_OFFSET..=MAX_MONTH_OFFSET).contains(&offset) {
        return Err(format!(
            "REPORT_MONTH_OFFSET must be between -{0} and {0}",
            MAX_MONTH_OFFSET
        ));
    }
    Ok(offset)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    logging::init("taskboard=info");

    let options = ReportOptions::new_from_env()?;
    let config = ClientConfig::new_from_env();
    info!("loading tasks from {}", config.api_base_url);

    let gateway = Arc::new(HttpTaskGateway::new(config)?);
    let store = TaskStore::connect(gateway).await;
    if let LoadState::Error(message) = store.state() {
        return Err(format!("could not load tasks: {}", message).into());
    }

    let now = Utc::now();
    let stats = views::compute_stats(store.tasks(), now);
    println!("Task Overview");
    println!("  total      {}", stats.total);
    println!("  completed  {}%", stats.completion_rate);
    println!("  overdue    {}", stats.overdue);
    println!("  this week  {}", stats.upcoming);
    for (priority, count) in &stats.by_priority {
        println!("  {:<10} {}", priority, count);
    }
    for (category, count) in &stats.by_category {
        println!("  {:<10} {}", category, count);
    }

    let today = now.date_naive();
    let month = views::shift_month(today, options.month_offset);
    println!("\nCalendar {}", month.format("%B %Y"));
    for day in views::month_grid(store.tasks(), month, today) {
        if !day.in_month || day.tasks.is_empty() {
            continue;
        }
        let marker = if day.is_today { "*" } else { " " };
        let titles: Vec<&str> = day.tasks.iter().map(|t| t.title.as_str()).collect();
        println!("  {}{}  {}", marker, day.date.format("%a %d"), titles.join(", "));
    }

    let groups = views::task_view(
        store.tasks(),
        &options.filter,
        options.sort,
        options.group_by,
        now,
    );
    let visible: usize = groups.iter().map(|g| g.tasks.len()).sum();
    if visible == 0 {
        println!("\nNo tasks found.");
        return Ok(());
    }

    for group in groups {
        println!("\n{}", group.key);
        for task in group.tasks {
            let mark = if task.completed { "x" } else { " " };
            println!(
                "  [{}] {:<50} {:<7} {:<12} due {}",
                mark,
                task.title,
                task.priority,
                task.status,
                task.due_date.format("%Y-%m-%d"),
            );
        }
    }

    Ok(())
}

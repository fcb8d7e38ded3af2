use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use taskboard::models::{Category, Priority, Status, Task};
use taskboard::views::{
    self, DueFilter, GroupBy, SortKey, TaskFilter, compute_stats, filter_tasks, group_tasks,
    month_grid, sort_tasks,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 15, 12, 0, 0).unwrap()
}

fn task(id: &str, due: DateTime<Utc>) -> Task {
    Task {
        id: id.to_string(),
        title: format!("Task {}", id),
        description: "Something that needs doing".to_string(),
        due_date: due,
        priority: Priority::Medium,
        completed: false,
        category: Category::Other,
        tags: Vec::new(),
        reminder_date: None,
        notes: None,
        status: Status::NotStarted,
        created_at: now() - Duration::days(30),
        updated_at: now() - Duration::days(30),
    }
}

fn ids(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|t| t.id.as_str()).collect()
}

fn due_filter(due: DueFilter) -> TaskFilter {
    TaskFilter {
        due,
        ..TaskFilter::default()
    }
}

#[test]
fn test_overdue_excludes_completed_tasks() {
    let mut done = task("done", now() - Duration::days(1));
    done.completed = true;
    let tasks = vec![task("late", now() - Duration::days(1)), done];

    let overdue = filter_tasks(&tasks, &due_filter(DueFilter::Overdue), now());

    assert_eq!(ids(&overdue), vec!["late"]);
}

#[test]
fn test_due_windows() {
    let tasks = vec![
        task("earlier-today", now() - Duration::hours(2)),
        task("tonight", now() + Duration::hours(6)),
        task("in-5-days", now() + Duration::days(5)),
        task("in-7-days", now() + Duration::days(7)),
        task("in-20-days", now() + Duration::days(20)),
        task("in-40-days", now() + Duration::days(40)),
    ];

    let today = filter_tasks(&tasks, &due_filter(DueFilter::Today), now());
    assert_eq!(ids(&today), vec!["earlier-today", "tonight"]);

    let week = filter_tasks(&tasks, &due_filter(DueFilter::Week), now());
    assert_eq!(ids(&week), vec!["tonight", "in-5-days", "in-7-days"]);

    let month = filter_tasks(&tasks, &due_filter(DueFilter::Month), now());
    assert_eq!(
        ids(&month),
        vec!["tonight", "in-5-days", "in-7-days", "in-20-days"]
    );

    let all = filter_tasks(&tasks, &TaskFilter::default(), now());
    assert_eq!(all.len(), tasks.len());
}

#[test]
fn test_filters_compose_with_and() {
    let mut work_high = task("work-high", now() + Duration::days(1));
    work_high.category = Category::Work;
    work_high.priority = Priority::High;
    let mut work_low = task("work-low", now() + Duration::days(1));
    work_low.category = Category::Work;
    work_low.priority = Priority::Low;
    let mut health_high = task("health-high", now() + Duration::days(1));
    health_high.category = Category::Health;
    health_high.priority = Priority::High;
    let tasks = vec![work_high, work_low, health_high];

    let filter = TaskFilter {
        category: Some(Category::Work),
        priority: Some(Priority::High),
        ..TaskFilter::default()
    };

    assert_eq!(ids(&filter_tasks(&tasks, &filter, now())), vec!["work-high"]);

    let on_hold = TaskFilter {
        status: Some(Status::OnHold),
        ..TaskFilter::default()
    };
    assert!(filter_tasks(&tasks, &on_hold, now()).is_empty());
}

#[test]
fn test_sort_by_priority_puts_high_first() {
    let mut tasks: Vec<Task> = [Priority::Low, Priority::High, Priority::Medium]
        .into_iter()
        .enumerate()
        .map(|(i, priority)| {
            let mut t = task(&i.to_string(), now());
            t.priority = priority;
            t
        })
        .collect();

    sort_tasks(&mut tasks, SortKey::Priority);

    let order: Vec<Priority> = tasks.iter().map(|t| t.priority).collect();
    assert_eq!(order, vec![Priority::High, Priority::Medium, Priority::Low]);
}

#[test]
fn test_sort_by_created_at_is_newest_first() {
    let mut older = task("t1", now());
    older.created_at = now() - Duration::days(2);
    let mut newer = task("t2", now());
    newer.created_at = now() - Duration::days(1);
    let mut tasks = vec![older, newer];

    sort_tasks(&mut tasks, SortKey::CreatedAt);

    assert_eq!(ids(&tasks), vec!["t2", "t1"]);
}

#[test]
fn test_sort_by_due_date_status_and_category() {
    let mut a = task("a", now() + Duration::days(3));
    a.status = Status::OnHold;
    a.category = Category::Work;
    let mut b = task("b", now() + Duration::days(1));
    b.status = Status::Completed;
    b.category = Category::Health;
    let mut c = task("c", now() + Duration::days(2));
    c.status = Status::InProgress;
    c.category = Category::Personal;
    let tasks = vec![a, b, c];

    let mut by_due = tasks.clone();
    sort_tasks(&mut by_due, SortKey::DueDate);
    assert_eq!(ids(&by_due), vec!["b", "c", "a"]);

    let mut by_status = tasks.clone();
    sort_tasks(&mut by_status, SortKey::Status);
    assert_eq!(ids(&by_status), vec!["b", "c", "a"]);

    let mut by_category = tasks;
    sort_tasks(&mut by_category, SortKey::Category);
    assert_eq!(ids(&by_category), vec!["b", "c", "a"]);
}

#[test]
fn test_group_by_category_keeps_first_seen_order() {
    let categories = [Category::Work, Category::Personal, Category::Work];
    let tasks: Vec<Task> = categories
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let mut t = task(&format!("task{}", i + 1), now());
            t.category = *category;
            t
        })
        .collect();

    let groups = group_tasks(tasks, GroupBy::Category);

    let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, vec!["work", "personal"]);
    assert_eq!(ids(&groups[0].tasks), vec!["task1", "task3"]);
    assert_eq!(ids(&groups[1].tasks), vec!["task2"]);
}

#[test]
fn test_no_grouping_yields_single_group() {
    let groups = group_tasks(vec![task("a", now()), task("b", now())], GroupBy::None);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].key, "All Tasks");
    assert_eq!(groups[0].tasks.len(), 2);

    let empty = group_tasks(Vec::new(), GroupBy::None);
    assert_eq!(empty.len(), 1);
    assert!(empty[0].tasks.is_empty());
}

#[test]
fn test_task_view_filters_sorts_then_groups() {
    let mut a = task("a", now() + Duration::days(2));
    a.priority = Priority::Low;
    let mut b = task("b", now() + Duration::days(1));
    b.priority = Priority::High;
    let mut c = task("c", now() + Duration::days(30));
    c.priority = Priority::High;

    let groups = views::task_view(
        &[a, b, c],
        &due_filter(DueFilter::Week),
        SortKey::DueDate,
        GroupBy::Priority,
        now(),
    );

    let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, vec!["high", "low"]);
    assert_eq!(ids(&groups[0].tasks), vec!["b"]);
}

#[test]
fn test_priority_stats() {
    let tasks: Vec<Task> = [Priority::High, Priority::High, Priority::Medium, Priority::Low]
        .into_iter()
        .enumerate()
        .map(|(i, priority)| {
            let mut t = task(&i.to_string(), now() + Duration::days(30));
            t.priority = priority;
            t
        })
        .collect();

    let stats = compute_stats(&tasks, now());

    let expected: BTreeMap<Priority, usize> =
        [(Priority::High, 2), (Priority::Medium, 1), (Priority::Low, 1)].into();
    assert_eq!(stats.by_priority, expected);
    let by_category: BTreeMap<Category, usize> = [(Category::Other, 4)].into();
    assert_eq!(stats.by_category, by_category);
    assert_eq!(stats.total, 4);
}

#[test]
fn test_empty_collection_has_zero_completion_rate() {
    let stats = compute_stats(&[], now());
    assert_eq!(stats.total, 0);
    assert_eq!(stats.completion_rate, 0);
    assert!(stats.by_priority.is_empty());
}

#[test]
fn test_completion_overdue_and_upcoming_counts() {
    let mut done_late = task("done-late", now() - Duration::days(3));
    done_late.completed = true;
    let tasks = vec![
        done_late,
        task("late", now() - Duration::days(1)),
        task("soon", now() + Duration::days(2)),
        task("later", now() + Duration::days(10)),
    ];

    let stats = compute_stats(&tasks, now());

    assert_eq!(stats.completion_rate, 25);
    assert_eq!(stats.overdue, 1);
    assert_eq!(stats.upcoming, 1);

    let two_of_three: Vec<Task> = tasks[..3]
        .iter()
        .cloned()
        .map(|mut t| {
            t.completed = t.id != "late";
            t
        })
        .collect();
    assert_eq!(compute_stats(&two_of_three, now()).completion_rate, 67);
}

#[test]
fn test_month_grid_starts_on_sunday() {
    // October 2026 starts on a Thursday.
    let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
    let tasks = vec![task("due-today", now()), task("next-month", now() + Duration::days(20))];

    let grid = month_grid(&tasks, today, today);

    assert_eq!(grid.len(), 42);
    assert_eq!(grid[0].date, NaiveDate::from_ymd_opt(2026, 9, 27).unwrap());
    assert!(!grid[0].in_month);
    assert_eq!(grid[4].date, NaiveDate::from_ymd_opt(2026, 10, 1).unwrap());
    assert!(grid[4].in_month);

    let marked: Vec<_> = grid.iter().filter(|d| d.is_today).collect();
    assert_eq!(marked.len(), 1);
    assert_eq!(marked[0].tasks.len(), 1);
    assert_eq!(marked[0].tasks[0].id, "due-today");

    let nov_4 = grid
        .iter()
        .find(|d| d.date == NaiveDate::from_ymd_opt(2026, 11, 4).unwrap())
        .unwrap();
    assert!(!nov_4.in_month);
    assert_eq!(nov_4.tasks[0].id, "next-month");
}

#[test]
fn test_month_navigation() {
    let day = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
    assert_eq!(
        views::previous_month(day),
        NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
    );
    assert_eq!(
        views::next_month(day),
        NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
    );
}

#[test]
fn test_selectors_parse_wire_values() {
    assert_eq!(views::parse_selector::<Category>("all"), Ok(None));
    assert_eq!(
        views::parse_selector::<Status>("in-progress"),
        Ok(Some(Status::InProgress))
    );
    assert!(views::parse_selector::<Priority>("urgent").is_err());
    assert_eq!("createdAt".parse::<SortKey>(), Ok(SortKey::CreatedAt));
    assert_eq!("overdue".parse::<DueFilter>(), Ok(DueFilter::Overdue));
    assert_eq!("status".parse::<GroupBy>(), Ok(GroupBy::Status));
}

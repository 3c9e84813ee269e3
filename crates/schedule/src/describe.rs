//! Plain-English rendering of an expression, e.g. "At 09:30, only on Monday
//! through Friday".

use cronscope_core::CronField;

use crate::descriptor::ScheduleDescriptor;
use crate::expression::CronExpression;
use crate::matcher::parse_value;

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const WEEKDAYS: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];

/// One comma-separated item of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Item {
    All,
    Value(u32),
    Range(u32, u32),
    Step {
        from: Option<u32>,
        to: Option<u32>,
        every: u32,
    },
}

/// Describe `expr`, or `None` when it does not parse.
pub fn describe(expr: &str) -> Option<String> {
    let expression = CronExpression::parse(expr).ok()?;
    ScheduleDescriptor::from_expression(&expression).ok()?;

    let field_items = |field| items(field, expression.field(field));
    let mut parts = vec![describe_time(
        &field_items(CronField::Minute),
        &field_items(CronField::Hour),
    )];

    let days = field_items(CronField::DayOfMonth);
    if !is_all(&days) {
        parts.push(describe_days_of_month(&days));
    }
    let weekdays = field_items(CronField::DayOfWeek);
    if !is_all(&weekdays) {
        parts.push(format!("only on {}", join_items(CronField::DayOfWeek, &weekdays)));
    }
    let months = field_items(CronField::Month);
    if !is_all(&months) {
        parts.push(format!("only in {}", join_items(CronField::Month, &months)));
    }

    Some(parts.join(", "))
}

fn describe_time(minutes: &[Item], hours: &[Item]) -> String {
    let single_values = |items: &[Item]| -> Option<Vec<u32>> {
        items
            .iter()
            .map(|i| match i {
                Item::Value(v) => Some(*v),
                _ => None,
            })
            .collect()
    };

    if let ([Item::Value(m)], Some(hs)) = (minutes, single_values(hours)) {
        let times: Vec<String> = hs.iter().map(|h| format!("{h:02}:{m:02}")).collect();
        return format!("At {}", join_list(&times));
    }

    let minute_phrase = match minutes {
        _ if is_all(minutes) => "Every minute".to_string(),
        [Item::Step { from: None, to: None, every }] => format!("Every {every} minutes"),
        _ => format!("At minute {}", join_items(CronField::Minute, minutes)),
    };

    let hour_phrase = match hours {
        _ if is_all(hours) => {
            if minute_phrase.starts_with("At minute") {
                " past every hour".to_string()
            } else {
                String::new()
            }
        }
        [Item::Step { from: None, to: None, every }] => format!(", every {every} hours"),
        [Item::Range(a, b)] => format!(", between {a:02}:00 and {b:02}:59"),
        _ => format!(", during hour {}", join_items(CronField::Hour, hours)),
    };

    minute_phrase + &hour_phrase
}

/// "on day 1 and 15 of the month", "every 7 days from day 1 through 15 of the month".
fn describe_days_of_month(items: &[Item]) -> String {
    let field = CronField::DayOfMonth;
    if !items.iter().any(|i| matches!(i, Item::Step { .. })) {
        return format!("on day {} of the month", join_items(field, items));
    }

    let rendered: Vec<String> = items
        .iter()
        .map(|item| match *item {
            Item::Step { from, to, every } => {
                let head = if every == 1 {
                    "every day".to_string()
                } else {
                    format!("every {every} days")
                };
                match (from, to) {
                    (Some(a), Some(b)) => format!("{head} from day {a} through {b}"),
                    (Some(a), None) => format!("{head} starting on day {a}"),
                    _ => head,
                }
            }
            other => format!("on day {}", render_item(field, other)),
        })
        .collect();
    format!("{} of the month", join_list(&rendered))
}

fn is_all(items: &[Item]) -> bool {
    items.iter().any(|i| {
        matches!(
            i,
            Item::All
                | Item::Step {
                    from: None,
                    to: None,
                    every: 1
                }
        )
    })
}

fn items(field: CronField, text: &str) -> Vec<Item> {
    text.split(',').filter_map(|item| parse_item(field, item)).collect()
}

fn parse_item(field: CronField, item: &str) -> Option<Item> {
    let (range, every) = match item.split_once('/') {
        Some((range, step)) => (range, Some(step.parse().ok()?)),
        None => (item, None),
    };
    let bounds = if range == "*" {
        None
    } else if let Some((a, b)) = range.split_once('-') {
        Some((parse_value(field, a)?, Some(parse_value(field, b)?)))
    } else {
        Some((parse_value(field, range)?, None))
    };

    Some(match (bounds, every) {
        (None, None) => Item::All,
        (None, Some(every)) => Item::Step {
            from: None,
            to: None,
            every,
        },
        (Some((a, None)), None) => Item::Value(a),
        (Some((a, Some(b))), None) => Item::Range(a, b),
        (Some((a, b)), Some(every)) => Item::Step {
            from: Some(a),
            to: b,
            every,
        },
    })
}

fn label(field: CronField, value: u32) -> String {
    match field {
        CronField::Hour => format!("{value:02}:00"),
        CronField::Month => MONTHS
            .get(value.saturating_sub(1) as usize)
            .map_or_else(|| value.to_string(), |m| m.to_string()),
        CronField::DayOfWeek => WEEKDAYS[(value % 7) as usize].to_string(),
        _ => value.to_string(),
    }
}

fn unit(field: CronField) -> (&'static str, &'static str) {
    match field {
        CronField::Minute => ("minute", "minutes"),
        CronField::Hour => ("hour", "hours"),
        CronField::DayOfMonth => ("day", "days"),
        CronField::Month => ("month", "months"),
        CronField::DayOfWeek => ("day of the week", "days of the week"),
    }
}

fn render_item(field: CronField, item: Item) -> String {
    match item {
        Item::All => format!("every {}", unit(field).0),
        Item::Value(v) => label(field, v),
        Item::Range(a, b) => format!("{} through {}", label(field, a), label(field, b)),
        Item::Step { from, to, every } => {
            let (one, many) = unit(field);
            let head = if every == 1 {
                format!("every {one}")
            } else {
                format!("every {every} {many}")
            };
            match (from, to) {
                (Some(a), Some(b)) => format!("{head} from {} through {}", label(field, a), label(field, b)),
                (Some(a), None) => format!("{head} starting at {}", label(field, a)),
                _ => head,
            }
        }
    }
}

fn join_items(field: CronField, items: &[Item]) -> String {
    let rendered: Vec<String> = items.iter().map(|i| render_item(field, *i)).collect();
    join_list(&rendered)
}

/// `a`, `a and b`, `a, b and c`.
fn join_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [one] => one.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

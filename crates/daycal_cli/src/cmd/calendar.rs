//! Month, week, day and agenda rendering.

use super::{CliError, CliResult, Context};
use crate::{AgendaArgs, ViewArgs};
use chrono::{Datelike, NaiveDate, Weekday};
use daycal_core::service::calendar_service::{AgendaView, DayCell, MonthView};
use daycal_core::{
    day_label, CalendarNavigator, CalendarServiceError, CalendarTask, CalendarView, LabelLocale,
};

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Renders the configured default view anchored on today.
pub fn run_default(ctx: &Context) -> CliResult<()> {
    let navigator = navigator(ctx, ctx.config.default_view, ctx.today, None, 0)?;
    render(ctx, &navigator)
}

pub fn run_month(ctx: &Context, args: &ViewArgs) -> CliResult<()> {
    run_view(ctx, CalendarView::Month, args)
}

pub fn run_week(ctx: &Context, args: &ViewArgs) -> CliResult<()> {
    run_view(ctx, CalendarView::Week, args)
}

pub fn run_day(ctx: &Context, args: &ViewArgs) -> CliResult<()> {
    run_view(ctx, CalendarView::Day, args)
}

pub fn run_agenda(ctx: &Context, args: &AgendaArgs) -> CliResult<()> {
    let start = args.start.unwrap_or(ctx.today);
    let navigator = navigator(ctx, CalendarView::Agenda, start, args.days, args.offset)?;
    render(ctx, &navigator)
}

fn run_view(ctx: &Context, view: CalendarView, args: &ViewArgs) -> CliResult<()> {
    let reference = args.date.unwrap_or(ctx.today);
    let navigator = navigator(ctx, view, reference, None, args.offset)?;
    render(ctx, &navigator)
}

fn navigator(
    ctx: &Context,
    view: CalendarView,
    reference: NaiveDate,
    days: Option<usize>,
    offset: i32,
) -> CliResult<CalendarNavigator> {
    let days = days.unwrap_or(ctx.config.agenda_days);
    let mut navigator =
        CalendarNavigator::new(view, reference, days).map_err(CalendarServiceError::from)?;
    navigator
        .shift(i64::from(offset))
        .map_err(|err| CliError::InvalidArgument(format!("--offset {offset}: {err}")))?;
    Ok(navigator)
}

fn render(ctx: &Context, navigator: &CalendarNavigator) -> CliResult<()> {
    let service = ctx.calendar();
    let locale = service.locale();
    match navigator.view() {
        CalendarView::Month => {
            let view = service.month_view(&ctx.owner, navigator.anchor(), ctx.today)?;
            print_month(&view, locale);
        }
        CalendarView::Week => {
            let days = service.week_view(&ctx.owner, navigator.anchor(), ctx.today)?;
            print_days(&days, ctx.today, locale);
        }
        CalendarView::Day => {
            let day = service.day_view(&ctx.owner, navigator.anchor(), ctx.today)?;
            print_days(std::slice::from_ref(&day), ctx.today, locale);
        }
        CalendarView::Agenda => {
            let agenda = service.agenda_view(
                &ctx.owner,
                navigator.anchor(),
                navigator.agenda_days(),
                ctx.today,
            )?;
            print_agenda(&agenda);
        }
    }
    Ok(())
}

fn print_month(view: &MonthView, locale: LabelLocale) {
    println!("{}", view.title);
    let header: Vec<String> = WEEKDAYS
        .iter()
        .map(|day| {
            let abbr: String = locale.weekday_name(*day).chars().take(3).collect();
            format!("{abbr:<5}")
        })
        .collect();
    println!("{}", header.concat().trim_end());

    for week in &view.weeks {
        let row: Vec<String> = week.iter().map(month_cell).collect();
        println!("{}", row.concat().trim_end());
    }

    for cell in view.weeks.iter().flatten() {
        if cell.in_month && !cell.tasks.is_empty() {
            println!();
            println!("{}", cell.iso);
            print_tasks(&cell.tasks);
        }
    }
}

// `[dd]` today, `(dd)` outside the month, trailing `*` when the day has tasks.
fn month_cell(cell: &DayCell) -> String {
    let (open, close) = if cell.is_today {
        ('[', ']')
    } else if !cell.in_month {
        ('(', ')')
    } else {
        (' ', ' ')
    };
    let mark = if cell.tasks.is_empty() { ' ' } else { '*' };
    format!("{open}{:>2}{close}{mark}", cell.date.day())
}

fn print_days(days: &[DayCell], today: NaiveDate, locale: LabelLocale) {
    for (index, day) in days.iter().enumerate() {
        if index > 0 {
            println!();
        }
        println!("{} ({})", day_label(day.date, today, locale).text, day.iso);
        print_tasks(&day.tasks);
    }
}

fn print_agenda(agenda: &AgendaView) {
    for (index, section) in agenda.sections.iter().enumerate() {
        if index > 0 {
            println!();
        }
        println!("{} ({})", section.label.text, section.day.iso);
        print_tasks(&section.day.tasks);
    }
}

fn print_tasks(tasks: &[CalendarTask]) {
    if tasks.is_empty() {
        println!("  -");
        return;
    }
    for task in tasks {
        println!("  {}", task_line(task));
    }
}

/// One-line task summary shared by calendar and task listings.
pub(crate) fn task_line(task: &CalendarTask) -> String {
    let check = if task.task.completed { 'x' } else { ' ' };
    format!(
        "[{check}] {} ({}, {}) {}",
        task.task.title, task.category_name, task.color, task.task.id
    )
}

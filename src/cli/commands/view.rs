use std::str::FromStr;

use spendview_core::SummaryService;
use spendview_domain::{
    Category, CategoryFilter, DayRange, DerivedView, FilterState, ParseValueError, SortKey,
    Surface, TimeWindow, UNCATEGORIZED,
};

use super::{short_id, usage_error};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output::{self, Table, TableColumn};
use crate::cli::registry::CommandEntry;

const EMPTY_NOTE: &str = "—";
const TREND_BAR_WIDTH: usize = 30;

pub(crate) fn entries() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "surface",
            "Switch between the dashboard and filters views",
            "surface <dashboard|filters>",
            cmd_surface,
        ),
        CommandEntry::new(
            "window",
            "Select the time window",
            "window <all|today|week|month>",
            cmd_window,
        ),
        CommandEntry::new(
            "range",
            "Select the day range (filters view)",
            "range <all|today|yesterday|last7|last30>",
            cmd_range,
        ),
        CommandEntry::new(
            "category",
            "Show one category only (filters view)",
            "category <name|all>",
            cmd_category,
        ),
        CommandEntry::new(
            "search",
            "Match notes containing text (filters view); no text clears",
            "search [text]",
            cmd_search,
        ),
        CommandEntry::new(
            "sort",
            "Choose the ordering",
            "sort <date_desc|date_asc|amount_desc|amount_asc>",
            cmd_sort,
        ),
        CommandEntry::new(
            "reset",
            "Restore the current view's default selections",
            "reset",
            cmd_reset,
        ),
        CommandEntry::new("show", "List the visible expenses", "show", cmd_show).aliases(&["ls"]),
        CommandEntry::new(
            "summary",
            "Total and per-category subtotals of the visible expenses",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new("trend", "Spending per day of the visible expenses", "trend", cmd_trend),
        CommandEntry::new(
            "categories",
            "Categories available to the category filter",
            "categories",
            cmd_categories,
        ),
    ]
}

fn single_token<T>(args: &[&str], usage: &str) -> Result<T, CommandError>
where
    T: FromStr<Err = ParseValueError>,
{
    let [token] = args else {
        return Err(usage_error(usage));
    };
    token
        .parse()
        .map_err(|err: ParseValueError| CommandError::InvalidArguments(format!("{err}; {usage}")))
}

/// Selections that only the filters surface applies.
fn warn_if_dashboard(context: &ShellContext, what: &str) {
    if context.controller().surface() == Surface::Dashboard {
        output::warning(format!(
            "The dashboard ignores the {}; use `surface filters` to apply it.",
            what
        ));
    }
}

fn cmd_surface(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let surface: Surface = single_token(args, "surface <dashboard|filters>")?;
    let defaults = context.surface_defaults(surface);
    {
        let mut controller = context.controller_mut();
        controller.switch_surface(surface);
        controller.set_filters(defaults);
    }
    output::success(format!("Switched to the {} view.", surface));
    Ok(())
}

fn cmd_window(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let window: TimeWindow = single_token(args, "window <all|today|week|month>")?;
    context
        .controller_mut()
        .update_filters(|filters| filters.time_window = window);
    output::success(format!("Time window: {}.", window.label()));
    Ok(())
}

fn cmd_range(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let range: DayRange = single_token(args, "range <all|today|yesterday|last7|last30>")?;
    context
        .controller_mut()
        .update_filters(|filters| filters.day_range = range);
    warn_if_dashboard(context, "day range");
    output::success(format!("Day range: {}.", range.label()));
    Ok(())
}

/// Known category names are matched case-insensitively; other labels pass through.
fn category_filter(raw: &str) -> CategoryFilter {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("all") {
        return CategoryFilter::All;
    }
    if trimmed.eq_ignore_ascii_case(UNCATEGORIZED) {
        return CategoryFilter::only(UNCATEGORIZED);
    }
    match trimmed.parse::<Category>() {
        Ok(category) => CategoryFilter::only(category.as_str()),
        Err(_) => CategoryFilter::only(trimmed),
    }
}

fn cmd_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(usage_error("category <name|all>"));
    }
    let filter = category_filter(&args.join(" "));
    let label = filter.label().to_string();
    context
        .controller_mut()
        .update_filters(|filters| filters.category = filter);
    warn_if_dashboard(context, "category filter");
    output::success(format!("Category: {}.", label));
    Ok(())
}

fn cmd_search(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let text = args.join(" ");
    let cleared = text.trim().is_empty();
    context
        .controller_mut()
        .update_filters(|filters| filters.search_text = text.clone());
    warn_if_dashboard(context, "note search");
    if cleared {
        output::success("Search cleared.");
    } else {
        output::success(format!("Searching notes for \"{}\".", text));
    }
    Ok(())
}

fn cmd_sort(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let key: SortKey = single_token(args, "sort <date_desc|date_asc|amount_desc|amount_asc>")?;
    context
        .controller_mut()
        .update_filters(|filters| filters.sort_key = key);
    output::success(format!("Sorted by {}.", key.label()));
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(usage_error("reset"));
    }
    let surface = context.controller().surface();
    let defaults = context.surface_defaults(surface);
    context.controller_mut().set_filters(defaults);
    output::success("Selections reset.");
    Ok(())
}

/// Recomputes if needed and returns a copy of the view with its inputs.
fn current_view(context: &ShellContext) -> (Surface, FilterState, DerivedView) {
    let mut controller = context.controller_mut();
    let view = controller.view().clone();
    (controller.surface(), controller.filters().clone(), view)
}

fn describe_selections(surface: Surface, filters: &FilterState) -> String {
    let mut parts = vec![filters.time_window.label().to_string()];
    if surface == Surface::Filters {
        if !filters.category.is_all() {
            parts.push(format!("category {}", filters.category));
        }
        if filters.day_range != DayRange::All {
            parts.push(filters.day_range.label().to_string());
        }
        if !filters.search_text.trim().is_empty() {
            parts.push(format!("notes containing \"{}\"", filters.search_text.trim()));
        }
    }
    parts.push(format!("sorted by {}", filters.sort_key.label()));
    parts.join(", ")
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(usage_error("show"));
    }
    let (surface, filters, view) = current_view(context);
    output::section(format!("Expenses ({})", surface));
    output::info(describe_selections(surface, &filters));

    if view.is_empty() {
        output::info("No expenses match the current selections.");
    } else {
        let mut table = Table::new(vec![
            TableColumn::left("Id"),
            TableColumn::left("Date"),
            TableColumn::left("Category"),
            TableColumn::right("Amount"),
            TableColumn::left("Note").max_width(40),
        ]);
        for record in &view.visible_records {
            let note = match record.note_text().trim() {
                "" => EMPTY_NOTE,
                text => text,
            };
            table.push(vec![
                short_id(&record.id).to_string(),
                record.date.format("%Y-%m-%d").to_string(),
                record.effective_category().to_string(),
                context.config.format_amount(record.effective_amount()),
                note.to_string(),
            ]);
        }
        output::plain(table.render());
    }

    output::info(format!(
        "Showing {} of {} expenses. Total {}.",
        view.visible_count(),
        view.source_count,
        context.config.format_amount(view.total())
    ));
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(usage_error("summary"));
    }
    let (surface, filters, view) = current_view(context);
    output::section(format!("Summary ({})", surface));
    output::info(describe_selections(surface, &filters));
    output::plain(format!("Total: {}", context.config.format_amount(view.total())));

    match SummaryService::top_category(&view.summary) {
        Some(top) => output::plain(format!(
            "Top category: {} ({})",
            top.category,
            context.config.format_amount(top.amount)
        )),
        None => output::info("No spending in this selection."),
    }

    if !view.summary.is_empty() {
        let mut table = Table::new(vec![
            TableColumn::left("Category"),
            TableColumn::right("Amount"),
            TableColumn::right("Share"),
        ]);
        for entry in view.by_category() {
            let share = if view.total() > 0.0 {
                format!("{:.1}%", entry.amount / view.total() * 100.0)
            } else {
                "-".to_string()
            };
            table.push(vec![
                entry.category.clone(),
                context.config.format_amount(entry.amount),
                share,
            ]);
        }
        output::plain(table.render());
    }
    Ok(())
}

fn cmd_trend(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(usage_error("trend"));
    }
    let (surface, _, view) = current_view(context);
    output::section(format!("Daily spending ({})", surface));
    if view.daily.is_empty() {
        output::info("No spending in this selection.");
        return Ok(());
    }

    let peak = view
        .daily
        .iter()
        .map(|day| day.amount)
        .fold(0.0_f64, f64::max);
    for day in &view.daily {
        let bar = if peak > 0.0 {
            ((day.amount / peak) * TREND_BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        output::plain(format!(
            "{}  {:>14}  {}",
            day.day.format("%Y-%m-%d"),
            context.config.format_amount(day.amount),
            "#".repeat(bar)
        ));
    }
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(usage_error("categories"));
    }
    let controller = context.controller();
    let selected = controller.filters().category.clone();
    let options = SummaryService::category_options(controller.records());
    drop(controller);

    output::section("Category filter options");
    for option in options {
        let marker = if option == selected { "*" } else { " " };
        output::plain(format!(" {} {}", marker, option.label()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_names_are_normalized() {
        assert_eq!(category_filter("ALL"), CategoryFilter::All);
        assert_eq!(category_filter("food"), CategoryFilter::only("Food"));
        assert_eq!(category_filter(" uncategorized "), CategoryFilter::only(UNCATEGORIZED));
        assert_eq!(category_filter("Pets"), CategoryFilter::only("Pets"));
    }

    #[test]
    fn selections_are_described_per_surface() {
        let filters = FilterState::default()
            .with_category(CategoryFilter::only("Food"))
            .with_search("  bus ")
            .with_day_range(DayRange::Last7);
        let dashboard = describe_selections(Surface::Dashboard, &filters);
        assert!(!dashboard.contains("Food"));
        let detailed = describe_selections(Surface::Filters, &filters);
        assert!(detailed.contains("category Food"));
        assert!(detailed.contains("\"bus\""));
    }
}

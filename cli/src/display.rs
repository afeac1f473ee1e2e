//! Plain-text rendering for the table output format.

use std::fmt::Write as _;

use anyhow::Result;
use serde::Serialize;
use trendboard_shared::{
    attribution::{attribute, render_plain},
    catalog::SelectOption,
    detail::{description_sections, stat_rows, StatRow},
    grouping::group_trends,
    model::{Trend, TrendStats, WireEnum},
    query::Pagination,
    stats::{category_bars, department_bars, impact_distribution, percent_of_total, Bar},
    table::{cell_text, columns_for, format_score, Column, EMPTY_CELL},
    users::{Role, User},
};

const BAR_WIDTH: usize = 20;

/// Prints `value` as indented JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Left-aligned columns separated by two spaces, with a rule under the
/// header.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = line(headers.to_vec());
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    out.push_str(&line(rule.iter().map(String::as_str).collect()));
    for row in rows {
        out.push('\n');
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    out
}

fn header(column: Column) -> &'static str {
    match column {
        Column::Select => "ID",
        other => other.header(),
    }
}

fn cell(trend: &Trend, column: Column) -> String {
    match column {
        Column::Select => trend.id.to_string(),
        other => cell_text(trend, other),
    }
}

/// The listing as a role-aware table. The admin checkbox column becomes the
/// trend id.
pub fn trend_table(trends: &[Trend], role: Role) -> String {
    if trends.is_empty() {
        return "No trends found".to_string();
    }
    let columns = columns_for(role);
    let headers: Vec<&str> = columns.iter().copied().map(header).collect();
    let rows: Vec<Vec<String>> = trends
        .iter()
        .map(|trend| columns.iter().map(|column| cell(trend, *column)).collect())
        .collect();
    render_table(&headers, &rows)
}

/// The listing as a category, subcategory tree.
pub fn grouped_tree(trends: &[Trend]) -> String {
    if trends.is_empty() {
        return "No trends found".to_string();
    }
    let mut out = String::new();
    for group in group_trends(trends) {
        let _ = writeln!(out, "{} ({})", group.category, group.count());
        for sub in &group.subgroups {
            let _ = writeln!(out, "  {} ({})", sub.name, sub.trends.len());
            for trend in &sub.trends {
                let _ = writeln!(out, "    #{} {}", trend.id, cell_text(trend, Column::Title));
            }
        }
    }
    out.trim_end().to_string()
}

/// `11-20 of 43 items (page 2 of 5)`.
pub fn page_footer(pagination: &Pagination) -> String {
    match pagination.summary() {
        Some(summary) => format!(
            "{summary} (page {} of {})",
            pagination.page(),
            pagination.total_pages()
        ),
        None => "0 items".to_string(),
    }
}

fn bar_line(out: &mut String, bar: &Bar) {
    let filled = (bar.percent / 100.0 * BAR_WIDTH as f64).round() as usize;
    let _ = writeln!(
        out,
        "  {:<24} {:<width$} {:>4} ({:.1}%)",
        bar.label,
        "#".repeat(filled.min(BAR_WIDTH)),
        bar.count,
        bar.percent,
        width = BAR_WIDTH
    );
}

/// Totals, impact distribution, top categories and departments, and the
/// highest-impact trends.
pub fn stats_report(stats: &TrendStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total trends: {}", stats.total_trends);

    let _ = writeln!(out, "\nImpact distribution");
    for (label, count) in impact_distribution(stats) {
        bar_line(
            &mut out,
            &Bar {
                label: label.label().to_string(),
                count,
                percent: percent_of_total(count, stats.total_trends),
            },
        );
    }

    for (title, bars) in [
        ("Top categories", category_bars(stats)),
        ("Top departments", department_bars(stats)),
    ] {
        let _ = writeln!(out, "\n{title}");
        if bars.is_empty() {
            let _ = writeln!(out, "  {EMPTY_CELL}");
        }
        for bar in &bars {
            bar_line(&mut out, bar);
        }
    }

    if !stats.highest_impact.is_empty() {
        let _ = writeln!(out, "\nHighest impact");
        for ranked in &stats.highest_impact {
            let _ = writeln!(
                out,
                "  {:>5}  #{} {} ({})",
                format_score(ranked.impact_score),
                ranked.id,
                ranked.title,
                ranked.category.as_deref().unwrap_or(EMPTY_CELL)
            );
        }
    }
    out.trim_end().to_string()
}

fn section(out: &mut String, heading: &str, body: &str) {
    if body.trim().is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{heading}\n  {}", body.trim());
}

fn list_section(out: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{heading}");
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}

/// Full detail view: metadata, attributed descriptions, statistics, sources
/// and related trends.
pub fn detail_report(trend: &Trend, role: Role, related: &[Trend]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#{} {}", trend.id, trend.title);
    let meta = [
        ("Category", cell_text(trend, Column::Category)),
        ("Subcategory", trend.primary_sub_category().unwrap_or(EMPTY_CELL).to_string()),
        ("Department", cell_text(trend, Column::Department)),
        ("Impact", cell_text(trend, Column::Impact)),
        ("Scope", cell_text(trend, Column::Scope)),
        ("Time horizon", cell_text(trend, Column::TimeHorizon)),
    ];
    for (label, value) in meta {
        let _ = writeln!(out, "  {label:<13} {value}");
    }
    if role.is_admin() {
        let _ = writeln!(out, "  {:<13} {}", "Status", cell_text(trend, Column::Status));
    }

    for description in description_sections(trend, role) {
        let sentences = attribute(description.text, &trend.sources);
        section(&mut out, description.heading, &render_plain(&sentences));
    }
    section(&mut out, "Workplace example", trend.workplace_example.as_deref().unwrap_or_default());
    section(&mut out, "Consequences for work", trend.work_consequences.as_deref().unwrap_or_default());
    list_section(&mut out, "Skills", &trend.skills);
    section(&mut out, "Regional translation", trend.regional_translation.as_deref().unwrap_or_default());
    list_section(&mut out, "Lifelong learning opportunities", &trend.opportunities);

    if let Some(statistics) = &trend.statistics {
        let rows: Vec<String> = stat_rows(statistics)
            .into_iter()
            .map(|row| match row {
                StatRow::Entry {
                    label,
                    value,
                } => format!("{label}: {value}"),
                StatRow::Figure {
                    figure,
                    provenance: Some(provenance),
                } => format!("{figure} ({provenance})"),
                StatRow::Figure {
                    figure, ..
                } => figure,
                StatRow::Text(text) => text,
            })
            .collect();
        list_section(&mut out, "Statistics", &rows);
    }

    let sources: Vec<String> = trend
        .sources
        .iter()
        .map(|source| match source.link() {
            Some(link) if link != source.citation() => format!("{} <{link}>", source.citation()),
            _ => source.citation(),
        })
        .collect();
    list_section(&mut out, "Sources", &sources);

    let related: Vec<String> = related
        .iter()
        .map(|other| format!("#{} {} ({})", other.id, other.title, other.impact().label()))
        .collect();
    list_section(&mut out, "Related trends", &related);
    out.trim_end().to_string()
}

/// One option per line.
pub fn option_list(options: &[SelectOption]) -> String {
    if options.is_empty() {
        return trendboard_shared::multi_select::NO_OPTIONS.to_string();
    }
    options
        .iter()
        .map(|option| option.label.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Account table.
pub fn users_table(users: &[User]) -> String {
    if users.is_empty() {
        return "No users found".to_string();
    }
    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|user| {
            vec![
                user.id.clone(),
                user.display_name(),
                user.email.clone(),
                user.user_type.label().to_string(),
                if user.is_active { "Active" } else { "Inactive" }.to_string(),
                user.created_date().unwrap_or(EMPTY_CELL).to_string(),
            ]
        })
        .collect();
    render_table(&["ID", "Name", "Email", "Type", "Status", "Created"], &rows)
}

//! UI rendering.

use crate::state::{App, Focus, Overlay, PickerState, PromptState, View, format_weight};
use chrono::Local;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{
        Block, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap,
    },
};
use spotter_core::{ActiveWorkout, Alert, ExerciseSet, WorkoutSummary};

const TEMPLATE_HINTS: &[&str] = &[
    "↑/↓: select • Enter: start • n: empty workout • c: new template • e: edit • d: delete • q: quit",
];
const WORKOUT_HINTS: &[&str] = &[
    "↑/↓: exercise • ←/→: set • Tab: weight/reps • digits: edit • Space: done • s/d: add/delete set • X: delete exercise",
    "t: type • +/-: rest • [/]: default rest • u: unit • r: rename • a: add • T: save template • f: finish • x: cancel",
];

pub fn render(app: &App, frame: &mut Frame) {
    let [header, main, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(5),
    ])
    .areas(frame.area());

    render_header(frame, header, app);
    match app.view() {
        View::Templates => render_templates(frame, main, app),
        View::Workout => render_workout(frame, main, app),
    }
    render_status(frame, status, app);

    match &app.overlay {
        Some(Overlay::Picker(picker)) => render_picker(frame, app, picker),
        Some(Overlay::Prompt(prompt)) => render_prompt(frame, prompt),
        None => {}
    }
    if let Some(alert) = app.alert() {
        render_alert(frame, alert, app.store().alerts().len());
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let store = app.store();
    let line = match app.view() {
        View::Templates => Line::from(vec![
            Span::styled("Templates", Style::default().bold()),
            Span::raw(format!(" • {} saved", store.templates().len())),
        ]),
        View::Workout => {
            let workout = store.workout();
            let elapsed = store.elapsed().map(|d| d.num_seconds()).unwrap_or(0);
            Line::from(vec![
                Span::styled(workout.name.clone(), Style::default().bold().green()),
                Span::raw(format!(
                    " • {:02}:{:02}:{:02}",
                    elapsed / 3600,
                    elapsed / 60 % 60,
                    elapsed % 60
                )),
                Span::raw(format!(" • {}", workout.weight_unit.label())),
                Span::raw(format!(" • rest {}s", workout.default_rest_time)),
            ])
        }
    };

    let block = Block::bordered()
        .title("Spotter")
        .title_alignment(Alignment::Center);
    frame.render_widget(
        Paragraph::new(line).alignment(Alignment::Center).block(block),
        area,
    );
}

fn render_templates(frame: &mut Frame, area: Rect, app: &App) {
    let store = app.store();
    let (list_area, summary_area) = match &app.last_summary {
        Some(_) => {
            let [list, summary] =
                Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                    .areas(area);
            (list, Some(summary))
        }
        None => (area, None),
    };

    if store.templates().is_empty() {
        frame.render_widget(
            Paragraph::new(
                "No templates yet. Press c to create one or n to start an empty workout.",
            )
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title("Templates")),
            list_area,
        );
    } else {
        let items: Vec<ListItem> = store
            .templates()
            .iter()
            .map(|t| {
                let last_used = t.last_used.with_timezone(&Local).format("%Y-%m-%d");
                let mut lines = vec![Line::from(vec![
                    Span::styled(t.name.clone(), Style::default().bold()),
                    Span::raw(format!(
                        " • {} exercises • last used {last_used}",
                        t.exercises.len()
                    )),
                ])];
                if let Some(desc) = &t.description {
                    lines.push(Line::from(desc.clone()).dim());
                }
                let names: Vec<&str> = t.exercises.iter().map(|e| e.name.as_str()).collect();
                lines.push(Line::from(names.join(", ")).dim());
                ListItem::new(lines)
            })
            .collect();

        let list = List::new(items)
            .block(Block::bordered().title("Templates"))
            .highlight_style(Style::default().yellow())
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(app.template_cursor));
        frame.render_stateful_widget(list, list_area, &mut state);
    }

    if let (Some(summary), Some(area)) = (&app.last_summary, summary_area) {
        render_summary(frame, area, summary);
    }
}

fn render_summary(frame: &mut Frame, area: Rect, summary: &WorkoutSummary) {
    let unit = summary.weight_unit.label();
    let mut lines = vec![
        Line::from(Span::styled(summary.name.clone(), Style::default().bold())),
        Line::from(format!(
            "{} min • {}/{} sets • {:.1} {unit}",
            summary.duration_secs / 60,
            summary.completed_sets,
            summary.total_sets,
            summary.total_volume
        )),
        Line::from(""),
    ];
    for ex in &summary.exercises {
        let best = ex
            .best_one_rm
            .map(|rm| format!(" • 1RM ~{rm:.1}"))
            .unwrap_or_default();
        lines.push(Line::from(format!(
            "{}: {}/{} sets • {:.1} {unit}{best}",
            ex.name, ex.completed_sets, ex.total_sets, ex.volume
        )));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title("Last workout")),
        area,
    );
}

fn render_workout(frame: &mut Frame, area: Rect, app: &App) {
    let workout = app.store().workout();
    if workout.exercises.is_empty() {
        frame.render_widget(
            Paragraph::new("No exercises. Press a to add some.")
                .block(Block::bordered().title("Exercises")),
            area,
        );
        return;
    }

    let unit = workout.weight_unit.label();
    let mut rows = Vec::new();
    let mut selected_row = 0;

    for (i, ex) in workout.exercises.iter().enumerate() {
        let selected = i == app.exercise_cursor;
        rows.push(exercise_row(workout, i, selected));
        for (j, set) in ex.sets.iter().enumerate() {
            let cursor = selected && j == app.set_cursor;
            if cursor {
                selected_row = rows.len();
            }
            rows.push(set_row(app, i, j, set, cursor, unit));
        }
    }

    let widths = [
        Constraint::Min(28),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(5),
    ];
    let header =
        Row::new(["Set", "Type", "Weight", "Reps", "Rest", "Done"]).style(Style::default().dim());
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(Block::bordered().title(format!("Exercises ({})", workout.exercises.len())));

    let mut state = TableState::default().with_selected(Some(selected_row));
    frame.render_stateful_widget(table, area, &mut state);
}

fn exercise_row(workout: &ActiveWorkout, idx: usize, selected: bool) -> Row<'static> {
    let ex = &workout.exercises[idx];
    let mut title = format!("{}. {}", idx + 1, ex.exercise.name);
    if let Some(group) = ex.super_set_group {
        // Position within the superset, e.g. [SS3 2/2]
        let members = workout.superset_members(group);
        let pos = members.iter().position(|&m| m == idx).map_or(0, |p| p + 1);
        title.push_str(&format!(" [SS{} {pos}/{}]", group.0, members.len()));
    }
    let style = if selected {
        Style::default().bold().cyan()
    } else {
        Style::default().bold()
    };
    let progress = format!("{}/{}", ex.completed_sets(), ex.sets.len());
    Row::new([title, String::new(), String::new(), String::new(), String::new(), progress])
        .style(style)
}

fn set_row(
    app: &App,
    exercise: usize,
    idx: usize,
    set: &ExerciseSet,
    cursor: bool,
    unit: &str,
) -> Row<'static> {
    let number = set
        .set_type
        .tag()
        .map(String::from)
        .unwrap_or_else(|| (idx + 1).to_string());

    let weight = app
        .edit_text(exercise, idx, Focus::Weight)
        .map(str::to_string)
        .unwrap_or_else(|| format_weight(set.weight));
    let reps = app
        .edit_text(exercise, idx, Focus::Reps)
        .map(str::to_string)
        .unwrap_or_else(|| match set.reps {
            0 => String::new(),
            reps => reps.to_string(),
        });

    let field_style = |focus: Focus| {
        if cursor && app.focus == focus {
            Style::default().yellow().bold()
        } else {
            Style::default()
        }
    };
    let blank = |s: String| if s.is_empty() { "__".to_string() } else { s };

    let row = Row::new([
        Cell::from(format!("  {number}")),
        Cell::from(set.set_type.label()),
        Cell::from(format!("{} {unit}", blank(weight))).style(field_style(Focus::Weight)),
        Cell::from(blank(reps)).style(field_style(Focus::Reps)),
        Cell::from(format!("{}s", set.rest_time)),
        Cell::from(if set.completed { "✓" } else { "" }),
    ]);

    if set.completed {
        row.style(Style::default().green())
    } else {
        row
    }
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let hints = match app.view() {
        View::Templates => TEMPLATE_HINTS,
        View::Workout => WORKOUT_HINTS,
    };
    let mut lines = vec![Line::from(app.status.clone())];
    lines.extend(hints.iter().map(|h| Line::from(*h).dim()));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title("Status")),
        area,
    );
}

fn render_picker(frame: &mut Frame, app: &App, picker: &PickerState) {
    let area = popup_area(frame.area(), 60, 20);
    frame.render_widget(Clear, area);

    let [query_area, list_area, hint_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(format!("{}_", picker.query)).block(Block::bordered().title("Search")),
        query_area,
    );

    let results = app.picker_results();
    let items: Vec<ListItem> = results
        .iter()
        .map(|e| {
            let mark = match picker.marked.iter().position(|m| *m == e.id) {
                Some(pos) => format!("[{}]", pos + 1),
                None => "[ ]".into(),
            };
            let equipment = e
                .equipment
                .as_deref()
                .map(|eq| format!(" • {eq}"))
                .unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::raw(format!("{mark} ")),
                Span::styled(e.name.clone(), Style::default().bold()),
                Span::raw(format!(" • {}{equipment}", e.category)).dim(),
            ]))
        })
        .collect();

    let title = if results.is_empty() {
        "No matches".to_string()
    } else {
        format!("Exercises ({} marked)", picker.marked.len())
    };
    let list = List::new(items)
        .block(Block::bordered().title(title))
        .highlight_style(Style::default().yellow());
    let mut state = ListState::default().with_selected(Some(picker.cursor));
    frame.render_stateful_widget(list, list_area, &mut state);

    frame.render_widget(
        Paragraph::new("Tab: mark • Enter: add • Esc: close").dim(),
        hint_area,
    );
}

fn render_prompt(frame: &mut Frame, prompt: &PromptState) {
    let area = popup_area(frame.area(), 50, 3);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(format!("{}_", prompt.input))
            .block(Block::bordered().title(prompt.title()).title_bottom("Enter: ok • Esc: cancel")),
        area,
    );
}

fn render_alert(frame: &mut Frame, alert: &Alert, queued: usize) {
    let area = popup_area(frame.area(), 50, 7);
    frame.render_widget(Clear, area);

    let color = if alert.is_destructive() {
        Color::Red
    } else {
        Color::Cyan
    };
    let buttons = match alert.action() {
        Some(_) if alert.is_destructive() => "y: yes, discard • n: no",
        Some(_) => "y: yes • n: no",
        None => "Enter: OK",
    };
    let mut title = alert.title.clone();
    if queued > 1 {
        title.push_str(&format!(" (+{})", queued - 1));
    }

    let body = vec![
        Line::from(alert.message.clone()),
        Line::from(""),
        Line::from(buttons).dim(),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title(title).border_style(Style::default().fg(color))),
        area,
    );
}

fn popup_area(area: Rect, percent_x: u16, height: u16) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Percentage(percent_x),
        Constraint::Fill(1),
    ])
    .areas(middle);
    center
}

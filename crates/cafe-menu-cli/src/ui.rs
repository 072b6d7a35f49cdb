use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::{App, Screen};
use crate::theme::Theme;
use crate::view::{Affordance, MenuRow, MenuView};

pub fn render(frame: &mut Frame, app: &App) {
    let theme = Theme::default();
    let view = MenuView::project(app);

    render_menu_screen(frame, app, &view, &theme);

    match &app.screen {
        Screen::Browse | Screen::Compose => {}
        Screen::Rename { input, .. } => render_rename_prompt(frame, input, &theme),
        Screen::ConfirmRemove(id) => {
            let name = view
                .rows
                .iter()
                .find(|r| &r.id == id)
                .map(|r| r.name.as_str())
                .unwrap_or("?");
            render_confirm_remove(frame, name, &theme);
        }
        Screen::Message(msg, is_error) => render_message(frame, msg, *is_error, &theme),
    }
}

fn render_menu_screen(frame: &mut Frame, app: &App, view: &MenuView, theme: &Theme) {
    let area = frame.area();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(" ☕ Cafe Menu ")
        .title_style(theme.title);

    frame.render_widget(block, area);

    let inner = Layout::default()
        .constraints([
            Constraint::Length(1), // Category tabs
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Header + count
            Constraint::Min(3),    // List
            Constraint::Length(3), // Name form
            Constraint::Length(1), // Footer
        ])
        .split(inner_rect(area, 1));

    // Category navigation
    let titles: Vec<Line> = view
        .tabs
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.category.label())))
        .collect();
    let selected_tab = view.tabs.iter().position(|t| t.active).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected_tab)
        .style(theme.muted)
        .highlight_style(theme.tab_active)
        .divider("|");
    frame.render_widget(tabs, inner[0]);

    let heading = Paragraph::new(Line::from(vec![
        Span::styled(view.header.as_str(), theme.title),
        Span::raw("  "),
        Span::styled(view.count.as_str(), theme.muted),
    ]));
    frame.render_widget(heading, inner[2]);

    if view.rows.is_empty() {
        let msg = if app.is_loading {
            "Loading..."
        } else if app.last_error.is_some() {
            "Error loading menu"
        } else {
            "(No menu items)"
        };
        let p = Paragraph::new(msg)
            .style(theme.muted)
            .alignment(Alignment::Center);
        frame.render_widget(p, inner[3]);
    } else {
        let items: Vec<ListItem> = view.rows.iter().map(|row| menu_row_item(row, theme)).collect();
        frame.render_widget(List::new(items), inner[3]);
    }

    render_name_form(frame, app, inner[4], theme);

    let footer = match app.screen {
        Screen::Compose => Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", theme.key_hint),
            Span::styled("Add", theme.muted),
            Span::raw("  "),
            Span::styled(" Esc ", theme.key_hint),
            Span::styled("Leave field", theme.muted),
        ])),
        _ => Paragraph::new(Line::from(vec![
            Span::styled(" ↑/↓ ", theme.key_hint),
            Span::styled("Navigate", theme.muted),
            Span::raw("  "),
            Span::styled(" ←/→ 1-5 ", theme.key_hint),
            Span::styled("Category", theme.muted),
            Span::raw("  "),
            Span::styled(" a ", theme.key_hint),
            Span::styled("New", theme.muted),
            Span::raw("  "),
            Span::styled(" Enter ", theme.key_hint),
            Span::styled("Submit", theme.muted),
            Span::raw("  "),
            Span::styled(" r ", theme.key_hint),
            Span::styled("Reload", theme.muted),
            Span::raw("  "),
            Span::styled(" q ", theme.key_hint),
            Span::styled("Quit", theme.muted),
        ])),
    }
    .alignment(Alignment::Center);

    frame.render_widget(footer, inner[5]);
}

fn menu_row_item<'a>(row: &'a MenuRow, theme: &Theme) -> ListItem<'a> {
    let prefix = if row.selected { "▸ " } else { "  " };
    let name_style = if row.sold_out {
        theme.sold_out
    } else if row.selected {
        theme.selected
    } else {
        theme.normal
    };

    let mut spans = vec![Span::raw(prefix), Span::styled(row.name.as_str(), name_style)];
    if row.sold_out {
        spans.push(Span::styled(" [SOLD OUT]", theme.danger));
    }
    if row.selected {
        spans.push(Span::raw("   "));
        for affordance in Affordance::ALL {
            spans.push(Span::styled(format!(" {} ", affordance.key()), theme.key_hint));
            spans.push(Span::styled(affordance.label(), theme.muted));
        }
    }

    ListItem::new(Line::from(spans))
}

fn render_name_form(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let focused = app.screen == Screen::Compose;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused { theme.title } else { theme.border })
        .title(" New menu name ");

    let text = if focused {
        format!("{}_", app.name_input)
    } else if app.name_input.is_empty() {
        "press a to type".to_string()
    } else {
        app.name_input.clone()
    };
    let style = if focused || !app.name_input.is_empty() {
        theme.input
    } else {
        theme.muted
    };

    frame.render_widget(Paragraph::new(text).style(style).block(block), area);
}

fn render_rename_prompt(frame: &mut Frame, input: &str, theme: &Theme) {
    let area = center_rect(frame.area(), 60, 7);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.title)
        .title(" ✏️  Rename Menu ")
        .title_style(theme.title);

    frame.render_widget(block, area);

    let inner = inner_rect(area, 1);

    let text = Paragraph::new(vec![
        Line::raw(""),
        Line::from(Span::styled(format!("{}_", input), theme.input)),
        Line::raw(""),
        Line::from(vec![
            Span::styled(" Enter ", theme.key_hint),
            Span::styled("Save", theme.muted),
            Span::raw("    "),
            Span::styled(" Esc ", theme.key_hint),
            Span::styled("Cancel", theme.muted),
        ]),
    ])
    .alignment(Alignment::Center);

    frame.render_widget(text, inner);
}

fn render_confirm_remove(frame: &mut Frame, name: &str, theme: &Theme) {
    let area = center_rect(frame.area(), 50, 8);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.danger)
        .title(" ⚠️  Confirm Remove ")
        .title_style(theme.danger);

    frame.render_widget(block, area);

    let inner = inner_rect(area, 2);

    let display_name = if name.chars().count() > 40 {
        format!("{}...", name.chars().take(37).collect::<String>())
    } else {
        name.to_string()
    };

    let text = Paragraph::new(vec![
        Line::raw(""),
        Line::from(vec![
            Span::raw("Remove "),
            Span::styled(display_name, theme.title),
            Span::raw("?"),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled(" [Y] ", theme.key_hint),
            Span::styled("Yes, Remove", theme.danger),
            Span::raw("    "),
            Span::styled(" [N] ", theme.key_hint),
            Span::raw("Cancel"),
        ]),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    frame.render_widget(text, inner);
}

fn render_message(frame: &mut Frame, msg: &str, is_error: bool, theme: &Theme) {
    let area = center_rect(frame.area(), 50, 7);

    frame.render_widget(Clear, area);

    let style = if is_error {
        theme.danger
    } else {
        theme.success
    };
    let title = if is_error {
        " ❌ Error "
    } else {
        " ✅ Done "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
        .title_style(style);

    frame.render_widget(block, area);

    let inner = inner_rect(area, 1);

    let text = Paragraph::new(vec![
        Line::raw(""),
        Line::raw(msg),
        Line::raw(""),
        Line::from(Span::styled("Press any key to continue", theme.muted)),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    frame.render_widget(text, inner);
}

// Helper: shrink rect by margin
fn inner_rect(area: Rect, margin: u16) -> Rect {
    Rect {
        x: area.x + margin,
        y: area.y + margin,
        width: area.width.saturating_sub(margin * 2),
        height: area.height.saturating_sub(margin * 2),
    }
}

// Helper: center a popup
fn center_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    // Widen before multiplying: u16 overflows past ~655 columns at 100%
    let width = (u32::from(area.width) * u32::from(percent_x.min(100)) / 100) as u16;
    let height = height.min(area.height);
    let x = area.width.saturating_sub(width) / 2;
    let y = area.height.saturating_sub(height) / 2;
    Rect {
        x: area.x + x,
        y: area.y + y,
        width,
        height,
    }
}

//! Main rendering module
//!
//! Handles rendering the complete UI including:
//! - Header with tab bar
//! - Active tab content
//! - Popups and overlays
//! - Status bar

use crate::app::{App, PopupState};
use crate::types::{today, FeedingPlan, Tab};
use crate::ui::{card, grid::CardGrid, widgets};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Tabs,
    },
    Frame,
};

/// Main render function - entry point for all UI rendering
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main layout: header, content, status bar
    let layout = Layout::vertical([
        Constraint::Length(3), // Header + tabs
        Constraint::Min(8),    // Content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_header(frame, app, layout[0]);
    render_tab_content(frame, app, layout[1]);
    render_status_bar(frame, app, layout[2]);
    render_popups(frame, app, area);
}

/// Render header with title and tab bar
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let header_block = Block::default()
        .style(theme.block_style())
        .title(" 🐾 PetTrackr ")
        .title_style(theme.title())
        .borders(Borders::BOTTOM)
        .border_style(theme.border());

    frame.render_widget(header_block, area);

    let tab_titles: Vec<Line> = Tab::all()
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let style = if app.active_tab == *tab {
                theme.tab_active()
            } else {
                theme.tab_inactive()
            };
            Line::styled(format!("[{}] {}", i + 1, tab.label()), style)
        })
        .collect();

    let tabs = Tabs::new(tab_titles)
        .select(app.active_tab.index())
        .divider(" │ ")
        .style(theme.text());

    let tabs_area = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: 1,
    };
    frame.render_widget(tabs, tabs_area);
}

/// Render the active tab's content
fn render_tab_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.active_tab {
        Tab::Pets => render_pets_tab(frame, app, area),
        Tab::Profile => render_profile_tab(frame, app, area),
        Tab::Settings => render_settings_tab(frame, app, area),
    }
}

/// Render status bar with keybindings
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.active_tab {
        Tab::Pets => "[hjkl] Move  [Enter] Profile  [a] Add Pet  [r] Random Pet  [u] Reload  [q] Quit",
        Tab::Profile => "[v] Vet Visit  [x] Vaccination  [f] Feeding Log  [j/k] Scroll  [Esc] Back  [q] Quit",
        Tab::Settings => "[j/k] Navigate  [Enter] Change  [q] Quit",
    };

    let right = match (app.active_tab, &app.profile) {
        (Tab::Profile, Some(profile)) => format!(
            "{} · {} feeding log(s)",
            profile.entry.pet.name,
            profile.feeding_logs.len()
        ),
        _ => format!("{} pets", app.pets.len()),
    };

    widgets::render_status_bar(frame, hints, &right, &app.theme, area);
}

/// Render popups if active
fn render_popups(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    match &app.popup {
        PopupState::None => {}
        PopupState::Form(form) => widgets::render_form_popup(frame, form, theme, area),
        PopupState::Error { title, message } => {
            widgets::render_error_popup(frame, title, message, theme, area);
        }
    }

    if let Some((msg, is_error, _)) = &app.flash_message {
        widgets::render_flash_message(frame, msg, *is_error, theme, area);
    }
}

// === TAB RENDERERS ===

/// Pets tab: a scrollable grid of pet cards
fn render_pets_tab(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" All Pets ({}) ", app.pets.len()))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let grid = CardGrid::new(inner, app.config.grid_columns);
    app.grid.set(grid);

    if app.pets.is_empty() {
        let empty_msg = Paragraph::new("No pets yet. Press [a] to add one or [r] for a random pet.")
            .style(theme.text_dim())
            .alignment(Alignment::Center);
        frame.render_widget(empty_msg, inner);
        return;
    }

    let count = app.pets.len();
    let columns = grid.columns as usize;
    let scroll = app.grid_scroll.min(grid.max_scroll(count));
    let today = today();

    for row in 0..grid.visible_rows() {
        for col in 0..columns {
            let idx = (scroll + row) * columns + col;
            let Some(entry) = app.pets.get(idx) else {
                break;
            };
            let lines = card::card_lines(
                &entry.pet,
                entry.owner.as_ref(),
                entry.has_image,
                today,
                theme,
            );
            card::render_pet_card(
                frame,
                lines,
                idx == app.grid_cursor,
                theme,
                grid.card_rect(row, col),
            );
        }
    }

    if grid.total_rows(count) > grid.visible_rows() {
        let mut state = ScrollbarState::new(grid.max_scroll(count) + 1).position(scroll);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None)
            .style(theme.border_focused());
        frame.render_stateful_widget(scrollbar, inner, &mut state);
    }
}

/// Profile tab: the selected pet with its records and invoice
fn render_profile_tab(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let Some(profile) = &app.profile else {
        let block = Block::default()
            .style(theme.block_style())
            .title(" Profile ")
            .title_style(theme.title())
            .borders(Borders::ALL)
            .border_style(theme.border());
        let msg = Paragraph::new("No pet selected")
            .style(theme.text_dim())
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(msg, area);
        return;
    };

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" Profile · {} ", profile.entry.pet.name))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let lines = card::profile_lines(
        &profile.entry.pet,
        profile.entry.owner.as_ref(),
        profile.entry.has_image,
        &profile.records(),
        &app.config.fees,
        theme,
    );

    let inner = block.inner(area);
    frame.render_widget(block, area);
    app.profile_area.set(inner);

    let scroll = profile.scroll.min(app.profile_max_scroll());
    let paragraph = card::profile_paragraph(lines)
        .style(theme.text())
        .scroll((scroll, 0));
    frame.render_widget(paragraph, inner);
}

/// Settings tab: theme, grid width and read-only paths and fees
fn render_settings_tab(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .style(theme.block_style())
        .title(" Settings ")
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = app.config.grid_columns.to_string();
    let settings = [
        ("Theme", app.config.theme.as_str()),
        ("Grid Columns", columns.as_str()),
    ];

    let mut items: Vec<ListItem> = settings
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let style = if i == app.settings_selected {
                theme.selected()
            } else {
                theme.text()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<24}", label), style),
                Span::styled(format!("[{}]", value), Style::default().fg(theme.accent)),
            ]))
        })
        .collect();

    let fees = &app.config.fees;
    items.push(ListItem::new(""));
    items.push(ListItem::new(Line::styled("Feeding Fees", theme.title())));
    items.push(ListItem::new(Line::styled(
        format!("  {:<22}{} per day", "Base", fees.money(fees.base_per_day)),
        theme.text(),
    )));
    for plan in FeedingPlan::all().iter().filter(|p| **p != FeedingPlan::None) {
        items.push(ListItem::new(Line::styled(
            format!("  {:<22}+{} per day", plan.label(), fees.money(fees.addon(*plan))),
            theme.text(),
        )));
    }

    frame.render_widget(List::new(items), inner);

    let config_path = app
        .config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "not saved".into());

    let paths = Paragraph::new(vec![
        Line::raw(format!("Data:   {}", app.data_dir().display())),
        Line::raw(format!("Config: {}", config_path)),
    ])
    .style(theme.text_dim());

    let path_area = Rect {
        x: inner.x,
        y: inner.y + inner.height.saturating_sub(3),
        width: inner.width,
        height: 2.min(inner.height),
    };
    frame.render_widget(paths, path_area);
}

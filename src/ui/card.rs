//! Pet cards
//!
//! A card summarizes one pet. The profile view extends the same lines
//! with the pet's care records and feeding invoice.

use crate::billing::{FeeSchedule, Invoice};
use crate::types::{today, Owner, Pet, Vaccination, VetVisit};
use crate::ui::Theme;
use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Summary lines for a pet card
pub fn card_lines(
    pet: &Pet,
    owner: Option<&Owner>,
    has_image: bool,
    today: NaiveDate,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::raw("🐾 "),
            Span::styled(pet.name.clone(), theme.card_title()),
        ]),
        Line::raw(format!("🐶 {}", pet.breed_or_unknown())),
        Line::raw(format!("📅 {}", pet.birthdate)),
        Line::raw(format!("🕒 {}", pet.age_on(today))),
    ];

    if let Some(owner) = owner {
        lines.push(Line::from(vec![
            Span::raw("👤 "),
            Span::styled(
                format!("{} ({})", owner.name, owner.contact_number),
                theme.owner(),
            ),
        ]));
    }

    let image = match (&pet.image_path, has_image) {
        (Some(path), true) => Line::raw(format!("🖼 {}", path)),
        _ => Line::styled("🖼 no image", theme.text_dim()),
    };
    lines.push(image);

    lines
}

/// Draw a bordered card
pub fn render_pet_card(
    frame: &mut Frame,
    lines: Vec<Line<'static>>,
    selected: bool,
    theme: &Theme,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.card_border(selected))
        .style(theme.block_style());

    let card = Paragraph::new(lines).block(block).style(theme.text());
    frame.render_widget(card, area);
}

/// Everything shown on a pet's profile
pub struct ProfileRecords<'a> {
    pub vaccinations: &'a [Vaccination],
    pub vet_visits: &'a [VetVisit],
    pub invoice: Result<&'a Invoice, String>,
}

/// Card lines followed by the records sections
pub fn profile_lines(
    pet: &Pet,
    owner: Option<&Owner>,
    has_image: bool,
    records: &ProfileRecords<'_>,
    fees: &FeeSchedule,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let today = today();
    let mut lines = card_lines(pet, owner, has_image, today, theme);

    if let Some(owner) = owner.filter(|o| !o.address.is_empty()) {
        lines.push(Line::styled(format!("🏠 {}", owner.address), theme.text_dim()));
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled("Vaccinations:", theme.title()));
    if records.vaccinations.is_empty() {
        lines.push(Line::styled("  No vaccinations.", theme.text_dim()));
    }
    for v in records.vaccinations {
        let mut spans = vec![Span::raw(format!("  • {}", v))];
        if !v.category.is_empty() {
            spans.push(Span::styled(format!(" [{}]", v.category), theme.text_dim()));
        }
        if v.is_due_on(today) {
            spans.push(Span::styled(" ⚠ due", theme.warning()));
        }
        lines.push(Line::from(spans));
        if !v.notes.is_empty() {
            lines.push(Line::styled(format!("    {}", v.notes), theme.text_dim()));
        }
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled("Vet Visits:", theme.title()));
    if records.vet_visits.is_empty() {
        lines.push(Line::styled("  No vet visits.", theme.text_dim()));
    }
    for v in records.vet_visits {
        lines.push(Line::raw(format!("  • {}", v)));
        if !v.notes.is_empty() {
            lines.push(Line::styled(format!("    {}", v.notes), theme.text_dim()));
        }
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled("Feeding Invoice:", theme.title()));
    match &records.invoice {
        Ok(invoice) if invoice.is_empty() => {
            lines.push(Line::styled("  No feeding logs.", theme.text_dim()));
        }
        Ok(invoice) => {
            for line in &invoice.lines {
                lines.push(Line::raw(format!(
                    "  • {} | {} day(s) | Plan: {}",
                    line.start_date,
                    line.num_days,
                    line.plan.label()
                )));
                lines.push(Line::styled(
                    format!("    {}", line.breakdown(fees)),
                    theme.text_dim(),
                ));
            }
            lines.push(Line::styled(
                format!("  TOTAL: {}", fees.money(invoice.total)),
                theme.money(),
            ));
        }
        Err(e) => {
            lines.push(Line::styled(format!("  ⚠ {}", e), theme.error()));
        }
    }

    lines
}

/// Profile text wrapped to the view width; scroll offsets count wrapped rows
pub fn profile_paragraph(lines: Vec<Line<'static>>) -> Paragraph<'static> {
    Paragraph::new(lines).wrap(Wrap { trim: false })
}

//! Application state and event handling
//!
//! This is the core of the TUI, managing:
//! - The pets grid (cursor, scrolling, mouse hit-testing)
//! - The open pet profile and its records
//! - Data-entry forms and their submission
//! - Settings persistence

use crate::billing::Invoice;
use crate::config::{Config, ThemeName};
use crate::db::{Database, DbError};
use crate::form::{Form, FormAction, FormKind, Submission};
use crate::seed;
use crate::types::{FeedingLog, Owner, Pet, Tab, Vaccination, VetVisit};
use crate::ui::{card, grid::CardGrid, Theme};
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Number of rows on the Settings tab
const SETTINGS_COUNT: usize = 2;
/// Seconds a flash message stays visible
const FLASH_SECS: u64 = 3;

/// A pet as shown in the grid
#[derive(Debug, Clone)]
pub struct PetEntry {
    pub pet: Pet,
    pub owner: Option<Owner>,
    pub has_image: bool,
}

/// The pet opened on the Profile tab, with its records
#[derive(Debug, Clone)]
pub struct Profile {
    pub entry: PetEntry,
    pub vaccinations: Vec<Vaccination>,
    pub vet_visits: Vec<VetVisit>,
    pub feeding_logs: Vec<FeedingLog>,
    pub invoice: Result<Invoice, String>,
    pub scroll: u16,
}

impl Profile {
    pub fn pet_id(&self) -> Option<i64> {
        self.entry.pet.id
    }

    pub fn records(&self) -> card::ProfileRecords<'_> {
        card::ProfileRecords {
            vaccinations: &self.vaccinations,
            vet_visits: &self.vet_visits,
            invoice: self.invoice.as_ref().map_err(|e| e.clone()),
        }
    }
}

/// Popup overlay state
#[derive(Debug, Clone)]
pub enum PopupState {
    None,
    Form(Form),
    Error { title: String, message: String },
}

/// Main application state
pub struct App {
    // Core state
    pub should_quit: bool,
    pub active_tab: Tab,
    pub config: Config,
    pub theme: Theme,
    config_path: Option<PathBuf>,
    db: Database,
    rng: StdRng,

    // Pets tab state
    pub pets: Vec<PetEntry>,
    pub grid_cursor: usize,
    pub grid_scroll: usize,
    /// Geometry of the last drawn grid, for scrolling and mouse clicks
    pub grid: Cell<CardGrid>,

    // Profile tab state
    pub profile: Option<Profile>,
    /// Text area of the last drawn profile, for the scroll limit
    pub profile_area: Cell<Rect>,

    // Settings tab state
    pub settings_selected: usize,

    pub popup: PopupState,

    // Flash message (temporary feedback)
    pub flash_message: Option<(String, bool, Instant)>, // (message, is_error, timestamp)
}

impl App {
    /// Create the app; `config_path` is where settings changes are saved
    pub fn new(db: Database, config: Config, config_path: Option<PathBuf>) -> Result<Self> {
        let theme = Theme::from_name(config.theme);

        let mut app = Self {
            should_quit: false,
            active_tab: Tab::Pets,
            config,
            theme,
            config_path,
            db,
            rng: StdRng::from_entropy(),

            pets: Vec::new(),
            grid_cursor: 0,
            grid_scroll: 0,
            grid: Cell::new(CardGrid::default()),

            profile: None,
            profile_area: Cell::new(Rect::default()),

            settings_selected: 0,

            popup: PopupState::None,
            flash_message: None,
        };
        app.reload_pets().context("Failed to load pets")?;
        Ok(app)
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn data_dir(&self) -> &Path {
        self.db.data_dir()
    }

    /// Grid geometry for the current column setting
    fn grid(&self) -> CardGrid {
        CardGrid::new(self.grid.get().area, self.config.grid_columns)
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        self.expire_flash();

        match self.popup {
            PopupState::Form(_) => self.handle_form_key(key),
            PopupState::Error { .. } => {
                if matches!(key.code, KeyCode::Char('o') | KeyCode::Enter | KeyCode::Esc) {
                    self.popup = PopupState::None;
                }
                Ok(())
            }
            PopupState::None => self.handle_normal_key(key),
        }
    }

    /// Handle a mouse event: wheel scrolls, left click opens a card
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        if !matches!(self.popup, PopupState::None) {
            return Ok(());
        }
        self.clamp_grid_scroll();

        match (self.active_tab, mouse.kind) {
            (Tab::Pets, MouseEventKind::ScrollDown) => self.scroll_grid(1),
            (Tab::Pets, MouseEventKind::ScrollUp) => self.scroll_grid(-1),
            (Tab::Pets, MouseEventKind::Down(MouseButton::Left)) => {
                let hit = self
                    .grid()
                    .hit(mouse.column, mouse.row, self.grid_scroll, self.pets.len());
                if let Some(idx) = hit {
                    self.grid_cursor = idx;
                    self.open_profile(idx)?;
                }
            }
            (Tab::Profile, MouseEventKind::ScrollDown) => self.scroll_profile(1),
            (Tab::Profile, MouseEventKind::ScrollUp) => self.scroll_profile(-1),
            _ => {}
        }
        Ok(())
    }

    /// Handle key in normal state
    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        // Global keys (work in all tabs)
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return Ok(());
            }
            KeyCode::Char('1') => {
                self.active_tab = Tab::Pets;
                return Ok(());
            }
            KeyCode::Char('2') => {
                if self.profile.is_some() {
                    self.active_tab = Tab::Profile;
                } else {
                    self.show_flash("Select a pet first", true);
                }
                return Ok(());
            }
            KeyCode::Char('3') => {
                self.active_tab = Tab::Settings;
                return Ok(());
            }
            _ => {}
        }

        match self.active_tab {
            Tab::Pets => self.handle_pets_key(key),
            Tab::Profile => self.handle_profile_key(key),
            Tab::Settings => self.handle_settings_key(key),
        }
    }

    /// Handle keys in the Pets tab
    fn handle_pets_key(&mut self, key: KeyEvent) -> Result<()> {
        self.clamp_grid_scroll();
        let columns = self.config.grid_columns.max(1) as usize;
        let page = self.grid().visible_rows() * columns;

        match key.code {
            KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1),
            KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1),
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(columns as isize),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-(columns as isize)),
            KeyCode::PageDown => self.move_cursor(page as isize),
            KeyCode::PageUp => self.move_cursor(-(page as isize)),
            KeyCode::Char('g') | KeyCode::Home => self.set_cursor(0),
            KeyCode::Char('G') | KeyCode::End => self.set_cursor(self.pets.len().saturating_sub(1)),
            KeyCode::Enter => {
                if !self.pets.is_empty() {
                    self.open_profile(self.grid_cursor)?;
                }
            }
            KeyCode::Char('a') => self.popup = PopupState::Form(Form::new(FormKind::AddPet)),
            KeyCode::Char('r') => self.add_random_pet()?,
            KeyCode::Char('u') => {
                self.reload_pets()?;
                self.show_flash("Reloaded", false);
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in the Profile tab
    fn handle_profile_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(pet_id) = self.profile.as_ref().and_then(Profile::pet_id) else {
            self.active_tab = Tab::Pets;
            return Ok(());
        };

        match key.code {
            KeyCode::Esc | KeyCode::Backspace => self.active_tab = Tab::Pets,
            KeyCode::Char('j') | KeyCode::Down => self.scroll_profile(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_profile(-1),
            KeyCode::Char('g') => self.scroll_profile(i32::MIN),
            KeyCode::Char('v') => {
                self.popup = PopupState::Form(Form::new(FormKind::VetVisit { pet_id }));
            }
            KeyCode::Char('x') => {
                self.popup = PopupState::Form(Form::new(FormKind::Vaccination { pet_id }));
            }
            KeyCode::Char('f') => {
                self.popup = PopupState::Form(Form::new(FormKind::FeedingLog { pet_id }));
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in the Settings tab
    fn handle_settings_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.settings_selected < SETTINGS_COUNT - 1 {
                    self.settings_selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.settings_selected = self.settings_selected.saturating_sub(1);
            }
            KeyCode::Enter => {
                match self.settings_selected {
                    0 => self.set_theme(self.config.theme.next()),
                    1 => {
                        self.config.next_grid_columns();
                        self.set_cursor(self.grid_cursor);
                    }
                    _ => {}
                }
                self.save_config();
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle keys while a form is open
    fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        let PopupState::Form(form) = &mut self.popup else {
            return Ok(());
        };

        match form.handle_key(key) {
            FormAction::Continue => {}
            FormAction::Cancel => self.popup = PopupState::None,
            FormAction::Submit => match form.submit() {
                Ok(submission) => {
                    self.popup = PopupState::None;
                    self.save_submission(submission)?;
                }
                Err(e) => debug!(error = %e, "Form rejected"),
            },
        }
        Ok(())
    }

    // === HELPER METHODS ===

    /// Persist a validated form and refresh the views
    fn save_submission(&mut self, submission: Submission) -> Result<()> {
        let saved: Result<(String, Option<i64>), DbError> = match submission {
            Submission::Pet { pet, owner, image } => {
                let missing_image = image.as_deref().is_some_and(|p| !p.is_file());
                self.db
                    .pets()
                    .add_pet_with_owner(&pet, &owner, image.as_deref())
                    .map(|id| {
                        let msg = if missing_image {
                            format!("Saved {} (image not found, saved without image)", pet.name)
                        } else {
                            format!("Saved {} and owner {}", pet.name, owner.name)
                        };
                        (msg, Some(id))
                    })
            }
            Submission::VetVisit(visit) => self
                .db
                .vet_visits()
                .create(&visit)
                .map(|_| ("Vet visit saved".to_string(), None)),
            Submission::Vaccination(vax) => self
                .db
                .vaccinations()
                .create(&vax)
                .map(|_| (format!("{} vaccination saved", vax.vaccine_name), None)),
            Submission::FeedingLog(log) => self
                .db
                .feeding_logs()
                .create(&log)
                .map(|_| ("Feeding log saved".to_string(), None)),
        };

        match saved {
            Ok((message, new_pet)) => {
                self.reload_pets()?;
                if let Some(id) = new_pet {
                    self.select_pet(id);
                }
                self.show_flash(&message, false);
            }
            Err(e) => {
                warn!(error = %e, "Failed to save record");
                self.show_error("Save Failed", &e.to_string());
            }
        }
        Ok(())
    }

    /// Reload all pets, keep the cursor in range and refresh the open profile
    pub fn reload_pets(&mut self) -> Result<()> {
        let pets = self.db.pets().get_pets_with_owners()?;
        let controller = self.db.pets();
        self.pets = pets
            .into_iter()
            .map(|(pet, owner)| PetEntry {
                has_image: controller.image_exists(&pet),
                pet,
                owner,
            })
            .collect();
        self.set_cursor(self.grid_cursor);

        let open = self.profile.as_ref().and_then(Profile::pet_id);
        if let Some(id) = open {
            let entry = self.pets.iter().find(|e| e.pet.id == Some(id)).cloned();
            match entry {
                Some(entry) => {
                    let scroll = self.profile.as_ref().map(|p| p.scroll).unwrap_or(0);
                    let mut profile = self.load_profile(entry)?;
                    profile.scroll = scroll;
                    self.profile = Some(profile);
                }
                None => {
                    self.profile = None;
                    if self.active_tab == Tab::Profile {
                        self.active_tab = Tab::Pets;
                    }
                }
            }
        }

        debug!(count = self.pets.len(), "Loaded pets");
        Ok(())
    }

    fn load_profile(&self, entry: PetEntry) -> Result<Profile> {
        let pet_id = entry.pet.id.context("Pet has no id")?;

        let vaccinations = self.db.vaccinations().get_by_pet_id(pet_id)?;
        let vet_visits = self.db.vet_visits().get_by_pet_id(pet_id)?;
        let feeding_logs = self.db.feeding_logs().get_by_pet_id(pet_id)?;
        let invoice =
            Invoice::build(&self.config.fees, &feeding_logs).map_err(|e| e.to_string());

        Ok(Profile {
            entry,
            vaccinations,
            vet_visits,
            feeding_logs,
            invoice,
            scroll: 0,
        })
    }

    /// Open the profile of the pet at grid index `idx`
    fn open_profile(&mut self, idx: usize) -> Result<()> {
        let Some(entry) = self.pets.get(idx).cloned() else {
            return Ok(());
        };

        match self.load_profile(entry) {
            Ok(profile) => {
                info!(pet = %profile.entry.pet.name, "Opened profile");
                self.profile = Some(profile);
                self.active_tab = Tab::Profile;
            }
            Err(e) => self.show_error("Could not load profile", &format!("{:#}", e)),
        }
        Ok(())
    }

    fn add_random_pet(&mut self) -> Result<()> {
        match seed::add_random_pet(&self.db, &mut self.rng) {
            Ok(seeded) => {
                self.reload_pets()?;
                self.select_pet(seeded.pet_id);
                self.show_flash(&format!("Random pet {} saved", seeded.name), false);
            }
            Err(e) => self.show_error("Save Failed", &e.to_string()),
        }
        Ok(())
    }

    fn select_pet(&mut self, pet_id: i64) {
        if let Some(idx) = self.pets.iter().position(|e| e.pet.id == Some(pet_id)) {
            self.set_cursor(idx);
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let target = self.grid_cursor as isize + delta;
        if target >= 0 && (target as usize) < self.pets.len() {
            self.set_cursor(target as usize);
        }
    }

    /// Move the cursor, scrolling so it stays visible
    fn set_cursor(&mut self, idx: usize) {
        self.grid_cursor = idx.min(self.pets.len().saturating_sub(1));
        let grid = self.grid();
        self.grid_scroll = grid
            .scroll_for_cursor(self.grid_cursor, self.grid_scroll)
            .min(grid.max_scroll(self.pets.len()));
    }

    /// Keep the scroll offset valid for the last drawn grid size
    fn clamp_grid_scroll(&mut self) {
        let max = self.grid().max_scroll(self.pets.len());
        self.grid_scroll = self.grid_scroll.min(max);
    }

    /// Scroll the grid by whole rows without moving the cursor
    fn scroll_grid(&mut self, rows: isize) {
        let max = self.grid().max_scroll(self.pets.len()) as isize;
        self.grid_scroll = (self.grid_scroll as isize + rows).clamp(0, max) as usize;
    }

    /// Largest profile scroll that still fills the last drawn area
    pub fn profile_max_scroll(&self) -> u16 {
        let Some(profile) = &self.profile else {
            return 0;
        };
        let area = self.profile_area.get();
        let lines = card::profile_lines(
            &profile.entry.pet,
            profile.entry.owner.as_ref(),
            profile.entry.has_image,
            &profile.records(),
            &self.config.fees,
            &self.theme,
        );
        let rows = card::profile_paragraph(lines).line_count(area.width);
        rows.saturating_sub(area.height as usize)
            .min(u16::MAX as usize) as u16
    }

    fn scroll_profile(&mut self, lines: i32) {
        let max = self.profile_max_scroll() as i32;
        if let Some(profile) = &mut self.profile {
            profile.scroll = (profile.scroll as i32).saturating_add(lines).clamp(0, max) as u16;
        }
    }

    fn set_theme(&mut self, name: ThemeName) {
        self.config.theme = name;
        self.theme = Theme::from_name(name);
    }

    fn save_config(&mut self) {
        let Some(path) = self.config_path.clone() else {
            self.show_flash("Settings applied", false);
            return;
        };
        match self.config.save_to(&path) {
            Ok(()) => self.show_flash("Settings saved", false),
            Err(e) => self.show_error("Save Failed", &format!("{:#}", e)),
        }
    }

    fn expire_flash(&mut self) {
        if let Some((_, _, instant)) = &self.flash_message {
            if instant.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }

    /// Show an error popup
    fn show_error(&mut self, title: &str, message: &str) {
        self.popup = PopupState::Error {
            title: title.into(),
            message: message.into(),
        };
    }

    /// Show a flash message
    fn show_flash(&mut self, message: &str, is_error: bool) {
        self.flash_message = Some((message.into(), is_error, Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::{buddy, memory_db};
    use crate::types::FeedingPlan;
    use chrono::NaiveDate;
    use crossterm::event::KeyModifiers;
    use tempfile::TempDir;

    fn app_with_pets(n: usize) -> (App, TempDir) {
        let (db, dir) = memory_db();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..n {
            seed::add_random_pet(&db, &mut rng).unwrap();
        }
        let app = App::new(db, Config::default(), None).unwrap();
        (app, dir)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn mouse(app: &mut App, kind: MouseEventKind, column: u16, row: u16) {
        app.handle_mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
        .unwrap();
    }

    /// 4 columns x 2 visible rows of cards
    fn lay_out(app: &App) {
        app.grid.set(CardGrid::new(Rect::new(0, 0, 81, 16), 4));
    }

    #[test]
    fn test_grid_navigation() {
        let (mut app, _dir) = app_with_pets(10);
        lay_out(&app);

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.grid_cursor, 5);
        assert_eq!(app.grid_scroll, 0);

        press(&mut app, KeyCode::Down);
        assert_eq!(app.grid_cursor, 9);
        assert_eq!(app.grid_scroll, 1);

        // Moving past the last card is ignored
        press(&mut app, KeyCode::Down);
        assert_eq!(app.grid_cursor, 9);

        press(&mut app, KeyCode::Char('g'));
        assert_eq!((app.grid_cursor, app.grid_scroll), (0, 0));
    }

    #[test]
    fn test_mouse_scroll_and_click() {
        let (mut app, _dir) = app_with_pets(10);
        lay_out(&app);

        mouse(&mut app, MouseEventKind::ScrollDown, 0, 0);
        mouse(&mut app, MouseEventKind::ScrollDown, 0, 0);
        assert_eq!(app.grid_scroll, 1);
        assert_eq!(app.grid_cursor, 0);

        mouse(&mut app, MouseEventKind::ScrollUp, 0, 0);
        assert_eq!(app.grid_scroll, 0);

        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 25, 9);
        assert_eq!(app.grid_cursor, 5);
        assert_eq!(app.active_tab, Tab::Profile);
        assert_eq!(
            app.profile.as_ref().unwrap().pet_id(),
            app.pets[5].pet.id
        );
    }

    #[test]
    fn test_click_after_grid_grows() {
        let (mut app, _dir) = app_with_pets(8);
        // One visible row, so the wheel can scroll to the second
        app.grid.set(CardGrid::new(Rect::new(0, 0, 81, 8), 4));
        mouse(&mut app, MouseEventKind::ScrollDown, 0, 0);
        assert_eq!(app.grid_scroll, 1);

        // Both rows now fit and the first pet is drawn top-left
        lay_out(&app);
        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 1, 1);
        assert_eq!(app.grid_scroll, 0);
        assert_eq!(
            app.profile.as_ref().unwrap().pet_id(),
            app.pets[0].pet.id
        );
    }

    #[test]
    fn test_open_profile_loads_records() {
        let (mut app, _dir) = app_with_pets(1);
        press(&mut app, KeyCode::Enter);

        let profile = app.profile.as_ref().unwrap();
        assert_eq!(app.active_tab, Tab::Profile);
        assert_eq!(profile.vaccinations.len(), 1);
        assert_eq!(profile.feeding_logs.len(), 1);
        let invoice = profile.invoice.as_ref().unwrap();
        assert_eq!(invoice.total, app.config.fees.fee(&profile.feeding_logs[0]).unwrap());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.active_tab, Tab::Pets);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.active_tab, Tab::Profile);
    }

    #[test]
    fn test_profile_tab_needs_selection() {
        let (mut app, _dir) = app_with_pets(0);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.active_tab, Tab::Pets);
        assert!(app.flash_message.as_ref().unwrap().1);
    }

    #[test]
    fn test_add_pet_form() {
        let (mut app, _dir) = app_with_pets(0);

        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Rex");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Poodle");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "2021-05-01");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Bob");
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL))
            .unwrap();

        assert!(matches!(app.popup, PopupState::None));
        assert_eq!(app.pets.len(), 1);
        assert_eq!(app.pets[0].pet.name, "Rex");
        assert_eq!(app.pets[0].owner.as_ref().unwrap().name, "Bob");
        assert!(!app.flash_message.as_ref().unwrap().1);
    }

    #[test]
    fn test_invalid_form_stays_open() {
        let (mut app, _dir) = app_with_pets(0);

        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Rex");
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL))
            .unwrap();

        let PopupState::Form(form) = &app.popup else {
            panic!("form should stay open");
        };
        assert_eq!(form.focus, 2);
        assert!(form.error.is_some());
        assert!(app.pets.is_empty());

        press(&mut app, KeyCode::Esc);
        assert!(matches!(app.popup, PopupState::None));
    }

    #[test]
    fn test_feeding_log_form_updates_invoice() {
        let (db, _dir) = memory_db();
        let (pet, owner) = buddy();
        db.pets().add_pet_with_owner(&pet, &owner, None).unwrap();
        let mut app = App::new(db, Config::default(), None).unwrap();

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('f'));
        type_str(&mut app, "2024-03-15");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "3");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "2");
        press(&mut app, KeyCode::Enter);

        let profile = app.profile.as_ref().unwrap();
        assert_eq!(profile.feeding_logs.len(), 1);
        assert_eq!(profile.feeding_logs[0].plan, FeedingPlan::Twice);
        assert_eq!(
            profile.feeding_logs[0].start_date,
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
        assert_eq!(profile.invoice.as_ref().unwrap().total, 1560);
    }

    #[test]
    fn test_random_pet_is_selected() {
        let (mut app, _dir) = app_with_pets(3);
        lay_out(&app);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.pets.len(), 4);
        assert_eq!(app.grid_cursor, 3);
    }

    #[test]
    fn test_settings_cycle_without_saving() {
        let (mut app, _dir) = app_with_pets(0);
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.config.theme, ThemeName::Nord);
        assert_eq!(app.theme.bg, Theme::nord().bg);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.config.grid_columns, 5);
    }

    #[test]
    fn test_settings_saved_to_file() {
        let (db, dir) = memory_db();
        let path = dir.path().join("config.toml");
        let mut app = App::new(db, Config::default(), Some(path.clone())).unwrap();

        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Enter);

        let saved = Config::load_from(&path).unwrap();
        assert_eq!(saved.theme, ThemeName::Nord);
    }

    #[test]
    fn test_quit() {
        let (mut app, _dir) = app_with_pets(0);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}

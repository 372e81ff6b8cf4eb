use crate::config::Config;
use crate::event::AppEvent;
use crate::filter::FilterMethod;
use crate::navigation::RenderHint;
use crate::record::Record;
use crate::search::SearchOutcome;
use crate::session::Session;

/// Choices offered by the level picker. `all` removes the filter.
pub const LEVEL_CHOICES: [&str; 5] = ["all", "debug", "info", "warn", "error"];

/// Choices offered by the filter picker.
pub const FILTER_CHOICES: [&str; 4] = ["timestamp", "level", "message", "other"];

/// What a picker selection will be applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerPurpose {
    Sort,
    Filter,
    Level,
}

/// A modal list of choices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picker {
    pub purpose: PickerPurpose,
    pub title: String,
    pub items: Vec<String>,
    pub selected: usize,
}

impl Picker {
    pub fn new(purpose: PickerPurpose, title: &str, items: Vec<String>) -> Self {
        Self {
            purpose,
            title: title.to_string(),
            items,
            selected: 0,
        }
    }

    /// Preselect `item` if it is offered.
    fn with_selected(mut self, item: Option<&str>) -> Self {
        if let Some(idx) = item.and_then(|item| self.items.iter().position(|i| i == item)) {
            self.selected = idx;
        }
        self
    }

    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    /// Move the selection to the first item starting with `c`.
    pub fn jump(&mut self, c: char) {
        if let Some(idx) = self.items.iter().position(|i| i.starts_with(c)) {
            self.selected = idx;
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.items.get(self.selected).map(String::as_str)
    }
}

/// What a submitted prompt will be applied to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptPurpose {
    Search,
    GotoLine,
    /// Field name, or `field:value` to filter in one step
    FilterField,
    FilterValue(String),
}

/// A modal single-line text input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub purpose: PromptPurpose,
    pub label: String,
    pub input: String,
}

/// Input mode for user interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Picker(Picker),
    Prompt(Prompt),
    /// Informational message, dismissed by any key
    Message(String),
    Help,
    Details,
}

impl InputMode {
    /// Short name shown in the status line
    pub fn name(&self) -> &'static str {
        match self {
            InputMode::Normal => "normal",
            InputMode::Picker(p) => match p.purpose {
                PickerPurpose::Sort => "sort",
                PickerPurpose::Filter => "filter",
                PickerPurpose::Level => "level",
            },
            InputMode::Prompt(p) => match p.purpose {
                PromptPurpose::Search => "search",
                PromptPurpose::GotoLine => "goto",
                PromptPurpose::FilterField | PromptPurpose::FilterValue(_) => "filter",
            },
            InputMode::Message(_) => "message",
            InputMode::Help => "help",
            InputMode::Details => "details",
        }
    }
}

/// Main application state
pub struct App {
    pub session: Session,

    pub config: Config,

    pub input_mode: InputMode,

    /// Wrap long lines in the details overlay
    pub wrap: bool,

    pub should_quit: bool,

    /// Column widths for the rows on screen; None when they must be recomputed
    pub column_widths: Option<Vec<u16>>,
}

impl App {
    pub fn new(session: Session, config: Config) -> Self {
        Self {
            session,
            config,
            input_mode: InputMode::Normal,
            wrap: true,
            should_quit: false,
            column_widths: None,
        }
    }

    /// Record under the cursor, if the view has any rows
    pub fn selected_record(&mut self) -> Option<&Record> {
        let row = self.session.cursor().row;
        self.session.view().get(row)
    }

    /// Terminal resized: recompute how many rows fit
    pub fn resize(&mut self, page_height: usize) {
        let hint = self.session.resize(page_height);
        self.note(hint);
    }

    /// Rows on screen changed, so cached column widths are stale
    fn note(&mut self, hint: RenderHint) {
        if hint == RenderHint::Notify {
            self.invalidate_layout();
        }
    }

    pub fn invalidate_layout(&mut self) {
        self.column_widths = None;
    }

    /// Apply an event to the app state
    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            // Navigation events
            AppEvent::MoveDown => {
                let hint = self.session.move_down();
                self.note(hint);
            }
            AppEvent::MoveUp => {
                let hint = self.session.move_up();
                self.note(hint);
            }
            AppEvent::PageDown => {
                let hint = self.session.page_down();
                self.note(hint);
            }
            AppEvent::PageUp => {
                let hint = self.session.page_up();
                self.note(hint);
            }
            AppEvent::FirstLine => {
                let hint = self.session.first_page();
                self.note(hint);
            }
            AppEvent::LastLine => {
                let hint = self.session.last_page();
                self.note(hint);
            }
            AppEvent::FirstViewportLine => {
                let hint = self.session.move_to_first_viewport_line();
                self.note(hint);
            }
            AppEvent::LastViewportLine => {
                let hint = self.session.move_to_last_viewport_line();
                self.note(hint);
            }
            AppEvent::CenterViewportLine => {
                let hint = self.session.move_to_center_viewport_line();
                self.note(hint);
            }

            // Pickers and prompts
            AppEvent::OpenGotoLine => self.open_prompt(PromptPurpose::GotoLine, "Line", ""),
            AppEvent::OpenSearch { fresh } => {
                if fresh {
                    self.session.clear_search_term();
                }
                let default = self.session.last_search_term().unwrap_or("").to_string();
                self.open_prompt(PromptPurpose::Search, "Search", &default);
            }
            AppEvent::OpenSort => {
                let current = self.session.engine().sort().map(|s| s.key.clone());
                let picker = Picker::new(PickerPurpose::Sort, "Sort by", self.config.field_names())
                    .with_selected(current.as_deref());
                self.input_mode = InputMode::Picker(picker);
            }
            AppEvent::OpenFilter => {
                let items = FILTER_CHOICES.iter().map(|s| s.to_string()).collect();
                self.input_mode =
                    InputMode::Picker(Picker::new(PickerPurpose::Filter, "Filter by", items));
            }
            AppEvent::OpenLevelFilter => self.open_level_picker(),

            // Direct commands
            AppEvent::RepeatSearch => {
                let outcome = self.session.repeat_search();
                self.report_search(outcome);
            }
            AppEvent::InvertSort => {
                self.session.invert_sort();
                self.invalidate_layout();
            }
            AppEvent::ClearFilters => {
                self.session.clear_filters();
                self.invalidate_layout();
            }
            AppEvent::ToggleWrap => self.wrap = !self.wrap,
            AppEvent::ToggleWatch => {
                self.session.toggle_watch();
            }
            AppEvent::Reload => self.reload(),
            AppEvent::ShowDetails => {
                if !self.session.is_empty() {
                    self.input_mode = InputMode::Details;
                }
            }
            AppEvent::ShowHelp => self.input_mode = InputMode::Help,

            // Picker events
            AppEvent::PickerUp => {
                if let InputMode::Picker(picker) = &mut self.input_mode {
                    picker.up();
                }
            }
            AppEvent::PickerDown => {
                if let InputMode::Picker(picker) = &mut self.input_mode {
                    picker.down();
                }
            }
            AppEvent::PickerJump(c) => {
                if let InputMode::Picker(picker) = &mut self.input_mode {
                    picker.jump(c);
                }
            }
            AppEvent::PickerSelect => self.select_picker_item(),

            // Prompt events
            AppEvent::PromptChar(c) => {
                if let InputMode::Prompt(prompt) = &mut self.input_mode {
                    prompt.input.push(c);
                }
            }
            AppEvent::PromptBackspace => {
                if let InputMode::Prompt(prompt) = &mut self.input_mode {
                    prompt.input.pop();
                }
            }
            AppEvent::PromptSubmit => self.submit_prompt(),

            AppEvent::Cancel | AppEvent::CloseOverlay => self.input_mode = InputMode::Normal,

            AppEvent::Quit => self.should_quit = true,
        }
    }

    fn open_prompt(&mut self, purpose: PromptPurpose, label: &str, input: &str) {
        self.input_mode = InputMode::Prompt(Prompt {
            purpose,
            label: label.to_string(),
            input: input.to_string(),
        });
    }

    fn open_level_picker(&mut self) {
        let items = LEVEL_CHOICES.iter().map(|s| s.to_string()).collect();
        let current = self.session.engine().filters().level_filter().map(str::to_string);
        let picker = Picker::new(PickerPurpose::Level, "Log level", items)
            .with_selected(current.as_deref());
        self.input_mode = InputMode::Picker(picker);
    }

    fn select_picker_item(&mut self) {
        let InputMode::Picker(picker) = std::mem::replace(&mut self.input_mode, InputMode::Normal)
        else {
            return;
        };
        let Some(item) = picker.current().map(str::to_string) else {
            return;
        };

        match picker.purpose {
            PickerPurpose::Sort => {
                self.session.choose_sort(&item);
                self.invalidate_layout();
            }
            PickerPurpose::Level => {
                if item == "all" {
                    self.session.clear_filters();
                } else {
                    self.session.set_level_filter(&item);
                }
                self.invalidate_layout();
            }
            PickerPurpose::Filter => match item.as_str() {
                "level" => self.open_level_picker(),
                "other" => self.open_prompt(PromptPurpose::FilterField, "Field", ""),
                field => {
                    let label = format!("Filter {}", field);
                    self.open_prompt(PromptPurpose::FilterValue(field.to_string()), &label, "");
                }
            },
        }
    }

    fn submit_prompt(&mut self) {
        let InputMode::Prompt(prompt) = std::mem::replace(&mut self.input_mode, InputMode::Normal)
        else {
            return;
        };
        // Empty input behaves like Esc
        if prompt.input.trim().is_empty() {
            return;
        }

        match prompt.purpose {
            PromptPurpose::Search => {
                let outcome = self.session.search(&prompt.input);
                self.report_search(outcome);
            }
            PromptPurpose::GotoLine => match prompt.input.trim().parse::<usize>() {
                Ok(line) => {
                    let hint = self.session.goto(line.saturating_sub(1));
                    self.note(hint);
                }
                Err(_) => {
                    self.input_mode =
                        InputMode::Message(format!("Not a line number: {}", prompt.input.trim()));
                }
            },
            PromptPurpose::FilterField => {
                let input = prompt.input.trim();
                match input.split_once(':') {
                    Some((field, value)) => self.apply_filter(field.trim(), value.trim()),
                    None => {
                        let label = format!("Filter {}", input);
                        self.open_prompt(PromptPurpose::FilterValue(input.to_string()), &label, "");
                    }
                }
            }
            PromptPurpose::FilterValue(field) => self.apply_filter(&field, &prompt.input),
        }
    }

    fn apply_filter(&mut self, field: &str, value: &str) {
        self.session.set_filter(field, value, FilterMethod::Contains);
        self.invalidate_layout();
    }

    fn report_search(&mut self, outcome: SearchOutcome) {
        match outcome {
            SearchOutcome::Found(_) => self.invalidate_layout(),
            SearchOutcome::NoMatches(term) => {
                self.input_mode = InputMode::Message(format!("No matches for \"{}\"", term));
            }
            SearchOutcome::NoPreviousSearch => {
                self.input_mode = InputMode::Message("No previous search".to_string());
            }
        }
    }

    fn reload(&mut self) {
        match self.session.reload() {
            Ok(()) => self.invalidate_layout(),
            Err(e) => {
                tracing::warn!(error = %e, "manual reload failed");
                self.input_mode = InputMode::Message(e.to_string());
            }
        }
    }
}

/// Events that can occur in the application
/// Handlers return these events instead of mutating app state directly
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    // Navigation events
    MoveDown,
    MoveUp,
    PageDown,
    PageUp,
    FirstLine,
    LastLine,
    FirstViewportLine,
    LastViewportLine,
    CenterViewportLine,

    // Commands that open a picker or prompt
    OpenGotoLine,
    /// `fresh` forgets the previous term before prompting
    OpenSearch { fresh: bool },
    OpenSort,
    OpenFilter,
    OpenLevelFilter,

    // Direct commands
    RepeatSearch,
    InvertSort,
    ClearFilters,
    ToggleWrap,
    ToggleWatch,
    Reload,
    ShowDetails,
    ShowHelp,

    // Picker events
    PickerUp,
    PickerDown,
    PickerJump(char),
    PickerSelect,

    // Prompt events
    PromptChar(char),
    PromptBackspace,
    PromptSubmit,

    /// Esc in a picker or prompt: back to normal mode, nothing applied
    Cancel,
    /// Close the help, details or message overlay
    CloseOverlay,

    // System events
    Quit,
}

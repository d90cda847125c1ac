use std::fmt;

/// Page-level state of the picture feed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadingState {
    #[default]
    Loading,
    Ready,
    Error(String),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadingState::Ready)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadingState::Error(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoadingState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

impl fmt::Display for LoadingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadingState::Loading => write!(f, "Loading"),
            LoadingState::Ready => write!(f, "Ready"),
            LoadingState::Error(msg) => write!(f, "Error: {}", msg),
        }
    }
}

/// Everything that moves the catalog between states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadingEvent {
    StartLoading,
    LoadComplete,
    LoadError(String),
    RetryRequested,
}

impl LoadingEvent {
    pub fn apply_to_state(self, current_state: LoadingState) -> LoadingState {
        match (self, current_state) {
            (LoadingEvent::StartLoading, _) => LoadingState::Loading,
            (LoadingEvent::LoadComplete, _) => LoadingState::Ready,
            (LoadingEvent::LoadError(msg), _) => LoadingState::Error(msg),
            (LoadingEvent::RetryRequested, LoadingState::Error(_)) => LoadingState::Loading,
            (LoadingEvent::RetryRequested, state) => state,
        }
    }
}

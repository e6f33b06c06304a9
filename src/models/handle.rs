use std::fmt;

/// Opaque tmux window id (`@N`). Windows are addressed by id, never by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowHandle(String);

impl WindowHandle {
    pub const PREFIX: char = '@';

    /// Accepts a `#{window_id}` reply. Anything not shaped like `@N` is rejected
    /// so a garbled reply falls through to the name lookup.
    pub fn parse(raw: &str) -> Option<Self> {
        parse_id(raw, Self::PREFIX).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque tmux pane id (`%N`). Ids of killed panes are never reused by tmux.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaneHandle(String);

impl PaneHandle {
    pub const PREFIX: char = '%';

    pub fn parse(raw: &str) -> Option<Self> {
        parse_id(raw, Self::PREFIX).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaneHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn parse_id(raw: &str, prefix: char) -> Option<String> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(trimmed.to_string())
}

/// Direction of a `split-window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Side by side (`-h`).
    Horizontal,
    /// Stacked (`-v`).
    Vertical,
}

impl Orientation {
    /// Even-indexed splits go horizontal, odd ones vertical.
    pub fn for_split(index: usize) -> Self {
        if index % 2 == 0 {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "-h",
            Orientation::Vertical => "-v",
        }
    }
}

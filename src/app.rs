use crate::chat::{ChatController, ChatMessage, ChatRole};
use crate::client::FittingClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Terminal-side state: the conversation controller plus everything that
/// only matters to the rendering (cursor, scroll, animation).
pub struct App {
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub chat: ChatController,

    /// Cursor position in the draft, as a char index.
    pub cursor: usize,

    /// Transcript viewport: scroll offset and the inner pane size, the
    /// latter stored during render for wrap calculations.
    pub scroll: u16,
    pub chat_height: u16,
    pub chat_width: u16,

    /// 0-2, for the ellipsis animation while a request is in flight.
    pub animation_frame: u8,
}

impl App {
    pub fn new(client: FittingClient) -> Self {
        Self {
            should_quit: false,
            input_mode: InputMode::Editing,
            chat: ChatController::new(client),

            cursor: 0,

            scroll: 0,
            chat_height: 0,
            chat_width: 0,

            animation_frame: 0,
        }
    }

    /// Tick animation frame (called by the Tick event).
    pub fn tick_animation(&mut self) {
        if self.chat.loading() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    /// Keeps the cursor inside the draft after the controller clears it.
    pub fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.chat.draft().chars().count());
    }

    pub fn scroll_down(&mut self) {
        let max = self.transcript_lines().saturating_sub(self.chat_height);
        if self.scroll < max {
            self.scroll = self.scroll.saturating_add(1);
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_half_page_down(&mut self) {
        let half_page = self.chat_height / 2;
        let max = self.transcript_lines().saturating_sub(self.chat_height);
        self.scroll = (self.scroll + half_page).min(max);
    }

    pub fn scroll_half_page_up(&mut self) {
        let half_page = self.chat_height / 2;
        self.scroll = self.scroll.saturating_sub(half_page);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    /// Scroll so the latest entry (or the "Thinking..." indicator) is
    /// visible.
    pub fn scroll_to_bottom(&mut self) {
        let total = self.transcript_lines();
        let visible = if self.chat_height > 0 { self.chat_height } else { 20 };

        if total > visible {
            self.scroll = total.saturating_sub(visible);
        } else {
            self.scroll = 0;
        }
    }

    /// Estimates how many rows the transcript occupies at the current pane
    /// width, mirroring how the render lays entries out: a role line, the
    /// wrapped content, any structured detail lines, and a trailing blank.
    fn transcript_lines(&self) -> u16 {
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };

        let mut total: u16 = 0;

        for msg in self.chat.transcript() {
            total += 1; // role line ("You:" or "AI:")
            total += wrapped_lines(&msg.text, wrap_width);
            total += detail_lines(msg, wrap_width);
            total += 1; // blank line after the entry
        }

        if self.chat.loading() {
            total += 2; // "AI:" + "Thinking..."
        }

        total
    }
}

fn wrapped_lines(text: &str, wrap_width: usize) -> u16 {
    let mut total = 0u16;
    for line in text.lines() {
        // Character count, not byte length, for proper UTF-8 handling.
        let char_count = line.chars().count();
        if char_count == 0 {
            total += 1;
        } else {
            total += ((char_count / wrap_width) + 1) as u16;
        }
    }
    total
}

fn detail_lines(msg: &ChatMessage, wrap_width: usize) -> u16 {
    if msg.role != ChatRole::Assistant {
        return 0;
    }

    let mut total = 0u16;
    if let Some(error_text) = &msg.error_text {
        total += wrapped_lines(error_text, wrap_width);
    }
    if let Some(reasoning) = &msg.reasoning {
        total += wrapped_lines(reasoning, wrap_width);
    }
    if let Some(fit_tips) = &msg.fit_tips {
        total += wrapped_lines(fit_tips, wrap_width);
    }
    if msg.issues.as_ref().is_some_and(|issues| !issues.is_empty()) {
        total += 1;
    }
    if msg.confidence.is_some() {
        total += 1;
    }
    total
}

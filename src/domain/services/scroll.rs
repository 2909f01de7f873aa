use ratatui::widgets::ScrollbarState;

const PAGE_LENGTH: u16 = 10;

#[derive(Default)]
pub struct Scroll {
    list_length: u16,
    viewport_length: u16,
    pub position: u16,
    pub scrollbar_state: ScrollbarState,
}

impl Scroll {
    fn max_position(&self) -> u16 {
        return self.list_length.saturating_sub(self.viewport_length);
    }

    pub fn up(&mut self) {
        self.position = self.position.saturating_sub(1);
        self.scrollbar_state.prev();
    }

    pub fn up_page(&mut self) {
        for _ in 0..PAGE_LENGTH {
            self.up();
        }
    }

    pub fn down(&mut self) {
        if self.position >= self.max_position() {
            return;
        }

        self.position += 1;
        self.scrollbar_state.next();
    }

    pub fn down_page(&mut self) {
        for _ in 0..PAGE_LENGTH {
            self.down();
        }
    }

    /// Newest entries render first, so new content resets to the top.
    pub fn top(&mut self) {
        self.position = 0;
        self.scrollbar_state.first();
    }

    pub fn set_state(&mut self, list_length: u16, viewport_length: u16) {
        self.list_length = list_length;
        self.viewport_length = viewport_length;
        self.position = self.position.min(self.max_position());
        self.scrollbar_state = self
            .scrollbar_state
            .content_length(list_length)
            .viewport_content_length(viewport_length)
            .position(self.position);
    }
}

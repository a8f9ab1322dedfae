//! The shared panel that shows one content module at a time

use crate::data::ContentModule;

use super::scheduler::TaskHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    /// Shown but still dim, fades in shortly
    Opening,
    Open,
    /// Dim, about to hide
    Closing,
}

#[derive(Debug, Clone)]
pub struct ModuleViewer {
    pub visibility: Visibility,
    pub key: String,
    pub title: String,
    pub header: String,
    pub body: Vec<String>,
    pub scroll: u16,
    typed: usize,
    pub(crate) fade: Option<TaskHandle>,
    pub(crate) typing: Option<TaskHandle>,
}

impl Default for ModuleViewer {
    fn default() -> Self {
        Self {
            visibility: Visibility::Hidden,
            key: String::new(),
            title: String::new(),
            header: String::new(),
            body: Vec::new(),
            scroll: 0,
            typed: 0,
            fade: None,
            typing: None,
        }
    }
}

impl ModuleViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever was shown with a copy of `module`
    pub fn show(&mut self, title: &str, module: &ContentModule) {
        self.key = module.key.clone();
        self.title = title.to_string();
        self.header = module.header.clone();
        self.body = module.body.clone();
        self.scroll = 0;
        self.typed = 0;
        self.visibility = Visibility::Opening;
    }

    pub fn fade_in(&mut self) {
        if self.visibility == Visibility::Opening {
            self.visibility = Visibility::Open;
        }
    }

    pub fn begin_close(&mut self) {
        if self.visibility != Visibility::Hidden {
            self.visibility = Visibility::Closing;
        }
    }

    pub fn hide(&mut self) {
        self.visibility = Visibility::Hidden;
    }

    pub fn is_visible(&self) -> bool {
        self.visibility != Visibility::Hidden
    }

    pub fn is_dimmed(&self) -> bool {
        matches!(self.visibility, Visibility::Opening | Visibility::Closing)
    }

    /// Reveal one more header character. False once the header is complete.
    pub fn type_next(&mut self) -> bool {
        let total = self.header.chars().count();
        if self.typed < total {
            self.typed += 1;
        }
        self.typed < total
    }

    pub fn typing_done(&self) -> bool {
        self.typed >= self.header.chars().count()
    }

    pub fn finish_typing(&mut self) {
        self.typed = self.header.chars().count();
    }

    /// The part of the header revealed so far
    pub fn typed_header(&self) -> &str {
        match self.header.char_indices().nth(self.typed) {
            Some((idx, _)) => &self.header[..idx],
            None => &self.header,
        }
    }

    /// Title, header and body as shown once typing has finished
    pub fn rendered(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.body.len() + 2);
        lines.push(self.title.clone());
        lines.push(self.header.clone());
        lines.extend(self.body.iter().cloned());
        lines
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let max = self.body.len().saturating_sub(1) as i32;
        let next = (self.scroll as i32 + delta).clamp(0, max.max(0));
        self.scroll = next as u16;
    }

    /// Pending fade and typing tasks, for cancellation
    pub(crate) fn take_timers(&mut self) -> Vec<TaskHandle> {
        self.fade.take().into_iter().chain(self.typing.take()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module() -> ContentModule {
        ContentModule::new("xss-module", "> XSS", &["one", "two", "three"])
    }

    #[test]
    fn show_copies_and_opens_dimmed() {
        let mut viewer = ModuleViewer::new();
        viewer.show("Cross-Site Scripting Defense", &module());
        assert_eq!(viewer.visibility, Visibility::Opening);
        assert!(viewer.is_dimmed());
        viewer.fade_in();
        assert_eq!(viewer.visibility, Visibility::Open);
        assert_eq!(viewer.body, vec!["one", "two", "three"]);
    }

    #[test]
    fn typing_reveals_header_char_by_char() {
        let mut viewer = ModuleViewer::new();
        viewer.show("t", &module());
        assert_eq!(viewer.typed_header(), "");
        assert!(viewer.type_next());
        assert_eq!(viewer.typed_header(), ">");
        while viewer.type_next() {}
        assert!(viewer.typing_done());
        assert_eq!(viewer.typed_header(), "> XSS");
    }

    #[test]
    fn typing_handles_multibyte_headers() {
        let mut viewer = ModuleViewer::new();
        viewer.show("t", &ContentModule::new("k", "☕é", &[]));
        viewer.type_next();
        assert_eq!(viewer.typed_header(), "☕");
    }

    #[test]
    fn close_then_hide() {
        let mut viewer = ModuleViewer::new();
        viewer.begin_close();
        assert_eq!(viewer.visibility, Visibility::Hidden);

        viewer.show("t", &module());
        viewer.fade_in();
        viewer.begin_close();
        assert_eq!(viewer.visibility, Visibility::Closing);
        viewer.hide();
        assert!(!viewer.is_visible());
    }

    #[test]
    fn scroll_is_clamped_to_body() {
        let mut viewer = ModuleViewer::new();
        viewer.show("t", &module());
        viewer.scroll_by(-5);
        assert_eq!(viewer.scroll, 0);
        viewer.scroll_by(10);
        assert_eq!(viewer.scroll, 2);
    }
}

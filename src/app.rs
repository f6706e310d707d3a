//! Application state and event handling.
//!
//! [`App`] wires the live pipeline to the screen:
//!
//! ```text
//! SourceEditor ─edit→ Debouncer ─fire→ Invoker ─(inline | TransformWorker)→ OutputState
//!                                                                              │
//!               AST / Debug panes ← sync ─────────────────────────────────────┤
//!               GlyphCache → OverlayRenderer ← ScrollMirror ← Whitespace pane
//!               ExportActions (copy / download) ← current snapshot
//! ```
//!
//! It never touches the terminal. Events and timestamps come in, a
//! [`FrameBuffer`] comes out, which keeps the whole thing testable.

use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::{Config, TransformMode};
use crate::error::LensResult;
use crate::export::ExportActions;
use crate::layout::{truncate_text, ButtonId, PaneId, PaneLayout, TextMetrics};
use crate::overlay::{
    ClassifiedGlyph, GlyphCache, OverlayRenderer, ScrollMirror, WHEEL_SCROLL,
};
use crate::pipeline::{Debouncer, Invoker, OutputState, RequestId, SharedTransform, TransformWorker};
use crate::primitives::{draw_button, EditOutcome, SourceEditor, TextPane};
use crate::renderer::FrameBuffer;
use crate::state::{Clipboard, InputEvent, KeyboardEvent, MouseAction, MouseButton, MouseEvent};
use crate::theme::Theme;
use crate::transform::TransformOutput;

/// Input poll timeout while nothing is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Input poll timeout while a worker result is outstanding.
const WORKER_POLL: Duration = Duration::from_millis(16);

const KEY_HINT: &str = "^Y copy  ^S save  F1-F4 panes  ^Q quit";

pub struct App {
    metrics: TextMetrics,
    theme: Theme,

    // Pipeline
    transform: SharedTransform,
    worker: Option<TransformWorker>,
    debouncer: Debouncer,
    invoker: Invoker,
    output: OutputState,
    glyphs: GlyphCache,

    // Surfaces
    editor: SourceEditor,
    ast_pane: TextPane,
    debug_pane: TextPane,
    whitespace_pane: TextPane,
    mirror: ScrollMirror,
    export: ExportActions,

    layout: PaneLayout,
    size: (u16, u16),
    focus: PaneId,
    status: Option<String>,
    quit: bool,

    dirty: bool,
}

impl App {
    pub fn new(
        config: &Config,
        transform: SharedTransform,
        clipboard: Box<dyn Clipboard>,
        width: u16,
        height: u16,
    ) -> LensResult<Self> {
        config.validate()?;

        let worker = match config.transform_mode {
            TransformMode::Inline => None,
            TransformMode::Worker => Some(TransformWorker::spawn(transform.clone())?),
        };

        let output = OutputState::new();
        let mut glyphs = GlyphCache::new();
        glyphs.refresh(&output);

        let mut app = Self {
            metrics: TextMetrics::new(config.tab_width),
            theme: Theme::terminal(),
            transform,
            worker,
            debouncer: Debouncer::new(config.debounce),
            invoker: Invoker::new(),
            output,
            glyphs,
            editor: SourceEditor::new(),
            ast_pane: TextPane::new(),
            debug_pane: TextPane::new(),
            whitespace_pane: TextPane::new(),
            mirror: ScrollMirror::new(),
            export: ExportActions::new(clipboard, config.download_path()),
            layout: PaneLayout::default(),
            size: (0, 0),
            focus: PaneId::Source,
            status: None,
            quit: false,
            dirty: true,
        };
        app.resize(width, height);
        Ok(app)
    }

    /// Put `text` in the editor and transform it right away.
    pub fn load_source(&mut self, text: &str) {
        self.editor.set_text(text, &self.metrics);
        self.debouncer.cancel();
        self.trigger();
    }

    // =========================================================================
    // Time
    // =========================================================================

    /// Advance timers: fire the debouncer and collect worker results.
    pub fn tick(&mut self, now: Instant) {
        if self.debouncer.poll(now) {
            self.trigger();
        }
        self.drain_worker();
    }

    /// How long the event loop may block waiting for input.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        let mut timeout = self.debouncer.time_remaining(now).unwrap_or(IDLE_POLL);
        if self.worker.is_some() && self.invoker.is_in_flight() {
            timeout = timeout.min(WORKER_POLL);
        }
        timeout
    }

    /// Block up to `timeout` for a worker result and apply it.
    ///
    /// Inline mode has nothing to wait for and returns immediately.
    #[cfg(test)]
    fn wait_for_worker(&mut self, timeout: Duration) -> bool {
        let Some(worker) = &self.worker else {
            return false;
        };
        match worker.recv_timeout(timeout) {
            Some((id, output)) => {
                self.apply(id, output);
                true
            }
            None => false,
        }
    }

    /// Run the transform for the current SourceText.
    fn trigger(&mut self) {
        let applied = match &self.worker {
            Some(worker) => {
                let id = self.invoker.issue();
                worker.submit(id, self.editor.text().to_string());
                false
            }
            None => self
                .invoker
                .run(&*self.transform, self.editor.text(), &mut self.output)
                .is_applied(),
        };
        if applied {
            self.sync_panes();
        }
        self.dirty = true;
    }

    fn drain_worker(&mut self) {
        let mut results = Vec::new();
        if let Some(worker) = &self.worker {
            while let Some(result) = worker.try_recv() {
                results.push(result);
            }
        }
        for (id, output) in results {
            self.apply(id, output);
        }
    }

    fn apply(&mut self, id: RequestId, output: TransformOutput) {
        if self.invoker.deliver(id, output, &mut self.output).is_applied() {
            self.sync_panes();
        }
    }

    /// Copy the current snapshot into the panes and the overlay glyphs.
    fn sync_panes(&mut self) {
        let snapshot = self.output.current();
        debug!(
            generation = self.output.generation(),
            encoded_len = snapshot.encoded_output.len(),
            "output snapshot changed"
        );
        self.glyphs.refresh(&self.output);
        self.ast_pane.set_text(&snapshot.ast, &self.metrics);
        self.debug_pane.set_text(&snapshot.debug_output, &self.metrics);
        self.whitespace_pane.set_text(&snapshot.encoded_output, &self.metrics);
        // New content may have clamped the surface's offset
        self.mirror.on_scroll(&self.whitespace_pane);
        self.dirty = true;
    }

    // =========================================================================
    // Events
    // =========================================================================

    pub fn handle_event(&mut self, event: InputEvent, now: Instant) {
        match event {
            InputEvent::Key(key) => self.handle_key(&key, now),
            InputEvent::Mouse(mouse) => self.handle_mouse(&mouse),
            InputEvent::Resize(w, h) => self.resize(w, h),
            InputEvent::Paste(text) => {
                if self.focus == PaneId::Source {
                    let outcome = self.editor.insert_str(&text, &self.metrics);
                    self.after_edit(outcome, now);
                }
            }
            InputEvent::None => {}
        }
    }

    fn handle_key(&mut self, event: &KeyboardEvent, now: Instant) {
        if !event.is_press() {
            return;
        }
        if event.is_ctrl('q') || event.is_ctrl('c') {
            self.quit = true;
            return;
        }
        if event.is_ctrl('y') {
            self.copy();
            return;
        }
        if event.is_ctrl('s') {
            self.download();
            return;
        }

        let focus = match event.key.as_str() {
            "F1" => Some(PaneId::Source),
            "F2" => Some(PaneId::Ast),
            "F3" => Some(PaneId::Debug),
            "F4" => Some(PaneId::Whitespace),
            _ => None,
        };
        if let Some(pane) = focus {
            self.set_focus(pane);
            return;
        }

        match self.focus {
            PaneId::Source => {
                let outcome = self.editor.handle_key(event, &self.metrics);
                self.after_edit(outcome, now);
            }
            pane => {
                let scrolled = match pane {
                    PaneId::Ast => self.ast_pane.handle_key(event),
                    PaneId::Debug => self.debug_pane.handle_key(event),
                    _ => self.whitespace_pane.handle_key(event),
                };
                if scrolled {
                    self.on_pane_scrolled(pane);
                }
            }
        }
    }

    fn after_edit(&mut self, outcome: EditOutcome, now: Instant) {
        match outcome {
            EditOutcome::Edited => {
                self.debouncer.notify(now);
                self.status = None;
                self.dirty = true;
            }
            EditOutcome::Moved => self.dirty = true,
            EditOutcome::Ignored => {}
        }
    }

    fn handle_mouse(&mut self, event: &MouseEvent) {
        match event.action {
            MouseAction::Scroll => {
                let (Some(info), Some(pane)) = (event.scroll, self.layout.pane_at(event.x, event.y))
                else {
                    return;
                };
                let (dx, dy) = info.deltas(WHEEL_SCROLL, event.modifiers.shift);
                self.scroll_pane(pane, dx, dy);
            }
            MouseAction::Down if event.button == MouseButton::Left => {
                if let Some(button) = self.layout.button_at(event.x, event.y) {
                    match button {
                        ButtonId::Copy => self.copy(),
                        ButtonId::Download => self.download(),
                    }
                } else if let Some(pane) = self.layout.pane_at(event.x, event.y) {
                    self.set_focus(pane);
                }
            }
            _ => {}
        }
    }

    /// Scroll one pane by a delta. Returns `true` if it moved.
    pub fn scroll_pane(&mut self, pane: PaneId, delta_left: isize, delta_top: isize) -> bool {
        let scrolled = match pane {
            PaneId::Source => self.editor.scroll_by(delta_left, delta_top),
            PaneId::Ast => self.ast_pane.scroll_by(delta_left, delta_top),
            PaneId::Debug => self.debug_pane.scroll_by(delta_left, delta_top),
            PaneId::Whitespace => self.whitespace_pane.scroll_by(delta_left, delta_top),
        };
        if scrolled {
            self.on_pane_scrolled(pane);
        }
        scrolled
    }

    /// Scroll event: the overlay follows the Whitespace surface.
    fn on_pane_scrolled(&mut self, pane: PaneId) {
        if pane == PaneId::Whitespace {
            self.mirror.on_scroll(&self.whitespace_pane);
        }
        self.dirty = true;
    }

    fn set_focus(&mut self, pane: PaneId) {
        if self.focus != pane {
            self.focus = pane;
            self.dirty = true;
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        match PaneLayout::compute(width, height) {
            Ok(layout) => self.layout = layout,
            Err(err) => {
                warn!(error = %err, width, height, "layout failed; keeping previous");
                return;
            }
        }
        self.size = (width, height);

        let inner = self.layout.pane_inner(PaneId::Source);
        self.editor.set_viewport(inner.width, inner.height, &self.metrics);
        for (pane, id) in [
            (&mut self.ast_pane, PaneId::Ast),
            (&mut self.debug_pane, PaneId::Debug),
            (&mut self.whitespace_pane, PaneId::Whitespace),
        ] {
            let inner = self.layout.pane_inner(id);
            pane.set_viewport(inner.width, inner.height);
        }
        self.mirror.on_scroll(&self.whitespace_pane);
        self.dirty = true;
    }

    // =========================================================================
    // Export
    // =========================================================================

    fn copy(&mut self) {
        let snapshot = self.output.current();
        if self.export.copy(&snapshot) {
            self.status = Some(format!("Copied {} bytes", snapshot.encoded_output.len()));
            self.dirty = true;
        }
    }

    fn download(&mut self) {
        let snapshot = self.output.current();
        if let Some(path) = self.export.download(&snapshot) {
            self.status = Some(format!("Saved {}", path.display()));
            self.dirty = true;
        }
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    /// Paint the whole screen into `buffer`.
    pub fn draw(&mut self, buffer: &mut FrameBuffer) {
        let (w, h) = self.size;
        if buffer.width() != w || buffer.height() != h {
            buffer.resize(w, h);
        }
        buffer.clear();
        let theme = &self.theme;

        for id in PaneId::ALL {
            let outer = self.layout.pane(id);
            let border = if id == self.focus {
                theme.border_focus
            } else {
                theme.border
            };
            buffer.draw_border(&outer, border);
            if outer.width > 2 {
                let title = truncate_text(id.title(), outer.width - 2);
                buffer.draw_text(outer.x + 1, outer.y, &title, theme.title, &outer);
            }
        }

        let cursor = (self.focus == PaneId::Source).then_some(theme.cursor);
        self.editor
            .draw(buffer, self.layout.pane_inner(PaneId::Source), &self.metrics, theme.text, cursor);
        self.ast_pane
            .draw(buffer, self.layout.pane_inner(PaneId::Ast), &self.metrics, theme.text);
        self.debug_pane
            .draw(buffer, self.layout.pane_inner(PaneId::Debug), &self.metrics, theme.text);

        let glyphs = self.glyphs.glyphs();
        OverlayRenderer::new(self.metrics, theme).draw(
            buffer,
            self.layout.pane_inner(PaneId::Whitespace),
            &glyphs,
            self.mirror.offset(),
        );

        for id in ButtonId::ALL {
            draw_button(buffer, self.layout.button(id), id, theme.button);
        }

        let status_rect = self.layout.status();
        let (text, style) = match &self.status {
            Some(message) => (message.as_str(), theme.status_ok),
            None if self.debouncer.is_pending() || self.invoker.is_in_flight() => {
                ("transforming…", theme.text_muted)
            }
            None => (KEY_HINT, theme.text_muted),
        };
        let text = truncate_text(text, status_rect.width);
        buffer.draw_text(status_rect.x, status_rect.y, &text, style, &status_rect);

        self.dirty = false;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn editor(&self) -> &SourceEditor {
        &self.editor
    }

    /// Latest accepted snapshot.
    pub fn output(&self) -> Rc<TransformOutput> {
        self.output.current()
    }

    /// Number of accepted snapshots so far.
    pub fn generation(&self) -> u64 {
        self.output.generation()
    }

    pub fn glyphs(&self) -> Rc<Vec<ClassifiedGlyph>> {
        self.glyphs.glyphs()
    }

    pub fn whitespace_pane(&self) -> &TextPane {
        &self.whitespace_pane
    }

    pub fn mirror(&self) -> &ScrollMirror {
        &self.mirror
    }

    pub fn layout(&self) -> &PaneLayout {
        &self.layout
    }

    pub fn focus(&self) -> PaneId {
        self.focus
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_transform_pending(&self) -> bool {
        self.debouncer.is_pending() || self.invoker.is_in_flight()
    }
}

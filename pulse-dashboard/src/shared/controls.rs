//! Input controls: ticker field, lookback slider and portfolio field.
//!
//! Edits are local until committed. Enter commits, leaving an edited field commits,
//! and slider moves commit once the slider has been idle for [`SLIDER_DEBOUNCE`].

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use pulse_data::LookbackDays;

use super::state::DashboardInputs;

/// Idle time after the last slider move before it commits
pub const SLIDER_DEBOUNCE: Duration = Duration::from_millis(600);

/// Which control receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tickers,
    Days,
    Portfolio,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Tickers => Focus::Days,
            Focus::Days => Focus::Portfolio,
            Focus::Portfolio => Focus::Tickers,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Tickers => Focus::Portfolio,
            Focus::Days => Focus::Tickers,
            Focus::Portfolio => Focus::Days,
        }
    }
}

/// Result of handling a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    /// Nothing to do
    None,
    /// A control changed but nothing was committed yet
    Edited,
    /// Committed inputs changed; rerun the dashboard
    Commit,
    /// Rerun with the committed inputs even though nothing changed
    Rerun,
    Quit,
}

/// Single line text input with a cursor (char index)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    cursor: usize,
}

impl TextField {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Apply an editing key. Returns whether the key was consumed.
    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => self.insert(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.left(),
            KeyCode::Right => self.right(),
            KeyCode::Home => self.home(),
            KeyCode::End => self.end(),
            _ => return false,
        }
        true
    }
}

/// The dashboard's input panel
#[derive(Debug, Clone)]
pub struct Controls {
    tickers: TextField,
    days: LookbackDays,
    portfolio: TextField,
    focus: Focus,
    /// Last slider move not yet committed
    slider_moved_at: Option<Instant>,
    committed: DashboardInputs,
}

impl Controls {
    pub fn new(inputs: DashboardInputs) -> Self {
        Self {
            tickers: TextField::new(inputs.tickers.clone()),
            days: inputs.days,
            portfolio: TextField::new(inputs.portfolio.clone()),
            focus: Focus::Tickers,
            slider_moved_at: None,
            committed: inputs,
        }
    }

    pub fn tickers(&self) -> &TextField {
        &self.tickers
    }

    pub fn days(&self) -> LookbackDays {
        self.days
    }

    pub fn portfolio(&self) -> &TextField {
        &self.portfolio
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Values currently shown, committed or not
    pub fn current(&self) -> DashboardInputs {
        DashboardInputs {
            tickers: self.tickers.value().to_string(),
            days: self.days,
            portfolio: self.portfolio.value().to_string(),
        }
    }

    /// Values of the last commit, i.e. what the dashboard should show
    pub fn committed(&self) -> &DashboardInputs {
        &self.committed
    }

    /// Whether shown values differ from the committed ones
    pub fn is_dirty(&self) -> bool {
        self.current() != self.committed
    }

    fn commit(&mut self) -> ControlAction {
        self.slider_moved_at = None;
        let current = self.current();
        if current == self.committed {
            return ControlAction::None;
        }
        self.committed = current;
        ControlAction::Commit
    }

    fn move_slider(&mut self, delta: i32, now: Instant) -> ControlAction {
        self.set_days(self.days.saturating_add(delta), now)
    }

    fn set_days(&mut self, days: LookbackDays, now: Instant) -> ControlAction {
        if days == self.days {
            return ControlAction::None;
        }
        self.days = days;
        self.slider_moved_at = Some(now);
        ControlAction::Edited
    }

    /// Commit a slider change once it has been idle for [`SLIDER_DEBOUNCE`]
    pub fn poll_debounce(&mut self, now: Instant) -> ControlAction {
        match self.slider_moved_at {
            Some(moved_at) if now.duration_since(moved_at) >= SLIDER_DEBOUNCE => self.commit(),
            _ => ControlAction::None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> ControlAction {
        if key.kind != KeyEventKind::Press {
            return ControlAction::None;
        }

        match key.code {
            KeyCode::Esc => return ControlAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return ControlAction::Quit;
            }
            KeyCode::F(5) => {
                self.commit();
                return ControlAction::Rerun;
            }
            KeyCode::Enter => return self.commit(),
            KeyCode::Tab => {
                let action = self.commit();
                self.focus = self.focus.next();
                return action;
            }
            KeyCode::BackTab => {
                let action = self.commit();
                self.focus = self.focus.prev();
                return action;
            }
            _ => {}
        }

        match self.focus {
            Focus::Tickers => edited(self.tickers.handle_key(&key)),
            Focus::Portfolio => edited(self.portfolio.handle_key(&key)),
            Focus::Days => match key.code {
                KeyCode::Left => self.move_slider(-1, now),
                KeyCode::Right => self.move_slider(1, now),
                KeyCode::Down => self.move_slider(-10, now),
                KeyCode::Up => self.move_slider(10, now),
                KeyCode::PageDown => self.move_slider(-30, now),
                KeyCode::PageUp => self.move_slider(30, now),
                KeyCode::Home => self.set_days(LookbackDays::min(), now),
                KeyCode::End => self.set_days(LookbackDays::max(), now),
                _ => ControlAction::None,
            },
        }
    }
}

fn edited(consumed: bool) -> ControlAction {
    if consumed {
        ControlAction::Edited
    } else {
        ControlAction::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(controls: &mut Controls, text: &str, now: Instant) {
        for c in text.chars() {
            controls.handle_key(press(KeyCode::Char(c)), now);
        }
    }

    #[test]
    fn test_text_field_editing() {
        let mut field = TextField::new("AAPL");
        assert_eq!(field.cursor(), 4);

        field.insert(',');
        field.home();
        field.insert('Q');
        field.right();
        field.delete();
        assert_eq!(field.value(), "QAPL,");

        field.end();
        field.backspace();
        field.backspace();
        assert_eq!(field.value(), "QAP");
        assert_eq!(field.cursor(), 3);

        field.home();
        field.backspace();
        field.left();
        assert_eq!(field.value(), "QAP");
        assert_eq!(field.cursor(), 0);
    }

    #[test]
    fn test_text_field_multibyte() {
        let mut field = TextField::new("é");
        field.insert('x');
        field.left();
        field.left();
        field.delete();
        assert_eq!(field.value(), "x");
    }

    #[test]
    fn test_typing_edits_without_commit() {
        let now = Instant::now();
        let mut controls = Controls::new(DashboardInputs::default());

        type_text(&mut controls, ", NVDA", now);

        assert_eq!(controls.current().tickers, "AAPL, TSLA, MSFT, NVDA");
        assert_eq!(controls.committed().tickers, "AAPL, TSLA, MSFT");
        assert!(controls.is_dirty());
    }

    #[test]
    fn test_enter_commits_once() {
        let now = Instant::now();
        let mut controls = Controls::new(DashboardInputs::default());
        type_text(&mut controls, ", NVDA", now);

        assert_eq!(controls.handle_key(press(KeyCode::Enter), now), ControlAction::Commit);
        assert_eq!(controls.committed().tickers, "AAPL, TSLA, MSFT, NVDA");
        assert!(!controls.is_dirty());
        assert_eq!(controls.handle_key(press(KeyCode::Enter), now), ControlAction::None);
    }

    #[test]
    fn test_quit_keys_and_q_is_text() {
        let now = Instant::now();
        let mut controls = Controls::new(DashboardInputs::default());

        assert_eq!(controls.handle_key(press(KeyCode::Char('q')), now), ControlAction::Edited);
        assert!(controls.current().tickers.ends_with('q'));
        assert_eq!(controls.handle_key(press(KeyCode::Esc), now), ControlAction::Quit);
        assert_eq!(
            controls.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), now),
            ControlAction::Quit
        );
    }

    #[test]
    fn test_tab_cycles_focus_and_commits_edits() {
        let now = Instant::now();
        let mut controls = Controls::new(DashboardInputs::default());
        assert_eq!(controls.focus(), Focus::Tickers);

        assert_eq!(controls.handle_key(press(KeyCode::Tab), now), ControlAction::None);
        assert_eq!(controls.focus(), Focus::Days);

        controls.handle_key(press(KeyCode::Tab), now);
        assert_eq!(controls.focus(), Focus::Portfolio);
        type_text(&mut controls, "SPY", now);

        assert_eq!(controls.handle_key(press(KeyCode::Tab), now), ControlAction::Commit);
        assert_eq!(controls.focus(), Focus::Tickers);
        assert_eq!(controls.committed().portfolio, "SPY");

        controls.handle_key(press(KeyCode::BackTab), now);
        assert_eq!(controls.focus(), Focus::Portfolio);
    }

    #[test]
    fn test_slider_moves_and_debounces() {
        let start = Instant::now();
        let mut controls = Controls::new(DashboardInputs::default());
        controls.handle_key(press(KeyCode::Tab), start);

        assert_eq!(controls.handle_key(press(KeyCode::Right), start), ControlAction::Edited);
        controls.handle_key(press(KeyCode::Up), start);
        assert_eq!(controls.days().get(), 191);

        // Still moving
        assert_eq!(
            controls.poll_debounce(start + Duration::from_millis(100)),
            ControlAction::None
        );
        assert_eq!(controls.committed().days.get(), 180);

        // Idle long enough
        assert_eq!(
            controls.poll_debounce(start + SLIDER_DEBOUNCE),
            ControlAction::Commit
        );
        assert_eq!(controls.committed().days.get(), 191);
        assert_eq!(
            controls.poll_debounce(start + SLIDER_DEBOUNCE * 2),
            ControlAction::None
        );
    }

    #[test]
    fn test_slider_bounds() {
        let now = Instant::now();
        let mut controls = Controls::new(DashboardInputs::default());
        controls.handle_key(press(KeyCode::Tab), now);

        controls.handle_key(press(KeyCode::End), now);
        assert_eq!(controls.days().get(), 365);
        assert_eq!(controls.handle_key(press(KeyCode::PageUp), now), ControlAction::None);

        controls.handle_key(press(KeyCode::Home), now);
        assert_eq!(controls.days().get(), 30);
        controls.handle_key(press(KeyCode::PageDown), now);
        assert_eq!(controls.days().get(), 30);
    }

    #[test]
    fn test_f5_reruns_without_changes() {
        let now = Instant::now();
        let mut controls = Controls::new(DashboardInputs::default());
        assert_eq!(controls.handle_key(press(KeyCode::F(5)), now), ControlAction::Rerun);
    }
}

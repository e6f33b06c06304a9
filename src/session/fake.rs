//! In-memory tmux stand-in shared by the session and command tests.

use std::sync::{Arc, Mutex, MutexGuard};

use super::error::{MultiplexerError, MuxResult};
use super::Multiplexer;
use crate::models::{Orientation, PaneHandle, WindowHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    HasSession(String),
    NewSession { session: String, window_name: String },
    NewWindow { session: String, window_name: String },
    ListWindows(String),
    ListPanes(WindowHandle),
    Split(WindowHandle, Orientation),
    SelectLayout(WindowHandle, String),
    KillPane(PaneHandle),
    SendKeys(PaneHandle, String),
    SendEnter(PaneHandle),
    SetOption(String, String),
    SetOptionLegacy(String, String),
    SelectWindow(WindowHandle),
    Attach(String),
}

impl Call {
    /// Whether the call changes multiplexer state.
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            Call::HasSession(_) | Call::ListWindows(_) | Call::ListPanes(_)
        )
    }
}

#[derive(Debug)]
struct FakeWindow {
    handle: WindowHandle,
    session: String,
    name: String,
    panes: Vec<PaneHandle>,
    hide_panes: bool,
}

#[derive(Debug, Default)]
struct State {
    sessions: Vec<String>,
    windows: Vec<FakeWindow>,
    next_window: u32,
    next_pane: u32,
    calls: Vec<Call>,
    omit_window_ids: bool,
    rename_created_windows: bool,
    hide_new_panes: bool,
    reject_set_option: bool,
    reject_legacy_set: bool,
    fail_kills: bool,
    fail_send_to: Option<PaneHandle>,
}

impl State {
    fn new_pane(&mut self) -> PaneHandle {
        let pane = PaneHandle::parse(&format!("%{}", self.next_pane)).unwrap();
        self.next_pane += 1;
        pane
    }

    fn create_window(&mut self, session: &str, name: &str, panes: usize, hide: bool) -> WindowHandle {
        let handle = WindowHandle::parse(&format!("@{}", self.next_window)).unwrap();
        self.next_window += 1;
        let panes = (0..panes).map(|_| self.new_pane()).collect();
        self.windows.push(FakeWindow {
            handle: handle.clone(),
            session: session.to_string(),
            name: name.to_string(),
            panes,
            hide_panes: hide,
        });
        handle
    }

    fn window_mut(&mut self, handle: &WindowHandle, args: &[&str]) -> MuxResult<&mut FakeWindow> {
        self.windows
            .iter_mut()
            .find(|w| &w.handle == handle)
            .ok_or_else(|| {
                MultiplexerError::command_failed(args, Some(1), format!("can't find window: {}", handle))
            })
    }

    fn has_pane(&self, pane: &PaneHandle) -> bool {
        self.windows.iter().any(|w| w.panes.contains(pane))
    }

    fn created(&mut self, session: &str, window_name: &str) -> Option<WindowHandle> {
        let name = if self.rename_created_windows {
            "bash".to_string()
        } else {
            window_name.to_string()
        };
        let hide = self.hide_new_panes;
        let handle = self.create_window(session, &name, 1, hide);
        (!self.omit_window_ids).then_some(handle)
    }
}

#[derive(Clone, Default)]
pub struct FakeTmux {
    state: Arc<Mutex<State>>,
}

impl FakeTmux {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Seeds an existing session holding one window with `panes` panes.
    pub fn with_session(self, session: &str, panes: usize) -> Self {
        {
            let mut state = self.state();
            state.sessions.push(session.to_string());
            state.create_window(session, "bash", panes, false);
        }
        self
    }

    /// Creation commands succeed but never report the new window id.
    pub fn without_window_ids(self) -> Self {
        self.state().omit_window_ids = true;
        self
    }

    /// Created windows show up under a different name than requested.
    pub fn renaming_windows(self) -> Self {
        self.state().rename_created_windows = true;
        self
    }

    /// The first pane listing of a newly created window comes back empty.
    pub fn hiding_new_panes(self) -> Self {
        self.state().hide_new_panes = true;
        self
    }

    pub fn rejecting_set_option(self, legacy_too: bool) -> Self {
        {
            let mut state = self.state();
            state.reject_set_option = true;
            state.reject_legacy_set = legacy_too;
        }
        self
    }

    pub fn failing_kills(self) -> Self {
        self.state().fail_kills = true;
        self
    }

    pub fn failing_send_to(self, pane: &str) -> Self {
        self.state().fail_send_to = PaneHandle::parse(pane);
        self
    }

    /// Adds a window to an existing session and returns its handle.
    pub fn add_window(&self, session: &str, name: &str, panes: usize) -> WindowHandle {
        self.state().create_window(session, name, panes, false)
    }

    pub fn panes(&self, window: &WindowHandle) -> Vec<PaneHandle> {
        self.state()
            .windows
            .iter()
            .find(|w| &w.handle == window)
            .map(|w| w.panes.clone())
            .unwrap_or_default()
    }

    pub fn windows_in(&self, session: &str) -> Vec<(WindowHandle, String)> {
        self.state()
            .windows
            .iter()
            .filter(|w| w.session == session)
            .map(|w| (w.handle.clone(), w.name.clone()))
            .collect()
    }

    pub fn sessions(&self) -> Vec<String> {
        self.state().sessions.clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state().calls.iter().filter(|c| pred(c)).count()
    }

    pub fn splits(&self) -> usize {
        self.count(|c| matches!(c, Call::Split(..)))
    }

    pub fn kills(&self) -> usize {
        self.count(|c| matches!(c, Call::KillPane(_)))
    }

    fn record(&self, call: Call) {
        self.state().calls.push(call);
    }
}

fn failed(args: &[&str], stderr: &str) -> MultiplexerError {
    MultiplexerError::command_failed(args, Some(1), stderr)
}

#[async_trait::async_trait]
impl Multiplexer for FakeTmux {
    async fn has_session(&self, session: &str) -> bool {
        self.record(Call::HasSession(session.to_string()));
        self.state().sessions.iter().any(|s| s == session)
    }

    async fn new_session(
        &self,
        session: &str,
        window_name: &str,
    ) -> MuxResult<Option<WindowHandle>> {
        self.record(Call::NewSession {
            session: session.to_string(),
            window_name: window_name.to_string(),
        });
        let mut state = self.state();
        if state.sessions.iter().any(|s| s == session) {
            return Err(failed(
                &["new-session", "-s", session],
                &format!("duplicate session: {}", session),
            ));
        }
        state.sessions.push(session.to_string());
        Ok(state.created(session, window_name))
    }

    async fn new_window(
        &self,
        session: &str,
        window_name: &str,
    ) -> MuxResult<Option<WindowHandle>> {
        self.record(Call::NewWindow {
            session: session.to_string(),
            window_name: window_name.to_string(),
        });
        let mut state = self.state();
        if !state.sessions.iter().any(|s| s == session) {
            return Err(failed(
                &["new-window", "-t", session],
                &format!("can't find session: {}", session),
            ));
        }
        Ok(state.created(session, window_name))
    }

    async fn list_windows(&self, session: &str) -> MuxResult<Vec<(WindowHandle, String)>> {
        self.record(Call::ListWindows(session.to_string()));
        Ok(self.windows_in(session))
    }

    async fn list_panes(&self, window: &WindowHandle) -> MuxResult<Vec<PaneHandle>> {
        self.record(Call::ListPanes(window.clone()));
        let mut state = self.state();
        let window = state.window_mut(window, &["list-panes", "-t", window.as_str()])?;
        if window.hide_panes {
            window.hide_panes = false;
            return Ok(Vec::new());
        }
        Ok(window.panes.clone())
    }

    async fn split_window(&self, window: &WindowHandle, orientation: Orientation) -> MuxResult<()> {
        self.record(Call::Split(window.clone(), orientation));
        let mut state = self.state();
        let pane = state.new_pane();
        state
            .window_mut(window, &["split-window", "-t", window.as_str()])?
            .panes
            .push(pane);
        Ok(())
    }

    async fn select_layout(&self, window: &WindowHandle, layout: &str) -> MuxResult<()> {
        self.record(Call::SelectLayout(window.clone(), layout.to_string()));
        self.state()
            .window_mut(window, &["select-layout", "-t", window.as_str()])?;
        Ok(())
    }

    async fn kill_pane(&self, pane: &PaneHandle) -> MuxResult<()> {
        self.record(Call::KillPane(pane.clone()));
        let mut state = self.state();
        let args = ["kill-pane", "-t", pane.as_str()];
        if state.fail_kills || !state.has_pane(pane) {
            return Err(failed(&args, &format!("can't find pane: {}", pane)));
        }
        for window in state.windows.iter_mut() {
            window.panes.retain(|p| p != pane);
        }
        Ok(())
    }

    async fn send_keys(&self, pane: &PaneHandle, text: &str) -> MuxResult<()> {
        self.record(Call::SendKeys(pane.clone(), text.to_string()));
        let state = self.state();
        if state.fail_send_to.as_ref() == Some(pane) || !state.has_pane(pane) {
            return Err(failed(
                &["send-keys", "-t", pane.as_str()],
                &format!("can't find pane: {}", pane),
            ));
        }
        Ok(())
    }

    async fn send_enter(&self, pane: &PaneHandle) -> MuxResult<()> {
        self.record(Call::SendEnter(pane.clone()));
        if !self.state().has_pane(pane) {
            return Err(failed(
                &["send-keys", "-t", pane.as_str(), "C-m"],
                &format!("can't find pane: {}", pane),
            ));
        }
        Ok(())
    }

    async fn set_global_option(&self, name: &str, value: &str) -> MuxResult<()> {
        self.record(Call::SetOption(name.to_string(), value.to_string()));
        if self.state().reject_set_option {
            return Err(failed(&["set-option", "-g", name, value], "unknown option"));
        }
        Ok(())
    }

    async fn set_global_option_legacy(&self, name: &str, value: &str) -> MuxResult<()> {
        self.record(Call::SetOptionLegacy(name.to_string(), value.to_string()));
        if self.state().reject_legacy_set {
            return Err(failed(&["set", "-g", name, value], "unknown option"));
        }
        Ok(())
    }

    async fn select_window(&self, window: &WindowHandle) -> MuxResult<()> {
        self.record(Call::SelectWindow(window.clone()));
        self.state()
            .window_mut(window, &["select-window", "-t", window.as_str()])?;
        Ok(())
    }

    async fn attach_session(&self, session: &str) -> MuxResult<()> {
        self.record(Call::Attach(session.to_string()));
        if !self.state().sessions.iter().any(|s| s == session) {
            return Err(failed(
                &["attach-session", "-t", session],
                &format!("can't find session: {}", session),
            ));
        }
        Ok(())
    }
}

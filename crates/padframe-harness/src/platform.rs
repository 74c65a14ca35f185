#![forbid(unsafe_code)]

//! Deterministic scripted platform.
//!
//! [`ScriptedPlatform`] implements every platform seam in memory: the test
//! (or demo) scripts pad/touch state, injects lifecycle notices and keyboard
//! completions, and advances a virtual clock through a [`ScriptHandle`],
//! while every operation the runtime performs is recorded for assertion.
//!
//! The handle and the platform share state through `Rc<RefCell<..>>`; the
//! platform side is moved into the `Window`, the handle side stays with the
//! test.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::Duration;

use padframe_core::event::{DisplayMode, FocusHandling, KeyboardReply, LifecycleNotice};
use padframe_core::framebuffer::Framebuffer;
use padframe_core::geometry::{Size, Viewport};
use padframe_core::pad::{Buttons, PadSnapshot};
use padframe_core::platform::{ConfigAttribs, Gpu, KeyboardConfig, KeyboardOverlay, Platform};
use padframe_core::touch::{MAX_TOUCH_POINTS, TouchSample};

/// Error produced by scripted failure injection.
#[derive(Debug, Clone)]
pub struct ScriptError(pub &'static str);

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ScriptError {}

/// One recorded platform operation, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    AcquireWindow,
    SetWindowDimensions(Size),
    SetWindowCrop(Size),
    InitializeDisplay,
    ChooseConfigs,
    CreateWindowSurface(usize),
    CreateContext(usize),
    MakeCurrent,
    ReleaseCurrent,
    Present,
    SwapBuffers,
    DestroySurface,
    DestroyContext,
    TerminateDisplay,
    HookLifecycle,
    UnhookLifecycle,
    SetFocusHandling(FocusHandling),
    LockExit,
    UnlockExit,
    ConfigurePad,
    InitTouch,
    KeyboardCreate,
    KeyboardUpdate,
    KeyboardSetText(String),
    KeyboardSetCursor(usize),
    KeyboardAppear,
    KeyboardDisappear,
    EnterConsole,
    ConsolePrint(String),
    ConsoleFlush,
    ExitConsole,
}

/// One recorded present call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentRecord {
    /// Logical framebuffer dimensions at present time.
    pub logical: Size,
    /// Scale and letterbox position used.
    pub viewport: Viewport,
    /// Physical target dimensions.
    pub target: Size,
}

#[derive(Debug)]
struct ScriptState {
    // Pad script.
    held: Buttons,
    prev_held: Buttons,
    // Touch script: full hardware report; the platform writes at most
    // MAX_TOUCH_POINTS but reports the full count.
    touches: Vec<TouchSample>,
    // Lifecycle.
    lifecycle_tx: Option<Sender<LifecycleNotice>>,
    main_loop: bool,
    mode: DisplayMode,
    // Keyboard.
    keyboard_supported: bool,
    keyboard_update_fails: bool,
    keyboard_tx: Option<Sender<KeyboardReply>>,
    // Virtual monotonic clock.
    now: Duration,
    // GPU script.
    configs: Vec<ConfigAttribs>,
    fail_display_init: bool,
    fail_window: bool,
    fail_surface: bool,
    fail_context: bool,
    fail_bind: bool,
    // Recordings.
    ops: Vec<Op>,
    presents: Vec<PresentRecord>,
    console: Vec<String>,
    exit_locks: i32,
}

impl Default for ScriptState {
    fn default() -> Self {
        Self {
            held: Buttons::empty(),
            prev_held: Buttons::empty(),
            touches: Vec::new(),
            lifecycle_tx: None,
            main_loop: true,
            mode: DisplayMode::Handheld,
            keyboard_supported: true,
            keyboard_update_fails: false,
            keyboard_tx: None,
            now: Duration::ZERO,
            configs: vec![ConfigAttribs::new(8, 8, 8, 0)],
            fail_display_init: false,
            fail_window: false,
            fail_surface: false,
            fail_context: false,
            fail_bind: false,
            ops: Vec::new(),
            presents: Vec::new(),
            console: Vec::new(),
            exit_locks: 0,
        }
    }
}

/// The platform half: moved into the `Window`.
#[derive(Debug)]
pub struct ScriptedPlatform {
    state: Rc<RefCell<ScriptState>>,
}

/// The test half: scripts inputs and inspects recordings.
#[derive(Debug, Clone)]
pub struct ScriptHandle {
    state: Rc<RefCell<ScriptState>>,
}

/// Scripted keyboard overlay session.
#[derive(Debug)]
pub struct ScriptedKeyboard {
    state: Rc<RefCell<ScriptState>>,
}

impl ScriptedPlatform {
    /// Create a platform/handle pair in handheld mode with an exact
    /// 8/8/8/0 config available and the keyboard supported.
    #[must_use]
    pub fn new() -> (Self, ScriptHandle) {
        let state = Rc::new(RefCell::new(ScriptState::default()));
        (
            Self {
                state: Rc::clone(&state),
            },
            ScriptHandle { state },
        )
    }
}

impl ScriptHandle {
    // --- Pad scripting ---

    /// Hold the given buttons down (in addition to those already held).
    pub fn press(&self, buttons: Buttons) {
        self.state.borrow_mut().held |= buttons;
    }

    /// Release the given buttons.
    pub fn release(&self, buttons: Buttons) {
        let mut state = self.state.borrow_mut();
        state.held &= !buttons;
    }

    /// Replace the held mask entirely.
    pub fn set_held(&self, buttons: Buttons) {
        self.state.borrow_mut().held = buttons;
    }

    // --- Touch scripting ---

    /// Script the touch report for subsequent frames, in panel-native
    /// coordinates. More than [`MAX_TOUCH_POINTS`] entries scripts an
    /// over-reporting panel.
    pub fn set_touches(&self, samples: &[(i32, i32)]) {
        self.state.borrow_mut().touches = samples
            .iter()
            .map(|&(x, y)| TouchSample::new(x, y))
            .collect();
    }

    /// Lift all fingers.
    pub fn clear_touches(&self) {
        self.state.borrow_mut().touches.clear();
    }

    // --- Lifecycle scripting ---

    /// Deliver a lifecycle notice into the hooked mailbox. Dropped when no
    /// window has hooked yet.
    pub fn notify(&self, notice: LifecycleNotice) {
        let tx = self.state.borrow().lifecycle_tx.clone();
        if let Some(tx) = tx {
            let _ = tx.send(notice);
        }
    }

    /// Switch display modes: updates the reported mode and delivers the
    /// notice.
    pub fn change_display_mode(&self, mode: DisplayMode) {
        self.state.borrow_mut().mode = mode;
        self.notify(LifecycleNotice::OperationModeChanged(mode));
    }

    /// Set the mode reported at window-open time (before any hook).
    pub fn set_initial_mode(&self, mode: DisplayMode) {
        self.state.borrow_mut().mode = mode;
    }

    /// Make the OS main-loop signal report false from now on.
    pub fn end_main_loop(&self) {
        self.state.borrow_mut().main_loop = false;
    }

    // --- Keyboard scripting ---

    /// Script a console without keyboard-overlay support (set before open).
    pub fn set_keyboard_supported(&self, supported: bool) {
        self.state.borrow_mut().keyboard_supported = supported;
    }

    /// Make every subsequent overlay update fail.
    pub fn fail_keyboard_updates(&self) {
        self.state.borrow_mut().keyboard_update_fails = true;
    }

    /// Deliver a committed-text completion.
    pub fn commit_text(&self, text: &str) {
        let tx = self.state.borrow().keyboard_tx.clone();
        if let Some(tx) = tx {
            let _ = tx.send(KeyboardReply::Submitted(text.to_owned()));
        }
    }

    /// Deliver a cancelled completion.
    pub fn cancel_keyboard(&self) {
        let tx = self.state.borrow().keyboard_tx.clone();
        if let Some(tx) = tx {
            let _ = tx.send(KeyboardReply::Cancelled);
        }
    }

    // --- Clock ---

    /// Advance the virtual monotonic clock.
    pub fn advance(&self, delta: Duration) {
        self.state.borrow_mut().now += delta;
    }

    // --- GPU scripting ---

    /// Replace the configurations the display driver offers.
    pub fn set_configs(&self, configs: Vec<ConfigAttribs>) {
        self.state.borrow_mut().configs = configs;
    }

    /// Fail display initialization.
    pub fn fail_display_init(&self) {
        self.state.borrow_mut().fail_display_init = true;
    }

    /// Fail native-window acquisition.
    pub fn fail_window(&self) {
        self.state.borrow_mut().fail_window = true;
    }

    /// Fail window-surface creation.
    pub fn fail_surface(&self) {
        self.state.borrow_mut().fail_surface = true;
    }

    /// Fail context creation.
    pub fn fail_context(&self) {
        self.state.borrow_mut().fail_context = true;
    }

    /// Fail binding the surface current.
    pub fn fail_bind(&self) {
        self.state.borrow_mut().fail_bind = true;
    }

    // --- Recordings ---

    /// All recorded operations, in call order.
    #[must_use]
    pub fn ops(&self) -> Vec<Op> {
        self.state.borrow().ops.clone()
    }

    /// Drain the recorded operations, leaving the log empty.
    pub fn take_ops(&self) -> Vec<Op> {
        std::mem::take(&mut self.state.borrow_mut().ops)
    }

    /// All recorded presents, in call order.
    #[must_use]
    pub fn presents(&self) -> Vec<PresentRecord> {
        self.state.borrow().presents.clone()
    }

    /// Text printed to the fatal console.
    #[must_use]
    pub fn console_lines(&self) -> Vec<String> {
        self.state.borrow().console.clone()
    }

    /// Net exit-lock count (locks minus unlocks).
    #[must_use]
    pub fn exit_locks(&self) -> i32 {
        self.state.borrow().exit_locks
    }

    /// The most recently requested focus-handling mode.
    #[must_use]
    pub fn last_focus_handling(&self) -> Option<FocusHandling> {
        self.state
            .borrow()
            .ops
            .iter()
            .rev()
            .find_map(|op| match op {
                Op::SetFocusHandling(mode) => Some(*mode),
                _ => None,
            })
    }
}

impl Gpu for ScriptedPlatform {
    type Error = ScriptError;

    fn acquire_window(&mut self) -> Result<(), ScriptError> {
        let mut state = self.state.borrow_mut();
        state.ops.push(Op::AcquireWindow);
        if state.fail_window {
            return Err(ScriptError("no default window"));
        }
        Ok(())
    }

    fn set_window_dimensions(&mut self, size: Size) {
        self.state.borrow_mut().ops.push(Op::SetWindowDimensions(size));
    }

    fn set_window_crop(&mut self, size: Size) {
        self.state.borrow_mut().ops.push(Op::SetWindowCrop(size));
    }

    fn initialize_display(&mut self) -> Result<(), ScriptError> {
        let mut state = self.state.borrow_mut();
        state.ops.push(Op::InitializeDisplay);
        if state.fail_display_init {
            return Err(ScriptError("display init refused"));
        }
        Ok(())
    }

    fn choose_configs(&mut self) -> Result<Vec<ConfigAttribs>, ScriptError> {
        let mut state = self.state.borrow_mut();
        state.ops.push(Op::ChooseConfigs);
        Ok(state.configs.clone())
    }

    fn create_window_surface(&mut self, config: usize) -> Result<(), ScriptError> {
        let mut state = self.state.borrow_mut();
        state.ops.push(Op::CreateWindowSurface(config));
        if state.fail_surface {
            return Err(ScriptError("surface creation refused"));
        }
        Ok(())
    }

    fn create_context(&mut self, config: usize) -> Result<(), ScriptError> {
        let mut state = self.state.borrow_mut();
        state.ops.push(Op::CreateContext(config));
        if state.fail_context {
            return Err(ScriptError("context creation refused"));
        }
        Ok(())
    }

    fn make_current(&mut self) -> Result<(), ScriptError> {
        let mut state = self.state.borrow_mut();
        state.ops.push(Op::MakeCurrent);
        if state.fail_bind {
            return Err(ScriptError("bind refused"));
        }
        Ok(())
    }

    fn release_current(&mut self) {
        self.state.borrow_mut().ops.push(Op::ReleaseCurrent);
    }

    fn present(&mut self, frame: &Framebuffer, viewport: Viewport, target: Size) {
        let mut state = self.state.borrow_mut();
        state.ops.push(Op::Present);
        state.presents.push(PresentRecord {
            logical: frame.size(),
            viewport,
            target,
        });
    }

    fn swap_buffers(&mut self) {
        self.state.borrow_mut().ops.push(Op::SwapBuffers);
    }

    fn destroy_surface(&mut self) {
        self.state.borrow_mut().ops.push(Op::DestroySurface);
    }

    fn destroy_context(&mut self) {
        self.state.borrow_mut().ops.push(Op::DestroyContext);
    }

    fn terminate_display(&mut self) {
        self.state.borrow_mut().ops.push(Op::TerminateDisplay);
    }
}

impl Platform for ScriptedPlatform {
    type Keyboard = ScriptedKeyboard;

    fn hook_lifecycle(&mut self) -> Receiver<LifecycleNotice> {
        let (tx, rx) = channel();
        let mut state = self.state.borrow_mut();
        state.lifecycle_tx = Some(tx);
        state.ops.push(Op::HookLifecycle);
        rx
    }

    fn unhook_lifecycle(&mut self) {
        let mut state = self.state.borrow_mut();
        state.lifecycle_tx = None;
        state.ops.push(Op::UnhookLifecycle);
    }

    fn main_loop(&mut self) -> bool {
        self.state.borrow().main_loop
    }

    fn operation_mode(&mut self) -> DisplayMode {
        self.state.borrow().mode
    }

    fn set_focus_handling(&mut self, mode: FocusHandling) {
        self.state.borrow_mut().ops.push(Op::SetFocusHandling(mode));
    }

    fn lock_exit(&mut self) {
        let mut state = self.state.borrow_mut();
        state.exit_locks += 1;
        state.ops.push(Op::LockExit);
    }

    fn unlock_exit(&mut self) {
        let mut state = self.state.borrow_mut();
        state.exit_locks -= 1;
        state.ops.push(Op::UnlockExit);
    }

    fn configure_pad(&mut self) {
        self.state.borrow_mut().ops.push(Op::ConfigurePad);
    }

    fn update_pad(&mut self) -> PadSnapshot {
        let mut state = self.state.borrow_mut();
        let held = state.held;
        let pressed = held & !state.prev_held;
        state.prev_held = held;
        PadSnapshot::new(held, pressed)
    }

    fn init_touch(&mut self) {
        self.state.borrow_mut().ops.push(Op::InitTouch);
    }

    fn sample_touch(&mut self, out: &mut [TouchSample; MAX_TOUCH_POINTS]) -> usize {
        let state = self.state.borrow();
        for (slot, sample) in out.iter_mut().zip(state.touches.iter()) {
            *slot = *sample;
        }
        state.touches.len()
    }

    fn create_keyboard(&mut self) -> Option<(ScriptedKeyboard, Receiver<KeyboardReply>)> {
        let mut state = self.state.borrow_mut();
        if !state.keyboard_supported {
            return None;
        }
        let (tx, rx) = channel();
        state.keyboard_tx = Some(tx);
        state.ops.push(Op::KeyboardCreate);
        drop(state);
        Some((
            ScriptedKeyboard {
                state: Rc::clone(&self.state),
            },
            rx,
        ))
    }

    fn now(&self) -> Duration {
        self.state.borrow().now
    }

    fn enter_console(&mut self) {
        self.state.borrow_mut().ops.push(Op::EnterConsole);
    }

    fn console_print(&mut self, text: &str) {
        let mut state = self.state.borrow_mut();
        state.console.push(text.to_owned());
        state.ops.push(Op::ConsolePrint(text.to_owned()));
    }

    fn console_flush(&mut self) {
        self.state.borrow_mut().ops.push(Op::ConsoleFlush);
    }

    fn exit_console(&mut self) {
        self.state.borrow_mut().ops.push(Op::ExitConsole);
    }
}

impl KeyboardOverlay for ScriptedKeyboard {
    type Error = ScriptError;

    fn update(&mut self) -> Result<(), ScriptError> {
        let mut state = self.state.borrow_mut();
        state.ops.push(Op::KeyboardUpdate);
        if state.keyboard_update_fails {
            return Err(ScriptError("overlay update refused"));
        }
        Ok(())
    }

    fn set_input_text(&mut self, text: &str) {
        self.state
            .borrow_mut()
            .ops
            .push(Op::KeyboardSetText(text.to_owned()));
    }

    fn set_cursor(&mut self, position: usize) {
        self.state
            .borrow_mut()
            .ops
            .push(Op::KeyboardSetCursor(position));
    }

    fn appear(&mut self, _config: &KeyboardConfig) {
        self.state.borrow_mut().ops.push(Op::KeyboardAppear);
    }

    fn disappear(&mut self) {
        self.state.borrow_mut().ops.push(Op::KeyboardDisappear);
    }
}

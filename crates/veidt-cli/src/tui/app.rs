//! Application state and logic

use tracing::warn;
use veidt_core::ui::{ImageRotator, Modal, ToastQueue};
use veidt_core::{enroll, Config, Notice, Plan, RecordStore, SignupForm, User};

/// Input field of the signup dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Password,
}

impl Field {
    /// All fields in tab order
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Password];

    /// Move to the next field (wrapping)
    pub fn next(self) -> Self {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Password,
            Field::Password => Field::Name,
        }
    }

    /// Move to the previous field (wrapping)
    pub fn prev(self) -> Self {
        match self {
            Field::Name => Field::Password,
            Field::Email => Field::Name,
            Field::Password => Field::Email,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Full name",
            Field::Email => "Email",
            Field::Password => "Password",
        }
    }
}

/// Contents of the open signup dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupDialog {
    /// Plan picked from the pricing card
    pub plan: Plan,
    pub form: SignupForm,
    /// Field receiving typed characters
    pub focus: Field,
}

impl SignupDialog {
    pub fn new(plan: Plan) -> Self {
        Self {
            plan,
            form: SignupForm::default(),
            focus: Field::Name,
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.form.name,
            Field::Email => &self.form.email,
            Field::Password => &self.form.password,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Name => &mut self.form.name,
            Field::Email => &mut self.form.email,
            Field::Password => &mut self.form.password,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_field(&mut self) {
        self.focus = self.focus.prev();
    }
}

/// Application state
pub struct App {
    /// Whether the app should exit
    pub should_quit: bool,
    /// Whether help overlay is visible
    pub show_help: bool,
    /// Signup dialog, open while a plan is being joined
    pub signup: Modal<SignupDialog>,
    /// Visible notifications
    pub toasts: ToastQueue,
    /// Landing page image carousel
    pub rotator: ImageRotator,
    /// Member registered during this session
    pub member: Option<User>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            should_quit: false,
            show_help: false,
            signup: Modal::new(),
            toasts: ToastQueue::new(config.toast_ttl()),
            rotator: ImageRotator::landing(config.rotator_interval()),
            member: None,
        }
    }

    /// Start background timers once the landing page is on screen
    pub fn mount(&mut self) {
        self.rotator.start();
    }

    /// Open the signup dialog for `plan`, replacing any open one
    pub fn open_signup(&mut self, plan: Plan) {
        self.signup.open(SignupDialog::new(plan));
    }

    /// Register the member typed into the dialog
    ///
    /// On success the dialog closes. On failure it stays open with the
    /// input intact. Either way the outcome is shown as a toast.
    pub fn submit_signup<R: RecordStore>(&mut self, store: &R) {
        let Some(dialog) = self.signup.content() else {
            return;
        };

        let outcome = enroll(store, &dialog.form, Some(dialog.plan));
        let notice = Notice::from_outcome(&outcome);

        match outcome {
            Ok(enrollment) => {
                self.signup.close();
                self.member = Some(enrollment.user);
            }
            Err(e) => {
                warn!(error = %e, "signup failed");
            }
        }

        self.notify(notice);
    }

    pub fn notify(&mut self, notice: Notice) {
        self.toasts.add(notice.title, notice.description);
    }

    /// Dismiss the oldest visible toast
    pub fn dismiss_oldest_toast(&mut self) -> bool {
        match self.toasts.snapshot().first() {
            Some(toast) => self.toasts.dismiss(toast.id),
            None => false,
        }
    }

    /// Pause or resume the gallery's automatic advance
    pub fn toggle_rotation(&mut self) {
        if self.rotator.is_running() {
            self.rotator.stop();
        } else {
            self.rotator.start();
        }
    }

    pub fn next_image(&self) {
        self.rotator.advance();
    }

    pub fn prev_image(&self) {
        let len = self.rotator.len();
        if len > 0 {
            self.rotator.select((self.rotator.index() + len - 1) % len);
        }
    }
}

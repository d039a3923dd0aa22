//! Route identifiers and the navigation/notification seams.

/// The fixed set of navigation targets the gate can send a user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Sign-in entry point of the auth section.
    SignIn,
    /// Sign-up entry point of the auth section.
    SignUp,
    /// Main application entry point (streams tab).
    App,
}

impl Route {
    /// Path identifier understood by the shell's router.
    pub fn path(self) -> &'static str {
        match self {
            Route::SignIn => "/sign-in",
            Route::SignUp => "/sign-up",
            Route::App => "/streams",
        }
    }
}

/// Injected navigation capability. `replace` swaps the current screen
/// without growing the history stack.
pub trait Router: Send + Sync {
    fn replace(&self, route: Route);
}

/// Injected user-notification capability (dismissible alerts).
pub trait Notifier: Send + Sync {
    /// Show a dismissible alert.
    fn alert(&self, title: &str, message: &str);

    /// Show an alert with an explicit recovery action (e.g. "Restart").
    fn alert_with_recovery(&self, title: &str, message: &str, recovery: &str) {
        // Shells without action buttons fold the recovery hint into the body.
        self.alert(title, message);
        let _ = recovery;
    }
}

impl<T: Router + ?Sized> Router for std::sync::Arc<T> {
    fn replace(&self, route: Route) {
        (**self).replace(route);
    }
}

impl<T: Notifier + ?Sized> Notifier for std::sync::Arc<T> {
    fn alert(&self, title: &str, message: &str) {
        (**self).alert(title, message);
    }

    fn alert_with_recovery(&self, title: &str, message: &str, recovery: &str) {
        (**self).alert_with_recovery(title, message, recovery);
    }
}

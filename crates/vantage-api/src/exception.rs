// Exception screens shown for denied, missing, and failed pages

use std::fmt::{Display, Formatter};

/// Route of the home page, the recovery target of every exception screen
pub const HOME_PATH: &str = "/";

/// Kind of exception screen
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExceptionKind {
    Forbidden,
    NotFound,
    ServerError,
}

impl ExceptionKind {
    pub fn status(self) -> u16 {
        match self {
            ExceptionKind::Forbidden => 403,
            ExceptionKind::NotFound => 404,
            ExceptionKind::ServerError => 500,
        }
    }

    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            403 => Some(ExceptionKind::Forbidden),
            404 => Some(ExceptionKind::NotFound),
            500..=599 => Some(ExceptionKind::ServerError),
            _ => None,
        }
    }

    /// Route path of the screen, e.g. `/exception/403`
    pub fn route_path(self) -> String {
        format!("/exception/{}", self.status())
    }

    pub fn view(self) -> ExceptionView {
        let (title, description) = match self {
            ExceptionKind::Forbidden => ("403", "Sorry, you are not authorized to access this page."),
            ExceptionKind::NotFound => ("404", "Sorry, the page you visited does not exist."),
            ExceptionKind::ServerError => ("500", "Sorry, the server is reporting an error."),
        };

        ExceptionView {
            kind: self,
            title: title.to_string(),
            description: description.to_string(),
            action: RecoveryAction::NavigateHome,
        }
    }
}

/// The single action offered on an exception screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecoveryAction {
    NavigateHome,
}

impl RecoveryAction {
    pub fn label(self) -> &'static str {
        match self {
            RecoveryAction::NavigateHome => "Back Home",
        }
    }

    pub fn target(self) -> &'static str {
        match self {
            RecoveryAction::NavigateHome => HOME_PATH,
        }
    }
}

/// Content of an exception screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExceptionView {
    pub kind: ExceptionKind,
    pub title: String,
    pub description: String,
    pub action: RecoveryAction,
}

impl ExceptionView {
    /// Replace the stock description, e.g. with a server-provided message
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Display for ExceptionView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} ({} -> {})",
            self.title,
            self.description,
            self.action.label(),
            self.action.target()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exception_status_mapping() {
        assert_eq!(ExceptionKind::Forbidden.status(), 403);
        assert_eq!(ExceptionKind::from_status(404), Some(ExceptionKind::NotFound));
        assert_eq!(ExceptionKind::from_status(502), Some(ExceptionKind::ServerError));
        assert_eq!(ExceptionKind::from_status(400), None);
        assert_eq!(ExceptionKind::NotFound.route_path(), "/exception/404");
    }

    #[test]
    fn test_every_view_navigates_home() {
        for kind in [
            ExceptionKind::Forbidden,
            ExceptionKind::NotFound,
            ExceptionKind::ServerError,
        ] {
            let view = kind.view();
            assert_eq!(view.kind, kind);
            assert_eq!(view.action, RecoveryAction::NavigateHome);
            assert_eq!(view.action.target(), HOME_PATH);
        }
    }

    #[test]
    fn test_view_display() {
        let view = ExceptionKind::NotFound
            .view()
            .with_description("order ord-404 not found");
        assert_eq!(
            view.to_string(),
            "[404] order ord-404 not found (Back Home -> /)"
        );
    }
}

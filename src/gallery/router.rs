/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Welcome,
    InApp,
}

/// One-way `Welcome -> InApp` switch. There is no way back.
#[derive(Debug, Clone, Default)]
pub struct ScreenRouter {
    screen: Screen,
}

impl ScreenRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Leave the welcome screen.
    ///
    /// Returns true only on the transition itself, which is when the in-app
    /// entry action must run. Later calls are no-ops.
    pub fn explore(&mut self) -> bool {
        match self.screen {
            Screen::Welcome => {
                self.screen = Screen::InApp;
                tracing::info!("Entering in-app screen");
                true
            }
            Screen::InApp => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_welcome() {
        assert_eq!(ScreenRouter::new().screen(), Screen::Welcome);
    }

    #[test]
    fn test_explore_fires_entry_once() {
        let mut router = ScreenRouter::new();

        assert!(router.explore());
        assert!(!router.explore());
        assert!(!router.explore());
        assert_eq!(router.screen(), Screen::InApp);
    }
}

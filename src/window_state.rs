use crate::{MAIN_WINDOW_LABEL, SPLASH_WINDOW_LABEL};

/// Splash and main window handles owned by the shell. At most one of each is
/// live at a time.
#[derive(Debug)]
pub(crate) struct WindowRegistry<W> {
    splash: Option<W>,
    main: Option<W>,
    main_revealed: bool,
}

/// What to do once the main window content is ready.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum MainReady<W> {
    /// First ready signal: tear down `splash` and show the main window.
    Reveal { splash: Option<W> },
    AlreadyShown,
}

impl<W> Default for WindowRegistry<W> {
    fn default() -> Self {
        Self {
            splash: None,
            main: None,
            main_revealed: false,
        }
    }
}

impl<W> WindowRegistry<W> {
    pub(crate) fn attach_splash(&mut self, window: W) -> Result<(), W> {
        if self.splash.is_some() {
            return Err(window);
        }
        self.splash = Some(window);
        Ok(())
    }

    pub(crate) fn attach_main(&mut self, window: W) -> Result<(), W> {
        if self.main.is_some() {
            return Err(window);
        }
        self.main = Some(window);
        Ok(())
    }

    pub(crate) fn take_splash(&mut self) -> Option<W> {
        self.splash.take()
    }

    pub(crate) fn clear_splash(&mut self) {
        self.splash = None;
    }

    pub(crate) fn clear_main(&mut self) {
        self.main = None;
        self.main_revealed = false;
    }

    pub(crate) fn mark_main_ready(&mut self) -> MainReady<W> {
        if self.main_revealed {
            return MainReady::AlreadyShown;
        }
        self.main_revealed = true;
        MainReady::Reveal {
            splash: self.take_splash(),
        }
    }

    /// Drops the handle registered under `label`. Returns `true` for the main
    /// window.
    pub(crate) fn forget_window(&mut self, label: &str) -> bool {
        match label {
            MAIN_WINDOW_LABEL => {
                self.clear_main();
                true
            }
            SPLASH_WINDOW_LABEL => {
                self.clear_splash();
                false
            }
            _ => false,
        }
    }

    pub(crate) fn has_main(&self) -> bool {
        self.main.is_some()
    }

    pub(crate) fn has_splash(&self) -> bool {
        self.splash.is_some()
    }

    pub(crate) fn main(&self) -> Option<&W> {
        self.main.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::{MainReady, WindowRegistry};

    #[test]
    fn attach_splash_refuses_second_live_splash() {
        let mut registry = WindowRegistry::default();
        assert!(registry.attach_splash("splash-1").is_ok());
        assert_eq!(registry.attach_splash("splash-2"), Err("splash-2"));
        assert!(registry.has_splash());
    }

    #[test]
    fn take_splash_leaves_no_splash_behind() {
        let mut registry = WindowRegistry::default();
        registry.attach_splash("splash").expect("first splash");
        registry.attach_main("main").expect("first main");

        assert_eq!(registry.take_splash(), Some("splash"));
        assert!(!registry.has_splash());
        assert!(registry.has_main());
        assert_eq!(registry.take_splash(), None);
    }

    #[test]
    fn clear_main_allows_recreation() {
        let mut registry = WindowRegistry::default();
        registry.attach_main("main-1").expect("first main");
        assert_eq!(registry.attach_main("main-2"), Err("main-2"));

        registry.clear_main();
        assert!(!registry.has_main());
        assert!(registry.attach_main("main-3").is_ok());
        assert_eq!(registry.main(), Some(&"main-3"));
    }

    #[test]
    fn clear_splash_is_idempotent() {
        let mut registry: WindowRegistry<&str> = WindowRegistry::default();
        registry.clear_splash();
        registry.clear_splash();
        assert!(!registry.has_splash());
    }

    #[test]
    fn main_ready_tears_down_splash_and_reveals_once() {
        let mut registry = WindowRegistry::default();
        registry.attach_splash("splash").expect("splash");
        registry.attach_main("main").expect("main");

        assert_eq!(
            registry.mark_main_ready(),
            MainReady::Reveal {
                splash: Some("splash"),
            }
        );
        assert!(!registry.has_splash());
        assert!(registry.has_main());

        assert_eq!(registry.mark_main_ready(), MainReady::AlreadyShown);
    }

    #[test]
    fn recreated_main_window_is_revealed_again() {
        let mut registry = WindowRegistry::default();
        registry.attach_main("main-1").expect("main");
        registry.mark_main_ready();

        assert!(registry.forget_window("main"));
        assert!(!registry.has_main());

        registry.attach_main("main-2").expect("recreated main");
        assert_eq!(registry.mark_main_ready(), MainReady::Reveal { splash: None });
    }

    #[test]
    fn forget_window_clears_splash_and_ignores_unknown_labels() {
        let mut registry = WindowRegistry::default();
        registry.attach_splash("splash").expect("splash");
        registry.attach_main("main").expect("main");

        assert!(!registry.forget_window("devtools"));
        assert!(registry.has_splash());
        assert!(registry.has_main());

        assert!(!registry.forget_window("splash"));
        assert!(!registry.has_splash());
        assert!(registry.has_main());
    }
}

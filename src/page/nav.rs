//! Mobile navigation menu
//!
//! Two states, closed and open. Opening locks page scrolling.

/// Terminal width (columns) at which the inline "desktop" nav replaces the menu
pub const DESKTOP_BREAKPOINT: u16 = 100;

/// Icon shown while closed
pub const MENU_ICON: char = '☰';
/// Icon shown while open
pub const CLOSE_ICON: char = '✕';

/// Mobile navigation state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MobileNav {
    open: bool,
    /// Link cursor while the menu is open
    cursor: usize,
    /// Number of links in the menu
    links: usize,
}

impl MobileNav {
    pub fn new(links: usize) -> Self {
        Self {
            open: false,
            cursor: 0,
            links,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// `active` visual class on the nav container
    pub fn is_active(&self) -> bool {
        self.open
    }

    pub fn icon(&self) -> char {
        if self.open {
            CLOSE_ICON
        } else {
            MENU_ICON
        }
    }

    /// Page scroll is locked while the menu is open
    pub fn scroll_locked(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        if !self.open {
            self.open = true;
            self.cursor = 0;
            tracing::debug!("mobile nav opened");
        }
    }

    pub fn close(&mut self) {
        if self.open {
            self.open = false;
            tracing::debug!("mobile nav closed");
        }
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Click handling: a click outside the nav region (and not on its toggle) closes it.
    /// Returns true if the menu was closed.
    pub fn click_outside(&mut self, inside_nav: bool, on_toggle: bool) -> bool {
        if self.open && !inside_nav && !on_toggle {
            self.close();
            true
        } else {
            false
        }
    }

    /// Escape closes an open menu. Returns true if consumed.
    pub fn escape(&mut self) -> bool {
        if self.open {
            self.close();
            true
        } else {
            false
        }
    }

    /// Terminal resized; wide layouts have no mobile menu
    pub fn resized(&mut self, width: u16) {
        if width >= DESKTOP_BREAKPOINT {
            self.close();
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.links > 0 && self.cursor < self.links - 1 {
            self.cursor += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initially_closed() {
        let nav = MobileNav::new(4);
        assert!(!nav.is_open());
        assert!(!nav.scroll_locked());
        assert_eq!(nav.icon(), MENU_ICON);
    }

    #[test]
    fn test_open_close_restores() {
        let mut nav = MobileNav::new(4);
        let before = (nav.scroll_locked(), nav.icon(), nav.is_active());

        nav.open();
        assert!(nav.scroll_locked());
        assert!(nav.is_active());
        assert_eq!(nav.icon(), CLOSE_ICON);

        nav.close();
        assert_eq!((nav.scroll_locked(), nav.icon(), nav.is_active()), before);
    }

    #[test]
    fn test_toggle_dispatch() {
        let mut nav = MobileNav::new(1);
        nav.toggle();
        assert!(nav.is_open());
        nav.toggle();
        assert!(!nav.is_open());
    }

    #[test]
    fn test_click_outside() {
        let mut nav = MobileNav::new(3);
        assert!(!nav.click_outside(false, false)); // closed: nothing to do

        nav.open();
        assert!(!nav.click_outside(true, false));
        assert!(nav.is_open());
        assert!(!nav.click_outside(false, true));
        assert!(nav.is_open());
        assert!(nav.click_outside(false, false));
        assert!(!nav.is_open());
    }

    #[test]
    fn test_escape_only_when_open() {
        let mut nav = MobileNav::new(3);
        assert!(!nav.escape());
        nav.open();
        assert!(nav.escape());
        assert!(!nav.is_open());
    }

    #[test]
    fn test_resize_to_desktop_closes() {
        let mut nav = MobileNav::new(3);
        nav.open();
        nav.resized(80);
        assert!(nav.is_open());
        nav.resized(DESKTOP_BREAKPOINT);
        assert!(!nav.is_open());
    }

    #[test]
    fn test_cursor_bounds() {
        let mut nav = MobileNav::new(2);
        nav.open();
        nav.cursor_up();
        assert_eq!(nav.cursor(), 0);
        nav.cursor_down();
        nav.cursor_down();
        assert_eq!(nav.cursor(), 1);
        nav.cursor_up();
        assert_eq!(nav.cursor(), 0);
    }
}

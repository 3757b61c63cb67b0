//! Drawer

/// Visibility of the cart drawer. UI-only, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Drawer {
    /// Drawer hidden
    #[default]
    Closed,

    /// Drawer shown
    Open,
}

impl Drawer {
    /// Show the drawer.
    pub fn open(&mut self) {
        *self = Drawer::Open;
    }

    /// Hide the drawer.
    pub fn close(&mut self) {
        *self = Drawer::Closed;
    }

    /// Flip between open and closed.
    pub fn toggle(&mut self) {
        *self = match self {
            Drawer::Open => Drawer::Closed,
            Drawer::Closed => Drawer::Open,
        };
    }

    /// Whether the drawer is currently shown.
    pub fn is_open(self) -> bool {
        self == Drawer::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        assert_eq!(Drawer::default(), Drawer::Closed);
    }

    #[test]
    fn open_and_close_are_idempotent() {
        let mut drawer = Drawer::default();

        drawer.open();
        drawer.open();
        assert!(drawer.is_open());

        drawer.close();
        drawer.close();
        assert!(!drawer.is_open());
    }

    #[test]
    fn toggle_flips_state() {
        let mut drawer = Drawer::Closed;

        drawer.toggle();
        assert_eq!(drawer, Drawer::Open);

        drawer.toggle();
        assert_eq!(drawer, Drawer::Closed);
    }
}

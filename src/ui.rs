//! Main menu model
//!
//! Two stacked buttons navigated with the keyboard. The highlighted button
//! is the "hovered" one; confirming it yields its action.

/// What a menu button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Start,
    Quit,
}

/// Keyboard input the menu understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    Up,
    Down,
    Confirm,
    /// Jump straight to an action (hotkeys)
    Choose(MenuAction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: &'static str,
    pub action: MenuAction,
}

#[derive(Debug, Clone)]
pub struct Menu {
    pub title: &'static str,
    pub buttons: Vec<Button>,
    selected: usize,
}

impl Default for Menu {
    fn default() -> Self {
        Self {
            title: "Sky Hop",
            buttons: vec![
                Button {
                    label: "Start Game",
                    action: MenuAction::Start,
                },
                Button {
                    label: "Quit",
                    action: MenuAction::Quit,
                },
            ],
            selected: 0,
        }
    }
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_hovered(&self, index: usize) -> bool {
        self.selected == index
    }

    /// Feed one input; returns an action once one is chosen
    pub fn handle(&mut self, input: MenuInput) -> Option<MenuAction> {
        let count = self.buttons.len();
        if count == 0 {
            return None;
        }
        match input {
            MenuInput::Up => {
                self.selected = (self.selected + count - 1) % count;
                None
            }
            MenuInput::Down => {
                self.selected = (self.selected + 1) % count;
                None
            }
            MenuInput::Confirm => self.buttons.get(self.selected).map(|b| b.action),
            MenuInput::Choose(action) => {
                if let Some(idx) = self.buttons.iter().position(|b| b.action == action) {
                    self.selected = idx;
                }
                Some(action)
            }
        }
    }
}

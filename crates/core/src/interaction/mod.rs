//! Direct user input: the mobile menu, service cards, form fields, plus the
//! one-off decorations applied at start-up.

pub mod cards;
pub mod decor;
pub mod forms;
pub mod menu;

pub use cards::ServiceCardSelector;
pub use forms::FormFieldAffordances;
pub use menu::{MenuState, MenuTrigger, MobileMenuController};

/// Identity of a dialog; at most one dialog per id is open at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalId {
    RowDetails,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Every header/value pair of one table row
    RowDetails { row: usize },
    Help,
}

impl Modal {
    pub fn id(&self) -> ModalId {
        match self {
            Modal::RowDetails { .. } => ModalId::RowDetails,
            Modal::Help => ModalId::Help,
        }
    }
}

/// Open dialogs, topmost last
#[derive(Debug, Clone, Default)]
pub struct Modals {
    open: Vec<Modal>,
}

impl Modals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `modal` on top, replacing an open dialog with the same id
    pub fn show(&mut self, modal: Modal) {
        self.hide(modal.id());
        self.open.push(modal);
    }

    /// Close the dialog with `id`; closing one that is not open is a no-op
    pub fn hide(&mut self, id: ModalId) {
        self.open.retain(|m| m.id() != id);
    }

    pub fn hide_all(&mut self) {
        self.open.clear();
    }

    pub fn top(&self) -> Option<&Modal> {
        self.open.last()
    }

    pub fn is_open(&self, id: ModalId) -> bool {
        self.open.iter().any(|m| m.id() == id)
    }

    pub fn any_open(&self) -> bool {
        !self.open.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_replaces_same_id() {
        let mut modals = Modals::new();
        modals.show(Modal::RowDetails { row: 1 });
        modals.show(Modal::Help);
        modals.show(Modal::RowDetails { row: 4 });

        assert_eq!(modals.top(), Some(&Modal::RowDetails { row: 4 }));
        modals.hide(ModalId::RowDetails);
        assert_eq!(modals.top(), Some(&Modal::Help));
    }

    #[test]
    fn test_hide_missing_is_noop() {
        let mut modals = Modals::new();
        modals.hide(ModalId::Help);
        assert!(!modals.any_open());
    }

    #[test]
    fn test_hide_all() {
        let mut modals = Modals::new();
        modals.show(Modal::Help);
        modals.show(Modal::RowDetails { row: 0 });
        modals.hide_all();
        assert!(!modals.is_open(ModalId::Help));
        assert!(!modals.any_open());
    }
}

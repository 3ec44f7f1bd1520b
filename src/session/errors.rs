use uuid::Uuid;

/// A failure waiting to be shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    pub id: Uuid,
    pub message: String,
}

/// Dismissible error banners in the order they were raised.
#[derive(Debug, Default)]
pub struct ErrorQueue {
    entries: Vec<ErrorEntry>,
}

impl ErrorQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Repeated messages are kept as separate entries.
    pub fn push(&mut self, message: impl Into<String>) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.push(ErrorEntry {
            id,
            message: message.into(),
        });
        id
    }

    /// Remove one entry. Returns false if no entry has this id.
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn oldest(&self) -> Option<&ErrorEntry> {
        self.entries.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ErrorEntry> {
        self.entries.iter()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.message.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

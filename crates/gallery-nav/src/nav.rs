use shared::{PictureRecord, PictureSequence, empty_sequence};

/// Current position inside a shared picture sequence.
///
/// Every move wraps around the ends instead of clamping, and the index is
/// `None` exactly when the sequence is empty.
#[derive(Debug, Clone)]
pub struct NavState {
    pictures: PictureSequence,
    cur_idx: Option<usize>,
}

impl Default for NavState {
    fn default() -> Self {
        Self {
            pictures: empty_sequence(),
            cur_idx: None,
        }
    }
}

impl NavState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&PictureRecord> {
        self.cur_idx.and_then(|idx| self.pictures.get(idx))
    }

    pub fn index(&self) -> Option<usize> {
        self.cur_idx
    }

    pub fn total(&self) -> usize {
        self.pictures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pictures.is_empty()
    }

    pub fn pictures(&self) -> PictureSequence {
        self.pictures.clone()
    }

    /// Swaps the backing sequence, keeping the index when it is still in range.
    pub fn set_pictures(&mut self, pictures: PictureSequence) {
        self.pictures = pictures;
        self.cur_idx = match self.cur_idx {
            _ if self.pictures.is_empty() => None,
            Some(idx) if idx < self.pictures.len() => Some(idx),
            _ => Some(0),
        };
    }

    pub fn position_of(&self, identifier: &str) -> Option<usize> {
        self.pictures
            .iter()
            .position(|record| record.identifier() == identifier)
    }

    /// Moves to `index` modulo the sequence length, so `-1` is the last picture.
    pub fn go_to(&mut self, index: i64) -> Option<&PictureRecord> {
        if self.pictures.is_empty() {
            return None;
        }

        let len = self.pictures.len() as i64;
        self.cur_idx = Some(index.rem_euclid(len) as usize);
        self.current()
    }

    /// Leaves the position untouched when nothing matches.
    pub fn go_to_identifier(&mut self, identifier: &str) -> Option<&PictureRecord> {
        let idx = self.position_of(identifier)?;
        self.cur_idx = Some(idx);
        self.current()
    }

    pub fn go_next(&mut self) -> Option<&PictureRecord> {
        let current = self.cur_idx.unwrap_or_default() as i64;
        self.go_to(current + 1)
    }

    pub fn go_prev(&mut self) -> Option<&PictureRecord> {
        let current = self.cur_idx.unwrap_or_default() as i64;
        self.go_to(current - 1)
    }
}

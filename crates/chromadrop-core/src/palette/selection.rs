//! Ordered set of palette colors picked for a gradient.

use serde::{Deserialize, Serialize};

/// Colors chosen from the palette, in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSelection {
    colors: Vec<String>,
}

impl ColorSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the color if absent, remove it if present.
    /// Returns true if the color is selected afterwards.
    pub fn toggle(&mut self, hex: &str) -> bool {
        if let Some(pos) = self.colors.iter().position(|c| c == hex) {
            self.colors.remove(pos);
            false
        } else {
            self.colors.push(hex.to_string());
            true
        }
    }

    pub fn contains(&self, hex: &str) -> bool {
        self.colors.iter().any(|c| c == hex)
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn clear(&mut self) {
        self.colors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_preserves_insertion_order() {
        let mut selection = ColorSelection::new();
        assert!(selection.toggle("#ff0000"));
        assert!(selection.toggle("#00ff00"));
        assert!(selection.toggle("#0000ff"));
        assert!(!selection.toggle("#00ff00"));
        assert_eq!(selection.colors(), ["#ff0000", "#0000ff"]);

        assert!(selection.toggle("#00ff00"));
        assert_eq!(selection.colors(), ["#ff0000", "#0000ff", "#00ff00"]);
    }

    #[test]
    fn test_clear() {
        let mut selection = ColorSelection::new();
        selection.toggle("#123456");
        assert!(selection.contains("#123456"));
        selection.clear();
        assert!(selection.is_empty());
        assert_eq!(selection.len(), 0);
    }
}

//! Comic assembly and editing.
//!
//! A [`Comic`] owns the story it was built from and the editable panel
//! list. Building from a story always replaces the whole panel list; the
//! editing operations keep `panels[i].position == i`.

use crate::core::current_timestamp;
use crate::core::panel::{ComicPanel, Panel};
use crate::core::story::Story;
use crate::core::style::ArtStyle;
use crate::error::{Result, ValidationError};
use crate::segmenting::Segmenter;
use serde::{Deserialize, Serialize};

/// A comic being edited.
///
/// # Examples
///
/// ```
/// use panelize::core::{ArtStyle, Comic, Story};
/// use panelize::segmenting::SentenceSegmenter;
///
/// let story = Story::new("A. B. C.");
/// let comic = Comic::from_story("demo", story, &SentenceSegmenter::new(), ArtStyle::Anime);
/// assert_eq!(comic.panel_count(), 2);
/// assert_eq!(comic.panels[1].text, "C");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comic {
    /// Comic title.
    pub title: String,

    /// Story the panels were segmented from.
    pub story: Story,

    /// Panels in display order.
    pub panels: Vec<ComicPanel>,

    /// Unix timestamp when the comic was created.
    pub created_at: i64,

    /// Unix timestamp of the last edit.
    pub updated_at: i64,
}

impl Comic {
    /// Creates an empty comic.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        let now = current_timestamp();
        Self {
            title: title.into(),
            story: Story::default(),
            panels: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a comic by segmenting `story`, giving every panel `style`.
    #[must_use]
    pub fn from_story(
        title: impl Into<String>,
        story: Story,
        segmenter: &dyn Segmenter,
        style: ArtStyle,
    ) -> Self {
        let mut comic = Self::new(title);
        comic.resegment(story, segmenter, style);
        comic
    }

    /// Replaces the story and rebuilds every panel from it.
    ///
    /// Previous panels, including their dialogue, are discarded.
    pub fn resegment(&mut self, story: Story, segmenter: &dyn Segmenter, style: ArtStyle) {
        let panels = segmenter.panels(&story.text);
        self.set_panels(panels, style);
        self.story = story;
    }

    /// Replaces the panel list with freshly identified segmented panels.
    pub fn set_panels(&mut self, panels: Vec<Panel>, style: ArtStyle) {
        self.panels = panels
            .into_iter()
            .map(|panel| ComicPanel::from_panel(panel, style))
            .collect();
        self.renumber();
        self.touch();
    }

    /// Number of panels.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Returns whether the comic has no panels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Looks up a panel by identifier.
    #[must_use]
    pub fn panel(&self, id: &str) -> Option<&ComicPanel> {
        self.panels.iter().find(|p| p.id == id)
    }

    /// Appends a placeholder panel and returns its identifier.
    pub fn add_panel(&mut self, style: ArtStyle) -> String {
        let panel = ComicPanel::placeholder(style, self.panels.len());
        let id = panel.id.clone();
        self.panels.push(panel);
        self.touch();
        id
    }

    /// Removes a panel and closes the gap in positions.
    pub fn remove_panel(&mut self, id: &str) -> Result<ComicPanel> {
        let index = self.index_of(id)?;
        let removed = self.panels.remove(index);
        self.renumber();
        self.touch();
        Ok(removed)
    }

    /// Replaces a panel's caption.
    pub fn update_text(&mut self, id: &str, text: impl Into<String>) -> Result<()> {
        let index = self.index_of(id)?;
        self.panels[index].text = text.into();
        self.touch();
        Ok(())
    }

    /// Sets one panel's illustration style.
    pub fn set_style(&mut self, id: &str, style: ArtStyle) -> Result<()> {
        let index = self.index_of(id)?;
        self.panels[index].style = style;
        self.touch();
        Ok(())
    }

    /// Sets every panel's illustration style.
    pub fn set_all_styles(&mut self, style: ArtStyle) {
        for panel in &mut self.panels {
            panel.style = style;
        }
        self.touch();
    }

    /// Appends a dialogue line to a panel.
    pub fn add_dialogue(&mut self, id: &str, line: impl Into<String>) -> Result<()> {
        let index = self.index_of(id)?;
        self.panels[index].dialogues.push(line.into());
        self.touch();
        Ok(())
    }

    /// Removes the dialogue line at `line_index` from a panel.
    pub fn remove_dialogue(&mut self, id: &str, line_index: usize) -> Result<String> {
        let index = self.index_of(id)?;
        let dialogues = &mut self.panels[index].dialogues;
        if line_index >= dialogues.len() {
            return Err(ValidationError::OutOfRange {
                what: "dialogue",
                index: line_index,
                len: dialogues.len(),
            }
            .into());
        }
        let line = dialogues.remove(line_index);
        self.touch();
        Ok(line)
    }

    /// Moves a panel to `new_position`, shifting the panels in between.
    pub fn move_panel(&mut self, id: &str, new_position: usize) -> Result<()> {
        let index = self.index_of(id)?;
        if new_position >= self.panels.len() {
            return Err(ValidationError::OutOfRange {
                what: "position",
                index: new_position,
                len: self.panels.len(),
            }
            .into());
        }
        let panel = self.panels.remove(index);
        self.panels.insert(new_position, panel);
        self.renumber();
        self.touch();
        Ok(())
    }

    /// Checks that there is something to export.
    pub fn export_ready(&self) -> Result<()> {
        if self.is_empty() {
            return Err(ValidationError::NoPanels.into());
        }
        Ok(())
    }

    /// Returns the distinct panel styles in the order they first appear.
    #[must_use]
    pub fn styles(&self) -> Vec<ArtStyle> {
        let mut styles = Vec::new();
        for panel in &self.panels {
            if !styles.contains(&panel.style) {
                styles.push(panel.style);
            }
        }
        styles
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.panels
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| ValidationError::PanelNotFound { id: id.to_string() }.into())
    }

    fn renumber(&mut self) {
        for (position, panel) in self.panels.iter_mut().enumerate() {
            panel.position = position;
        }
    }

    fn touch(&mut self) {
        self.updated_at = current_timestamp();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::panel::NEW_PANEL_TEXT;
    use crate::error::Error;
    use crate::segmenting::SentenceSegmenter;

    fn comic(text: &str) -> Comic {
        Comic::from_story(
            "test",
            Story::new(text),
            &SentenceSegmenter::new(),
            ArtStyle::Comic,
        )
    }

    fn assert_positions(comic: &Comic) {
        for (i, panel) in comic.panels.iter().enumerate() {
            assert_eq!(panel.position, i);
        }
    }

    fn panel_ids(comic: &Comic) -> Vec<String> {
        comic.panels.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_from_story() {
        let comic = comic("One! Two? Three. Four.");
        assert_eq!(comic.panel_count(), 2);
        assert_eq!(comic.panels[0].text, "One. Two");
        assert_eq!(comic.panels[1].text, "Three. Four");
        assert_eq!(comic.story.text, "One! Two? Three. Four.");
        assert_positions(&comic);
    }

    #[test]
    fn test_from_blank_story_is_empty() {
        let comic = comic("   ");
        assert!(comic.is_empty());
        assert!(matches!(
            comic.export_ready(),
            Err(Error::Validation(ValidationError::NoPanels))
        ));
    }

    #[test]
    fn test_resegment_replaces_panels() {
        let mut comic = comic("a. b. c. d.");
        let old_ids = panel_ids(&comic);
        comic.add_dialogue(&old_ids[0], "hi").unwrap();

        comic.resegment(Story::new("x. y."), &SentenceSegmenter::new(), ArtStyle::Sketch);
        assert_eq!(comic.panel_count(), 1);
        assert_eq!(comic.panels[0].text, "x. y");
        assert_eq!(comic.panels[0].style, ArtStyle::Sketch);
        assert!(comic.panels[0].dialogues.is_empty());
        assert!(comic.panel(&old_ids[0]).is_none());
    }

    #[test]
    fn test_add_panel() {
        let mut comic = comic("a. b.");
        let id = comic.add_panel(ArtStyle::Watercolor);
        let panel = comic.panel(&id).unwrap();
        assert_eq!(panel.position, 1);
        assert_eq!(panel.text, NEW_PANEL_TEXT);
        assert_eq!(panel.style, ArtStyle::Watercolor);
    }

    #[test]
    fn test_remove_panel_renumbers() {
        let mut comic = comic("a. b. c. d. e. f.");
        let ids = panel_ids(&comic);
        let removed = comic.remove_panel(&ids[0]).unwrap();
        assert_eq!(removed.text, "a. b");
        assert_eq!(comic.panel_count(), 2);
        assert_positions(&comic);
        assert_eq!(comic.panels[0].id, ids[1]);
    }

    #[test]
    fn test_remove_unknown_panel() {
        let mut comic = comic("a. b.");
        let err = comic.remove_panel("missing").unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::PanelNotFound { .. })
        ));
        assert_eq!(comic.panel_count(), 1);
    }

    #[test]
    fn test_update_text_and_style() {
        let mut comic = comic("a. b. c.");
        let ids = panel_ids(&comic);
        comic.update_text(&ids[1], "new caption").unwrap();
        comic.set_style(&ids[1], ArtStyle::Realistic).unwrap();
        assert_eq!(comic.panels[1].text, "new caption");
        assert_eq!(comic.panels[1].style, ArtStyle::Realistic);
        assert_eq!(comic.panels[0].style, ArtStyle::Comic);

        comic.set_all_styles(ArtStyle::Cartoon);
        assert!(comic.panels.iter().all(|p| p.style == ArtStyle::Cartoon));
    }

    #[test]
    fn test_dialogue() {
        let mut comic = comic("a. b.");
        let id = comic.panels[0].id.clone();
        comic.add_dialogue(&id, "Hello").unwrap();
        comic.add_dialogue(&id, "World").unwrap();
        assert_eq!(comic.panels[0].dialogues, vec!["Hello", "World"]);

        assert_eq!(comic.remove_dialogue(&id, 0).unwrap(), "Hello");
        let err = comic.remove_dialogue(&id, 5).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::OutOfRange { index: 5, len: 1, .. })
        ));
    }

    #[test]
    fn test_move_panel() {
        let mut comic = comic("a. b. c. d. e. f.");
        let ids = panel_ids(&comic);

        comic.move_panel(&ids[0], 2).unwrap();
        assert_eq!(comic.panels[2].id, ids[0]);
        assert_eq!(comic.panels[0].id, ids[1]);
        assert_positions(&comic);

        comic.move_panel(&ids[0], 0).unwrap();
        assert_eq!(panel_ids(&comic), ids);

        assert!(comic.move_panel(&ids[0], 3).is_err());
    }

    #[test]
    fn test_styles_in_first_use_order() {
        let mut comic = comic("a. b. c. d. e. f.");
        assert_eq!(comic.styles(), vec![ArtStyle::Comic]);

        let ids = panel_ids(&comic);
        comic.set_style(&ids[1], ArtStyle::Sketch).unwrap();
        comic.set_style(&ids[2], ArtStyle::Comic).unwrap();
        assert_eq!(comic.styles(), vec![ArtStyle::Comic, ArtStyle::Sketch]);

        assert!(Comic::new("empty").styles().is_empty());
    }
}

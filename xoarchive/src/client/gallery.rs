//! Gallery view model: the masonry grid of archive cards.

use crate::models::ArchiveEntry;

/// Number of skeleton cards shown while the first batch loads.
pub const PLACEHOLDER_COUNT: usize = 8;

/// One selectable card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryCard {
    pub index: usize,
    pub date_label: String,
    pub title: String,
    pub image_url: String,
}

/// Skeleton card shown while loading. Heights alternate to fill the columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderCard {
    pub index: usize,
    pub tall: bool,
}

/// What the grid shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryModel {
    Placeholders(Vec<PlaceholderCard>),
    Cards(Vec<GalleryCard>),
}

impl GalleryModel {
    pub fn cards(&self) -> &[GalleryCard] {
        match self {
            GalleryModel::Cards(cards) => cards,
            GalleryModel::Placeholders(_) => &[],
        }
    }

    pub fn placeholder_count(&self) -> usize {
        match self {
            GalleryModel::Placeholders(p) => p.len(),
            GalleryModel::Cards(_) => 0,
        }
    }
}

/// Pure view over `(entries, loading)`.
#[derive(Debug, Clone, Copy)]
pub struct GalleryView<'a> {
    entries: &'a [ArchiveEntry],
    loading: bool,
}

impl<'a> GalleryView<'a> {
    pub fn new(entries: &'a [ArchiveEntry], loading: bool) -> Self {
        Self { entries, loading }
    }

    /// Placeholders while loading with nothing to show, otherwise one card per
    /// entry. All entries are rendered at once.
    pub fn render(&self) -> GalleryModel {
        if self.loading && self.entries.is_empty() {
            return GalleryModel::Placeholders(
                (0..PLACEHOLDER_COUNT)
                    .map(|index| PlaceholderCard {
                        index,
                        tall: index % 2 == 1,
                    })
                    .collect(),
            );
        }

        GalleryModel::Cards(
            self.entries
                .iter()
                .enumerate()
                .map(|(index, entry)| GalleryCard {
                    index,
                    date_label: entry.date_label(),
                    title: entry.title.clone(),
                    image_url: entry.url.clone(),
                })
                .collect(),
        )
    }

    /// Header text describing the loaded range, newest date first.
    pub fn range_label(&self) -> String {
        if self.loading {
            return "Loading...".to_string();
        }
        match (self.entries.first(), self.entries.last()) {
            (Some(first), Some(last)) => {
                format!("{} - {}", last.date_label(), first.date_label())
            }
            _ => "...".to_string(),
        }
    }

    /// Report activation of the card at `index`.
    ///
    /// Returns whether a selection was reported. Placeholders and indices past
    /// the end report nothing.
    pub fn activate<F>(&self, index: usize, mut on_select: F) -> bool
    where
        F: FnMut(usize),
    {
        if self.loading && self.entries.is_empty() {
            return false;
        }
        if index >= self.entries.len() {
            return false;
        }
        on_select(index);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaType;

    fn entries(n: usize) -> Vec<ArchiveEntry> {
        let start: chrono::NaiveDate = "2024-01-01".parse().unwrap();
        start
            .iter_days()
            .take(n)
            .map(|date| ArchiveEntry {
                date,
                title: format!("Title {}", date),
                explanation: String::new(),
                url: format!("https://apod.nasa.gov/{}.jpg", date),
                hdurl: None,
                media_type: MediaType::Image,
                copyright: None,
            })
            .collect()
    }

    #[test]
    fn test_placeholders_while_loading_empty() {
        let model = GalleryView::new(&[], true).render();
        assert_eq!(model.placeholder_count(), PLACEHOLDER_COUNT);
        assert!(model.cards().is_empty());
    }

    #[test]
    fn test_cards_after_loading() {
        let list = entries(5);
        let model = GalleryView::new(&list, false).render();
        assert_eq!(model.placeholder_count(), 0);
        assert_eq!(model.cards().len(), 5);
        assert_eq!(model.cards()[2].index, 2);
        assert_eq!(model.cards()[2].date_label, "2024.01.03");
    }

    #[test]
    fn test_stale_cards_stay_while_reloading() {
        let list = entries(3);
        let view = GalleryView::new(&list, true);
        assert_eq!(view.render().cards().len(), 3);
        assert_eq!(view.range_label(), "Loading...");
    }

    #[test]
    fn test_empty_result_renders_nothing() {
        let model = GalleryView::new(&[], false).render();
        assert_eq!(model, GalleryModel::Cards(vec![]));
    }

    #[test]
    fn test_range_label_newest_first() {
        let list = entries(3);
        assert_eq!(
            GalleryView::new(&list, false).range_label(),
            "2024.01.03 - 2024.01.01"
        );
        assert_eq!(GalleryView::new(&[], false).range_label(), "...");
    }

    #[test]
    fn test_activate_reports_index() {
        let list = entries(4);
        let view = GalleryView::new(&list, false);
        let mut selected = Vec::new();

        assert!(view.activate(3, |i| selected.push(i)));
        assert!(!view.activate(4, |i| selected.push(i)));
        assert_eq!(selected, vec![3]);
    }

    #[test]
    fn test_activate_placeholder_reports_nothing() {
        let view = GalleryView::new(&[], true);
        let mut called = false;
        assert!(!view.activate(0, |_| called = true));
        assert!(!called);
    }
}

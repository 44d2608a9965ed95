//! Layout of the request form.
//!
//! Wide terminals put the search, quantity and return-date fields on one
//! row, the way the web form does; compact terminals stack them.
use ratatui::prelude::*;

/// Width of the `[x]` clear button drawn inside the search field.
const CLEAR_BUTTON_WIDTH: u16 = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormLayout {
    pub title: Rect,
    pub search: Rect,
    pub clear: Rect,
    pub category: Rect,
    pub quantity: Rect,
    pub return_date: Rect,
    pub status: Rect,
    pub hints: Rect,
}

impl FormLayout {
    /// Splits `area` into the form's fields.
    ///
    /// `stacked` selects the single-column arrangement used on compact screens.
    pub fn compute(area: Rect, stacked: bool) -> Self {
        let field_rows = if stacked { 4 } else { 2 };
        let mut constraints = vec![Constraint::Length(1)];
        constraints.extend(std::iter::repeat_n(Constraint::Length(3), field_rows));
        constraints.extend([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)]);
        let rows = Layout::vertical(constraints).split(area);

        let (search, quantity, return_date, category) = if stacked {
            (rows[1], rows[3], rows[4], rows[2])
        } else {
            let [search, quantity, return_date] =
                Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(20), Constraint::Percentage(30)])
                    .areas(rows[1]);
            let [category, _] = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(rows[2]);
            (search, quantity, return_date, category)
        };

        Self {
            title: rows[0],
            clear: clear_button_area(search),
            search,
            category,
            quantity,
            return_date,
            status: rows[field_rows + 1],
            hints: rows[rows.len() - 1],
        }
    }
}

/// The clear button sits on the search field's text row, just inside the right border.
fn clear_button_area(search: Rect) -> Rect {
    if search.width < CLEAR_BUTTON_WIDTH + 4 || search.height < 3 {
        return Rect::default();
    }
    Rect::new(
        search.right() - CLEAR_BUTTON_WIDTH - 2,
        search.y + 1,
        CLEAR_BUTTON_WIDTH,
        1,
    )
}

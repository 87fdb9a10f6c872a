use std::collections::BTreeSet;

use super::spec::ScatterMatrixSpec;

// ---------------------------------------------------------------------------
// Box selection on the scatter matrix
// ---------------------------------------------------------------------------

/// Axis-aligned rectangle in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRect {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl SelectionRect {
    /// Rectangle spanned by two opposite corners in any order.
    pub fn from_corners(a: [f64; 2], b: [f64; 2]) -> Self {
        SelectionRect {
            x_min: a[0].min(b[0]),
            x_max: a[0].max(b[0]),
            y_min: a[1].min(b[1]),
            y_max: a[1].max(b[1]),
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }
}

/// Indices of the points `(xs[i], ys[i])` inside `rect`.
pub fn select_in_rect(xs: &[f64], ys: &[f64], rect: &SelectionRect) -> BTreeSet<usize> {
    xs.iter()
        .zip(ys)
        .enumerate()
        .filter(|(_, (&x, &y))| rect.contains(x, y))
        .map(|(i, _)| i)
        .collect()
}

/// Cell of the matrix: `(row, col)`; row picks the y dimension, col the x.
pub type Cell = (usize, usize);

#[derive(Debug, Clone, PartialEq)]
struct ActiveDrag {
    cell: Cell,
    start: [f64; 2],
    current: [f64; 2],
}

/// Pointer input reported by one matrix cell during a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionEvent {
    Begin(Cell, [f64; 2]),
    Update([f64; 2]),
    Finish,
    Clear,
}

/// Drag-to-select state shared by all cells of the scatter matrix.
/// A selection made in one cell highlights the same records everywhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScatterSelection {
    drag: Option<ActiveDrag>,
    selected: Option<BTreeSet<usize>>,
}

impl ScatterSelection {
    pub fn begin(&mut self, cell: Cell, at: [f64; 2]) {
        self.drag = Some(ActiveDrag {
            cell,
            start: at,
            current: at,
        });
    }

    pub fn update(&mut self, at: [f64; 2]) {
        if let Some(drag) = &mut self.drag {
            drag.current = at;
        }
    }

    /// Close the drag and select every record inside the box of its cell.
    pub fn finish(&mut self, spec: &ScatterMatrixSpec) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        let (row, col) = drag.cell;
        let (Some(ydim), Some(xdim)) = (spec.dimensions.get(row), spec.dimensions.get(col)) else {
            return;
        };
        let rect = SelectionRect::from_corners(drag.start, drag.current);
        self.selected = Some(select_in_rect(&xdim.values, &ydim.values, &rect));
    }

    pub fn apply(&mut self, event: SelectionEvent, spec: &ScatterMatrixSpec) {
        match event {
            SelectionEvent::Begin(cell, at) => self.begin(cell, at),
            SelectionEvent::Update(at) => self.update(at),
            SelectionEvent::Finish => self.finish(spec),
            SelectionEvent::Clear => self.clear(),
        }
    }

    pub fn clear(&mut self) {
        self.drag = None;
        self.selected = None;
    }

    /// Rectangle being dragged in `cell`, if any.
    pub fn active_rect(&self, cell: Cell) -> Option<SelectionRect> {
        self.drag
            .as_ref()
            .filter(|d| d.cell == cell)
            .map(|d| SelectionRect::from_corners(d.start, d.current))
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn selected(&self) -> Option<&BTreeSet<usize>> {
        self.selected.as_ref()
    }

    /// Whether point `i` is drawn highlighted. Everything is highlighted
    /// while no selection exists.
    pub fn is_highlighted(&self, i: usize) -> bool {
        self.selected.as_ref().is_none_or(|s| s.contains(&i))
    }
}

// Copyright (C) 2020-2026 Andy Kurnia.

// A lane is one row (across) or one column (down). Striding along it maps a
// position within the lane to an index into the row-major board.
#[derive(Clone, Copy, Debug)]
pub struct Strider {
    base: i16,
    step: i8,
    len: i8,
}

impl Strider {
    #[inline(always)]
    pub fn len(&self) -> i8 {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn at(&self, idx: i8) -> usize {
        ((self.base as isize) + (idx as isize) * (self.step as isize)) as usize
    }

    // true iff idx..idx+len lies within the lane.
    #[inline(always)]
    pub fn fits(&self, idx: i8, len: usize) -> bool {
        idx >= 0 && (idx as isize) + (len as isize) <= self.len as isize
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dim {
    pub rows: i8,
    pub cols: i8,
}

impl Dim {
    #[inline(always)]
    pub fn across(&self, row: i8) -> Strider {
        Strider {
            base: (row as i16) * (self.cols as i16),
            step: 1,
            len: self.cols,
        }
    }

    #[inline(always)]
    pub fn down(&self, col: i8) -> Strider {
        Strider {
            base: col as i16,
            step: self.cols,
            len: self.rows,
        }
    }

    #[inline(always)]
    pub fn lane(&self, down: bool, lane: i8) -> Strider {
        if down { self.down(lane) } else { self.across(lane) }
    }

    #[inline(always)]
    pub fn num_lanes(&self, down: bool) -> i8 {
        if down { self.cols } else { self.rows }
    }

    #[inline(always)]
    pub fn area(&self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    #[inline(always)]
    pub fn contains(&self, row: i8, col: i8) -> bool {
        row >= 0 && row < self.rows && col >= 0 && col < self.cols
    }

    #[inline(always)]
    pub fn at_row_col(&self, row: i8, col: i8) -> usize {
        (((row as isize) * (self.cols as isize)) + (col as isize)) as usize
    }

    #[inline(always)]
    pub fn row_col_of(&self, idx: usize) -> (i8, i8) {
        (
            (idx / self.cols as usize) as i8,
            (idx % self.cols as usize) as i8,
        )
    }

    // orthogonal neighbours that are on the board.
    pub fn neighbors(&self, row: i8, col: i8) -> impl Iterator<Item = usize> + '_ {
        [(-1i8, 0i8), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .map(move |(dr, dc)| (row + dr, col + dc))
            .filter(move |&(r, c)| self.contains(r, c))
            .map(move |(r, c)| self.at_row_col(r, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lanes_stride_row_major() {
        let dim = Dim { rows: 15, cols: 15 };
        assert_eq!(dim.across(2).at(3), 33);
        assert_eq!(dim.down(3).at(2), 33);
        assert_eq!(dim.lane(true, 3).at(2), dim.at_row_col(2, 3));
        assert_eq!(dim.row_col_of(33), (2, 3));
    }

    #[test]
    fn fits_checks_both_ends() {
        let dim = Dim { rows: 15, cols: 15 };
        let lane = dim.across(0);
        assert!(lane.fits(12, 3));
        assert!(!lane.fits(13, 3));
        assert!(!lane.fits(-1, 2));
    }

    #[test]
    fn corner_has_two_neighbors() {
        let dim = Dim { rows: 15, cols: 15 };
        assert_eq!(dim.neighbors(0, 0).count(), 2);
        assert_eq!(dim.neighbors(7, 7).count(), 4);
        assert_eq!(dim.neighbors(14, 7).count(), 3);
    }
}

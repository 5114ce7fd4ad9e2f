//! Per-view selection and filter state.

use crate::catalog::{Catalog, FundFilter, Ipo, IpoStatus, MutualFund, Product, fund_houses};
use crate::flows::SearchField;

/// Selected row of a list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
}

impl Cursor {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Move by `delta` rows, staying within `len`.
    pub fn move_by(&mut self, delta: i32, len: usize) {
        let max = i64::try_from(len.saturating_sub(1)).unwrap_or(i64::MAX);
        self.index = (self.index as i64 + delta as i64).clamp(0, max) as usize;
    }

    pub fn top(&mut self) {
        self.index = 0;
    }

    pub fn bottom(&mut self, len: usize) {
        self.index = len.saturating_sub(1);
    }

    /// Pull the cursor back inside a list that may have shrunk.
    pub fn clamp(&mut self, len: usize) {
        self.move_by(0, len);
    }
}

/// IPO board: a status tab and the selected row within it.
#[derive(Debug, Clone, Default)]
pub struct IpoBoardState {
    pub tab: IpoStatus,
    pub cursor: Cursor,
}

impl IpoBoardState {
    pub const TABS: [IpoStatus; 3] = [IpoStatus::Open, IpoStatus::Upcoming, IpoStatus::Listed];

    pub fn visible<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Ipo> {
        catalog.ipos_with_status(self.tab)
    }

    pub fn selected<'a>(&self, catalog: &'a Catalog) -> Option<&'a Ipo> {
        self.visible(catalog).get(self.cursor.index()).copied()
    }

    pub fn cycle_tab(&mut self, forward: bool) {
        let index = Self::TABS.iter().position(|t| *t == self.tab).unwrap_or(0);
        let len = Self::TABS.len();
        let next = if forward { index + 1 } else { index + len - 1 };
        self.tab = Self::TABS[next % len];
        self.cursor.top();
    }
}

/// Allotment form: which IPO is picked and which input has focus.
#[derive(Debug, Clone, Default)]
pub struct AllotmentForm {
    /// Index into the catalog's IPO list.
    pub ipo: Option<usize>,
    pub focus: usize,
}

impl AllotmentForm {
    /// Step the IPO picker through `len` entries, starting from the first.
    pub fn cycle_ipo(&mut self, forward: bool, len: usize) {
        if len == 0 {
            self.ipo = None;
            return;
        }
        self.ipo = Some(match self.ipo {
            None if forward => 0,
            None => len - 1,
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
        });
    }

    pub fn focused_field(&self, fields: &[SearchField]) -> Option<SearchField> {
        fields.get(self.focus.min(fields.len().saturating_sub(1))).copied()
    }

    pub fn cycle_focus(&mut self, fields: &[SearchField]) {
        self.focus = if fields.is_empty() {
            0
        } else {
            (self.focus + 1) % fields.len()
        };
    }
}

/// Mutual fund table: filters and the selected row.
#[derive(Debug, Clone, Default)]
pub struct FundsState {
    pub filter: FundFilter,
    pub cursor: Cursor,
}

impl FundsState {
    pub fn visible<'a>(&self, funds: &'a [MutualFund]) -> Vec<&'a MutualFund> {
        self.filter.apply(funds)
    }

    pub fn cycle_fund_house(&mut self, funds: &[MutualFund]) {
        self.filter.cycle_fund_house(&fund_houses(funds));
        self.cursor.top();
    }

    pub fn cycle_category(&mut self) {
        self.filter.cycle_category();
        self.cursor.top();
    }

    pub fn clear(&mut self) {
        self.filter = FundFilter::default();
        self.cursor.top();
    }
}

/// Commodities page: the selected investable product.
#[derive(Debug, Clone, Default)]
pub struct CommoditiesState {
    pub cursor: Cursor,
}

impl CommoditiesState {
    pub fn selected<'a>(&self, catalog: &'a Catalog) -> Option<&'a Product> {
        catalog.products.get(self.cursor.index())
    }
}

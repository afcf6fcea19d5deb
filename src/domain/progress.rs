use log::info;

/// Progress of a season fetch, one step per month
pub struct FetchProgress {
    total: usize,
    fetched: usize,
    cached: usize,
    games: usize,
}

impl FetchProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            fetched: 0,
            cached: 0,
            games: 0,
        }
    }

    pub fn record(&mut self, was_cached: bool, games: usize) {
        if was_cached {
            self.cached += 1;
        } else {
            self.fetched += 1;
        }
        self.games += games;
        self.log_progress();
    }

    pub fn current_count(&self) -> usize {
        self.fetched + self.cached
    }

    pub fn games(&self) -> usize {
        self.games
    }

    fn log_progress(&self) {
        info!(
            "  → Months: {}/{} ({} fetched, {} cached), {} games so far",
            self.current_count(),
            self.total,
            self.fetched,
            self.cached,
            self.games
        );
    }
}

//! Date-windowed scan of the paginated listing feed.
//!
//! The feed serves fixed-size pages, newest first. Once a page contains a
//! record older than the window start, no later page can hold an in-window
//! record, so the scan stops after finishing that page. `ScanMode::FullScan`
//! disables the shortcut for feeds that break the ordering assumption.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::analysis::skills::Vocabulary;
use crate::model::Job;

/// Results per page the listing endpoint serves.
pub const PAGE_LIMIT: u32 = 50;

/// Inclusive day range a scan tallies over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("window start {start} falls after its end {end}")]
pub struct WindowError {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, WindowError> {
        if start > end {
            return Err(WindowError { start, end });
        }
        Ok(DateWindow { start, end })
    }

    /// Both bounds are inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The date falls strictly before the window.
    pub fn predates(&self, date: NaiveDate) -> bool {
        date < self.start
    }
}

/// Whether the scan may rely on the feed being ordered newest-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    EarlyStop,
    FullScan,
}

/// One page of the listing feed. Pages are numbered from 1; an empty page
/// means the feed is exhausted.
pub trait PageFetcher {
    fn fetch_page(&mut self, page: u32, limit: u32) -> Result<Vec<Job>>;
}

/// Accumulated result of one window scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillTally {
    /// Records whose publish date fell inside the window.
    pub matched: u64,
    /// Per-term match totals, in vocabulary order.
    pub totals: Vec<u64>,
}

/// Walk the feed page by page and tally skill mentions for every record
/// published inside the window.
///
/// Records without a parseable timestamp are skipped; they neither count
/// nor end the scan. The scan ends on an empty page or, under `EarlyStop`,
/// after finishing the first page holding a record older than the window
/// start. Early stop assumes the feed is ordered newest-first.
pub fn scan_window<F: PageFetcher>(
    fetcher: &mut F,
    vocabulary: &Vocabulary,
    window: &DateWindow,
    mode: ScanMode,
) -> Result<SkillTally> {
    let mut tally = SkillTally {
        matched: 0,
        totals: vec![0; vocabulary.len()],
    };
    let mut page = 1u32;
    loop {
        let jobs = fetcher
            .fetch_page(page, PAGE_LIMIT)
            .with_context(|| format!("fetching results page {page}"))?;
        if jobs.is_empty() {
            break;
        }

        let mut crossed = false;
        let mut in_window = 0usize;
        for job in &jobs {
            let Some(date) = job.published_date() else {
                debug!(id = ?job.id, "record without a parseable publish date, skipping");
                continue;
            };
            if window.contains(date) {
                in_window += 1;
                let text = format!("{} {}", job.title(), job.body());
                for (slot, count) in tally.totals.iter_mut().zip(vocabulary.count_in(&text)) {
                    *slot += count;
                }
            } else if window.predates(date) {
                crossed = true;
            }
        }
        tally.matched += in_window as u64;
        debug!(page, scanned = jobs.len(), in_window, "scanned results page");

        if crossed && mode == ScanMode::EarlyStop {
            debug!(page, "feed crossed the window start, stopping");
            break;
        }
        page += 1;
    }
    Ok(tally)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::skills::SkillCount;

    struct StubFetcher {
        pages: Vec<Vec<Job>>,
        calls: u32,
    }

    impl StubFetcher {
        fn new(pages: Vec<Vec<Job>>) -> Self {
            StubFetcher { pages, calls: 0 }
        }
    }

    impl PageFetcher for StubFetcher {
        fn fetch_page(&mut self, page: u32, _limit: u32) -> Result<Vec<Job>> {
            self.calls += 1;
            Ok(self
                .pages
                .get((page - 1) as usize)
                .cloned()
                .unwrap_or_default())
        }
    }

    struct FailingFetcher;

    impl PageFetcher for FailingFetcher {
        fn fetch_page(&mut self, _page: u32, _limit: u32) -> Result<Vec<Job>> {
            Err(anyhow::anyhow!("connection reset"))
        }
    }

    fn day(year: i32, month: u32, dayof: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, dayof).unwrap()
    }

    fn march() -> DateWindow {
        DateWindow::new(day(2024, 3, 1), day(2024, 3, 31)).unwrap()
    }

    fn dated_job(date: &str, text: &str) -> Job {
        Job {
            title: Some(text.to_string()),
            published_at: Some(format!("{date} 10:00:00")),
            ..Job::default()
        }
    }

    fn padded_to_limit(mut jobs: Vec<Job>) -> Vec<Job> {
        while (jobs.len() as u32) < PAGE_LIMIT {
            jobs.push(Job::default());
        }
        jobs
    }

    fn ranked(vocabulary: &Vocabulary, tally: &SkillTally) -> Vec<(String, u64)> {
        vocabulary
            .rank(&tally.totals)
            .into_iter()
            .map(|SkillCount { skill, count }| (skill, count))
            .collect()
    }

    fn pair(skill: &str, count: u64) -> (String, u64) {
        (skill.to_string(), count)
    }

    #[test]
    fn window_rejects_inverted_bounds() {
        let err = DateWindow::new(day(2024, 4, 1), day(2024, 3, 1)).unwrap_err();
        assert_eq!(
            err,
            WindowError {
                start: day(2024, 4, 1),
                end: day(2024, 3, 1),
            }
        );
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let window = march();
        assert!(window.contains(day(2024, 3, 1)));
        assert!(window.contains(day(2024, 3, 31)));
        assert!(!window.contains(day(2024, 2, 29)));
        assert!(!window.contains(day(2024, 4, 1)));
        assert!(window.predates(day(2024, 2, 29)));
        assert!(!window.predates(day(2024, 3, 1)));
    }

    #[test]
    fn counts_only_jobs_inside_the_window() {
        let vocabulary = Vocabulary::standard();
        let mut fetcher = StubFetcher::new(vec![vec![
            dated_job("2024-03-10", "python developer"),
            dated_job("2024-02-10", "java developer"),
            dated_job("2024-04-10", "docker engineer"),
            Job {
                title: Some("aws architect".to_string()),
                ..Job::default()
            },
        ]]);
        let tally =
            scan_window(&mut fetcher, &vocabulary, &march(), ScanMode::EarlyStop).unwrap();
        assert_eq!(tally.matched, 1);
        assert_eq!(ranked(&vocabulary, &tally), [pair("python", 1)]);
    }

    #[test]
    fn stops_after_the_page_that_crosses_the_window_start() {
        let vocabulary = Vocabulary::standard();
        let page_one = padded_to_limit(vec![
            dated_job("2024-03-02", "python role"),
            dated_job("2024-02-20", "stale record"),
        ]);
        let page_two = vec![dated_job("2024-03-01", "java role")];
        let mut fetcher = StubFetcher::new(vec![page_one, page_two]);
        let tally =
            scan_window(&mut fetcher, &vocabulary, &march(), ScanMode::EarlyStop).unwrap();
        assert_eq!(ranked(&vocabulary, &tally), [pair("python", 1)]);
        assert_eq!(fetcher.calls, 1);
    }

    #[test]
    fn finishes_scanning_the_crossing_page() {
        // The in-window record sits after the crossing one on the same page.
        let vocabulary = Vocabulary::standard();
        let page = padded_to_limit(vec![
            dated_job("2024-02-20", "stale record"),
            dated_job("2024-03-05", "react role"),
        ]);
        let mut fetcher = StubFetcher::new(vec![page]);
        let tally =
            scan_window(&mut fetcher, &vocabulary, &march(), ScanMode::EarlyStop).unwrap();
        assert_eq!(tally.matched, 1);
        assert_eq!(ranked(&vocabulary, &tally), [pair("react", 1)]);
    }

    #[test]
    fn full_scan_ignores_feed_order() {
        let vocabulary = Vocabulary::standard();
        let page_one = padded_to_limit(vec![
            dated_job("2024-03-02", "python role"),
            dated_job("2024-02-20", "stale record"),
        ]);
        let page_two = vec![dated_job("2024-03-01", "java role")];
        let mut fetcher = StubFetcher::new(vec![page_one, page_two]);
        let tally =
            scan_window(&mut fetcher, &vocabulary, &march(), ScanMode::FullScan).unwrap();
        assert_eq!(tally.matched, 2);
        assert_eq!(
            ranked(&vocabulary, &tally),
            [pair("python", 1), pair("java", 1)]
        );
        assert_eq!(fetcher.calls, 3);
    }

    #[test]
    fn short_pages_do_not_end_the_scan() {
        // Only an empty fetch signals the end of the feed.
        let vocabulary = Vocabulary::standard();
        let page_one = vec![
            dated_job("2024-03-10", "python role"),
            dated_job("2024-03-09", "python role"),
        ];
        let page_two = vec![dated_job("2024-03-08", "java role")];
        let mut fetcher = StubFetcher::new(vec![page_one, page_two]);
        let tally =
            scan_window(&mut fetcher, &vocabulary, &march(), ScanMode::EarlyStop).unwrap();
        assert_eq!(tally.matched, 3);
        assert_eq!(
            ranked(&vocabulary, &tally),
            [pair("python", 2), pair("java", 1)]
        );
        assert_eq!(fetcher.calls, 3);
    }

    #[test]
    fn empty_feed_yields_empty_tally() {
        let vocabulary = Vocabulary::standard();
        let mut fetcher = StubFetcher::new(vec![]);
        let tally =
            scan_window(&mut fetcher, &vocabulary, &march(), ScanMode::EarlyStop).unwrap();
        assert_eq!(tally.matched, 0);
        assert!(ranked(&vocabulary, &tally).is_empty());
        assert_eq!(fetcher.calls, 1);
    }

    #[test]
    fn records_after_the_window_do_not_stop_the_scan() {
        // Only a record older than the window start may end pagination.
        let vocabulary = Vocabulary::standard();
        let page_one = vec![dated_job("2024-04-10", "python role")];
        let page_two = vec![dated_job("2024-03-10", "java role")];
        let mut fetcher = StubFetcher::new(vec![page_one, page_two]);
        let tally =
            scan_window(&mut fetcher, &vocabulary, &march(), ScanMode::EarlyStop).unwrap();
        assert_eq!(tally.matched, 1);
        assert_eq!(ranked(&vocabulary, &tally), [pair("java", 1)]);
        assert_eq!(fetcher.calls, 3);
    }

    #[test]
    fn undated_records_never_stop_the_scan() {
        let vocabulary = Vocabulary::standard();
        let page_one = padded_to_limit(vec![]);
        let page_two = vec![dated_job("2024-03-08", "sql analyst")];
        let mut fetcher = StubFetcher::new(vec![page_one, page_two]);
        let tally =
            scan_window(&mut fetcher, &vocabulary, &march(), ScanMode::EarlyStop).unwrap();
        assert_eq!(tally.matched, 1);
        assert_eq!(ranked(&vocabulary, &tally), [pair("sql", 1)]);
        assert_eq!(fetcher.calls, 3);
    }

    #[test]
    fn skills_in_body_text_are_tallied_too() {
        let vocabulary = Vocabulary::standard();
        let mut fetcher = StubFetcher::new(vec![vec![Job {
            title: Some("Backend".to_string()),
            body: Some("<p>Stack: python, aws and more python.</p>".to_string()),
            published_at: Some("2024-03-15 08:00:00".to_string()),
            ..Job::default()
        }]]);
        let tally =
            scan_window(&mut fetcher, &vocabulary, &march(), ScanMode::EarlyStop).unwrap();
        assert_eq!(tally.matched, 1);
        assert_eq!(
            ranked(&vocabulary, &tally),
            [pair("python", 2), pair("aws", 1)]
        );
    }

    #[test]
    fn fetch_errors_carry_the_page_number() {
        let err = scan_window(
            &mut FailingFetcher,
            &Vocabulary::standard(),
            &march(),
            ScanMode::EarlyStop,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("page 1"));
    }
}

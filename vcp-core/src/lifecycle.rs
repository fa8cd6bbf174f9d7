//! Page lifecycle for a single-page host site.
//!
//! The host never reloads on route changes, so everything the overlay
//! injects must be torn down and re-injected on navigation.

use super::ranking::season_from_path;
use log::debug;
use std::fmt;

pub type Cleanup = Box<dyn FnOnce() + Send>;

/// Which page integration applies to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectionTarget {
    /// Archived pages from before 2024 have no compatible markup.
    Skip,
    /// The 2025 summer archive, built on an older page framework.
    LegacySummer2025,
    Current,
}

impl InjectionTarget {
    pub fn from_path(path: &str) -> Self {
        let Some(season) = season_from_path(path) else {
            return Self::Current;
        };

        let (year, name) = season.split_once('-').unwrap_or((season.as_str(), ""));
        match (year.parse::<u32>().ok(), name) {
            (Some(year), _) if year < 2024 => Self::Skip,
            (Some(2025), "summer") => Self::LegacySummer2025,
            _ => Self::Current,
        }
    }

    pub fn injects(self) -> bool {
        self != Self::Skip
    }
}

/// Runs an injection closure and keeps its cleanup until the next
/// navigation or shutdown. Every cleanup runs exactly once.
pub struct PageRunner<F>
where
    F: FnMut() -> Option<Cleanup>,
{
    inject: F,
    cleanup: Option<Cleanup>,
    runs: u64,
}

impl<F> fmt::Debug for PageRunner<F>
where
    F: FnMut() -> Option<Cleanup>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageRunner")
            .field("runs", &self.runs)
            .field("has_cleanup", &self.cleanup.is_some())
            .finish()
    }
}

impl<F> PageRunner<F>
where
    F: FnMut() -> Option<Cleanup>,
{
    /// Inject immediately.
    pub fn start(inject: F) -> Self {
        let mut runner = Self {
            inject,
            cleanup: None,
            runs: 0,
        };
        runner.run();
        runner
    }

    /// Route changed: tear down the previous injection and inject again.
    pub fn navigate(&mut self) {
        debug!("[Page] Navigation, re-injecting");
        self.shutdown();
        self.run();
    }

    pub fn shutdown(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }

    pub fn runs(&self) -> u64 {
        self.runs
    }

    fn run(&mut self) {
        self.runs += 1;
        self.cleanup = (self.inject)();
    }
}

impl<F> Drop for PageRunner<F>
where
    F: FnMut() -> Option<Cleanup>,
{
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn injection_target_by_season() {
        assert_eq!(
            InjectionTarget::from_path("/ranking/top100"),
            InjectionTarget::Current
        );
        assert_eq!(
            InjectionTarget::from_path("/2025-summer/ranking/top100"),
            InjectionTarget::LegacySummer2025
        );
        assert_eq!(
            InjectionTarget::from_path("/2026-winter/"),
            InjectionTarget::Current
        );
        assert_eq!(
            InjectionTarget::from_path("/2023-autumn/"),
            InjectionTarget::Skip
        );
        assert!(!InjectionTarget::Skip.injects());
    }

    #[test]
    fn cleanup_runs_once_per_injection() {
        let injected = Arc::new(AtomicU32::new(0));
        let cleaned = Arc::new(AtomicU32::new(0));

        let (i, c) = (injected.clone(), cleaned.clone());
        let mut runner = PageRunner::start(move || {
            i.fetch_add(1, Ordering::SeqCst);
            let c = c.clone();
            Some(Box::new(move || {
                c.fetch_add(1, Ordering::SeqCst);
            }) as Cleanup)
        });
        assert_eq!(injected.load(Ordering::SeqCst), 1);

        runner.navigate();
        runner.navigate();
        assert_eq!(injected.load(Ordering::SeqCst), 3);
        assert_eq!(cleaned.load(Ordering::SeqCst), 2);

        runner.shutdown();
        drop(runner);
        assert_eq!(cleaned.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn injection_without_cleanup() {
        let mut runner = PageRunner::start(|| None);
        runner.navigate();
        assert_eq!(runner.runs(), 2);
    }
}
